//! User model.
//!
//! Users are the staff accounts that own clients, time records, and
//! settings. Authentication itself is out of scope; a user id arrives
//! with every request and is resolved against this table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A staff account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Row id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: String,
    /// Whether the user may use the administrative surfaces.
    pub is_staff: bool,
    /// Inactive users keep their rows but cannot act.
    pub is_active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_user_serialization_round_trip() {
        let user = User {
            id: 1,
            name: "Dana Reyes".to_string(),
            email: "dana@example.com".to_string(),
            is_staff: true,
            is_active: true,
            created_at: Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
        };

        let json = serde_json::to_string(&user).unwrap();
        let deserialized: User = serde_json::from_str(&json).unwrap();
        assert_eq!(user, deserialized);
    }
}
