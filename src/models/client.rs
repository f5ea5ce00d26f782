//! Client model and related types.
//!
//! A client is a person receiving services, owned by the staff user who
//! manages their records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a client's services are billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillType {
    /// Billed through DDD only.
    #[serde(rename = "DDD only")]
    DddOnly,
}

impl BillType {
    /// Returns the stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            BillType::DddOnly => "DDD only",
        }
    }

    /// Parses the stored string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DDD only" => Some(BillType::DddOnly),
            _ => None,
        }
    }
}

/// Whether a client is currently receiving services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    /// Currently receiving services.
    Active,
    /// No longer receiving services; records are retained.
    Inactive,
}

impl ClientStatus {
    /// Returns the stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Active => "active",
            ClientStatus::Inactive => "inactive",
        }
    }

    /// Parses the stored string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(ClientStatus::Active),
            "inactive" => Some(ClientStatus::Inactive),
            _ => None,
        }
    }

    /// Default status for newly registered clients.
    pub fn default_active() -> Self {
        ClientStatus::Active
    }
}

/// A client demographic and billing record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Row id.
    pub id: i64,
    /// The staff user who owns this record.
    pub user_id: i64,
    /// External client identifier, unique across the registry.
    pub client_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth.
    pub dob: NaiveDate,
    /// Service location description.
    pub location: String,
    /// Billing arrangement.
    pub bill_type: BillType,
    /// Contact phone number.
    pub phone: String,
    /// Guardian name.
    pub guardian: String,
    /// Active/inactive status.
    pub status: ClientStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bill_type_round_trip() {
        assert_eq!(BillType::parse("DDD only"), Some(BillType::DddOnly));
        assert_eq!(BillType::DddOnly.as_str(), "DDD only");
        assert_eq!(BillType::parse("private"), None);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ClientStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&ClientStatus::Inactive).unwrap(),
            "\"inactive\""
        );
    }

    #[test]
    fn test_client_deserialization() {
        let json = r#"{
            "id": 1,
            "user_id": 2,
            "client_id": "CL-1001",
            "first_name": "Ana",
            "last_name": "Lopez",
            "dob": "2001-04-09",
            "location": "Guadalupe",
            "bill_type": "DDD only",
            "phone": "480-555-0100",
            "guardian": "Maria Lopez",
            "status": "active"
        }"#;

        let client: Client = serde_json::from_str(json).unwrap();
        assert_eq!(client.client_id, "CL-1001");
        assert_eq!(client.bill_type, BillType::DddOnly);
        assert_eq!(client.status, ClientStatus::Active);
    }
}
