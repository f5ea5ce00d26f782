//! Attendance record model and service/location enumerations.
//!
//! Attendance rows reference the client by display name rather than by
//! foreign key, matching the upstream intake forms, and are unique per
//! (client, date).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Day-program service codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceCode {
    /// DTA - Day Program (Adult) - 1.
    #[serde(rename = "DTA1")]
    Dta1,
    /// DTA - Day Program (Adult) - 2.
    #[serde(rename = "DTA2")]
    Dta2,
    /// DTT - Day Treatment Training.
    #[serde(rename = "DTT")]
    Dtt,
    /// Special DTA - Special Day Program.
    #[serde(rename = "SDTA")]
    Sdta,
}

impl ServiceCode {
    /// Returns the stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCode::Dta1 => "DTA1",
            ServiceCode::Dta2 => "DTA2",
            ServiceCode::Dtt => "DTT",
            ServiceCode::Sdta => "SDTA",
        }
    }

    /// Parses the stored string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DTA1" => Some(ServiceCode::Dta1),
            "DTA2" => Some(ServiceCode::Dta2),
            "DTT" => Some(ServiceCode::Dtt),
            "SDTA" => Some(ServiceCode::Sdta),
            _ => None,
        }
    }
}

/// Program site where the service was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceLocation {
    /// GUADALUPE DTA site.
    #[serde(rename = "GUADALUPE_DTA")]
    GuadalupeDta,
    /// GUADALUPE DTT site.
    #[serde(rename = "GUADALUPE_DTT")]
    GuadalupeDtt,
    /// GUADALUPE SPECIAL DTA site.
    #[serde(rename = "GUADALUPE_SPECIAL")]
    GuadalupeSpecial,
}

impl ServiceLocation {
    /// Returns the stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceLocation::GuadalupeDta => "GUADALUPE_DTA",
            ServiceLocation::GuadalupeDtt => "GUADALUPE_DTT",
            ServiceLocation::GuadalupeSpecial => "GUADALUPE_SPECIAL",
        }
    }

    /// Parses the stored string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "GUADALUPE_DTA" => Some(ServiceLocation::GuadalupeDta),
            "GUADALUPE_DTT" => Some(ServiceLocation::GuadalupeDtt),
            "GUADALUPE_SPECIAL" => Some(ServiceLocation::GuadalupeSpecial),
            _ => None,
        }
    }
}

/// A per-client daily attendance entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Row id.
    pub id: i64,
    /// Client display name (not a foreign key).
    pub client: String,
    /// Service date.
    pub date: NaiveDate,
    /// Arrival time.
    pub time_in: NaiveTime,
    /// Departure time; must be after `time_in`.
    pub time_out: NaiveTime,
    /// Service delivered.
    pub service: ServiceCode,
    /// Site where the service was delivered.
    pub location: ServiceLocation,
    /// Whether the session was one-on-one.
    pub one_on_one: bool,
    /// Whether supporting documentation was completed.
    pub documentation: bool,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_code_round_trip() {
        for code in [
            ServiceCode::Dta1,
            ServiceCode::Dta2,
            ServiceCode::Dtt,
            ServiceCode::Sdta,
        ] {
            assert_eq!(ServiceCode::parse(code.as_str()), Some(code));
        }
        assert_eq!(ServiceCode::parse("HCBS"), None);
    }

    #[test]
    fn test_location_round_trip() {
        for loc in [
            ServiceLocation::GuadalupeDta,
            ServiceLocation::GuadalupeDtt,
            ServiceLocation::GuadalupeSpecial,
        ] {
            assert_eq!(ServiceLocation::parse(loc.as_str()), Some(loc));
        }
    }

    #[test]
    fn test_service_code_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&ServiceCode::Dta1).unwrap(),
            "\"DTA1\""
        );
        assert_eq!(
            serde_json::to_string(&ServiceLocation::GuadalupeSpecial).unwrap(),
            "\"GUADALUPE_SPECIAL\""
        );
    }
}
