//! Per-user settings and document attachments.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Site a staff member is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsLocation {
    /// Guadalupe DTA.
    GuadalupeDta,
    /// Guadalupe DTT.
    GuadalupeDtt,
    /// Guadalupe Special DTA.
    GuadalupeSpecialDta,
    /// Home and community based services.
    Hcbs,
}

impl SettingsLocation {
    /// Returns the stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingsLocation::GuadalupeDta => "guadalupe_dta",
            SettingsLocation::GuadalupeDtt => "guadalupe_dtt",
            SettingsLocation::GuadalupeSpecialDta => "guadalupe_special_dta",
            SettingsLocation::Hcbs => "hcbs",
        }
    }

    /// Parses the stored string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "guadalupe_dta" => Some(SettingsLocation::GuadalupeDta),
            "guadalupe_dtt" => Some(SettingsLocation::GuadalupeDtt),
            "guadalupe_special_dta" => Some(SettingsLocation::GuadalupeSpecialDta),
            "hcbs" => Some(SettingsLocation::Hcbs),
            _ => None,
        }
    }
}

/// Self-reported gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Other or unspecified.
    Other,
}

impl Gender {
    /// Returns the stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    /// Parses the stored string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }
}

/// Self-reported marital status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    /// Single.
    Single,
    /// Married.
    Married,
    /// Divorced.
    Divorced,
    /// Widowed.
    Widowed,
}

impl MaritalStatus {
    /// Returns the stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            MaritalStatus::Single => "single",
            MaritalStatus::Married => "married",
            MaritalStatus::Divorced => "divorced",
            MaritalStatus::Widowed => "widowed",
        }
    }

    /// Parses the stored string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "single" => Some(MaritalStatus::Single),
            "married" => Some(MaritalStatus::Married),
            "divorced" => Some(MaritalStatus::Divorced),
            "widowed" => Some(MaritalStatus::Widowed),
            _ => None,
        }
    }
}

/// Self-reported race, with a prefer-not-to-disclose default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Race {
    /// American Indian or Alaska Native.
    AmericanIndian,
    /// Asian.
    Asian,
    /// Black or African American.
    AfricanAmerican,
    /// Hispanic or Latino.
    Hispanic,
    /// Native Hawaiian or Other Pacific Islander.
    NativeHawaiian,
    /// White.
    White,
    /// Two or more races.
    TwoOrMore,
    /// Prefer not to disclose.
    NotDisclosed,
}

impl Race {
    /// Returns the stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Race::AmericanIndian => "american_indian",
            Race::Asian => "asian",
            Race::AfricanAmerican => "african_american",
            Race::Hispanic => "hispanic",
            Race::NativeHawaiian => "native_hawaiian",
            Race::White => "white",
            Race::TwoOrMore => "two_or_more",
            Race::NotDisclosed => "not_disclosed",
        }
    }

    /// Parses the stored string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "american_indian" => Some(Race::AmericanIndian),
            "asian" => Some(Race::Asian),
            "african_american" => Some(Race::AfricanAmerican),
            "hispanic" => Some(Race::Hispanic),
            "native_hawaiian" => Some(Race::NativeHawaiian),
            "white" => Some(Race::White),
            "two_or_more" => Some(Race::TwoOrMore),
            "not_disclosed" => Some(Race::NotDisclosed),
            _ => None,
        }
    }
}

/// Address, demographic, and employment metadata for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Row id.
    pub id: i64,
    /// The user these settings belong to, one row per user.
    pub user_id: i64,
    /// Street address.
    pub street_address: String,
    /// Second address line.
    pub address2: String,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// ZIP code.
    pub zip_code: String,
    /// Reporting manager's name.
    pub manager_name: String,
    /// Provider identifier.
    pub provider_id: String,
    /// Payroll identifier.
    pub payroll_id: String,
    /// Assigned site.
    pub location: SettingsLocation,
    /// Self-reported gender.
    pub gender: Gender,
    /// Self-reported race.
    pub race: Race,
    /// Self-reported marital status.
    pub marital_status: MaritalStatus,
    /// Comma-separated list of services provided.
    pub services_provided: String,
    /// Free-form notes.
    pub additional_info: Option<String>,
    /// Attached documents.
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// A dated document attached to a user's settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Row id.
    pub id: i64,
    /// The settings row this document is attached to.
    pub settings_id: i64,
    /// Document name.
    pub name: String,
    /// First date the document is effective.
    pub effective_start: NaiveDate,
    /// Last date the document is effective.
    pub effective_end: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_location_round_trip() {
        for loc in [
            SettingsLocation::GuadalupeDta,
            SettingsLocation::GuadalupeDtt,
            SettingsLocation::GuadalupeSpecialDta,
            SettingsLocation::Hcbs,
        ] {
            assert_eq!(SettingsLocation::parse(loc.as_str()), Some(loc));
        }
    }

    #[test]
    fn test_race_round_trip() {
        for race in [
            Race::AmericanIndian,
            Race::Asian,
            Race::AfricanAmerican,
            Race::Hispanic,
            Race::NativeHawaiian,
            Race::White,
            Race::TwoOrMore,
            Race::NotDisclosed,
        ] {
            assert_eq!(Race::parse(race.as_str()), Some(race));
        }
    }
}
