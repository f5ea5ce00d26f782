//! Request body types for the HTTP API.
//!
//! Wire-facing structs are kept separate from the storage input types so
//! serde defaults and renames never leak into the db layer.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::db::{
    attendance::AttendanceInput,
    clients::ClientInput,
    goals::{GoalInput, ProgressInput, TrialInput},
    settings::SettingsInput,
};
use crate::models::{
    BillType, ClientStatus, Gender, MaritalStatus, PercentageBucket, PromptType, Race,
    ServiceCode, ServiceLocation, SettingsLocation,
};

fn default_true() -> bool {
    true
}

fn default_pause_reason() -> String {
    "Break".to_string()
}

/// Body for `POST /api/users/`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreateRequest {
    /// Display name.
    pub name: String,
    /// Login email, unique.
    pub email: String,
    /// Staff flag.
    #[serde(default)]
    pub is_staff: bool,
}

/// Body for `PUT /api/users/{id}/`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserUpdateRequest {
    /// Display name.
    pub name: String,
    /// Login email, unique.
    pub email: String,
    /// Staff flag.
    pub is_staff: bool,
    /// Active flag.
    pub is_active: bool,
}

/// Body for client create/update.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientRequest {
    /// Owning staff user.
    pub user_id: i64,
    /// External client identifier.
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
    #[serde(default)]
    pub phone: String,
    /// Guardian name.
    #[serde(default)]
    pub guardian: String,
    /// Active/inactive status.
    #[serde(default = "ClientStatus::default_active")]
    pub status: ClientStatus,
}

impl From<ClientRequest> for ClientInput {
    fn from(req: ClientRequest) -> Self {
        ClientInput {
            user_id: req.user_id,
            client_id: req.client_id,
            first_name: req.first_name,
            last_name: req.last_name,
            dob: req.dob,
            location: req.location,
            bill_type: req.bill_type,
            phone: req.phone,
            guardian: req.guardian,
            status: req.status,
        }
    }
}

/// Body for attendance create/update.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceRequest {
    /// Client display name.
    pub client: String,
    /// Service date.
    pub date: NaiveDate,
    /// Arrival time.
    pub time_in: NaiveTime,
    /// Departure time.
    pub time_out: NaiveTime,
    /// Service delivered.
    pub service: ServiceCode,
    /// Site where the service was delivered.
    pub location: ServiceLocation,
    /// One-on-one session flag.
    #[serde(default)]
    pub one_on_one: bool,
    /// Documentation-complete flag.
    #[serde(default)]
    pub documentation: bool,
}

impl From<AttendanceRequest> for AttendanceInput {
    fn from(req: AttendanceRequest) -> Self {
        AttendanceInput {
            client: req.client,
            date: req.date,
            time_in: req.time_in,
            time_out: req.time_out,
            service: req.service,
            location: req.location,
            one_on_one: req.one_on_one,
            documentation: req.documentation,
        }
    }
}

/// Body for goal create/update.
#[derive(Debug, Clone, Deserialize)]
pub struct GoalRequest {
    /// Client the goal belongs to.
    pub client_id: i64,
    /// What the goal targets.
    pub description: String,
    /// Activities used to work the goal.
    #[serde(default)]
    pub activities: String,
    /// Desired outcome.
    #[serde(default)]
    pub outcome: String,
    /// Whether the goal is currently worked.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl From<GoalRequest> for GoalInput {
    fn from(req: GoalRequest) -> Self {
        GoalInput {
            client_id: req.client_id,
            description: req.description,
            activities: req.activities,
            outcome: req.outcome,
            is_active: req.is_active,
        }
    }
}

/// Body for daily progress create/update.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressRequest {
    /// Client the note belongs to.
    pub client_id: i64,
    /// Service date.
    pub date: NaiveDate,
    /// Site where the session happened.
    pub location: String,
    /// Session narrative.
    #[serde(default)]
    pub general_notes: String,
    /// Recording provider's initials.
    pub provider_initials: String,
}

impl From<ProgressRequest> for ProgressInput {
    fn from(req: ProgressRequest) -> Self {
        ProgressInput {
            client_id: req.client_id,
            date: req.date,
            location: req.location,
            general_notes: req.general_notes,
            provider_initials: req.provider_initials,
        }
    }
}

/// Body for trial create/update.
#[derive(Debug, Clone, Deserialize)]
pub struct TrialRequest {
    /// Owning progress note.
    pub daily_progress_id: i64,
    /// Position within the note, unique per note.
    pub trial_number: u32,
    /// Scored outcome bucket.
    pub percentage: PercentageBucket,
    /// Prompt used, if any.
    #[serde(default)]
    pub prompt: Option<PromptType>,
    /// Recording provider's initials.
    pub initials: String,
}

impl From<TrialRequest> for TrialInput {
    fn from(req: TrialRequest) -> Self {
        TrialInput {
            daily_progress_id: req.daily_progress_id,
            trial_number: req.trial_number,
            percentage: req.percentage,
            prompt: req.prompt,
            initials: req.initials,
        }
    }
}

/// Body for `POST /pause/`.
#[derive(Debug, Clone, Deserialize)]
pub struct PauseRequest {
    /// Why the clock is being paused.
    #[serde(default = "default_pause_reason")]
    pub reason: String,
}

/// Body for `PUT /api/work-profile/`.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkProfileRequest {
    /// Hourly pay rate.
    pub rate_per_hour: Option<Decimal>,
    /// Expected hours per two-week period.
    pub biweekly_total_hours: Option<Decimal>,
}

/// Body for `PUT /settings/`.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsRequest {
    /// Street address line.
    pub street_address: String,
    /// Second address line.
    #[serde(default)]
    pub address2: String,
    /// City.
    pub city: String,
    /// State abbreviation.
    pub state: String,
    /// ZIP code.
    pub zip_code: String,
    /// Direct manager's name.
    pub manager_name: String,
    /// Provider identifier.
    pub provider_id: String,
    /// Payroll identifier.
    pub payroll_id: String,
    /// Primary work site.
    pub location: SettingsLocation,
    /// Self-reported gender.
    pub gender: Gender,
    /// Self-reported race.
    pub race: Race,
    /// Marital status.
    pub marital_status: MaritalStatus,
    /// Services the provider delivers.
    pub services_provided: String,
    /// Free-form notes.
    #[serde(default)]
    pub additional_info: Option<String>,
}

impl From<SettingsRequest> for SettingsInput {
    fn from(req: SettingsRequest) -> Self {
        SettingsInput {
            street_address: req.street_address,
            address2: req.address2,
            city: req.city,
            state: req.state,
            zip_code: req.zip_code,
            manager_name: req.manager_name,
            provider_id: req.provider_id,
            payroll_id: req.payroll_id,
            location: req.location,
            gender: req.gender,
            race: req.race,
            marital_status: req.marital_status,
            services_provided: req.services_provided,
            additional_info: req.additional_info,
        }
    }
}

/// Body for `POST /settings/documents/`.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentRequest {
    /// Document name.
    pub name: String,
    /// First day the document is valid.
    pub effective_start: NaiveDate,
    /// Last day the document is valid.
    pub effective_end: NaiveDate,
}
