//! Time-clock models: time records, pause records, and work profiles.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One work session per user per day.
///
/// `hours_worked` and `total_paused_time` are derived at check-out by the
/// [`crate::clock`] arithmetic; `rate_per_hour` and `biweekly_total_hours`
/// are snapshotted from the user's [`WorkProfile`] at the same moment so a
/// later rate change does not silently rewrite past pay data (an explicit
/// profile update does propagate, see the work-profile handler).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRecord {
    /// Row id.
    pub id: i64,
    /// The user who worked this session.
    pub user_id: i64,
    /// Phoenix-local calendar date of the session, unique per user.
    pub date: NaiveDate,
    /// When the user checked in.
    pub check_in: DateTime<Utc>,
    /// When the user checked out, once they have.
    pub check_out: Option<DateTime<Utc>>,
    /// Net hours worked, two decimals, set at check-out.
    pub hours_worked: Option<Decimal>,
    /// Total paused hours within the session, two decimals.
    pub total_paused_time: Decimal,
    /// Whether the user is currently paused.
    pub is_paused: bool,
    /// Hourly rate snapshot taken at check-out.
    pub rate_per_hour: Option<Decimal>,
    /// Biweekly total hours snapshot taken at check-out.
    pub biweekly_total_hours: Option<Decimal>,
}

impl TimeRecord {
    /// Human-readable session status, as shown on the admin exports.
    pub fn status(&self) -> &'static str {
        if self.check_out.is_some() {
            "Completed"
        } else {
            "In Progress"
        }
    }
}

/// A pause within a work session.
///
/// At most one row per user may have a null `resume_time`; the schema
/// enforces this with a partial unique index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauseRecord {
    /// Row id.
    pub id: i64,
    /// The user who paused.
    pub user_id: i64,
    /// Why the user paused.
    pub reason: String,
    /// When the pause started.
    pub pause_time: DateTime<Utc>,
    /// When the pause ended, once resumed.
    pub resume_time: Option<DateTime<Utc>>,
    /// Pause length in seconds, set at resume.
    pub duration_seconds: Option<i64>,
}

impl PauseRecord {
    /// Whether this pause is still open.
    pub fn is_active(&self) -> bool {
        self.resume_time.is_none()
    }
}

/// Payroll profile, one per user.
///
/// `biweekly_total_hours` is a payroll field entered by administrators,
/// never derived from TimeRecord aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkProfile {
    /// The user this profile belongs to.
    pub user_id: i64,
    /// Hourly pay rate.
    pub rate_per_hour: Option<Decimal>,
    /// Scheduled hours per two-week pay period.
    pub biweekly_total_hours: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn open_record() -> TimeRecord {
        TimeRecord {
            id: 1,
            user_id: 7,
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            check_in: Utc.with_ymd_and_hms(2026, 1, 15, 16, 0, 0).unwrap(),
            check_out: None,
            hours_worked: None,
            total_paused_time: Decimal::ZERO,
            is_paused: false,
            rate_per_hour: None,
            biweekly_total_hours: None,
        }
    }

    #[test]
    fn test_status_reflects_check_out() {
        let mut record = open_record();
        assert_eq!(record.status(), "In Progress");

        record.check_out = Some(Utc.with_ymd_and_hms(2026, 1, 16, 0, 0, 0).unwrap());
        assert_eq!(record.status(), "Completed");
    }

    #[test]
    fn test_pause_is_active_until_resumed() {
        let mut pause = PauseRecord {
            id: 1,
            user_id: 7,
            reason: "lunch".to_string(),
            pause_time: Utc.with_ymd_and_hms(2026, 1, 15, 19, 0, 0).unwrap(),
            resume_time: None,
            duration_seconds: None,
        };
        assert!(pause.is_active());

        pause.resume_time = Some(Utc.with_ymd_and_hms(2026, 1, 15, 19, 30, 0).unwrap());
        assert!(!pause.is_active());
    }

    #[test]
    fn test_time_record_serializes_decimals_as_strings() {
        let mut record = open_record();
        record.hours_worked = Some(Decimal::new(750, 2));

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"hours_worked\":\"7.50\""), "{json}");
    }
}
