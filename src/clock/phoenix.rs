//! Phoenix-local date helpers.
//!
//! The provider operates out of Arizona, which does not observe daylight
//! saving time, so the local offset is a fixed UTC-7 year round. Attendance
//! and time-clock records are bucketed by the Phoenix-local calendar date.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Arizona is UTC-7 with no daylight saving transitions.
pub const PHOENIX_UTC_OFFSET_HOURS: i32 = -7;

/// Returns the fixed America/Phoenix offset.
pub fn phoenix_offset() -> FixedOffset {
    FixedOffset::east_opt(PHOENIX_UTC_OFFSET_HOURS * 3600)
        .unwrap_or_else(|| unreachable!("static offset is in range"))
}

/// Returns the Phoenix-local calendar date for the given instant.
///
/// # Examples
///
/// ```
/// use care_office::clock::phoenix_date;
/// use chrono::{TimeZone, Utc};
///
/// // 03:00 UTC is still 20:00 the previous day in Phoenix.
/// let instant = Utc.with_ymd_and_hms(2026, 1, 16, 3, 0, 0).unwrap();
/// assert_eq!(phoenix_date(instant).to_string(), "2026-01-15");
/// ```
pub fn phoenix_date(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&phoenix_offset()).date_naive()
}

/// Returns the current Phoenix-local calendar date.
pub fn phoenix_today() -> NaiveDate {
    phoenix_date(Utc::now())
}
