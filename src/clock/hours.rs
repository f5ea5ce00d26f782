//! Worked-hours computation.
//!
//! Worked time is the check-in/check-out span minus the portions of any
//! resolved pauses that overlap it. Pauses are clipped to the work window,
//! so a pause straddling check-in or check-out only contributes its
//! overlapping portion, and pauses entirely outside the window contribute
//! nothing. Unresolved pauses (no resume time yet) are ignored.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A pause interval as stored on a pause record.
#[derive(Debug, Clone, PartialEq)]
pub struct PauseSpan {
    /// When the pause started.
    pub pause_time: DateTime<Utc>,
    /// When the pause ended, if it has been resumed.
    pub resume_time: Option<DateTime<Utc>>,
}

/// The result of a worked-hours computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkedHours {
    /// Net hours worked, clamped to zero and rounded to two decimals.
    pub hours_worked: Decimal,
    /// Total paused time in hours, rounded to two decimals.
    pub paused_hours: Decimal,
}

/// Returns the number of seconds of `span` that fall inside the
/// `[check_in, check_out]` window.
///
/// Unresolved spans and spans with a resume time at or before the pause
/// time count as zero.
///
/// # Examples
///
/// ```
/// use care_office::clock::{PauseSpan, pause_overlap_seconds};
/// use chrono::{TimeZone, Utc};
///
/// let check_in = Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap();
/// let check_out = Utc.with_ymd_and_hms(2026, 1, 15, 17, 0, 0).unwrap();
/// let lunch = PauseSpan {
///     pause_time: Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
///     resume_time: Some(Utc.with_ymd_and_hms(2026, 1, 15, 12, 30, 0).unwrap()),
/// };
/// assert_eq!(pause_overlap_seconds(check_in, check_out, &lunch), 1800);
/// ```
pub fn pause_overlap_seconds(
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    span: &PauseSpan,
) -> i64 {
    let Some(resume_time) = span.resume_time else {
        return 0;
    };

    let start = span.pause_time.max(check_in);
    let end = resume_time.min(check_out);

    (end - start).num_seconds().max(0)
}

/// Computes net worked hours and total paused hours for a closed time record.
///
/// Worked hours are `(check_out - check_in - overlapping pause time)`,
/// clamped to a minimum of zero and rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use care_office::clock::{PauseSpan, compute_worked_hours};
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let check_in = Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap();
/// let check_out = Utc.with_ymd_and_hms(2026, 1, 15, 17, 0, 0).unwrap();
/// let pauses = vec![PauseSpan {
///     pause_time: Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
///     resume_time: Some(Utc.with_ymd_and_hms(2026, 1, 15, 12, 30, 0).unwrap()),
/// }];
/// let result = compute_worked_hours(check_in, check_out, &pauses);
/// assert_eq!(result.hours_worked, Decimal::new(750, 2)); // 7.50
/// ```
pub fn compute_worked_hours(
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    pauses: &[PauseSpan],
) -> WorkedHours {
    let total_seconds = (check_out - check_in).num_seconds();

    let paused_seconds: i64 = pauses
        .iter()
        .map(|span| pause_overlap_seconds(check_in, check_out, span))
        .sum();

    let net_seconds = (total_seconds - paused_seconds).max(0);

    WorkedHours {
        hours_worked: seconds_to_hours(net_seconds),
        paused_hours: seconds_to_hours(paused_seconds),
    }
}

/// Converts a second count to hours with a fixed two-decimal scale, so
/// values serialize as "7.50" rather than "7.5".
fn seconds_to_hours(seconds: i64) -> Decimal {
    let mut hours = (Decimal::from(seconds) / Decimal::from(3600)).round_dp(2);
    hours.rescale(2);
    hours
}
