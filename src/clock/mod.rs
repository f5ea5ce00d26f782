//! Time-clock arithmetic for the back office service.
//!
//! This module contains the worked-hours computation (check-out minus
//! check-in minus overlapping pause time) and the fixed-offset Phoenix
//! date helpers used to decide what "today" means for attendance and
//! the time clock.

mod hours;
mod phoenix;

pub use hours::{PauseSpan, WorkedHours, compute_worked_hours, pause_overlap_seconds};
pub use phoenix::{PHOENIX_UTC_OFFSET_HOURS, phoenix_date, phoenix_offset, phoenix_today};
