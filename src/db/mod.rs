//! SQLite persistence layer.
//!
//! One store module per resource family, all operating on a plain
//! [`rusqlite::Connection`]. Dates and times are stored as ISO-8601 text
//! (UTC instants with a trailing `Z`, so lexicographic order is
//! chronological order), decimals as text.
//!
//! The per-day uniqueness rules and the single-active-pause invariant are
//! carried by the schema itself (see [`schema`]); the stores translate
//! unique-constraint violations into [`OfficeError::Duplicate`] and
//! foreign-key violations into [`OfficeError::NotFound`] for the missing
//! parent row, so handlers can return a 400 or 404 instead of a 500.

pub mod attendance;
pub mod clients;
pub mod goals;
pub mod schema;
pub mod settings;
pub mod timeclock;
pub mod users;

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::error::{OfficeError, OfficeResult};

/// Opens (creating if necessary) the database at `path` and ensures the
/// schema exists.
pub fn open<P: AsRef<Path>>(path: P) -> OfficeResult<Connection> {
    let conn = Connection::open(path)?;
    initialize(&conn)?;
    Ok(conn)
}

/// Opens an in-memory database with the schema applied. Used by tests.
pub fn open_in_memory() -> OfficeResult<Connection> {
    let conn = Connection::open_in_memory()?;
    initialize(&conn)?;
    Ok(conn)
}

fn initialize(conn: &Connection) -> OfficeResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    schema::create_all(conn)?;
    Ok(())
}

/// Maps a SQLite constraint violation onto a friendly error: a foreign-key
/// failure means the referenced `parent` row does not exist, any other
/// constraint failure is a uniqueness collision on `entity`. Everything
/// else passes through as a database error.
///
/// The foreign-key arm must be checked first; FK failures also report the
/// generic `ConstraintViolation` primary code.
pub(crate) fn constraint_error(
    err: rusqlite::Error,
    entity: &str,
    message: &str,
    parent: &str,
) -> OfficeError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
        {
            OfficeError::NotFound {
                entity: parent.to_string(),
            }
        }
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            OfficeError::Duplicate {
                entity: entity.to_string(),
                message: message.to_string(),
            }
        }
        _ => OfficeError::Database(err),
    }
}

// --- text <-> typed column helpers -----------------------------------------
//
// Conversion failures surface as FromSqlConversionFailure so they flow
// through rusqlite's row mapping like any other column type mismatch.

pub(crate) fn datetime_to_sql(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub(crate) fn datetime_from_sql(idx: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| conversion_error(idx, format!("invalid datetime: {s}")))
}

pub(crate) fn date_to_sql(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn date_from_sql(idx: usize, s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| conversion_error(idx, format!("invalid date: {s}")))
}

pub(crate) fn time_to_sql(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

pub(crate) fn time_from_sql(idx: usize, s: &str) -> rusqlite::Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| conversion_error(idx, format!("invalid time: {s}")))
}

pub(crate) fn decimal_to_sql(value: Decimal) -> String {
    value.to_string()
}

pub(crate) fn decimal_from_sql(idx: usize, s: &str) -> rusqlite::Result<Decimal> {
    s.parse::<Decimal>()
        .map_err(|_| conversion_error(idx, format!("invalid decimal: {s}")))
}

fn conversion_error(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        rusqlite::types::Type::Text,
        Box::new(OfficeError::Validation { message }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_open_in_memory_applies_schema() {
        let conn = open_in_memory().unwrap();
        // The users table must exist after initialization.
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_datetime_round_trip_is_second_precision_utc() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 15, 16, 30, 5).unwrap();
        let text = datetime_to_sql(dt);
        assert_eq!(text, "2026-01-15T16:30:05Z");
        assert_eq!(datetime_from_sql(0, &text).unwrap(), dt);
    }

    #[test]
    fn test_datetime_text_sorts_chronologically() {
        let earlier = datetime_to_sql(Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap());
        let later = datetime_to_sql(Utc.with_ymd_and_hms(2026, 1, 15, 17, 0, 0).unwrap());
        assert!(earlier < later);
    }

    #[test]
    fn test_time_accepts_minutes_only() {
        let time = time_from_sql(0, "09:30").unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
    }

    #[test]
    fn test_decimal_round_trip_preserves_scale() {
        let value = Decimal::new(750, 2);
        assert_eq!(decimal_to_sql(value), "7.50");
        assert_eq!(decimal_from_sql(0, "7.50").unwrap(), value);
    }

    #[test]
    fn test_invalid_date_is_conversion_failure() {
        assert!(date_from_sql(0, "15/01/2026").is_err());
    }

    fn sqlite_failure(extended_code: std::os::raw::c_int) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(rusqlite::ffi::Error::new(extended_code), None)
    }

    #[test]
    fn test_foreign_key_violation_is_parent_not_found() {
        let err = constraint_error(
            sqlite_failure(rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY),
            "time record",
            "You have already checked in today",
            "User",
        );
        assert!(matches!(err, OfficeError::NotFound { entity } if entity == "User"));
    }

    #[test]
    fn test_unique_violation_is_duplicate() {
        let err = constraint_error(
            sqlite_failure(rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE),
            "time record",
            "You have already checked in today",
            "User",
        );
        assert!(matches!(err, OfficeError::Duplicate { entity, .. } if entity == "time record"));
    }

    #[test]
    fn test_non_constraint_failure_passes_through() {
        let err = constraint_error(
            sqlite_failure(rusqlite::ffi::SQLITE_BUSY),
            "time record",
            "",
            "User",
        );
        assert!(matches!(err, OfficeError::Database(_)));
    }
}
