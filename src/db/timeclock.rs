//! Time record, pause record, and work profile stores.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

use crate::clock::PauseSpan;
use crate::db::{
    date_from_sql, date_to_sql, datetime_from_sql, datetime_to_sql, decimal_from_sql,
    constraint_error, decimal_to_sql,
};
use crate::error::{OfficeError, OfficeResult};
use crate::models::{PauseRecord, TimeRecord, WorkProfile};

/// Per-user worked-hours roll-up shown on admin summaries.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WorkSummary {
    /// Sum of `hours_worked` across completed records.
    pub total_hours: Decimal,
    /// Number of distinct days with a record.
    pub days_worked: u32,
    /// `total_hours / days_worked`, two decimals, zero when no days.
    pub average_hours_per_day: Decimal,
}

fn map_time_record(row: &Row) -> rusqlite::Result<TimeRecord> {
    let date: String = row.get("date")?;
    let check_in: String = row.get("check_in")?;
    let check_out: Option<String> = row.get("check_out")?;
    let hours_worked: Option<String> = row.get("hours_worked")?;
    let total_paused: String = row.get("total_paused_time")?;
    let rate: Option<String> = row.get("rate_per_hour")?;
    let biweekly: Option<String> = row.get("biweekly_total_hours")?;

    Ok(TimeRecord {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        date: date_from_sql(2, &date)?,
        check_in: datetime_from_sql(3, &check_in)?,
        check_out: check_out
            .as_deref()
            .map(|s| datetime_from_sql(4, s))
            .transpose()?,
        hours_worked: hours_worked
            .as_deref()
            .map(|s| decimal_from_sql(5, s))
            .transpose()?,
        total_paused_time: decimal_from_sql(6, &total_paused)?,
        is_paused: row.get("is_paused")?,
        rate_per_hour: rate.as_deref().map(|s| decimal_from_sql(8, s)).transpose()?,
        biweekly_total_hours: biweekly
            .as_deref()
            .map(|s| decimal_from_sql(9, s))
            .transpose()?,
    })
}

fn map_pause(row: &Row) -> rusqlite::Result<PauseRecord> {
    let pause_time: String = row.get("pause_time")?;
    let resume_time: Option<String> = row.get("resume_time")?;
    Ok(PauseRecord {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        reason: row.get("reason")?,
        pause_time: datetime_from_sql(3, &pause_time)?,
        resume_time: resume_time
            .as_deref()
            .map(|s| datetime_from_sql(4, s))
            .transpose()?,
        duration_seconds: row.get("duration_seconds")?,
    })
}

// --- time records ----------------------------------------------------------

/// Opens a new time record for the user on the given date.
///
/// The (user, date) pair is unique; checking in twice on one day is a
/// duplicate error.
pub fn check_in(
    conn: &Connection,
    user_id: i64,
    date: NaiveDate,
    at: DateTime<Utc>,
) -> OfficeResult<TimeRecord> {
    conn.execute(
        "INSERT INTO time_records (user_id, date, check_in) VALUES (?1, ?2, ?3)",
        params![user_id, date_to_sql(date), datetime_to_sql(at)],
    )
    .map_err(|e| constraint_error(e, "time record", "You have already checked in today", "User"))?;

    get(conn, conn.last_insert_rowid())
}

/// Fetches a time record by id.
pub fn get(conn: &Connection, id: i64) -> OfficeResult<TimeRecord> {
    conn.query_row(
        "SELECT * FROM time_records WHERE id = ?1",
        params![id],
        map_time_record,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => OfficeError::NotFound {
            entity: "Time record".to_string(),
        },
        other => OfficeError::Database(other),
    })
}

/// Fetches the user's record for one date, if any.
pub fn get_for_date(
    conn: &Connection,
    user_id: i64,
    date: NaiveDate,
) -> OfficeResult<Option<TimeRecord>> {
    let record = conn
        .query_row(
            "SELECT * FROM time_records WHERE user_id = ?1 AND date = ?2",
            params![user_id, date_to_sql(date)],
            map_time_record,
        )
        .optional()?;
    Ok(record)
}

/// Fetches the user's still-open record for one date, if any.
pub fn get_open_for_date(
    conn: &Connection,
    user_id: i64,
    date: NaiveDate,
) -> OfficeResult<Option<TimeRecord>> {
    let record = conn
        .query_row(
            "SELECT * FROM time_records
             WHERE user_id = ?1 AND date = ?2 AND check_out IS NULL",
            params![user_id, date_to_sql(date)],
            map_time_record,
        )
        .optional()?;
    Ok(record)
}

/// Closes a record with the derived hours and payroll snapshot.
#[allow(clippy::too_many_arguments)]
pub fn close(
    conn: &Connection,
    id: i64,
    check_out: DateTime<Utc>,
    hours_worked: Decimal,
    total_paused_time: Decimal,
    rate_per_hour: Option<Decimal>,
    biweekly_total_hours: Option<Decimal>,
) -> OfficeResult<TimeRecord> {
    let changed = conn.execute(
        "UPDATE time_records SET
            check_out = ?1, hours_worked = ?2, total_paused_time = ?3,
            is_paused = 0, rate_per_hour = ?4, biweekly_total_hours = ?5
         WHERE id = ?6",
        params![
            datetime_to_sql(check_out),
            decimal_to_sql(hours_worked),
            decimal_to_sql(total_paused_time),
            rate_per_hour.map(decimal_to_sql),
            biweekly_total_hours.map(decimal_to_sql),
            id,
        ],
    )?;
    if changed == 0 {
        return Err(OfficeError::NotFound {
            entity: "Time record".to_string(),
        });
    }
    get(conn, id)
}

/// Flags whether the user's record for the date is currently paused.
pub fn set_paused(
    conn: &Connection,
    user_id: i64,
    date: NaiveDate,
    paused: bool,
) -> OfficeResult<()> {
    conn.execute(
        "UPDATE time_records SET is_paused = ?1 WHERE user_id = ?2 AND date = ?3",
        params![paused, user_id, date_to_sql(date)],
    )?;
    Ok(())
}

/// Lists the user's records, newest first.
pub fn history(conn: &Connection, user_id: i64) -> OfficeResult<Vec<TimeRecord>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM time_records WHERE user_id = ?1 ORDER BY date DESC, check_in DESC",
    )?;
    let rows = stmt.query_map(params![user_id], map_time_record)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Rolls up total/days/average worked hours for a user.
pub fn summary(conn: &Connection, user_id: i64) -> OfficeResult<WorkSummary> {
    let records = history(conn, user_id)?;

    let mut total_hours: Decimal = records.iter().filter_map(|r| r.hours_worked).sum();
    total_hours.rescale(2);
    let days_worked = records.len() as u32;
    let mut average_hours_per_day = if days_worked == 0 {
        Decimal::ZERO
    } else {
        (total_hours / Decimal::from(days_worked)).round_dp(2)
    };
    average_hours_per_day.rescale(2);

    Ok(WorkSummary {
        total_hours,
        days_worked,
        average_hours_per_day,
    })
}

/// Rewrites the payroll snapshot on all of a user's records.
///
/// Returns the number of records touched.
pub fn propagate_profile(
    conn: &Connection,
    user_id: i64,
    rate_per_hour: Option<Decimal>,
    biweekly_total_hours: Option<Decimal>,
) -> OfficeResult<usize> {
    let changed = conn.execute(
        "UPDATE time_records SET rate_per_hour = ?1, biweekly_total_hours = ?2
         WHERE user_id = ?3",
        params![
            rate_per_hour.map(decimal_to_sql),
            biweekly_total_hours.map(decimal_to_sql),
            user_id,
        ],
    )?;
    Ok(changed)
}

// --- pause records ---------------------------------------------------------

/// Opens a pause for the user.
///
/// The partial unique index on unresolved pauses turns a double-pause race
/// into a constraint violation here, surfaced as [`OfficeError::ActivePauseExists`].
pub fn open_pause(
    conn: &Connection,
    user_id: i64,
    reason: &str,
    at: DateTime<Utc>,
) -> OfficeResult<PauseRecord> {
    conn.execute(
        "INSERT INTO pause_records (user_id, reason, pause_time) VALUES (?1, ?2, ?3)",
        params![user_id, reason, datetime_to_sql(at)],
    )
    .map_err(|e| match constraint_error(e, "pause record", "", "User") {
        OfficeError::Duplicate { .. } => OfficeError::ActivePauseExists,
        other => other,
    })?;

    let id = conn.last_insert_rowid();
    conn.query_row(
        "SELECT * FROM pause_records WHERE id = ?1",
        params![id],
        map_pause,
    )
    .map_err(OfficeError::Database)
}

/// Fetches the user's unresolved pause, if any.
pub fn active_pause(conn: &Connection, user_id: i64) -> OfficeResult<Option<PauseRecord>> {
    let record = conn
        .query_row(
            "SELECT * FROM pause_records
             WHERE user_id = ?1 AND resume_time IS NULL
             ORDER BY pause_time DESC LIMIT 1",
            params![user_id],
            map_pause,
        )
        .optional()?;
    Ok(record)
}

/// Resolves a pause, stamping the resume time and duration.
pub fn resolve_pause(
    conn: &Connection,
    id: i64,
    resume_time: DateTime<Utc>,
    duration_seconds: i64,
) -> OfficeResult<PauseRecord> {
    let changed = conn.execute(
        "UPDATE pause_records SET resume_time = ?1, duration_seconds = ?2 WHERE id = ?3",
        params![datetime_to_sql(resume_time), duration_seconds, id],
    )?;
    if changed == 0 {
        return Err(OfficeError::NotFound {
            entity: "Pause record".to_string(),
        });
    }
    conn.query_row(
        "SELECT * FROM pause_records WHERE id = ?1",
        params![id],
        map_pause,
    )
    .map_err(OfficeError::Database)
}

/// Loads the user's resolved pauses that overlap a work window as spans
/// for the worked-hours computation.
pub fn pause_spans_overlapping(
    conn: &Connection,
    user_id: i64,
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
) -> OfficeResult<Vec<PauseSpan>> {
    // Stored timestamps are fixed-width UTC text, so string comparison is
    // chronological comparison.
    let mut stmt = conn.prepare(
        "SELECT * FROM pause_records
         WHERE user_id = ?1 AND resume_time IS NOT NULL
           AND resume_time > ?2 AND pause_time < ?3
         ORDER BY pause_time",
    )?;
    let rows = stmt.query_map(
        params![user_id, datetime_to_sql(check_in), datetime_to_sql(check_out)],
        map_pause,
    )?;

    let mut out = Vec::new();
    for r in rows {
        let pause = r?;
        out.push(PauseSpan {
            pause_time: pause.pause_time,
            resume_time: pause.resume_time,
        });
    }
    Ok(out)
}

// --- work profiles ---------------------------------------------------------

/// Fetches a user's payroll profile.
pub fn get_profile(conn: &Connection, user_id: i64) -> OfficeResult<WorkProfile> {
    let (rate, biweekly): (Option<String>, Option<String>) = conn
        .query_row(
            "SELECT rate_per_hour, biweekly_total_hours FROM work_profiles WHERE user_id = ?1",
            params![user_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => OfficeError::NotFound {
                entity: "Work profile".to_string(),
            },
            other => OfficeError::Database(other),
        })?;

    Ok(WorkProfile {
        user_id,
        rate_per_hour: rate.as_deref().map(|s| decimal_from_sql(0, s)).transpose()?,
        biweekly_total_hours: biweekly
            .as_deref()
            .map(|s| decimal_from_sql(1, s))
            .transpose()?,
    })
}

/// Updates a user's payroll profile.
pub fn update_profile(conn: &Connection, profile: &WorkProfile) -> OfficeResult<WorkProfile> {
    let changed = conn.execute(
        "UPDATE work_profiles SET rate_per_hour = ?1, biweekly_total_hours = ?2
         WHERE user_id = ?3",
        params![
            profile.rate_per_hour.map(decimal_to_sql),
            profile.biweekly_total_hours.map(decimal_to_sql),
            profile.user_id,
        ],
    )?;
    if changed == 0 {
        return Err(OfficeError::NotFound {
            entity: "Work profile".to_string(),
        });
    }
    get_profile(conn, profile.user_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{open_in_memory, users};
    use chrono::TimeZone;

    fn seed_user(conn: &Connection) -> i64 {
        users::insert(
            conn,
            "Dana",
            "dana@example.com",
            false,
            Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
        )
        .unwrap()
        .id
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, hour, min, 0).unwrap()
    }

    #[test]
    fn test_check_in_once_per_day() {
        let conn = open_in_memory().unwrap();
        let user_id = seed_user(&conn);

        let record = check_in(&conn, user_id, day(), at(16, 0)).unwrap();
        assert_eq!(record.date, day());
        assert!(record.check_out.is_none());
        assert!(!record.is_paused);

        let err = check_in(&conn, user_id, day(), at(17, 0)).unwrap_err();
        assert!(matches!(err, OfficeError::Duplicate { .. }));
    }

    #[test]
    fn test_check_in_unknown_user_is_not_found() {
        let conn = open_in_memory().unwrap();

        let err = check_in(&conn, 42, day(), at(16, 0)).unwrap_err();
        assert!(matches!(err, OfficeError::NotFound { entity } if entity == "User"));
    }

    #[test]
    fn test_open_pause_unknown_user_is_not_found() {
        let conn = open_in_memory().unwrap();

        let err = open_pause(&conn, 42, "lunch", at(19, 0)).unwrap_err();
        assert!(matches!(err, OfficeError::NotFound { entity } if entity == "User"));
    }

    #[test]
    fn test_close_stores_derived_fields() {
        let conn = open_in_memory().unwrap();
        let user_id = seed_user(&conn);
        let record = check_in(&conn, user_id, day(), at(16, 0)).unwrap();

        let closed = close(
            &conn,
            record.id,
            at(23, 30),
            Decimal::new(700, 2),
            Decimal::new(50, 2),
            Some(Decimal::new(1850, 2)),
            Some(Decimal::new(8000, 2)),
        )
        .unwrap();

        assert_eq!(closed.hours_worked, Some(Decimal::new(700, 2)));
        assert_eq!(closed.total_paused_time, Decimal::new(50, 2));
        assert_eq!(closed.rate_per_hour, Some(Decimal::new(1850, 2)));
        assert_eq!(closed.status(), "Completed");
    }

    #[test]
    fn test_second_active_pause_rejected_at_schema() {
        let conn = open_in_memory().unwrap();
        let user_id = seed_user(&conn);

        open_pause(&conn, user_id, "lunch", at(19, 0)).unwrap();
        let err = open_pause(&conn, user_id, "errand", at(19, 5)).unwrap_err();
        assert!(matches!(err, OfficeError::ActivePauseExists));
    }

    #[test]
    fn test_resolve_pause_then_pause_again() {
        let conn = open_in_memory().unwrap();
        let user_id = seed_user(&conn);

        let pause = open_pause(&conn, user_id, "lunch", at(19, 0)).unwrap();
        let resolved = resolve_pause(&conn, pause.id, at(19, 30), 1800).unwrap();
        assert_eq!(resolved.duration_seconds, Some(1800));
        assert!(!resolved.is_active());

        assert!(active_pause(&conn, user_id).unwrap().is_none());
        open_pause(&conn, user_id, "errand", at(20, 0)).unwrap();
    }

    #[test]
    fn test_pause_spans_overlapping_window() {
        let conn = open_in_memory().unwrap();
        let user_id = seed_user(&conn);

        // Inside the window.
        let p1 = open_pause(&conn, user_id, "lunch", at(19, 0)).unwrap();
        resolve_pause(&conn, p1.id, at(19, 30), 1800).unwrap();
        // Entirely outside (after checkout).
        let p2 = open_pause(&conn, user_id, "late", at(23, 45)).unwrap();
        resolve_pause(&conn, p2.id, at(23, 55), 600).unwrap();

        let spans = pause_spans_overlapping(&conn, user_id, at(16, 0), at(23, 30)).unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].pause_time, at(19, 0));
    }

    #[test]
    fn test_history_is_newest_first() {
        let conn = open_in_memory().unwrap();
        let user_id = seed_user(&conn);
        check_in(&conn, user_id, day(), at(16, 0)).unwrap();
        check_in(
            &conn,
            user_id,
            NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 16, 16, 0, 0).unwrap(),
        )
        .unwrap();

        let records = history(&conn, user_id).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].date > records[1].date);
    }

    #[test]
    fn test_summary_totals() {
        let conn = open_in_memory().unwrap();
        let user_id = seed_user(&conn);
        let r1 = check_in(&conn, user_id, day(), at(16, 0)).unwrap();
        close(
            &conn,
            r1.id,
            at(23, 0),
            Decimal::new(700, 2),
            Decimal::ZERO,
            None,
            None,
        )
        .unwrap();
        let r2 = check_in(
            &conn,
            user_id,
            NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 16, 16, 0, 0).unwrap(),
        )
        .unwrap();
        close(
            &conn,
            r2.id,
            Utc.with_ymd_and_hms(2026, 1, 17, 0, 0, 0).unwrap(),
            Decimal::new(800, 2),
            Decimal::ZERO,
            None,
            None,
        )
        .unwrap();

        let summary = summary(&conn, user_id).unwrap();
        assert_eq!(summary.total_hours, Decimal::new(1500, 2));
        assert_eq!(summary.days_worked, 2);
        assert_eq!(summary.average_hours_per_day, Decimal::new(750, 2));
    }

    #[test]
    fn test_profile_update_and_propagation() {
        let conn = open_in_memory().unwrap();
        let user_id = seed_user(&conn);
        let r1 = check_in(&conn, user_id, day(), at(16, 0)).unwrap();
        close(
            &conn,
            r1.id,
            at(23, 0),
            Decimal::new(700, 2),
            Decimal::ZERO,
            None,
            None,
        )
        .unwrap();

        let profile = get_profile(&conn, user_id).unwrap();
        assert_eq!(profile.rate_per_hour, None);

        update_profile(
            &conn,
            &WorkProfile {
                user_id,
                rate_per_hour: Some(Decimal::new(1850, 2)),
                biweekly_total_hours: Some(Decimal::new(8000, 2)),
            },
        )
        .unwrap();

        let touched = propagate_profile(
            &conn,
            user_id,
            Some(Decimal::new(1850, 2)),
            Some(Decimal::new(8000, 2)),
        )
        .unwrap();
        assert_eq!(touched, 1);

        let record = get(&conn, r1.id).unwrap();
        assert_eq!(record.rate_per_hour, Some(Decimal::new(1850, 2)));
    }
}
