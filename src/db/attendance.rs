//! Attendance record store.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rusqlite::{Connection, Row, params};

use crate::db::{
    constraint_error, date_from_sql, date_to_sql, datetime_from_sql, datetime_to_sql,
    time_from_sql, time_to_sql,
};
use crate::error::{OfficeError, OfficeResult};
use crate::models::{AttendanceRecord, ServiceCode, ServiceLocation};

/// Field set for creating or updating an attendance row.
#[derive(Debug, Clone)]
pub struct AttendanceInput {
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
    pub one_on_one: bool,
    /// Documentation-complete flag.
    pub documentation: bool,
}

/// Optional list filters, all ANDed together.
#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    /// Exact service date.
    pub date: Option<NaiveDate>,
    /// Exact client name.
    pub client: Option<String>,
    /// Service code.
    pub service: Option<ServiceCode>,
    /// Site.
    pub location: Option<ServiceLocation>,
}

fn map_row(row: &Row) -> rusqlite::Result<AttendanceRecord> {
    let date: String = row.get("date")?;
    let time_in: String = row.get("time_in")?;
    let time_out: String = row.get("time_out")?;
    let service: String = row.get("service")?;
    let location: String = row.get("location")?;
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(AttendanceRecord {
        id: row.get("id")?,
        client: row.get("client")?,
        date: date_from_sql(2, &date)?,
        time_in: time_from_sql(3, &time_in)?,
        time_out: time_from_sql(4, &time_out)?,
        service: ServiceCode::parse(&service).unwrap_or(ServiceCode::Dta1),
        location: ServiceLocation::parse(&location).unwrap_or(ServiceLocation::GuadalupeDta),
        one_on_one: row.get("one_on_one")?,
        documentation: row.get("documentation")?,
        created_at: datetime_from_sql(9, &created_at)?,
        updated_at: datetime_from_sql(10, &updated_at)?,
    })
}

/// Inserts an attendance record, returning the stored row.
///
/// The (client, date) pair is unique; a second record for the same client
/// on the same day surfaces as a duplicate error.
pub fn insert(
    conn: &Connection,
    input: &AttendanceInput,
    now: DateTime<Utc>,
) -> OfficeResult<AttendanceRecord> {
    conn.execute(
        "INSERT INTO attendance_records
            (client, date, time_in, time_out, service, location,
             one_on_one, documentation, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
        params![
            input.client,
            date_to_sql(input.date),
            time_to_sql(input.time_in),
            time_to_sql(input.time_out),
            input.service.as_str(),
            input.location.as_str(),
            input.one_on_one,
            input.documentation,
            datetime_to_sql(now),
        ],
    )
    .map_err(|e| {
        constraint_error(
            e,
            "attendance record",
            "An attendance record already exists for this client on this date",
            "Client",
        )
    })?;

    get(conn, conn.last_insert_rowid())
}

/// Fetches an attendance record by id.
pub fn get(conn: &Connection, id: i64) -> OfficeResult<AttendanceRecord> {
    conn.query_row(
        "SELECT * FROM attendance_records WHERE id = ?1",
        params![id],
        map_row,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => OfficeError::NotFound {
            entity: "Attendance record".to_string(),
        },
        other => OfficeError::Database(other),
    })
}

/// Lists attendance records matching the filter, newest date first.
pub fn list(conn: &Connection, filter: &AttendanceFilter) -> OfficeResult<Vec<AttendanceRecord>> {
    let mut sql = String::from("SELECT * FROM attendance_records WHERE 1=1");
    let mut args: Vec<String> = Vec::new();

    if let Some(date) = filter.date {
        args.push(date_to_sql(date));
        sql.push_str(&format!(" AND date = ?{}", args.len()));
    }
    if let Some(client) = &filter.client {
        args.push(client.clone());
        sql.push_str(&format!(" AND client = ?{}", args.len()));
    }
    if let Some(service) = filter.service {
        args.push(service.as_str().to_string());
        sql.push_str(&format!(" AND service = ?{}", args.len()));
    }
    if let Some(location) = filter.location {
        args.push(location.as_str().to_string());
        sql.push_str(&format!(" AND location = ?{}", args.len()));
    }
    sql.push_str(" ORDER BY date DESC, client ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(args.iter()), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Lists every record for one date, ordered by client name.
pub fn list_by_date(conn: &Connection, date: NaiveDate) -> OfficeResult<Vec<AttendanceRecord>> {
    list(
        conn,
        &AttendanceFilter {
            date: Some(date),
            ..AttendanceFilter::default()
        },
    )
}

/// Updates an attendance record in full, refreshing `updated_at`.
pub fn update(
    conn: &Connection,
    id: i64,
    input: &AttendanceInput,
    now: DateTime<Utc>,
) -> OfficeResult<AttendanceRecord> {
    let changed = conn
        .execute(
            "UPDATE attendance_records SET
                client = ?1, date = ?2, time_in = ?3, time_out = ?4,
                service = ?5, location = ?6, one_on_one = ?7,
                documentation = ?8, updated_at = ?9
             WHERE id = ?10",
            params![
                input.client,
                date_to_sql(input.date),
                time_to_sql(input.time_in),
                time_to_sql(input.time_out),
                input.service.as_str(),
                input.location.as_str(),
                input.one_on_one,
                input.documentation,
                datetime_to_sql(now),
                id,
            ],
        )
        .map_err(|e| {
            constraint_error(
                e,
                "attendance record",
                "An attendance record already exists for this client on this date",
                "Client",
            )
        })?;

    if changed == 0 {
        return Err(OfficeError::NotFound {
            entity: "Attendance record".to_string(),
        });
    }
    get(conn, id)
}

/// Deletes an attendance record.
pub fn delete(conn: &Connection, id: i64) -> OfficeResult<()> {
    let changed = conn.execute(
        "DELETE FROM attendance_records WHERE id = ?1",
        params![id],
    )?;
    if changed == 0 {
        return Err(OfficeError::NotFound {
            entity: "Attendance record".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 16, 0, 0).unwrap()
    }

    fn sample(client: &str, day: u32) -> AttendanceInput {
        AttendanceInput {
            client: client.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
            time_in: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            time_out: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            service: ServiceCode::Dta1,
            location: ServiceLocation::GuadalupeDta,
            one_on_one: false,
            documentation: true,
        }
    }

    #[test]
    fn test_insert_get_round_trip() {
        let conn = open_in_memory().unwrap();
        let record = insert(&conn, &sample("Ana Lopez", 15), now()).unwrap();
        assert_eq!(get(&conn, record.id).unwrap(), record);
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_duplicate_client_date_rejected() {
        let conn = open_in_memory().unwrap();
        insert(&conn, &sample("Ana Lopez", 15), now()).unwrap();
        let err = insert(&conn, &sample("Ana Lopez", 15), now()).unwrap_err();
        assert!(matches!(err, OfficeError::Duplicate { .. }));

        // Same client on another day is fine.
        insert(&conn, &sample("Ana Lopez", 16), now()).unwrap();
    }

    #[test]
    fn test_list_filters_combine() {
        let conn = open_in_memory().unwrap();
        insert(&conn, &sample("Ana Lopez", 15), now()).unwrap();
        insert(&conn, &sample("Ben Cruz", 15), now()).unwrap();
        let mut other = sample("Ana Lopez", 16);
        other.service = ServiceCode::Dtt;
        insert(&conn, &other, now()).unwrap();

        let all = list(&conn, &AttendanceFilter::default()).unwrap();
        assert_eq!(all.len(), 3);

        let filter = AttendanceFilter {
            client: Some("Ana Lopez".to_string()),
            service: Some(ServiceCode::Dtt),
            ..AttendanceFilter::default()
        };
        let filtered = list(&conn, &filter).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].date, NaiveDate::from_ymd_opt(2026, 1, 16).unwrap());
    }

    #[test]
    fn test_list_by_date() {
        let conn = open_in_memory().unwrap();
        insert(&conn, &sample("Ben Cruz", 15), now()).unwrap();
        insert(&conn, &sample("Ana Lopez", 15), now()).unwrap();
        insert(&conn, &sample("Ana Lopez", 16), now()).unwrap();

        let day = list_by_date(&conn, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()).unwrap();
        assert_eq!(day.len(), 2);
        // Ordered by client name within the day.
        assert_eq!(day[0].client, "Ana Lopez");
        assert_eq!(day[1].client, "Ben Cruz");
    }

    #[test]
    fn test_update_refreshes_updated_at() {
        let conn = open_in_memory().unwrap();
        let record = insert(&conn, &sample("Ana Lopez", 15), now()).unwrap();

        let later = Utc.with_ymd_and_hms(2026, 1, 15, 18, 0, 0).unwrap();
        let mut input = sample("Ana Lopez", 15);
        input.documentation = false;
        let updated = update(&conn, record.id, &input, later).unwrap();

        assert!(!updated.documentation);
        assert_eq!(updated.created_at, record.created_at);
        assert_eq!(updated.updated_at, later);
    }
}
