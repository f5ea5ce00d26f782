//! Client registry store.

use rusqlite::{Connection, Row, params};

use crate::db::{constraint_error, date_from_sql, date_to_sql};
use crate::error::{OfficeError, OfficeResult};
use crate::models::{BillType, Client, ClientStatus};

/// Field set for creating or updating a client row.
#[derive(Debug, Clone)]
pub struct ClientInput {
    /// Owning staff user.
    pub user_id: i64,
    /// External client identifier.
    pub client_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth.
    pub dob: chrono::NaiveDate,
    /// Service location description.
    pub location: String,
    /// Billing arrangement.
    pub bill_type: BillType,
    /// Contact phone number.
    pub phone: String,
    /// Guardian name.
    pub guardian: String,
    /// Active/inactive status.
    pub status: ClientStatus,
}

fn map_row(row: &Row) -> rusqlite::Result<Client> {
    let dob: String = row.get("dob")?;
    let bill_type: String = row.get("bill_type")?;
    let status: String = row.get("status")?;

    Ok(Client {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        client_id: row.get("client_id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        dob: date_from_sql(5, &dob)?,
        location: row.get("location")?,
        bill_type: BillType::parse(&bill_type).unwrap_or(BillType::DddOnly),
        phone: row.get("phone")?,
        guardian: row.get("guardian")?,
        status: ClientStatus::parse(&status).unwrap_or(ClientStatus::Active),
    })
}

/// Inserts a client, returning the stored row.
pub fn insert(conn: &Connection, input: &ClientInput) -> OfficeResult<Client> {
    conn.execute(
        "INSERT INTO clients
            (user_id, client_id, first_name, last_name, dob, location,
             bill_type, phone, guardian, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            input.user_id,
            input.client_id,
            input.first_name,
            input.last_name,
            date_to_sql(input.dob),
            input.location,
            input.bill_type.as_str(),
            input.phone,
            input.guardian,
            input.status.as_str(),
        ],
    )
    .map_err(|e| constraint_error(e, "client", "A client with this client_id already exists", "User"))?;

    get(conn, conn.last_insert_rowid())
}

/// Fetches a client by row id.
pub fn get(conn: &Connection, id: i64) -> OfficeResult<Client> {
    conn.query_row("SELECT * FROM clients WHERE id = ?1", params![id], map_row)
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => OfficeError::NotFound {
                entity: "Client".to_string(),
            },
            other => OfficeError::Database(other),
        })
}

/// Lists clients, optionally filtered by status.
pub fn list(conn: &Connection, status: Option<ClientStatus>) -> OfficeResult<Vec<Client>> {
    let mut out = Vec::new();
    match status {
        Some(status) => {
            let mut stmt = conn.prepare(
                "SELECT * FROM clients WHERE status = ?1 ORDER BY last_name, first_name",
            )?;
            let rows = stmt.query_map(params![status.as_str()], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        None => {
            let mut stmt =
                conn.prepare("SELECT * FROM clients ORDER BY last_name, first_name")?;
            let rows = stmt.query_map([], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }
    Ok(out)
}

/// Updates a client row in full.
pub fn update(conn: &Connection, id: i64, input: &ClientInput) -> OfficeResult<Client> {
    let changed = conn
        .execute(
            "UPDATE clients SET
                user_id = ?1, client_id = ?2, first_name = ?3, last_name = ?4,
                dob = ?5, location = ?6, bill_type = ?7, phone = ?8,
                guardian = ?9, status = ?10
             WHERE id = ?11",
            params![
                input.user_id,
                input.client_id,
                input.first_name,
                input.last_name,
                date_to_sql(input.dob),
                input.location,
                input.bill_type.as_str(),
                input.phone,
                input.guardian,
                input.status.as_str(),
                id,
            ],
        )
        .map_err(|e| {
            constraint_error(e, "client", "A client with this client_id already exists", "User")
        })?;

    if changed == 0 {
        return Err(OfficeError::NotFound {
            entity: "Client".to_string(),
        });
    }
    get(conn, id)
}

/// Deletes a client; goals and progress cascade.
pub fn delete(conn: &Connection, id: i64) -> OfficeResult<()> {
    let changed = conn.execute("DELETE FROM clients WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(OfficeError::NotFound {
            entity: "Client".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{open_in_memory, users};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn seed_user(conn: &Connection) -> i64 {
        users::insert(
            conn,
            "Dana",
            "dana@example.com",
            true,
            Utc.with_ymd_and_hms(2026, 1, 15, 16, 0, 0).unwrap(),
        )
        .unwrap()
        .id
    }

    fn sample(user_id: i64, client_id: &str) -> ClientInput {
        ClientInput {
            user_id,
            client_id: client_id.to_string(),
            first_name: "Ana".to_string(),
            last_name: "Lopez".to_string(),
            dob: NaiveDate::from_ymd_opt(2001, 4, 9).unwrap(),
            location: "Guadalupe".to_string(),
            bill_type: BillType::DddOnly,
            phone: "480-555-0100".to_string(),
            guardian: "Maria Lopez".to_string(),
            status: ClientStatus::Active,
        }
    }

    #[test]
    fn test_insert_get_round_trip() {
        let conn = open_in_memory().unwrap();
        let user_id = seed_user(&conn);
        let client = insert(&conn, &sample(user_id, "CL-1001")).unwrap();
        assert_eq!(get(&conn, client.id).unwrap(), client);
    }

    #[test]
    fn test_duplicate_client_id_rejected() {
        let conn = open_in_memory().unwrap();
        let user_id = seed_user(&conn);
        insert(&conn, &sample(user_id, "CL-1001")).unwrap();
        let err = insert(&conn, &sample(user_id, "CL-1001")).unwrap_err();
        assert!(matches!(err, OfficeError::Duplicate { .. }));
    }

    #[test]
    fn test_list_filters_by_status() {
        let conn = open_in_memory().unwrap();
        let user_id = seed_user(&conn);
        insert(&conn, &sample(user_id, "CL-1001")).unwrap();
        let mut inactive = sample(user_id, "CL-1002");
        inactive.status = ClientStatus::Inactive;
        insert(&conn, &inactive).unwrap();

        assert_eq!(list(&conn, None).unwrap().len(), 2);
        assert_eq!(list(&conn, Some(ClientStatus::Active)).unwrap().len(), 1);
        assert_eq!(list(&conn, Some(ClientStatus::Inactive)).unwrap().len(), 1);
    }

    #[test]
    fn test_deleting_owner_cascades() {
        let conn = open_in_memory().unwrap();
        let user_id = seed_user(&conn);
        let client = insert(&conn, &sample(user_id, "CL-1001")).unwrap();

        users::delete(&conn, user_id).unwrap();
        assert!(matches!(
            get(&conn, client.id),
            Err(OfficeError::NotFound { .. })
        ));
    }
}
