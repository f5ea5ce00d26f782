//! User store.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row, params};

use crate::db::{constraint_error, datetime_from_sql, datetime_to_sql};
use crate::error::{OfficeError, OfficeResult};
use crate::models::User;

fn map_row(row: &Row) -> rusqlite::Result<User> {
    let created_at: String = row.get("created_at")?;
    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        is_staff: row.get("is_staff")?,
        is_active: row.get("is_active")?,
        created_at: datetime_from_sql(5, &created_at)?,
    })
}

/// Inserts a user and their empty work profile, returning the stored row.
pub fn insert(
    conn: &Connection,
    name: &str,
    email: &str,
    is_staff: bool,
    now: DateTime<Utc>,
) -> OfficeResult<User> {
    conn.execute(
        "INSERT INTO users (name, email, is_staff, is_active, created_at)
         VALUES (?1, ?2, ?3, 1, ?4)",
        params![name, email, is_staff, datetime_to_sql(now)],
    )
    .map_err(|e| constraint_error(e, "user", "A user with this email already exists", "User"))?;

    let id = conn.last_insert_rowid();

    // Every user gets a payroll profile row, filled in later by an admin.
    conn.execute(
        "INSERT INTO work_profiles (user_id) VALUES (?1)",
        params![id],
    )?;

    get(conn, id)
}

/// Fetches a user by id.
pub fn get(conn: &Connection, id: i64) -> OfficeResult<User> {
    conn.query_row("SELECT * FROM users WHERE id = ?1", params![id], map_row)
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => OfficeError::NotFound {
                entity: "User".to_string(),
            },
            other => OfficeError::Database(other),
        })
}

/// Lists all users, newest first.
pub fn list(conn: &Connection) -> OfficeResult<Vec<User>> {
    let mut stmt = conn.prepare("SELECT * FROM users ORDER BY id DESC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Updates a user's mutable fields.
pub fn update(
    conn: &Connection,
    id: i64,
    name: &str,
    email: &str,
    is_staff: bool,
    is_active: bool,
) -> OfficeResult<User> {
    let changed = conn
        .execute(
            "UPDATE users SET name = ?1, email = ?2, is_staff = ?3, is_active = ?4
             WHERE id = ?5",
            params![name, email, is_staff, is_active, id],
        )
        .map_err(|e| constraint_error(e, "user", "A user with this email already exists", "User"))?;

    if changed == 0 {
        return Err(OfficeError::NotFound {
            entity: "User".to_string(),
        });
    }
    get(conn, id)
}

/// Deletes a user; dependent rows cascade.
pub fn delete(conn: &Connection, id: i64) -> OfficeResult<()> {
    let changed = conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(OfficeError::NotFound {
            entity: "User".to_string(),
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

    #[test]
    fn test_insert_and_get() {
        let conn = open_in_memory().unwrap();
        let user = insert(&conn, "Dana Reyes", "dana@example.com", true, now()).unwrap();
        assert_eq!(user.name, "Dana Reyes");
        assert!(user.is_active);

        let fetched = get(&conn, user.id).unwrap();
        assert_eq!(fetched, user);
    }

    #[test]
    fn test_insert_creates_work_profile() {
        let conn = open_in_memory().unwrap();
        let user = insert(&conn, "Dana", "dana@example.com", false, now()).unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM work_profiles WHERE user_id = ?1",
                params![user.id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let conn = open_in_memory().unwrap();
        insert(&conn, "Dana", "dana@example.com", false, now()).unwrap();
        let err = insert(&conn, "Other", "dana@example.com", false, now()).unwrap_err();
        assert!(matches!(err, OfficeError::Duplicate { .. }));
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let conn = open_in_memory().unwrap();
        assert!(matches!(
            get(&conn, 42),
            Err(OfficeError::NotFound { .. })
        ));
    }

    #[test]
    fn test_update_and_delete() {
        let conn = open_in_memory().unwrap();
        let user = insert(&conn, "Dana", "dana@example.com", false, now()).unwrap();

        let updated = update(&conn, user.id, "Dana R", "dana@example.com", true, false).unwrap();
        assert_eq!(updated.name, "Dana R");
        assert!(updated.is_staff);
        assert!(!updated.is_active);

        delete(&conn, user.id).unwrap();
        assert!(matches!(
            delete(&conn, user.id),
            Err(OfficeError::NotFound { .. })
        ));
    }
}
