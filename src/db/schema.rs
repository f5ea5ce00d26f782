//! Database schema.
//!
//! The uniqueness rules the original system checked in application code are
//! declared here instead: one attendance record per (client, date), one
//! time record per (user, date), one progress note per (client, date), one
//! trial number per session, and at most one unresolved pause per user via
//! a partial unique index. Two racing requests cannot both commit a
//! violating row.

use rusqlite::Connection;

/// Creates every table and index if it does not already exist.
pub fn create_all(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            email       TEXT NOT NULL UNIQUE,
            is_staff    INTEGER NOT NULL DEFAULT 0,
            is_active   INTEGER NOT NULL DEFAULT 1,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS clients (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            client_id   TEXT NOT NULL UNIQUE,
            first_name  TEXT NOT NULL,
            last_name   TEXT NOT NULL,
            dob         TEXT NOT NULL,
            location    TEXT NOT NULL,
            bill_type   TEXT NOT NULL CHECK(bill_type IN ('DDD only')),
            phone       TEXT NOT NULL,
            guardian    TEXT NOT NULL,
            status      TEXT NOT NULL DEFAULT 'active' CHECK(status IN ('active','inactive'))
        );

        CREATE TABLE IF NOT EXISTS attendance_records (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            client         TEXT NOT NULL,
            date           TEXT NOT NULL,
            time_in        TEXT NOT NULL,
            time_out       TEXT NOT NULL,
            service        TEXT NOT NULL CHECK(service IN ('DTA1','DTA2','DTT','SDTA')),
            location       TEXT NOT NULL
                CHECK(location IN ('GUADALUPE_DTA','GUADALUPE_DTT','GUADALUPE_SPECIAL')),
            one_on_one     INTEGER NOT NULL DEFAULT 0,
            documentation  INTEGER NOT NULL DEFAULT 0,
            created_at     TEXT NOT NULL,
            updated_at     TEXT NOT NULL,
            UNIQUE(client, date)
        );

        CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance_records(date);

        CREATE TABLE IF NOT EXISTS goals (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            client_id   INTEGER NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
            description TEXT NOT NULL,
            activities  TEXT NOT NULL,
            outcome     TEXT NOT NULL,
            is_active   INTEGER NOT NULL DEFAULT 1,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS daily_progress (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            client_id         INTEGER NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
            date              TEXT NOT NULL,
            location          TEXT NOT NULL,
            general_notes     TEXT NOT NULL DEFAULT '',
            provider_initials TEXT NOT NULL DEFAULT '',
            created_by        INTEGER REFERENCES users(id) ON DELETE SET NULL,
            created_at        TEXT NOT NULL,
            UNIQUE(client_id, date)
        );

        CREATE TABLE IF NOT EXISTS trials (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            daily_progress_id INTEGER NOT NULL REFERENCES daily_progress(id) ON DELETE CASCADE,
            trial_number      INTEGER NOT NULL DEFAULT 1,
            percentage        TEXT NOT NULL DEFAULT '0%'
                CHECK(percentage IN ('0%','25%','50%','75%','100%')),
            prompt            TEXT
                CHECK(prompt IN ('Barriers','HH','I','M','P','R','S','G','VP')),
            initials          TEXT NOT NULL DEFAULT '',
            created_at        TEXT NOT NULL,
            UNIQUE(daily_progress_id, trial_number)
        );

        CREATE TABLE IF NOT EXISTS time_records (
            id                   INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id              INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            date                 TEXT NOT NULL,
            check_in             TEXT NOT NULL,
            check_out            TEXT,
            hours_worked         TEXT,
            total_paused_time    TEXT NOT NULL DEFAULT '0',
            is_paused            INTEGER NOT NULL DEFAULT 0,
            rate_per_hour        TEXT,
            biweekly_total_hours TEXT,
            UNIQUE(user_id, date)
        );

        CREATE TABLE IF NOT EXISTS pause_records (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id          INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            reason           TEXT NOT NULL,
            pause_time       TEXT NOT NULL,
            resume_time      TEXT,
            duration_seconds INTEGER
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_pause_one_active
            ON pause_records(user_id) WHERE resume_time IS NULL;

        CREATE TABLE IF NOT EXISTS work_profiles (
            user_id              INTEGER PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
            rate_per_hour        TEXT,
            biweekly_total_hours TEXT
        );

        CREATE TABLE IF NOT EXISTS user_settings (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id           INTEGER NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
            street_address    TEXT NOT NULL DEFAULT 'N/A',
            address2          TEXT NOT NULL DEFAULT 'N/A',
            city              TEXT NOT NULL DEFAULT 'N/A',
            state             TEXT NOT NULL DEFAULT 'N/A',
            zip_code          TEXT NOT NULL DEFAULT 'N/A',
            manager_name      TEXT NOT NULL DEFAULT 'N/A',
            provider_id       TEXT NOT NULL DEFAULT 'N/A',
            payroll_id        TEXT NOT NULL DEFAULT 'N/A',
            location          TEXT NOT NULL DEFAULT 'guadalupe_dta'
                CHECK(location IN ('guadalupe_dta','guadalupe_dtt','guadalupe_special_dta','hcbs')),
            gender            TEXT NOT NULL DEFAULT 'other'
                CHECK(gender IN ('male','female','other')),
            race              TEXT NOT NULL DEFAULT 'not_disclosed'
                CHECK(race IN ('american_indian','asian','african_american','hispanic',
                               'native_hawaiian','white','two_or_more','not_disclosed')),
            marital_status    TEXT NOT NULL DEFAULT 'single'
                CHECK(marital_status IN ('single','married','divorced','widowed')),
            services_provided TEXT NOT NULL DEFAULT 'None',
            additional_info   TEXT
        );

        CREATE TABLE IF NOT EXISTS documents (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            settings_id     INTEGER NOT NULL REFERENCES user_settings(id) ON DELETE CASCADE,
            name            TEXT NOT NULL,
            effective_start TEXT NOT NULL,
            effective_end   TEXT NOT NULL
        );
        "#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        create_all(&conn).unwrap();
        conn
    }

    #[test]
    fn test_create_all_is_idempotent() {
        let conn = test_conn();
        create_all(&conn).unwrap();
    }

    #[test]
    fn test_duplicate_attendance_per_client_day_rejected() {
        let conn = test_conn();
        let insert = "INSERT INTO attendance_records
            (client, date, time_in, time_out, service, location, created_at, updated_at)
            VALUES ('Ana Lopez', '2026-01-15', '09:00:00', '15:00:00', 'DTA1',
                    'GUADALUPE_DTA', '2026-01-15T16:00:00Z', '2026-01-15T16:00:00Z')";
        conn.execute(insert, []).unwrap();
        assert!(conn.execute(insert, []).is_err());
    }

    #[test]
    fn test_second_unresolved_pause_rejected() {
        let conn = test_conn();
        conn.execute(
            "INSERT INTO users (name, email, created_at)
             VALUES ('Dana', 'dana@example.com', '2026-01-15T16:00:00Z')",
            [],
        )
        .unwrap();
        let insert = "INSERT INTO pause_records (user_id, reason, pause_time)
                      VALUES (1, 'break', '2026-01-15T19:00:00Z')";
        conn.execute(insert, []).unwrap();
        assert!(conn.execute(insert, []).is_err());

        // Resolving the first pause frees the slot.
        conn.execute(
            "UPDATE pause_records SET resume_time = '2026-01-15T19:30:00Z'",
            [],
        )
        .unwrap();
        conn.execute(insert, []).unwrap();
    }

    #[test]
    fn test_deleting_user_cascades_to_time_records() {
        let conn = test_conn();
        conn.execute(
            "INSERT INTO users (name, email, created_at)
             VALUES ('Dana', 'dana@example.com', '2026-01-15T16:00:00Z')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO time_records (user_id, date, check_in)
             VALUES (1, '2026-01-15', '2026-01-15T16:00:00Z')",
            [],
        )
        .unwrap();
        conn.execute("DELETE FROM users WHERE id = 1", []).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM time_records", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
