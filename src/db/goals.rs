//! Goals, daily progress, and trial stores.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, Row, params};

use crate::db::{constraint_error, date_from_sql, date_to_sql, datetime_from_sql, datetime_to_sql};
use crate::error::{OfficeError, OfficeResult};
use crate::models::{DailyProgress, Goal, PercentageBucket, PromptType, Trial};

/// Field set for creating or updating a goal.
#[derive(Debug, Clone)]
pub struct GoalInput {
    /// The client the goal belongs to.
    pub client_id: i64,
    /// What the goal is.
    pub description: String,
    /// Activities used to work toward the goal.
    pub activities: String,
    /// Expected outcome.
    pub outcome: String,
    /// Whether the goal is being worked on.
    pub is_active: bool,
}

/// Field set for creating or updating a daily progress note.
#[derive(Debug, Clone)]
pub struct ProgressInput {
    /// The client the session belongs to.
    pub client_id: i64,
    /// Session date.
    pub date: NaiveDate,
    /// Where the session took place.
    pub location: String,
    /// Free-text session notes.
    pub general_notes: String,
    /// Initials of the provider who ran the session.
    pub provider_initials: String,
}

/// Field set for creating or updating a trial.
#[derive(Debug, Clone)]
pub struct TrialInput {
    /// The session the trial belongs to.
    pub daily_progress_id: i64,
    /// Ordinal within the session.
    pub trial_number: u32,
    /// Scored percentage bucket.
    pub percentage: PercentageBucket,
    /// Prompt type observed, if any.
    pub prompt: Option<PromptType>,
    /// Recording provider's initials.
    pub initials: String,
}

fn map_goal(row: &Row) -> rusqlite::Result<Goal> {
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;
    Ok(Goal {
        id: row.get("id")?,
        client_id: row.get("client_id")?,
        description: row.get("description")?,
        activities: row.get("activities")?,
        outcome: row.get("outcome")?,
        is_active: row.get("is_active")?,
        created_at: datetime_from_sql(6, &created_at)?,
        updated_at: datetime_from_sql(7, &updated_at)?,
    })
}

fn map_trial(row: &Row) -> rusqlite::Result<Trial> {
    let percentage: String = row.get("percentage")?;
    let prompt: Option<String> = row.get("prompt")?;
    let created_at: String = row.get("created_at")?;
    Ok(Trial {
        id: row.get("id")?,
        daily_progress_id: row.get("daily_progress_id")?,
        trial_number: row.get("trial_number")?,
        percentage: PercentageBucket::parse(&percentage).unwrap_or(PercentageBucket::Zero),
        prompt: prompt.as_deref().and_then(PromptType::parse),
        initials: row.get("initials")?,
        created_at: datetime_from_sql(6, &created_at)?,
    })
}

fn map_progress(row: &Row) -> rusqlite::Result<DailyProgress> {
    let date: String = row.get("date")?;
    let created_at: String = row.get("created_at")?;
    Ok(DailyProgress {
        id: row.get("id")?,
        client_id: row.get("client_id")?,
        date: date_from_sql(2, &date)?,
        location: row.get("location")?,
        general_notes: row.get("general_notes")?,
        provider_initials: row.get("provider_initials")?,
        created_by: row.get("created_by")?,
        created_at: datetime_from_sql(7, &created_at)?,
        trials: Vec::new(),
    })
}

// --- goals -----------------------------------------------------------------

/// Inserts a goal, returning the stored row.
pub fn insert_goal(conn: &Connection, input: &GoalInput, now: DateTime<Utc>) -> OfficeResult<Goal> {
    conn.execute(
        "INSERT INTO goals (client_id, description, activities, outcome, is_active,
                            created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        params![
            input.client_id,
            input.description,
            input.activities,
            input.outcome,
            input.is_active,
            datetime_to_sql(now),
        ],
    )?;
    get_goal(conn, conn.last_insert_rowid())
}

/// Fetches a goal by id.
pub fn get_goal(conn: &Connection, id: i64) -> OfficeResult<Goal> {
    conn.query_row("SELECT * FROM goals WHERE id = ?1", params![id], map_goal)
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => OfficeError::NotFound {
                entity: "Goal".to_string(),
            },
            other => OfficeError::Database(other),
        })
}

/// Lists goals, optionally for one client.
pub fn list_goals(conn: &Connection, client_id: Option<i64>) -> OfficeResult<Vec<Goal>> {
    let mut out = Vec::new();
    match client_id {
        Some(client_id) => {
            let mut stmt =
                conn.prepare("SELECT * FROM goals WHERE client_id = ?1 ORDER BY id")?;
            let rows = stmt.query_map(params![client_id], map_goal)?;
            for r in rows {
                out.push(r?);
            }
        }
        None => {
            let mut stmt = conn.prepare("SELECT * FROM goals ORDER BY id")?;
            let rows = stmt.query_map([], map_goal)?;
            for r in rows {
                out.push(r?);
            }
        }
    }
    Ok(out)
}

/// Updates a goal in full, refreshing `updated_at`.
pub fn update_goal(
    conn: &Connection,
    id: i64,
    input: &GoalInput,
    now: DateTime<Utc>,
) -> OfficeResult<Goal> {
    let changed = conn.execute(
        "UPDATE goals SET client_id = ?1, description = ?2, activities = ?3,
                          outcome = ?4, is_active = ?5, updated_at = ?6
         WHERE id = ?7",
        params![
            input.client_id,
            input.description,
            input.activities,
            input.outcome,
            input.is_active,
            datetime_to_sql(now),
            id,
        ],
    )?;
    if changed == 0 {
        return Err(OfficeError::NotFound {
            entity: "Goal".to_string(),
        });
    }
    get_goal(conn, id)
}

/// Deletes a goal.
pub fn delete_goal(conn: &Connection, id: i64) -> OfficeResult<()> {
    let changed = conn.execute("DELETE FROM goals WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(OfficeError::NotFound {
            entity: "Goal".to_string(),
        });
    }
    Ok(())
}

// --- daily progress --------------------------------------------------------

/// Inserts a daily progress note, returning the stored row.
///
/// Each client gets at most one note per date.
pub fn insert_progress(
    conn: &Connection,
    input: &ProgressInput,
    created_by: i64,
    now: DateTime<Utc>,
) -> OfficeResult<DailyProgress> {
    conn.execute(
        "INSERT INTO daily_progress
            (client_id, date, location, general_notes, provider_initials,
             created_by, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            input.client_id,
            date_to_sql(input.date),
            input.location,
            input.general_notes,
            input.provider_initials,
            created_by,
            datetime_to_sql(now),
        ],
    )
    .map_err(|e| {
        constraint_error(
            e,
            "daily progress",
            "A progress note already exists for this client on this date",
            "Client",
        )
    })?;
    get_progress(conn, conn.last_insert_rowid())
}

/// Fetches a progress note with its trials.
pub fn get_progress(conn: &Connection, id: i64) -> OfficeResult<DailyProgress> {
    let mut progress = conn
        .query_row(
            "SELECT * FROM daily_progress WHERE id = ?1",
            params![id],
            map_progress,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => OfficeError::NotFound {
                entity: "Daily progress".to_string(),
            },
            other => OfficeError::Database(other),
        })?;
    progress.trials = list_trials(conn, Some(progress.id))?;
    Ok(progress)
}

/// Lists progress notes, optionally filtered by client and/or date, with
/// trials attached.
pub fn list_progress(
    conn: &Connection,
    client_id: Option<i64>,
    date: Option<NaiveDate>,
) -> OfficeResult<Vec<DailyProgress>> {
    let mut sql = String::from("SELECT * FROM daily_progress WHERE 1=1");
    let mut args: Vec<String> = Vec::new();

    if let Some(client_id) = client_id {
        args.push(client_id.to_string());
        sql.push_str(&format!(" AND client_id = ?{}", args.len()));
    }
    if let Some(date) = date {
        args.push(date_to_sql(date));
        sql.push_str(&format!(" AND date = ?{}", args.len()));
    }
    sql.push_str(" ORDER BY date DESC, id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(args.iter()), map_progress)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    for progress in &mut out {
        progress.trials = list_trials(conn, Some(progress.id))?;
    }
    Ok(out)
}

/// Updates a progress note's mutable fields.
pub fn update_progress(
    conn: &Connection,
    id: i64,
    input: &ProgressInput,
) -> OfficeResult<DailyProgress> {
    let changed = conn
        .execute(
            "UPDATE daily_progress SET client_id = ?1, date = ?2, location = ?3,
                                       general_notes = ?4, provider_initials = ?5
             WHERE id = ?6",
            params![
                input.client_id,
                date_to_sql(input.date),
                input.location,
                input.general_notes,
                input.provider_initials,
                id,
            ],
        )
        .map_err(|e| {
            constraint_error(
                e,
                "daily progress",
                "A progress note already exists for this client on this date",
                "Client",
            )
        })?;
    if changed == 0 {
        return Err(OfficeError::NotFound {
            entity: "Daily progress".to_string(),
        });
    }
    get_progress(conn, id)
}

/// Deletes a progress note; its trials cascade.
pub fn delete_progress(conn: &Connection, id: i64) -> OfficeResult<()> {
    let changed = conn.execute("DELETE FROM daily_progress WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(OfficeError::NotFound {
            entity: "Daily progress".to_string(),
        });
    }
    Ok(())
}

// --- trials ----------------------------------------------------------------

/// Inserts a trial, returning the stored row.
///
/// Trial numbers are unique within a session.
pub fn insert_trial(
    conn: &Connection,
    input: &TrialInput,
    now: DateTime<Utc>,
) -> OfficeResult<Trial> {
    conn.execute(
        "INSERT INTO trials
            (daily_progress_id, trial_number, percentage, prompt, initials, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            input.daily_progress_id,
            input.trial_number,
            input.percentage.as_str(),
            input.prompt.map(|p| p.as_str()),
            input.initials,
            datetime_to_sql(now),
        ],
    )
    .map_err(|e| {
        constraint_error(
            e,
            "trial",
            "A trial with this number already exists for this session",
            "Daily progress",
        )
    })?;
    get_trial(conn, conn.last_insert_rowid())
}

/// Fetches a trial by id.
pub fn get_trial(conn: &Connection, id: i64) -> OfficeResult<Trial> {
    conn.query_row("SELECT * FROM trials WHERE id = ?1", params![id], map_trial)
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => OfficeError::NotFound {
                entity: "Trial".to_string(),
            },
            other => OfficeError::Database(other),
        })
}

/// Lists trials, optionally for one session, ordered by trial number.
pub fn list_trials(conn: &Connection, daily_progress_id: Option<i64>) -> OfficeResult<Vec<Trial>> {
    let mut out = Vec::new();
    match daily_progress_id {
        Some(progress_id) => {
            let mut stmt = conn.prepare(
                "SELECT * FROM trials WHERE daily_progress_id = ?1 ORDER BY trial_number",
            )?;
            let rows = stmt.query_map(params![progress_id], map_trial)?;
            for r in rows {
                out.push(r?);
            }
        }
        None => {
            let mut stmt =
                conn.prepare("SELECT * FROM trials ORDER BY daily_progress_id, trial_number")?;
            let rows = stmt.query_map([], map_trial)?;
            for r in rows {
                out.push(r?);
            }
        }
    }
    Ok(out)
}

/// Updates a trial in full.
pub fn update_trial(conn: &Connection, id: i64, input: &TrialInput) -> OfficeResult<Trial> {
    let changed = conn
        .execute(
            "UPDATE trials SET daily_progress_id = ?1, trial_number = ?2,
                               percentage = ?3, prompt = ?4, initials = ?5
             WHERE id = ?6",
            params![
                input.daily_progress_id,
                input.trial_number,
                input.percentage.as_str(),
                input.prompt.map(|p| p.as_str()),
                input.initials,
                id,
            ],
        )
        .map_err(|e| {
            constraint_error(
                e,
                "trial",
                "A trial with this number already exists for this session",
                "Daily progress",
            )
        })?;
    if changed == 0 {
        return Err(OfficeError::NotFound {
            entity: "Trial".to_string(),
        });
    }
    get_trial(conn, id)
}

/// Deletes a trial.
pub fn delete_trial(conn: &Connection, id: i64) -> OfficeResult<()> {
    let changed = conn.execute("DELETE FROM trials WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(OfficeError::NotFound {
            entity: "Trial".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{clients, clients::ClientInput, open_in_memory, users};
    use crate::models::{BillType, ClientStatus};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 16, 0, 0).unwrap()
    }

    fn seed(conn: &Connection) -> (i64, i64) {
        let user = users::insert(conn, "Dana", "dana@example.com", true, now()).unwrap();
        let client = clients::insert(
            conn,
            &ClientInput {
                user_id: user.id,
                client_id: "CL-1001".to_string(),
                first_name: "Ana".to_string(),
                last_name: "Lopez".to_string(),
                dob: NaiveDate::from_ymd_opt(2001, 4, 9).unwrap(),
                location: "Guadalupe".to_string(),
                bill_type: BillType::DddOnly,
                phone: "480-555-0100".to_string(),
                guardian: "Maria Lopez".to_string(),
                status: ClientStatus::Active,
            },
        )
        .unwrap();
        (user.id, client.id)
    }

    fn progress_input(client_id: i64, day: u32) -> ProgressInput {
        ProgressInput {
            client_id,
            date: NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
            location: "Guadalupe DTA".to_string(),
            general_notes: "Good session".to_string(),
            provider_initials: "DR".to_string(),
        }
    }

    fn trial_input(progress_id: i64, number: u32) -> TrialInput {
        TrialInput {
            daily_progress_id: progress_id,
            trial_number: number,
            percentage: PercentageBucket::SeventyFive,
            prompt: Some(PromptType::VerbalPrompt),
            initials: "DR".to_string(),
        }
    }

    #[test]
    fn test_goal_crud() {
        let conn = open_in_memory().unwrap();
        let (_, client_id) = seed(&conn);

        let goal = insert_goal(
            &conn,
            &GoalInput {
                client_id,
                description: "Increase independent task completion".to_string(),
                activities: "Sorting, matching".to_string(),
                outcome: "80% independent".to_string(),
                is_active: true,
            },
            now(),
        )
        .unwrap();

        assert_eq!(list_goals(&conn, Some(client_id)).unwrap().len(), 1);
        assert_eq!(list_goals(&conn, Some(client_id + 1)).unwrap().len(), 0);

        let mut input = GoalInput {
            client_id,
            description: goal.description.clone(),
            activities: goal.activities.clone(),
            outcome: goal.outcome.clone(),
            is_active: false,
        };
        input.is_active = false;
        let updated = update_goal(&conn, goal.id, &input, now()).unwrap();
        assert!(!updated.is_active);

        delete_goal(&conn, goal.id).unwrap();
        assert!(matches!(
            get_goal(&conn, goal.id),
            Err(OfficeError::NotFound { .. })
        ));
    }

    #[test]
    fn test_duplicate_progress_per_client_day_rejected() {
        let conn = open_in_memory().unwrap();
        let (user_id, client_id) = seed(&conn);

        insert_progress(&conn, &progress_input(client_id, 15), user_id, now()).unwrap();
        let err =
            insert_progress(&conn, &progress_input(client_id, 15), user_id, now()).unwrap_err();
        assert!(matches!(err, OfficeError::Duplicate { .. }));

        insert_progress(&conn, &progress_input(client_id, 16), user_id, now()).unwrap();
    }

    #[test]
    fn test_trials_unique_per_session_and_ordered() {
        let conn = open_in_memory().unwrap();
        let (user_id, client_id) = seed(&conn);
        let progress =
            insert_progress(&conn, &progress_input(client_id, 15), user_id, now()).unwrap();

        insert_trial(&conn, &trial_input(progress.id, 2), now()).unwrap();
        insert_trial(&conn, &trial_input(progress.id, 1), now()).unwrap();
        let err = insert_trial(&conn, &trial_input(progress.id, 1), now()).unwrap_err();
        assert!(matches!(err, OfficeError::Duplicate { .. }));

        let fetched = get_progress(&conn, progress.id).unwrap();
        assert_eq!(fetched.trials.len(), 2);
        assert_eq!(fetched.trials[0].trial_number, 1);
        assert_eq!(fetched.trials[1].trial_number, 2);
    }

    #[test]
    fn test_progress_list_filters() {
        let conn = open_in_memory().unwrap();
        let (user_id, client_id) = seed(&conn);
        insert_progress(&conn, &progress_input(client_id, 15), user_id, now()).unwrap();
        insert_progress(&conn, &progress_input(client_id, 16), user_id, now()).unwrap();

        let all = list_progress(&conn, Some(client_id), None).unwrap();
        assert_eq!(all.len(), 2);

        let one = list_progress(
            &conn,
            Some(client_id),
            Some(NaiveDate::from_ymd_opt(2026, 1, 16).unwrap()),
        )
        .unwrap();
        assert_eq!(one.len(), 1);
    }

    #[test]
    fn test_deleting_user_nulls_progress_created_by() {
        let conn = open_in_memory().unwrap();
        let (user_id, client_id) = seed(&conn);
        // Re-own the client so it survives the user delete.
        let keeper = users::insert(&conn, "Keeper", "keeper@example.com", true, now()).unwrap();
        conn.execute(
            "UPDATE clients SET user_id = ?1 WHERE id = ?2",
            params![keeper.id, client_id],
        )
        .unwrap();

        let progress =
            insert_progress(&conn, &progress_input(client_id, 15), user_id, now()).unwrap();
        assert_eq!(progress.created_by, Some(user_id));

        users::delete(&conn, user_id).unwrap();
        let fetched = get_progress(&conn, progress.id).unwrap();
        assert_eq!(fetched.created_by, None);
    }
}
