//! Provider settings and document store.

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::db::{date_from_sql, date_to_sql};
use crate::error::{OfficeError, OfficeResult};
use crate::models::{
    Document, Gender, MaritalStatus, Race, SettingsLocation, UserSettings,
};

/// Field set for updating a settings row.
#[derive(Debug, Clone)]
pub struct SettingsInput {
    /// Street address line.
    pub street_address: String,
    /// Second address line.
    pub address2: String,
    /// City.
    pub city: String,
    /// State abbreviation.
    pub state: String,
    /// ZIP code.
    pub zip_code: String,
    /// Direct manager's name.
    pub manager_name: String,
    /// Provider identifier.
    pub provider_id: String,
    /// Payroll identifier.
    pub payroll_id: String,
    /// Primary work site.
    pub location: SettingsLocation,
    /// Self-reported gender.
    pub gender: Gender,
    /// Self-reported race.
    pub race: Race,
    /// Marital status.
    pub marital_status: MaritalStatus,
    /// Services the provider delivers.
    pub services_provided: String,
    /// Free-form notes.
    pub additional_info: Option<String>,
}

fn map_settings(row: &Row) -> rusqlite::Result<UserSettings> {
    let location: String = row.get("location")?;
    let gender: String = row.get("gender")?;
    let race: String = row.get("race")?;
    let marital: String = row.get("marital_status")?;

    Ok(UserSettings {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        street_address: row.get("street_address")?,
        address2: row.get("address2")?,
        city: row.get("city")?,
        state: row.get("state")?,
        zip_code: row.get("zip_code")?,
        manager_name: row.get("manager_name")?,
        provider_id: row.get("provider_id")?,
        payroll_id: row.get("payroll_id")?,
        location: SettingsLocation::parse(&location).unwrap_or(SettingsLocation::GuadalupeDta),
        gender: Gender::parse(&gender).unwrap_or(Gender::Other),
        race: Race::parse(&race).unwrap_or(Race::NotDisclosed),
        marital_status: MaritalStatus::parse(&marital).unwrap_or(MaritalStatus::Single),
        services_provided: row.get("services_provided")?,
        additional_info: row.get("additional_info")?,
        documents: Vec::new(),
    })
}

fn map_document(row: &Row) -> rusqlite::Result<Document> {
    let start: String = row.get("effective_start")?;
    let end: String = row.get("effective_end")?;
    Ok(Document {
        id: row.get("id")?,
        settings_id: row.get("settings_id")?,
        name: row.get("name")?,
        effective_start: date_from_sql(3, &start)?,
        effective_end: date_from_sql(4, &end)?,
    })
}

fn attach_documents(conn: &Connection, settings: &mut UserSettings) -> OfficeResult<()> {
    settings.documents = list_documents(conn, settings.id)?;
    Ok(())
}

/// Fetches the user's settings, creating a placeholder row on first access.
pub fn get_or_create(conn: &Connection, user_id: i64) -> OfficeResult<UserSettings> {
    let existing = conn
        .query_row(
            "SELECT * FROM user_settings WHERE user_id = ?1",
            params![user_id],
            map_settings,
        )
        .optional()?;

    let mut settings = match existing {
        Some(s) => s,
        None => {
            conn.execute(
                "INSERT INTO user_settings (user_id) VALUES (?1)",
                params![user_id],
            )?;
            conn.query_row(
                "SELECT * FROM user_settings WHERE id = ?1",
                params![conn.last_insert_rowid()],
                map_settings,
            )?
        }
    };
    attach_documents(conn, &mut settings)?;
    Ok(settings)
}

/// Rewrites the user's settings row in full.
pub fn update(
    conn: &Connection,
    user_id: i64,
    input: &SettingsInput,
) -> OfficeResult<UserSettings> {
    // Make sure the row exists so a PUT before any GET still works.
    get_or_create(conn, user_id)?;

    conn.execute(
        "UPDATE user_settings SET
            street_address = ?1, address2 = ?2, city = ?3, state = ?4,
            zip_code = ?5, manager_name = ?6, provider_id = ?7, payroll_id = ?8,
            location = ?9, gender = ?10, race = ?11, marital_status = ?12,
            services_provided = ?13, additional_info = ?14
         WHERE user_id = ?15",
        params![
            input.street_address,
            input.address2,
            input.city,
            input.state,
            input.zip_code,
            input.manager_name,
            input.provider_id,
            input.payroll_id,
            input.location.as_str(),
            input.gender.as_str(),
            input.race.as_str(),
            input.marital_status.as_str(),
            input.services_provided,
            input.additional_info,
            user_id,
        ],
    )?;

    get_or_create(conn, user_id)
}

/// Adds a document to the user's settings.
pub fn insert_document(
    conn: &Connection,
    settings_id: i64,
    name: &str,
    effective_start: NaiveDate,
    effective_end: NaiveDate,
) -> OfficeResult<Document> {
    conn.execute(
        "INSERT INTO documents (settings_id, name, effective_start, effective_end)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            settings_id,
            name,
            date_to_sql(effective_start),
            date_to_sql(effective_end),
        ],
    )?;
    conn.query_row(
        "SELECT * FROM documents WHERE id = ?1",
        params![conn.last_insert_rowid()],
        map_document,
    )
    .map_err(OfficeError::Database)
}

/// Lists a settings row's documents by effective start date.
pub fn list_documents(conn: &Connection, settings_id: i64) -> OfficeResult<Vec<Document>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM documents WHERE settings_id = ?1 ORDER BY effective_start, id",
    )?;
    let rows = stmt.query_map(params![settings_id], map_document)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Deletes a document, scoped to the owning settings row.
pub fn delete_document(conn: &Connection, settings_id: i64, id: i64) -> OfficeResult<()> {
    let changed = conn.execute(
        "DELETE FROM documents WHERE id = ?1 AND settings_id = ?2",
        params![id, settings_id],
    )?;
    if changed == 0 {
        return Err(OfficeError::NotFound {
            entity: "Document".to_string(),
        });
    }
    Ok(())
}
