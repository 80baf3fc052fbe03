use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::event::{Event, EventForm, EventType};

/// Event fields after validation and trimming.
#[derive(Debug, Clone)]
pub struct EventFields {
    pub event_type: EventType,
    pub custom_event_name: Option<String>,
    pub event_date: chrono::NaiveDate,
    pub notes: Option<String>,
    pub yearly_recurrence: bool,
}

impl From<&EventForm> for EventFields {
    fn from(form: &EventForm) -> Self {
        Self {
            event_type: form.event_type,
            custom_event_name: form
                .custom_event_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            event_date: form.event_date,
            notes: form.notes.clone(),
            yearly_recurrence: form.yearly_recurrence,
        }
    }
}

pub async fn insert<'e, E>(executor: E, contact_id: i64, fields: &EventFields) -> sqlx::Result<Event>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Event>(
        r#"
        INSERT INTO events (contact_id, event_type, custom_event_name, event_date, notes, yearly_recurrence)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id, contact_id, event_type, custom_event_name, event_date, notes, yearly_recurrence
        "#,
    )
    .bind(contact_id)
    .bind(fields.event_type)
    .bind(&fields.custom_event_name)
    .bind(fields.event_date)
    .bind(&fields.notes)
    .bind(fields.yearly_recurrence)
    .fetch_one(executor)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Event>> {
    sqlx::query_as::<_, Event>(
        r#"
        SELECT id, contact_id, event_type, custom_event_name, event_date, notes, yearly_recurrence
        FROM events
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_by_contact(pool: &SqlitePool, contact_id: i64) -> sqlx::Result<Vec<Event>> {
    sqlx::query_as::<_, Event>(
        r#"
        SELECT id, contact_id, event_type, custom_event_name, event_date, notes, yearly_recurrence
        FROM events
        WHERE contact_id = ?
        ORDER BY event_date, id
        "#,
    )
    .bind(contact_id)
    .fetch_all(pool)
    .await
}

pub async fn find_by_contact_and_type(
    pool: &SqlitePool,
    contact_id: i64,
    event_type: EventType,
) -> sqlx::Result<Option<Event>> {
    sqlx::query_as::<_, Event>(
        r#"
        SELECT id, contact_id, event_type, custom_event_name, event_date, notes, yearly_recurrence
        FROM events
        WHERE contact_id = ? AND event_type = ?
        ORDER BY id
        LIMIT 1
        "#,
    )
    .bind(contact_id)
    .bind(event_type)
    .fetch_optional(pool)
    .await
}

pub async fn list_by_type<'e, E>(executor: E, event_type: EventType) -> sqlx::Result<Vec<Event>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Event>(
        r#"
        SELECT id, contact_id, event_type, custom_event_name, event_date, notes, yearly_recurrence
        FROM events
        WHERE event_type = ?
        ORDER BY id
        "#,
    )
    .bind(event_type)
    .fetch_all(executor)
    .await
}

pub async fn list_all(pool: &SqlitePool) -> sqlx::Result<Vec<Event>> {
    sqlx::query_as::<_, Event>(
        r#"
        SELECT id, contact_id, event_type, custom_event_name, event_date, notes, yearly_recurrence
        FROM events
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Whether the contact already has an event of this type, ignoring `exclude_id`.
pub async fn exists_for_contact<'e, E>(
    executor: E,
    contact_id: i64,
    event_type: EventType,
    exclude_id: Option<i64>,
) -> sqlx::Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM events
            WHERE contact_id = ? AND event_type = ? AND (? IS NULL OR id <> ?)
        )
        "#,
    )
    .bind(contact_id)
    .bind(event_type)
    .bind(exclude_id)
    .bind(exclude_id)
    .fetch_one(executor)
    .await
}

pub async fn update<'e, E>(executor: E, id: i64, fields: &EventFields) -> sqlx::Result<Option<Event>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Event>(
        r#"
        UPDATE events
        SET event_type = ?, custom_event_name = ?, event_date = ?, notes = ?, yearly_recurrence = ?
        WHERE id = ?
        RETURNING id, contact_id, event_type, custom_event_name, event_date, notes, yearly_recurrence
        "#,
    )
    .bind(fields.event_type)
    .bind(&fields.custom_event_name)
    .bind(fields.event_date)
    .bind(&fields.notes)
    .bind(fields.yearly_recurrence)
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E>(executor: E, id: i64) -> sqlx::Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM events WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
