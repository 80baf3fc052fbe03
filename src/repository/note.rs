use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::note::Note;

pub async fn insert<'e, E>(executor: E, contact_id: i64, content: &str) -> sqlx::Result<Note>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Note>(
        r#"
        INSERT INTO notes (contact_id, content, created_at)
        VALUES (?, ?, ?)
        RETURNING id, contact_id, content, created_at
        "#,
    )
    .bind(contact_id)
    .bind(content)
    .bind(Utc::now())
    .fetch_one(executor)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Note>> {
    sqlx::query_as::<_, Note>("SELECT id, contact_id, content, created_at FROM notes WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Newest first.
pub async fn list_by_contact(pool: &SqlitePool, contact_id: i64) -> sqlx::Result<Vec<Note>> {
    sqlx::query_as::<_, Note>(
        r#"
        SELECT id, contact_id, content, created_at
        FROM notes
        WHERE contact_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(contact_id)
    .fetch_all(pool)
    .await
}

pub async fn update_content<'e, E>(executor: E, id: i64, content: &str) -> sqlx::Result<Option<Note>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Note>(
        "UPDATE notes SET content = ? WHERE id = ? RETURNING id, contact_id, content, created_at",
    )
    .bind(content)
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E>(executor: E, id: i64) -> sqlx::Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM notes WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
