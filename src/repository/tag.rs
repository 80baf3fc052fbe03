use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::tag::{ContactTag, ContactTagView, Tag, TagRequest};

pub async fn insert<'e, E>(executor: E, req: &TagRequest) -> sqlx::Result<Tag>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Tag>(
        r#"
        INSERT INTO tags (name, color, description)
        VALUES (?, ?, ?)
        RETURNING id, name, color, description
        "#,
    )
    .bind(req.name.trim())
    .bind(&req.color)
    .bind(&req.description)
    .fetch_one(executor)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Tag>> {
    sqlx::query_as::<_, Tag>("SELECT id, name, color, description FROM tags WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_name<'e, E>(executor: E, name: &str) -> sqlx::Result<Option<Tag>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Tag>("SELECT id, name, color, description FROM tags WHERE name = ?")
        .bind(name)
        .fetch_optional(executor)
        .await
}

pub async fn list(pool: &SqlitePool) -> sqlx::Result<Vec<Tag>> {
    sqlx::query_as::<_, Tag>("SELECT id, name, color, description FROM tags ORDER BY name")
        .fetch_all(pool)
        .await
}

pub async fn update<'e, E>(executor: E, id: i64, req: &TagRequest) -> sqlx::Result<Option<Tag>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Tag>(
        r#"
        UPDATE tags SET name = ?, color = ?, description = ?
        WHERE id = ?
        RETURNING id, name, color, description
        "#,
    )
    .bind(req.name.trim())
    .bind(&req.color)
    .bind(&req.description)
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E>(executor: E, id: i64) -> sqlx::Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM tags WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Tags attached to a contact, by name.
pub async fn list_by_contact(pool: &SqlitePool, contact_id: i64) -> sqlx::Result<Vec<Tag>> {
    sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.id, t.name, t.color, t.description
        FROM tags t
        JOIN contact_tags ct ON ct.tag_id = t.id
        WHERE ct.contact_id = ?
        ORDER BY t.name
        "#,
    )
    .bind(contact_id)
    .fetch_all(pool)
    .await
}

pub async fn list_links_by_contact(pool: &SqlitePool, contact_id: i64) -> sqlx::Result<Vec<ContactTagView>> {
    sqlx::query_as::<_, ContactTagView>(
        r#"
        SELECT ct.id, ct.contact_id, ct.tag_id, t.name AS tag_name, t.color, ct.created_at
        FROM contact_tags ct
        JOIN tags t ON t.id = ct.tag_id
        WHERE ct.contact_id = ?
        ORDER BY t.name
        "#,
    )
    .bind(contact_id)
    .fetch_all(pool)
    .await
}

pub async fn is_attached<'e, E>(executor: E, contact_id: i64, tag_id: i64) -> sqlx::Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM contact_tags WHERE contact_id = ? AND tag_id = ?)",
    )
    .bind(contact_id)
    .bind(tag_id)
    .fetch_one(executor)
    .await
}

pub async fn attach<'e, E>(executor: E, contact_id: i64, tag_id: i64) -> sqlx::Result<ContactTag>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, ContactTag>(
        r#"
        INSERT INTO contact_tags (contact_id, tag_id, created_at)
        VALUES (?, ?, ?)
        RETURNING id, contact_id, tag_id, created_at
        "#,
    )
    .bind(contact_id)
    .bind(tag_id)
    .bind(Utc::now())
    .fetch_one(executor)
    .await
}

pub async fn detach<'e, E>(executor: E, contact_tag_id: i64) -> sqlx::Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM contact_tags WHERE id = ?")
        .bind(contact_tag_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
