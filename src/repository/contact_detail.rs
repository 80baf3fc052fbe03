use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::contact_detail::{ContactDetail, ContactDetailForm};

pub async fn insert<'e, E>(executor: E, contact_id: i64, form: &ContactDetailForm) -> sqlx::Result<ContactDetail>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, ContactDetail>(
        r#"
        INSERT INTO contact_details (contact_id, detail_type, label, value, is_primary)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, contact_id, detail_type, label, value, is_primary
        "#,
    )
    .bind(contact_id)
    .bind(form.detail_type)
    .bind(form.label)
    .bind(form.value.trim())
    .bind(form.is_primary)
    .fetch_one(executor)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<ContactDetail>> {
    sqlx::query_as::<_, ContactDetail>(
        "SELECT id, contact_id, detail_type, label, value, is_primary FROM contact_details WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_by_contact(pool: &SqlitePool, contact_id: i64) -> sqlx::Result<Vec<ContactDetail>> {
    sqlx::query_as::<_, ContactDetail>(
        r#"
        SELECT id, contact_id, detail_type, label, value, is_primary
        FROM contact_details
        WHERE contact_id = ?
        ORDER BY is_primary DESC, id
        "#,
    )
    .bind(contact_id)
    .fetch_all(pool)
    .await
}

pub async fn list_primary_by_contact(pool: &SqlitePool, contact_id: i64) -> sqlx::Result<Vec<ContactDetail>> {
    sqlx::query_as::<_, ContactDetail>(
        r#"
        SELECT id, contact_id, detail_type, label, value, is_primary
        FROM contact_details
        WHERE contact_id = ? AND is_primary = TRUE
        ORDER BY id
        "#,
    )
    .bind(contact_id)
    .fetch_all(pool)
    .await
}

pub async fn update<'e, E>(executor: E, id: i64, form: &ContactDetailForm) -> sqlx::Result<Option<ContactDetail>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, ContactDetail>(
        r#"
        UPDATE contact_details SET detail_type = ?, label = ?, value = ?, is_primary = ?
        WHERE id = ?
        RETURNING id, contact_id, detail_type, label, value, is_primary
        "#,
    )
    .bind(form.detail_type)
    .bind(form.label)
    .bind(form.value.trim())
    .bind(form.is_primary)
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E>(executor: E, id: i64) -> sqlx::Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM contact_details WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
