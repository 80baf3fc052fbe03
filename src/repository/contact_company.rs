use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::company::{ContactCompany, ContactCompanyView};

/// Employment record fields as written to the database.
#[derive(Debug, Clone, Copy)]
pub struct ContactCompanyFields {
    pub company_id: i64,
    pub job_title_id: i64,
    pub is_current: bool,
}

pub async fn insert<'e, E>(
    executor: E,
    contact_id: i64,
    fields: ContactCompanyFields,
) -> sqlx::Result<ContactCompany>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, ContactCompany>(
        r#"
        INSERT INTO contact_companies (contact_id, company_id, job_title_id, is_current)
        VALUES (?, ?, ?, ?)
        RETURNING id, contact_id, company_id, job_title_id, is_current
        "#,
    )
    .bind(contact_id)
    .bind(fields.company_id)
    .bind(fields.job_title_id)
    .bind(fields.is_current)
    .fetch_one(executor)
    .await
}

/// Clears the current flag on every record of the contact except `keep_id`.
pub async fn clear_current<'e, E>(executor: E, contact_id: i64, keep_id: Option<i64>) -> sqlx::Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        UPDATE contact_companies SET is_current = FALSE
        WHERE contact_id = ? AND is_current = TRUE AND (? IS NULL OR id <> ?)
        "#,
    )
    .bind(contact_id)
    .bind(keep_id)
    .bind(keep_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<ContactCompany>> {
    sqlx::query_as::<_, ContactCompany>(
        "SELECT id, contact_id, company_id, job_title_id, is_current FROM contact_companies WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_by_contact(pool: &SqlitePool, contact_id: i64) -> sqlx::Result<Vec<ContactCompanyView>> {
    sqlx::query_as::<_, ContactCompanyView>(
        r#"
        SELECT cc.id, cc.contact_id, cc.company_id, c.name AS company_name,
               cc.job_title_id, jt.title AS job_title, cc.is_current
        FROM contact_companies cc
        JOIN companies c ON c.id = cc.company_id
        JOIN job_titles jt ON jt.id = cc.job_title_id
        WHERE cc.contact_id = ?
        ORDER BY cc.is_current DESC, cc.id
        "#,
    )
    .bind(contact_id)
    .fetch_all(pool)
    .await
}

pub async fn find_current(pool: &SqlitePool, contact_id: i64) -> sqlx::Result<Option<ContactCompanyView>> {
    sqlx::query_as::<_, ContactCompanyView>(
        r#"
        SELECT cc.id, cc.contact_id, cc.company_id, c.name AS company_name,
               cc.job_title_id, jt.title AS job_title, cc.is_current
        FROM contact_companies cc
        JOIN companies c ON c.id = cc.company_id
        JOIN job_titles jt ON jt.id = cc.job_title_id
        WHERE cc.contact_id = ? AND cc.is_current = TRUE
        ORDER BY cc.id DESC
        LIMIT 1
        "#,
    )
    .bind(contact_id)
    .fetch_optional(pool)
    .await
}

pub async fn update<'e, E>(
    executor: E,
    id: i64,
    fields: ContactCompanyFields,
) -> sqlx::Result<Option<ContactCompany>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, ContactCompany>(
        r#"
        UPDATE contact_companies SET company_id = ?, job_title_id = ?, is_current = ?
        WHERE id = ?
        RETURNING id, contact_id, company_id, job_title_id, is_current
        "#,
    )
    .bind(fields.company_id)
    .bind(fields.job_title_id)
    .bind(fields.is_current)
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E>(executor: E, id: i64) -> sqlx::Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM contact_companies WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
