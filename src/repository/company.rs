use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::company::{Company, CompanyWithHeadcount};

use super::like_pattern;

pub async fn insert<'e, E>(executor: E, name: &str, website: Option<&str>) -> sqlx::Result<Company>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Company>(
        r#"
        INSERT INTO companies (name, website, created_at)
        VALUES (?, ?, ?)
        RETURNING id, name, website, created_at
        "#,
    )
    .bind(name)
    .bind(website)
    .bind(Utc::now())
    .fetch_one(executor)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Company>> {
    sqlx::query_as::<_, Company>("SELECT id, name, website, created_at FROM companies WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn exists_by_name(pool: &SqlitePool, name: &str) -> sqlx::Result<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM companies WHERE name = ?)")
        .bind(name)
        .fetch_one(pool)
        .await
}

/// Companies whose name contains `fragment` (all of them when `None`), each with its headcount.
pub async fn search(pool: &SqlitePool, fragment: Option<&str>) -> sqlx::Result<Vec<CompanyWithHeadcount>> {
    sqlx::query_as::<_, CompanyWithHeadcount>(
        r#"
        SELECT c.id, c.name, c.website, c.created_at,
               (SELECT COUNT(DISTINCT cc.contact_id) FROM contact_companies cc WHERE cc.company_id = c.id) AS contacts_count
        FROM companies c
        WHERE ? IS NULL OR c.name LIKE ?
        ORDER BY c.name
        "#,
    )
    .bind(fragment)
    .bind(fragment.map(like_pattern))
    .fetch_all(pool)
    .await
}

pub async fn update<'e, E>(
    executor: E,
    id: i64,
    name: &str,
    website: Option<&str>,
) -> sqlx::Result<Option<Company>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Company>(
        r#"
        UPDATE companies SET name = ?, website = ?
        WHERE id = ?
        RETURNING id, name, website, created_at
        "#,
    )
    .bind(name)
    .bind(website)
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E>(executor: E, id: i64) -> sqlx::Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM companies WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn count<'e, E>(executor: E) -> sqlx::Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM companies")
        .fetch_one(executor)
        .await
}

/// Distinct contacts with an employment record at the company.
pub async fn count_contacts(pool: &SqlitePool, company_id: i64) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(DISTINCT contact_id) FROM contact_companies WHERE company_id = ?",
    )
    .bind(company_id)
    .fetch_one(pool)
    .await
}
