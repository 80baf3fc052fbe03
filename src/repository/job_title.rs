use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::company::JobTitle;

pub async fn insert<'e, E>(executor: E, title: &str) -> sqlx::Result<JobTitle>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, JobTitle>("INSERT INTO job_titles (title) VALUES (?) RETURNING id, title")
        .bind(title)
        .fetch_one(executor)
        .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<JobTitle>> {
    sqlx::query_as::<_, JobTitle>("SELECT id, title FROM job_titles WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_title(pool: &SqlitePool, title: &str) -> sqlx::Result<Option<JobTitle>> {
    sqlx::query_as::<_, JobTitle>("SELECT id, title FROM job_titles WHERE title = ?")
        .bind(title)
        .fetch_optional(pool)
        .await
}

pub async fn list(pool: &SqlitePool) -> sqlx::Result<Vec<JobTitle>> {
    sqlx::query_as::<_, JobTitle>("SELECT id, title FROM job_titles ORDER BY title")
        .fetch_all(pool)
        .await
}

pub async fn update<'e, E>(executor: E, id: i64, title: &str) -> sqlx::Result<Option<JobTitle>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, JobTitle>("UPDATE job_titles SET title = ? WHERE id = ? RETURNING id, title")
        .bind(title)
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn delete<'e, E>(executor: E, id: i64) -> sqlx::Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM job_titles WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
