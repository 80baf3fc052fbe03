use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::report::{Report, ReportStatus};

/// New reports always start as CREATED with no content.
pub async fn insert<'e, E>(executor: E) -> sqlx::Result<Report>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Report>(
        r#"
        INSERT INTO reports (status, content, created_at)
        VALUES (?, NULL, ?)
        RETURNING id, status, content, created_at
        "#,
    )
    .bind(ReportStatus::Created)
    .bind(Utc::now())
    .fetch_one(executor)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Report>> {
    sqlx::query_as::<_, Report>("SELECT id, status, content, created_at FROM reports WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Moves a CREATED report to a terminal state. Returns false when the report
/// is missing or has already left CREATED, in which case nothing changes.
pub async fn finish<'e, E>(
    executor: E,
    id: i64,
    status: ReportStatus,
    content: Option<&str>,
) -> sqlx::Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        UPDATE reports SET status = ?, content = ?
        WHERE id = ? AND status = ?
        "#,
    )
    .bind(status)
    .bind(content)
    .bind(id)
    .bind(ReportStatus::Created)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() == 1)
}
