use sqlx::SqlitePool;

use crate::{
    error::{AppError, is_unique_violation},
    models::company::{JobTitle, JobTitleRequest},
    repository,
};

/// Returns the stored title when one with the same text already exists.
/// The flag tells whether a new row was inserted.
pub async fn create(pool: &SqlitePool, req: &JobTitleRequest) -> Result<(JobTitle, bool), AppError> {
    let title = req.title.trim();
    if let Some(existing) = repository::job_title::find_by_title(pool, title).await? {
        tracing::debug!("Job title '{}' already exists with ID: {}", title, existing.id);
        return Ok((existing, false));
    }

    match repository::job_title::insert(pool, title).await {
        Ok(job_title) => {
            tracing::info!("Job title created. ID: {}, title: {}", job_title.id, job_title.title);
            Ok((job_title, true))
        }
        Err(e) if is_unique_violation(&e) => repository::job_title::find_by_title(pool, title)
            .await?
            .map(|existing| (existing, false))
            .ok_or_else(|| AppError::InternalServerError(e.to_string())),
        Err(e) => Err(e.into()),
    }
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<JobTitle, AppError> {
    repository::job_title::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Job title", id))
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<JobTitle>, AppError> {
    Ok(repository::job_title::list(pool).await?)
}

pub async fn update(pool: &SqlitePool, id: i64, req: &JobTitleRequest) -> Result<JobTitle, AppError> {
    let title = req.title.trim();
    let job_title = repository::job_title::update(pool, id, title)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::IllegalState(format!("Job title '{}' already exists", title))
            } else {
                AppError::from(e)
            }
        })?
        .ok_or_else(|| AppError::not_found("Job title", id))?;

    tracing::info!("Job title updated. ID: {}", id);
    Ok(job_title)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    if repository::job_title::delete(pool, id).await? == 0 {
        return Err(AppError::not_found("Job title", id));
    }
    tracing::info!("Job title deleted. ID: {}", id);
    Ok(())
}
