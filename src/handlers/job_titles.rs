use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{error::AppError, models::company::JobTitleRequest, services};

pub async fn list_job_titles(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let titles = services::job_title::list(&pool).await?;
    Ok(Json(titles))
}

/// Returns the existing title (200) when the text is already known, otherwise creates it (201).
pub async fn create_job_title(
    State(pool): State<SqlitePool>,
    Json(payload): Json<JobTitleRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (title, created) = services::job_title::create(&pool, &payload).await?;

    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(title)))
}

pub async fn get_job_title(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let title = services::job_title::find_by_id(&pool, id).await?;
    Ok(Json(title))
}

pub async fn update_job_title(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<JobTitleRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let title = services::job_title::update(&pool, id, &payload).await?;
    Ok(Json(title))
}

pub async fn delete_job_title(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    services::job_title::delete(&pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
