use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{error::AppError, models::contact_detail::ContactDetailForm, services};

pub async fn get_detail(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let detail = services::contact_detail::find_by_id(&pool, id).await?;
    Ok(Json(detail))
}

pub async fn update_detail(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<ContactDetailForm>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let detail = services::contact_detail::update(&pool, id, &payload).await?;
    Ok(Json(detail))
}

pub async fn delete_detail(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    services::contact_detail::delete(&pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
