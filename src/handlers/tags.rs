use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{error::AppError, models::tag::TagRequest, services};

pub async fn list_tags(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let tags = services::tag::list(&pool).await?;
    Ok(Json(tags))
}

pub async fn create_tag(
    State(pool): State<SqlitePool>,
    Json(payload): Json<TagRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let tag = services::tag::create(&pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

pub async fn get_tag(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let tag = services::tag::find_by_id(&pool, id).await?;
    Ok(Json(tag))
}

pub async fn update_tag(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<TagRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let tag = services::tag::update(&pool, id, &payload).await?;
    Ok(Json(tag))
}

pub async fn delete_tag(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    services::tag::delete(&pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Contacts carrying the tag.
pub async fn list_tagged_contacts(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let contacts = services::contact::find_by_tag(&pool, id).await?;
    Ok(Json(contacts))
}

/// Detaches a tag from a contact, by link id.
pub async fn delete_contact_tag(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    services::tag::detach(&pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
