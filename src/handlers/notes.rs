use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::note::{CreateNoteRequest, UpdateNoteRequest},
    services,
};

pub async fn create_note(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateNoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let note = services::note::create(&pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn get_note(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let note = services::note::find_by_id(&pool, id).await?;
    Ok(Json(note))
}

pub async fn update_note(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateNoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let note = services::note::update(&pool, id, &payload).await?;
    Ok(Json(note))
}

pub async fn delete_note(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    services::note::delete(&pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
