// src/handlers/events.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::{
        contact::WindowParams,
        event::{CreateEventRequest, EventForm},
    },
    services,
};

pub async fn create_event(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let event = services::event::create(&pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Events in the next `days` days, grouped by the day they fall on.
pub async fn upcoming_events(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Query(params): Query<WindowParams>,
) -> Result<impl IntoResponse, AppError> {
    let days = params.days.unwrap_or(config.birthday_window_days);
    if days < 0 {
        return Err(AppError::BadRequest("days must not be negative".to_string()));
    }

    let upcoming = services::event::upcoming(&pool, services::event::today(), days).await?;
    Ok(Json(upcoming))
}

pub async fn get_event(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let event = services::event::find_by_id(&pool, id).await?;
    Ok(Json(event))
}

pub async fn update_event(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<EventForm>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let event = services::event::update(&pool, id, &payload).await?;
    Ok(Json(event))
}

pub async fn delete_event(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    services::event::delete(&pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
