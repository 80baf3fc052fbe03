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
    models::social_profile::{CreateSocialProfileRequest, SocialProfileForm},
    services,
};

pub async fn create_social_profile(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateSocialProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let profile = services::social_profile::create(&pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn get_social_profile(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let profile = services::social_profile::find_by_id(&pool, id).await?;
    Ok(Json(profile))
}

pub async fn update_social_profile(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<SocialProfileForm>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let profile = services::social_profile::update(&pool, id, &payload).await?;
    Ok(Json(profile))
}

pub async fn delete_social_profile(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    services::social_profile::delete(&pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
