// src/handlers/admin.rs

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{AdminCreateUserRequest, AdminUpdateUserRequest},
    services,
    utils::jwt::Claims,
};

/// Admin panel figures: users, contacts and companies.
pub async fn dashboard(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let stats = services::statistics::admin_dashboard(&pool).await?;
    Ok(Json(stats))
}

/// Lists all users in the system.
pub async fn list_users(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let users = services::user::list(&pool).await?;
    Ok(Json(users))
}

/// Creates a new user with specific roles.
pub async fn create_user(
    State(pool): State<SqlitePool>,
    Json(payload): Json<AdminCreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user = services::user::create(&pool, &payload).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Updates user information. Absent fields are left alone.
pub async fn update_user(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<AdminUpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = services::user::update(&pool, id, &payload).await?;

    Ok(Json(user))
}

/// Deletes a user by ID. Prevents deleting self.
pub async fn delete_user(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let current_user_id = claims.user_id()?;

    services::user::delete(&pool, current_user_id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
