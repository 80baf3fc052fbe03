use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{error::AppError, models::company::UpdateContactCompanyRequest, services};

pub async fn update_contact_company(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateContactCompanyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let link = services::contact_company::update(&pool, id, &payload).await?;
    Ok(Json(link))
}

pub async fn delete_contact_company(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    services::contact_company::delete(&pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
