use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::company::{CompanyRequest, CompanySearchParams},
    services,
};

/// Lists companies with their headcount, optionally filtered by `search`.
pub async fn list_companies(
    State(pool): State<SqlitePool>,
    Query(params): Query<CompanySearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let companies = services::company::search(&pool, params.search.as_deref()).await?;
    Ok(Json(companies))
}

pub async fn create_company(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CompanyRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let company = services::company::create(&pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

pub async fn get_company(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let company = services::company::find_by_id(&pool, id).await?;
    let contacts_count = services::company::count_contacts(&pool, id).await?;

    Ok(Json(json!({
        "company": company,
        "contacts_count": contacts_count,
    })))
}

pub async fn update_company(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<CompanyRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let company = services::company::update(&pool, id, &payload).await?;
    Ok(Json(company))
}

pub async fn delete_company(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    services::company::delete(&pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
