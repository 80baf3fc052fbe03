// src/handlers/reports.rs

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use sqlx::SqlitePool;

use crate::{error::AppError, models::report::ReportView, services};

/// Creates a report, starts generating it in the background and
/// redirects (303) to the polling URL.
pub async fn create_report(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let report = services::report::create(&pool).await?;

    services::report::spawn_generation(pool.clone(), report.id);

    Ok(Redirect::to(&format!("/reports/{}", report.id)))
}

/// Current state of a report: in progress, failed, or the rendered content.
pub async fn get_report(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let report = services::report::get(&pool, id).await?;
    Ok(Json(ReportView::from(report)))
}
