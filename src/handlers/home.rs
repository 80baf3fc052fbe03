use axum::{Json, extract::State, response::IntoResponse};
use sqlx::SqlitePool;

use crate::{config::Config, error::AppError, services};

/// Landing dashboard for any signed-in user.
pub async fn dashboard(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
) -> Result<impl IntoResponse, AppError> {
    let stats = services::statistics::user_dashboard(
        &pool,
        services::event::today(),
        config.birthday_window_days,
    )
    .await?;
    Ok(Json(stats))
}
