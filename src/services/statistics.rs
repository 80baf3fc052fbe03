use std::time::Instant;

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::stats::{AdminDashboardStats, DashboardStats, UserDashboardStats},
    services,
};

/// Each count is its own query; concurrent writes may make them disagree slightly.
pub async fn user_dashboard(
    pool: &SqlitePool,
    today: NaiveDate,
    window_days: i64,
) -> Result<UserDashboardStats, AppError> {
    let started = Instant::now();

    let stats = UserDashboardStats {
        base: DashboardStats {
            contacts_count: services::contact::count_total(pool).await?,
            companies_count: services::company::count_total(pool).await?,
        },
        favorites_count: services::contact::count_favorites(pool).await?,
        upcoming_birthdays: services::event::count_upcoming_birthdays(pool, today, window_days).await?,
        birthday_window_days: window_days,
    };

    tracing::debug!(
        "User dashboard computed in {} ms: {:?}",
        started.elapsed().as_millis(),
        stats
    );
    Ok(stats)
}

pub async fn admin_dashboard(pool: &SqlitePool) -> Result<AdminDashboardStats, AppError> {
    let started = Instant::now();

    let stats = AdminDashboardStats {
        base: DashboardStats {
            contacts_count: services::contact::count_total(pool).await?,
            companies_count: services::company::count_total(pool).await?,
        },
        users_count: services::user::count_total(pool).await?,
    };

    tracing::debug!(
        "Admin dashboard computed in {} ms: {:?}",
        started.elapsed().as_millis(),
        stats
    );
    Ok(stats)
}
