// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Default look-ahead window for the "upcoming birthdays" dashboard counter.
pub const DEFAULT_BIRTHDAY_WINDOW_DAYS: i64 = 14;

/// Default page size for paginated contact listings.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Hard upper bound for a requested page size.
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub app_name: String,
    pub app_version: String,
    pub birthday_window_days: i64,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET")
            .expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86_400);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let admin_username = env::var("ADMIN_USERNAME").ok().filter(|v| !v.is_empty());
        let admin_password = env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty());

        let app_name = env::var("APP_NAME")
            .unwrap_or_else(|_| env!("CARGO_PKG_NAME").to_string());

        let app_version = env::var("APP_VERSION")
            .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

        let birthday_window_days = env::var("BIRTHDAY_WINDOW_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|days: &i64| *days >= 0)
            .unwrap_or(DEFAULT_BIRTHDAY_WINDOW_DAYS);

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            admin_username,
            admin_password,
            app_name,
            app_version,
            birthday_window_days,
            bind_addr,
        }
    }

    /// Configuration for tests and tooling: in-memory defaults, no environment lookups.
    pub fn for_tests(database_url: &str) -> Self {
        Self {
            database_url: database_url.to_string(),
            jwt_secret: "test_secret_for_integration_tests".to_string(),
            jwt_expiration: 600,
            rust_log: "error".to_string(),
            admin_username: None,
            admin_password: None,
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            birthday_window_days: DEFAULT_BIRTHDAY_WINDOW_DAYS,
            bind_addr: "127.0.0.1:0".to_string(),
        }
    }
}
