// tests/common/mod.rs

#![allow(dead_code)]

use contact_hub::{
    config::Config,
    models::user::{AdminCreateUserRequest, UserRole},
    routes, services,
    state::AppState,
};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

pub const PASSWORD: &str = "password123";

pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
    pub client: reqwest::Client,
}

/// Fresh in-memory database with migrations applied.
/// A single connection that never expires keeps the database alive for the whole test.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    pool
}

/// Spawns the app on a random port. The client does not follow redirects.
pub async fn spawn_app() -> TestApp {
    let pool = test_pool().await;
    let config = Config::for_tests("sqlite::memory:");
    let state = AppState {
        pool: pool.clone(),
        config,
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp { address, pool, client }
}

pub fn unique_username() -> String {
    format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8])
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn register(&self, username: &str) -> reqwest::Response {
        self.client
            .post(self.url("/registration"))
            .json(&serde_json::json!({
                "username": username,
                "password": PASSWORD
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, username: &str) -> String {
        let body: serde_json::Value = self
            .client
            .post(self.url("/login"))
            .json(&serde_json::json!({
                "username": username,
                "password": PASSWORD
            }))
            .send()
            .await
            .expect("Login failed")
            .json()
            .await
            .expect("Failed to parse login json");

        body["token"].as_str().expect("Token not found").to_string()
    }

    /// Registers a fresh regular user and returns its bearer token.
    pub async fn user_token(&self) -> String {
        let username = unique_username();
        assert_eq!(self.register(&username).await.status().as_u16(), 201);
        self.login(&username).await
    }

    /// Creates an administrator directly through the service layer and returns its token.
    pub async fn admin_token(&self) -> String {
        let username = unique_username();
        services::user::create(
            &self.pool,
            &AdminCreateUserRequest {
                username: username.clone(),
                password: PASSWORD.to_string(),
                first_name: None,
                last_name: None,
                roles: vec![UserRole::Admin, UserRole::User],
                is_active: Some(true),
            },
        )
        .await
        .expect("Failed to create admin");
        self.login(&username).await
    }

    pub async fn get(&self, token: &str, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post(&self, token: &str, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put(&self, token: &str, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, token: &str, path: &str) -> reqwest::Response {
        self.client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Creates a bare contact and returns its id.
    pub async fn create_contact(&self, token: &str, first_name: &str, last_name: &str) -> i64 {
        let response = self
            .post(
                token,
                "/contacts",
                serde_json::json!({ "first_name": first_name, "last_name": last_name }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201);
        let body: serde_json::Value = response.json().await.unwrap();
        body["contact"]["id"].as_i64().expect("Contact id missing")
    }
}
