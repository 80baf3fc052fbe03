// tests/api_tests.rs

mod common;

use common::{PASSWORD, spawn_app, unique_username};
use contact_hub::services;

#[tokio::test]
async fn health_check_404() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/random_path_that_does_not_exist"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn register_works() {
    let app = spawn_app().await;
    let username = unique_username();

    let response = app.register(&username).await;

    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["username"], username.as_str());
    assert_eq!(body["roles"], serde_json::json!(["USER"]));
    assert!(body.get("password").is_none(), "Password hash must not be serialized");
}

#[tokio::test]
async fn register_fails_validation() {
    let app = spawn_app().await;

    // Username too short
    let response = app
        .client
        .post(app.url("/registration"))
        .json(&serde_json::json!({
            "username": "yo",
            "password": PASSWORD
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn register_duplicate_username_conflicts() {
    let app = spawn_app().await;
    let username = unique_username();

    assert_eq!(app.register(&username).await.status().as_u16(), 201);
    let response = app.register(&username).await;

    assert_eq!(response.status().as_u16(), 409);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains(&username));

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
        .bind(&username)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(stored, 1);
    assert_eq!(services::user::count_total(&app.pool).await.unwrap(), 1);
}

#[tokio::test]
async fn login_returns_bearer_token() {
    let app = spawn_app().await;
    let username = unique_username();
    app.register(&username).await;

    let body: serde_json::Value = app
        .client
        .post(app.url("/login"))
        .json(&serde_json::json!({
            "username": username,
            "password": PASSWORD
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["type"], "Bearer");
    assert_eq!(body["roles"], serde_json::json!(["USER"]));
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = spawn_app().await;
    let username = unique_username();
    app.register(&username).await;

    let response = app
        .client
        .post(app.url("/login"))
        .json(&serde_json::json!({
            "username": username,
            "password": "not-the-password"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn protected_routes_require_token() {
    let app = spawn_app().await;

    for path in ["/", "/contacts", "/reports/1", "/admin"] {
        let response = app.client.get(app.url(path)).send().await.unwrap();
        assert_eq!(response.status().as_u16(), 401, "GET {} without a token", path);
    }

    let response = app.get("garbage.token.value", "/contacts").await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn admin_routes_forbid_regular_users() {
    let app = spawn_app().await;
    let token = app.user_token().await;

    let response = app.get(&token, "/admin").await;
    assert_eq!(response.status().as_u16(), 403);

    let response = app.get(&token, "/admin/users").await;
    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn admin_dashboard_counts_users_contacts_companies() {
    let app = spawn_app().await;
    let user = app.user_token().await;
    let admin = app.admin_token().await;

    app.create_contact(&user, "John", "Doe").await;
    app.create_contact(&user, "Jane", "Roe").await;
    let response = app
        .post(&user, "/companies", serde_json::json!({ "name": "Acme" }))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let response = app.get(&admin, "/admin").await;
    assert_eq!(response.status().as_u16(), 200);
    let stats: serde_json::Value = response.json().await.unwrap();

    assert_eq!(stats["users_count"], 2);
    assert_eq!(stats["contacts_count"], 2);
    assert_eq!(stats["companies_count"], 1);
}

#[tokio::test]
async fn admin_manages_users() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;

    let response = app
        .post(
            &admin,
            "/admin/users",
            serde_json::json!({
                "username": "managed_user",
                "password": PASSWORD,
                "roles": ["ADMIN"]
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);
    let created: serde_json::Value = response.json().await.unwrap();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["roles"], serde_json::json!(["ADMIN"]));

    let response = app
        .put(
            &admin,
            &format!("/admin/users/{}", id),
            serde_json::json!({ "first_name": "Managed", "is_active": false }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let updated: serde_json::Value = response.json().await.unwrap();
    assert_eq!(updated["first_name"], "Managed");
    assert_eq!(updated["is_active"], false);

    // Deactivated users cannot sign in
    let response = app
        .client
        .post(app.url("/login"))
        .json(&serde_json::json!({ "username": "managed_user", "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let response = app.delete(&admin, &format!("/admin/users/{}", id)).await;
    assert_eq!(response.status().as_u16(), 204);

    let users: Vec<serde_json::Value> = app.get(&admin, "/admin/users").await.json().await.unwrap();
    assert!(users.iter().all(|u| u["id"].as_i64() != Some(id)));
}

#[tokio::test]
async fn admin_cannot_delete_self() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;

    let users: Vec<serde_json::Value> = app.get(&admin, "/admin/users").await.json().await.unwrap();
    let own_id = users[0]["id"].as_i64().unwrap();

    let response = app.delete(&admin, &format!("/admin/users/{}", own_id)).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn user_dashboard_reports_counts() {
    let app = spawn_app().await;
    let token = app.user_token().await;

    let id = app.create_contact(&token, "John", "Doe").await;
    app.create_contact(&token, "Jane", "Roe").await;
    app.post(&token, &format!("/contacts/{}/favorite", id), serde_json::json!({}))
        .await;

    let response = app.get(&token, "/").await;
    assert_eq!(response.status().as_u16(), 200);
    let stats: serde_json::Value = response.json().await.unwrap();

    assert_eq!(stats["contacts_count"], 2);
    assert_eq!(stats["companies_count"], 0);
    assert_eq!(stats["favorites_count"], 1);
    assert_eq!(stats["upcoming_birthdays"], 0);
    assert_eq!(stats["birthday_window_days"], 14);
}
