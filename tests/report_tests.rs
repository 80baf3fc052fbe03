// tests/report_tests.rs

mod common;

use std::time::Duration;

use common::{spawn_app, test_pool};
use contact_hub::{error::AppError, models::report::ReportStatus, repository, services};
use serde_json::Value;

#[tokio::test]
async fn report_request_redirects_and_completes() {
    let app = spawn_app().await;
    let token = app.user_token().await;
    app.create_contact(&token, "John", "Doe").await;
    app.create_contact(&token, "Jane", "<script>alert(1)</script>").await;

    let response = app.get(&token, "/reports").await;
    assert_eq!(response.status().as_u16(), 303);
    let location = response
        .headers()
        .get(reqwest::header::LOCATION)
        .expect("Location header missing")
        .to_str()
        .unwrap()
        .to_string();
    assert!(location.starts_with("/reports/"));

    let mut report = Value::Null;
    for _ in 0..50 {
        let response = app.get(&token, &location).await;
        assert_eq!(response.status().as_u16(), 200);
        report = response.json().await.unwrap();
        if report["status"] != "CREATED" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    assert_eq!(report["status"], "COMPLETED");
    let content = report["content"].as_str().unwrap();
    assert!(content.contains("<table>"));
    assert!(content.contains("Contacts: 2"));
    assert!(!content.contains("<script>"), "Stored values must be escaped");
}

#[tokio::test]
async fn unknown_report_is_not_found() {
    let app = spawn_app().await;
    let token = app.user_token().await;

    let response = app.get(&token, "/reports/424242").await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn in_progress_report_shows_message() {
    let app = spawn_app().await;
    let token = app.user_token().await;
    let report = services::report::create(&app.pool).await.unwrap();

    let body: Value = app
        .get(&token, &format!("/reports/{}", report.id))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "CREATED");
    assert_eq!(body["report_id"], report.id);
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
}

#[tokio::test]
async fn failed_generation_stores_error_without_content() {
    let pool = test_pool().await;
    let report = services::report::create(&pool).await.unwrap();

    let status = services::report::run_generation(&pool, report.id, async {
        Err(AppError::InternalServerError("source unavailable".to_string()))
    })
    .await
    .unwrap();
    assert_eq!(status, ReportStatus::Error);

    let stored = services::report::get(&pool, report.id).await.unwrap();
    assert_eq!(stored.status, ReportStatus::Error);
    assert!(stored.content.is_none());
}

#[tokio::test]
async fn terminal_report_is_never_regenerated() {
    let pool = test_pool().await;
    let report = services::report::create(&pool).await.unwrap();

    let status = services::report::run_generation(&pool, report.id, async { Ok("<p>done</p>".to_string()) })
        .await
        .unwrap();
    assert_eq!(status, ReportStatus::Completed);

    let status = services::report::run_generation(&pool, report.id, async {
        Err(AppError::InternalServerError("late failure".to_string()))
    })
    .await
    .unwrap();
    assert_eq!(status, ReportStatus::Completed);

    let stored = services::report::get(&pool, report.id).await.unwrap();
    assert_eq!(stored.status, ReportStatus::Completed);
    assert_eq!(stored.content.as_deref(), Some("<p>done</p>"));
}

#[tokio::test]
async fn collected_data_matches_store() {
    let pool = test_pool().await;
    let app_user = contact_hub::models::user::CreateUserRequest {
        username: "reporter".to_string(),
        password: "password123".to_string(),
        first_name: None,
        last_name: None,
    };
    services::user::register(&pool, &app_user).await.unwrap();

    let data = services::report::collect_data(&pool).await.unwrap();
    assert_eq!(data.user_count, 1);
    assert!(data.contacts.is_empty());
    assert!(data.total_millis >= data.users_millis.max(data.contacts_millis));

    let html = services::report::render(&data);
    assert!(html.contains("Users: 1"));
}

#[tokio::test]
async fn unstorable_content_marks_report_as_error() {
    let pool = test_pool().await;
    let report = services::report::create(&pool).await.unwrap();

    // Reject the COMPLETED write only, as a failing disk or constraint would.
    sqlx::query(
        r#"
        CREATE TRIGGER reject_completed BEFORE UPDATE ON reports
        WHEN NEW.status = 'COMPLETED'
        BEGIN
            SELECT RAISE(ABORT, 'write rejected');
        END
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    let status = services::report::run_generation(&pool, report.id, async { Ok("<p>lost</p>".to_string()) })
        .await
        .unwrap();
    assert_eq!(status, ReportStatus::Error);

    let stored = services::report::get(&pool, report.id).await.unwrap();
    assert_eq!(stored.status, ReportStatus::Error);
    assert!(stored.content.is_none());
}

#[tokio::test]
async fn run_that_loses_the_race_returns_stored_status() {
    let pool = test_pool().await;
    let report_id = services::report::create(&pool).await.unwrap().id;

    let content = {
        let pool = pool.clone();
        async move {
            // Another run finishes the report while this one is rendering.
            repository::report::finish(&pool, report_id, ReportStatus::Error, None)
                .await
                .unwrap();
            Ok("<p>too late</p>".to_string())
        }
    };

    let status = services::report::run_generation(&pool, report_id, content).await.unwrap();
    assert_eq!(status, ReportStatus::Error);

    let stored = services::report::get(&pool, report_id).await.unwrap();
    assert!(stored.content.is_none());
}
