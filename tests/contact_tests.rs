// tests/contact_tests.rs

mod common;

use common::spawn_app;
use serde_json::{Value, json};

#[tokio::test]
async fn create_contact_with_nested_records() {
    let app = spawn_app().await;
    let token = app.user_token().await;

    let company: Value = app
        .post(&token, "/companies", json!({ "name": "Acme", "website": "https://acme.example" }))
        .await
        .json()
        .await
        .unwrap();
    let title: Value = app
        .post(&token, "/job-titles", json!({ "title": "Engineer" }))
        .await
        .json()
        .await
        .unwrap();
    let tag: Value = app
        .post(&token, "/tags", json!({ "name": "friends", "color": "#00ff00" }))
        .await
        .json()
        .await
        .unwrap();

    let response = app
        .post(
            &token,
            "/contacts",
            json!({
                "first_name": "John",
                "last_name": "Doe",
                "is_favorite": true,
                "contact_details": [
                    { "detail_type": "EMAIL", "label": "WORK", "value": "john@acme.example", "is_primary": true },
                    { "detail_type": "PHONE", "label": "MOBILE", "value": "+100200300" }
                ],
                "companies": [
                    { "company_id": company["id"], "job_title_id": title["id"], "is_current": true }
                ],
                "social_profiles": [
                    { "platform": "TELEGRAM", "username": "johnny" }
                ],
                "tag_ids": [tag["id"], tag["id"]],
                "events": [
                    { "event_type": "BIRTHDAY", "event_date": "1990-05-17" }
                ],
                "notes": [
                    { "content": "Met at the conference" }
                ]
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let details: Value = response.json().await.unwrap();

    assert_eq!(details["contact"]["display_name"], "John Doe");
    assert_eq!(details["contact"]["is_favorite"], true);
    assert_eq!(details["contact_details"].as_array().unwrap().len(), 2);
    assert_eq!(details["companies"][0]["company_name"], "Acme");
    assert_eq!(details["companies"][0]["job_title"], "Engineer");
    assert_eq!(details["social_profiles"][0]["platform"], "TELEGRAM");
    assert_eq!(details["tags"].as_array().unwrap().len(), 1);
    assert_eq!(details["events"][0]["event_type"], "BIRTHDAY");
    assert_eq!(details["notes"][0]["content"], "Met at the conference");

    let id = details["contact"]["id"].as_i64().unwrap();
    let primary: Vec<Value> = app
        .get(&token, &format!("/contacts/{}/details?primary=true", id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(primary.len(), 1);
    assert_eq!(primary[0]["value"], "john@acme.example");
}

#[tokio::test]
async fn create_contact_with_unknown_tag_rolls_back() {
    let app = spawn_app().await;
    let token = app.user_token().await;

    let response = app
        .post(
            &token,
            "/contacts",
            json!({ "first_name": "Ghost", "last_name": "Tagged", "tag_ids": [9999] }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 404);

    let page: Value = app.get(&token, "/contacts").await.json().await.unwrap();
    assert_eq!(page["total"], 0);
}

#[tokio::test]
async fn create_contact_requires_names() {
    let app = spawn_app().await;
    let token = app.user_token().await;

    let response = app
        .post(&token, "/contacts", json!({ "first_name": "", "last_name": "Doe" }))
        .await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn blank_names_are_rejected() {
    let app = spawn_app().await;
    let token = app.user_token().await;

    let response = app
        .post(&token, "/contacts", json!({ "first_name": "   ", "last_name": "Doe" }))
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let id = app.create_contact(&token, "John", "Doe").await;
    let response = app
        .put(
            &token,
            &format!("/contacts/{}", id),
            json!({ "first_name": "John", "last_name": "\t " }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let page: Value = app.get(&token, "/contacts").await.json().await.unwrap();
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["last_name"], "Doe");
}

#[tokio::test]
async fn huge_page_number_returns_empty_page() {
    let app = spawn_app().await;
    let token = app.user_token().await;
    app.create_contact(&token, "John", "Doe").await;

    let response = app.get(&token, "/contacts?page=922337203685477580&size=100").await;
    assert_eq!(response.status().as_u16(), 200);

    let page: Value = response.json().await.unwrap();
    assert_eq!(page["total"], 1);
    assert_eq!(page["page"], 922337203685477580_i64);
    assert!(page["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn search_filters_by_name_company_and_tag() {
    let app = spawn_app().await;
    let token = app.user_token().await;

    let john = app.create_contact(&token, "John", "Doe").await;
    let jane = app.create_contact(&token, "Jane", "Roe").await;
    app.create_contact(&token, "Bob", "Smith").await;

    let company: Value = app
        .post(&token, "/companies", json!({ "name": "Initech" }))
        .await
        .json()
        .await
        .unwrap();
    let title: Value = app
        .post(&token, "/job-titles", json!({ "title": "Manager" }))
        .await
        .json()
        .await
        .unwrap();
    let response = app
        .post(
            &token,
            &format!("/contacts/{}/companies", jane),
            json!({ "company_id": company["id"], "job_title_id": title["id"], "is_current": true }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);

    app.post(&token, "/tags", json!({ "name": "family" })).await;
    let response = app
        .post(&token, &format!("/contacts/{}/tags", john), json!({ "tag_name": "family" }))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let page: Value = app.get(&token, "/contacts?q=jo").await.json().await.unwrap();
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["id"], john);

    let page: Value = app.get(&token, "/contacts?company=init").await.json().await.unwrap();
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["id"], jane);

    let page: Value = app.get(&token, "/contacts?tag=fam").await.json().await.unwrap();
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["id"], john);

    let page: Value = app.get(&token, "/contacts?size=2").await.json().await.unwrap();
    assert_eq!(page["total"], 3);
    assert_eq!(page["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn favorites_toggle() {
    let app = spawn_app().await;
    let token = app.user_token().await;
    let id = app.create_contact(&token, "John", "Doe").await;

    let contact: Value = app
        .post(&token, &format!("/contacts/{}/favorite", id), json!({}))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(contact["is_favorite"], true);

    let page: Value = app.get(&token, "/contacts/favorites").await.json().await.unwrap();
    assert_eq!(page["total"], 1);

    let contact: Value = app
        .delete(&token, &format!("/contacts/{}/favorite", id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(contact["is_favorite"], false);

    let page: Value = app.get(&token, "/contacts/favorites").await.json().await.unwrap();
    assert_eq!(page["total"], 0);
}

#[tokio::test]
async fn update_and_delete_contact() {
    let app = spawn_app().await;
    let token = app.user_token().await;
    let id = app.create_contact(&token, "John", "Doe").await;
    app.post(&token, "/notes", json!({ "contact_id": id, "content": "first" }))
        .await;

    let response = app
        .put(
            &token,
            &format!("/contacts/{}", id),
            json!({ "first_name": "Johnny", "last_name": "Doe", "display_name": "JD" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["first_name"], "Johnny");
    assert_eq!(updated["display_name"], "JD");

    let response = app.delete(&token, &format!("/contacts/{}", id)).await;
    assert_eq!(response.status().as_u16(), 204);

    let response = app.get(&token, &format!("/contacts/{}", id)).await;
    assert_eq!(response.status().as_u16(), 404);

    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE contact_id = ?")
        .bind(id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(orphans, 0);
}

#[tokio::test]
async fn only_one_current_company() {
    let app = spawn_app().await;
    let token = app.user_token().await;
    let id = app.create_contact(&token, "John", "Doe").await;

    let first: Value = app
        .post(&token, "/companies", json!({ "name": "First Corp" }))
        .await
        .json()
        .await
        .unwrap();
    let second: Value = app
        .post(&token, "/companies", json!({ "name": "Second Corp" }))
        .await
        .json()
        .await
        .unwrap();
    let title: Value = app
        .post(&token, "/job-titles", json!({ "title": "Developer" }))
        .await
        .json()
        .await
        .unwrap();

    for company in [&first, &second] {
        let response = app
            .post(
                &token,
                &format!("/contacts/{}/companies", id),
                json!({ "company_id": company["id"], "job_title_id": title["id"], "is_current": true }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201);
    }

    let links: Vec<Value> = app
        .get(&token, &format!("/contacts/{}/companies", id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links.iter().filter(|l| l["is_current"] == true).count(), 1);

    let current: Value = app
        .get(&token, &format!("/contacts/{}/companies/current", id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(current["company_name"], "Second Corp");
}

#[tokio::test]
async fn company_names_are_unique() {
    let app = spawn_app().await;
    let token = app.user_token().await;

    let response = app.post(&token, "/companies", json!({ "name": "Acme" })).await;
    assert_eq!(response.status().as_u16(), 201);
    let response = app.post(&token, "/companies", json!({ "name": "Acme" })).await;
    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn job_title_creation_reuses_existing() {
    let app = spawn_app().await;
    let token = app.user_token().await;

    let response = app.post(&token, "/job-titles", json!({ "title": "CTO" })).await;
    assert_eq!(response.status().as_u16(), 201);
    let first: Value = response.json().await.unwrap();

    let response = app.post(&token, "/job-titles", json!({ "title": "CTO" })).await;
    assert_eq!(response.status().as_u16(), 200);
    let second: Value = response.json().await.unwrap();

    assert_eq!(first["id"], second["id"]);
}

#[tokio::test]
async fn attaching_a_tag_twice_conflicts() {
    let app = spawn_app().await;
    let token = app.user_token().await;
    let id = app.create_contact(&token, "John", "Doe").await;
    app.post(&token, "/tags", json!({ "name": "vip" })).await;

    let path = format!("/contacts/{}/tags", id);
    let response = app.post(&token, &path, json!({ "tag_name": "vip" })).await;
    assert_eq!(response.status().as_u16(), 201);
    let link: Value = response.json().await.unwrap();

    let response = app.post(&token, &path, json!({ "tag_name": "vip" })).await;
    assert_eq!(response.status().as_u16(), 409);

    let response = app.post(&token, &path, json!({ "tag_name": "unknown" })).await;
    assert_eq!(response.status().as_u16(), 404);

    let response = app
        .delete(&token, &format!("/contact-tags/{}", link["id"].as_i64().unwrap()))
        .await;
    assert_eq!(response.status().as_u16(), 204);

    let links: Vec<Value> = app.get(&token, &path).await.json().await.unwrap();
    assert!(links.is_empty());
}

#[tokio::test]
async fn note_cannot_move_between_contacts() {
    let app = spawn_app().await;
    let token = app.user_token().await;
    let john = app.create_contact(&token, "John", "Doe").await;
    let jane = app.create_contact(&token, "Jane", "Roe").await;

    let note: Value = app
        .post(&token, "/notes", json!({ "contact_id": john, "content": "Call back" }))
        .await
        .json()
        .await
        .unwrap();
    let path = format!("/notes/{}", note["id"].as_i64().unwrap());

    let response = app
        .put(&token, &path, json!({ "contact_id": jane, "content": "Hijacked" }))
        .await;
    assert_eq!(response.status().as_u16(), 409);

    let response = app
        .put(&token, &path, json!({ "contact_id": john, "content": "Call back tomorrow" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["content"], "Call back tomorrow");

    let response = app
        .post(&token, "/notes", json!({ "contact_id": 9999, "content": "Nobody" }))
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn social_profile_custom_platform_rules() {
    let app = spawn_app().await;
    let token = app.user_token().await;
    let id = app.create_contact(&token, "John", "Doe").await;

    let response = app
        .post(&token, "/social-profiles", json!({ "contact_id": id, "platform": "CUSTOM" }))
        .await;
    assert_eq!(response.status().as_u16(), 409);

    let response = app
        .post(
            &token,
            "/social-profiles",
            json!({ "contact_id": id, "platform": "CUSTOM", "custom_platform_name": "Mastodon", "username": "jd" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let profiles: Vec<Value> = app
        .get(&token, &format!("/contacts/{}/social-profiles", id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0]["custom_platform_name"], "Mastodon");
}
