// tests/event_tests.rs

mod common;

use chrono::{Days, Local, NaiveDate};
use common::{spawn_app, test_pool};
use contact_hub::{
    models::{
        contact::CreateContactRequest,
        event::{EventForm, EventType},
    },
    services,
};
use serde_json::{Value, json};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn contact_with_birthday(first_name: &str, birthday: NaiveDate) -> CreateContactRequest {
    CreateContactRequest {
        first_name: first_name.to_string(),
        last_name: "Test".to_string(),
        display_name: None,
        avatar_url: None,
        is_favorite: false,
        companies: vec![],
        contact_details: vec![],
        social_profiles: vec![],
        tag_ids: vec![],
        events: vec![EventForm {
            event_type: EventType::Birthday,
            custom_event_name: None,
            event_date: birthday,
            notes: None,
            yearly_recurrence: false,
        }],
        notes: vec![],
    }
}

#[tokio::test]
async fn second_birthday_is_rejected() {
    let app = spawn_app().await;
    let token = app.user_token().await;
    let id = app.create_contact(&token, "John", "Doe").await;

    let birthday = json!({ "contact_id": id, "event_type": "BIRTHDAY", "event_date": "1990-05-17" });
    let response = app.post(&token, "/events", birthday.clone()).await;
    assert_eq!(response.status().as_u16(), 201);

    let response = app.post(&token, "/events", birthday).await;
    assert_eq!(response.status().as_u16(), 409);

    let found: Value = app
        .get(&token, &format!("/contacts/{}/birthday", id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(found["event_date"], "1990-05-17");
}

#[tokio::test]
async fn updating_the_birthday_itself_is_allowed() {
    let app = spawn_app().await;
    let token = app.user_token().await;
    let id = app.create_contact(&token, "John", "Doe").await;

    let event: Value = app
        .post(
            &token,
            "/events",
            json!({ "contact_id": id, "event_type": "BIRTHDAY", "event_date": "1990-05-17" }),
        )
        .await
        .json()
        .await
        .unwrap();

    let response = app
        .put(
            &token,
            &format!("/events/{}", event["id"].as_i64().unwrap()),
            json!({ "event_type": "BIRTHDAY", "event_date": "1990-05-18" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["event_date"], "1990-05-18");
}

#[tokio::test]
async fn custom_event_name_rules() {
    let app = spawn_app().await;
    let token = app.user_token().await;
    let id = app.create_contact(&token, "John", "Doe").await;

    let response = app
        .post(
            &token,
            "/events",
            json!({ "contact_id": id, "event_type": "CUSTOM", "event_date": "2020-01-01" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 409);

    let response = app
        .post(
            &token,
            "/events",
            json!({
                "contact_id": id,
                "event_type": "ANNIVERSARY",
                "custom_event_name": "Not allowed",
                "event_date": "2020-01-01"
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 409);

    let response = app
        .post(
            &token,
            "/events",
            json!({
                "contact_id": id,
                "event_type": "CUSTOM",
                "custom_event_name": "First day at work",
                "event_date": "2020-01-01",
                "yearly_recurrence": true
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);
}

#[tokio::test]
async fn birthdays_endpoint_uses_window() {
    let app = spawn_app().await;
    let token = app.user_token().await;
    let today = Local::now().date_naive();

    let soon = app.create_contact(&token, "Soon", "Birthday").await;
    let later = app.create_contact(&token, "Later", "Birthday").await;
    let soon_date = today.checked_add_days(Days::new(3)).unwrap();
    let later_date = today.checked_add_days(Days::new(40)).unwrap();

    for (id, date) in [(soon, soon_date), (later, later_date)] {
        let response = app
            .post(
                &token,
                "/events",
                json!({ "contact_id": id, "event_type": "BIRTHDAY", "event_date": date.to_string() }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201);
    }

    let found: Vec<Value> = app.get(&token, "/contacts/birthdays").await.json().await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["contact"]["id"], soon);

    let found: Vec<Value> = app
        .get(&token, "/contacts/birthdays?days=60")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[0]["contact"]["id"], soon);

    let response = app.get(&token, "/contacts/birthdays?days=-1").await;
    assert_eq!(response.status().as_u16(), 400);

    let stats: Value = app.get(&token, "/").await.json().await.unwrap();
    assert_eq!(stats["upcoming_birthdays"], 1);
}

#[tokio::test]
async fn upcoming_events_groups_by_day() {
    let app = spawn_app().await;
    let token = app.user_token().await;
    let today = Local::now().date_naive();
    let in_two_days = today.checked_add_days(Days::new(2)).unwrap();

    let john = app.create_contact(&token, "John", "Doe").await;
    let jane = app.create_contact(&token, "Jane", "Roe").await;
    app.post(
        &token,
        "/events",
        json!({ "contact_id": john, "event_type": "BIRTHDAY", "event_date": in_two_days.to_string() }),
    )
    .await;
    app.post(
        &token,
        "/events",
        json!({ "contact_id": jane, "event_type": "ANNIVERSARY", "event_date": in_two_days.to_string() }),
    )
    .await;

    let days: Vec<Value> = app.get(&token, "/events/upcoming?days=7").await.json().await.unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["date"], in_two_days.to_string());
    assert_eq!(days[0]["events"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn birthday_window_wraps_year_end() {
    let pool = test_pool().await;
    services::contact::create(&pool, &contact_with_birthday("January", date(1990, 1, 3)))
        .await
        .unwrap();
    services::contact::create(&pool, &contact_with_birthday("March", date(1985, 3, 10)))
        .await
        .unwrap();

    let today = date(2025, 12, 28);
    let found = services::contact::find_with_upcoming_birthdays(&pool, today, 14)
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].contact.first_name, "January");
    assert_eq!(
        services::event::count_upcoming_birthdays(&pool, today, 14).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn leap_day_birthday_counts_on_feb_28() {
    let pool = test_pool().await;
    services::contact::create(&pool, &contact_with_birthday("Leap", date(2000, 2, 29)))
        .await
        .unwrap();

    let upcoming = services::event::upcoming_birthdays(&pool, date(2025, 2, 20), 8)
        .await
        .unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].0, date(2025, 2, 28));

    let none = services::event::upcoming_birthdays(&pool, date(2025, 2, 20), 7)
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn one_off_events_only_match_their_exact_date() {
    let pool = test_pool().await;
    let mut request = contact_with_birthday("Once", date(1990, 7, 1));
    request.events.push(EventForm {
        event_type: EventType::Anniversary,
        custom_event_name: None,
        event_date: date(2020, 3, 5),
        notes: None,
        yearly_recurrence: false,
    });
    services::contact::create(&pool, &request).await.unwrap();

    let upcoming = services::event::upcoming(&pool, date(2025, 3, 1), 10).await.unwrap();
    assert!(upcoming.is_empty());

    let upcoming = services::event::upcoming(&pool, date(2020, 3, 1), 10).await.unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].date, date(2020, 3, 5));
}
