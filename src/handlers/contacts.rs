// src/handlers/contacts.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::{
        company::ContactCompanyForm,
        contact::{ContactSearchParams, CreateContactRequest, PageParams, UpdateContactRequest, WindowParams},
        contact_detail::ContactDetailForm,
        tag::AttachTagRequest,
    },
    services,
};

/// Lists contacts, filtered by `q`, `company` and `tag`, one page at a time.
pub async fn list_contacts(
    State(pool): State<SqlitePool>,
    Query(params): Query<ContactSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = services::contact::search(&pool, &params).await?;
    Ok(Json(page))
}

/// Creates a contact along with any nested details, companies, profiles, tags, events and notes.
pub async fn create_contact(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateContactRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let details = services::contact::create(&pool, &payload).await?;

    Ok((StatusCode::CREATED, Json(details)))
}

pub async fn list_favorites(
    State(pool): State<SqlitePool>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = services::contact::favorites(&pool, params.page, params.size).await?;
    Ok(Json(page))
}

/// Contacts with a birthday in the next `days` days (configured window by default).
pub async fn list_upcoming_birthdays(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Query(params): Query<WindowParams>,
) -> Result<impl IntoResponse, AppError> {
    let days = params.days.unwrap_or(config.birthday_window_days);
    if days < 0 {
        return Err(AppError::BadRequest("days must not be negative".to_string()));
    }

    let contacts =
        services::contact::find_with_upcoming_birthdays(&pool, services::event::today(), days).await?;
    Ok(Json(contacts))
}

pub async fn get_contact(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let details = services::contact::full_details(&pool, id).await?;
    Ok(Json(details))
}

pub async fn update_contact(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateContactRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let contact = services::contact::update(&pool, id, &payload).await?;
    Ok(Json(contact))
}

pub async fn delete_contact(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    services::contact::delete(&pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_favorite(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let contact = services::contact::set_favorite(&pool, id, true).await?;
    Ok(Json(contact))
}

pub async fn remove_favorite(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let contact = services::contact::set_favorite(&pool, id, false).await?;
    Ok(Json(contact))
}

#[derive(Debug, Deserialize)]
pub struct DetailFilter {
    #[serde(default)]
    pub primary: bool,
}

pub async fn list_details(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Query(filter): Query<DetailFilter>,
) -> Result<impl IntoResponse, AppError> {
    services::contact::find_by_id(&pool, id).await?;

    let details = if filter.primary {
        services::contact_detail::list_primary_by_contact(&pool, id).await?
    } else {
        services::contact_detail::list_by_contact(&pool, id).await?
    };
    Ok(Json(details))
}

pub async fn add_detail(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<ContactDetailForm>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let detail = services::contact_detail::create(&pool, id, &payload).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

pub async fn list_companies(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    services::contact::find_by_id(&pool, id).await?;

    let companies = services::contact_company::list_by_contact(&pool, id).await?;
    Ok(Json(companies))
}

/// The contact's current employment, or 404 when none is marked current.
pub async fn current_company(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    services::contact::find_by_id(&pool, id).await?;

    let current = services::contact_company::find_current(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Contact {} has no current company", id)))?;
    Ok(Json(current))
}

pub async fn add_company(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<ContactCompanyForm>,
) -> Result<impl IntoResponse, AppError> {
    let link = services::contact_company::create(&pool, id, &payload).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

pub async fn list_tags(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    services::contact::find_by_id(&pool, id).await?;

    let tags = services::tag::list_links_by_contact(&pool, id).await?;
    Ok(Json(tags))
}

/// Attaches an existing tag by name.
pub async fn attach_tag(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<AttachTagRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let link = services::tag::attach_to_contact(&pool, id, &payload.tag_name).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

pub async fn list_notes(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    services::contact::find_by_id(&pool, id).await?;

    let notes = services::note::list_by_contact(&pool, id).await?;
    Ok(Json(notes))
}

pub async fn list_events(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    services::contact::find_by_id(&pool, id).await?;

    let events = services::event::list_by_contact(&pool, id).await?;
    Ok(Json(events))
}

pub async fn get_birthday(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    services::contact::find_by_id(&pool, id).await?;

    let birthday = services::event::birthday_of(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Contact {} has no birthday recorded", id)))?;
    Ok(Json(birthday))
}

pub async fn list_social_profiles(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    services::contact::find_by_id(&pool, id).await?;

    let profiles = services::social_profile::list_by_contact(&pool, id).await?;
    Ok(Json(profiles))
}
