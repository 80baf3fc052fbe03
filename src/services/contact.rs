use std::collections::BTreeSet;

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::{
    error::{AppError, is_foreign_key_violation},
    models::contact::{
        Contact, ContactFullDetails, ContactSearchParams, ContactWithBirthday, CreateContactRequest, Page,
        UpdateContactRequest,
    },
    repository::{
        self,
        contact::{ContactFields, ContactFilter},
        contact_company::ContactCompanyFields,
    },
    services::{self, fragment, page_bounds},
};

/// Creates the contact and everything nested in the request in one transaction.
pub async fn create(pool: &SqlitePool, req: &CreateContactRequest) -> Result<ContactFullDetails, AppError> {
    let mut tx = pool.begin().await?;

    let contact = repository::contact::insert(&mut *tx, &ContactFields::from(req)).await?;
    let contact_id = contact.id;

    for detail in &req.contact_details {
        repository::contact_detail::insert(&mut *tx, contact_id, detail).await?;
    }

    for company in &req.companies {
        services::contact_company::create_for_contact(&mut tx, contact_id, ContactCompanyFields::from(company))
            .await?;
    }

    for profile in &req.social_profiles {
        services::social_profile::create_for_contact(&mut tx, contact_id, profile).await?;
    }

    let tag_ids: BTreeSet<i64> = req.tag_ids.iter().copied().collect();
    for tag_id in tag_ids {
        repository::tag::attach(&mut *tx, contact_id, tag_id)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::not_found("Tag", tag_id)
                } else {
                    AppError::from(e)
                }
            })?;
    }

    for event in &req.events {
        services::event::create_for_contact(&mut tx, contact_id, event).await?;
    }

    for note in &req.notes {
        repository::note::insert(&mut *tx, contact_id, note.content.trim()).await?;
    }

    tx.commit().await?;

    tracing::info!("Contact created. ID: {}, name: {}", contact_id, contact.full_name());
    full_details(pool, contact_id).await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Contact, AppError> {
    repository::contact::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Contact", id))
}

pub async fn full_details(pool: &SqlitePool, id: i64) -> Result<ContactFullDetails, AppError> {
    let contact = find_by_id(pool, id).await?;

    Ok(ContactFullDetails {
        contact_details: repository::contact_detail::list_by_contact(pool, id).await?,
        companies: repository::contact_company::list_by_contact(pool, id).await?,
        social_profiles: repository::social_profile::list_by_contact(pool, id).await?,
        events: repository::event::list_by_contact(pool, id).await?,
        notes: repository::note::list_by_contact(pool, id).await?,
        tags: repository::tag::list_by_contact(pool, id).await?,
        contact,
    })
}

pub async fn update(pool: &SqlitePool, id: i64, req: &UpdateContactRequest) -> Result<Contact, AppError> {
    let contact = repository::contact::update(pool, id, &ContactFields::from(req))
        .await?
        .ok_or_else(|| AppError::not_found("Contact", id))?;
    tracing::info!("Contact updated. ID: {}", id);
    Ok(contact)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    if repository::contact::delete(pool, id).await? == 0 {
        return Err(AppError::not_found("Contact", id));
    }
    tracing::info!("Contact deleted. ID: {}", id);
    Ok(())
}

pub async fn search(pool: &SqlitePool, params: &ContactSearchParams) -> Result<Page<Contact>, AppError> {
    let filter = ContactFilter {
        term: fragment(params.q.as_deref()),
        company: fragment(params.company.as_deref()),
        tag: fragment(params.tag.as_deref()),
        favorites_only: false,
    };
    list_page(pool, &filter, params.page, params.size).await
}

pub async fn favorites(pool: &SqlitePool, page: Option<i64>, size: Option<i64>) -> Result<Page<Contact>, AppError> {
    let filter = ContactFilter {
        favorites_only: true,
        ..ContactFilter::default()
    };
    list_page(pool, &filter, page, size).await
}

async fn list_page(
    pool: &SqlitePool,
    filter: &ContactFilter,
    page: Option<i64>,
    size: Option<i64>,
) -> Result<Page<Contact>, AppError> {
    let (page, size, offset) = page_bounds(page, size);
    let (items, total) = repository::contact::search(pool, filter, size, offset).await?;
    tracing::debug!("Contact listing page {} returned {} of {}", page, items.len(), total);
    Ok(Page {
        items,
        page,
        size,
        total,
    })
}

pub async fn set_favorite(pool: &SqlitePool, id: i64, favorite: bool) -> Result<Contact, AppError> {
    let contact = repository::contact::set_favorite(pool, id, favorite)
        .await?
        .ok_or_else(|| AppError::not_found("Contact", id))?;
    tracing::info!("Contact {} favorite: {}", id, favorite);
    Ok(contact)
}

pub async fn count_total(pool: &SqlitePool) -> Result<i64, AppError> {
    Ok(repository::contact::count(pool).await?)
}

pub async fn count_favorites(pool: &SqlitePool) -> Result<i64, AppError> {
    Ok(repository::contact::count_favorites(pool).await?)
}

pub async fn find_by_tag(pool: &SqlitePool, tag_id: i64) -> Result<Vec<Contact>, AppError> {
    services::tag::find_by_id(pool, tag_id).await?;
    Ok(repository::contact::find_by_tag(pool, tag_id).await?)
}

/// Contacts whose birthday is within `[today, today + days]`, soonest first.
pub async fn find_with_upcoming_birthdays(
    pool: &SqlitePool,
    today: NaiveDate,
    days: i64,
) -> Result<Vec<ContactWithBirthday>, AppError> {
    let birthdays = services::event::upcoming_birthdays(pool, today, days).await?;

    let mut result = Vec::with_capacity(birthdays.len());
    for (_, birthday) in birthdays {
        if let Some(contact) = repository::contact::find_by_id(pool, birthday.contact_id).await? {
            result.push(ContactWithBirthday {
                contact,
                birthday: Some(birthday),
            });
        }
    }
    Ok(result)
}
