use sqlx::{SqliteConnection, SqlitePool};

use crate::{
    error::{AppError, is_foreign_key_violation},
    mapper::merge_contact_company,
    models::company::{ContactCompany, ContactCompanyForm, ContactCompanyView, UpdateContactCompanyRequest},
    repository::{self, contact_company::ContactCompanyFields},
};

fn missing_reference(e: sqlx::Error) -> AppError {
    if is_foreign_key_violation(&e) {
        AppError::BadRequest("Company or job title does not exist".to_string())
    } else {
        AppError::from(e)
    }
}

/// Inserts an employment record. A current record clears the flag on the contact's others.
pub async fn create_for_contact(
    conn: &mut SqliteConnection,
    contact_id: i64,
    fields: ContactCompanyFields,
) -> Result<ContactCompany, AppError> {
    if !repository::contact::exists(&mut *conn, contact_id).await? {
        return Err(AppError::not_found("Contact", contact_id));
    }

    if fields.is_current {
        repository::contact_company::clear_current(&mut *conn, contact_id, None).await?;
    }

    let link = repository::contact_company::insert(&mut *conn, contact_id, fields)
        .await
        .map_err(missing_reference)?;
    tracing::info!(
        "Contact {} linked to company {} (current: {})",
        contact_id,
        link.company_id,
        link.is_current
    );
    Ok(link)
}

pub async fn create(
    pool: &SqlitePool,
    contact_id: i64,
    form: &ContactCompanyForm,
) -> Result<ContactCompany, AppError> {
    let mut tx = pool.begin().await?;
    let link = create_for_contact(&mut tx, contact_id, ContactCompanyFields::from(form)).await?;
    tx.commit().await?;
    Ok(link)
}

pub async fn list_by_contact(pool: &SqlitePool, contact_id: i64) -> Result<Vec<ContactCompanyView>, AppError> {
    Ok(repository::contact_company::list_by_contact(pool, contact_id).await?)
}

pub async fn find_current(pool: &SqlitePool, contact_id: i64) -> Result<Option<ContactCompanyView>, AppError> {
    Ok(repository::contact_company::find_current(pool, contact_id).await?)
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    req: &UpdateContactCompanyRequest,
) -> Result<ContactCompany, AppError> {
    let existing = repository::contact_company::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Contact company", id))?;
    let fields = merge_contact_company(&existing, req);

    let mut tx = pool.begin().await?;
    if fields.is_current {
        repository::contact_company::clear_current(&mut *tx, existing.contact_id, Some(id)).await?;
    }
    let link = repository::contact_company::update(&mut *tx, id, fields)
        .await
        .map_err(missing_reference)?
        .ok_or_else(|| AppError::not_found("Contact company", id))?;
    tx.commit().await?;

    tracing::info!("Contact company updated. ID: {}", id);
    Ok(link)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    if repository::contact_company::delete(pool, id).await? == 0 {
        return Err(AppError::not_found("Contact company", id));
    }
    tracing::info!("Contact company deleted. ID: {}", id);
    Ok(())
}
