use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::contact_detail::{ContactDetail, ContactDetailForm},
    repository,
};

pub async fn list_by_contact(pool: &SqlitePool, contact_id: i64) -> Result<Vec<ContactDetail>, AppError> {
    Ok(repository::contact_detail::list_by_contact(pool, contact_id).await?)
}

pub async fn list_primary_by_contact(pool: &SqlitePool, contact_id: i64) -> Result<Vec<ContactDetail>, AppError> {
    Ok(repository::contact_detail::list_primary_by_contact(pool, contact_id).await?)
}

pub async fn create(pool: &SqlitePool, contact_id: i64, form: &ContactDetailForm) -> Result<ContactDetail, AppError> {
    if !repository::contact::exists(pool, contact_id).await? {
        return Err(AppError::not_found("Contact", contact_id));
    }

    let detail = repository::contact_detail::insert(pool, contact_id, form).await?;
    tracing::info!(
        "Contact detail created. ID: {}, contact: {}, type: {:?}",
        detail.id,
        contact_id,
        detail.detail_type
    );
    Ok(detail)
}

pub async fn update(pool: &SqlitePool, id: i64, form: &ContactDetailForm) -> Result<ContactDetail, AppError> {
    let detail = repository::contact_detail::update(pool, id, form)
        .await?
        .ok_or_else(|| AppError::not_found("Contact detail", id))?;
    tracing::info!("Contact detail updated. ID: {}", id);
    Ok(detail)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    if repository::contact_detail::delete(pool, id).await? == 0 {
        return Err(AppError::not_found("Contact detail", id));
    }
    tracing::info!("Contact detail deleted. ID: {}", id);
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<ContactDetail, AppError> {
    repository::contact_detail::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Contact detail", id))
}
