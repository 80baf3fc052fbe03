use sqlx::SqlitePool;

use crate::{
    error::{AppError, is_unique_violation},
    models::tag::{ContactTag, ContactTagView, Tag, TagRequest},
    repository,
};

fn duplicate_name(name: &str) -> AppError {
    AppError::IllegalState(format!("Tag '{}' already exists", name))
}

pub async fn create(pool: &SqlitePool, req: &TagRequest) -> Result<Tag, AppError> {
    let name = req.name.trim();
    let tag = repository::tag::insert(pool, req).await.map_err(|e| {
        if is_unique_violation(&e) {
            tracing::warn!("Tag '{}' already exists", name);
            duplicate_name(name)
        } else {
            AppError::from(e)
        }
    })?;

    tracing::info!("Tag created. ID: {}, name: {}", tag.id, tag.name);
    Ok(tag)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Tag, AppError> {
    repository::tag::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Tag", id))
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Tag, AppError> {
    repository::tag::find_by_name(pool, name.trim())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Tag not found with name: {}", name.trim())))
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<Tag>, AppError> {
    Ok(repository::tag::list(pool).await?)
}

pub async fn update(pool: &SqlitePool, id: i64, req: &TagRequest) -> Result<Tag, AppError> {
    let name = req.name.trim();
    let tag = repository::tag::update(pool, id, req)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_name(name)
            } else {
                AppError::from(e)
            }
        })?
        .ok_or_else(|| AppError::not_found("Tag", id))?;

    tracing::info!("Tag updated. ID: {}", id);
    Ok(tag)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    if repository::tag::delete(pool, id).await? == 0 {
        return Err(AppError::not_found("Tag", id));
    }
    tracing::info!("Tag deleted. ID: {}", id);
    Ok(())
}

/// Attaches an existing tag, looked up by name, to the contact.
pub async fn attach_to_contact(pool: &SqlitePool, contact_id: i64, tag_name: &str) -> Result<ContactTag, AppError> {
    if !repository::contact::exists(pool, contact_id).await? {
        return Err(AppError::not_found("Contact", contact_id));
    }
    let tag = find_by_name(pool, tag_name).await?;

    if repository::tag::is_attached(pool, contact_id, tag.id).await? {
        return Err(AppError::IllegalState(format!(
            "Tag '{}' is already attached to contact {}",
            tag.name, contact_id
        )));
    }

    let link = repository::tag::attach(pool, contact_id, tag.id)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::IllegalState(format!(
                    "Tag '{}' is already attached to contact {}",
                    tag.name, contact_id
                ))
            } else {
                AppError::from(e)
            }
        })?;

    tracing::info!("Tag '{}' attached to contact {}", tag.name, contact_id);
    Ok(link)
}

pub async fn list_by_contact(pool: &SqlitePool, contact_id: i64) -> Result<Vec<Tag>, AppError> {
    Ok(repository::tag::list_by_contact(pool, contact_id).await?)
}

pub async fn list_links_by_contact(pool: &SqlitePool, contact_id: i64) -> Result<Vec<ContactTagView>, AppError> {
    Ok(repository::tag::list_links_by_contact(pool, contact_id).await?)
}

pub async fn detach(pool: &SqlitePool, contact_tag_id: i64) -> Result<(), AppError> {
    if repository::tag::detach(pool, contact_tag_id).await? == 0 {
        return Err(AppError::not_found("Contact tag", contact_tag_id));
    }
    tracing::info!("Contact tag deleted. ID: {}", contact_tag_id);
    Ok(())
}
