use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::note::{CreateNoteRequest, Note, UpdateNoteRequest},
    repository,
};

pub async fn create(pool: &SqlitePool, req: &CreateNoteRequest) -> Result<Note, AppError> {
    if !repository::contact::exists(pool, req.contact_id).await? {
        return Err(AppError::not_found("Contact", req.contact_id));
    }

    let note = repository::note::insert(pool, req.contact_id, req.note.content.trim()).await?;
    tracing::info!("Note created. ID: {}, contact: {}", note.id, note.contact_id);
    Ok(note)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Note, AppError> {
    repository::note::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Note", id))
}

pub async fn list_by_contact(pool: &SqlitePool, contact_id: i64) -> Result<Vec<Note>, AppError> {
    Ok(repository::note::list_by_contact(pool, contact_id).await?)
}

/// Rewrites the note. The note must belong to `req.contact_id`.
pub async fn update(pool: &SqlitePool, id: i64, req: &UpdateNoteRequest) -> Result<Note, AppError> {
    let existing = find_by_id(pool, id).await?;

    if existing.contact_id != req.contact_id {
        tracing::warn!(
            "Note {} belongs to contact {}, not {}",
            id,
            existing.contact_id,
            req.contact_id
        );
        return Err(AppError::IllegalState(format!(
            "Note {} does not belong to contact {}",
            id, req.contact_id
        )));
    }

    let note = repository::note::update_content(pool, id, req.note.content.trim())
        .await?
        .ok_or_else(|| AppError::not_found("Note", id))?;
    tracing::info!("Note updated. ID: {}", id);
    Ok(note)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    if repository::note::delete(pool, id).await? == 0 {
        return Err(AppError::not_found("Note", id));
    }
    tracing::info!("Note deleted. ID: {}", id);
    Ok(())
}
