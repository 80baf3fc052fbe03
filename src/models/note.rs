use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::validation::validate_not_blank;

/// Represents the 'notes' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub contact_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NoteForm {
    #[validate(
        length(min = 1, max = 10000, message = "Note content is required"),
        custom(function = validate_not_blank)
    )]
    pub content: String,
}

/// DTO for `POST /notes`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateNoteRequest {
    pub contact_id: i64,

    #[serde(flatten)]
    #[validate(nested)]
    pub note: NoteForm,
}

/// DTO for `PUT /notes/{id}`. The contact id guards against editing another contact's note.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateNoteRequest {
    pub contact_id: i64,

    #[serde(flatten)]
    #[validate(nested)]
    pub note: NoteForm,
}
