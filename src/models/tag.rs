use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::validation::{validate_hex_color, validate_not_blank};

/// Represents the 'tags' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,

    /// Unique tag name.
    pub name: String,

    /// `#rrggbb`
    pub color: Option<String>,

    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TagRequest {
    #[validate(
        length(min = 1, max = 50, message = "Tag name is required"),
        custom(function = validate_not_blank)
    )]
    pub name: String,

    #[validate(custom(function = validate_hex_color))]
    pub color: Option<String>,

    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// Represents the 'contact_tags' table: a tag attached to a contact.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ContactTag {
    pub id: i64,
    pub contact_id: i64,
    pub tag_id: i64,
    pub created_at: DateTime<Utc>,
}

/// DTO for attaching a tag to a contact by its name.
#[derive(Debug, Deserialize, Validate)]
pub struct AttachTagRequest {
    #[validate(length(min = 1, max = 50))]
    pub tag_name: String,
}

/// Contact-tag link joined with the tag it points to.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactTagView {
    /// Link id, used to detach the tag.
    pub id: i64,
    pub contact_id: i64,
    pub tag_id: i64,
    pub tag_name: String,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}
