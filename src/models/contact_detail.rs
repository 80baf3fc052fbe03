// src/models/contact_detail.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::validation::validate_not_blank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetailType {
    Email,
    Phone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetailLabel {
    Home,
    Work,
    Mobile,
    Main,
}

/// Represents the 'contact_details' table: one way of reaching a contact.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ContactDetail {
    pub id: i64,
    pub contact_id: i64,
    pub detail_type: DetailType,
    pub label: DetailLabel,
    pub value: String,
    pub is_primary: bool,
}

/// DTO for creating or replacing a contact detail.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactDetailForm {
    pub detail_type: DetailType,
    pub label: DetailLabel,

    #[validate(
        length(min = 1, max = 255, message = "Value is required"),
        custom(function = validate_not_blank)
    )]
    pub value: String,

    #[serde(default)]
    pub is_primary: bool,
}
