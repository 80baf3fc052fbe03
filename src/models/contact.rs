// src/models/contact.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::{
    company::{ContactCompanyForm, ContactCompanyView},
    contact_detail::{ContactDetail, ContactDetailForm},
    event::{Event, EventForm},
    note::{Note, NoteForm},
    social_profile::{SocialProfile, SocialProfileForm},
    tag::Tag,
    validation::{validate_not_blank, validate_url_string},
};

/// Represents the 'contacts' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,

    /// Falls back to "first last" when not supplied on creation.
    pub display_name: Option<String>,

    pub avatar_url: Option<String>,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// DTO for creating a contact, optionally together with everything attached to it.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateContactRequest {
    #[validate(
        length(min = 1, max = 100, message = "First name is required"),
        custom(function = validate_not_blank)
    )]
    pub first_name: String,

    #[validate(
        length(min = 1, max = 100, message = "Last name is required"),
        custom(function = validate_not_blank)
    )]
    pub last_name: String,

    #[validate(length(max = 200))]
    pub display_name: Option<String>,

    #[validate(length(max = 500), custom(function = validate_url_string))]
    pub avatar_url: Option<String>,

    #[serde(default)]
    pub is_favorite: bool,

    #[serde(default)]
    #[validate(nested)]
    pub companies: Vec<ContactCompanyForm>,

    #[serde(default)]
    #[validate(nested)]
    pub contact_details: Vec<ContactDetailForm>,

    #[serde(default)]
    #[validate(nested)]
    pub social_profiles: Vec<SocialProfileForm>,

    #[serde(default)]
    pub tag_ids: Vec<i64>,

    #[serde(default)]
    #[validate(nested)]
    pub events: Vec<EventForm>,

    #[serde(default)]
    #[validate(nested)]
    pub notes: Vec<NoteForm>,
}

/// DTO for updating the scalar fields of a contact.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateContactRequest {
    #[validate(
        length(min = 1, max = 100, message = "First name is required"),
        custom(function = validate_not_blank)
    )]
    pub first_name: String,

    #[validate(
        length(min = 1, max = 100, message = "Last name is required"),
        custom(function = validate_not_blank)
    )]
    pub last_name: String,

    #[validate(length(max = 200))]
    pub display_name: Option<String>,

    #[validate(length(max = 500), custom(function = validate_url_string))]
    pub avatar_url: Option<String>,

    #[serde(default)]
    pub is_favorite: bool,
}

/// Query parameters for the contact listing.
#[derive(Debug, Default, Deserialize)]
pub struct ContactSearchParams {
    /// Fragment of first, last or display name.
    pub q: Option<String>,
    /// Fragment of a company name the contact works (or worked) at.
    pub company: Option<String>,
    /// Fragment of a tag name attached to the contact.
    pub tag: Option<String>,
    /// Zero-based page index.
    pub page: Option<i64>,
    pub size: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct WindowParams {
    pub days: Option<i64>,
}

/// One page of a listing.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total: i64,
}

/// A contact together with everything attached to it.
#[derive(Debug, Serialize)]
pub struct ContactFullDetails {
    pub contact: Contact,
    pub contact_details: Vec<ContactDetail>,
    pub companies: Vec<ContactCompanyView>,
    pub social_profiles: Vec<SocialProfile>,
    pub events: Vec<Event>,
    pub notes: Vec<Note>,
    pub tags: Vec<Tag>,
}

/// A contact paired with its birthday event, if one is recorded.
#[derive(Debug, Serialize)]
pub struct ContactWithBirthday {
    pub contact: Contact,
    pub birthday: Option<Event>,
}
