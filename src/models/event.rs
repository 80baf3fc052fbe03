// src/models/event.rs

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Birthday,
    Anniversary,
    /// Requires `custom_event_name`.
    Custom,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventType::Birthday => "BIRTHDAY",
            EventType::Anniversary => "ANNIVERSARY",
            EventType::Custom => "CUSTOM",
        };
        f.write_str(name)
    }
}

/// Represents the 'events' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub contact_id: i64,
    pub event_type: EventType,
    pub custom_event_name: Option<String>,
    pub event_date: NaiveDate,
    pub notes: Option<String>,
    pub yearly_recurrence: bool,
}

/// Event fields shared by creation and update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EventForm {
    pub event_type: EventType,

    #[validate(length(max = 100))]
    pub custom_event_name: Option<String>,

    pub event_date: NaiveDate,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,

    #[serde(default)]
    pub yearly_recurrence: bool,
}

/// DTO for `POST /events`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    pub contact_id: i64,

    #[serde(flatten)]
    #[validate(nested)]
    pub event: EventForm,
}

/// Events due on one calendar day of the upcoming window.
#[derive(Debug, Serialize)]
pub struct UpcomingDay {
    /// The date the event falls on this year (or next, across a year end).
    pub date: NaiveDate,
    pub events: Vec<Event>,
}
