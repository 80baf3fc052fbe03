// src/models/report.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lifecycle of a report: CREATED -> COMPLETED | ERROR, both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Created,
    Completed,
    Error,
}

impl ReportStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, ReportStatus::Created)
    }
}

/// Represents the 'reports' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub status: ReportStatus,

    /// Rendered HTML. Only present once the report is COMPLETED.
    pub content: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Payload returned to a client polling `GET /reports/{id}`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportView {
    Created { report_id: i64, message: String },
    Error { report_id: i64, message: String },
    Completed { report_id: i64, content: String },
}

/// Figures collected for a report before rendering.
#[derive(Debug, Clone)]
pub struct ReportData {
    pub user_count: i64,
    pub contacts: Vec<crate::models::contact::Contact>,
    pub users_millis: u128,
    pub contacts_millis: u128,
    pub total_millis: u128,
    pub generated_at: DateTime<Utc>,
}
