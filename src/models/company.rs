// src/models/company.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::validation::{validate_not_blank, validate_url_string};

/// Represents the 'companies' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,

    /// Unique company name.
    pub name: String,

    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// DTO for creating or updating a company.
#[derive(Debug, Deserialize, Validate)]
pub struct CompanyRequest {
    #[validate(
        length(min = 1, max = 200, message = "Company name is required"),
        custom(function = validate_not_blank)
    )]
    pub name: String,

    #[validate(length(max = 500), custom(function = validate_url_string))]
    pub website: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompanySearchParams {
    pub search: Option<String>,
}

/// Company enriched with its headcount, for listings.
#[derive(Debug, FromRow, Serialize)]
pub struct CompanyWithHeadcount {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub company: Company,
    pub contacts_count: i64,
}

/// Represents the 'job_titles' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct JobTitle {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct JobTitleRequest {
    #[validate(
        length(min = 1, max = 200, message = "Job title is required"),
        custom(function = validate_not_blank)
    )]
    pub title: String,
}

/// Represents the 'contact_companies' table: a contact's employment record.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ContactCompany {
    pub id: i64,
    pub contact_id: i64,
    pub company_id: i64,
    pub job_title_id: i64,
    pub is_current: bool,
}

/// Employment record joined with company name and job title.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactCompanyView {
    pub id: i64,
    pub contact_id: i64,
    pub company_id: i64,
    pub company_name: String,
    pub job_title_id: i64,
    pub job_title: String,
    pub is_current: bool,
}

/// DTO for attaching a contact to a company.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactCompanyForm {
    pub company_id: i64,
    pub job_title_id: i64,
    #[serde(default)]
    pub is_current: bool,
}

/// DTO for editing an employment record. Absent ids keep the current value.
#[derive(Debug, Deserialize)]
pub struct UpdateContactCompanyRequest {
    pub company_id: Option<i64>,
    pub job_title_id: Option<i64>,
    #[serde(default)]
    pub is_current: bool,
}
