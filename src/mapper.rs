//! Conversions between request DTOs, stored rows and response shapes.

use crate::{
    models::{
        company::{ContactCompanyForm, UpdateContactCompanyRequest, ContactCompany},
        contact::{CreateContactRequest, UpdateContactRequest},
        report::{Report, ReportStatus, ReportView},
    },
    repository::{contact::ContactFields, contact_company::ContactCompanyFields},
};

pub const REPORT_IN_PROGRESS_MESSAGE: &str = "Report is being generated, check back shortly.";
pub const REPORT_FAILED_MESSAGE: &str = "Report generation failed.";

/// Display name as stored: the supplied one, or "first last" when blank.
fn display_name_or_default(display_name: Option<&str>, first_name: &str, last_name: &str) -> String {
    match display_name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        None => format!("{} {}", first_name.trim(), last_name.trim()),
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl From<&CreateContactRequest> for ContactFields {
    fn from(req: &CreateContactRequest) -> Self {
        Self {
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            display_name: display_name_or_default(
                req.display_name.as_deref(),
                &req.first_name,
                &req.last_name,
            ),
            avatar_url: non_blank(req.avatar_url.as_deref()),
            is_favorite: req.is_favorite,
        }
    }
}

impl From<&UpdateContactRequest> for ContactFields {
    fn from(req: &UpdateContactRequest) -> Self {
        Self {
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            display_name: display_name_or_default(
                req.display_name.as_deref(),
                &req.first_name,
                &req.last_name,
            ),
            avatar_url: non_blank(req.avatar_url.as_deref()),
            is_favorite: req.is_favorite,
        }
    }
}

impl From<&ContactCompanyForm> for ContactCompanyFields {
    fn from(form: &ContactCompanyForm) -> Self {
        Self {
            company_id: form.company_id,
            job_title_id: form.job_title_id,
            is_current: form.is_current,
        }
    }
}

/// Merges an edit onto the stored record; absent ids keep their current value.
pub fn merge_contact_company(
    existing: &ContactCompany,
    req: &UpdateContactCompanyRequest,
) -> ContactCompanyFields {
    ContactCompanyFields {
        company_id: req.company_id.unwrap_or(existing.company_id),
        job_title_id: req.job_title_id.unwrap_or(existing.job_title_id),
        is_current: req.is_current,
    }
}

impl From<Report> for ReportView {
    fn from(report: Report) -> Self {
        match report.status {
            ReportStatus::Created => ReportView::Created {
                report_id: report.id,
                message: REPORT_IN_PROGRESS_MESSAGE.to_string(),
            },
            ReportStatus::Error => ReportView::Error {
                report_id: report.id,
                message: REPORT_FAILED_MESSAGE.to_string(),
            },
            ReportStatus::Completed => ReportView::Completed {
                report_id: report.id,
                content: report.content.unwrap_or_default(),
            },
        }
    }
}
