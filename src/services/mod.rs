//! Business rules. One module per aggregate; handlers only call into these.

pub mod company;
pub mod contact;
pub mod contact_company;
pub mod contact_detail;
pub mod event;
pub mod job_title;
pub mod note;
pub mod report;
pub mod social_profile;
pub mod statistics;
pub mod tag;
pub mod user;

use crate::config::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Normalizes zero-based paging parameters into `(page, size, offset)`.
/// The offset saturates, so an absurd page number yields an empty page.
pub fn page_bounds(page: Option<i64>, size: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(0).max(0);
    let size = size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    (page, size, page.saturating_mul(size))
}

/// Trims and drops blank optional search fragments.
pub(crate) fn fragment(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
