//! Data access. All SQL lives here; services never build queries themselves.
//!
//! Single-statement writes are generic over `sqlx::Executor` so they run
//! either directly on the pool or inside a caller's transaction.

pub mod company;
pub mod contact;
pub mod contact_company;
pub mod contact_detail;
pub mod event;
pub mod job_title;
pub mod legacy_contact;
pub mod note;
pub mod report;
pub mod social_profile;
pub mod tag;
pub mod user;

/// Wraps a search fragment for a `LIKE` comparison.
pub(crate) fn like_pattern(fragment: &str) -> String {
    format!("%{}%", fragment.trim())
}
