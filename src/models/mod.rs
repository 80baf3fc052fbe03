// src/models/mod.rs

pub mod company;
pub mod contact;
pub mod contact_detail;
pub mod event;
pub mod legacy_contact;
pub mod note;
pub mod report;
pub mod social_profile;
pub mod stats;
pub mod tag;
pub mod user;
pub mod validation;
