// src/handlers/mod.rs

pub mod admin;
pub mod auth;
pub mod companies;
pub mod contact_companies;
pub mod contact_details;
pub mod contacts;
pub mod events;
pub mod home;
pub mod job_titles;
pub mod notes;
pub mod reports;
pub mod social_profiles;
pub mod tags;
