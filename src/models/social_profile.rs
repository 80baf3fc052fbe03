use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::validation::validate_url_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SocialPlatform {
    Vk,
    Telegram,
    Custom,
}

/// Represents the 'social_profiles' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SocialProfile {
    pub id: i64,
    pub contact_id: i64,
    pub platform: SocialPlatform,
    pub custom_platform_name: Option<String>,
    pub username: Option<String>,
    pub profile_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SocialProfileForm {
    pub platform: SocialPlatform,

    #[validate(length(max = 100))]
    pub custom_platform_name: Option<String>,

    #[validate(length(max = 100))]
    pub username: Option<String>,

    #[validate(length(max = 500), custom(function = validate_url_string))]
    pub profile_url: Option<String>,
}

/// DTO for `POST /social-profiles`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSocialProfileRequest {
    pub contact_id: i64,

    #[serde(flatten)]
    #[validate(nested)]
    pub profile: SocialProfileForm,
}
