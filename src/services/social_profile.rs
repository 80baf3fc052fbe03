use sqlx::{SqliteConnection, SqlitePool};

use crate::{
    error::AppError,
    models::{
        social_profile::{CreateSocialProfileRequest, SocialPlatform, SocialProfile, SocialProfileForm},
        validation::is_blank,
    },
    repository,
};

/// Hides all but the first three characters of a username for log output.
pub fn mask_username(username: Option<&str>) -> String {
    match username {
        None => "null".to_string(),
        Some(name) if name.chars().count() <= 3 => "***".to_string(),
        Some(name) => {
            let prefix: String = name.chars().take(3).collect();
            format!("{}***", prefix)
        }
    }
}

/// CUSTOM platforms need a name; VK and Telegram must not carry one.
fn check_custom_platform(form: &SocialProfileForm) -> Result<(), AppError> {
    let has_name = !is_blank(form.custom_platform_name.as_deref());
    match form.platform {
        SocialPlatform::Custom if !has_name => Err(AppError::IllegalState(
            "Custom platform name is required for CUSTOM profiles".to_string(),
        )),
        SocialPlatform::Vk | SocialPlatform::Telegram if has_name => Err(AppError::IllegalState(
            "Custom platform name is only allowed for CUSTOM profiles".to_string(),
        )),
        _ => Ok(()),
    }
}

pub async fn create_for_contact(
    conn: &mut SqliteConnection,
    contact_id: i64,
    form: &SocialProfileForm,
) -> Result<SocialProfile, AppError> {
    check_custom_platform(form)?;

    if !repository::contact::exists(&mut *conn, contact_id).await? {
        return Err(AppError::not_found("Contact", contact_id));
    }

    let profile = repository::social_profile::insert(&mut *conn, contact_id, form).await?;
    tracing::info!(
        "Social profile created. ID: {}, contact: {}, platform: {:?}, username: {}",
        profile.id,
        contact_id,
        profile.platform,
        mask_username(profile.username.as_deref())
    );
    Ok(profile)
}

pub async fn create(pool: &SqlitePool, req: &CreateSocialProfileRequest) -> Result<SocialProfile, AppError> {
    let mut conn = pool.acquire().await?;
    create_for_contact(&mut conn, req.contact_id, &req.profile).await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<SocialProfile, AppError> {
    repository::social_profile::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Social profile", id))
}

pub async fn list_by_contact(pool: &SqlitePool, contact_id: i64) -> Result<Vec<SocialProfile>, AppError> {
    Ok(repository::social_profile::list_by_contact(pool, contact_id).await?)
}

pub async fn update(pool: &SqlitePool, id: i64, form: &SocialProfileForm) -> Result<SocialProfile, AppError> {
    check_custom_platform(form)?;

    let profile = repository::social_profile::update(pool, id, form)
        .await?
        .ok_or_else(|| AppError::not_found("Social profile", id))?;
    tracing::info!(
        "Social profile updated. ID: {}, username: {}",
        id,
        mask_username(profile.username.as_deref())
    );
    Ok(profile)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    if repository::social_profile::delete(pool, id).await? == 0 {
        return Err(AppError::not_found("Social profile", id));
    }
    tracing::info!("Social profile deleted. ID: {}", id);
    Ok(())
}
