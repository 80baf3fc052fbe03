use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::social_profile::{SocialProfile, SocialProfileForm};

pub async fn insert<'e, E>(executor: E, contact_id: i64, form: &SocialProfileForm) -> sqlx::Result<SocialProfile>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, SocialProfile>(
        r#"
        INSERT INTO social_profiles (contact_id, platform, custom_platform_name, username, profile_url)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, contact_id, platform, custom_platform_name, username, profile_url
        "#,
    )
    .bind(contact_id)
    .bind(form.platform)
    .bind(form.custom_platform_name.as_deref().map(str::trim))
    .bind(&form.username)
    .bind(&form.profile_url)
    .fetch_one(executor)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<SocialProfile>> {
    sqlx::query_as::<_, SocialProfile>(
        r#"
        SELECT id, contact_id, platform, custom_platform_name, username, profile_url
        FROM social_profiles
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_by_contact(pool: &SqlitePool, contact_id: i64) -> sqlx::Result<Vec<SocialProfile>> {
    sqlx::query_as::<_, SocialProfile>(
        r#"
        SELECT id, contact_id, platform, custom_platform_name, username, profile_url
        FROM social_profiles
        WHERE contact_id = ?
        ORDER BY id
        "#,
    )
    .bind(contact_id)
    .fetch_all(pool)
    .await
}

pub async fn update<'e, E>(executor: E, id: i64, form: &SocialProfileForm) -> sqlx::Result<Option<SocialProfile>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, SocialProfile>(
        r#"
        UPDATE social_profiles
        SET platform = ?, custom_platform_name = ?, username = ?, profile_url = ?
        WHERE id = ?
        RETURNING id, contact_id, platform, custom_platform_name, username, profile_url
        "#,
    )
    .bind(form.platform)
    .bind(form.custom_platform_name.as_deref().map(str::trim))
    .bind(&form.username)
    .bind(&form.profile_url)
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E>(executor: E, id: i64) -> sqlx::Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM social_profiles WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
