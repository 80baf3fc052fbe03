use chrono::Utc;
use sqlx::{Executor, QueryBuilder, Sqlite, SqlitePool};

use crate::models::contact::Contact;

use super::like_pattern;

/// Scalar contact fields as written to the database.
#[derive(Debug, Clone)]
pub struct ContactFields {
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub is_favorite: bool,
}

/// Listing filters. Blank fragments are dropped before they get here.
#[derive(Debug, Default, Clone)]
pub struct ContactFilter {
    pub term: Option<String>,
    pub company: Option<String>,
    pub tag: Option<String>,
    pub favorites_only: bool,
}

pub async fn insert<'e, E>(executor: E, fields: &ContactFields) -> sqlx::Result<Contact>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = Utc::now();
    sqlx::query_as::<_, Contact>(
        r#"
        INSERT INTO contacts (first_name, last_name, display_name, avatar_url, is_favorite, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id, first_name, last_name, display_name, avatar_url, is_favorite, created_at, updated_at
        "#,
    )
    .bind(&fields.first_name)
    .bind(&fields.last_name)
    .bind(&fields.display_name)
    .bind(&fields.avatar_url)
    .bind(fields.is_favorite)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> sqlx::Result<Option<Contact>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Contact>(
        r#"
        SELECT id, first_name, last_name, display_name, avatar_url, is_favorite, created_at, updated_at
        FROM contacts
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn exists<'e, E>(executor: E, id: i64) -> sqlx::Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM contacts WHERE id = ?)")
        .bind(id)
        .fetch_one(executor)
        .await
}

pub async fn update<'e, E>(executor: E, id: i64, fields: &ContactFields) -> sqlx::Result<Option<Contact>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Contact>(
        r#"
        UPDATE contacts
        SET first_name = ?, last_name = ?, display_name = ?, avatar_url = ?, is_favorite = ?, updated_at = ?
        WHERE id = ?
        RETURNING id, first_name, last_name, display_name, avatar_url, is_favorite, created_at, updated_at
        "#,
    )
    .bind(&fields.first_name)
    .bind(&fields.last_name)
    .bind(&fields.display_name)
    .bind(&fields.avatar_url)
    .bind(fields.is_favorite)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn set_favorite<'e, E>(executor: E, id: i64, favorite: bool) -> sqlx::Result<Option<Contact>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Contact>(
        r#"
        UPDATE contacts
        SET is_favorite = ?, updated_at = ?
        WHERE id = ?
        RETURNING id, first_name, last_name, display_name, avatar_url, is_favorite, created_at, updated_at
        "#,
    )
    .bind(favorite)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Owned rows (details, notes, events, ...) go with it through ON DELETE CASCADE.
pub async fn delete<'e, E>(executor: E, id: i64) -> sqlx::Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &ContactFilter) {
    builder.push(" WHERE 1 = 1");

    if let Some(term) = &filter.term {
        let pattern = like_pattern(term);
        builder.push(" AND (first_name LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR last_name LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR display_name LIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }

    if let Some(company) = &filter.company {
        builder.push(
            " AND EXISTS (SELECT 1 FROM contact_companies cc \
             JOIN companies c ON c.id = cc.company_id \
             WHERE cc.contact_id = contacts.id AND c.name LIKE ",
        );
        builder.push_bind(like_pattern(company));
        builder.push(")");
    }

    if let Some(tag) = &filter.tag {
        builder.push(
            " AND EXISTS (SELECT 1 FROM contact_tags ct \
             JOIN tags t ON t.id = ct.tag_id \
             WHERE ct.contact_id = contacts.id AND t.name LIKE ",
        );
        builder.push_bind(like_pattern(tag));
        builder.push(")");
    }

    if filter.favorites_only {
        builder.push(" AND is_favorite = TRUE");
    }
}

/// One page of contacts matching `filter`, plus the total number of matches.
pub async fn search(
    pool: &SqlitePool,
    filter: &ContactFilter,
    limit: i64,
    offset: i64,
) -> sqlx::Result<(Vec<Contact>, i64)> {
    let mut count_builder: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM contacts");
    push_filter(&mut count_builder, filter);
    let total = count_builder
        .build_query_scalar::<i64>()
        .fetch_one(pool)
        .await?;

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT id, first_name, last_name, display_name, avatar_url, is_favorite, created_at, updated_at FROM contacts",
    );
    push_filter(&mut builder, filter);
    builder.push(" ORDER BY last_name, first_name, id LIMIT ");
    builder.push_bind(limit);
    builder.push(" OFFSET ");
    builder.push_bind(offset);

    let contacts = builder.build_query_as::<Contact>().fetch_all(pool).await?;
    Ok((contacts, total))
}

pub async fn list_all<'e, E>(executor: E) -> sqlx::Result<Vec<Contact>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Contact>(
        r#"
        SELECT id, first_name, last_name, display_name, avatar_url, is_favorite, created_at, updated_at
        FROM contacts
        ORDER BY id
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn find_by_tag(pool: &SqlitePool, tag_id: i64) -> sqlx::Result<Vec<Contact>> {
    sqlx::query_as::<_, Contact>(
        r#"
        SELECT c.id, c.first_name, c.last_name, c.display_name, c.avatar_url, c.is_favorite, c.created_at, c.updated_at
        FROM contacts c
        JOIN contact_tags ct ON ct.contact_id = c.id
        WHERE ct.tag_id = ?
        ORDER BY c.last_name, c.first_name, c.id
        "#,
    )
    .bind(tag_id)
    .fetch_all(pool)
    .await
}

pub async fn count<'e, E>(executor: E) -> sqlx::Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contacts")
        .fetch_one(executor)
        .await
}

pub async fn count_favorites<'e, E>(executor: E) -> sqlx::Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contacts WHERE is_favorite = TRUE")
        .fetch_one(executor)
        .await
}
