use chrono::Utc;
use sqlx::{Executor, QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use crate::models::user::{NewUser, User, UserRole};

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password, first_name, last_name, is_active, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match user {
        Some(user) => Ok(Some(with_roles(pool, user).await?)),
        None => Ok(None),
    }
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> sqlx::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password, first_name, last_name, is_active, created_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    match user {
        Some(user) => Ok(Some(with_roles(pool, user).await?)),
        None => Ok(None),
    }
}

pub async fn list(pool: &SqlitePool) -> sqlx::Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password, first_name, last_name, is_active, created_at
        FROM users
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut result = Vec::with_capacity(users.len());
    for user in users {
        result.push(with_roles(pool, user).await?);
    }
    Ok(result)
}

pub async fn exists_by_username<'e, E>(executor: E, username: &str) -> sqlx::Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)")
        .bind(username)
        .fetch_one(executor)
        .await
}

pub async fn count<'e, E>(executor: E) -> sqlx::Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(executor)
        .await
}

pub async fn roles_of(pool: &SqlitePool, user_id: i64) -> sqlx::Result<Vec<UserRole>> {
    sqlx::query_scalar::<_, UserRole>("SELECT role FROM user_roles WHERE user_id = ? ORDER BY role")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

async fn with_roles(pool: &SqlitePool, mut user: User) -> sqlx::Result<User> {
    user.roles = roles_of(pool, user.id).await?;
    Ok(user)
}

/// Inserts the user row and its roles. Run inside a transaction.
pub async fn insert(conn: &mut SqliteConnection, new_user: &NewUser) -> sqlx::Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO users (username, password, first_name, last_name, is_active, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&new_user.username)
    .bind(&new_user.password_hash)
    .bind(&new_user.first_name)
    .bind(&new_user.last_name)
    .bind(new_user.is_active)
    .bind(Utc::now())
    .fetch_one(&mut *conn)
    .await?;

    replace_roles(conn, id, &new_user.roles).await?;
    Ok(id)
}

pub async fn replace_roles(
    conn: &mut SqliteConnection,
    user_id: i64,
    roles: &[UserRole],
) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM user_roles WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

    for role in roles {
        sqlx::query("INSERT OR IGNORE INTO user_roles (user_id, role) VALUES (?, ?)")
            .bind(user_id)
            .bind(role)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

/// Field changes for a user. `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: Option<bool>,
}

impl UserChanges {
    fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.password_hash.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.is_active.is_none()
    }
}

/// Applies the given changes. Returns the number of rows touched (0 if nothing to do).
pub async fn update(conn: &mut SqliteConnection, id: i64, changes: UserChanges) -> sqlx::Result<u64> {
    if changes.is_empty() {
        return Ok(0);
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE users SET ");
    let mut separated = builder.separated(", ");

    if let Some(username) = changes.username {
        separated.push("username = ");
        separated.push_bind_unseparated(username);
    }

    if let Some(password_hash) = changes.password_hash {
        separated.push("password = ");
        separated.push_bind_unseparated(password_hash);
    }

    if let Some(first_name) = changes.first_name {
        separated.push("first_name = ");
        separated.push_bind_unseparated(first_name);
    }

    if let Some(last_name) = changes.last_name {
        separated.push("last_name = ");
        separated.push_bind_unseparated(last_name);
    }

    if let Some(is_active) = changes.is_active {
        separated.push("is_active = ");
        separated.push_bind_unseparated(is_active);
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);

    let result = builder.build().execute(&mut *conn).await?;
    Ok(result.rows_affected())
}

pub async fn delete<'e, E>(executor: E, id: i64) -> sqlx::Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
