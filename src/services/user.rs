use sqlx::SqlitePool;

use crate::{
    config::Config,
    error::{AppError, is_unique_violation},
    models::user::{
        AdminCreateUserRequest, AdminUpdateUserRequest, CreateUserRequest, LoginRequest, NewUser, TokenResponse, User,
        UserRole,
    },
    repository::{self, user::UserChanges},
    utils::{
        hash::{hash_password, verify_password},
        jwt::sign_jwt,
    },
};

fn username_taken(username: &str) -> AppError {
    AppError::IllegalState(format!("User with username '{}' already exists", username))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<User, AppError> {
    repository::user::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, AppError> {
    Ok(repository::user::find_by_username(pool, username).await?)
}

pub async fn user_exists(pool: &SqlitePool, username: &str) -> Result<bool, AppError> {
    Ok(repository::user::exists_by_username(pool, username).await?)
}

pub async fn count_total(pool: &SqlitePool) -> Result<i64, AppError> {
    Ok(repository::user::count(pool).await?)
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<User>, AppError> {
    Ok(repository::user::list(pool).await?)
}

/// Stores a new user. Empty role sets become `[USER]`.
async fn insert_user(pool: &SqlitePool, mut new_user: NewUser) -> Result<User, AppError> {
    if user_exists(pool, &new_user.username).await? {
        tracing::warn!("Username '{}' is already taken", new_user.username);
        return Err(username_taken(&new_user.username));
    }

    if new_user.roles.is_empty() {
        new_user.roles.push(UserRole::User);
    }

    let mut tx = pool.begin().await?;
    let id = repository::user::insert(&mut tx, &new_user).await.map_err(|e| {
        if is_unique_violation(&e) {
            username_taken(&new_user.username)
        } else {
            AppError::from(e)
        }
    })?;
    tx.commit().await?;

    tracing::info!("User created. ID: {}, username: {}", id, new_user.username);
    find_by_id(pool, id).await
}

/// Self-service registration: always a plain active USER.
pub async fn register(pool: &SqlitePool, req: &CreateUserRequest) -> Result<User, AppError> {
    let new_user = NewUser {
        username: req.username.trim().to_string(),
        password_hash: hash_password(&req.password)?,
        first_name: req.first_name.clone(),
        last_name: req.last_name.clone(),
        is_active: true,
        roles: vec![UserRole::User],
    };
    insert_user(pool, new_user).await
}

pub async fn create(pool: &SqlitePool, req: &AdminCreateUserRequest) -> Result<User, AppError> {
    if req.password.trim().is_empty() {
        return Err(AppError::BadRequest("Password must not be empty".to_string()));
    }

    let new_user = NewUser {
        username: req.username.trim().to_string(),
        password_hash: hash_password(&req.password)?,
        first_name: req.first_name.clone(),
        last_name: req.last_name.clone(),
        is_active: req.is_active.unwrap_or(true),
        roles: req.roles.clone(),
    };
    insert_user(pool, new_user).await
}

pub async fn login(pool: &SqlitePool, config: &Config, req: &LoginRequest) -> Result<TokenResponse, AppError> {
    let invalid = || AppError::AuthError("Invalid username or password".to_string());

    let user = find_by_username(pool, req.username.trim()).await?.ok_or_else(invalid)?;

    if !verify_password(&req.password, &user.password)? {
        tracing::warn!("Failed login for '{}'", user.username);
        return Err(invalid());
    }

    if !user.is_active {
        tracing::warn!("Inactive user '{}' tried to log in", user.username);
        return Err(AppError::AuthError("User account is disabled".to_string()));
    }

    let token = sign_jwt(
        user.id,
        &user.username,
        &user.roles,
        &config.jwt_secret,
        config.jwt_expiration,
    )?;

    tracing::info!("User '{}' logged in", user.username);
    Ok(TokenResponse {
        token,
        token_type: "Bearer".to_string(),
        roles: user.roles,
    })
}

pub async fn update(pool: &SqlitePool, id: i64, req: &AdminUpdateUserRequest) -> Result<User, AppError> {
    let existing = find_by_id(pool, id).await?;

    let username = req.username.as_deref().map(str::trim).map(str::to_string);
    if let Some(username) = &username {
        if username != &existing.username && user_exists(pool, username).await? {
            return Err(username_taken(username));
        }
    }

    let password_hash = match req.password.as_deref() {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    let changes = UserChanges {
        username,
        password_hash,
        first_name: req.first_name.clone(),
        last_name: req.last_name.clone(),
        is_active: req.is_active,
    };

    let mut tx = pool.begin().await?;
    repository::user::update(&mut tx, id, changes).await.map_err(|e| {
        if is_unique_violation(&e) {
            AppError::IllegalState("Username is already taken".to_string())
        } else {
            AppError::from(e)
        }
    })?;
    if let Some(roles) = &req.roles {
        let roles = if roles.is_empty() { vec![UserRole::User] } else { roles.clone() };
        repository::user::replace_roles(&mut tx, id, &roles).await?;
    }
    tx.commit().await?;

    tracing::info!("User updated. ID: {}", id);
    find_by_id(pool, id).await
}

/// Deletes a user. Admins cannot delete their own account.
pub async fn delete(pool: &SqlitePool, current_user_id: i64, id: i64) -> Result<(), AppError> {
    if id == current_user_id {
        return Err(AppError::BadRequest("Cannot delete yourself".to_string()));
    }

    if repository::user::delete(pool, id).await? == 0 {
        return Err(AppError::not_found("User", id));
    }
    tracing::info!("User deleted. ID: {}", id);
    Ok(())
}

/// Creates the configured admin account unless a user with that name already exists.
/// Returns true when an account was created.
pub async fn ensure_admin(pool: &SqlitePool, config: &Config) -> Result<bool, AppError> {
    let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) else {
        tracing::debug!("No admin credentials configured, skipping admin bootstrap");
        return Ok(false);
    };

    if user_exists(pool, username).await? {
        tracing::debug!("Admin user '{}' already exists", username);
        return Ok(false);
    }

    tracing::info!("Seeding admin user: {}", username);
    let new_user = NewUser {
        username: username.clone(),
        password_hash: hash_password(password)?,
        first_name: None,
        last_name: None,
        is_active: true,
        roles: vec![UserRole::Admin, UserRole::User],
    };
    insert_user(pool, new_user).await?;
    Ok(true)
}
