use sqlx::SqlitePool;

use crate::{
    error::{AppError, is_unique_violation},
    models::company::{Company, CompanyRequest, CompanyWithHeadcount},
    repository,
    services::fragment,
};

fn duplicate_name(name: &str) -> AppError {
    AppError::IllegalState(format!("Company '{}' already exists", name))
}

pub async fn create(pool: &SqlitePool, req: &CompanyRequest) -> Result<Company, AppError> {
    let name = req.name.trim();
    if repository::company::exists_by_name(pool, name).await? {
        tracing::warn!("Company '{}' already exists", name);
        return Err(duplicate_name(name));
    }

    let website = fragment(req.website.as_deref());
    let company = repository::company::insert(pool, name, website.as_deref())
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_name(name)
            } else {
                AppError::from(e)
            }
        })?;

    tracing::info!("Company created. ID: {}, name: {}", company.id, company.name);
    Ok(company)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Company, AppError> {
    repository::company::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Company", id))
}

pub async fn search(pool: &SqlitePool, name_fragment: Option<&str>) -> Result<Vec<CompanyWithHeadcount>, AppError> {
    let name_fragment = fragment(name_fragment);
    Ok(repository::company::search(pool, name_fragment.as_deref()).await?)
}

pub async fn update(pool: &SqlitePool, id: i64, req: &CompanyRequest) -> Result<Company, AppError> {
    let name = req.name.trim();
    let website = fragment(req.website.as_deref());

    let company = repository::company::update(pool, id, name, website.as_deref())
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_name(name)
            } else {
                AppError::from(e)
            }
        })?
        .ok_or_else(|| AppError::not_found("Company", id))?;

    tracing::info!("Company updated. ID: {}", id);
    Ok(company)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    if repository::company::delete(pool, id).await? == 0 {
        return Err(AppError::not_found("Company", id));
    }
    tracing::info!("Company deleted. ID: {}", id);
    Ok(())
}

pub async fn count_total(pool: &SqlitePool) -> Result<i64, AppError> {
    Ok(repository::company::count(pool).await?)
}

pub async fn count_contacts(pool: &SqlitePool, id: i64) -> Result<i64, AppError> {
    find_by_id(pool, id).await?;
    Ok(repository::company::count_contacts(pool, id).await?)
}
