//! Asynchronous report generation.
//!
//! A report row is created in CREATED, then a detached task gathers data,
//! renders HTML and moves the row to COMPLETED or ERROR exactly once.

use std::{future::Future, time::Instant};

use chrono::Utc;
use sqlx::SqlitePool;
use tokio::task::JoinHandle;

use crate::{
    error::AppError,
    models::report::{Report, ReportData, ReportStatus},
    repository,
    utils::html::escape_text,
};

pub async fn create(pool: &SqlitePool) -> Result<Report, AppError> {
    let report = repository::report::insert(pool).await?;
    tracing::info!("Report created. ID: {}, status: {:?}", report.id, report.status);
    Ok(report)
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Report, AppError> {
    let report = repository::report::find_by_id(pool, id).await?.ok_or_else(|| {
        tracing::warn!("Report not found. ID: {}", id);
        AppError::not_found("Report", id)
    })?;
    tracing::debug!(
        "Report found. ID: {}, status: {:?}, content length: {}",
        report.id,
        report.status,
        report.content.as_ref().map_or(0, String::len)
    );
    Ok(report)
}

/// Starts generation on the runtime and returns immediately.
pub fn spawn_generation(pool: SqlitePool, report_id: i64) -> JoinHandle<()> {
    tracing::info!("Starting report generation. ID: {}", report_id);
    tokio::spawn(async move {
        let content = async {
            let data = collect_data(&pool).await?;
            Ok::<_, AppError>(render(&data))
        };
        if let Err(e) = run_generation(&pool, report_id, content).await {
            tracing::error!("Report {} could not be finalized: {}", report_id, e);
        }
    })
}

/// Drives one report from CREATED to a terminal state using `content` as the renderer.
///
/// A report that already left CREATED is left untouched. If the rendered content
/// cannot be stored the report is marked ERROR instead. Returns the stored status.
pub async fn run_generation<F>(pool: &SqlitePool, report_id: i64, content: F) -> Result<ReportStatus, AppError>
where
    F: Future<Output = Result<String, AppError>>,
{
    let report = get(pool, report_id).await?;
    if report.status.is_terminal() {
        tracing::warn!("Report {} is already {:?}, not regenerating", report_id, report.status);
        return Ok(report.status);
    }

    let started = Instant::now();
    let finished = match content.await {
        Ok(html) => match repository::report::finish(pool, report_id, ReportStatus::Completed, Some(&html)).await {
            Ok(finished) => {
                tracing::info!(
                    "Report generated. ID: {}, length: {}, took {} ms",
                    report_id,
                    html.len(),
                    started.elapsed().as_millis()
                );
                finished
            }
            Err(e) => {
                tracing::error!("Report {} content could not be stored: {}", report_id, e);
                repository::report::finish(pool, report_id, ReportStatus::Error, None).await?
            }
        },
        Err(e) => {
            tracing::error!(
                "Report generation failed. ID: {}, after {} ms: {}",
                report_id,
                started.elapsed().as_millis(),
                e
            );
            repository::report::finish(pool, report_id, ReportStatus::Error, None).await?
        }
    };

    if !finished {
        tracing::warn!("Report {} was finished by another run", report_id);
    }

    Ok(get(pool, report_id).await?.status)
}

/// Counts users and loads contacts concurrently, timing each source.
pub async fn collect_data(pool: &SqlitePool) -> Result<ReportData, AppError> {
    let generated_at = Utc::now();
    let started = Instant::now();

    let users = async {
        let started = Instant::now();
        let result = repository::user::count(pool).await;
        (result, started.elapsed().as_millis())
    };
    let contacts = async {
        let started = Instant::now();
        let result = repository::contact::list_all(pool).await;
        (result, started.elapsed().as_millis())
    };

    let ((users, users_millis), (contacts, contacts_millis)) = tokio::join!(users, contacts);

    let user_count =
        users.map_err(|e| AppError::InternalServerError(format!("Failed to count users: {}", e)))?;
    let contacts =
        contacts.map_err(|e| AppError::InternalServerError(format!("Failed to load contacts: {}", e)))?;

    tracing::debug!(
        "Report data collected: {} users in {} ms, {} contacts in {} ms",
        user_count,
        users_millis,
        contacts.len(),
        contacts_millis
    );

    Ok(ReportData {
        user_count,
        contacts,
        users_millis,
        contacts_millis,
        total_millis: started.elapsed().as_millis(),
        generated_at,
    })
}

/// Renders the report body. Every stored value is HTML-escaped.
pub fn render(data: &ReportData) -> String {
    let rows: String = data
        .contacts
        .iter()
        .map(|contact| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                contact.id,
                escape_text(&contact.full_name()),
                escape_text(contact.display_name.as_deref().unwrap_or("")),
                if contact.is_favorite { "yes" } else { "no" }
            )
        })
        .collect();

    format!(
        "<section class=\"report\">\n\
         <p>Generated at {generated}</p>\n\
         <p>Users: {users}</p>\n\
         <p>Contacts: {contacts}</p>\n\
         <table>\n\
         <tr><th>ID</th><th>Name</th><th>Display name</th><th>Favorite</th></tr>\n\
         {rows}\
         </table>\n\
         <ul><li>Users: {users_ms} ms</li><li>Contacts: {contacts_ms} ms</li><li>Total: {total_ms} ms</li></ul>\n\
         </section>",
        generated = data.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        users = data.user_count,
        contacts = data.contacts.len(),
        rows = rows,
        users_ms = data.users_millis,
        contacts_ms = data.contacts_millis,
        total_ms = data.total_millis,
    )
}
