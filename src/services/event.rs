use std::collections::BTreeMap;

use chrono::{Datelike, Days, Local, NaiveDate};
use sqlx::{SqliteConnection, SqlitePool};

use crate::{
    error::AppError,
    models::event::{CreateEventRequest, Event, EventForm, EventType, UpcomingDay},
    repository::{self, event::EventFields},
};

/// The calendar day used as "today" for every window computation.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The anniversary of `date` in `year`. Feb 29 falls on Feb 28 in non-leap years.
pub fn anniversary_in(date: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, date.month(), 28))
}

/// First anniversary of `date` on or after `from`.
pub fn next_anniversary(date: NaiveDate, from: NaiveDate) -> Option<NaiveDate> {
    let this_year = anniversary_in(date, from.year())?;
    if this_year >= from {
        Some(this_year)
    } else {
        anniversary_in(date, from.year() + 1)
    }
}

/// Whether the annual (month, day) of `date` falls in `[today, today + days]`.
/// The window may cross a year end.
pub fn is_within_annual_window(date: NaiveDate, today: NaiveDate, days: i64) -> bool {
    annual_occurrence_within(date, today, days).is_some()
}

fn window_end(today: NaiveDate, days: i64) -> Option<NaiveDate> {
    let days = u64::try_from(days).ok()?;
    today.checked_add_days(Days::new(days))
}

fn annual_occurrence_within(date: NaiveDate, today: NaiveDate, days: i64) -> Option<NaiveDate> {
    let end = window_end(today, days)?;
    next_anniversary(date, today).filter(|next| *next <= end)
}

/// The day the event falls on inside `[today, today + days]`, if any.
/// Birthdays and recurring events repeat every year; others happen once.
pub fn occurrence_within(event: &Event, today: NaiveDate, days: i64) -> Option<NaiveDate> {
    if event.event_type == EventType::Birthday || event.yearly_recurrence {
        annual_occurrence_within(event.event_date, today, days)
    } else {
        let end = window_end(today, days)?;
        (event.event_date >= today && event.event_date <= end).then_some(event.event_date)
    }
}

/// CUSTOM events need a name; the other types must not carry one.
fn check_custom_name(fields: &EventFields) -> Result<(), AppError> {
    match (fields.event_type, fields.custom_event_name.as_ref()) {
        (EventType::Custom, None) => Err(AppError::IllegalState(
            "Custom event name is required for CUSTOM events".to_string(),
        )),
        (event_type, Some(_)) if event_type != EventType::Custom => Err(AppError::IllegalState(
            format!("Custom event name is not allowed for {} events", event_type),
        )),
        _ => Ok(()),
    }
}

/// Creates an event on an open connection, so nested contact creation can share its transaction.
pub async fn create_for_contact(
    conn: &mut SqliteConnection,
    contact_id: i64,
    form: &EventForm,
) -> Result<Event, AppError> {
    let fields = EventFields::from(form);
    check_custom_name(&fields)?;

    if !repository::contact::exists(&mut *conn, contact_id).await? {
        return Err(AppError::not_found("Contact", contact_id));
    }

    if fields.event_type == EventType::Birthday
        && repository::event::exists_for_contact(&mut *conn, contact_id, EventType::Birthday, None).await?
    {
        tracing::warn!("Rejected second birthday for contact {}", contact_id);
        return Err(AppError::IllegalState(format!(
            "Contact {} already has a birthday",
            contact_id
        )));
    }

    let event = repository::event::insert(&mut *conn, contact_id, &fields).await?;
    tracing::info!(
        "Event created. ID: {}, contact: {}, type: {}",
        event.id,
        contact_id,
        event.event_type
    );
    Ok(event)
}

pub async fn create(pool: &SqlitePool, req: &CreateEventRequest) -> Result<Event, AppError> {
    let mut conn = pool.acquire().await?;
    create_for_contact(&mut conn, req.contact_id, &req.event).await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Event, AppError> {
    repository::event::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Event", id))
}

pub async fn update(pool: &SqlitePool, id: i64, form: &EventForm) -> Result<Event, AppError> {
    let existing = find_by_id(pool, id).await?;
    let fields = EventFields::from(form);
    check_custom_name(&fields)?;

    if fields.event_type == EventType::Birthday
        && repository::event::exists_for_contact(pool, existing.contact_id, EventType::Birthday, Some(id))
            .await?
    {
        return Err(AppError::IllegalState(format!(
            "Contact {} already has a birthday",
            existing.contact_id
        )));
    }

    let event = repository::event::update(pool, id, &fields)
        .await?
        .ok_or_else(|| AppError::not_found("Event", id))?;
    tracing::info!("Event updated. ID: {}", id);
    Ok(event)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    if repository::event::delete(pool, id).await? == 0 {
        return Err(AppError::not_found("Event", id));
    }
    tracing::info!("Event deleted. ID: {}", id);
    Ok(())
}

pub async fn list_by_contact(pool: &SqlitePool, contact_id: i64) -> Result<Vec<Event>, AppError> {
    Ok(repository::event::list_by_contact(pool, contact_id).await?)
}

pub async fn birthday_of(pool: &SqlitePool, contact_id: i64) -> Result<Option<Event>, AppError> {
    Ok(repository::event::find_by_contact_and_type(pool, contact_id, EventType::Birthday).await?)
}

/// Events falling in `[today, today + days]`, grouped by the day they fall on.
pub async fn upcoming(pool: &SqlitePool, today: NaiveDate, days: i64) -> Result<Vec<UpcomingDay>, AppError> {
    let events = repository::event::list_all(pool).await?;

    let mut by_day: BTreeMap<NaiveDate, Vec<Event>> = BTreeMap::new();
    for event in events {
        if let Some(date) = occurrence_within(&event, today, days) {
            by_day.entry(date).or_default().push(event);
        }
    }

    Ok(by_day
        .into_iter()
        .map(|(date, events)| UpcomingDay { date, events })
        .collect())
}

/// Birthdays whose next anniversary is within the window, soonest first.
pub async fn upcoming_birthdays(
    pool: &SqlitePool,
    today: NaiveDate,
    days: i64,
) -> Result<Vec<(NaiveDate, Event)>, AppError> {
    let birthdays = repository::event::list_by_type(pool, EventType::Birthday).await?;

    let mut upcoming: Vec<(NaiveDate, Event)> = birthdays
        .into_iter()
        .filter_map(|event| annual_occurrence_within(event.event_date, today, days).map(|d| (d, event)))
        .collect();
    upcoming.sort_by_key(|(date, event)| (*date, event.id));
    Ok(upcoming)
}

pub async fn count_upcoming_birthdays(pool: &SqlitePool, today: NaiveDate, days: i64) -> Result<i64, AppError> {
    let birthdays = repository::event::list_by_type(pool, EventType::Birthday).await?;
    let count = birthdays
        .iter()
        .filter(|event| is_within_annual_window(event.event_date, today, days))
        .count();
    Ok(count as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_ignores_the_year() {
        let today = date(2025, 6, 10);
        assert!(is_within_annual_window(date(1990, 6, 10), today, 14));
        assert!(is_within_annual_window(date(1990, 6, 24), today, 14));
        assert!(!is_within_annual_window(date(1990, 6, 25), today, 14));
        assert!(!is_within_annual_window(date(1990, 6, 9), today, 14));
    }

    #[test]
    fn window_wraps_across_year_end() {
        let today = date(2025, 12, 25);
        assert!(is_within_annual_window(date(1985, 1, 3), today, 14));
        assert!(is_within_annual_window(date(1985, 12, 31), today, 14));
        assert!(!is_within_annual_window(date(1985, 1, 9), today, 14));
    }

    #[test]
    fn leap_day_counts_on_feb_28() {
        assert_eq!(anniversary_in(date(2000, 2, 29), 2025), Some(date(2025, 2, 28)));
        assert_eq!(anniversary_in(date(2000, 2, 29), 2028), Some(date(2028, 2, 29)));
        assert!(is_within_annual_window(date(2000, 2, 29), date(2025, 2, 28), 0));
    }

    #[test]
    fn negative_window_matches_nothing() {
        assert!(!is_within_annual_window(date(1990, 6, 10), date(2025, 6, 10), -1));
    }
}
