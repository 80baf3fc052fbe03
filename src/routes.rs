// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{delete, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{
        admin, auth, companies, contact_companies, contact_details, contacts, events, home, job_titles, notes,
        reports, social_profiles, tags,
    },
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware},
};

/// Assembles the main application router.
///
/// * Public routes: registration and login.
/// * Everything else requires a bearer token; `/admin` additionally the ADMIN role.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let public_routes = Router::new()
        .route("/registration", post(auth::register))
        .route("/login", post(auth::login));

    let contact_routes = Router::new()
        .route("/contacts", get(contacts::list_contacts).post(contacts::create_contact))
        .route("/contacts/favorites", get(contacts::list_favorites))
        .route("/contacts/birthdays", get(contacts::list_upcoming_birthdays))
        .route(
            "/contacts/{id}",
            get(contacts::get_contact)
                .put(contacts::update_contact)
                .delete(contacts::delete_contact),
        )
        .route(
            "/contacts/{id}/favorite",
            post(contacts::add_favorite).delete(contacts::remove_favorite),
        )
        .route(
            "/contacts/{id}/details",
            get(contacts::list_details).post(contacts::add_detail),
        )
        .route(
            "/contacts/{id}/companies",
            get(contacts::list_companies).post(contacts::add_company),
        )
        .route("/contacts/{id}/companies/current", get(contacts::current_company))
        .route("/contacts/{id}/tags", get(contacts::list_tags).post(contacts::attach_tag))
        .route("/contacts/{id}/notes", get(contacts::list_notes))
        .route("/contacts/{id}/events", get(contacts::list_events))
        .route("/contacts/{id}/birthday", get(contacts::get_birthday))
        .route("/contacts/{id}/social-profiles", get(contacts::list_social_profiles))
        .route(
            "/contact-details/{id}",
            get(contact_details::get_detail)
                .put(contact_details::update_detail)
                .delete(contact_details::delete_detail),
        )
        .route(
            "/contact-companies/{id}",
            put(contact_companies::update_contact_company).delete(contact_companies::delete_contact_company),
        )
        .route("/contact-tags/{id}", delete(tags::delete_contact_tag));

    let directory_routes = Router::new()
        .route("/companies", get(companies::list_companies).post(companies::create_company))
        .route(
            "/companies/{id}",
            get(companies::get_company)
                .put(companies::update_company)
                .delete(companies::delete_company),
        )
        .route(
            "/job-titles",
            get(job_titles::list_job_titles).post(job_titles::create_job_title),
        )
        .route(
            "/job-titles/{id}",
            get(job_titles::get_job_title)
                .put(job_titles::update_job_title)
                .delete(job_titles::delete_job_title),
        )
        .route("/tags", get(tags::list_tags).post(tags::create_tag))
        .route(
            "/tags/{id}",
            get(tags::get_tag).put(tags::update_tag).delete(tags::delete_tag),
        )
        .route("/tags/{id}/contacts", get(tags::list_tagged_contacts));

    let activity_routes = Router::new()
        .route("/events", post(events::create_event))
        .route("/events/upcoming", get(events::upcoming_events))
        .route(
            "/events/{id}",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/notes", post(notes::create_note))
        .route(
            "/notes/{id}",
            get(notes::get_note).put(notes::update_note).delete(notes::delete_note),
        )
        .route("/social-profiles", post(social_profiles::create_social_profile))
        .route(
            "/social-profiles/{id}",
            get(social_profiles::get_social_profile)
                .put(social_profiles::update_social_profile)
                .delete(social_profiles::delete_social_profile),
        )
        .route("/reports", get(reports::create_report))
        .route("/reports/{id}", get(reports::get_report));

    let admin_routes = Router::new()
        .route("/admin", get(admin::dashboard))
        .route("/admin/users", get(admin::list_users).post(admin::create_user))
        .route(
            "/admin/users/{id}",
            put(admin::update_user).delete(admin::delete_user),
        )
        .route_layer(middleware::from_fn(admin_middleware));

    // Double middleware protection on /admin: Auth first, then Admin check
    let protected_routes = Router::new()
        .route("/", get(home::dashboard))
        .merge(contact_routes)
        .merge(directory_routes)
        .merge(activity_routes)
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
