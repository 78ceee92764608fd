//! Route table and OpenAPI document.
//!
//! Every handler is registered through `utoipa_axum::routes!` so the generated document
//! always matches the served routes. The API lives under `/api/v1`; Swagger UI is served
//! at `/api`.

use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        admin, auth, calendar, notification, session, stats, study_buddy, ticket, user,
    },
    state::AppState,
};

pub const API_PREFIX: &str = "/api/v1";

#[derive(OpenApi)]
#[openapi(
    info(title = "Study Buddy API", version = "1.0"),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Registration, login and password reset"),
        (name = "study-buddy", description = "Study buddy directory and availability"),
        (name = "sessions", description = "Session booking and lifecycle"),
        (name = "tickets", description = "Help tickets and comments"),
        (name = "notifications", description = "In-app notifications"),
        (name = "users", description = "Staff user administration"),
        (name = "user", description = "Profile, skills and activity of the caller"),
        (name = "stats", description = "User and platform statistics"),
        (name = "calendar", description = "Calendar integration status"),
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` security scheme referenced by protected routes.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        // auth
        .routes(routes!(auth::register))
        .routes(routes!(auth::confirm))
        .routes(routes!(auth::resend_code))
        .routes(routes!(auth::login))
        .routes(routes!(auth::forgot_password))
        .routes(routes!(auth::confirm_forgot_password))
        .routes(routes!(auth::admin_create_user))
        // study buddies
        .routes(routes!(study_buddy::list_buddies))
        .routes(routes!(study_buddy::search_buddies))
        .routes(routes!(study_buddy::get_buddy))
        .routes(routes!(study_buddy::add_availability))
        .routes(routes!(
            study_buddy::my_availability,
            study_buddy::replace_availability
        ))
        .routes(routes!(
            study_buddy::update_availability,
            study_buddy::delete_availability
        ))
        // sessions
        .routes(routes!(session::create_session, session::list_sessions))
        .routes(routes!(session::my_sessions))
        .routes(routes!(session::expire_pending))
        .routes(routes!(session::complete_ongoing))
        .routes(routes!(
            session::get_session,
            session::update_session,
            session::cancel_session
        ))
        // tickets
        .routes(routes!(ticket::create_ticket, ticket::list_tickets))
        .routes(routes!(ticket::search_tickets))
        .routes(routes!(ticket::my_created_tickets))
        .routes(routes!(ticket::my_claimed_tickets))
        .routes(routes!(
            ticket::get_ticket,
            ticket::update_ticket,
            ticket::delete_ticket
        ))
        .routes(routes!(ticket::claim_ticket))
        .routes(routes!(ticket::add_comment, ticket::list_comments))
        // notifications
        .routes(routes!(notification::list_notifications))
        .routes(routes!(notification::unread_count))
        .routes(routes!(notification::mark_all_read))
        .routes(routes!(notification::mark_read))
        .routes(routes!(notification::delete_notification))
        // staff user administration
        .routes(routes!(admin::list_users))
        .routes(routes!(admin::get_user))
        .routes(routes!(admin::verify_user))
        // self-service
        .routes(routes!(user::get_own_profile))
        .routes(routes!(
            user::get_profile,
            user::update_profile,
            user::delete_account
        ))
        .routes(routes!(user::change_account_status))
        .routes(routes!(user::add_document))
        .routes(routes!(user::list_documents))
        .routes(routes!(user::save_address))
        .routes(routes!(user::get_address))
        .routes(routes!(user::get_skills))
        .routes(routes!(
            user::add_skills,
            user::replace_skills,
            user::remove_skills
        ))
        .routes(routes!(user::recent_tickets))
        .routes(routes!(user::upcoming_sessions))
        // stats
        .routes(routes!(stats::own_stats))
        .routes(routes!(stats::user_stats))
        .routes(routes!(stats::global_stats))
        // calendar
        .routes(routes!(calendar::health))
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE, ACCEPT, AUTHORIZATION])
}

/// Builds the application router with documentation, CORS and request tracing.
pub fn router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest(API_PREFIX, api_routes())
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/api").url("/api-docs/openapi.json", api))
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
