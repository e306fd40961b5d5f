//! Router configuration for Web API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_college, create_program, create_student, delete_college, delete_me, delete_program,
    delete_student, get_college, get_program, get_student, list_colleges, list_programs,
    list_students, login, logout, me, register, student_filters, update_college, update_me,
    update_program, update_student, AppState,
};
use super::middleware::{create_cors_layer, login_rate_limit, token_auth, LoginRateLimit};
use crate::config::WebConfig;

/// Create the main API router.
///
/// Every route except `/login` and `/health` requires a bearer token.
pub fn create_router(app_state: Arc<AppState>, config: &WebConfig) -> Router {
    let login_limit = Arc::new(LoginRateLimit::new(
        config.login_rate_limit,
        config.trust_proxy_headers,
    ));

    // Rate limited separately from the rest of the API
    let login_routes = Router::new()
        .route("/login", post(login))
        .layer(middleware::from_fn(move |req, next| {
            let state = login_limit.clone();
            login_rate_limit(state, req, next)
        }));

    let account_routes = Router::new()
        .route("/logout", post(logout))
        .route("/me", get(me).put(update_me).delete(delete_me))
        .route("/register", post(register));

    let record_routes = Router::new()
        .route("/colleges", get(list_colleges).post(create_college))
        .route(
            "/colleges/:id",
            get(get_college).put(update_college).delete(delete_college),
        )
        .route("/programs", get(list_programs).post(create_program))
        .route(
            "/programs/:id",
            get(get_program).put(update_program).delete(delete_program),
        )
        .route("/students", get(list_students).post(create_student))
        .route("/students/filters", get(student_filters))
        .route(
            "/students/:id_number",
            get(get_student).put(update_student).delete(delete_student),
        );

    let issuer = app_state.tokens.clone();

    Router::new()
        .merge(login_routes)
        .merge(account_routes)
        .merge(record_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(&config.cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let issuer = issuer.clone();
                    token_auth(issuer, req, next)
                })),
        )
        .with_state(app_state)
        .merge(create_health_router())
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
