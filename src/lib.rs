//! Fleetsite server
//!
//! REST JSON API behind a fleet-telematics marketing site: page-view
//! analytics, the editable site content, demo requests, the newsletter and
//! the blog.

use std::sync::Arc;

use axum::{
    routing::{get, patch, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig, repository: repository::Repository) -> Self {
        Self {
            services: Arc::new(services::Services::new(repository, &config)),
        }
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/login", post(api::auth::login))
        // Analytics
        .route("/analytics/track", post(api::analytics::track))
        .route("/analytics/stats", get(api::analytics::get_stats))
        // Site content
        .route(
            "/content",
            get(api::content::get_content).post(api::content::save_content),
        )
        // Contact requests
        .route(
            "/contact",
            get(api::contacts::list_contacts).post(api::contacts::create_contact),
        )
        .route("/contact/:id", patch(api::contacts::update_contact_status))
        // Newsletter
        .route("/newsletter/subscribe", post(api::newsletter::subscribe))
        .route("/newsletter/unsubscribe", post(api::newsletter::unsubscribe))
        .route("/newsletter/subscribers", get(api::newsletter::list_subscribers))
        // Blog
        .route(
            "/blog",
            get(api::blog::list_posts).post(api::blog::create_post),
        )
        .route(
            "/blog/comments",
            get(api::blog::list_comments).post(api::blog::create_comment),
        )
        .route("/blog/comments/:id", put(api::blog::moderate_comment))
        .route(
            "/blog/:id",
            get(api::blog::get_post)
                .put(api::blog::update_post)
                .delete(api::blog::delete_post),
        )
        .with_state(state);

    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
