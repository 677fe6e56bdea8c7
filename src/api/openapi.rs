//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{analytics, auth, blog, contacts, content, health, newsletter};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fleetsite API",
        version = "1.0.0",
        description = "Marketing site and CMS REST API for a fleet-telematics company",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        // Analytics
        analytics::track,
        analytics::get_stats,
        // Content
        content::get_content,
        content::save_content,
        // Leads
        contacts::create_contact,
        contacts::list_contacts,
        contacts::update_contact_status,
        newsletter::subscribe,
        newsletter::unsubscribe,
        newsletter::list_subscribers,
        // Blog
        blog::list_posts,
        blog::get_post,
        blog::create_post,
        blog::update_post,
        blog::delete_post,
        blog::list_comments,
        blog::create_comment,
        blog::moderate_comment,
    ),
    components(
        schemas(
            // Auth
            crate::models::admin::LoginRequest,
            crate::models::admin::LoginResponse,
            // Analytics
            crate::models::analytics::TrackRequest,
            analytics::AnalyticsStats,
            analytics::Kpis,
            analytics::TrafficPoint,
            analytics::PageVisits,
            analytics::TrafficSource,
            // Content
            crate::models::SiteContent,
            crate::models::site_content::SaveContentResponse,
            // Leads
            crate::models::ContactRequest,
            crate::models::contact::CreateContact,
            crate::models::contact::UpdateContactStatus,
            crate::models::ContactStatus,
            crate::models::Subscriber,
            crate::models::subscriber::SubscribeRequest,
            crate::models::subscriber::UnsubscribeRequest,
            crate::models::SubscriberStatus,
            // Blog
            crate::models::BlogPost,
            crate::models::blog::CreatePost,
            crate::models::blog::UpdatePost,
            crate::models::PostStatus,
            crate::models::Comment,
            crate::models::comment::CreateComment,
            crate::models::comment::ModerateComment,
            crate::models::CommentStatus,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Admin authentication"),
        (name = "analytics", description = "Page view tracking and dashboard statistics"),
        (name = "content", description = "Editable site content"),
        (name = "contact", description = "Demo requests"),
        (name = "newsletter", description = "Newsletter subscriptions"),
        (name = "blog", description = "Blog posts and comments")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_admin_routes_with_bearer_auth() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/analytics/stats"));
        assert!(doc.paths.paths.contains_key("/blog/comments/{id}"));

        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
