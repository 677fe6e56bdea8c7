//! API handlers for Fleetsite REST endpoints

pub mod analytics;
pub mod auth;
pub mod blog;
pub mod contacts;
pub mod content;
pub mod health;
pub mod newsletter;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use crate::{error::AppError, models::admin::AdminClaims, AppState};

/// JSON request body whose rejections answer with the usual error body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Extractor for the authenticated admin from a JWT bearer token
pub struct AdminUser(pub AdminClaims);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = state.services.auth.verify_token(token)?;
        claims.require_admin()?;

        Ok(AdminUser(claims))
    }
}

/// Admin-only query flag on a public route; setting it without a valid token is a 401
pub(crate) fn require_admin_flag(requested: bool, admin: Option<AdminUser>) -> Result<bool, AppError> {
    match (requested, admin) {
        (false, _) => Ok(false),
        (true, Some(_)) => Ok(true),
        (true, None) => Err(AppError::Authentication(
            "Admin token required".to_string(),
        )),
    }
}
