//! Site content API endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;

use crate::{
    error::{AppError, AppResult},
    models::{site_content::SaveContentResponse, SiteContent},
};

use super::{AdminUser, ApiJson};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ContentQuery {
    /// Document language, defaults to the configured default language
    pub lang: Option<String>,
}

/// Get the site content document
#[utoipa::path(
    get,
    path = "/content",
    tag = "content",
    params(ContentQuery),
    responses(
        (status = 200, description = "Site content document", body = SiteContent),
        (status = 400, description = "Unsupported language", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_content(
    State(state): State<crate::AppState>,
    Query(query): Query<ContentQuery>,
) -> AppResult<Json<SiteContent>> {
    let lang = state.services.content.language(query.lang.as_deref())?;
    Ok(Json(state.services.content.get(&lang).await))
}

/// Replace the whole site content document
#[utoipa::path(
    post,
    path = "/content",
    tag = "content",
    security(("bearer_auth" = [])),
    params(ContentQuery),
    request_body = SiteContent,
    responses(
        (status = 200, description = "Document saved", body = SaveContentResponse),
        (status = 400, description = "Body is not a JSON object", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse)
    )
)]
pub async fn save_content(
    State(state): State<crate::AppState>,
    AdminUser(claims): AdminUser,
    Query(query): Query<ContentQuery>,
    ApiJson(body): ApiJson<Value>,
) -> AppResult<Json<SaveContentResponse>> {
    let lang = state.services.content.language(query.lang.as_deref())?;
    let content = SiteContent::from_value(body)
        .ok_or_else(|| AppError::BadRequest("Content must be a JSON object".to_string()))?;

    state.services.content.replace(&lang, &content).await?;
    tracing::info!(admin = %claims.sub, lang = %lang, "Content saved from dashboard");

    Ok(Json(SaveContentResponse { success: true }))
}
