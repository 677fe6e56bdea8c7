//! Newsletter API endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::{
        subscriber::{SubscribeRequest, UnsubscribeRequest},
        Subscriber,
    },
};

use super::{AdminUser, ApiJson};

/// Subscribe to the newsletter
#[utoipa::path(
    post,
    path = "/newsletter/subscribe",
    tag = "newsletter",
    request_body = SubscribeRequest,
    responses(
        (status = 201, description = "New subscriber", body = Subscriber),
        (status = 200, description = "Existing subscriber reactivated", body = Subscriber),
        (status = 400, description = "Invalid email", body = crate::error::ErrorResponse)
    )
)]
pub async fn subscribe(
    State(state): State<crate::AppState>,
    ApiJson(request): ApiJson<SubscribeRequest>,
) -> AppResult<(StatusCode, Json<Subscriber>)> {
    let outcome = state.services.newsletter.subscribe(request).await?;
    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome.subscriber)))
}

/// Unsubscribe from the newsletter
#[utoipa::path(
    post,
    path = "/newsletter/unsubscribe",
    tag = "newsletter",
    request_body = UnsubscribeRequest,
    responses(
        (status = 204, description = "Unsubscribed"),
        (status = 404, description = "Unknown email", body = crate::error::ErrorResponse)
    )
)]
pub async fn unsubscribe(
    State(state): State<crate::AppState>,
    ApiJson(request): ApiJson<UnsubscribeRequest>,
) -> AppResult<StatusCode> {
    state.services.newsletter.unsubscribe(request).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List active subscribers
#[utoipa::path(
    get,
    path = "/newsletter/subscribers",
    tag = "newsletter",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active subscribers", body = Vec<Subscriber>)
    )
)]
pub async fn list_subscribers(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
) -> AppResult<Json<Vec<Subscriber>>> {
    let subscribers = state.services.newsletter.list_active().await?;
    Ok(Json(subscribers))
}
