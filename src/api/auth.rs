//! Authentication endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::admin::{LoginRequest, LoginResponse},
};

use super::ApiJson;

/// Exchange admin credentials for a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state
        .services
        .auth
        .login(&request.email, &request.password)?;
    Ok(Json(response))
}
