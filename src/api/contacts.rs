//! Contact request API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        contact::{CreateContact, UpdateContactStatus},
        ContactRequest,
    },
};

use super::{AdminUser, ApiJson};

/// Submit the public contact form
#[utoipa::path(
    post,
    path = "/contact",
    tag = "contact",
    request_body = CreateContact,
    responses(
        (status = 201, description = "Contact request stored", body = ContactRequest),
        (status = 400, description = "Missing or invalid field", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_contact(
    State(state): State<crate::AppState>,
    ApiJson(form): ApiJson<CreateContact>,
) -> AppResult<(StatusCode, Json<ContactRequest>)> {
    let contact = state.services.contacts.submit(form).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// List contact requests, newest first
#[utoipa::path(
    get,
    path = "/contact",
    tag = "contact",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Contact requests", body = Vec<ContactRequest>)
    )
)]
pub async fn list_contacts(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
) -> AppResult<Json<Vec<ContactRequest>>> {
    let contacts = state.services.contacts.list().await?;
    Ok(Json(contacts))
}

/// Change the status of a contact request
#[utoipa::path(
    patch,
    path = "/contact/{id}",
    tag = "contact",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Contact request ID")),
    request_body = UpdateContactStatus,
    responses(
        (status = 200, description = "Contact request updated", body = ContactRequest),
        (status = 400, description = "Unknown status", body = crate::error::ErrorResponse),
        (status = 404, description = "Contact request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_contact_status(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<Uuid>,
    ApiJson(data): ApiJson<UpdateContactStatus>,
) -> AppResult<Json<ContactRequest>> {
    let contact = state
        .services
        .contacts
        .update_status(id, data.status.as_deref())
        .await?;
    Ok(Json(contact))
}
