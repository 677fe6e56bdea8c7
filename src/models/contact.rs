//! Contact (demo request) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::ContactStatus;

/// Contact request submitted from the public form
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    /// Free-text fleet size bucket, e.g. "10-50"
    pub fleet_size: Option<String>,
    pub message: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub status: ContactStatus,
}

/// Public contact form payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContact {
    #[validate(required(message = "firstName is required"), length(min = 1, message = "firstName is required"))]
    pub first_name: Option<String>,
    #[validate(required(message = "lastName is required"), length(min = 1, message = "lastName is required"))]
    pub last_name: Option<String>,
    #[validate(required(message = "email is required"), email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(required(message = "company is required"), length(min = 1, message = "company is required"))]
    pub company: Option<String>,
    pub fleet_size: Option<String>,
    #[validate(length(max = 5000, message = "message is too long"))]
    pub message: Option<String>,
}

impl CreateContact {
    /// Trim every text field so `validate` sees what would be stored
    pub fn trimmed(self) -> Self {
        let trim = |s: Option<String>| s.map(|v| v.trim().to_string());
        Self {
            first_name: trim(self.first_name),
            last_name: trim(self.last_name),
            email: trim(self.email),
            company: trim(self.company),
            fleet_size: trim(self.fleet_size),
            message: trim(self.message),
        }
    }
}

/// Validated contact ready to be stored
#[derive(Debug, Clone)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    pub fleet_size: Option<String>,
    pub message: Option<String>,
}

impl NewContact {
    /// Build a record from a trimmed form after `validate` has passed
    pub fn from_form(form: CreateContact) -> Self {
        let optional = |s: Option<String>| s.filter(|v| !v.is_empty());
        Self {
            first_name: form.first_name.unwrap_or_default(),
            last_name: form.last_name.unwrap_or_default(),
            email: form.email.unwrap_or_default().to_lowercase(),
            company: form.company.unwrap_or_default(),
            fleet_size: optional(form.fleet_size),
            message: optional(form.message),
        }
    }
}

/// Admin status change
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateContactStatus {
    /// new, in-progress, completed or archived
    pub status: Option<String>,
}
