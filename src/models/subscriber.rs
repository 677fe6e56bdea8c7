//! Newsletter subscriber model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::SubscriberStatus;

pub const DEFAULT_SOURCE: &str = "website";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: Uuid,
    /// Unique, stored trimmed and lowercased
    pub email: String,
    /// Where the subscription came from (footer, newsletter section, ...)
    pub source: String,
    pub status: SubscriberStatus,
    pub subscribed_at: DateTime<Utc>,
}

/// Subscribe request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubscribeRequest {
    #[validate(required(message = "Email is required"), email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub source: Option<String>,
}

/// Unsubscribe request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UnsubscribeRequest {
    #[validate(required(message = "Email is required"), email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Result of a subscribe upsert
#[derive(Debug, Clone)]
pub struct SubscribeOutcome {
    pub subscriber: Subscriber,
    /// False when an existing row was reactivated
    pub created: bool,
}

/// Canonical form used as the unique key
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
