//! Blog comment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::enums::CommentStatus;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_name: String,
    /// Never exposed publicly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    pub content: String,
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Copy suitable for public listings
    pub fn redacted(mut self) -> Self {
        self.author_email = None;
        self
    }
}

/// Public comment submission
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment {
    pub post_id: Uuid,
    #[validate(length(min = 1, max = 100, message = "authorName must be 1-100 characters"))]
    pub author_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub author_email: Option<String>,
    #[validate(length(min = 1, max = 5000, message = "content must be 1-5000 characters"))]
    pub content: String,
}

/// Moderation decision
#[derive(Debug, Deserialize, ToSchema)]
pub struct ModerateComment {
    pub status: CommentStatus,
}

/// Query parameters for comment listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentQuery {
    /// Approved comments of this post
    pub post_id: Option<Uuid>,
    /// Moderation queue (requires an admin token)
    #[serde(default)]
    pub pending: bool,
}
