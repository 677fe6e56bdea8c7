//! Blog and comment API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        blog::{BlogQuery, CreatePost, UpdatePost},
        comment::{CommentQuery, CreateComment, ModerateComment},
        BlogPost, Comment,
    },
};

use super::{require_admin_flag, AdminUser, ApiJson};

/// List blog posts
#[utoipa::path(
    get,
    path = "/blog",
    tag = "blog",
    params(BlogQuery),
    responses(
        (status = 200, description = "Posts, newest first", body = Vec<BlogPost>),
        (status = 401, description = "admin=true without a valid token", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_posts(
    State(state): State<crate::AppState>,
    admin: Option<AdminUser>,
    Query(query): Query<BlogQuery>,
) -> AppResult<Json<Vec<BlogPost>>> {
    let include_drafts = require_admin_flag(query.admin, admin)?;
    let posts = state.services.blog.list_posts(include_drafts).await?;
    Ok(Json(posts))
}

/// Get a post by ID or slug
#[utoipa::path(
    get,
    path = "/blog/{id}",
    tag = "blog",
    params(("id" = String, Path, description = "Post UUID or slug")),
    responses(
        (status = 200, description = "Post", body = BlogPost),
        (status = 404, description = "Post not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_post(
    State(state): State<crate::AppState>,
    admin: Option<AdminUser>,
    Path(id_or_slug): Path<String>,
) -> AppResult<Json<BlogPost>> {
    let post = state
        .services
        .blog
        .get_post(&id_or_slug, admin.is_some())
        .await?;
    Ok(Json(post))
}

/// Create a post
#[utoipa::path(
    post,
    path = "/blog",
    tag = "blog",
    security(("bearer_auth" = [])),
    request_body = CreatePost,
    responses(
        (status = 201, description = "Post created", body = BlogPost),
        (status = 409, description = "Slug already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_post(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    ApiJson(data): ApiJson<CreatePost>,
) -> AppResult<(StatusCode, Json<BlogPost>)> {
    let post = state.services.blog.create_post(data).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// Update a post
#[utoipa::path(
    put,
    path = "/blog/{id}",
    tag = "blog",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Post ID")),
    request_body = UpdatePost,
    responses(
        (status = 200, description = "Post updated", body = BlogPost),
        (status = 404, description = "Post not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Slug already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_post(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<Uuid>,
    ApiJson(data): ApiJson<UpdatePost>,
) -> AppResult<Json<BlogPost>> {
    let post = state.services.blog.update_post(id, data).await?;
    Ok(Json(post))
}

/// Delete a post and its comments
#[utoipa::path(
    delete,
    path = "/blog/{id}",
    tag = "blog",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 404, description = "Post not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_post(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.blog.delete_post(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List approved comments of a post, or the moderation queue
#[utoipa::path(
    get,
    path = "/blog/comments",
    tag = "blog",
    params(CommentQuery),
    responses(
        (status = 200, description = "Comments", body = Vec<Comment>),
        (status = 400, description = "Neither postId nor pending given", body = crate::error::ErrorResponse),
        (status = 401, description = "pending=true without a valid token", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_comments(
    State(state): State<crate::AppState>,
    admin: Option<AdminUser>,
    Query(query): Query<CommentQuery>,
) -> AppResult<Json<Vec<Comment>>> {
    if require_admin_flag(query.pending, admin)? {
        let pending = state.services.blog.list_pending_comments().await?;
        return Ok(Json(pending));
    }

    let post_id = query
        .post_id
        .ok_or_else(|| AppError::BadRequest("postId is required".to_string()))?;
    let comments = state.services.blog.list_comments(post_id).await?;
    Ok(Json(comments))
}

/// Submit a comment for moderation
#[utoipa::path(
    post,
    path = "/blog/comments",
    tag = "blog",
    request_body = CreateComment,
    responses(
        (status = 201, description = "Comment awaiting moderation", body = Comment),
        (status = 404, description = "Post not found or not published", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_comment(
    State(state): State<crate::AppState>,
    ApiJson(data): ApiJson<CreateComment>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    let comment = state.services.blog.create_comment(data).await?;
    Ok((StatusCode::CREATED, Json(comment.redacted())))
}

/// Approve or reject a comment
#[utoipa::path(
    put,
    path = "/blog/comments/{id}",
    tag = "blog",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Comment ID")),
    request_body = ModerateComment,
    responses(
        (status = 200, description = "Comment moderated", body = Comment),
        (status = 404, description = "Comment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn moderate_comment(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<Uuid>,
    ApiJson(data): ApiJson<ModerateComment>,
) -> AppResult<Json<Comment>> {
    let comment = state.services.blog.moderate_comment(id, data.status).await?;
    Ok(Json(comment))
}
