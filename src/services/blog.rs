//! Blog posts and comment moderation service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        blog::{slugify, CreatePost, UpdatePost},
        comment::CreateComment,
        BlogPost, Comment, CommentStatus,
    },
    repository::{blog::NewPost, Repository},
};

#[derive(Clone)]
pub struct BlogService {
    repository: Repository,
}

impl BlogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_posts(&self, include_drafts: bool) -> AppResult<Vec<BlogPost>> {
        self.repository.blog.list(include_drafts).await
    }

    /// Look a post up by UUID or slug; drafts are only visible to admins
    pub async fn get_post(&self, id_or_slug: &str, include_drafts: bool) -> AppResult<BlogPost> {
        let found = match Uuid::parse_str(id_or_slug) {
            Ok(id) => self.repository.blog.get_by_id(id).await?,
            Err(_) => self.repository.blog.get_by_slug(id_or_slug).await?,
        };

        found
            .filter(|post| include_drafts || post.is_published())
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id_or_slug)))
    }

    pub async fn create_post(&self, data: CreatePost) -> AppResult<BlogPost> {
        data.validate()?;

        let slug = normalized_slug(data.slug.as_deref().unwrap_or(&data.title))?;
        let post = NewPost {
            title: data.title.trim().to_string(),
            slug,
            excerpt: data.excerpt,
            content: data.content,
            cover_image: data.cover_image,
            category: data.category,
            author: data.author,
            status: data.status.unwrap_or_default(),
        };

        let created = self.repository.blog.create(&post).await?;
        tracing::info!(id = %created.id, slug = %created.slug, "Blog post created");
        Ok(created)
    }

    pub async fn update_post(&self, id: Uuid, mut changes: UpdatePost) -> AppResult<BlogPost> {
        changes.validate()?;

        if let Some(slug) = changes.slug.as_deref() {
            changes.slug = Some(normalized_slug(slug)?);
        }
        if let Some(title) = changes.title.as_deref() {
            changes.title = Some(title.trim().to_string());
        }

        let updated = self.repository.blog.update(id, &changes).await?;
        tracing::info!(id = %updated.id, "Blog post updated");
        Ok(updated)
    }

    pub async fn delete_post(&self, id: Uuid) -> AppResult<()> {
        self.repository.blog.delete(id).await?;
        self.repository.comments.delete_for_post(id).await?;
        tracing::info!(%id, "Blog post deleted");
        Ok(())
    }

    /// Queue a reader comment for moderation
    pub async fn create_comment(&self, data: CreateComment) -> AppResult<Comment> {
        data.validate()?;

        let published = self
            .repository
            .blog
            .get_by_id(data.post_id)
            .await?
            .map(|post| post.is_published())
            .unwrap_or(false);
        if !published {
            return Err(AppError::NotFound(format!("Post {} not found", data.post_id)));
        }

        let comment = self.repository.comments.create(&data).await?;
        tracing::info!(id = %comment.id, post_id = %comment.post_id, "Comment awaiting moderation");
        Ok(comment)
    }

    /// Approved comments of a post, without author emails
    pub async fn list_comments(&self, post_id: Uuid) -> AppResult<Vec<Comment>> {
        let comments = self.repository.comments.list_approved(post_id).await?;
        Ok(comments.into_iter().map(Comment::redacted).collect())
    }

    pub async fn list_pending_comments(&self) -> AppResult<Vec<Comment>> {
        self.repository.comments.list_pending().await
    }

    pub async fn moderate_comment(&self, id: Uuid, status: CommentStatus) -> AppResult<Comment> {
        let comment = self.repository.comments.update_status(id, status).await?;
        tracing::info!(%id, status = %comment.status, "Comment moderated");
        Ok(comment)
    }
}

fn normalized_slug(input: &str) -> AppResult<String> {
    let slug = slugify(input);
    if slug.is_empty() {
        return Err(AppError::Validation(
            "Slug must contain at least one letter or digit".to_string(),
        ));
    }
    Ok(slug)
}
