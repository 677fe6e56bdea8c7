//! Blog comments repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        comment::{Comment, CreateComment},
        enums::CommentStatus,
    },
};

#[async_trait]
pub trait CommentsRepository: Send + Sync {
    /// Store a new comment as pending
    async fn create(&self, comment: &CreateComment) -> AppResult<Comment>;

    /// Approved comments of a post, oldest first
    async fn list_approved(&self, post_id: Uuid) -> AppResult<Vec<Comment>>;

    /// Moderation queue, newest first
    async fn list_pending(&self) -> AppResult<Vec<Comment>>;

    async fn update_status(&self, id: Uuid, status: CommentStatus) -> AppResult<Comment>;

    async fn delete_for_post(&self, post_id: Uuid) -> AppResult<()>;
}

#[derive(Clone)]
pub struct PgCommentsRepository {
    pool: Pool<Postgres>,
}

impl PgCommentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentsRepository for PgCommentsRepository {
    async fn create(&self, comment: &CreateComment) -> AppResult<Comment> {
        let row = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (id, post_id, author_name, author_email, content, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(comment.post_id)
        .bind(comment.author_name.trim())
        .bind(&comment.author_email)
        .bind(comment.content.trim())
        .bind(CommentStatus::Pending)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_approved(&self, post_id: Uuid) -> AppResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE post_id = $1 AND status = 'approved' ORDER BY created_at ASC",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_pending(&self) -> AppResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE status = 'pending' ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update_status(&self, id: Uuid, status: CommentStatus) -> AppResult<Comment> {
        sqlx::query_as::<_, Comment>("UPDATE comments SET status = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", id)))
    }

    async fn delete_for_post(&self, post_id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM comments WHERE post_id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryCommentsRepository {
    comments: RwLock<Vec<Comment>>,
}

#[async_trait]
impl CommentsRepository for MemoryCommentsRepository {
    async fn create(&self, comment: &CreateComment) -> AppResult<Comment> {
        let row = Comment {
            id: Uuid::new_v4(),
            post_id: comment.post_id,
            author_name: comment.author_name.trim().to_string(),
            author_email: comment.author_email.clone(),
            content: comment.content.trim().to_string(),
            status: CommentStatus::Pending,
            created_at: Utc::now(),
        };
        self.comments.write().await.push(row.clone());
        Ok(row)
    }

    async fn list_approved(&self, post_id: Uuid) -> AppResult<Vec<Comment>> {
        let mut rows: Vec<Comment> = self
            .comments
            .read()
            .await
            .iter()
            .filter(|c| c.post_id == post_id && c.status == CommentStatus::Approved)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(rows)
    }

    async fn list_pending(&self) -> AppResult<Vec<Comment>> {
        let mut rows: Vec<Comment> = self
            .comments
            .read()
            .await
            .iter()
            .filter(|c| c.status == CommentStatus::Pending)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn update_status(&self, id: Uuid, status: CommentStatus) -> AppResult<Comment> {
        let mut comments = self.comments.write().await;
        let comment = comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", id)))?;
        comment.status = status;
        Ok(comment.clone())
    }

    async fn delete_for_post(&self, post_id: Uuid) -> AppResult<()> {
        self.comments.write().await.retain(|c| c.post_id != post_id);
        Ok(())
    }
}
