//! Blog posts repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        blog::{BlogPost, UpdatePost},
        enums::PostStatus,
    },
};

/// Post fields after slug derivation and validation
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub status: PostStatus,
}

#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Posts newest first; drafts only when `include_drafts`
    async fn list(&self, include_drafts: bool) -> AppResult<Vec<BlogPost>>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<BlogPost>>;

    async fn get_by_slug(&self, slug: &str) -> AppResult<Option<BlogPost>>;

    async fn create(&self, post: &NewPost) -> AppResult<BlogPost>;

    async fn update(&self, id: Uuid, changes: &UpdatePost) -> AppResult<BlogPost>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

#[derive(Clone)]
pub struct PgBlogRepository {
    pool: Pool<Postgres>,
}

impl PgBlogRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogRepository for PgBlogRepository {
    async fn list(&self, include_drafts: bool) -> AppResult<Vec<BlogPost>> {
        let rows = sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT * FROM blog_posts
            WHERE $1 OR status = 'published'
            ORDER BY created_at DESC
            "#,
        )
        .bind(include_drafts)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<BlogPost>> {
        let row = sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn get_by_slug(&self, slug: &str) -> AppResult<Option<BlogPost>> {
        let row = sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, post: &NewPost) -> AppResult<BlogPost> {
        sqlx::query_as::<_, BlogPost>(
            r#"
            INSERT INTO blog_posts (id, title, slug, excerpt, content, cover_image, category, author, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.excerpt)
        .bind(&post.content)
        .bind(&post.cover_image)
        .bind(&post.category)
        .bind(&post.author)
        .bind(post.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_unique_violation(e, format!("Slug '{}' already exists", post.slug)))
    }

    async fn update(&self, id: Uuid, changes: &UpdatePost) -> AppResult<BlogPost> {
        sqlx::query_as::<_, BlogPost>(
            r#"
            UPDATE blog_posts SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                excerpt = COALESCE($4, excerpt),
                content = COALESCE($5, content),
                cover_image = COALESCE($6, cover_image),
                category = COALESCE($7, category),
                author = COALESCE($8, author),
                status = COALESCE($9, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.slug)
        .bind(&changes.excerpt)
        .bind(&changes.content)
        .bind(&changes.cover_image)
        .bind(&changes.category)
        .bind(&changes.author)
        .bind(changes.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_unique_violation(e, "Slug already exists"))?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Post {} not found", id)));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryBlogRepository {
    posts: RwLock<Vec<BlogPost>>,
}

#[async_trait]
impl BlogRepository for MemoryBlogRepository {
    async fn list(&self, include_drafts: bool) -> AppResult<Vec<BlogPost>> {
        let mut rows: Vec<BlogPost> = self
            .posts
            .read()
            .await
            .iter()
            .filter(|p| include_drafts || p.is_published())
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<BlogPost>> {
        Ok(self.posts.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn get_by_slug(&self, slug: &str) -> AppResult<Option<BlogPost>> {
        Ok(self.posts.read().await.iter().find(|p| p.slug == slug).cloned())
    }

    async fn create(&self, post: &NewPost) -> AppResult<BlogPost> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.slug == post.slug) {
            return Err(AppError::Conflict(format!("Slug '{}' already exists", post.slug)));
        }

        let now = Utc::now();
        let row = BlogPost {
            id: Uuid::new_v4(),
            title: post.title.clone(),
            slug: post.slug.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            cover_image: post.cover_image.clone(),
            category: post.category.clone(),
            author: post.author.clone(),
            status: post.status,
            created_at: now,
            updated_at: now,
        };
        posts.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: Uuid, changes: &UpdatePost) -> AppResult<BlogPost> {
        let mut posts = self.posts.write().await;

        if let Some(slug) = &changes.slug {
            if posts.iter().any(|p| p.id != id && &p.slug == slug) {
                return Err(AppError::Conflict("Slug already exists".to_string()));
            }
        }

        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

        if let Some(v) = &changes.title { post.title = v.clone(); }
        if let Some(v) = &changes.slug { post.slug = v.clone(); }
        if let Some(v) = &changes.excerpt { post.excerpt = Some(v.clone()); }
        if let Some(v) = &changes.content { post.content = v.clone(); }
        if let Some(v) = &changes.cover_image { post.cover_image = Some(v.clone()); }
        if let Some(v) = &changes.category { post.category = Some(v.clone()); }
        if let Some(v) = &changes.author { post.author = Some(v.clone()); }
        if let Some(v) = changes.status { post.status = v; }
        post.updated_at = Utc::now();

        Ok(post.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(AppError::NotFound(format!("Post {} not found", id)));
        }
        Ok(())
    }
}
