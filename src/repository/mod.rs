//! Repository layer for database operations
//!
//! Every table has a trait with a Postgres implementation and an in-memory
//! one; `storage.backend` picks which set the service runs on.

pub mod analytics;
pub mod blog;
pub mod comments;
pub mod contacts;
pub mod subscribers;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

use crate::error::AppResult;

/// Main repository struct holding one handle per table
#[derive(Clone)]
pub struct Repository {
    /// Present for the Postgres backend only
    pub pool: Option<Pool<Postgres>>,
    pub analytics: Arc<dyn analytics::AnalyticsRepository>,
    pub contacts: Arc<dyn contacts::ContactsRepository>,
    pub subscribers: Arc<dyn subscribers::SubscribersRepository>,
    pub blog: Arc<dyn blog::BlogRepository>,
    pub comments: Arc<dyn comments::CommentsRepository>,
}

impl Repository {
    /// Create a repository backed by the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            analytics: Arc::new(analytics::PgAnalyticsRepository::new(pool.clone())),
            contacts: Arc::new(contacts::PgContactsRepository::new(pool.clone())),
            subscribers: Arc::new(subscribers::PgSubscribersRepository::new(pool.clone())),
            blog: Arc::new(blog::PgBlogRepository::new(pool.clone())),
            comments: Arc::new(comments::PgCommentsRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Create a process-local repository; data is lost on restart
    pub fn in_memory() -> Self {
        Self {
            pool: None,
            analytics: Arc::new(analytics::MemoryAnalyticsRepository::default()),
            contacts: Arc::new(contacts::MemoryContactsRepository::default()),
            subscribers: Arc::new(subscribers::MemorySubscribersRepository::default()),
            blog: Arc::new(blog::MemoryBlogRepository::default()),
            comments: Arc::new(comments::MemoryCommentsRepository::default()),
        }
    }

    /// Check that the datastore answers
    pub async fn ping(&self) -> AppResult<()> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }
}
