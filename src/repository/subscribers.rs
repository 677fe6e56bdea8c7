//! Newsletter subscribers repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, Pool, Postgres};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::SubscriberStatus,
        subscriber::{SubscribeOutcome, Subscriber},
    },
};

#[async_trait]
pub trait SubscribersRepository: Send + Sync {
    /// Insert `email`, or reactivate it and refresh `subscribed_at` if known.
    /// The source recorded on first subscription is kept.
    async fn upsert(&self, email: &str, source: &str) -> AppResult<SubscribeOutcome>;

    async fn deactivate(&self, email: &str) -> AppResult<Subscriber>;

    /// Active subscribers, newest first
    async fn list_active(&self) -> AppResult<Vec<Subscriber>>;
}

#[derive(FromRow)]
struct UpsertedSubscriber {
    #[sqlx(flatten)]
    subscriber: Subscriber,
    inserted: bool,
}

#[derive(Clone)]
pub struct PgSubscribersRepository {
    pool: Pool<Postgres>,
}

impl PgSubscribersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscribersRepository for PgSubscribersRepository {
    async fn upsert(&self, email: &str, source: &str) -> AppResult<SubscribeOutcome> {
        // xmax is 0 only for a freshly inserted tuple
        let row = sqlx::query_as::<_, UpsertedSubscriber>(
            r#"
            INSERT INTO subscribers (id, email, source, status)
            VALUES ($1, $2, $3, 'active')
            ON CONFLICT (email) DO UPDATE SET
                status = 'active',
                subscribed_at = NOW()
            RETURNING id, email, source, status, subscribed_at, (xmax = 0) AS inserted
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(source)
        .fetch_one(&self.pool)
        .await?;

        Ok(SubscribeOutcome {
            subscriber: row.subscriber,
            created: row.inserted,
        })
    }

    async fn deactivate(&self, email: &str) -> AppResult<Subscriber> {
        sqlx::query_as::<_, Subscriber>(
            "UPDATE subscribers SET status = 'inactive' WHERE email = $1 RETURNING *",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Subscriber {} not found", email)))
    }

    async fn list_active(&self) -> AppResult<Vec<Subscriber>> {
        let rows = sqlx::query_as::<_, Subscriber>(
            "SELECT * FROM subscribers WHERE status = 'active' ORDER BY subscribed_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[derive(Default)]
pub struct MemorySubscribersRepository {
    subscribers: Mutex<Vec<Subscriber>>,
}

#[async_trait]
impl SubscribersRepository for MemorySubscribersRepository {
    async fn upsert(&self, email: &str, source: &str) -> AppResult<SubscribeOutcome> {
        let mut subscribers = self.subscribers.lock().await;

        if let Some(existing) = subscribers.iter_mut().find(|s| s.email == email) {
            existing.status = SubscriberStatus::Active;
            existing.subscribed_at = Utc::now();
            return Ok(SubscribeOutcome {
                subscriber: existing.clone(),
                created: false,
            });
        }

        let subscriber = Subscriber {
            id: Uuid::new_v4(),
            email: email.to_string(),
            source: source.to_string(),
            status: SubscriberStatus::Active,
            subscribed_at: Utc::now(),
        };
        subscribers.push(subscriber.clone());
        Ok(SubscribeOutcome {
            subscriber,
            created: true,
        })
    }

    async fn deactivate(&self, email: &str) -> AppResult<Subscriber> {
        let mut subscribers = self.subscribers.lock().await;
        let subscriber = subscribers
            .iter_mut()
            .find(|s| s.email == email)
            .ok_or_else(|| AppError::NotFound(format!("Subscriber {} not found", email)))?;
        subscriber.status = SubscriberStatus::Inactive;
        Ok(subscriber.clone())
    }

    async fn list_active(&self) -> AppResult<Vec<Subscriber>> {
        let mut rows: Vec<Subscriber> = self
            .subscribers
            .lock()
            .await
            .iter()
            .filter(|s| s.status == SubscriberStatus::Active)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.subscribed_at.cmp(&a.subscribed_at));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resubscribing_keeps_a_single_active_row() {
        let repo = MemorySubscribersRepository::default();

        let first = repo.upsert("ops@example.com", "footer").await.unwrap();
        assert!(first.created);
        repo.deactivate("ops@example.com").await.unwrap();
        assert!(repo.list_active().await.unwrap().is_empty());

        let subscribed_earlier = first.subscriber.subscribed_at - chrono::Duration::hours(1);
        repo.subscribers.lock().await[0].subscribed_at = subscribed_earlier;

        let second = repo.upsert("ops@example.com", "newsletter").await.unwrap();
        assert!(!second.created);

        let active = repo.list_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, first.subscriber.id);
        assert_eq!(active[0].status, SubscriberStatus::Active);
        assert_eq!(active[0].source, "footer");
        assert!(active[0].subscribed_at > subscribed_earlier);
        assert_eq!(active[0].subscribed_at, second.subscriber.subscribed_at);
    }

    #[tokio::test]
    async fn deactivating_unknown_email_is_not_found() {
        let repo = MemorySubscribersRepository::default();
        let err = repo.deactivate("ghost@example.com").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
