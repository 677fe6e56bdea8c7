//! Newsletter subscription service

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        subscriber::{normalize_email, SubscribeOutcome, SubscribeRequest, UnsubscribeRequest, DEFAULT_SOURCE},
        Subscriber,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct NewsletterService {
    repository: Repository,
}

impl NewsletterService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Subscribe an address, reactivating it if it had unsubscribed
    pub async fn subscribe(&self, request: SubscribeRequest) -> AppResult<SubscribeOutcome> {
        request.validate()?;

        let email = normalize_email(request.email.as_deref().unwrap_or_default());
        let source = request
            .source
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SOURCE);

        let outcome = self.repository.subscribers.upsert(&email, source).await?;
        tracing::info!(
            email = %outcome.subscriber.email,
            created = outcome.created,
            "Newsletter subscription"
        );
        Ok(outcome)
    }

    pub async fn unsubscribe(&self, request: UnsubscribeRequest) -> AppResult<Subscriber> {
        request.validate()?;

        let email = normalize_email(request.email.as_deref().unwrap_or_default());
        let subscriber = self.repository.subscribers.deactivate(&email).await?;
        tracing::info!(email = %subscriber.email, "Newsletter unsubscription");
        Ok(subscriber)
    }

    /// Active subscribers, newest first
    pub async fn list_active(&self) -> AppResult<Vec<Subscriber>> {
        self.repository.subscribers.list_active().await
    }
}
