//! Business logic services

pub mod analytics;
pub mod auth;
pub mod blog;
pub mod contacts;
pub mod content;
pub mod newsletter;

use crate::{config::AppConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub analytics: analytics::AnalyticsService,
    pub auth: auth::AuthService,
    pub blog: blog::BlogService,
    pub contacts: contacts::ContactsService,
    pub content: content::ContentService,
    pub newsletter: newsletter::NewsletterService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        Self {
            analytics: analytics::AnalyticsService::new(repository.clone(), config.analytics.summary_days),
            auth: auth::AuthService::new(config.auth.clone(), config.admin.clone()),
            blog: blog::BlogService::new(repository.clone()),
            contacts: contacts::ContactsService::new(repository.clone()),
            content: content::ContentService::new(&config.content),
            newsletter: newsletter::NewsletterService::new(repository.clone()),
            repository,
        }
    }

    /// Check that the datastore answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
