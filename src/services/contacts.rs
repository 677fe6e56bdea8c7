//! Contact (demo request) service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        contact::{CreateContact, NewContact},
        ContactRequest, ContactStatus,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ContactsService {
    repository: Repository,
}

impl ContactsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Validate and store a public form submission
    pub async fn submit(&self, form: CreateContact) -> AppResult<ContactRequest> {
        let form = form.trimmed();
        form.validate()?;

        let contact = NewContact::from_form(form);

        let created = self.repository.contacts.create(&contact).await?;
        tracing::info!(id = %created.id, company = %created.company, "Contact request received");
        Ok(created)
    }

    /// All requests, newest first
    pub async fn list(&self) -> AppResult<Vec<ContactRequest>> {
        self.repository.contacts.list().await
    }

    /// Change the follow-up status of a request
    pub async fn update_status(&self, id: Uuid, status: Option<&str>) -> AppResult<ContactRequest> {
        let status: ContactStatus = status
            .ok_or_else(|| AppError::Validation("status is required".to_string()))?
            .parse()
            .map_err(AppError::Validation)?;

        self.repository.contacts.update_status(id, status).await
    }
}
