//! Contact requests repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        contact::{ContactRequest, NewContact},
        enums::ContactStatus,
    },
};

#[async_trait]
pub trait ContactsRepository: Send + Sync {
    async fn create(&self, contact: &NewContact) -> AppResult<ContactRequest>;

    /// All contact requests, newest first
    async fn list(&self) -> AppResult<Vec<ContactRequest>>;

    async fn update_status(&self, id: Uuid, status: ContactStatus) -> AppResult<ContactRequest>;
}

#[derive(Clone)]
pub struct PgContactsRepository {
    pool: Pool<Postgres>,
}

impl PgContactsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactsRepository for PgContactsRepository {
    async fn create(&self, contact: &NewContact) -> AppResult<ContactRequest> {
        let row = sqlx::query_as::<_, ContactRequest>(
            r#"
            INSERT INTO contacts (id, first_name, last_name, email, company, fleet_size, message, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.email)
        .bind(&contact.company)
        .bind(&contact.fleet_size)
        .bind(&contact.message)
        .bind(ContactStatus::New)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list(&self) -> AppResult<Vec<ContactRequest>> {
        let rows = sqlx::query_as::<_, ContactRequest>(
            "SELECT * FROM contacts ORDER BY submitted_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update_status(&self, id: Uuid, status: ContactStatus) -> AppResult<ContactRequest> {
        sqlx::query_as::<_, ContactRequest>(
            "UPDATE contacts SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Contact {} not found", id)))
    }
}

#[derive(Default)]
pub struct MemoryContactsRepository {
    contacts: RwLock<Vec<ContactRequest>>,
}

#[async_trait]
impl ContactsRepository for MemoryContactsRepository {
    async fn create(&self, contact: &NewContact) -> AppResult<ContactRequest> {
        let row = ContactRequest {
            id: Uuid::new_v4(),
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            email: contact.email.clone(),
            company: contact.company.clone(),
            fleet_size: contact.fleet_size.clone(),
            message: contact.message.clone(),
            submitted_at: Utc::now(),
            status: ContactStatus::New,
        };
        self.contacts.write().await.push(row.clone());
        Ok(row)
    }

    async fn list(&self) -> AppResult<Vec<ContactRequest>> {
        let mut rows = self.contacts.read().await.clone();
        rows.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(rows)
    }

    async fn update_status(&self, id: Uuid, status: ContactStatus) -> AppResult<ContactRequest> {
        let mut contacts = self.contacts.write().await;
        let contact = contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Contact {} not found", id)))?;
        contact.status = status;
        Ok(contact.clone())
    }
}
