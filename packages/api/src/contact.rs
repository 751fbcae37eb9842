//! Contact form persistence.

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::get_pool;
use crate::error::ApiError;
use crate::models::{Contact, ContactForm, ContactReceipt, ContactStatus};
use crate::validation::{self, ContactSubmission};

/// Number of rows served by `GET /api/contact`.
pub const RECENT_LIMIT: i64 = 50;

/// Validate a form and store it, returning the receipt sent back to the visitor.
/// Invalid forms are rejected before a connection is taken.
pub async fn send(form: &ContactForm) -> Result<ContactReceipt, ApiError> {
    let submission = validation::validate_contact(form).map_err(ApiError::Validation)?;
    let id = submit(get_pool().await?, &submission).await?;
    Ok(ContactReceipt {
        message: "Message sent successfully".to_string(),
        id: id.to_string(),
    })
}

/// Insert a validated submission with status `NEW`.
#[tracing::instrument(skip_all, fields(email = %submission.email))]
pub async fn submit(pool: &PgPool, submission: &ContactSubmission) -> Result<Uuid, ApiError> {
    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO contacts (name, email, subject, message, budget, timeline, status)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING id",
    )
    .bind(&submission.name)
    .bind(&submission.email)
    .bind(&submission.subject)
    .bind(&submission.message)
    .bind(&submission.budget)
    .bind(&submission.timeline)
    .bind(ContactStatus::New)
    .fetch_one(pool)
    .await?;

    tracing::info!(%id, "Contact submission stored");
    Ok(id)
}

/// Most recent contacts, newest first.
pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<Contact>, ApiError> {
    let contacts = sqlx::query_as("SELECT * FROM contacts ORDER BY created_at DESC LIMIT $1")
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(contacts)
}
