//! # Contact form submissions
//!
//! A contact row is written once per accepted submission and never mutated by the
//! site itself; only the status column is meant to be changed by hand later.
//!
//! - [`ContactForm`] is the raw payload. Every field defaults to empty so that a
//!   missing field surfaces as a validation error rather than a decoding failure.
//! - [`Contact`] (server only) is the full `contacts` row.
//! - [`ContactInfo`] is the client-safe projection returned to the admin view.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Contact form payload as submitted by the site.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub budget: Option<String>,
    pub timeline: Option<String>,
}

/// Processing state of a contact row (`contact_status` enum in Postgres).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "server", derive(sqlx::Type))]
#[cfg_attr(
    feature = "server",
    sqlx(type_name = "contact_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum ContactStatus {
    New,
    Read,
    Replied,
    Archived,
}

impl ContactStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ContactStatus::New => "New",
            ContactStatus::Read => "Read",
            ContactStatus::Replied => "Replied",
            ContactStatus::Archived => "Archived",
        }
    }
}

/// Full contact record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl Contact {
    /// Convert to ContactInfo for client consumption.
    pub fn to_info(&self) -> ContactInfo {
        ContactInfo {
            id: self.id.to_string(),
            name: self.name.clone(),
            email: self.email.clone(),
            subject: self.subject.clone(),
            message: self.message.clone(),
            budget: self.budget.clone(),
            timeline: self.timeline.clone(),
            status: self.status,
            created_at: self.created_at.to_rfc3339(),
        }
    }
}

/// Contact information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub status: ContactStatus,
    pub created_at: String,
}

/// Response to an accepted submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactReceipt {
    pub message: String,
    pub id: String,
}
