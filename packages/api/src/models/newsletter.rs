//! Newsletter subscriber rows and the payloads around them.
//!
//! Subscribers are keyed by email. Unsubscribing is a soft delete (`is_active = false`)
//! and resubscribing reuses the same row, so `subscribed_at` always records the very
//! first subscription.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Subscribe request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SubscribeForm {
    pub email: String,
    pub name: Option<String>,
    pub interests: Option<Vec<String>>,
}

/// Full subscriber record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct Subscriber {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub interests: Vec<String>,
    pub is_active: bool,
    pub subscribed_at: DateTime<Utc>,
    pub unsubscribed_at: Option<DateTime<Utc>>,
    pub resubscribed_at: Option<DateTime<Utc>>,
}

/// Response to a successful subscribe or reactivation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionReceipt {
    pub message: String,
    pub id: String,
}

/// Aggregate subscriber counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SubscriberCounts {
    pub total: i64,
    pub active: i64,
    pub unsubscribed: i64,
}
