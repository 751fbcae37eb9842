//! Aggregate site statistics and the admin dashboard payload.

use serde::{Deserialize, Serialize};

use super::{ContactInfo, SubscriberCounts};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SubscriberTotals {
    pub total: i64,
    pub active: i64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactTotals {
    pub total: i64,
    /// Contacts still in status `NEW`.
    pub unread: i64,
}

/// Counts across subscribers, contacts, projects and published posts.
///
/// `generated_at` is the RFC 3339 time the counts were taken, so a cached value keeps
/// the timestamp of the query that produced it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteStats {
    pub subscribers: SubscriberTotals,
    pub contacts: ContactTotals,
    pub projects: i64,
    pub posts: i64,
    pub generated_at: String,
}

/// `GET /api/stats` response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: SiteStats,
    pub cached: bool,
}

/// Everything the admin dashboard renders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub stats: SiteStats,
    pub subscribers: SubscriberCounts,
    pub recent_contacts: Vec<ContactInfo>,
}
