//! # Site statistics with a cache-aside TTL
//!
//! [`load`] counts subscribers, contacts, projects and published posts in one query.
//! [`StatsCache`] keeps the last result for a fixed TTL (60 s by default); within that
//! window callers get the stored value, including its original `generated_at`, and
//! the response is flagged `cached`.
//!
//! Concurrent misses may both run the query. That only costs a duplicate count.

use std::future::Future;
use std::sync::OnceLock;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use sqlx::PgPool;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::error::ApiError;
use crate::models::{ContactTotals, SiteStats, StatsResponse, SubscriberTotals};
use crate::settings;

struct Entry {
    stored_at: Instant,
    stats: SiteStats,
}

/// Single-value cache with a time-to-live.
pub struct StatsCache {
    ttl: Duration,
    slot: RwLock<Option<Entry>>,
}

impl StatsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Return the cached stats if still fresh, otherwise run `loader` and store its
    /// result. The flag is `true` when the value came from the cache. Loader errors are
    /// returned and nothing is stored.
    pub async fn get_or_refresh<F, Fut>(&self, loader: F) -> Result<(SiteStats, bool), ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<SiteStats, ApiError>>,
    {
        if let Some(entry) = self.slot.read().await.as_ref() {
            if entry.stored_at.elapsed() < self.ttl {
                return Ok((entry.stats.clone(), true));
            }
        }

        let stats = loader().await?;
        *self.slot.write().await = Some(Entry {
            stored_at: Instant::now(),
            stats: stats.clone(),
        });
        Ok((stats, false))
    }
}

/// The process-wide cache, sized from `stats.ttl_secs`.
pub fn cache() -> &'static StatsCache {
    static CACHE: OnceLock<StatsCache> = OnceLock::new();
    CACHE.get_or_init(|| StatsCache::new(Duration::from_secs(settings::get().stats.ttl_secs)))
}

/// Count everything the stats endpoint reports.
pub async fn load(pool: &PgPool) -> Result<SiteStats, ApiError> {
    let (subscribers_total, subscribers_active, contacts_total, contacts_unread, projects, posts): (
        i64,
        i64,
        i64,
        i64,
        i64,
        i64,
    ) = sqlx::query_as(
        "SELECT
            (SELECT COUNT(*) FROM newsletter_subscribers),
            (SELECT COUNT(*) FROM newsletter_subscribers WHERE is_active),
            (SELECT COUNT(*) FROM contacts),
            (SELECT COUNT(*) FROM contacts WHERE status = 'NEW'),
            (SELECT COUNT(*) FROM projects),
            (SELECT COUNT(*) FROM blog_posts WHERE published)",
    )
    .fetch_one(pool)
    .await?;

    Ok(SiteStats {
        subscribers: SubscriberTotals {
            total: subscribers_total,
            active: subscribers_active,
        },
        contacts: ContactTotals {
            total: contacts_total,
            unread: contacts_unread,
        },
        projects,
        posts,
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

/// Stats for `GET /api/stats`, served through the process-wide cache.
pub async fn current(pool: &PgPool) -> Result<StatsResponse, ApiError> {
    let (stats, cached) = cache().get_or_refresh(|| load(pool)).await?;
    tracing::debug!(cached, "Serving site stats");
    Ok(StatsResponse { stats, cached })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample(projects: i64) -> SiteStats {
        SiteStats {
            projects,
            generated_at: format!("run-{projects}"),
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_call_within_ttl_is_cached() {
        let cache = StatsCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let loader = move || async move {
            let n = counter.fetch_add(1, Ordering::SeqCst) as i64;
            Ok(sample(n))
        };

        let (first, cached) = cache.get_or_refresh(loader).await.unwrap();
        assert!(!cached);

        tokio::time::advance(Duration::from_secs(59)).await;
        let (second, cached) = cache.get_or_refresh(loader).await.unwrap();
        assert!(cached);
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_value_is_reloaded() {
        let cache = StatsCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let loader = move || async move {
            let n = counter.fetch_add(1, Ordering::SeqCst) as i64;
            Ok(sample(n))
        };

        cache.get_or_refresh(loader).await.unwrap();
        tokio::time::advance(Duration::from_secs(60)).await;
        let (stats, cached) = cache.get_or_refresh(loader).await.unwrap();
        assert!(!cached);
        assert_eq!(stats.projects, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_loader_error_is_not_cached() {
        let cache = StatsCache::new(Duration::from_secs(60));

        let result = cache
            .get_or_refresh(|| async { Err(ApiError::Internal("down".to_string())) })
            .await;
        assert!(result.is_err());

        let (stats, cached) = cache
            .get_or_refresh(|| async { Ok(sample(7)) })
            .await
            .unwrap();
        assert!(!cached);
        assert_eq!(stats.projects, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cached_payload_differs_only_in_flag() {
        let cache = StatsCache::new(Duration::from_secs(60));
        let (stats, cached) = cache.get_or_refresh(|| async { Ok(sample(3)) }).await.unwrap();
        let first = serde_json::to_value(StatsResponse { stats, cached }).unwrap();

        tokio::time::advance(Duration::from_secs(30)).await;
        let (stats, cached) = cache.get_or_refresh(|| async { Ok(sample(4)) }).await.unwrap();
        let second = serde_json::to_value(StatsResponse { stats, cached }).unwrap();

        let strip = |mut v: serde_json::Value| {
            v.as_object_mut().unwrap().remove("cached");
            v
        };
        assert_eq!(first["cached"], false);
        assert_eq!(second["cached"], true);
        assert_eq!(strip(first), strip(second));
    }
}
