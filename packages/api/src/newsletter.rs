//! # Newsletter subscriptions — upsert by email
//!
//! A subscribe request takes exactly one of three branches, decided by [`plan`] from the
//! existing row (if any) for the normalized email:
//!
//! | Existing row | Branch | Effect |
//! |--------------|--------|--------|
//! | none | [`SubscribePlan::Insert`] | insert a new active row |
//! | active | [`SubscribePlan::AlreadyActive`] | reject with 400, row untouched |
//! | inactive | [`SubscribePlan::Reactivate`] | flip `is_active`, stamp `resubscribed_at`, merge name/interests |
//!
//! Reactivation keeps `subscribed_at` and `unsubscribed_at` as historical record. A new
//! name replaces the old one only when supplied; a non-empty interests list replaces
//! the old list.
//!
//! Unsubscribing is a soft delete: `is_active = false` and `unsubscribed_at = NOW()`.

use axum::http::StatusCode;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::get_pool;
use crate::error::ApiError;
use crate::models::{SubscribeForm, Subscriber, SubscriberCounts, SubscriptionReceipt};
use crate::validation::{self, NewSubscription};

/// Decision for one subscribe request.
#[derive(Debug, Clone, PartialEq)]
pub enum SubscribePlan {
    Insert,
    AlreadyActive,
    Reactivate {
        id: Uuid,
        name: Option<String>,
        interests: Vec<String>,
    },
}

pub fn plan(existing: Option<&Subscriber>, request: &NewSubscription) -> SubscribePlan {
    match existing {
        None => SubscribePlan::Insert,
        Some(row) if row.is_active => SubscribePlan::AlreadyActive,
        Some(row) => SubscribePlan::Reactivate {
            id: row.id,
            name: request.name.clone().or_else(|| row.name.clone()),
            interests: if request.interests.is_empty() {
                row.interests.clone()
            } else {
                request.interests.clone()
            },
        },
    }
}

/// Result of a successful subscribe request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Subscribed(Uuid),
    Reactivated(Uuid),
}

impl SubscribeOutcome {
    pub fn status(&self) -> StatusCode {
        match self {
            SubscribeOutcome::Subscribed(_) => StatusCode::CREATED,
            SubscribeOutcome::Reactivated(_) => StatusCode::OK,
        }
    }

    pub fn receipt(&self) -> SubscriptionReceipt {
        let (message, id) = match self {
            SubscribeOutcome::Subscribed(id) => ("Successfully subscribed to newsletter", id),
            SubscribeOutcome::Reactivated(id) => {
                ("Welcome back! Your subscription has been reactivated", id)
            }
        };
        SubscriptionReceipt {
            message: message.to_string(),
            id: id.to_string(),
        }
    }
}

fn already_subscribed() -> ApiError {
    ApiError::BadRequest("Email is already subscribed".to_string())
}

/// Validate and apply a subscribe form.
pub async fn subscribe_form(form: &SubscribeForm) -> Result<SubscribeOutcome, ApiError> {
    let request = validation::validate_subscription(form).map_err(ApiError::Validation)?;
    subscribe(get_pool().await?, &request).await
}

#[tracing::instrument(skip(pool, request), fields(email = %request.email))]
pub async fn subscribe(
    pool: &PgPool,
    request: &NewSubscription,
) -> Result<SubscribeOutcome, ApiError> {
    let existing: Option<Subscriber> =
        sqlx::query_as("SELECT * FROM newsletter_subscribers WHERE email = $1")
            .bind(&request.email)
            .fetch_optional(pool)
            .await?;

    match plan(existing.as_ref(), request) {
        SubscribePlan::AlreadyActive => {
            tracing::info!("Subscribe rejected: already active");
            Err(already_subscribed())
        }
        SubscribePlan::Insert => {
            // A concurrent insert for the same email loses the race and is treated
            // as already subscribed.
            let id: Option<(Uuid,)> = sqlx::query_as(
                "INSERT INTO newsletter_subscribers (email, name, interests)
                 VALUES ($1, $2, $3)
                 ON CONFLICT (email) DO NOTHING
                 RETURNING id",
            )
            .bind(&request.email)
            .bind(&request.name)
            .bind(&request.interests)
            .fetch_optional(pool)
            .await?;

            let Some((id,)) = id else {
                return Err(already_subscribed());
            };
            tracing::info!(%id, "New subscriber");
            Ok(SubscribeOutcome::Subscribed(id))
        }
        SubscribePlan::Reactivate {
            id,
            name,
            interests,
        } => {
            let updated = sqlx::query(
                "UPDATE newsletter_subscribers
                 SET is_active = TRUE,
                     resubscribed_at = NOW(),
                     name = $2,
                     interests = $3
                 WHERE id = $1 AND is_active = FALSE",
            )
            .bind(id)
            .bind(&name)
            .bind(&interests)
            .execute(pool)
            .await?;

            if updated.rows_affected() == 0 {
                return Err(already_subscribed());
            }
            tracing::info!(%id, "Subscriber reactivated");
            Ok(SubscribeOutcome::Reactivated(id))
        }
    }
}

/// Soft-unsubscribe an active subscriber.
#[tracing::instrument(skip(pool))]
pub async fn unsubscribe(pool: &PgPool, email: &str) -> Result<Uuid, ApiError> {
    let id: Option<(Uuid,)> = sqlx::query_as(
        "UPDATE newsletter_subscribers
         SET is_active = FALSE, unsubscribed_at = NOW()
         WHERE email = $1 AND is_active = TRUE
         RETURNING id",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    match id {
        Some((id,)) => {
            tracing::info!(%id, "Subscriber unsubscribed");
            Ok(id)
        }
        None => Err(ApiError::NotFound(
            "Email not found or already unsubscribed".to_string(),
        )),
    }
}

pub async fn counts(pool: &PgPool) -> Result<SubscriberCounts, ApiError> {
    let (total, active): (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COUNT(*) FILTER (WHERE is_active) FROM newsletter_subscribers",
    )
    .fetch_one(pool)
    .await?;

    Ok(SubscriberCounts {
        total,
        active,
        unsubscribed: total - active,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn request(name: Option<&str>, interests: &[&str]) -> NewSubscription {
        NewSubscription {
            email: "reader@example.com".to_string(),
            name: name.map(str::to_string),
            interests: interests.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn subscriber(is_active: bool) -> Subscriber {
        let subscribed_at = Utc::now() - Duration::days(30);
        Subscriber {
            id: Uuid::new_v4(),
            email: "reader@example.com".to_string(),
            name: Some("Old Name".to_string()),
            interests: vec!["rust".to_string()],
            is_active,
            subscribed_at,
            unsubscribed_at: (!is_active).then(|| subscribed_at + Duration::days(10)),
            resubscribed_at: None,
        }
    }

    #[test]
    fn test_unknown_email_inserts() {
        assert_eq!(plan(None, &request(None, &[])), SubscribePlan::Insert);
    }

    #[test]
    fn test_active_email_is_rejected() {
        let row = subscriber(true);
        let plan = plan(Some(&row), &request(Some("New Name"), &["web"]));
        assert_eq!(plan, SubscribePlan::AlreadyActive);
    }

    #[test]
    fn test_reactivation_keeps_old_values_when_not_supplied() {
        let row = subscriber(false);
        let plan = plan(Some(&row), &request(None, &[]));
        assert_eq!(
            plan,
            SubscribePlan::Reactivate {
                id: row.id,
                name: Some("Old Name".to_string()),
                interests: vec!["rust".to_string()],
            }
        );
    }

    #[test]
    fn test_reactivation_prefers_new_values() {
        let row = subscriber(false);
        let plan = plan(Some(&row), &request(Some("New Name"), &["web", "ai"]));
        assert_eq!(
            plan,
            SubscribePlan::Reactivate {
                id: row.id,
                name: Some("New Name".to_string()),
                interests: vec!["web".to_string(), "ai".to_string()],
            }
        );
    }

    #[test]
    fn test_outcome_status_and_message() {
        let id = Uuid::new_v4();
        let subscribed = SubscribeOutcome::Subscribed(id);
        assert_eq!(subscribed.status(), StatusCode::CREATED);
        assert_eq!(subscribed.receipt().id, id.to_string());

        let reactivated = SubscribeOutcome::Reactivated(id);
        assert_eq!(reactivated.status(), StatusCode::OK);
        assert!(reactivated.receipt().message.starts_with("Welcome back"));
    }

    async fn stored(pool: &PgPool, email: &str) -> Subscriber {
        sqlx::query_as("SELECT * FROM newsletter_subscribers WHERE email = $1")
            .bind(email)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_subscribe_inserts_active_row(pool: PgPool) {
        let outcome = subscribe(&pool, &request(Some("Reader"), &["rust"])).await.unwrap();
        let SubscribeOutcome::Subscribed(id) = outcome else {
            panic!("expected a new subscription, got {outcome:?}");
        };

        let row = stored(&pool, "reader@example.com").await;
        assert_eq!(row.id, id);
        assert!(row.is_active);
        assert_eq!(row.name.as_deref(), Some("Reader"));
        assert_eq!(row.interests, vec!["rust".to_string()]);
        assert_eq!(row.unsubscribed_at, None);
        assert_eq!(row.resubscribed_at, None);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_active_subscriber_row_is_untouched(pool: PgPool) {
        subscribe(&pool, &request(Some("Reader"), &["rust"])).await.unwrap();
        let before = stored(&pool, "reader@example.com").await;

        let err = subscribe(&pool, &request(Some("Someone Else"), &["web"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));

        let after = stored(&pool, "reader@example.com").await;
        assert_eq!(after.name, before.name);
        assert_eq!(after.interests, before.interests);
        assert_eq!(after.subscribed_at, before.subscribed_at);
        assert_eq!(after.resubscribed_at, None);
        assert_eq!(counts(&pool).await.unwrap().total, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_reactivation_keeps_history(pool: PgPool) {
        subscribe(&pool, &request(Some("Reader"), &["rust"])).await.unwrap();
        unsubscribe(&pool, "reader@example.com").await.unwrap();
        let unsubscribed = stored(&pool, "reader@example.com").await;
        assert!(!unsubscribed.is_active);
        let unsubscribed_at = unsubscribed.unsubscribed_at.expect("unsubscribed_at is set");

        let outcome = subscribe(&pool, &request(None, &["web"])).await.unwrap();
        assert_eq!(outcome, SubscribeOutcome::Reactivated(unsubscribed.id));
        assert_eq!(outcome.status(), StatusCode::OK);

        let row = stored(&pool, "reader@example.com").await;
        assert!(row.is_active);
        assert_eq!(row.subscribed_at, unsubscribed.subscribed_at);
        assert_eq!(row.unsubscribed_at, Some(unsubscribed_at));
        assert!(row.resubscribed_at.is_some());
        assert_eq!(row.name.as_deref(), Some("Reader"));
        assert_eq!(row.interests, vec!["web".to_string()]);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_unsubscribe_unknown_or_inactive_is_not_found(pool: PgPool) {
        let err = unsubscribe(&pool, "nobody@example.com").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        subscribe(&pool, &request(None, &[])).await.unwrap();
        unsubscribe(&pool, "reader@example.com").await.unwrap();
        let err = unsubscribe(&pool, "reader@example.com").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let counts = counts(&pool).await.unwrap();
        assert_eq!((counts.total, counts.active, counts.unsubscribed), (1, 0, 1));
    }
}
