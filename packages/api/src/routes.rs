//! JSON REST surface, merged into the Dioxus server router by the web crate.
//!
//! Every handler returns `Result<_, ApiError>`; the error's `IntoResponse` picks the
//! status code and body. Malformed JSON is rejected by the `Json` extractor before a
//! handler runs.

use axum::{
    body::Body,
    extract::Query,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use futures_util::TryStreamExt;
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;

use crate::db::get_pool;
use crate::error::ApiError;
use crate::models::{
    ChatRequest, ContactForm, ContactInfo, ContactReceipt, ResumeAnalysisInfo, ResumeRequest,
    StatsResponse, SubscribeForm, SubscriberCounts,
};
use crate::{auth, chat, contact, newsletter, resume, settings, stats, validation};

pub fn router() -> Router {
    Router::new()
        .route("/api/contact", post(create_contact).get(list_contacts))
        .route(
            "/api/newsletter",
            post(subscribe).delete(unsubscribe).get(subscriber_counts),
        )
        .route("/api/stats", get(site_stats))
        .route("/api/chat", post(chat_reply))
        .route("/api/resume/analyze", post(analyze_resume))
}

async fn create_contact(Json(form): Json<ContactForm>) -> Result<Json<ContactReceipt>, ApiError> {
    Ok(Json(contact::send(&form).await?))
}

async fn list_contacts(session: Session) -> Result<Json<Vec<ContactInfo>>, ApiError> {
    auth::require_admin(&session).await?;
    let contacts = contact::recent(get_pool().await?, contact::RECENT_LIMIT).await?;
    Ok(Json(contacts.iter().map(|c| c.to_info()).collect()))
}

async fn subscribe(Json(form): Json<SubscribeForm>) -> Result<Response, ApiError> {
    let outcome = newsletter::subscribe_form(&form).await?;
    Ok((outcome.status(), Json(outcome.receipt())).into_response())
}

#[derive(Debug, Deserialize)]
struct UnsubscribeQuery {
    email: Option<String>,
}

async fn unsubscribe(Query(query): Query<UnsubscribeQuery>) -> Result<Response, ApiError> {
    let email =
        validation::validate_unsubscribe(query.email.as_deref()).map_err(ApiError::Validation)?;
    let id = newsletter::unsubscribe(get_pool().await?, &email).await?;
    Ok(Json(json!({
        "message": "Successfully unsubscribed from newsletter",
        "id": id.to_string(),
    }))
    .into_response())
}

async fn subscriber_counts() -> Result<Json<SubscriberCounts>, ApiError> {
    Ok(Json(newsletter::counts(get_pool().await?).await?))
}

async fn site_stats() -> Result<Json<StatsResponse>, ApiError> {
    Ok(Json(stats::current(get_pool().await?).await?))
}

/// Forwards text deltas as they arrive. A provider failure after the first byte
/// can only end the body early; it is logged here.
async fn chat_reply(Json(request): Json<ChatRequest>) -> Result<Response, ApiError> {
    let deltas = chat::reply_stream(&settings::get().ai, &request)
        .await?
        .inspect_err(|e| tracing::error!(error = %e, "Chat stream aborted"));

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(deltas),
    )
        .into_response())
}

async fn analyze_resume(
    Json(request): Json<ResumeRequest>,
) -> Result<Json<ResumeAnalysisInfo>, ApiError> {
    Ok(Json(
        resume::analyze(&settings::get().ai, &request.resume).await?,
    ))
}
