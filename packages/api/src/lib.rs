//! # API crate — backend of the portfolio site
//!
//! Holds the shared models and validation rules used on both sides of the wire, the
//! server-only services behind them, the JSON REST router, and the Dioxus server
//! functions the `ui` components call.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`models`] | — | Wire types; database rows are `server`-only |
//! | [`validation`] | — | Form rules shared by the browser and the server |
//! | [`auth`] | — | Admin password check (Argon2) and session flag |
//! | [`db`] | — | PostgreSQL pool (lazy `OnceCell` singleton) and migrations |
//! | [`settings`] | `server` | Layered configuration (`config.toml` + environment) |
//! | [`error`] | `server` | `ApiError` and its HTTP mapping |
//! | [`contact`], [`newsletter`], [`stats`], [`content`] | `server` | Site data |
//! | [`chat`], [`resume`] | `server` | LLM provider chain, streamed replies, resume review |
//! | [`routes`] | `server` | `/api/*` REST handlers merged into the web server |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is a Dioxus server function, compiled twice:
//! once with the server logic (behind `#[cfg(feature = "server")]`) and once as a
//! client stub that forwards the call over HTTP.
//!
//! - **Site**: `send_contact`, `subscribe_newsletter`, `site_stats`, `list_projects`,
//!   `list_published_posts`
//! - **Assistant**: `ask_assistant`, `analyze_resume`
//! - **Admin**: `admin_login`, `admin_logout`, `is_admin`, `admin_dashboard`

use dioxus::prelude::*;

pub mod auth;
pub mod db;
pub mod models;
pub mod validation;

#[cfg(feature = "server")]
pub mod chat;
#[cfg(feature = "server")]
pub mod contact;
#[cfg(feature = "server")]
pub mod content;
#[cfg(feature = "server")]
pub mod error;
#[cfg(feature = "server")]
pub mod newsletter;
#[cfg(feature = "server")]
pub mod resume;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod settings;
#[cfg(feature = "server")]
pub mod stats;

pub use models::{
    AdminDashboard, AssistantReply, BlogPostInfo, ChatMessage, ContactForm, ContactInfo,
    ContactReceipt, ProjectInfo, ResumeAnalysisInfo, StatsResponse, SubscribeForm,
    SubscriptionReceipt,
};

#[cfg(feature = "server")]
use error::ApiError;

/// Contacts shown on the admin dashboard.
#[cfg(feature = "server")]
const DASHBOARD_CONTACTS: i64 = 20;

/// Store a contact form submission.
#[cfg(feature = "server")]
#[post("/api/site/contact")]
pub async fn send_contact(form: ContactForm) -> Result<ContactReceipt, ServerFnError> {
    contact::send(&form)
        .await
        .map_err(ApiError::into_server_fn_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/site/contact")]
pub async fn send_contact(form: ContactForm) -> Result<ContactReceipt, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Subscribe (or re-subscribe) to the newsletter.
#[cfg(feature = "server")]
#[post("/api/site/newsletter")]
pub async fn subscribe_newsletter(form: SubscribeForm) -> Result<SubscriptionReceipt, ServerFnError> {
    newsletter::subscribe_form(&form)
        .await
        .map(|outcome| outcome.receipt())
        .map_err(ApiError::into_server_fn_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/site/newsletter")]
pub async fn subscribe_newsletter(form: SubscribeForm) -> Result<SubscriptionReceipt, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Site-wide counts, served from the stats cache.
#[cfg(feature = "server")]
#[get("/api/site/stats")]
pub async fn site_stats() -> Result<StatsResponse, ServerFnError> {
    async {
        let pool = db::get_pool().await?;
        stats::current(pool).await
    }
    .await
    .map_err(ApiError::into_server_fn_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/site/stats")]
pub async fn site_stats() -> Result<StatsResponse, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Projects, featured first.
#[cfg(feature = "server")]
#[get("/api/site/projects")]
pub async fn list_projects() -> Result<Vec<ProjectInfo>, ServerFnError> {
    async {
        let projects = content::projects(db::get_pool().await?).await?;
        Ok::<_, ApiError>(projects.iter().map(|p| p.to_info()).collect())
    }
    .await
    .map_err(ApiError::into_server_fn_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/site/projects")]
pub async fn list_projects() -> Result<Vec<ProjectInfo>, ServerFnError> {
    Ok(Vec::new())
}

/// Published blog posts, newest first.
#[cfg(feature = "server")]
#[get("/api/site/posts")]
pub async fn list_published_posts() -> Result<Vec<BlogPostInfo>, ServerFnError> {
    async {
        let posts = content::published_posts(db::get_pool().await?).await?;
        Ok::<_, ApiError>(posts.iter().map(|p| p.to_info()).collect())
    }
    .await
    .map_err(ApiError::into_server_fn_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/site/posts")]
pub async fn list_published_posts() -> Result<Vec<BlogPostInfo>, ServerFnError> {
    Ok(Vec::new())
}

/// Ask the assistant and wait for the whole reply.
///
/// A conversation without an id gets a fresh one, returned in the reply so the next
/// turn overwrites the same `chat_sessions` row.
#[cfg(feature = "server")]
#[post("/api/assistant/reply")]
pub async fn ask_assistant(
    messages: Vec<ChatMessage>,
    session_id: Option<String>,
) -> Result<AssistantReply, ServerFnError> {
    let mut request = models::ChatRequest {
        messages,
        session_id,
    };
    let session_id = match request.session_key() {
        Some(id) => id.to_string(),
        None => uuid::Uuid::new_v4().to_string(),
    };
    request.session_id = Some(session_id.clone());

    async {
        let deltas = chat::reply_stream(&settings::get().ai, &request).await?;
        chat::collect_text(deltas).await
    }
    .await
    .map(|reply| AssistantReply { session_id, reply })
    .map_err(ApiError::into_server_fn_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/assistant/reply")]
pub async fn ask_assistant(
    messages: Vec<ChatMessage>,
    session_id: Option<String>,
) -> Result<AssistantReply, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Review a pasted resume.
#[cfg(feature = "server")]
#[post("/api/assistant/resume")]
pub async fn analyze_resume(resume: String) -> Result<ResumeAnalysisInfo, ServerFnError> {
    resume::analyze(&settings::get().ai, &resume)
        .await
        .map_err(ApiError::into_server_fn_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/assistant/resume")]
pub async fn analyze_resume(resume: String) -> Result<ResumeAnalysisInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log in as the site operator.
#[cfg(feature = "server")]
#[post("/api/admin/login", session: tower_sessions::Session)]
pub async fn admin_login(password: String) -> Result<(), ServerFnError> {
    auth::login(&session, &settings::get().admin, &password)
        .await
        .map_err(ApiError::into_server_fn_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/admin/login")]
pub async fn admin_login(password: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Clear the admin session.
#[cfg(feature = "server")]
#[post("/api/admin/logout", session: tower_sessions::Session)]
pub async fn admin_logout() -> Result<(), ServerFnError> {
    auth::logout(&session)
        .await
        .map_err(ApiError::into_server_fn_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/admin/logout")]
pub async fn admin_logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// Whether the current session is logged in as admin.
#[cfg(feature = "server")]
#[get("/api/admin/me", session: tower_sessions::Session)]
pub async fn is_admin() -> Result<bool, ServerFnError> {
    auth::is_admin(&session)
        .await
        .map_err(ApiError::into_server_fn_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/admin/me")]
pub async fn is_admin() -> Result<bool, ServerFnError> {
    Ok(false)
}

/// Stats, subscriber counts and the latest contact submissions.
#[cfg(feature = "server")]
#[get("/api/admin/dashboard", session: tower_sessions::Session)]
pub async fn admin_dashboard() -> Result<AdminDashboard, ServerFnError> {
    async {
        auth::require_admin(&session).await?;
        let pool = db::get_pool().await?;

        let stats = stats::current(pool).await?.stats;
        let subscribers = newsletter::counts(pool).await?;
        let recent_contacts = contact::recent(pool, DASHBOARD_CONTACTS)
            .await?
            .iter()
            .map(|c| c.to_info())
            .collect();

        Ok::<_, ApiError>(AdminDashboard {
            stats,
            subscribers,
            recent_contacts,
        })
    }
    .await
    .map_err(ApiError::into_server_fn_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/admin/dashboard")]
pub async fn admin_dashboard() -> Result<AdminDashboard, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
