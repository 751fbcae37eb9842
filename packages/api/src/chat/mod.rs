//! # Chat proxy
//!
//! Flow for one request:
//!
//! 1. validate the transcript ([`crate::validation::validate_chat`]),
//! 2. pick a provider from the fallback chain ([`provider::select`]); fail closed if
//!    none is configured,
//! 3. upsert the transcript into `chat_sessions` when a session id was given
//!    (whole-row overwrite, last write wins),
//! 4. prepend the assistant's system prompt unless the caller supplied one,
//! 5. stream the provider's reply back as text deltas.
//!
//! The REST endpoint forwards the stream as it arrives; the server function used by
//! the UI collects it with [`collect_text`].

pub mod provider;
pub mod sse;

use futures_util::stream::BoxStream;
use futures_util::TryStreamExt;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::db::get_pool;
use crate::error::ApiError;
use crate::models::{ChatMessage, ChatRequest};
use crate::settings::AiSettings;
use crate::validation;

pub use provider::{Provider, ProviderKind};

/// Text deltas of an assistant reply.
pub type TextStream = BoxStream<'static, Result<String, ApiError>>;

pub const SYSTEM_PROMPT: &str = "You are the assistant on a software engineer's portfolio site. \
Answer questions about their projects and experience, and help visitors improve their resumes \
with concrete, actionable suggestions. Keep answers concise and friendly.";

/// Prepend the default system prompt unless the transcript already has one.
pub fn prepare_messages(messages: &[ChatMessage]) -> Vec<ChatMessage> {
    let mut prepared = Vec::with_capacity(messages.len() + 1);
    if !messages.iter().any(ChatMessage::is_system) {
        prepared.push(ChatMessage::system(SYSTEM_PROMPT));
    }
    prepared.extend(messages.iter().cloned());
    prepared
}

/// Overwrite the stored transcript for `session_id`.
#[tracing::instrument(skip(pool, messages), fields(messages = messages.len()))]
pub async fn persist_session(
    pool: &PgPool,
    session_id: &str,
    messages: &[ChatMessage],
) -> Result<(), ApiError> {
    sqlx::query(
        "INSERT INTO chat_sessions (session_id, messages)
         VALUES ($1, $2)
         ON CONFLICT (session_id) DO UPDATE SET
            messages = EXCLUDED.messages,
            updated_at = NOW()",
    )
    .bind(session_id)
    .bind(Json(messages))
    .execute(pool)
    .await?;
    Ok(())
}

/// Run steps 1–5 and return the reply stream. The database is only touched when
/// there is a transcript to store.
pub async fn reply_stream(ai: &AiSettings, request: &ChatRequest) -> Result<TextStream, ApiError> {
    validation::validate_chat(request).map_err(ApiError::Validation)?;
    let provider = provider::select(ai)?;

    if let Some(session_id) = request.session_key() {
        persist_session(get_pool().await?, session_id, &request.messages).await?;
    }

    provider
        .stream(&prepare_messages(&request.messages), ai.max_tokens)
        .await
}

/// Drain a reply stream into one string.
pub async fn collect_text(stream: TextStream) -> Result<String, ApiError> {
    stream.try_collect().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatSession;
    use futures_util::stream;

    #[test]
    fn test_system_prompt_is_prepended() {
        let prepared = prepare_messages(&[ChatMessage::user("Hi")]);
        assert_eq!(prepared.len(), 2);
        assert_eq!(prepared[0], ChatMessage::system(SYSTEM_PROMPT));
        assert_eq!(prepared[1], ChatMessage::user("Hi"));
    }

    #[test]
    fn test_caller_system_prompt_wins() {
        let messages = vec![ChatMessage::system("Custom"), ChatMessage::user("Hi")];
        assert_eq!(prepare_messages(&messages), messages);
    }

    #[tokio::test]
    async fn test_collect_text_joins_deltas() {
        let deltas: TextStream = Box::pin(stream::iter(vec![
            Ok("Hel".to_string()),
            Ok("lo".to_string()),
        ]));
        assert_eq!(collect_text(deltas).await.unwrap(), "Hello");
    }

    #[tokio::test]
    async fn test_collect_text_stops_at_error() {
        let deltas: TextStream = Box::pin(stream::iter(vec![
            Ok("partial".to_string()),
            Err(ApiError::Provider("reset".to_string())),
        ]));
        assert!(matches!(
            collect_text(deltas).await,
            Err(ApiError::Provider(_))
        ));
    }

    async fn stored(pool: &PgPool, session_id: &str) -> Vec<ChatSession> {
        sqlx::query_as("SELECT * FROM chat_sessions WHERE session_id = $1")
            .bind(session_id)
            .fetch_all(pool)
            .await
            .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_persist_session_overwrites_in_place(pool: PgPool) {
        let first = vec![ChatMessage::user("Hi")];
        persist_session(&pool, "visitor-1", &first).await.unwrap();
        let created = stored(&pool, "visitor-1").await;
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].messages.0, first);

        let second = vec![
            ChatMessage::user("Hi"),
            ChatMessage::assistant("Hello!"),
            ChatMessage::user("Can you review my resume?"),
        ];
        persist_session(&pool, "visitor-1", &second).await.unwrap();

        let rows = stored(&pool, "visitor-1").await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, created[0].id);
        assert_eq!(rows[0].created_at, created[0].created_at);
        assert_eq!(rows[0].messages.0, second);
        assert!(rows[0].updated_at >= created[0].updated_at);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_sessions_are_kept_apart(pool: PgPool) {
        persist_session(&pool, "visitor-1", &[ChatMessage::user("one")]).await.unwrap();
        persist_session(&pool, "visitor-2", &[ChatMessage::user("two")]).await.unwrap();

        assert_eq!(stored(&pool, "visitor-1").await[0].messages.0, vec![ChatMessage::user("one")]);
        assert_eq!(stored(&pool, "visitor-2").await[0].messages.0, vec![ChatMessage::user("two")]);
    }
}
