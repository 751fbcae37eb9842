//! # Language-model providers and the fallback chain
//!
//! [`select`] walks a fixed priority list (Anthropic, OpenAI, Groq) and returns the
//! first provider whose API key is configured. The choice is made once per request;
//! there is no health checking and no retry on another provider after a failure.
//! With nothing configured the request fails closed with
//! [`ApiError::NoProviderConfigured`].
//!
//! [`Provider::stream`] always asks for a streamed completion and turns the provider's
//! server-sent events into a stream of plain text deltas:
//!
//! - Anthropic: `content_block_delta` events carry `delta.text`; `message_stop` ends it.
//! - OpenAI and Groq (OpenAI-compatible): `choices[0].delta.content`; `[DONE]` ends it.

use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use serde_json::{json, Value};

use super::sse::{SseDecoder, SseEvent};
use super::TextStream;
use crate::error::ApiError;
use crate::models::ChatMessage;
use crate::settings::AiSettings;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Anthropic,
    OpenAi,
    Groq,
}

impl ProviderKind {
    /// Fallback order, highest priority first.
    pub const CHAIN: [ProviderKind; 3] =
        [ProviderKind::Anthropic, ProviderKind::OpenAi, ProviderKind::Groq];

    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Groq => "groq",
        }
    }

    fn endpoint(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "https://api.anthropic.com/v1/messages",
            ProviderKind::OpenAi => "https://api.openai.com/v1/chat/completions",
            ProviderKind::Groq => "https://api.groq.com/openai/v1/chat/completions",
        }
    }

    fn credentials<'a>(&self, ai: &'a AiSettings) -> (Option<&'a str>, &'a str) {
        let (key, model) = match self {
            ProviderKind::Anthropic => (&ai.anthropic_api_key, &ai.anthropic_model),
            ProviderKind::OpenAi => (&ai.openai_api_key, &ai.openai_model),
            ProviderKind::Groq => (&ai.groq_api_key, &ai.groq_model),
        };
        let key = key.as_deref().map(str::trim).filter(|k| !k.is_empty());
        (key, model.as_str())
    }
}

/// What a single SSE event contributes to the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delta {
    Text(String),
    Done,
    Error(String),
    Skip,
}

impl ProviderKind {
    pub fn delta(&self, event: &SseEvent) -> Delta {
        match self {
            ProviderKind::Anthropic => anthropic_delta(event),
            ProviderKind::OpenAi | ProviderKind::Groq => openai_delta(event),
        }
    }
}

fn anthropic_delta(event: &SseEvent) -> Delta {
    let Ok(data) = serde_json::from_str::<Value>(&event.data) else {
        return Delta::Skip;
    };
    match data["type"].as_str() {
        Some("content_block_delta") => match data["delta"]["text"].as_str() {
            Some(text) if !text.is_empty() => Delta::Text(text.to_string()),
            _ => Delta::Skip,
        },
        Some("message_stop") => Delta::Done,
        Some("error") => Delta::Error(
            data["error"]["message"]
                .as_str()
                .unwrap_or("unknown provider error")
                .to_string(),
        ),
        _ => Delta::Skip,
    }
}

fn openai_delta(event: &SseEvent) -> Delta {
    if event.data.trim() == "[DONE]" {
        return Delta::Done;
    }
    let Ok(data) = serde_json::from_str::<Value>(&event.data) else {
        return Delta::Skip;
    };
    if let Some(message) = data["error"]["message"].as_str() {
        return Delta::Error(message.to_string());
    }
    match data["choices"][0]["delta"]["content"].as_str() {
        Some(text) if !text.is_empty() => Delta::Text(text.to_string()),
        _ => Delta::Skip,
    }
}

/// The provider chosen for one request.
#[derive(Clone)]
pub struct Provider {
    pub kind: ProviderKind,
    pub model: String,
    api_key: String,
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("kind", &self.kind)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// Pick the first configured provider in [`ProviderKind::CHAIN`] order.
pub fn select(ai: &AiSettings) -> Result<Provider, ApiError> {
    ProviderKind::CHAIN
        .iter()
        .find_map(|kind| {
            let (key, model) = kind.credentials(ai);
            key.map(|key| Provider {
                kind: *kind,
                model: model.to_string(),
                api_key: key.to_string(),
            })
        })
        .ok_or(ApiError::NoProviderConfigured)
}

fn http_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client, using defaults: {}", e);
                Client::new()
            })
    })
}

impl Provider {
    /// JSON request body for a streamed completion.
    pub fn request_body(&self, messages: &[ChatMessage], max_tokens: u32) -> Value {
        match self.kind {
            ProviderKind::Anthropic => {
                let system: Vec<&str> = messages
                    .iter()
                    .filter(|m| m.is_system())
                    .map(|m| m.content.as_str())
                    .collect();
                let turns: Vec<Value> = messages
                    .iter()
                    .filter(|m| !m.is_system())
                    .map(|m| json!({ "role": m.role, "content": m.content }))
                    .collect();

                let mut body = json!({
                    "model": self.model,
                    "max_tokens": max_tokens,
                    "stream": true,
                    "messages": turns,
                });
                if !system.is_empty() {
                    body["system"] = json!(system.join("\n\n"));
                }
                body
            }
            ProviderKind::OpenAi | ProviderKind::Groq => json!({
                "model": self.model,
                "max_tokens": max_tokens,
                "stream": true,
                "messages": messages,
            }),
        }
    }

    /// Start a streamed completion and return its text deltas.
    pub async fn stream(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<TextStream, ApiError> {
        let body = self.request_body(messages, max_tokens);
        let request = http_client().post(self.kind.endpoint()).json(&body);
        let request = match self.kind {
            ProviderKind::Anthropic => request
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION),
            ProviderKind::OpenAi | ProviderKind::Groq => request.bearer_auth(&self.api_key),
        };

        tracing::info!(
            provider = self.kind.name(),
            model = %self.model,
            messages = messages.len(),
            "Calling LLM API"
        );

        let response = request.send().await.map_err(|e| {
            tracing::error!(provider = self.kind.name(), "HTTP request failed: {}", e);
            ApiError::Provider(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!(provider = self.kind.name(), status = %status, "Provider API error: {}", text);
            return Err(ApiError::Provider(format!(
                "{} returned {}",
                self.kind.name(),
                status
            )));
        }

        let kind = self.kind;
        let mut bytes = Box::pin(response.bytes_stream());
        let stream = async_stream::stream! {
            let mut decoder = SseDecoder::new();
            while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        yield Err(ApiError::Provider(e.to_string()));
                        return;
                    }
                };
                for event in decoder.push(&chunk) {
                    match kind.delta(&event) {
                        Delta::Text(text) => yield Ok(text),
                        Delta::Done => return,
                        Delta::Error(message) => {
                            yield Err(ApiError::Provider(message));
                            return;
                        }
                        Delta::Skip => {}
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(data: &str) -> SseEvent {
        SseEvent {
            event: None,
            data: data.to_string(),
        }
    }

    fn ai(anthropic: Option<&str>, openai: Option<&str>, groq: Option<&str>) -> AiSettings {
        AiSettings {
            anthropic_api_key: anthropic.map(str::to_string),
            openai_api_key: openai.map(str::to_string),
            groq_api_key: groq.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_provider_fails_closed() {
        let err = select(&ai(None, None, None)).unwrap_err();
        assert!(matches!(err, ApiError::NoProviderConfigured));
    }

    #[test]
    fn test_blank_keys_do_not_count() {
        let err = select(&ai(Some(""), Some("   "), None)).unwrap_err();
        assert!(matches!(err, ApiError::NoProviderConfigured));
    }

    #[test]
    fn test_chain_priority() {
        let all = select(&ai(Some("a"), Some("o"), Some("g"))).unwrap();
        assert_eq!(all.kind, ProviderKind::Anthropic);

        let openai = select(&ai(None, Some("o"), Some("g"))).unwrap();
        assert_eq!(openai.kind, ProviderKind::OpenAi);
        assert_eq!(openai.model, "gpt-4o-mini");

        let groq = select(&ai(None, None, Some("g"))).unwrap();
        assert_eq!(groq.kind, ProviderKind::Groq);
    }

    #[test]
    fn test_debug_hides_key() {
        let provider = select(&ai(None, Some("sk-secret"), None)).unwrap();
        assert!(!format!("{:?}", provider).contains("sk-secret"));
    }

    #[test]
    fn test_anthropic_body_lifts_system_prompt() {
        let provider = select(&ai(Some("a"), None, None)).unwrap();
        let body = provider.request_body(
            &[
                ChatMessage::system("Be brief."),
                ChatMessage::user("Hi"),
                ChatMessage::assistant("Hello"),
            ],
            256,
        );
        assert_eq!(body["system"], "Be brief.");
        assert_eq!(body["stream"], true);
        assert_eq!(body["max_tokens"], 256);
        assert_eq!(body["messages"].as_array().unwrap().len(), 2);
        assert_eq!(body["messages"][0]["role"], "user");
    }

    #[test]
    fn test_openai_body_keeps_messages() {
        let provider = select(&ai(None, Some("o"), None)).unwrap();
        let body = provider.request_body(&[ChatMessage::system("x"), ChatMessage::user("y")], 64);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["model"], "gpt-4o-mini");
    }

    #[test]
    fn test_anthropic_deltas() {
        let kind = ProviderKind::Anthropic;
        assert_eq!(
            kind.delta(&event(
                r#"{"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Hi"}}"#
            )),
            Delta::Text("Hi".to_string())
        );
        assert_eq!(kind.delta(&event(r#"{"type":"message_start"}"#)), Delta::Skip);
        assert_eq!(kind.delta(&event(r#"{"type":"message_stop"}"#)), Delta::Done);
        assert_eq!(
            kind.delta(&event(
                r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#
            )),
            Delta::Error("Overloaded".to_string())
        );
    }

    #[test]
    fn test_openai_deltas() {
        let kind = ProviderKind::OpenAi;
        assert_eq!(
            kind.delta(&event(r#"{"choices":[{"index":0,"delta":{"content":"Hel"}}]}"#)),
            Delta::Text("Hel".to_string())
        );
        assert_eq!(
            kind.delta(&event(r#"{"choices":[{"index":0,"delta":{"role":"assistant"}}]}"#)),
            Delta::Skip
        );
        assert_eq!(kind.delta(&event("[DONE]")), Delta::Done);
        assert_eq!(kind.delta(&event("not json")), Delta::Skip);
    }
}
