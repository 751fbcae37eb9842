//! Chat messages exchanged with the resume assistant.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::{types::Json, FromRow};
#[cfg(feature = "server")]
use uuid::Uuid;

/// Roles accepted in a chat transcript.
pub const CHAT_ROLES: [&str; 3] = ["system", "user", "assistant"];

/// One turn of a conversation, in the OpenAI-style `{role, content}` shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }

    pub fn is_system(&self) -> bool {
        self.role == "system"
    }
}

/// `POST /api/chat` request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub session_id: Option<String>,
}

impl ChatRequest {
    /// Session key to persist under; blank ids count as absent.
    pub fn session_key(&self) -> Option<&str> {
        self.session_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Stored transcript for one chat session.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct ChatSession {
    pub id: Uuid,
    pub session_id: String,
    pub messages: Json<Vec<ChatMessage>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full assistant answer returned by the non-streaming server function.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssistantReply {
    pub session_id: String,
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case_session_id() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"messages":[{"role":"user","content":"hi"}],"sessionId":"abc"}"#,
        )
        .unwrap();
        assert_eq!(req.messages, vec![ChatMessage::user("hi")]);
        assert_eq!(req.session_key(), Some("abc"));
    }

    #[test]
    fn test_blank_session_id_is_ignored() {
        let req = ChatRequest {
            messages: vec![],
            session_id: Some("   ".to_string()),
        };
        assert_eq!(req.session_key(), None);
    }
}
