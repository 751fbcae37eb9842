//! Resume analysis records.
//!
//! An analysis is written once per tool invocation. `score` exists in the table but is
//! never computed; it stays `NULL`.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::{types::Json, FromRow};
#[cfg(feature = "server")]
use uuid::Uuid;

/// `POST /api/resume/analyze` request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResumeRequest {
    pub resume: String,
}

/// Suggestions blob stored as JSONB.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResumeSuggestions {
    pub summary: String,
    pub provider: String,
}

#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct ResumeAnalysis {
    pub id: Uuid,
    pub input: String,
    pub suggestions: Json<ResumeSuggestions>,
    pub score: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl ResumeAnalysis {
    pub fn to_info(&self) -> ResumeAnalysisInfo {
        ResumeAnalysisInfo {
            id: self.id.to_string(),
            suggestions: self.suggestions.0.clone(),
            score: self.score,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResumeAnalysisInfo {
    pub id: String,
    pub suggestions: ResumeSuggestions,
    pub score: Option<i32>,
}
