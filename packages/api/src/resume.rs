//! Resume analysis: one provider call, one stored record.

use sqlx::types::Json;

use crate::chat::{collect_text, provider};
use crate::db::get_pool;
use crate::error::ApiError;
use crate::models::{ChatMessage, ResumeAnalysis, ResumeAnalysisInfo, ResumeSuggestions};
use crate::settings::AiSettings;
use crate::validation;

const RESUME_PROMPT: &str = "You are a resume reviewer. Read the resume below and reply with \
a short overall assessment followed by a bulleted list of specific improvements: wording, \
quantified impact, structure and missing sections. Do not rewrite the whole resume.";

/// Ask the configured provider for suggestions and store the result. `score` is left
/// `NULL`; nothing computes it.
#[tracing::instrument(skip_all, fields(chars = resume.len()))]
pub async fn analyze(ai: &AiSettings, resume: &str) -> Result<ResumeAnalysisInfo, ApiError> {
    let resume = validation::validate_resume(resume).map_err(ApiError::Validation)?;
    let provider = provider::select(ai)?;

    let messages = [ChatMessage::system(RESUME_PROMPT), ChatMessage::user(&resume)];
    let summary = collect_text(provider.stream(&messages, ai.max_tokens).await?).await?;

    let suggestions = ResumeSuggestions {
        summary,
        provider: provider.kind.name().to_string(),
    };

    let analysis: ResumeAnalysis = sqlx::query_as(
        "INSERT INTO resume_analyses (input, suggestions) VALUES ($1, $2) RETURNING *",
    )
    .bind(&resume)
    .bind(Json(&suggestions))
    .fetch_one(get_pool().await?)
    .await?;

    tracing::info!(id = %analysis.id, "Resume analysis stored");
    Ok(analysis.to_info())
}
