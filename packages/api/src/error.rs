//! Error type shared by the REST handlers and the server functions.
//!
//! Client errors carry their message to the caller. Server-side failures are logged
//! and answered with a generic body so no internal detail leaks.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus::prelude::ServerFnError;
use serde_json::{json, Value};
use thiserror::Error;

use crate::validation::FieldError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid form data")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("AI provider request failed: {0}")]
    Provider(String),

    #[error("AI assistant is not configured")]
    NoProviderConfigured,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Provider(_) => StatusCode::BAD_GATEWAY,
            ApiError::NoProviderConfigured => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the caller.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Provider(_) => "AI provider request failed".to_string(),
            ApiError::Database(_) | ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn body(&self) -> Value {
        match self {
            ApiError::Validation(errors) => json!({
                "message": self.public_message(),
                "errors": errors,
            }),
            _ => json!({ "message": self.public_message() }),
        }
    }

    /// Convert for a Dioxus server function, folding field errors into the message.
    pub fn into_server_fn_error(self) -> ServerFnError {
        self.log();
        let message = match &self {
            ApiError::Validation(errors) => {
                let details: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
                format!("{}: {}", self.public_message(), details.join("; "))
            }
            _ => self.public_message(),
        };
        ServerFnError::new(message)
    }

    fn log(&self) {
        if self.status().is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_body_lists_errors() {
        let err = ApiError::Validation(vec![FieldError::new("name", "Name is too short")]);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.body(),
            json!({
                "message": "Invalid form data",
                "errors": [{"field": "name", "message": "Name is too short"}],
            })
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = ApiError::Internal("connection reset by peer".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body(), json!({ "message": "Internal server error" }));

        let err = ApiError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.body(), json!({ "message": "Internal server error" }));

        let err = ApiError::Provider("401 invalid x-api-key".to_string());
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.body(), json!({ "message": "AI provider request failed" }));
    }

    #[test]
    fn test_missing_provider_is_unavailable() {
        let err = ApiError::NoProviderConfigured;
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            err.body(),
            json!({ "message": "AI assistant is not configured" })
        );
    }

    #[test]
    fn test_client_errors_keep_message() {
        let err = ApiError::BadRequest("Email is already subscribed".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body()["message"], "Email is already subscribed");
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::NotFound("gone".to_string()).status(),
            StatusCode::NOT_FOUND
        );
    }
}
