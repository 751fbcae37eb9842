//! # Input validation
//!
//! Shared by the REST handlers, the server functions and the UI forms, so the rules
//! run identically in the browser and on the server. Validators collect every failing
//! field instead of stopping at the first one, and on success return a normalized
//! value (trimmed strings, lowercased email, blank optionals folded to `None`).

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{ChatRequest, ContactForm, SubscribeForm, CHAT_ROLES};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

const MAX_EMAIL_LEN: usize = 254;
pub const MIN_RESUME_CHARS: usize = 50;

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Trim and lowercase an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LEN && EMAIL_RE.is_match(email)
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn require_min(errors: &mut Vec<FieldError>, field: &str, value: &str, min: usize, label: &str) {
    if value.chars().count() < min {
        errors.push(FieldError::new(
            field,
            format!("{label} must be at least {min} characters"),
        ));
    }
}

fn require_email(errors: &mut Vec<FieldError>, email: &str) {
    if !is_valid_email(email) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }
}

/// A contact submission that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub budget: Option<String>,
    pub timeline: Option<String>,
}

/// Validate a contact form: name ≥ 2, subject ≥ 5 and message ≥ 10 characters, plus a
/// well-formed email.
pub fn validate_contact(form: &ContactForm) -> Result<ContactSubmission, Vec<FieldError>> {
    let name = form.name.trim();
    let email = normalize_email(&form.email);
    let subject = form.subject.trim();
    let message = form.message.trim();

    let mut errors = Vec::new();
    require_min(&mut errors, "name", name, 2, "Name");
    require_email(&mut errors, &email);
    require_min(&mut errors, "subject", subject, 5, "Subject");
    require_min(&mut errors, "message", message, 10, "Message");

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ContactSubmission {
        name: name.to_string(),
        email,
        subject: subject.to_string(),
        message: message.to_string(),
        budget: non_blank(form.budget.as_ref()),
        timeline: non_blank(form.timeline.as_ref()),
    })
}

/// A subscribe request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscription {
    pub email: String,
    pub name: Option<String>,
    /// Trimmed, deduplicated in first-seen order, blanks dropped.
    pub interests: Vec<String>,
}

pub fn validate_subscription(form: &SubscribeForm) -> Result<NewSubscription, Vec<FieldError>> {
    let email = normalize_email(&form.email);

    let mut errors = Vec::new();
    require_email(&mut errors, &email);
    if !errors.is_empty() {
        return Err(errors);
    }

    let mut interests: Vec<String> = Vec::new();
    for interest in form.interests.iter().flatten() {
        let interest = interest.trim();
        if !interest.is_empty() && !interests.iter().any(|i| i == interest) {
            interests.push(interest.to_string());
        }
    }

    Ok(NewSubscription {
        email,
        name: non_blank(form.name.as_ref()),
        interests,
    })
}

/// Validate the email query parameter of an unsubscribe request.
pub fn validate_unsubscribe(email: Option<&str>) -> Result<String, Vec<FieldError>> {
    let email = email.map(normalize_email).unwrap_or_default();
    if email.is_empty() {
        return Err(vec![FieldError::new("email", "Email is required")]);
    }
    if !is_valid_email(&email) {
        return Err(vec![FieldError::new("email", "Invalid email address")]);
    }
    Ok(email)
}

/// A chat request needs at least one message; every message needs a known role and
/// non-blank content.
pub fn validate_chat(request: &ChatRequest) -> Result<(), Vec<FieldError>> {
    if request.messages.is_empty() {
        return Err(vec![FieldError::new(
            "messages",
            "At least one message is required",
        )]);
    }

    let mut errors = Vec::new();
    for (i, message) in request.messages.iter().enumerate() {
        if !CHAT_ROLES.contains(&message.role.as_str()) {
            errors.push(FieldError::new(
                format!("messages[{i}].role"),
                format!("Unknown role '{}'", message.role),
            ));
        }
        if message.content.trim().is_empty() {
            errors.push(FieldError::new(
                format!("messages[{i}].content"),
                "Message content cannot be empty",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn validate_resume(resume: &str) -> Result<String, Vec<FieldError>> {
    let resume = resume.trim();
    let mut errors = Vec::new();
    require_min(&mut errors, "resume", resume, MIN_RESUME_CHARS, "Resume");
    if errors.is_empty() {
        Ok(resume.to_string())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatMessage;

    fn valid_form() -> ContactForm {
        ContactForm {
            name: "Ada Lovelace".to_string(),
            email: "  Ada@Example.COM ".to_string(),
            subject: "Project inquiry".to_string(),
            message: "I would like to talk about a new project.".to_string(),
            budget: Some("  ".to_string()),
            timeline: Some(" 3 months ".to_string()),
        }
    }

    #[test]
    fn test_valid_contact_is_normalized() {
        let submission = validate_contact(&valid_form()).unwrap();
        assert_eq!(submission.email, "ada@example.com");
        assert_eq!(submission.budget, None);
        assert_eq!(submission.timeline, Some("3 months".to_string()));
    }

    #[test]
    fn test_contact_reports_every_failing_field() {
        let form = ContactForm {
            name: "A".to_string(),
            email: "not-an-email".to_string(),
            subject: "Hi".to_string(),
            message: "Short".to_string(),
            ..Default::default()
        };
        let errors = validate_contact(&form).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email", "subject", "message"]);
        assert_eq!(errors[0].message, "Name must be at least 2 characters");
    }

    #[test]
    fn test_contact_lengths_are_inclusive() {
        let form = ContactForm {
            name: "Al".to_string(),
            email: "al@example.org".to_string(),
            subject: "Hello".to_string(),
            message: "0123456789".to_string(),
            ..Default::default()
        };
        assert!(validate_contact(&form).is_ok());
    }

    #[test]
    fn test_whitespace_does_not_count_towards_length() {
        let mut form = valid_form();
        form.name = "  A  ".to_string();
        let errors = validate_contact(&form).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("someone@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co.uk"));
        assert!(!is_valid_email("someone@example"));
        assert!(!is_valid_email("some one@example.com"));
        assert!(!is_valid_email("a@b@example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_subscription_dedupes_interests() {
        let form = SubscribeForm {
            email: "Reader@Example.com".to_string(),
            name: Some(" ".to_string()),
            interests: Some(vec![
                "rust".to_string(),
                " web ".to_string(),
                "".to_string(),
                "rust".to_string(),
            ]),
        };
        let sub = validate_subscription(&form).unwrap();
        assert_eq!(sub.email, "reader@example.com");
        assert_eq!(sub.name, None);
        assert_eq!(sub.interests, vec!["rust", "web"]);
    }

    #[test]
    fn test_subscription_requires_email() {
        let errors = validate_subscription(&SubscribeForm::default()).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("email", "Invalid email address")]);
    }

    #[test]
    fn test_unsubscribe_email() {
        assert_eq!(
            validate_unsubscribe(Some(" X@Example.com")).unwrap(),
            "x@example.com"
        );
        assert_eq!(
            validate_unsubscribe(None).unwrap_err()[0].message,
            "Email is required"
        );
        assert!(validate_unsubscribe(Some("nope")).is_err());
    }

    #[test]
    fn test_chat_requires_messages() {
        let errors = validate_chat(&ChatRequest::default()).unwrap_err();
        assert_eq!(errors[0].field, "messages");
    }

    #[test]
    fn test_chat_rejects_unknown_roles_and_blank_content() {
        let request = ChatRequest {
            messages: vec![
                ChatMessage::user("hello"),
                ChatMessage {
                    role: "tool".to_string(),
                    content: " ".to_string(),
                },
            ],
            session_id: None,
        };
        let errors = validate_chat(&request).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "messages[1].role");
        assert_eq!(errors[1].field, "messages[1].content");
    }

    #[test]
    fn test_resume_minimum_length() {
        assert!(validate_resume("too short").is_err());
        let text = "x".repeat(MIN_RESUME_CHARS);
        assert_eq!(validate_resume(&format!("  {text}  ")).unwrap(), text);
    }
}
