//! Data models for the application.
//!
//! Each module pairs a server-only database row (`sqlx::FromRow`, `Uuid`, `DateTime`)
//! with a client-safe projection that can cross the server function boundary.

mod chat;
mod contact;
mod content;
mod newsletter;
mod resume;
mod stats;

pub use chat::{AssistantReply, ChatMessage, ChatRequest, CHAT_ROLES};
pub use contact::{ContactForm, ContactInfo, ContactReceipt, ContactStatus};
pub use content::{BlogPostInfo, ProjectInfo};
pub use newsletter::{SubscribeForm, SubscriberCounts, SubscriptionReceipt};
pub use resume::{ResumeAnalysisInfo, ResumeRequest, ResumeSuggestions};
pub use stats::{AdminDashboard, ContactTotals, SiteStats, StatsResponse, SubscriberTotals};

#[cfg(feature = "server")]
pub use chat::ChatSession;
#[cfg(feature = "server")]
pub use contact::Contact;
#[cfg(feature = "server")]
pub use content::{BlogPost, Project};
#[cfg(feature = "server")]
pub use newsletter::Subscriber;
#[cfg(feature = "server")]
pub use resume::ResumeAnalysis;
