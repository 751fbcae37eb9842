//! Portfolio content: projects and blog posts.
//!
//! Both tables are seeded by migration and only read by the site.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl Project {
    pub fn to_info(&self) -> ProjectInfo {
        ProjectInfo {
            id: self.id.to_string(),
            title: self.title.clone(),
            description: self.description.clone(),
            tech_stack: self.tech_stack.clone(),
            repo_url: self.repo_url.clone(),
            live_url: self.live_url.clone(),
            featured: self.featured,
        }
    }
}

/// Project card data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: bool,
}

#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl BlogPost {
    pub fn to_info(&self) -> BlogPostInfo {
        BlogPostInfo {
            id: self.id.to_string(),
            title: self.title.clone(),
            slug: self.slug.clone(),
            summary: self.summary.clone(),
            published_at: self
                .published_at
                .map(|at| at.format("%B %-d, %Y").to_string()),
        }
    }
}

/// Blog post listing entry. `summary` is Markdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostInfo {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub published_at: Option<String>,
}
