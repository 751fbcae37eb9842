//! Read-only queries for the projects section and the blog page.

use sqlx::PgPool;

use crate::error::ApiError;
use crate::models::{BlogPost, Project};

pub async fn projects(pool: &PgPool) -> Result<Vec<Project>, ApiError> {
    let projects = sqlx::query_as(
        "SELECT * FROM projects ORDER BY featured DESC, sort_order, created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(projects)
}

pub async fn published_posts(pool: &PgPool) -> Result<Vec<BlogPost>, ApiError> {
    let posts = sqlx::query_as(
        "SELECT * FROM blog_posts WHERE published ORDER BY published_at DESC NULLS LAST",
    )
    .fetch_all(pool)
    .await?;
    Ok(posts)
}
