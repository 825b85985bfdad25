//! Domain DTOs for the blog CMS.
//!
//! # Design
//! Field names follow the CMS wire format (`camelCase`). The mock-server
//! crate defines its own copies of these shapes; integration tests catch any
//! schema drift between the two.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::{self, Content};

/// Number of posts requested when the caller does not say.
pub const DEFAULT_LIMIT: u32 = 10;

/// A single blog article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    #[serde(
        default,
        deserialize_with = "content::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Content>,
    pub excerpt: Option<String>,
    pub thumbnail: Option<Thumbnail>,
    pub category: Option<CategoryRef>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub revised_at: DateTime<Utc>,
}

impl Post {
    /// Renderable markup for the body; `""` when there is none.
    pub fn html(&self) -> &str {
        content::content_html(self.content.as_ref())
    }

    /// Short description for listings and meta tags: the excerpt when it has
    /// text, otherwise the title.
    pub fn summary(&self) -> &str {
        match self.excerpt.as_deref().map(str::trim) {
            Some(excerpt) if !excerpt.is_empty() => excerpt,
            _ => self.title.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// The category embedded in a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: DateTime<Utc>,
    pub revised_at: DateTime<Utc>,
}

/// One page of a list endpoint, in the order the CMS returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub contents: Vec<T>,
    pub total_count: u64,
    pub offset: u32,
    pub limit: u32,
}

impl<T> PagedResult<T> {
    /// Whether items exist past the end of this page.
    pub fn has_more(&self) -> bool {
        (self.offset as u64) + (self.contents.len() as u64) < self.total_count
    }
}

/// Parameters for listing posts. Unset fields fall back to a limit of
/// `DEFAULT_LIMIT`, an offset of 0 and no category filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPostsQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub category_id: Option<String>,
}

impl ListPostsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    pub fn effective_offset(&self) -> u32 {
        self.offset.unwrap_or(0)
    }

    /// The category to filter on; a blank id means no filter.
    pub fn effective_category(&self) -> Option<&str> {
        self.category_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}
