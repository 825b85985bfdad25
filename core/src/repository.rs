//! The read API that pages consume.
//!
//! # Design
//! `ContentRepository` pairs a `CmsClient` with a `Transport`. Every
//! operation is one build → execute → parse round trip with no retries and no
//! caching. Failures are logged once here and returned unchanged.

use log::{debug, error, warn};

use crate::client::{self, CmsClient};
use crate::config::CmsConfig;
use crate::error::{ApiError, ConfigError};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Category, ListPostsQuery, PagedResult, Post};

pub struct ContentRepository<T = UreqTransport> {
    client: CmsClient,
    transport: T,
}

impl ContentRepository<UreqTransport> {
    pub fn from_config(config: &CmsConfig) -> Self {
        Self::new(config, UreqTransport::new())
    }

    /// Build a repository from the process environment. Fails before any
    /// transport exists when credentials are missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = CmsConfig::from_env()?;
        Ok(Self::from_config(&config))
    }
}

impl<T: Transport> ContentRepository<T> {
    pub fn new(config: &CmsConfig, transport: T) -> Self {
        Self {
            client: CmsClient::new(config),
            transport,
        }
    }

    /// One page of posts, newest-first as ordered by the CMS.
    pub fn list_posts(&self, query: &ListPostsQuery) -> Result<PagedResult<Post>, ApiError> {
        let request = self.client.build_list_posts(query);
        debug!(
            "listing posts limit={} offset={} category={:?}",
            query.effective_limit(),
            query.effective_offset(),
            query.effective_category()
        );
        let result = self
            .transport
            .execute(&request)
            .map_err(ApiError::from)
            .and_then(|response| self.client.parse_list_posts(response));
        result.inspect_err(|e| error!("failed to list posts: {e}"))
    }

    pub fn get_post(&self, id: &str) -> Result<Post, ApiError> {
        if !client::is_addressable(id) {
            warn!("post {id:?} not found: not a valid id");
            return Err(ApiError::NotFound { id: id.to_string() });
        }
        let request = self.client.build_get_post(id);
        debug!("fetching post {id}");
        let result = self
            .transport
            .execute(&request)
            .map_err(ApiError::from)
            .and_then(|response| self.client.parse_get_post(id, response));
        result.inspect_err(|e| match e {
            ApiError::NotFound { .. } => warn!("post {id} not found"),
            ApiError::Transport(_) => error!("failed to fetch post {id}: {e}"),
        })
    }

    pub fn list_categories(&self) -> Result<PagedResult<Category>, ApiError> {
        let request = self.client.build_list_categories();
        debug!("listing categories");
        let result = self
            .transport
            .execute(&request)
            .map_err(ApiError::from)
            .and_then(|response| self.client.parse_list_categories(response));
        result.inspect_err(|e| error!("failed to list categories: {e}"))
    }

    /// Ids of the first `limit` posts, for pre-rendering detail pages.
    pub fn post_ids(&self, limit: u32) -> Result<Vec<String>, ApiError> {
        let page = self.list_posts(&ListPostsQuery::new().limit(limit).offset(0))?;
        Ok(page.contents.into_iter().map(|post| post.id).collect())
    }
}
