//! Stateless request builder and response parser for the CMS content API.
//!
//! # Design
//! `CmsClient` holds only the endpoint base and API key and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`; a `Transport` performs the round trip in between.
//!
//! Single posts are fetched by point lookup (`GET blogs/<id>`). The CMS
//! answers an unknown id with 404, which `parse_get_post` maps to
//! `ApiError::NotFound`.

use serde::de::DeserializeOwned;
use url::Url;

use crate::config::CmsConfig;
use crate::error::{ApiError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Category, ListPostsQuery, PagedResult, Post};

pub const POSTS_ENDPOINT: &str = "blogs";
pub const CATEGORIES_ENDPOINT: &str = "categories";
pub const API_KEY_HEADER: &str = "X-MICROCMS-API-KEY";

/// Builds CMS requests and parses CMS responses without touching the network.
#[derive(Debug, Clone)]
pub struct CmsClient {
    endpoint_base: Url,
    api_key: String,
}

impl CmsClient {
    pub fn new(config: &CmsConfig) -> Self {
        Self {
            endpoint_base: config.endpoint_base().clone(),
            api_key: config.api_key().to_string(),
        }
    }

    pub fn build_list_posts(&self, query: &ListPostsQuery) -> HttpRequest {
        let mut params = vec![
            ("limit".to_string(), query.effective_limit().to_string()),
            ("offset".to_string(), query.effective_offset().to_string()),
        ];
        if let Some(category_id) = query.effective_category() {
            params.push(("filters".to_string(), format!("category[equals]{category_id}")));
        }
        self.request(&[POSTS_ENDPOINT], params)
    }

    pub fn build_get_post(&self, id: &str) -> HttpRequest {
        self.request(&[POSTS_ENDPOINT, id], Vec::new())
    }

    pub fn build_list_categories(&self) -> HttpRequest {
        self.request(&[CATEGORIES_ENDPOINT], Vec::new())
    }

    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<PagedResult<Post>, ApiError> {
        check_status(&response)?;
        let page = decode(&response.body)?;
        Ok(check_page(page)?)
    }

    pub fn parse_get_post(&self, id: &str, response: HttpResponse) -> Result<Post, ApiError> {
        if !is_addressable(id) || response.status == 404 {
            return Err(ApiError::NotFound { id: id.to_string() });
        }
        check_status(&response)?;
        let post: Post = decode(&response.body)?;
        if post.id != id {
            return Err(ApiError::NotFound { id: id.to_string() });
        }
        Ok(post)
    }

    pub fn parse_list_categories(
        &self,
        response: HttpResponse,
    ) -> Result<PagedResult<Category>, ApiError> {
        check_status(&response)?;
        let page = decode(&response.body)?;
        Ok(check_page(page)?)
    }

    fn request(&self, segments: &[&str], query: Vec<(String, String)>) -> HttpRequest {
        let mut url = self.endpoint_base.clone();
        // `CmsConfig` only accepts URLs that can be a base.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        HttpRequest {
            url: url.to_string(),
            query,
            headers: vec![(API_KEY_HEADER.to_string(), self.api_key.clone())],
        }
    }
}

/// Whether `id` survives as a single path segment. `""` would address the
/// list endpoint, and `url` collapses `"."` and `".."` away.
pub(crate) fn is_addressable(id: &str) -> bool {
    !matches!(id, "" | "." | "..")
}

/// Map non-success status codes to `TransportError::Status`.
fn check_status(response: &HttpResponse) -> Result<(), TransportError> {
    if response.is_success() {
        return Ok(());
    }
    Err(TransportError::Status {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, TransportError> {
    serde_json::from_str(body).map_err(|e| TransportError::Deserialization(e.to_string()))
}

fn check_page<T>(page: PagedResult<T>) -> Result<PagedResult<T>, TransportError> {
    if page.contents.len() > page.limit as usize {
        return Err(TransportError::InvalidPage {
            len: page.contents.len(),
            limit: page.limit,
        });
    }
    Ok(page)
}
