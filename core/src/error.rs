//! Error types for the CMS client.
//!
//! # Design
//! Three kinds, kept apart so callers can tell them apart by type:
//! `ConfigError` only ever happens at startup, `TransportError` covers every
//! way a round trip to the CMS can fail, and `ApiError::NotFound` gets its own
//! variant because pages render a "not found" response for it instead of a
//! generic failure page.

use thiserror::Error;

/// Missing or malformed client configuration. Fatal at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting was unset or blank.
    #[error("{0} is required")]
    Missing(&'static str),

    /// The service domain or base URL override does not form a usable URL.
    #[error("invalid CMS endpoint {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

/// A failed round trip to the CMS.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced a response (DNS, connect, I/O).
    #[error("request failed: {0}")]
    Network(String),

    /// The CMS answered with a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// A page carried more items than the limit it reports.
    #[error("page holds {len} items but reports limit {limit}")]
    InvalidPage { len: usize, limit: u32 },
}

/// Errors returned by `ContentRepository` operations and `CmsClient` parsers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested item does not exist.
    #[error("content not found: {id}")]
    NotFound { id: String },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}
