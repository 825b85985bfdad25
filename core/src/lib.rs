//! Content layer for a CMS-backed blog.
//!
//! # Overview
//! Lists posts, fetches a single post, and lists categories from a hosted
//! headless CMS, returning typed data to whatever renders the pages.
//!
//! # Design
//! - `CmsConfig` is validated once at startup; nothing can be built without it.
//! - `CmsClient` is stateless. Each operation is split into `build_*`
//!   (produces an `HttpRequest`) and `parse_*` (consumes an `HttpResponse`),
//!   so the I/O boundary is explicit.
//! - `Transport` executes requests; `UreqTransport` is the real one and tests
//!   substitute fakes.
//! - `ContentRepository` is the surface pages call. It logs failures once and
//!   returns them unchanged; `ApiError::NotFound` is the only kind pages are
//!   expected to treat specially.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod content;
pub mod date;
pub mod error;
pub mod http;
pub mod repository;
pub mod transport;
pub mod types;

pub use client::CmsClient;
pub use config::CmsConfig;
pub use content::{content_html, Content, StructuredMarkup};
pub use date::{format_date, format_datetime};
pub use error::{ApiError, ConfigError, TransportError};
pub use http::{HttpRequest, HttpResponse};
pub use repository::ContentRepository;
pub use transport::{Transport, UreqTransport};
pub use types::{Category, CategoryRef, ListPostsQuery, PagedResult, Post, Thumbnail, DEFAULT_LIMIT};
