//! In-process stand-in for the hosted CMS content API.
//!
//! Serves the `blogs` and `categories` list endpoints plus single-post lookup
//! with the same query parameters, auth header, paging and error shapes as
//! the real service, over a fixed data set.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

pub const API_KEY_HEADER: &str = "x-microcms-api-key";
pub const DEFAULT_API_KEY: &str = "test-key";
pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 100;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub created_at: String,
    pub updated_at: String,
    pub published_at: String,
    pub revised_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    /// Either a markup string or an `{html, text}` object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Thumbnail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub revised_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub contents: Vec<T>,
    pub total_count: usize,
    pub offset: usize,
    pub limit: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub filters: Option<String>,
}

/// The data set served, in list order, plus the key clients must present.
#[derive(Clone, Debug)]
pub struct Store {
    pub api_key: String,
    pub posts: Vec<Post>,
    pub categories: Vec<Category>,
}

impl Store {
    pub fn fixtures(api_key: &str) -> Self {
        let categories = vec![
            category("news", "News"),
            category("tech", "Tech"),
            category("life", "Life"),
        ];
        // Newest first, as the CMS orders lists by default.
        let posts = (1..=12)
            .rev()
            .map(|n| fixture_post(n, &categories[n % categories.len()]))
            .collect();
        Self {
            api_key: api_key.to_string(),
            posts,
            categories,
        }
    }
}

type Db = Arc<Store>;
type Rejection = (StatusCode, Json<ErrorBody>);

pub fn app() -> Router {
    app_with(Store::fixtures(DEFAULT_API_KEY))
}

pub fn app_with(store: Store) -> Router {
    Router::new()
        .route("/api/v1/blogs", get(list_posts))
        .route("/api/v1/blogs/{id}", get(get_post))
        .route("/api/v1/categories", get(list_categories))
        .with_state(Arc::new(store))
}

pub async fn run(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(store)).await
}

async fn list_posts(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<Post>>, Rejection> {
    authorize(&db, &headers)?;
    let filters = parse_filters(params.filters.as_deref())?;
    let matching: Vec<&Post> = db
        .posts
        .iter()
        .filter(|post| filters.iter().all(|f| f.matches(post)))
        .collect();
    log::debug!("blogs: {} of {} posts match", matching.len(), db.posts.len());
    paginate(matching.into_iter().cloned().collect(), &params).map(Json)
}

async fn get_post(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Post>, Rejection> {
    authorize(&db, &headers)?;
    db.posts
        .iter()
        .find(|post| post.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Content is not found."))
}

async fn list_categories(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<Category>>, Rejection> {
    authorize(&db, &headers)?;
    paginate(db.categories.clone(), &params).map(Json)
}

fn authorize(db: &Store, headers: &HeaderMap) -> Result<(), Rejection> {
    match headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) {
        Some(key) if key == db.api_key => Ok(()),
        _ => {
            log::warn!("rejected request with missing or invalid API key");
            Err(reject(
                StatusCode::UNAUTHORIZED,
                "X-MICROCMS-API-KEY header is invalid.",
            ))
        }
    }
}

fn paginate<T>(items: Vec<T>, params: &ListParams) -> Result<Page<T>, Rejection> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    if limit > MAX_LIMIT {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            &format!("limit must be {MAX_LIMIT} or less"),
        ));
    }
    let offset = params.offset.unwrap_or(0);
    let total_count = items.len();
    let contents = items.into_iter().skip(offset).take(limit).collect();
    Ok(Page {
        contents,
        total_count,
        offset,
        limit,
    })
}

#[derive(Debug, PartialEq, Eq)]
enum Filter {
    Id(String),
    Category(String),
}

impl Filter {
    fn matches(&self, post: &Post) -> bool {
        match self {
            Filter::Id(id) => &post.id == id,
            Filter::Category(id) => post.category.as_ref().is_some_and(|c| &c.id == id),
        }
    }
}

/// Parse `field[equals]value` conditions joined by `[and]`.
fn parse_filters(raw: Option<&str>) -> Result<Vec<Filter>, Rejection> {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return Ok(Vec::new());
    };
    raw.split("[and]")
        .map(|cond| match cond.split_once("[equals]") {
            Some(("id", value)) => Ok(Filter::Id(value.to_string())),
            Some(("category", value)) => Ok(Filter::Category(value.to_string())),
            _ => Err(reject(
                StatusCode::BAD_REQUEST,
                &format!("unsupported filter: {cond}"),
            )),
        })
        .collect()
}

fn reject(status: StatusCode, message: &str) -> Rejection {
    (
        status,
        Json(ErrorBody {
            message: message.to_string(),
        }),
    )
}

fn timestamp(day: usize) -> String {
    format!("2024-01-{day:02}T00:00:00.000Z")
}

fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        slug: id.to_string(),
        created_at: timestamp(1),
        updated_at: timestamp(1),
        published_at: timestamp(1),
        revised_at: timestamp(1),
    }
}

fn fixture_post(n: usize, category: &Category) -> Post {
    let content = match n % 3 {
        0 => Some(serde_json::Value::String(format!("<p>Post {n}</p>"))),
        1 => Some(serde_json::json!({ "html": format!("<p>Post {n}</p>"), "text": format!("Post {n}") })),
        _ => None,
    };
    Post {
        id: format!("post-{n:02}"),
        title: format!("Post {n}"),
        content,
        excerpt: (n % 2 == 0).then(|| format!("Excerpt for post {n}")),
        thumbnail: Some(Thumbnail {
            url: format!("https://images.example/post-{n:02}.png"),
            width: 1200,
            height: 630,
        }),
        category: Some(category.clone()),
        published_at: Some(timestamp(n + 1)),
        created_at: timestamp(n),
        updated_at: timestamp(n + 1),
        revised_at: timestamp(n + 1),
    }
}
