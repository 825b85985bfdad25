//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results or error kinds.

use blog_cms_core::{
    ApiError, CmsClient, CmsConfig, HttpRequest, HttpResponse, ListPostsQuery, TransportError,
};

const BASE_URL: &str = "https://my-blog.microcms.io/api/v1";
const API_KEY: &str = "vector-key";

fn client() -> CmsClient {
    CmsClient::new(&CmsConfig::new("my-blog", API_KEY).unwrap())
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn query_pairs(value: &serde_json::Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let arr = pair.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

fn assert_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");
    if let Some(query) = expected.get("query") {
        assert_eq!(req.query, query_pairs(query), "{name}: query");
    } else {
        assert!(req.query.is_empty(), "{name}: query should be empty");
    }
    assert_eq!(req.header("X-MICROCMS-API-KEY"), Some(API_KEY), "{name}: api key header");
}

fn assert_error_kind(name: &str, err: &ApiError, kind: &str) {
    let matched = match kind {
        "NotFound" => matches!(err, ApiError::NotFound { .. }),
        "Status" => matches!(err, ApiError::Transport(TransportError::Status { .. })),
        "Deserialization" => matches!(err, ApiError::Transport(TransportError::Deserialization(_))),
        "InvalidPage" => matches!(err, ApiError::Transport(TransportError::InvalidPage { .. })),
        other => panic!("{name}: unknown expected_error: {other}"),
    };
    assert!(matched, "{name}: expected {kind}, got {err:?}");
}

// ---------------------------------------------------------------------------
// List posts
// ---------------------------------------------------------------------------

#[test]
fn list_posts_test_vectors() {
    let raw = include_str!("../../test-vectors/list_posts.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let mut query = ListPostsQuery::new();
        if let Some(limit) = input.get("limit").and_then(|v| v.as_u64()) {
            query = query.limit(limit as u32);
        }
        if let Some(offset) = input.get("offset").and_then(|v| v.as_u64()) {
            query = query.offset(offset as u32);
        }
        if let Some(category) = input.get("category_id").and_then(|v| v.as_str()) {
            query = query.category(category);
        }

        // Verify build
        let req = c.build_list_posts(&query);
        assert_request(name, &req, &case["expected_request"]);

        // Verify parse
        let result = c.parse_list_posts(simulated(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_error_kind(name, &result.unwrap_err(), expected_error.as_str().unwrap());
        } else {
            let page = result.unwrap();
            let ids: Vec<&str> = page.contents.iter().map(|p| p.id.as_str()).collect();
            let expected_ids: Vec<&str> = case["expected_ids"]
                .as_array()
                .unwrap()
                .iter()
                .map(|v| v.as_str().unwrap())
                .collect();
            assert_eq!(ids, expected_ids, "{name}: ids");
            assert_eq!(
                page.total_count,
                case["expected_total_count"].as_u64().unwrap(),
                "{name}: total count"
            );
            assert!(page.contents.len() <= page.limit as usize, "{name}: page within limit");
        }
    }
}

// ---------------------------------------------------------------------------
// Get post
// ---------------------------------------------------------------------------

#[test]
fn get_post_test_vectors() {
    let raw = include_str!("../../test-vectors/get_post.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();

        // Verify build
        let req = c.build_get_post(id);
        assert_request(name, &req, &case["expected_request"]);

        // Verify parse
        let result = c.parse_get_post(id, simulated(case));
        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_error_kind(name, &err, expected_error.as_str().unwrap());
            if let ApiError::NotFound { id: missing } = &err {
                assert_eq!(missing, id, "{name}: not-found id");
            }
        } else {
            let post = result.unwrap();
            assert_eq!(post.id, id, "{name}: id");
            assert_eq!(post.html(), case["expected_html"].as_str().unwrap(), "{name}: html");
            assert_eq!(post.summary(), case["expected_summary"].as_str().unwrap(), "{name}: summary");
        }
    }
}

// ---------------------------------------------------------------------------
// List categories
// ---------------------------------------------------------------------------

#[test]
fn list_categories_test_vectors() {
    let raw = include_str!("../../test-vectors/list_categories.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        // Verify build
        let req = c.build_list_categories();
        assert_request(name, &req, &case["expected_request"]);

        // Verify parse
        let result = c.parse_list_categories(simulated(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_error_kind(name, &result.unwrap_err(), expected_error.as_str().unwrap());
        } else {
            let page = result.unwrap();
            let slugs: Vec<&str> = page.contents.iter().map(|c| c.slug.as_str()).collect();
            let expected: Vec<&str> = case["expected_slugs"]
                .as_array()
                .unwrap()
                .iter()
                .map(|v| v.as_str().unwrap())
                .collect();
            assert_eq!(slugs, expected, "{name}: slugs");
        }
    }
}
