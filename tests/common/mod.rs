#![allow(dead_code)]

use axum::{
    extract::{Path, Query, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use press_front::client::CmsClient;
use press_front::config::{ApiUrl, CmsConfig, Config};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const POST: &str = include_str!("../fixtures/post.json");
const PAGE: &str = include_str!("../fixtures/page.json");

pub const API_PATH: &str = "/wp-json/wp/v2";

pub fn post(id: u64, slug: &str) -> Value {
    let mut post: Value = serde_json::from_str(POST).unwrap();
    post["id"] = id.into();
    post["slug"] = slug.into();
    post
}

pub fn page(id: u64, slug: &str) -> Value {
    let mut page: Value = serde_json::from_str(PAGE).unwrap();
    page["id"] = id.into();
    page["slug"] = slug.into();
    page
}

/// Requests seen by the fake API, as `path?query`.
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<String>>>);

impl Recorder {
    pub fn requests(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    fn record(&self, path: &str, query: Option<String>) {
        let entry = match query {
            Some(query) => format!("{path}?{query}"),
            None => path.to_string(),
        };
        self.0.lock().unwrap().push(entry);
    }
}

/// In-memory stand-in for the content API.
#[derive(Clone)]
pub struct FakeCms {
    pub recorder: Recorder,
    pub pages: Vec<Value>,
    pub posts: Vec<Value>,
    pub categories: Vec<Value>,
    pub tags: Vec<Value>,
    pub media: Vec<Value>,
    /// `None` makes `/settings` answer 401 like an anonymous request would.
    pub settings: Option<Value>,
    /// Omit `X-WP-TotalPages` from collection responses.
    pub hide_total_pages: bool,
    /// Every collection request fails with this status.
    pub fail_with: Option<StatusCode>,
    /// Collection pages from this one on fail with 500.
    pub fail_from_page: Option<usize>,
}

impl Default for FakeCms {
    fn default() -> Self {
        FakeCms {
            recorder: Recorder::default(),
            pages: Vec::new(),
            posts: Vec::new(),
            categories: Vec::new(),
            tags: Vec::new(),
            media: Vec::new(),
            settings: None,
            hide_total_pages: false,
            fail_with: None,
            fail_from_page: None,
        }
    }
}

type Params = Query<HashMap<String, String>>;

impl FakeCms {
    pub fn router(self) -> Router {
        Router::new()
            .route("/wp-json/wp/v2/posts", get(list_posts))
            .route("/wp-json/wp/v2/posts/:id", get(post_by_id))
            .route("/wp-json/wp/v2/pages", get(list_pages))
            .route("/wp-json/wp/v2/pages/:id", get(page_by_id))
            .route("/wp-json/wp/v2/categories", get(list_categories))
            .route("/wp-json/wp/v2/tags", get(list_tags))
            .route("/wp-json/wp/v2/media/:id", get(media_by_id))
            .route("/wp-json/wp/v2/settings", get(settings))
            .route("/wp-json/wp/v2/broken", get(broken))
            .with_state(self)
    }

    fn collection(&self, items: &[Value], params: &HashMap<String, String>) -> Response {
        if let Some(status) = self.fail_with {
            return (status, Json(json!({"code": "rest_error"}))).into_response();
        }

        let filtered: Vec<Value> = items
            .iter()
            .filter(|item| match params.get("slug") {
                Some(slug) => item["slug"] == slug.as_str(),
                None => true,
            })
            .cloned()
            .collect();

        let per_page: usize = params
            .get("per_page")
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);
        let page: usize = params.get("page").and_then(|v| v.parse().ok()).unwrap_or(1);
        if self.fail_from_page.is_some_and(|first| page >= first) {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"code": "rest_error"})),
            )
                .into_response();
        }

        let total = filtered.len();
        let total_pages = total.div_ceil(per_page);

        if page > total_pages.max(1) {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"code": "rest_post_invalid_page_number"})),
            )
                .into_response();
        }

        let batch: Vec<Value> = filtered
            .into_iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .collect();

        if self.hide_total_pages {
            Json(batch).into_response()
        } else {
            (
                [
                    ("x-wp-total", total.to_string()),
                    ("x-wp-totalpages", total_pages.to_string()),
                ],
                Json(batch),
            )
                .into_response()
        }
    }

    fn single(&self, items: &[Value], id: u64) -> Response {
        match items.iter().find(|item| item["id"] == id) {
            Some(item) => Json(item.clone()).into_response(),
            None => (
                StatusCode::NOT_FOUND,
                Json(json!({"code": "rest_post_invalid_id", "message": "Invalid post ID."})),
            )
                .into_response(),
        }
    }
}

async fn list_posts(
    State(cms): State<FakeCms>,
    RawQuery(raw): RawQuery,
    Query(params): Params,
) -> Response {
    cms.recorder.record("/posts", raw);
    cms.collection(&cms.posts, &params)
}

async fn list_pages(
    State(cms): State<FakeCms>,
    RawQuery(raw): RawQuery,
    Query(params): Params,
) -> Response {
    cms.recorder.record("/pages", raw);
    cms.collection(&cms.pages, &params)
}

async fn list_categories(
    State(cms): State<FakeCms>,
    RawQuery(raw): RawQuery,
    Query(params): Params,
) -> Response {
    cms.recorder.record("/categories", raw);
    cms.collection(&cms.categories, &params)
}

async fn list_tags(
    State(cms): State<FakeCms>,
    RawQuery(raw): RawQuery,
    Query(params): Params,
) -> Response {
    cms.recorder.record("/tags", raw);
    cms.collection(&cms.tags, &params)
}

async fn media_by_id(
    State(cms): State<FakeCms>,
    Path(id): Path<u64>,
    RawQuery(raw): RawQuery,
) -> Response {
    cms.recorder.record(&format!("/media/{id}"), raw);
    cms.single(&cms.media, id)
}

async fn post_by_id(
    State(cms): State<FakeCms>,
    Path(id): Path<u64>,
    RawQuery(raw): RawQuery,
) -> Response {
    cms.recorder.record(&format!("/posts/{id}"), raw);
    cms.single(&cms.posts, id)
}

async fn page_by_id(
    State(cms): State<FakeCms>,
    Path(id): Path<u64>,
    RawQuery(raw): RawQuery,
) -> Response {
    cms.recorder.record(&format!("/pages/{id}"), raw);
    cms.single(&cms.pages, id)
}

async fn settings(State(cms): State<FakeCms>) -> Response {
    cms.recorder.record("/settings", None);
    match cms.settings {
        Some(settings) => Json(settings).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"code": "rest_forbidden"})),
        )
            .into_response(),
    }
}

async fn broken() -> Response {
    Json(json!({"unexpected": true})).into_response()
}

/// Serves `router` on an ephemeral local port and returns its origin.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn client(origin: &str) -> CmsClient {
    let config = CmsConfig {
        api_url: ApiUrl::parse(&format!("{origin}{API_PATH}")).unwrap(),
    };
    CmsClient::new(&config).unwrap()
}

pub fn config(origin: &str) -> Config {
    Config::from_toml(
        &format!(
            r#"
            [cms]
            api_url = "{origin}{API_PATH}"

            [site]
            url = "https://example.com"
            title = "Example"
            description = "Configured description"
            feed_items = 2
            "#
        ),
        None,
    )
    .unwrap()
}
