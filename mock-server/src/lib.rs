//! In-memory stand-in for the read side of a WordPress REST API.
//!
//! Serves `/wp-json/wp/v2/{categories,tags,pages,posts}` and `/llms.txt`
//! from a fixed `Site`. Every route requires the site's basic-auth
//! credentials. List routes honour `slug`, `status`, `categories`, `tags`,
//! `page`, `per_page` and `_embed`, and report paging through `X-WP-Total`
//! and `X-WP-TotalPages` the way WordPress does.

mod fixtures;

use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{debug, warn};

pub use fixtures::{
    DOCS_CATEGORY, NEWS_CATEGORY, PASSWORD, PUBLISHED_POSTS, RELEASE_TAG, USERNAME,
};

const MAX_PER_PAGE: u32 = 100;
const DEFAULT_PER_PAGE: u32 = 10;

/// Everything the mock knows about. Records are stored as WordPress would
/// serialize them, minus `_embedded`, which is attached per request.
#[derive(Clone, Debug)]
pub struct Site {
    pub username: String,
    pub password: String,
    pub authors: Vec<Value>,
    pub media: Vec<Value>,
    pub categories: Vec<Value>,
    pub tags: Vec<Value>,
    pub pages: Vec<Value>,
    pub posts: Vec<Value>,
    pub llms_txt: String,
}

impl Site {
    fn authorization(&self) -> String {
        let pair = format!("{}:{}", self.username, self.password);
        format!("Basic {}", STANDARD.encode(pair))
    }

    fn embed(&self, mut item: Value) -> Value {
        let author = find_by_id(&self.authors, &item["author"]);
        let media = find_by_id(&self.media, &item["featured_media"]);
        let mut embedded = serde_json::Map::new();
        if let Some(author) = author {
            embedded.insert("author".to_string(), json!([author]));
        }
        if let Some(media) = media {
            embedded.insert("wp:featuredmedia".to_string(), json!([media]));
        }
        if !embedded.is_empty() {
            item["_embedded"] = Value::Object(embedded);
        }
        item
    }
}

fn find_by_id(records: &[Value], id: &Value) -> Option<Value> {
    let id = id.as_u64()?;
    records
        .iter()
        .find(|record| record["id"].as_u64() == Some(id))
        .cloned()
}

/// Query parameters shared by every collection route.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub slug: Option<String>,
    pub status: Option<String>,
    pub categories: Option<String>,
    pub tags: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    #[serde(rename = "_embed")]
    pub embed: Option<String>,
}

pub type Db = Arc<Site>;

pub fn app() -> Router {
    app_with(Site::sample())
}

pub fn app_with(site: Site) -> Router {
    let db: Db = Arc::new(site);
    Router::new()
        .route("/wp-json/wp/v2/categories", get(list_categories))
        .route("/wp-json/wp/v2/tags", get(list_tags))
        .route("/wp-json/wp/v2/pages", get(list_pages))
        .route("/wp-json/wp/v2/posts", get(list_posts))
        .route("/llms.txt", get(llms_txt))
        .layer(middleware::from_fn_with_state(db.clone(), require_auth))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, site: Site) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(site)).await
}

async fn require_auth(State(db): State<Db>, request: Request, next: Next) -> Response {
    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if presented != Some(db.authorization().as_str()) {
        warn!(path = %request.uri().path(), "rejected credentials");
        return rest_error(
            StatusCode::UNAUTHORIZED,
            "rest_not_logged_in",
            "You are not currently logged in.",
        );
    }
    debug!(uri = %request.uri(), "request");
    next.run(request).await
}

async fn list_categories(State(db): State<Db>, Query(params): Query<ListParams>) -> Response {
    list(&db, &db.categories, &params, false)
}

async fn list_tags(State(db): State<Db>, Query(params): Query<ListParams>) -> Response {
    list(&db, &db.tags, &params, false)
}

async fn list_pages(State(db): State<Db>, Query(params): Query<ListParams>) -> Response {
    list(&db, &db.pages, &params, true)
}

async fn list_posts(State(db): State<Db>, Query(params): Query<ListParams>) -> Response {
    list(&db, &db.posts, &params, true)
}

async fn llms_txt(State(db): State<Db>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        db.llms_txt.clone(),
    )
        .into_response()
}

/// Filter, embed and paginate one collection.
///
/// `has_status` marks post types; only those default to `status=publish`.
fn list(db: &Site, records: &[Value], params: &ListParams, has_status: bool) -> Response {
    let per_page = params.per_page.unwrap_or(DEFAULT_PER_PAGE);
    let page = params.page.unwrap_or(1);
    if per_page == 0 || per_page > MAX_PER_PAGE || page == 0 {
        return rest_error(
            StatusCode::BAD_REQUEST,
            "rest_invalid_param",
            "Invalid parameter(s): page, per_page",
        );
    }

    let categories = match parse_ids(params.categories.as_deref()) {
        Ok(ids) => ids,
        Err(response) => return response,
    };
    let tags = match parse_ids(params.tags.as_deref()) {
        Ok(ids) => ids,
        Err(response) => return response,
    };
    let status = has_status.then(|| params.status.as_deref().unwrap_or("publish"));

    let matching: Vec<&Value> = records
        .iter()
        .filter(|r| params.slug.as_deref().map_or(true, |slug| r["slug"] == slug))
        .filter(|r| status.map_or(true, |status| r["status"] == status))
        .filter(|r| categories.as_deref().map_or(true, |ids| has_any(r, "categories", ids)))
        .filter(|r| tags.as_deref().map_or(true, |ids| has_any(r, "tags", ids)))
        .collect();

    let total = matching.len() as u64;
    let total_pages = total.div_ceil(u64::from(per_page));
    if total > 0 && u64::from(page) > total_pages {
        return rest_error(
            StatusCode::BAD_REQUEST,
            "rest_post_invalid_page_number",
            "The page number requested is larger than the number of pages available.",
        );
    }

    let offset = (u64::from(page) - 1) * u64::from(per_page);
    let body: Vec<Value> = matching
        .into_iter()
        .skip(usize::try_from(offset).unwrap_or(usize::MAX))
        .take(per_page as usize)
        .map(|r| {
            if params.embed.is_some() {
                db.embed(r.clone())
            } else {
                r.clone()
            }
        })
        .collect();

    (
        [
            ("X-WP-Total", total.to_string()),
            ("X-WP-TotalPages", total_pages.to_string()),
        ],
        Json(body),
    )
        .into_response()
}

/// `"3,7"` → `[3, 7]`. Absent means no filter; garbage is a 400.
fn parse_ids(raw: Option<&str>) -> Result<Option<Vec<u64>>, Response> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    raw.split(',')
        .filter(|part| !part.is_empty())
        .map(|part| part.trim().parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
        .map_err(|_| {
            rest_error(
                StatusCode::BAD_REQUEST,
                "rest_invalid_param",
                "Invalid parameter(s): categories, tags",
            )
        })
}

fn has_any(record: &Value, field: &str, ids: &[u64]) -> bool {
    record[field]
        .as_array()
        .is_some_and(|values| values.iter().any(|v| v.as_u64().is_some_and(|id| ids.contains(&id))))
}

fn rest_error(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(json!({
            "code": code,
            "message": message,
            "data": { "status": status.as_u16() }
        })),
    )
        .into_response()
}
