use axum::http::{self, Request, StatusCode};
use base64::{engine::general_purpose::STANDARD, Engine};
use http_body_util::BodyExt;
use mock_server::{app, PASSWORD, PUBLISHED_POSTS, USERNAME};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn authorized(uri: &str) -> Request<String> {
    let token = STANDARD.encode(format!("{USERNAME}:{PASSWORD}"));
    Request::builder()
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Basic {token}"))
        .body(String::new())
        .unwrap()
}

fn header(response: &axum::response::Response, name: &str) -> String {
    response.headers()[name].to_str().unwrap().to_string()
}

// --- auth ---

#[tokio::test]
async fn missing_credentials_return_401() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/wp-json/wp/v2/tags")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["code"], "rest_not_logged_in");
}

#[tokio::test]
async fn wrong_password_returns_401() {
    let token = STANDARD.encode(format!("{USERNAME}:nope"));
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/llms.txt")
                .header(http::header::AUTHORIZATION, format!("Basic {token}"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- taxonomies ---

#[tokio::test]
async fn categories_filter_by_slug() {
    let resp = app()
        .oneshot(authorized("/wp-json/wp/v2/categories?slug=news"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let categories = body.as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["taxonomy"], "category");
    assert_eq!(categories[0]["slug"], "news");
}

#[tokio::test]
async fn unknown_tag_slug_is_empty_list() {
    let resp = app()
        .oneshot(authorized("/wp-json/wp/v2/tags?slug=missing"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, serde_json::json!([]));
}

// --- pages ---

#[tokio::test]
async fn pages_default_to_published() {
    let resp = app()
        .oneshot(authorized("/wp-json/wp/v2/pages"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    let slugs: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["about"]);
}

#[tokio::test]
async fn draft_pages_by_status() {
    let resp = app()
        .oneshot(authorized("/wp-json/wp/v2/pages?slug=roadmap&status=draft"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body[0]["status"], "draft");
}

#[tokio::test]
async fn embed_attaches_author() {
    let resp = app()
        .oneshot(authorized("/wp-json/wp/v2/pages?slug=about&_embed=true"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body[0]["_embedded"]["author"][0]["name"], "Ada");
}

// --- posts ---

#[tokio::test]
async fn posts_report_pagination_headers() {
    let resp = app()
        .oneshot(authorized("/wp-json/wp/v2/posts?page=2&per_page=5"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "x-wp-total"), PUBLISHED_POSTS.to_string());
    assert_eq!(header(&resp, "x-wp-totalpages"), "3");
    let body = body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 5);
    assert_eq!(body[0]["slug"], "post-6");
}

#[tokio::test]
async fn posts_filter_by_tag_and_category() {
    let resp = app()
        .oneshot(authorized("/wp-json/wp/v2/posts?tags=4&categories=3"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    let slugs: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["post-9", "post-3"]);
}

#[tokio::test]
async fn page_past_the_end_returns_400() {
    let resp = app()
        .oneshot(authorized("/wp-json/wp/v2/posts?page=9"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["code"], "rest_post_invalid_page_number");
}

#[tokio::test]
async fn malformed_id_list_returns_400() {
    let resp = app()
        .oneshot(authorized("/wp-json/wp/v2/posts?categories=news"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_result_reports_zero_pages() {
    let resp = app()
        .oneshot(authorized("/wp-json/wp/v2/posts?slug=nothing-here"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "x-wp-total"), "0");
    assert_eq!(header(&resp, "x-wp-totalpages"), "0");
}

// --- llms.txt ---

#[tokio::test]
async fn llms_txt_is_plain_text() {
    let resp = app().oneshot(authorized("/llms.txt")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(header(&resp, "content-type").starts_with("text/plain"));
    let bytes = body_bytes(resp).await;
    assert!(bytes.starts_with(b"# Example Blog"));
}

// --- routing ---

#[tokio::test]
async fn unknown_route_returns_404() {
    let resp = app()
        .oneshot(authorized("/wp-json/wp/v2/users"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
