//! End-to-end tests of the HTTP API over an in-memory database.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use common::{DatabaseConfig, SecurityConfig};
use gallery_service_lib::{Database, Services};
use gateway_lib::config::GatewayConfig;
use gateway_lib::routes::create_router;
use gateway_lib::state::AppState;

const BOUNDARY: &str = "gallery-test-boundary";

async fn app() -> (Router, TempDir) {
    app_with_upload_limit(GatewayConfig::default().max_upload_bytes).await
}

async fn app_with_upload_limit(max_upload_bytes: usize) -> (Router, TempDir) {
    let images = tempfile::tempdir().unwrap();
    let db = Database::connect(&DatabaseConfig::in_memory()).await.unwrap();
    let security = SecurityConfig::new("api-pepper", "api-hmac-key");
    let services = Services::from_database(db, &security, images.path());

    let config = GatewayConfig {
        security,
        database: DatabaseConfig::in_memory(),
        images_dir: images.path().to_path_buf(),
        max_upload_bytes,
        ..Default::default()
    };
    (create_router(AppState::new(services, config)), images)
}

fn request(method: Method, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// `remember_token=...` pair from the Set-Cookie header.
fn session_cookie(response: &Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("remember_token="))
        .and_then(|v| v.split(';').next())
        .unwrap()
        .to_string()
}

async fn signup(app: &Router, email: &str) -> String {
    let response = send(
        app,
        request(
            Method::POST,
            "/signup",
            None,
            Some(json!({"name": "Jon", "age": 30, "email": email, "password": "adequate1"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    session_cookie(&response)
}

async fn create_gallery(app: &Router, cookie: &str, title: &str) -> i64 {
    let response = send(
        app,
        request(Method::POST, "/galleries", Some(cookie), Some(json!({"title": title}))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await["id"].as_i64().unwrap()
}

fn upload(id: i64, cookie: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(format!("/galleries/{id}/images"))
        .header(header::COOKIE, cookie)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(body)
        .unwrap()
}

fn multipart(filename: &str, data: &str) -> Body {
    Body::from(format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"images\"; filename=\"{filename}\"\r\n\
         Content-Type: image/png\r\n\r\n\
         {data}\r\n\
         --{b}--\r\n",
        b = BOUNDARY
    ))
}

#[tokio::test]
async fn test_health() {
    let (app, _images) = app().await;

    let response = send(&app, request(Method::GET, "/health", None, None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_signup_sets_cookie_and_normalizes_email() {
    let (app, _images) = app().await;

    let response = send(
        &app,
        request(
            Method::POST,
            "/signup",
            None,
            Some(json!({"name": "Jon", "age": 30, "email": "  Jon@Example.COM ", "password": "adequate1"})),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.contains("HttpOnly"));
    let body = json_body(response).await;
    assert_eq!(body["email"], "jon@example.com");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_signup_errors_are_public() {
    let (app, _images) = app().await;
    signup(&app, "taken@example.com").await;

    let response = send(
        &app,
        request(
            Method::POST,
            "/signup",
            None,
            Some(json!({"name": "Other", "email": "TAKEN@example.com", "password": "adequate1"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "EMAIL_TAKEN");
    assert_eq!(body["error"]["message"], "Email address is already taken.");

    let response = send(
        &app,
        request(
            Method::POST,
            "/signup",
            None,
            Some(json!({"name": "Short", "email": "short@example.com", "password": "short"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "PASSWORD_TOO_SHORT");
    assert_eq!(
        body["error"]["message"],
        "Password must be at least 8 characters long."
    );
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (app, _images) = app().await;

    let response = send(
        &app,
        Request::builder()
            .method(Method::POST)
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_login() {
    let (app, _images) = app().await;
    signup(&app, "login@example.com").await;

    let response = send(
        &app,
        request(
            Method::POST,
            "/login",
            None,
            Some(json!({"email": "LOGIN@example.com", "password": "adequate1"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);
    let me = send(&app, request(Method::GET, "/me", Some(&cookie), None)).await;
    assert_eq!(me.status(), StatusCode::OK);

    let response = send(
        &app,
        request(
            Method::POST,
            "/login",
            None,
            Some(json!({"email": "login@example.com", "password": "wrong-password"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"]["code"], "INVALID_PASSWORD");

    let response = send(
        &app,
        request(
            Method::POST,
            "/login",
            None,
            Some(json!({"email": "nobody@example.com", "password": "adequate1"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"]["message"],
        "Invalid email address."
    );
}

#[tokio::test]
async fn test_me_requires_session() {
    let (app, _images) = app().await;

    let response = send(&app, request(Method::GET, "/me", None, None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app,
        request(Method::GET, "/me", Some("remember_token=bogus"), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_invalidates_cookie() {
    let (app, _images) = app().await;
    let cookie = signup(&app, "bye@example.com").await;

    let response = send(&app, request(Method::POST, "/logout", Some(&cookie), None)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let me = send(&app, request(Method::GET, "/me", Some(&cookie), None)).await;
    assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_gallery_lifecycle() {
    let (app, _images) = app().await;
    let cookie = signup(&app, "owner@example.com").await;

    let id = create_gallery(&app, &cookie, "Holiday").await;

    let list = send(&app, request(Method::GET, "/galleries", Some(&cookie), None)).await;
    assert_eq!(list.status(), StatusCode::OK);
    let list = json_body(list).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["title"], "Holiday");

    let response = send(
        &app,
        request(
            Method::PUT,
            &format!("/galleries/{id}"),
            Some(&cookie),
            Some(json!({"title": "Summer"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["title"], "Summer");

    // Anyone may view a gallery
    let response = send(&app, request(Method::GET, &format!("/galleries/{id}"), None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        &app,
        request(Method::DELETE, &format!("/galleries/{id}"), Some(&cookie), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, request(Method::GET, &format!("/galleries/{id}"), None, None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_gallery_requires_title_and_session() {
    let (app, _images) = app().await;

    let response = send(
        &app,
        request(Method::POST, "/galleries", None, Some(json!({"title": "x"}))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let cookie = signup(&app, "titles@example.com").await;
    let response = send(
        &app,
        request(Method::POST, "/galleries", Some(&cookie), Some(json!({"title": ""}))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "TITLE_REQUIRED");
}

#[tokio::test]
async fn test_other_users_gallery_is_not_found() {
    let (app, _images) = app().await;
    let owner = signup(&app, "owner@example.com").await;
    let intruder = signup(&app, "intruder@example.com").await;
    let id = create_gallery(&app, &owner, "Private").await;

    let response = send(
        &app,
        request(
            Method::PUT,
            &format!("/galleries/{id}"),
            Some(&intruder),
            Some(json!({"title": "Mine now"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &app,
        request(Method::DELETE, &format!("/galleries/{id}"), Some(&intruder), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let list = send(&app, request(Method::GET, "/galleries", Some(&intruder), None)).await;
    assert!(json_body(list).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_image_upload_serve_and_delete() {
    let (app, images) = app().await;
    let cookie = signup(&app, "photos@example.com").await;
    let id = create_gallery(&app, &cookie, "Photos").await;

    let response = send(&app, upload(id, &cookie, multipart("beach day.png", "fake png"))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let uploaded = json_body(response).await;
    assert_eq!(uploaded[0]["filename"], "beachday.png");
    let url = format!("/images/galleries/{id}/beachday.png");
    assert_eq!(uploaded[0]["url"], url.as_str());
    assert!(images
        .path()
        .join(format!("galleries/{id}/beachday.png"))
        .exists());

    let shown = send(&app, request(Method::GET, &format!("/galleries/{id}"), None, None)).await;
    assert_eq!(json_body(shown).await["images"][0]["filename"], "beachday.png");

    let served = send(&app, request(Method::GET, &url, None, None)).await;
    assert_eq!(served.status(), StatusCode::OK);
    let bytes = to_bytes(served.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"fake png");

    let response = send(
        &app,
        request(
            Method::DELETE,
            &format!("/galleries/{id}/images/beachday.png"),
            Some(&cookie),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, request(Method::GET, &url, None, None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_without_files_is_rejected() {
    let (app, _images) = app().await;
    let cookie = signup(&app, "empty@example.com").await;
    let id = create_gallery(&app, &cookie, "Empty").await;

    let body = Body::from(format!("--{BOUNDARY}--\r\n"));
    let response = send(&app, upload(id, &cookie, body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_larger_than_axum_default_limit() {
    let (app, images) = app().await;
    let cookie = signup(&app, "camera@example.com").await;
    let id = create_gallery(&app, &cookie, "Camera roll").await;
    let photo = "x".repeat(3 * 1024 * 1024);

    let response = send(&app, upload(id, &cookie, multipart("big.jpg", &photo))).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let stored = std::fs::read(images.path().join(format!("galleries/{id}/big.jpg"))).unwrap();
    assert_eq!(stored.len(), photo.len());
}

#[tokio::test]
async fn test_upload_over_configured_limit_is_rejected() {
    let (app, images) = app_with_upload_limit(64 * 1024).await;
    let cookie = signup(&app, "limit@example.com").await;
    let id = create_gallery(&app, &cookie, "Too big").await;
    let photo = "x".repeat(256 * 1024);

    let response = send(&app, upload(id, &cookie, multipart("huge.jpg", &photo))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!images
        .path()
        .join(format!("galleries/{id}/huge.jpg"))
        .exists());
}
