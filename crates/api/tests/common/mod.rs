#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use watchstore_api::auth::jwt::{generate_token, JwtConfig};
use watchstore_api::auth::password::hash_password;
use watchstore_api::config::ServerConfig;
use watchstore_api::router::build_app_router;
use watchstore_api::state::AppState;
use watchstore_core::locale::Locale;
use watchstore_db::models::admin::{Admin, CreateAdmin};
use watchstore_db::repositories::AdminRepo;
use watchstore_db::DbPool;

pub const TEST_ADMIN_EMAIL: &str = "admin@watches.mr";
pub const TEST_ADMIN_PASSWORD: &str = "admin123";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        locale: Locale::En,
        seed_demo_data: false,
        admin_bootstrap: None,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_days: 7,
        },
    }
}

/// Build the full application router over the given SQLite pool.
pub fn build_test_app(pool: SqlitePool) -> Router {
    let config = test_config();
    let state = AppState {
        pool: DbPool::Sqlite(pool),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Insert the test admin directly into the database.
pub async fn create_admin(pool: &SqlitePool) -> Admin {
    let db = DbPool::Sqlite(pool.clone());
    let input = CreateAdmin {
        name: "Manager".to_string(),
        email: TEST_ADMIN_EMAIL.to_string(),
        password_hash: hash_password(TEST_ADMIN_PASSWORD).expect("hashing should succeed"),
        role: None,
    };
    AdminRepo::create(&db, &input)
        .await
        .expect("admin creation should succeed")
}

/// Create the test admin and return a bearer token for it.
pub async fn admin_token(pool: &SqlitePool) -> String {
    let admin = create_admin(pool).await;
    generate_token(admin.id, &admin.email, &admin.role, &test_config().jwt)
        .expect("token generation should succeed")
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, body: &serde_json::Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, None)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, Some(token))).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, &body, Some(token))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

/// Send a raw body (e.g. malformed JSON) with an admin token.
pub async fn post_raw_auth(app: Router, uri: &str, body: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
