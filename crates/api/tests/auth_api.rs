//! HTTP-level integration tests for login and the admin gate.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_admin, get, get_auth, post_json, test_config,
    TEST_ADMIN_EMAIL, TEST_ADMIN_PASSWORD,
};
use serde_json::json;
use sqlx::SqlitePool;
use watchstore_api::auth::jwt::{generate_token, validate_token};

async fn login(pool: &SqlitePool, email: &str, password: &str) -> axum::response::Response {
    post_json(
        build_test_app(pool.clone()),
        "/api/auth/login",
        json!({ "email": email, "password": password }),
    )
    .await
}

#[sqlx::test(migrations = "../db/migrations/sqlite")]
async fn login_returns_token_and_admin(pool: SqlitePool) {
    let admin = create_admin(&pool).await;

    let response = login(&pool, TEST_ADMIN_EMAIL, TEST_ADMIN_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["admin"]["id"], admin.id);
    assert_eq!(json["admin"]["email"], TEST_ADMIN_EMAIL);
    assert_eq!(json["admin"]["role"], "admin");
    assert!(json["admin"].get("passwordHash").is_none());
    assert!(json["admin"].get("password_hash").is_none());

    let claims = validate_token(json["token"].as_str().unwrap(), &test_config().jwt)
        .expect("issued token should validate");
    assert_eq!(claims.sub, admin.id);
    assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
}

#[sqlx::test(migrations = "../db/migrations/sqlite")]
async fn login_email_is_case_insensitive(pool: SqlitePool) {
    create_admin(&pool).await;
    let response = login(&pool, "ADMIN@Watches.MR", TEST_ADMIN_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations/sqlite")]
async fn wrong_password_and_unknown_email_look_the_same(pool: SqlitePool) {
    create_admin(&pool).await;

    let wrong_password = login(&pool, TEST_ADMIN_EMAIL, "nope").await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password = body_json(wrong_password).await;

    let unknown = login(&pool, "ghost@watches.mr", TEST_ADMIN_PASSWORD).await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown = body_json(unknown).await;

    assert_eq!(wrong_password, unknown);
    assert_eq!(unknown["message"], "Invalid email or password");
}

#[sqlx::test(migrations = "../db/migrations/sqlite")]
async fn login_requires_both_fields(pool: SqlitePool) {
    let response = post_json(
        build_test_app(pool),
        "/api/auth/login",
        json!({ "email": TEST_ADMIN_EMAIL }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations/sqlite")]
async fn me_returns_current_admin(pool: SqlitePool) {
    create_admin(&pool).await;
    let login_json = body_json(login(&pool, TEST_ADMIN_EMAIL, TEST_ADMIN_PASSWORD).await).await;
    let token = login_json["token"].as_str().unwrap();

    let response = get_auth(build_test_app(pool), "/api/auth/me", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["admin"]["email"], TEST_ADMIN_EMAIL);
    assert_eq!(json["admin"]["name"], "Manager");
}

#[sqlx::test(migrations = "../db/migrations/sqlite")]
async fn me_rejects_missing_malformed_and_stale_tokens(pool: SqlitePool) {
    let response = get(build_test_app(pool.clone()), "/api/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(build_test_app(pool.clone()), "/api/auth/me", "garbage").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Valid signature, but the admin row does not exist.
    let token = generate_token(777, "gone@watches.mr", "admin", &test_config().jwt).unwrap();
    let response = get_auth(build_test_app(pool), "/api/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations/sqlite")]
async fn non_admin_role_is_rejected(pool: SqlitePool) {
    let token = generate_token(1, "staff@watches.mr", "staff", &test_config().jwt).unwrap();
    let response = get_auth(build_test_app(pool), "/api/orders", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
