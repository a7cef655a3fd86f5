#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use tasktrack_api::auth::jwt::{generate_access_token, JwtConfig};
use tasktrack_api::config::ServerConfig;
use tasktrack_api::router::build_app_router;
use tasktrack_api::state::AppState;
use tasktrack_db::models::user::CreateUser;
use tasktrack_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: String::new(),
        database_max_connections: 5,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router over the given pool, with the same
/// middleware stack production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A persisted user and a valid bearer token for them.
pub struct TestUser {
    pub id: i64,
    pub token: String,
}

pub async fn create_user(pool: &PgPool, email: &str) -> TestUser {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: email.to_string(),
            email: email.to_string(),
        },
    )
    .await
    .unwrap();
    let token = generate_access_token(user.id, &test_config().jwt).unwrap();
    TestUser { id: user.id, token }
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, user: &TestUser) -> Response<Body> {
    send(app, Method::GET, uri, Some(&user.token), None).await
}

pub async fn get_anonymous(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_with_token(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    user: &TestUser,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(&user.token), Some(body)).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    user: &TestUser,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(&user.token), Some(body)).await
}

pub async fn delete(app: Router, uri: &str, user: &TestUser) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(&user.token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
