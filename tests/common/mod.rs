#![allow(dead_code)]

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::time::Duration;
use tower::ServiceExt;

use hyking::config::AppConfig;
use hyking::database::schema;
use hyking::services::seed_service::{self, SeedFile};
use hyking::state::AppState;
use hyking::web;

/// Single-connection in-memory database so every query sees the same data.
pub async fn memory_pool() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    schema::ensure_schema(&pool).await?;
    Ok(pool)
}

pub async fn seed(pool: &SqlitePool, seed: serde_json::Value) -> Result<()> {
    let seed: SeedFile = serde_json::from_value(seed)?;
    seed_service::apply_seed(pool, &seed).await?;
    Ok(())
}

pub fn app(pool: SqlitePool) -> Router {
    app_with(pool, |_| {})
}

pub fn app_with(pool: SqlitePool, tweak: impl FnOnce(&mut AppConfig)) -> Router {
    let mut config = AppConfig::with_database("sqlite::memory:");
    // nothing listens here, so profile decks fail fast unless a test overrides it
    config.recommender_url = "http://127.0.0.1:1".to_string();
    tweak(&mut config);
    web::router(AppState::new(pool, config))
}

pub fn token_for(sub: &str) -> String {
    use base64::{engine::general_purpose, Engine as _};
    let payload = general_purpose::URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"{}"}}"#, sub));
    format!("eyJhbGciOiJIUzI1NiJ9.{}.sig", payload)
}

pub async fn get(app: &Router, uri: &str) -> Result<Response> {
    let request = Request::builder().uri(uri).body(Body::empty())?;
    Ok(app.clone().oneshot(request).await?)
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    user: Option<&str>,
    body: serde_json::Value,
) -> Result<Response> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(user) = user {
        builder = builder.header(header::COOKIE, format!("access_token={}", token_for(user)));
    }
    let request = builder.body(Body::from(serde_json::to_vec(&body)?))?;
    Ok(app.clone().oneshot(request).await?)
}

pub async fn post_form(app: &Router, uri: &str, form: &str) -> Result<Response> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))?;
    Ok(app.clone().oneshot(request).await?)
}

pub async fn body_text(response: Response) -> Result<String> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

pub async fn body_json(response: Response) -> Result<serde_json::Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

pub fn assert_redirect(response: &Response, to: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response).as_deref(), Some(to));
}

pub async fn count(pool: &SqlitePool, sql: &str) -> Result<i64> {
    Ok(sqlx::query_scalar(sql).fetch_one(pool).await?)
}

/// Waits for a detached swipe dispatch to land in the database.
pub async fn wait_for_count(pool: &SqlitePool, sql: &str, expected: i64) -> Result<i64> {
    let mut last = 0;
    for _ in 0..100 {
        last = count(pool, sql).await?;
        if last == expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    Ok(last)
}
