use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;
use std::net::SocketAddr;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use hyking::config::AppConfig;
use hyking::database::schema;
use hyking::state::AppState;
use hyking::web;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("DATABASE_URL must be set in .env: {}", e);
            std::process::exit(1);
        }
    };

    info!(database_url = %config.database_url, "connecting to database");
    let pool = match SqlitePoolOptions::new().connect(&config.database_url).await {
        Ok(p) => p,
        Err(e) => {
            error!("Could not connect to database: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = schema::ensure_schema(&pool).await {
        error!("Could not prepare schema: {}", e);
        std::process::exit(1);
    }

    match config.swipe_api_url.as_deref() {
        Some(url) => info!(swipe_api_url = url, "recording swipes through remote api"),
        None => info!("recording swipes in the local database"),
    }

    let host = config.host.clone();
    let port = config.port;
    let app = web::router(AppState::new(pool, config));

    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            error!("Could not parse host/port {}:{}: {}", host, port, e);
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            warn!("Could not bind {}: {}. Trying fallback {}:{}", addr, e, host, port + 1);
            let fallback = SocketAddr::new(addr.ip(), port + 1);
            match tokio::net::TcpListener::bind(fallback).await {
                Ok(l) => l,
                Err(e) => {
                    error!("Could not bind fallback port: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    if let Ok(bound_addr) = listener.local_addr() {
        info!("🚀 Server running on http://{}", bound_addr);
        info!("📍 Open http://{}/dashboard/match to start swiping", bound_addr);
    }

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}
