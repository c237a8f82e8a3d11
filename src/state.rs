use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::swipe::{DeckRegistry, HttpSwipeRecorder, LocalSwipeRecorder, SwipeRecorder};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub decks: DeckRegistry,
    pub recorder: Arc<dyn SwipeRecorder>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Picks the http recorder when `swipe_api_url` is configured, the local one otherwise.
    pub fn new(pool: SqlitePool, config: AppConfig) -> Self {
        let recorder: Arc<dyn SwipeRecorder> = match config.swipe_api_url.as_deref() {
            Some(url) => Arc::new(HttpSwipeRecorder::new(url)),
            None => Arc::new(LocalSwipeRecorder::new(pool.clone())),
        };
        Self::with_recorder(pool, config, recorder)
    }

    pub fn with_recorder(pool: SqlitePool, config: AppConfig, recorder: Arc<dyn SwipeRecorder>) -> Self {
        Self {
            pool,
            decks: DeckRegistry::new(),
            recorder,
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}
