use std::env;

use crate::swipe::dispatcher::DEFAULT_CHATS_PATH;

const DEFAULT_RECOMMENDER_URL: &str = "http://127.0.0.1:3000";

/// Runtime settings read from the environment (`.env` is loaded first in `main`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Remote swipe api; `None` records straight into the local database.
    pub swipe_api_url: Option<String>,
    pub recommender_url: String,
    pub chats_path: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        let database_url = env::var("DATABASE_URL")?;
        Ok(Self {
            database_url,
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            swipe_api_url: env::var("SWIPE_API_URL")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            recommender_url: env::var("RECOMMENDER_URL")
                .unwrap_or_else(|_| DEFAULT_RECOMMENDER_URL.to_string()),
            chats_path: env::var("CHATS_PATH").unwrap_or_else(|_| DEFAULT_CHATS_PATH.to_string()),
        })
    }

    /// Settings for a given database with every optional value at its default.
    pub fn with_database(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            swipe_api_url: None,
            recommender_url: DEFAULT_RECOMMENDER_URL.to_string(),
            chats_path: DEFAULT_CHATS_PATH.to_string(),
        }
    }
}
