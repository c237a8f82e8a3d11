use std::collections::{HashMap, HashSet};

use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::database::profiles_repo;
use crate::models::ProfileRow;

#[derive(Debug, Clone, Error)]
#[error("recommender returned {status}")]
pub struct RecommenderUpstreamError {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl RecommenderUpstreamError {
    fn new(status: StatusCode, body: Option<Value>) -> Self {
        Self { status, body }
    }
}

#[derive(Debug, Deserialize)]
struct RecommendationsBody {
    #[serde(rename = "recommendedUserIDs", default)]
    recommended_user_ids: Vec<String>,
}

fn connect_failed(url: &str, err: impl ToString) -> RecommenderUpstreamError {
    RecommenderUpstreamError::new(
        StatusCode::BAD_GATEWAY,
        Some(serde_json::json!({
            "error": "connect_failed",
            "detail": err.to_string(),
            "url": url
        })),
    )
}

/// Ranked profile ids from the recommender service.
pub async fn recommended_user_ids(
    base_url: &str,
    user_id: &str,
) -> Result<Vec<String>, RecommenderUpstreamError> {
    let url = format!("{}/api/py/recommendations", base_url.trim_end_matches('/'));

    let client = reqwest::Client::new();
    let resp = client
        .get(&url)
        .query(&[("userID", user_id)])
        .send()
        .await
        .map_err(|e| connect_failed(&url, e))?;

    let status = StatusCode::from_u16(resp.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    if !status.is_success() {
        let body = resp.json::<Value>().await.ok();
        return Err(RecommenderUpstreamError::new(status, body));
    }

    let body: RecommendationsBody = resp.json().await.map_err(|e| connect_failed(&url, e))?;
    Ok(body.recommended_user_ids)
}

#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error(transparent)]
    Upstream(#[from] RecommenderUpstreamError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Profiles recommended for `user_id`, in the recommender's order.
///
/// The user themself, profiles they already swiped on and ids without a
/// profile row are skipped.
pub async fn load_recommended_profiles(
    pool: &SqlitePool,
    base_url: &str,
    user_id: &str,
) -> Result<Vec<ProfileRow>, RecommendationError> {
    let ranked = recommended_user_ids(base_url, user_id).await?;
    let swiped: HashSet<String> = profiles_repo::load_swiped_receiver_ids(pool, user_id)
        .await?
        .into_iter()
        .collect();

    let mut seen = HashSet::new();
    let wanted: Vec<String> = ranked
        .into_iter()
        .filter(|id| id != user_id && !swiped.contains(id))
        .filter(|id| seen.insert(id.clone()))
        .collect();

    let rows = profiles_repo::load_profiles_by_ids(pool, &wanted).await?;
    Ok(rank_profiles(&wanted, rows))
}

fn rank_profiles(order: &[String], rows: Vec<ProfileRow>) -> Vec<ProfileRow> {
    let mut by_id: HashMap<String, ProfileRow> = rows.into_iter().map(|r| (r.id.clone(), r)).collect();
    order.iter().filter_map(|id| by_id.remove(id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str) -> ProfileRow {
        ProfileRow {
            id: id.to_string(),
            ..ProfileRow::default()
        }
    }

    #[test]
    fn ranking_follows_recommender_order_and_skips_missing() {
        let order = vec!["c".to_string(), "missing".to_string(), "a".to_string(), "b".to_string()];
        let ranked = rank_profiles(&order, vec![row("a"), row("b"), row("c")]);
        let ids: Vec<&str> = ranked.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn unreachable_recommender_is_bad_gateway() {
        let err = recommended_user_ids("http://127.0.0.1:1", "me").await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert_eq!(err.body.unwrap()["error"], "connect_failed");
    }
}
