use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::database::hikes_repo;
use crate::models::{ActivityRow, ProfileRow};
use crate::services::profile_traits_service::ProfileTraits;
use crate::services::recommender_service::{self, RecommendationError};
use crate::state::AppState;
use crate::swipe::candidate::SkillLevel;
use crate::web::middleware::auth::AuthenticatedUser;

type ApiError = (StatusCode, Json<Value>);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileJson {
    pub id: String,
    pub display_name: Option<String>,
    pub age: Option<i64>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub spotify_connected: bool,
    pub interests: Vec<String>,
    pub skills: Vec<SkillLevel>,
}

impl From<ProfileRow> for ProfileJson {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            display_name: row.display_name,
            age: row.age,
            location: row.location,
            bio: row.bio,
            image_url: row.image_url,
            spotify_connected: row.spotify_connected.unwrap_or(0) == 1,
            interests: Vec::new(),
            skills: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityJson {
    pub id: i64,
    pub title: Option<String>,
    pub teaser_text: Option<String>,
    pub primary_region: Option<String>,
    pub length: Option<i64>,
    pub difficulty: Option<String>,
    pub primary_image_id: Option<String>,
    pub duration_min: Option<i64>,
    pub ascent: Option<i64>,
    pub descent: Option<i64>,
    pub max_altitude: Option<i64>,
    pub public_transport_friendly: bool,
}

impl From<ActivityRow> for ActivityJson {
    fn from(row: ActivityRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            teaser_text: row.teaser_text,
            primary_region: row.primary_region,
            length: row.length,
            difficulty: row.difficulty,
            primary_image_id: row.primary_image_id,
            duration_min: row.duration_min,
            ascent: row.ascent,
            descent: row.descent,
            max_altitude: row.max_altitude,
            public_transport_friendly: row.public_transport_friendly.unwrap_or(0) == 1,
        }
    }
}

fn recommendation_error_response(e: RecommendationError) -> ApiError {
    match e {
        RecommendationError::Upstream(e) => {
            warn!(status = %e.status, body = ?e.body, "recommender_failed");
            (
                e.status,
                Json(serde_json::json!({ "error": "Failed to fetch user recommendations" })),
            )
        }
        RecommendationError::Database(e) => {
            warn!(error = %e, "recommendation_profiles_failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Failed to process recommendation" })),
            )
        }
    }
}

async fn recommendations_for(state: &AppState, user_id: &str) -> Result<Json<Vec<ProfileJson>>, ApiError> {
    let rows = recommender_service::load_recommended_profiles(&state.pool, &state.config.recommender_url, user_id)
        .await
        .map_err(recommendation_error_response)?;

    let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
    let mut traits = ProfileTraits::load(&state.pool, &ids)
        .await
        .map_err(|e| recommendation_error_response(RecommendationError::Database(e)))?;

    Ok(Json(
        rows.into_iter()
            .map(|row| {
                let (interests, skills) = traits.take(&row.id);
                ProfileJson {
                    interests,
                    skills,
                    ..ProfileJson::from(row)
                }
            })
            .collect(),
    ))
}

pub async fn my_recommendations_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfileJson>>, ApiError> {
    recommendations_for(&state, &auth_user.id).await
}

pub async fn user_recommendations_handler(
    Extension(_auth_user): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfileJson>>, ApiError> {
    recommendations_for(&state, &user_id).await
}

pub async fn hikes_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ActivityJson>>, ApiError> {
    let rows = hikes_repo::load_unswiped_activities(&state.pool, &auth_user.id)
        .await
        .map_err(|e| {
            warn!(error = %e, "hikes_load_failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Failed to fetch activities" })),
            )
        })?;
    Ok(Json(rows.into_iter().map(ActivityJson::from).collect()))
}
