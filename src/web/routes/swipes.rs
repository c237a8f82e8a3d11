use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::swipe_service;
use crate::swipe::{SwipeAction, SwipeError};
use crate::web::middleware::auth::AuthenticatedUser;

type ApiError = (StatusCode, Json<Value>);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySwipeBody {
    pub activity_id: i64,
    pub action: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSwipeBody {
    pub receiver_id: String,
    pub action: String,
}

fn parse_action(raw: &str) -> Result<SwipeAction, ApiError> {
    SwipeAction::parse(raw).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "invalid_action" })),
        )
    })
}

fn swipe_error_response(e: SwipeError) -> ApiError {
    match e {
        SwipeError::Invalid(detail) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "invalid_swipe", "detail": detail })),
        ),
        other => {
            warn!(error = %other, "record_swipe_failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Failed to record swipe" })),
            )
        }
    }
}

pub async fn activity_swipe_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
    Json(body): Json<ActivitySwipeBody>,
) -> Result<Json<Value>, ApiError> {
    let action = parse_action(&body.action)?;
    swipe_service::record_activity_swipe(&pool, &auth_user.id, body.activity_id, action)
        .await
        .map_err(swipe_error_response)?;
    Ok(Json(serde_json::json!({ "success": true })))
}

pub async fn profile_swipe_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
    Json(body): Json<ProfileSwipeBody>,
) -> Result<Json<Value>, ApiError> {
    let action = parse_action(&body.action)?;
    let outcome = swipe_service::record_profile_swipe(&pool, &auth_user.id, &body.receiver_id, action)
        .await
        .map_err(swipe_error_response)?;
    Ok(Json(serde_json::json!({ "match": outcome.mutual_match })))
}
