use axum::{extract::State, http::StatusCode, Extension, Json};
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::group_match_service::{self, GroupMatchView};
use crate::services::profile_service::{self, ProfileSummaryView};
use crate::web::middleware::auth::AuthenticatedUser;

type ApiError = (StatusCode, Json<Value>);

pub async fn me_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
) -> Result<Json<ProfileSummaryView>, ApiError> {
    match profile_service::load_profile_summary_view(&pool, &auth_user.id).await {
        Ok(Some(view)) => Ok(Json(view)),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Profile not found" })),
        )),
        Err(e) => {
            warn!("Profile summary load failed for {}: {}", auth_user.id, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Failed to fetch profile" })),
            ))
        }
    }
}

pub async fn group_matches_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<GroupMatchView>>, ApiError> {
    group_match_service::load_group_matches(&pool, &auth_user.id)
        .await
        .map(Json)
        .map_err(|e| {
            warn!("Group matches load failed for {}: {}", auth_user.id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Failed to fetch group matches" })),
            )
        })
}
