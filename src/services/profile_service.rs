use serde::Serialize;
use sqlx::SqlitePool;

use crate::database::profiles_repo;
use crate::swipe::candidate::DEFAULT_AVATAR;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummaryView {
    pub id: String,
    pub email: Option<String>,
    pub display_name: String,
    pub image_url: String,
    pub avatar_initial: String,
    pub location: Option<String>,
    pub likes_sent: i64,
    pub matches_count: i64,
}

pub async fn load_profile_summary_view(
    pool: &SqlitePool,
    user_id: &str,
) -> sqlx::Result<Option<ProfileSummaryView>> {
    let Some(row) = profiles_repo::load_profile_summary(pool, user_id).await? else {
        return Ok(None);
    };

    let email = row
        .email
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    Ok(Some(ProfileSummaryView {
        avatar_initial: avatar_initial(email.as_deref()),
        id: row.id,
        email,
        display_name: row
            .display_name
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "No name provided".to_string()),
        image_url: row
            .image_url
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
        location: row.location.filter(|s| !s.trim().is_empty()),
        likes_sent: row.likes_sent,
        matches_count: row.matches_count,
    }))
}

fn avatar_initial(email: Option<&str>) -> String {
    email
        .and_then(|e| e.chars().next())
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "?".to_string())
}
