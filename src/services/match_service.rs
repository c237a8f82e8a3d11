use sqlx::SqlitePool;

use crate::database::swipes_repo;
use crate::swipe::candidate::DEFAULT_AVATAR;

pub struct MatchView {
    pub user_id: String,
    pub name: String,
    pub image_url: String,
    pub matched_at: String,
}

pub async fn load_match_views(pool: &SqlitePool, user_id: &str) -> sqlx::Result<Vec<MatchView>> {
    let rows = swipes_repo::load_matches(pool, user_id).await?;
    Ok(rows
        .into_iter()
        .map(|row| MatchView {
            user_id: row.other_user_id,
            name: row
                .other_display_name
                .unwrap_or_else(|| "No name provided".to_string()),
            image_url: row
                .other_image_url
                .unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
            matched_at: row.created_at.chars().take(16).collect(),
        })
        .collect())
}
