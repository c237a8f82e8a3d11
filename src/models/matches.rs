use sqlx::FromRow;

// One row per mutual match, seen from the caller's side.
#[derive(Debug, Clone, FromRow)]
pub struct MatchRow {
    pub match_id: String,
    pub other_user_id: String,
    pub other_display_name: Option<String>,
    pub other_image_url: Option<String>,
    pub created_at: String,
}
