use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct GroupMatchRow {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct GroupMatchMemberRow {
    pub group_match_id: String,
    pub profile_id: String,
    pub display_name: Option<String>,
    pub image_url: Option<String>,
}
