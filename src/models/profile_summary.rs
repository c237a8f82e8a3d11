use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ProfileSummaryRow {
    pub id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub likes_sent: i64,
    pub matches_count: i64,
}
