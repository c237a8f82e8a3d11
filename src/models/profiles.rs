// Swipeable profile row (recommendations + deck cards).
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct ProfileRow {
    pub id: String,
    pub display_name: Option<String>,
    pub age: Option<i64>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub spotify_connected: Option<i64>,
}
