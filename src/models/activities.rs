#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct ActivityRow {
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
    pub public_transport_friendly: Option<i64>,
}
