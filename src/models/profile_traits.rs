use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ProfileInterestRow {
    pub profile_id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct ProfileSkillRow {
    pub profile_id: String,
    pub skill: String,
    pub level: String,
}
