use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct CurrentUserRow {
    pub user_id: String,
}
