use sqlx::SqlitePool;

use crate::models::CurrentUserRow;

const SQL_SELECT_ACTIVE_USER: &str = r#"
SELECT user_id
FROM current_user
ORDER BY rowid DESC
LIMIT 1
"#;

const SQL_DELETE_ALL: &str = "DELETE FROM current_user";

const SQL_INSERT_ACTIVE_USER: &str = "INSERT INTO current_user (user_id) VALUES (?1)";

/// Identity used by local installs that never see an `access_token` cookie.
pub async fn load_current_user_id(pool: &SqlitePool) -> sqlx::Result<Option<String>> {
    let active = sqlx::query_as::<_, CurrentUserRow>(SQL_SELECT_ACTIVE_USER)
        .fetch_optional(pool)
        .await?;
    Ok(active.map(|row| row.user_id))
}

/// Makes `user_id` the only local identity.
pub async fn set_current_user_id(pool: &SqlitePool, user_id: &str) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query(SQL_DELETE_ALL).execute(&mut *tx).await?;
    sqlx::query(SQL_INSERT_ACTIVE_USER)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await
}
