use sqlx::SqlitePool;

use crate::models::MatchRow;

pub struct NewSwipe<'a> {
    pub id: &'a str,
    pub actor_id: &'a str,
    pub target_id: &'a str,
    pub action: &'a str, // like|dislike
}

const SQL_UPSERT_ACTIVITY_SWIPE: &str = r#"
INSERT INTO activity_swipes (id, profile_id, activity_id, action)
VALUES (?1, ?2, ?3, ?4)
ON CONFLICT (profile_id, activity_id) DO UPDATE SET
  action = excluded.action,
  created_at = datetime('now')
"#;

const SQL_UPSERT_USER_SWIPE: &str = r#"
INSERT INTO user_swipes (id, sender_id, receiver_id, action)
VALUES (?1, ?2, ?3, ?4)
ON CONFLICT (sender_id, receiver_id) DO UPDATE SET
  action = excluded.action,
  created_at = datetime('now')
"#;

const SQL_HAS_LIKED: &str = r#"
SELECT COUNT(*)
FROM user_swipes
WHERE sender_id = ?1 AND receiver_id = ?2 AND action = 'like'
"#;

const SQL_INSERT_MATCH: &str = r#"
INSERT OR IGNORE INTO matches (id, user_a, user_b)
VALUES (?1, ?2, ?3)
"#;

const SQL_LOAD_MATCHES: &str = r#"
SELECT
  m.id AS match_id,
  CASE WHEN m.user_a = ?1 THEN m.user_b ELSE m.user_a END AS other_user_id,
  p.display_name AS other_display_name,
  p.image_url AS other_image_url,
  m.created_at
FROM matches m
LEFT JOIN profiles p ON p.id = CASE WHEN m.user_a = ?1 THEN m.user_b ELSE m.user_a END
WHERE m.user_a = ?1 OR m.user_b = ?1
ORDER BY m.created_at DESC, m.id
"#;

pub async fn upsert_activity_swipe(pool: &SqlitePool, swipe: NewSwipe<'_>) -> sqlx::Result<()> {
    let activity_id: i64 = swipe
        .target_id
        .parse()
        .map_err(|_| sqlx::Error::Protocol("activity id must be numeric".into()))?;
    sqlx::query(SQL_UPSERT_ACTIVITY_SWIPE)
        .bind(swipe.id)
        .bind(swipe.actor_id)
        .bind(activity_id)
        .bind(swipe.action)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn upsert_user_swipe(pool: &SqlitePool, swipe: NewSwipe<'_>) -> sqlx::Result<()> {
    sqlx::query(SQL_UPSERT_USER_SWIPE)
        .bind(swipe.id)
        .bind(swipe.actor_id)
        .bind(swipe.target_id)
        .bind(swipe.action)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn has_liked(pool: &SqlitePool, sender_id: &str, receiver_id: &str) -> sqlx::Result<bool> {
    let count: i64 = sqlx::query_scalar(SQL_HAS_LIKED)
        .bind(sender_id)
        .bind(receiver_id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Stores the pair once regardless of who liked last. Returns whether a row was created.
pub async fn insert_match(pool: &SqlitePool, id: &str, user_x: &str, user_y: &str) -> sqlx::Result<bool> {
    let (user_a, user_b) = if user_x <= user_y {
        (user_x, user_y)
    } else {
        (user_y, user_x)
    };
    let result = sqlx::query(SQL_INSERT_MATCH)
        .bind(id)
        .bind(user_a)
        .bind(user_b)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn load_matches(pool: &SqlitePool, user_id: &str) -> sqlx::Result<Vec<MatchRow>> {
    sqlx::query_as::<_, MatchRow>(SQL_LOAD_MATCHES)
        .bind(user_id)
        .fetch_all(pool)
        .await
}
