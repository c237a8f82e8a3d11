use sqlx::SqlitePool;

use crate::models::ActivityRow;

const ACTIVITY_COLUMNS: &str = r#"
    a.id, a.title, a.teaser_text, a.primary_region, a.length, a.difficulty,
    a.primary_image_id, a.duration_min, a.ascent, a.descent, a.max_altitude,
    a.public_transport_friendly
"#;

pub const SQL_UNSWIPED_ACTIVITIES_TAIL: &str = r#"
FROM activities a
WHERE NOT EXISTS (
    SELECT 1 FROM activity_swipes s
    WHERE s.activity_id = a.id AND s.profile_id = ?1
)
ORDER BY a.id ASC
LIMIT 200
"#;

pub const SQL_ACTIVITY_BY_ID_TAIL: &str = r#"
FROM activities a
WHERE a.id = ?1
"#;

/// Hikes the viewer has not swiped yet, in deck order.
pub async fn load_unswiped_activities(
    pool: &SqlitePool,
    viewer_id: &str,
) -> sqlx::Result<Vec<ActivityRow>> {
    let sql = format!("SELECT {} {}", ACTIVITY_COLUMNS, SQL_UNSWIPED_ACTIVITIES_TAIL);
    sqlx::query_as::<_, ActivityRow>(&sql)
        .bind(viewer_id)
        .fetch_all(pool)
        .await
}

pub async fn load_activity(pool: &SqlitePool, activity_id: i64) -> sqlx::Result<Option<ActivityRow>> {
    let sql = format!("SELECT {} {}", ACTIVITY_COLUMNS, SQL_ACTIVITY_BY_ID_TAIL);
    sqlx::query_as::<_, ActivityRow>(&sql)
        .bind(activity_id)
        .fetch_optional(pool)
        .await
}

pub async fn activity_exists(pool: &SqlitePool, activity_id: i64) -> sqlx::Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM activities WHERE id = ?1")
        .bind(activity_id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

const SQL_UPSERT_ACTIVITY: &str = r#"
INSERT INTO activities (
  id, title, teaser_text, primary_region, length, difficulty, primary_image_id,
  duration_min, ascent, descent, max_altitude, public_transport_friendly
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
ON CONFLICT (id) DO UPDATE SET
  title = excluded.title,
  teaser_text = excluded.teaser_text,
  primary_region = excluded.primary_region,
  length = excluded.length,
  difficulty = excluded.difficulty,
  primary_image_id = excluded.primary_image_id,
  duration_min = excluded.duration_min,
  ascent = excluded.ascent,
  descent = excluded.descent,
  max_altitude = excluded.max_altitude,
  public_transport_friendly = excluded.public_transport_friendly
"#;

pub async fn upsert_activity(pool: &SqlitePool, row: &ActivityRow) -> sqlx::Result<()> {
    sqlx::query(SQL_UPSERT_ACTIVITY)
        .bind(row.id)
        .bind(row.title.as_deref())
        .bind(row.teaser_text.as_deref())
        .bind(row.primary_region.as_deref())
        .bind(row.length)
        .bind(row.difficulty.as_deref())
        .bind(row.primary_image_id.as_deref())
        .bind(row.duration_min)
        .bind(row.ascent)
        .bind(row.descent)
        .bind(row.max_altitude)
        .bind(row.public_transport_friendly.unwrap_or(0))
        .execute(pool)
        .await?;
    Ok(())
}
