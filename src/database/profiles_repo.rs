use sqlx::{sqlite::SqliteArguments, Arguments, SqlitePool};

use crate::models::{ProfileRow, ProfileSummaryRow};

pub const SQL_PROFILE_BASE: &str = r#"
SELECT
    p.id, p.display_name, p.age, p.location, p.bio, p.image_url, p.spotify_connected
FROM profiles p
"#;

pub const SQL_LOAD_PROFILE_SUMMARY: &str = r#"
SELECT
    p.id,
    p.email,
    p.display_name,
    p.image_url,
    p.location,
    (SELECT COUNT(*) FROM user_swipes s WHERE s.sender_id = p.id AND s.action = 'like') AS likes_sent,
    (SELECT COUNT(*) FROM matches m WHERE m.user_a = p.id OR m.user_b = p.id) AS matches_count
FROM profiles p
WHERE p.id = ?1
"#;

const SQL_SWIPED_RECEIVER_IDS: &str = r#"
SELECT receiver_id
FROM user_swipes
WHERE sender_id = ?1
"#;

/// Loads the given profiles. Result order is unspecified; callers re-rank.
pub async fn load_profiles_by_ids(
    pool: &SqlitePool,
    ids: &[String],
) -> sqlx::Result<Vec<ProfileRow>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut sql = String::from(SQL_PROFILE_BASE);
    let mut args = SqliteArguments::default();
    let placeholders = vec!["?"; ids.len()].join(", ");
    sql.push_str(&format!(" WHERE p.id IN ({})", placeholders));
    for id in ids {
        args.add(id.as_str()).map_err(sqlx::Error::Encode)?;
    }

    sqlx::query_as_with::<_, ProfileRow, _>(&sql, args)
        .fetch_all(pool)
        .await
}

pub async fn load_profile(pool: &SqlitePool, profile_id: &str) -> sqlx::Result<Option<ProfileRow>> {
    let sql = format!("{} WHERE p.id = ?1", SQL_PROFILE_BASE);
    sqlx::query_as::<_, ProfileRow>(&sql)
        .bind(profile_id)
        .fetch_optional(pool)
        .await
}

pub async fn load_profile_summary(
    pool: &SqlitePool,
    profile_id: &str,
) -> sqlx::Result<Option<ProfileSummaryRow>> {
    sqlx::query_as::<_, ProfileSummaryRow>(SQL_LOAD_PROFILE_SUMMARY)
        .bind(profile_id)
        .fetch_optional(pool)
        .await
}

pub async fn load_swiped_receiver_ids(pool: &SqlitePool, sender_id: &str) -> sqlx::Result<Vec<String>> {
    sqlx::query_scalar::<_, String>(SQL_SWIPED_RECEIVER_IDS)
        .bind(sender_id)
        .fetch_all(pool)
        .await
}

pub struct NewProfile<'a> {
    pub id: &'a str,
    pub email: Option<&'a str>,
    pub display_name: Option<&'a str>,
    pub age: Option<i64>,
    pub location: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub spotify_connected: bool,
}

const SQL_UPSERT_PROFILE: &str = r#"
INSERT INTO profiles (id, email, display_name, age, location, bio, image_url, spotify_connected)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
ON CONFLICT (id) DO UPDATE SET
  email = excluded.email,
  display_name = excluded.display_name,
  age = excluded.age,
  location = excluded.location,
  bio = excluded.bio,
  image_url = excluded.image_url,
  spotify_connected = excluded.spotify_connected
"#;

pub async fn upsert_profile(pool: &SqlitePool, profile: NewProfile<'_>) -> sqlx::Result<()> {
    sqlx::query(SQL_UPSERT_PROFILE)
        .bind(profile.id)
        .bind(profile.email)
        .bind(profile.display_name)
        .bind(profile.age)
        .bind(profile.location)
        .bind(profile.bio)
        .bind(profile.image_url)
        .bind(profile.spotify_connected as i64)
        .execute(pool)
        .await?;
    Ok(())
}
