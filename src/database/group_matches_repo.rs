use sqlx::{sqlite::SqliteArguments, Arguments, SqlitePool};

use crate::models::{GroupMatchMemberRow, GroupMatchRow};

pub const SQL_LOAD_GROUP_MATCHES_FOR_PROFILE: &str = r#"
SELECT g.id, g.title, g.description, g.created_at
FROM group_matches g
JOIN group_match_profiles gp ON gp.group_match_id = g.id
WHERE gp.profile_id = ?1
ORDER BY g.created_at DESC, g.id
"#;

pub const SQL_GROUP_MEMBERS_BASE: &str = r#"
SELECT gp.group_match_id, gp.profile_id, p.display_name, p.image_url
FROM group_match_profiles gp
LEFT JOIN profiles p ON p.id = gp.profile_id
"#;

pub async fn load_group_matches_for_profile(
    pool: &SqlitePool,
    profile_id: &str,
) -> sqlx::Result<Vec<GroupMatchRow>> {
    sqlx::query_as::<_, GroupMatchRow>(SQL_LOAD_GROUP_MATCHES_FOR_PROFILE)
        .bind(profile_id)
        .fetch_all(pool)
        .await
}

pub async fn load_group_members(
    pool: &SqlitePool,
    group_ids: &[String],
) -> sqlx::Result<Vec<GroupMatchMemberRow>> {
    if group_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut sql = String::from(SQL_GROUP_MEMBERS_BASE);
    let mut args = SqliteArguments::default();
    let placeholders = vec!["?"; group_ids.len()].join(", ");
    sql.push_str(&format!(
        " WHERE gp.group_match_id IN ({}) ORDER BY gp.group_match_id, gp.profile_id",
        placeholders
    ));
    for id in group_ids {
        args.add(id.as_str()).map_err(sqlx::Error::Encode)?;
    }

    sqlx::query_as_with::<_, GroupMatchMemberRow, _>(&sql, args)
        .fetch_all(pool)
        .await
}

const SQL_UPSERT_GROUP_MATCH: &str = r#"
INSERT INTO group_matches (id, title, description)
VALUES (?1, ?2, ?3)
ON CONFLICT (id) DO UPDATE SET
  title = excluded.title,
  description = excluded.description
"#;

const SQL_INSERT_GROUP_MEMBER: &str = r#"
INSERT OR IGNORE INTO group_match_profiles (group_match_id, profile_id)
VALUES (?1, ?2)
"#;

pub async fn upsert_group_match(
    pool: &SqlitePool,
    id: &str,
    title: Option<&str>,
    description: Option<&str>,
    profile_ids: &[String],
) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query(SQL_UPSERT_GROUP_MATCH)
        .bind(id)
        .bind(title)
        .bind(description)
        .execute(&mut *tx)
        .await?;
    for profile_id in profile_ids {
        sqlx::query(SQL_INSERT_GROUP_MEMBER)
            .bind(id)
            .bind(profile_id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await
}
