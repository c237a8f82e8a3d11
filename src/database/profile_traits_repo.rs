use sqlx::{sqlite::SqliteArguments, Arguments, SqlitePool};

use crate::models::{ProfileInterestRow, ProfileSkillRow};

const SQL_INTERESTS_BASE: &str = r#"
SELECT pi.profile_id, i.display_name
FROM profile_interests pi
JOIN interests i ON i.id = pi.interest_id
"#;

const SQL_SKILLS_BASE: &str = r#"
SELECT ps.profile_id, s.display_name AS skill, l.display_name AS level
FROM profile_skills ps
JOIN skills s ON s.id = ps.skill_id
JOIN skill_levels l ON l.id = ps.skill_level_id
"#;

const SQL_UPSERT_INTEREST: &str = r#"
INSERT INTO interests (id, display_name) VALUES (?1, ?2)
ON CONFLICT (id) DO UPDATE SET display_name = excluded.display_name
"#;

const SQL_UPSERT_SKILL: &str = r#"
INSERT INTO skills (id, display_name) VALUES (?1, ?2)
ON CONFLICT (id) DO UPDATE SET display_name = excluded.display_name
"#;

const SQL_UPSERT_SKILL_LEVEL: &str = r#"
INSERT INTO skill_levels (id, display_name) VALUES (?1, ?2)
ON CONFLICT (id) DO UPDATE SET display_name = excluded.display_name
"#;

fn in_clause(base: &str, column: &str, ids: &[String], order_by: &str) -> sqlx::Result<(String, SqliteArguments<'static>)> {
    let mut args = SqliteArguments::default();
    for id in ids {
        args.add(id.clone()).map_err(sqlx::Error::Encode)?;
    }
    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!("{} WHERE {} IN ({}) ORDER BY {}", base, column, placeholders, order_by);
    Ok((sql, args))
}

/// Interest names for each of `profile_ids`, alphabetical per profile.
pub async fn load_interests_for(
    pool: &SqlitePool,
    profile_ids: &[String],
) -> sqlx::Result<Vec<ProfileInterestRow>> {
    if profile_ids.is_empty() {
        return Ok(Vec::new());
    }
    let (sql, args) = in_clause(SQL_INTERESTS_BASE, "pi.profile_id", profile_ids, "i.display_name")?;
    sqlx::query_as_with::<_, ProfileInterestRow, _>(&sql, args)
        .fetch_all(pool)
        .await
}

/// Skill and level names for each of `profile_ids`.
pub async fn load_skills_for(
    pool: &SqlitePool,
    profile_ids: &[String],
) -> sqlx::Result<Vec<ProfileSkillRow>> {
    if profile_ids.is_empty() {
        return Ok(Vec::new());
    }
    let (sql, args) = in_clause(SQL_SKILLS_BASE, "ps.profile_id", profile_ids, "s.display_name")?;
    sqlx::query_as_with::<_, ProfileSkillRow, _>(&sql, args)
        .fetch_all(pool)
        .await
}

/// Replaces the profile's interests. Names are keyed by [`trait_key`].
pub async fn set_profile_interests(pool: &SqlitePool, profile_id: &str, names: &[String]) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM profile_interests WHERE profile_id = ?1")
        .bind(profile_id)
        .execute(&mut *tx)
        .await?;
    for name in names {
        let key = trait_key(name);
        sqlx::query(SQL_UPSERT_INTEREST)
            .bind(&key)
            .bind(name.trim())
            .execute(&mut *tx)
            .await?;
        sqlx::query("INSERT OR IGNORE INTO profile_interests (profile_id, interest_id) VALUES (?1, ?2)")
            .bind(profile_id)
            .bind(&key)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await
}

/// Replaces the profile's skills with `(skill, level)` name pairs.
pub async fn set_profile_skills(
    pool: &SqlitePool,
    profile_id: &str,
    skills: &[(String, String)],
) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM profile_skills WHERE profile_id = ?1")
        .bind(profile_id)
        .execute(&mut *tx)
        .await?;
    for (skill, level) in skills {
        let (skill_key, level_key) = (trait_key(skill), trait_key(level));
        sqlx::query(SQL_UPSERT_SKILL)
            .bind(&skill_key)
            .bind(skill.trim())
            .execute(&mut *tx)
            .await?;
        sqlx::query(SQL_UPSERT_SKILL_LEVEL)
            .bind(&level_key)
            .bind(level.trim())
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            r#"
INSERT INTO profile_skills (profile_id, skill_id, skill_level_id) VALUES (?1, ?2, ?3)
ON CONFLICT (profile_id, skill_id) DO UPDATE SET skill_level_id = excluded.skill_level_id
"#,
        )
        .bind(profile_id)
        .bind(&skill_key)
        .bind(&level_key)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

/// Stable id for a display name: lowercase, runs of non-alphanumerics collapsed to `-`.
pub fn trait_key(name: &str) -> String {
    let mut key = String::new();
    for c in name.trim().chars() {
        if c.is_alphanumeric() {
            key.extend(c.to_lowercase());
        } else if !key.is_empty() && !key.ends_with('-') {
            key.push('-');
        }
    }
    key.trim_end_matches('-').to_string()
}
