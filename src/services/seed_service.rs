use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::info;

use crate::database::{
    current_user_repo, group_matches_repo, hikes_repo, profile_traits_repo, profiles_repo, schema,
};
use crate::models::ActivityRow;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SeedFile {
    #[serde(default)]
    pub current_user: Option<String>,
    #[serde(default)]
    pub profiles: Vec<SeedProfile>,
    #[serde(default)]
    pub activities: Vec<SeedActivity>,
    #[serde(default)]
    pub group_matches: Vec<SeedGroupMatch>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SeedProfile {
    pub id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub age: Option<i64>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub spotify_connected: bool,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub skills: Vec<SeedSkill>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SeedSkill {
    pub skill: String,
    pub level: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SeedActivity {
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
    #[serde(default)]
    pub public_transport_friendly: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SeedGroupMatch {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub profile_ids: Vec<String>,
}

#[derive(Debug, Default)]
pub struct SeedReport {
    pub profiles: usize,
    pub activities: usize,
    pub group_matches: usize,
    pub current_user_set: bool,
}

/// Upserts everything in `seed`. Running it twice leaves the same rows.
pub async fn apply_seed(pool: &SqlitePool, seed: &SeedFile) -> sqlx::Result<SeedReport> {
    schema::ensure_schema(pool).await?;
    let mut report = SeedReport::default();

    for p in &seed.profiles {
        profiles_repo::upsert_profile(
            pool,
            profiles_repo::NewProfile {
                id: &p.id,
                email: p.email.as_deref(),
                display_name: p.display_name.as_deref(),
                age: p.age,
                location: p.location.as_deref(),
                bio: p.bio.as_deref(),
                image_url: p.image_url.as_deref(),
                spotify_connected: p.spotify_connected,
            },
        )
        .await?;

        let interests: Vec<String> = p
            .interests
            .iter()
            .filter(|name| !profile_traits_repo::trait_key(name).is_empty())
            .cloned()
            .collect();
        profile_traits_repo::set_profile_interests(pool, &p.id, &interests).await?;

        let skills: Vec<(String, String)> = p
            .skills
            .iter()
            .filter(|s| {
                !profile_traits_repo::trait_key(&s.skill).is_empty()
                    && !profile_traits_repo::trait_key(&s.level).is_empty()
            })
            .map(|s| (s.skill.clone(), s.level.clone()))
            .collect();
        profile_traits_repo::set_profile_skills(pool, &p.id, &skills).await?;
        report.profiles += 1;
    }

    for a in &seed.activities {
        let row = ActivityRow {
            id: a.id,
            title: a.title.clone(),
            teaser_text: a.teaser_text.clone(),
            primary_region: a.primary_region.clone(),
            length: a.length,
            difficulty: a.difficulty.clone(),
            primary_image_id: a.primary_image_id.clone(),
            duration_min: a.duration_min,
            ascent: a.ascent,
            descent: a.descent,
            max_altitude: a.max_altitude,
            public_transport_friendly: Some(a.public_transport_friendly as i64),
        };
        hikes_repo::upsert_activity(pool, &row).await?;
        report.activities += 1;
    }

    for g in &seed.group_matches {
        group_matches_repo::upsert_group_match(
            pool,
            &g.id,
            g.title.as_deref(),
            g.description.as_deref(),
            &g.profile_ids,
        )
        .await?;
        report.group_matches += 1;
    }

    if let Some(user_id) = seed.current_user.as_deref() {
        current_user_repo::set_current_user_id(pool, user_id).await?;
        report.current_user_set = true;
    }

    info!(
        profiles = report.profiles,
        activities = report.activities,
        group_matches = report.group_matches,
        "seed_applied"
    );
    Ok(report)
}
