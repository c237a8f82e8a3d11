use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::database::profile_traits_repo;
use crate::models::ProfileRow;
use crate::swipe::candidate::{ProfileCard, SkillLevel};

/// Interests and hiking skills for a batch of profiles, keyed by profile id.
#[derive(Debug, Default)]
pub struct ProfileTraits {
    interests: HashMap<String, Vec<String>>,
    skills: HashMap<String, Vec<SkillLevel>>,
}

impl ProfileTraits {
    pub async fn load(pool: &SqlitePool, profile_ids: &[String]) -> sqlx::Result<Self> {
        let mut traits = ProfileTraits::default();
        for row in profile_traits_repo::load_interests_for(pool, profile_ids).await? {
            traits
                .interests
                .entry(row.profile_id)
                .or_default()
                .push(row.display_name);
        }
        for row in profile_traits_repo::load_skills_for(pool, profile_ids).await? {
            traits.skills.entry(row.profile_id).or_default().push(SkillLevel {
                skill: row.skill,
                level: row.level,
            });
        }
        Ok(traits)
    }

    /// Moves the profile's traits out; a second call returns empty lists.
    pub fn take(&mut self, profile_id: &str) -> (Vec<String>, Vec<SkillLevel>) {
        (
            self.interests.remove(profile_id).unwrap_or_default(),
            self.skills.remove(profile_id).unwrap_or_default(),
        )
    }
}

/// Cards for `rows` in the same order, with interests and skills attached.
pub async fn profile_cards(pool: &SqlitePool, rows: Vec<ProfileRow>) -> sqlx::Result<Vec<ProfileCard>> {
    let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
    let mut traits = ProfileTraits::load(pool, &ids).await?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let (interests, skills) = traits.take(&row.id);
            ProfileCard::from(row).with_traits(interests, skills)
        })
        .collect())
}
