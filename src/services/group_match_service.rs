use std::collections::HashMap;

use serde::Serialize;
use sqlx::SqlitePool;

use crate::database::group_matches_repo;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMemberView {
    pub profile_id: String,
    pub display_name: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMatchView {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: String,
    pub profiles: Vec<GroupMemberView>,
}

/// Group matches the profile belongs to, with their members.
pub async fn load_group_matches(pool: &SqlitePool, profile_id: &str) -> sqlx::Result<Vec<GroupMatchView>> {
    let groups = group_matches_repo::load_group_matches_for_profile(pool, profile_id).await?;
    let ids: Vec<String> = groups.iter().map(|g| g.id.clone()).collect();

    let mut members: HashMap<String, Vec<GroupMemberView>> = HashMap::new();
    for row in group_matches_repo::load_group_members(pool, &ids).await? {
        members
            .entry(row.group_match_id)
            .or_default()
            .push(GroupMemberView {
                profile_id: row.profile_id,
                display_name: row.display_name.unwrap_or_else(|| "No name provided".to_string()),
                image_url: row.image_url,
            });
    }

    Ok(groups
        .into_iter()
        .map(|g| GroupMatchView {
            profiles: members.remove(&g.id).unwrap_or_default(),
            title: g.title.unwrap_or_else(|| "Hiking group".to_string()),
            id: g.id,
            description: g.description,
            created_at: g.created_at,
        })
        .collect())
}
