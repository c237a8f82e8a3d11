use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::database::{hikes_repo, profiles_repo, swipes_repo};
use crate::swipe::{SwipeAction, SwipeError, SwipeOutcome};

pub async fn record_activity_swipe(
    pool: &SqlitePool,
    profile_id: &str,
    activity_id: i64,
    action: SwipeAction,
) -> Result<SwipeOutcome, SwipeError> {
    if !hikes_repo::activity_exists(pool, activity_id).await? {
        return Err(SwipeError::Invalid(format!("unknown activity {}", activity_id)));
    }

    let id = Uuid::new_v4().to_string();
    let target = activity_id.to_string();
    swipes_repo::upsert_activity_swipe(
        pool,
        swipes_repo::NewSwipe {
            id: &id,
            actor_id: profile_id,
            target_id: &target,
            action: action.as_str(),
        },
    )
    .await?;

    Ok(SwipeOutcome {
        recorded: true,
        mutual_match: false,
    })
}

/// Stores a profile swipe and reports whether it completed a mutual like.
pub async fn record_profile_swipe(
    pool: &SqlitePool,
    sender_id: &str,
    receiver_id: &str,
    action: SwipeAction,
) -> Result<SwipeOutcome, SwipeError> {
    let receiver_id = receiver_id.trim();
    if receiver_id.is_empty() {
        return Err(SwipeError::Invalid("missing receiver".to_string()));
    }
    if receiver_id == sender_id {
        return Err(SwipeError::Invalid("cannot swipe on yourself".to_string()));
    }
    if profiles_repo::load_profile(pool, receiver_id).await?.is_none() {
        return Err(SwipeError::Invalid(format!("unknown profile {}", receiver_id)));
    }

    let id = Uuid::new_v4().to_string();
    swipes_repo::upsert_user_swipe(
        pool,
        swipes_repo::NewSwipe {
            id: &id,
            actor_id: sender_id,
            target_id: receiver_id,
            action: action.as_str(),
        },
    )
    .await?;

    if action != SwipeAction::Like || !swipes_repo::has_liked(pool, receiver_id, sender_id).await? {
        return Ok(SwipeOutcome {
            recorded: true,
            mutual_match: false,
        });
    }

    let match_id = Uuid::new_v4().to_string();
    let created = swipes_repo::insert_match(pool, &match_id, sender_id, receiver_id).await?;
    if created {
        info!(sender_id, receiver_id, match_id = %match_id, "match_created");
    }
    Ok(SwipeOutcome {
        recorded: true,
        mutual_match: true,
    })
}
