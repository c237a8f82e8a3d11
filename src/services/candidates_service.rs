use sqlx::SqlitePool;
use thiserror::Error;

use crate::database::hikes_repo;
use crate::services::profile_traits_service;
use crate::services::recommender_service::{self, RecommendationError};
use crate::swipe::candidate::ActivityCard;
use crate::swipe::{Candidate, DeckKind};

#[derive(Debug, Error)]
pub enum CandidateFetchError {
    #[error(transparent)]
    Recommendations(#[from] RecommendationError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Initial deck contents for `user_id`, in ranking order.
pub async fn fetch_candidates(
    pool: &SqlitePool,
    recommender_url: &str,
    user_id: &str,
    kind: DeckKind,
) -> Result<Vec<Candidate>, CandidateFetchError> {
    match kind {
        DeckKind::Hikes => {
            let rows = hikes_repo::load_unswiped_activities(pool, user_id).await?;
            Ok(rows
                .into_iter()
                .map(|row| Candidate::Activity(ActivityCard::from(row)))
                .collect())
        }
        DeckKind::Profiles => {
            let rows =
                recommender_service::load_recommended_profiles(pool, recommender_url, user_id).await?;
            let cards = profile_traits_service::profile_cards(pool, rows).await?;
            Ok(cards.into_iter().map(Candidate::Profile).collect())
        }
    }
}
