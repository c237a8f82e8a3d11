use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};

use crate::database::{hikes_repo, profiles_repo};
use crate::services::candidates_service;
use crate::services::profile_traits_service;
use crate::services::profile_service::{self, ProfileSummaryView};
use crate::state::AppState;
use crate::swipe::candidate::{ActivityCard, ProfileCard};
use crate::swipe::gesture::{Point, DECISION_THRESHOLD_PX};
use crate::swipe::{
    Actor, Candidate, CandidateId, DeckKind, DeckState, MatchNotification, ReleaseOutcome,
    SwipeDirection, SwipeSession,
};

pub struct CardView {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub subtitle: String,
    pub teaser: Option<String>,
    pub tags: Vec<String>,
    pub detail_href: String,
}

pub struct ToastView {
    pub title: String,
    pub description: String,
    pub action_label: String,
    pub action_href: String,
}

pub struct DeckView {
    pub slug: &'static str,
    pub state: &'static str, // loading|active|exhausted
    pub card: Option<CardView>,
    pub accepted: u32,
    pub rejected: u32,
    pub remaining: usize,
    pub exhausted_label: &'static str,
    /// Gesture constants handed to the pointer script.
    pub decision_threshold: f64,
    pub exit_accept: f64,
    pub exit_reject: f64,
    pub toasts: Vec<ToastView>,
    pub current_user: Option<ProfileSummaryView>,
}

pub struct CardDetailView {
    pub title: String,
    pub image_url: String,
    pub description: Option<String>,
    pub facts: Vec<String>,
    pub interests: Vec<String>,
    /// "Skill: Level" lines.
    pub preferences: Vec<String>,
    pub back_href: String,
}

/// Where the browser goes after a release or action.
pub enum DeckNext {
    Deck,
    Detail(String),
}

/// Returns the user's live session for `kind`, starting one on first visit.
pub async fn open_deck(state: &AppState, user_id: &str, kind: DeckKind) -> Arc<Mutex<SwipeSession>> {
    let (handle, guard) = state
        .decks
        .get_or_insert_with(user_id, kind, || new_session(state, kind))
        .await;
    if let Some(guard) = guard {
        load_candidates(state, user_id, kind, guard).await;
    }
    handle
}

/// Tears down the current session (if any) and fetches a fresh deck.
pub async fn start_deck(state: &AppState, user_id: &str, kind: DeckKind) -> Arc<Mutex<SwipeSession>> {
    let (handle, guard) = state.decks.replace(user_id, new_session(state, kind)).await;
    load_candidates(state, user_id, kind, guard).await;
    handle
}

fn new_session(state: &AppState, kind: DeckKind) -> SwipeSession {
    SwipeSession::new(kind, Arc::clone(&state.recorder), &state.config.chats_path)
}

async fn load_candidates(
    state: &AppState,
    user_id: &str,
    kind: DeckKind,
    mut session: OwnedMutexGuard<SwipeSession>,
) {
    match candidates_service::fetch_candidates(&state.pool, &state.config.recommender_url, user_id, kind)
        .await
    {
        Ok(candidates) => {
            info!(user_id, deck = kind.slug(), count = candidates.len(), "deck_loaded");
            if let Err(e) = session.populate(candidates) {
                warn!(user_id, deck = kind.slug(), error = %e, "deck_populate_rejected");
            }
        }
        Err(e) => {
            // No retry: the deck stays in its loading state until a reload.
            warn!(user_id, deck = kind.slug(), error = %e, "deck_fetch_failed");
        }
    }
}

pub async fn build_deck_view(state: &AppState, user_id: &str, kind: DeckKind) -> DeckView {
    let session = open_deck(state, user_id, kind).await;
    let mut session = session.lock().await;

    let toasts = session
        .take_notifications()
        .into_iter()
        .map(toast_view)
        .collect();

    let current_user = if session.state() == DeckState::Loading {
        profile_service::load_profile_summary_view(&state.pool, user_id)
            .await
            .unwrap_or_else(|e| {
                warn!(user_id, error = %e, "current_user_summary_failed");
                None
            })
    } else {
        None
    };

    let counters = session.counters();
    DeckView {
        slug: kind.slug(),
        state: match session.state() {
            DeckState::Loading => "loading",
            DeckState::Active => "active",
            DeckState::Exhausted => "exhausted",
        },
        card: session.active().map(|c| card_view(kind, c)),
        accepted: counters.accepted,
        rejected: counters.rejected,
        remaining: session.stack().len(),
        exhausted_label: kind.exhausted_label(),
        decision_threshold: DECISION_THRESHOLD_PX,
        exit_accept: SwipeDirection::Accept.exit_offset(),
        exit_reject: SwipeDirection::Reject.exit_offset(),
        toasts,
        current_user,
    }
}

pub async fn release(
    state: &AppState,
    actor: Actor,
    kind: DeckKind,
    candidate_id: &CandidateId,
    start: Point,
    end: Point,
) -> DeckNext {
    let session = open_deck(state, &actor.user_id, kind).await;
    let mut session = session.lock().await;

    match session.release(actor, candidate_id, start, end) {
        ReleaseOutcome::Tap(id) => DeckNext::Detail(detail_href(kind, &id)),
        ReleaseOutcome::Decided { decision, .. } => {
            info!(
                deck = kind.slug(),
                candidate_id = %decision.candidate_id,
                direction = ?decision.direction,
                "swipe_decided"
            );
            DeckNext::Deck
        }
        ReleaseOutcome::Idle => {
            debug!(deck = kind.slug(), candidate_id = %candidate_id, "release_ignored_not_active");
            DeckNext::Deck
        }
        ReleaseOutcome::SnapBack => DeckNext::Deck,
    }
}

/// Explicit accept/reject button. Stale or repeated submits are ignored.
pub async fn act(
    state: &AppState,
    actor: Actor,
    kind: DeckKind,
    candidate_id: &CandidateId,
    direction: SwipeDirection,
) -> bool {
    let session = open_deck(state, &actor.user_id, kind).await;
    let mut session = session.lock().await;
    session.act(actor, candidate_id, direction).is_some()
}

pub fn detail_href(kind: DeckKind, id: &CandidateId) -> String {
    format!("/dashboard/{}/card/{}", kind.slug(), id)
}

fn card_view(kind: DeckKind, candidate: &Candidate) -> CardView {
    let id = candidate.id();
    let (subtitle, teaser, tags) = match candidate {
        Candidate::Activity(a) => {
            let length = a
                .length_m
                .map(|m| format!("{}m", m))
                .unwrap_or_else(|| "?".to_string());
            (
                format!("{} • {} • {}", a.primary_region, length, a.difficulty),
                a.teaser_text.clone(),
                Vec::new(),
            )
        }
        Candidate::Profile(p) => {
            let mut parts = Vec::new();
            if let Some(age) = p.age {
                parts.push(format!("{} years", age));
            }
            if let Some(location) = &p.location {
                parts.push(location.clone());
            }
            (parts.join(" • "), p.bio.clone(), p.interests.clone())
        }
    };

    CardView {
        detail_href: detail_href(kind, &id),
        id: id.to_string(),
        title: candidate.title().to_string(),
        image_url: candidate.image_url().to_string(),
        subtitle,
        teaser,
        tags,
    }
}

fn skill_lines(profile: &ProfileCard) -> Vec<String> {
    profile
        .skills
        .iter()
        .map(|s| format!("{}: {}", s.skill, s.level))
        .collect()
}

fn toast_view(note: MatchNotification) -> ToastView {
    ToastView {
        title: note.title,
        description: note.description,
        action_label: note.action_label,
        action_href: note.action_href,
    }
}

/// Detail view opened by tapping a card.
pub async fn load_card_detail(
    pool: &SqlitePool,
    kind: DeckKind,
    id: &CandidateId,
) -> sqlx::Result<Option<CardDetailView>> {
    let back_href = format!("/dashboard/{}", kind.slug());
    match id {
        CandidateId::Activity(activity_id) => {
            let Some(row) = hikes_repo::load_activity(pool, *activity_id).await? else {
                return Ok(None);
            };
            let a = ActivityCard::from(row);
            let mut facts = vec![
                format!("Difficulty: {}", a.difficulty),
                format!("Region: {}", a.primary_region),
            ];
            if let Some(ascent) = a.ascent_m {
                facts.push(format!("↑ {}m", ascent));
            }
            if let Some(descent) = a.descent_m {
                facts.push(format!("↓ {}m", descent));
            }
            if let Some(hours) = a.duration_hours {
                facts.push(format!("Duration: {} hours", hours));
            }
            if let Some(altitude) = a.max_altitude_m {
                facts.push(format!("Max Altitude: {}m", altitude));
            }
            if a.public_transport_friendly {
                facts.push("Public transport friendly".to_string());
            }
            Ok(Some(CardDetailView {
                title: a.title,
                image_url: a.image_url,
                description: a.teaser_text,
                facts,
                interests: Vec::new(),
                preferences: Vec::new(),
                back_href,
            }))
        }
        CandidateId::Profile(profile_id) => {
            let Some(row) = profiles_repo::load_profile(pool, profile_id).await? else {
                return Ok(None);
            };
            let Some(p) = profile_traits_service::profile_cards(pool, vec![row]).await?.pop() else {
                return Ok(None);
            };
            let mut facts = Vec::new();
            if let Some(age) = p.age {
                facts.push(format!("{} years", age));
            }
            if let Some(location) = &p.location {
                facts.push(location.clone());
            }
            if p.spotify_connected {
                facts.push("Spotify connected".to_string());
            }
            Ok(Some(CardDetailView {
                preferences: skill_lines(&p),
                interests: p.interests,
                title: p.display_name,
                image_url: p.image_url,
                description: p.bio,
                facts,
                back_href,
            }))
        }
    }
}
