use serde::Serialize;
use std::fmt;

use crate::models::{ActivityRow, ProfileRow};

pub const FALLBACK_HIKE_IMAGE: &str = "/assets/images/fallback-hike.jpg";
pub const DEFAULT_AVATAR: &str = "/assets/images/default-avatar.jpg";
const ACTIVITY_IMAGE_BASE: &str = "https://img.oastatic.com/img2";

/// Activities are keyed by integer ids, profiles by the identity provider's string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CandidateId {
    Activity(i64),
    Profile(String),
}

impl CandidateId {
    /// Parses a form/path value for the given deck kind.
    pub fn parse(kind: DeckKind, raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match kind {
            DeckKind::Hikes => raw.parse().ok().map(CandidateId::Activity),
            DeckKind::Profiles => Some(CandidateId::Profile(raw.to_string())),
        }
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateId::Activity(id) => write!(f, "{}", id),
            CandidateId::Profile(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeckKind {
    Hikes,
    Profiles,
}

impl DeckKind {
    pub fn slug(self) -> &'static str {
        match self {
            DeckKind::Hikes => "search",
            DeckKind::Profiles => "match",
        }
    }

    pub fn exhausted_label(self) -> &'static str {
        match self {
            DeckKind::Hikes => "No more activities available!",
            DeckKind::Profiles => "No more profiles available!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SwipeDirection {
    Accept,
    Reject,
}

impl SwipeDirection {
    /// Action name used on the wire.
    pub fn action(self) -> SwipeAction {
        match self {
            SwipeDirection::Accept => SwipeAction::Like,
            SwipeDirection::Reject => SwipeAction::Dislike,
        }
    }

    /// Horizontal offset the card leaves the screen with.
    pub fn exit_offset(self) -> f64 {
        match self {
            SwipeDirection::Accept => 200.0,
            SwipeDirection::Reject => -200.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeAction {
    Like,
    Dislike,
}

impl SwipeAction {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "like" => Some(SwipeAction::Like),
            "dislike" => Some(SwipeAction::Dislike),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SwipeAction::Like => "like",
            SwipeAction::Dislike => "dislike",
        }
    }

    pub fn direction(self) -> SwipeDirection {
        match self {
            SwipeAction::Like => SwipeDirection::Accept,
            SwipeAction::Dislike => SwipeDirection::Reject,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwipeDecision {
    pub candidate_id: CandidateId,
    pub direction: SwipeDirection,
}

/// Body of the outbound record request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SwipeRequest {
    Activity {
        #[serde(rename = "activityId")]
        activity_id: i64,
        action: SwipeAction,
    },
    Profile {
        #[serde(rename = "receiverId")]
        receiver_id: String,
        action: SwipeAction,
    },
}

impl SwipeRequest {
    pub fn path(&self) -> &'static str {
        match self {
            SwipeRequest::Activity { .. } => "/apinextjs/activities/swipes",
            SwipeRequest::Profile { .. } => "/apinextjs/users/swipes",
        }
    }

    /// Only profile swipes can come back as a mutual match.
    pub fn can_match(&self) -> bool {
        matches!(self, SwipeRequest::Profile { .. })
    }
}

#[derive(Debug, Clone)]
pub struct ActivityCard {
    pub id: i64,
    pub title: String,
    pub teaser_text: Option<String>,
    pub primary_region: String,
    pub length_m: Option<i64>,
    pub difficulty: String,
    pub image_url: String,
    pub duration_hours: Option<i64>,
    pub ascent_m: Option<i64>,
    pub descent_m: Option<i64>,
    pub max_altitude_m: Option<i64>,
    pub public_transport_friendly: bool,
}

impl From<ActivityRow> for ActivityCard {
    fn from(row: ActivityRow) -> Self {
        let image_url = row
            .primary_image_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|id| format!("{}/{}/default/variant.jpg", ACTIVITY_IMAGE_BASE, id))
            .unwrap_or_else(|| FALLBACK_HIKE_IMAGE.to_string());

        ActivityCard {
            id: row.id,
            title: non_empty(row.title).unwrap_or_else(|| "Untitled hike".to_string()),
            teaser_text: non_empty(row.teaser_text),
            primary_region: non_empty(row.primary_region).unwrap_or_else(|| "Unknown region".to_string()),
            length_m: row.length,
            difficulty: non_empty(row.difficulty).unwrap_or_else(|| "unknown".to_string()),
            image_url,
            duration_hours: row.duration_min.map(|m| (m as f64 / 60.0).round() as i64),
            ascent_m: row.ascent,
            descent_m: row.descent,
            max_altitude_m: row.max_altitude,
            public_transport_friendly: row.public_transport_friendly.unwrap_or(0) == 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProfileCard {
    pub id: String,
    pub display_name: String,
    pub age: Option<i64>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub image_url: String,
    pub spotify_connected: bool,
    pub interests: Vec<String>,
    pub skills: Vec<SkillLevel>,
}

/// One hiking preference, e.g. "Endurance: Intermediate".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillLevel {
    pub skill: String,
    pub level: String,
}

impl ProfileCard {
    pub fn with_traits(mut self, interests: Vec<String>, skills: Vec<SkillLevel>) -> Self {
        self.interests = interests;
        self.skills = skills;
        self
    }
}

impl From<ProfileRow> for ProfileCard {
    fn from(row: ProfileRow) -> Self {
        ProfileCard {
            id: row.id,
            display_name: non_empty(row.display_name).unwrap_or_else(|| "No name provided".to_string()),
            age: row.age,
            location: non_empty(row.location),
            bio: non_empty(row.bio),
            image_url: non_empty(row.image_url).unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
            spotify_connected: row.spotify_connected.unwrap_or(0) == 1,
            interests: Vec::new(),
            skills: Vec::new(),
        }
    }
}

/// Something the user can swipe on.
#[derive(Debug, Clone)]
pub enum Candidate {
    Activity(ActivityCard),
    Profile(ProfileCard),
}

impl Candidate {
    pub fn id(&self) -> CandidateId {
        match self {
            Candidate::Activity(a) => CandidateId::Activity(a.id),
            Candidate::Profile(p) => CandidateId::Profile(p.id.clone()),
        }
    }

    pub fn request_payload_for(&self, direction: SwipeDirection) -> SwipeRequest {
        match self {
            Candidate::Activity(a) => SwipeRequest::Activity {
                activity_id: a.id,
                action: direction.action(),
            },
            Candidate::Profile(p) => SwipeRequest::Profile {
                receiver_id: p.id.clone(),
                action: direction.action(),
            },
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Candidate::Activity(a) => &a.title,
            Candidate::Profile(p) => &p.display_name,
        }
    }

    pub fn image_url(&self) -> &str {
        match self {
            Candidate::Activity(a) => &a.image_url,
            Candidate::Profile(p) => &p.image_url,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
