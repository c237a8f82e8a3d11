use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;
use reqwest::header::{HeaderValue, CONTENT_TYPE, COOKIE};
use serde::Deserialize;
use serde_json::Value;
use sqlx::SqlitePool;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::candidate::{CandidateId, SwipeDecision, SwipeRequest};
use crate::services::swipe_service;

pub const DEFAULT_CHATS_PATH: &str = "/dashboard/chats";

#[derive(Debug, Error)]
pub enum SwipeError {
    #[error("swipe request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("swipe response from {url} could not be decoded: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("swipe api returned {status}")]
    Upstream {
        status: StatusCode,
        body: Option<Value>,
    },
    #[error("invalid swipe: {0}")]
    Invalid(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwipeOutcome {
    pub recorded: bool,
    pub mutual_match: bool,
}

/// Caller identity the record request is made on behalf of.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: String,
    pub access_token: Option<String>,
}

/// Persists one swipe somewhere outside the session.
#[async_trait]
pub trait SwipeRecorder: Send + Sync {
    async fn record(&self, actor: &Actor, request: &SwipeRequest) -> Result<SwipeOutcome, SwipeError>;
}

#[derive(Debug, Deserialize)]
struct ProfileSwipeResponse {
    #[serde(default, rename = "match")]
    is_match: bool,
}

/// Records swipes through the JSON swipe endpoints.
pub struct HttpSwipeRecorder {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSwipeRecorder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SwipeRecorder for HttpSwipeRecorder {
    async fn record(&self, actor: &Actor, request: &SwipeRequest) -> Result<SwipeOutcome, SwipeError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), request.path());

        let mut builder = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(request);
        if let Some(token) = actor.access_token.as_deref() {
            builder = builder.header(COOKIE, format!("access_token={}", token));
        }

        let resp = builder.send().await.map_err(|source| SwipeError::Transport {
            url: url.clone(),
            source,
        })?;

        let status = StatusCode::from_u16(resp.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
        if !status.is_success() {
            let body = resp.json::<Value>().await.ok();
            return Err(SwipeError::Upstream { status, body });
        }

        if !request.can_match() {
            return Ok(SwipeOutcome {
                recorded: true,
                mutual_match: false,
            });
        }

        let body: ProfileSwipeResponse = resp
            .json()
            .await
            .map_err(|source| SwipeError::Decode { url, source })?;
        Ok(SwipeOutcome {
            recorded: true,
            mutual_match: body.is_match,
        })
    }
}

/// Records swipes straight into the local database.
pub struct LocalSwipeRecorder {
    pool: SqlitePool,
}

impl LocalSwipeRecorder {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SwipeRecorder for LocalSwipeRecorder {
    async fn record(&self, actor: &Actor, request: &SwipeRequest) -> Result<SwipeOutcome, SwipeError> {
        match request {
            SwipeRequest::Activity { activity_id, action } => {
                swipe_service::record_activity_swipe(&self.pool, &actor.user_id, *activity_id, *action)
                    .await
            }
            SwipeRequest::Profile { receiver_id, action } => {
                swipe_service::record_profile_swipe(&self.pool, &actor.user_id, receiver_id, *action)
                    .await
            }
        }
    }
}

/// Cleared when the owning session is torn down.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_live(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn end(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchNotification {
    pub candidate_id: CandidateId,
    pub title: String,
    pub description: String,
    pub action_label: String,
    pub action_href: String,
}

impl MatchNotification {
    fn new(candidate_id: CandidateId, chats_path: &str) -> Self {
        Self {
            candidate_id,
            title: "It's a Match! 🎉".to_string(),
            description: "You can now start chatting with each other!".to_string(),
            action_label: "Start Chat".to_string(),
            action_href: chats_path.to_string(),
        }
    }
}

/// Fires record requests without holding up the card transition.
#[derive(Clone)]
pub struct SwipeDispatcher {
    recorder: Arc<dyn SwipeRecorder>,
    notifications: mpsc::UnboundedSender<MatchNotification>,
    liveness: Liveness,
    chats_path: String,
}

impl SwipeDispatcher {
    pub fn new(
        recorder: Arc<dyn SwipeRecorder>,
        notifications: mpsc::UnboundedSender<MatchNotification>,
        liveness: Liveness,
        chats_path: impl Into<String>,
    ) -> Self {
        Self {
            recorder,
            notifications,
            liveness,
            chats_path: chats_path.into(),
        }
    }

    /// Spawns the record request for one decision.
    ///
    /// The returned handle resolves to the outcome, or `None` when the
    /// request failed. Failures are logged and never retried.
    pub fn dispatch(
        &self,
        actor: Actor,
        decision: SwipeDecision,
        request: SwipeRequest,
    ) -> JoinHandle<Option<SwipeOutcome>> {
        let recorder = Arc::clone(&self.recorder);
        let notifications = self.notifications.clone();
        let liveness = self.liveness.clone();
        let chats_path = self.chats_path.clone();

        tokio::spawn(async move {
            let outcome = match recorder.record(&actor, &request).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(
                        user_id = %actor.user_id,
                        candidate_id = %decision.candidate_id,
                        action = request_action(&request),
                        error = %e,
                        "record_swipe_failed"
                    );
                    return None;
                }
            };

            if outcome.mutual_match && request.can_match() {
                if !liveness.is_live() {
                    debug!(candidate_id = %decision.candidate_id, "match_signal_after_teardown_dropped");
                    return Some(outcome);
                }
                info!(user_id = %actor.user_id, candidate_id = %decision.candidate_id, "mutual_match");
                let note = MatchNotification::new(decision.candidate_id.clone(), &chats_path);
                if notifications.send(note).is_err() {
                    debug!(candidate_id = %decision.candidate_id, "match_notification_receiver_gone");
                }
            }
            Some(outcome)
        })
    }
}

fn request_action(request: &SwipeRequest) -> &'static str {
    match request {
        SwipeRequest::Activity { action, .. } | SwipeRequest::Profile { action, .. } => action.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swipe::candidate::{SwipeAction, SwipeDirection};
    use std::sync::Mutex;
    use tokio::sync::Notify;

    struct FakeRecorder {
        outcome: Result<SwipeOutcome, StatusCode>,
        calls: Mutex<Vec<SwipeRequest>>,
        gate: Option<Arc<Notify>>,
    }

    impl FakeRecorder {
        fn new(outcome: Result<SwipeOutcome, StatusCode>) -> Self {
            Self {
                outcome,
                calls: Mutex::new(Vec::new()),
                gate: None,
            }
        }
    }

    #[async_trait]
    impl SwipeRecorder for FakeRecorder {
        async fn record(&self, _actor: &Actor, request: &SwipeRequest) -> Result<SwipeOutcome, SwipeError> {
            self.calls.lock().unwrap().push(request.clone());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.outcome.map_err(|status| SwipeError::Upstream { status, body: None })
        }
    }

    fn actor() -> Actor {
        Actor {
            user_id: "me".to_string(),
            access_token: None,
        }
    }

    fn profile_decision(id: &str) -> (SwipeDecision, SwipeRequest) {
        (
            SwipeDecision {
                candidate_id: CandidateId::Profile(id.to_string()),
                direction: SwipeDirection::Accept,
            },
            SwipeRequest::Profile {
                receiver_id: id.to_string(),
                action: SwipeAction::Like,
            },
        )
    }

    const MATCHED: SwipeOutcome = SwipeOutcome {
        recorded: true,
        mutual_match: true,
    };

    #[tokio::test]
    async fn mutual_match_notifies_live_session() {
        let recorder = Arc::new(FakeRecorder::new(Ok(MATCHED)));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = SwipeDispatcher::new(recorder.clone(), tx, Liveness::new(), DEFAULT_CHATS_PATH);

        let (decision, request) = profile_decision("u-9");
        let outcome = dispatcher.dispatch(actor(), decision, request).await.unwrap();
        assert_eq!(outcome, Some(MATCHED));

        let note = rx.try_recv().unwrap();
        assert_eq!(note.candidate_id, CandidateId::Profile("u-9".to_string()));
        assert_eq!(note.action_href, "/dashboard/chats");
        assert_eq!(recorder.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn late_match_after_teardown_is_dropped() {
        let gate = Arc::new(Notify::new());
        let mut fake = FakeRecorder::new(Ok(MATCHED));
        fake.gate = Some(gate.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let liveness = Liveness::new();
        let dispatcher = SwipeDispatcher::new(Arc::new(fake), tx, liveness.clone(), DEFAULT_CHATS_PATH);

        let (decision, request) = profile_decision("u-1");
        let handle = dispatcher.dispatch(actor(), decision, request);
        liveness.end();
        gate.notify_one();

        assert_eq!(handle.await.unwrap(), Some(MATCHED));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn failures_are_swallowed() {
        let recorder = Arc::new(FakeRecorder::new(Err(StatusCode::INTERNAL_SERVER_ERROR)));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = SwipeDispatcher::new(recorder, tx, Liveness::new(), DEFAULT_CHATS_PATH);

        let (decision, request) = profile_decision("u-2");
        assert_eq!(dispatcher.dispatch(actor(), decision, request).await.unwrap(), None);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn activity_swipes_never_notify() {
        let recorder = Arc::new(FakeRecorder::new(Ok(MATCHED)));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = SwipeDispatcher::new(recorder, tx, Liveness::new(), DEFAULT_CHATS_PATH);

        let decision = SwipeDecision {
            candidate_id: CandidateId::Activity(3),
            direction: SwipeDirection::Accept,
        };
        let request = SwipeRequest::Activity {
            activity_id: 3,
            action: SwipeAction::Like,
        };
        dispatcher.dispatch(actor(), decision, request).await.unwrap();
        assert!(rx.try_recv().is_err());
    }
}
