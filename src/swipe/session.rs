use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex, OwnedMutexGuard, RwLock};
use tokio::task::JoinHandle;

use super::candidate::{Candidate, CandidateId, DeckKind, SwipeDecision, SwipeDirection};
use super::dispatcher::{Actor, Liveness, MatchNotification, SwipeDispatcher, SwipeOutcome, SwipeRecorder};
use super::gesture::{DragTracker, GestureOutcome, Point};
use super::stack::{DeckState, StackError, SwipeCounters, SwipeStack};

pub type DispatchHandle = JoinHandle<Option<SwipeOutcome>>;

#[derive(Debug)]
pub enum ReleaseOutcome {
    /// No active card to act on.
    Idle,
    Tap(CandidateId),
    SnapBack,
    Decided {
        decision: SwipeDecision,
        dispatch: DispatchHandle,
    },
}

/// One browsing session over a single deck.
pub struct SwipeSession {
    kind: DeckKind,
    stack: SwipeStack,
    dispatcher: SwipeDispatcher,
    notifications: mpsc::UnboundedReceiver<MatchNotification>,
    liveness: Liveness,
}

impl SwipeSession {
    pub fn new(kind: DeckKind, recorder: Arc<dyn SwipeRecorder>, chats_path: &str) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let liveness = Liveness::new();
        Self {
            kind,
            stack: SwipeStack::new(),
            dispatcher: SwipeDispatcher::new(recorder, tx, liveness.clone(), chats_path),
            notifications: rx,
            liveness,
        }
    }

    pub fn kind(&self) -> DeckKind {
        self.kind
    }

    pub fn state(&self) -> DeckState {
        self.stack.state()
    }

    pub fn counters(&self) -> SwipeCounters {
        self.stack.counters()
    }

    pub fn active(&self) -> Option<&Candidate> {
        self.stack.active()
    }

    pub fn stack(&self) -> &SwipeStack {
        &self.stack
    }

    pub fn is_live(&self) -> bool {
        self.liveness.is_live()
    }

    pub fn populate(&mut self, candidates: Vec<Candidate>) -> Result<(), StackError> {
        self.stack.populate(candidates)
    }

    /// Runs a finished pointer gesture against the active card.
    ///
    /// `candidate_id` is the card the gesture started on; a release for any
    /// other card (stale or resubmitted form) is `Idle`.
    pub fn release(
        &mut self,
        actor: Actor,
        candidate_id: &CandidateId,
        start: Point,
        end: Point,
    ) -> ReleaseOutcome {
        let Some(active_id) = self.stack.active().map(Candidate::id) else {
            return ReleaseOutcome::Idle;
        };
        if &active_id != candidate_id {
            return ReleaseOutcome::Idle;
        }
        match DragTracker::begin(start).release(end) {
            GestureOutcome::Tap => ReleaseOutcome::Tap(active_id),
            GestureOutcome::SnapBack => ReleaseOutcome::SnapBack,
            GestureOutcome::Decided(direction) => match self.decide_active(actor, direction) {
                Some((decision, dispatch)) => ReleaseOutcome::Decided { decision, dispatch },
                None => ReleaseOutcome::Idle,
            },
        }
    }

    /// Explicit accept/reject control. Ignored unless `candidate_id` is the active card.
    pub fn act(
        &mut self,
        actor: Actor,
        candidate_id: &CandidateId,
        direction: SwipeDirection,
    ) -> Option<(SwipeDecision, DispatchHandle)> {
        let is_active = self
            .stack
            .active()
            .is_some_and(|c| &c.id() == candidate_id);
        if !is_active {
            return None;
        }
        self.decide_active(actor, direction)
    }

    fn decide_active(
        &mut self,
        actor: Actor,
        direction: SwipeDirection,
    ) -> Option<(SwipeDecision, DispatchHandle)> {
        let active = self.stack.active()?;
        let decision = SwipeDecision {
            candidate_id: active.id(),
            direction,
        };
        let request = active.request_payload_for(direction);

        if !self.stack.apply(&decision) {
            return None;
        }
        let dispatch = self.dispatcher.dispatch(actor, decision.clone(), request);
        Some((decision, dispatch))
    }

    /// Drains match toasts that arrived since the last render.
    pub fn take_notifications(&mut self) -> Vec<MatchNotification> {
        let mut out = Vec::new();
        while let Ok(note) = self.notifications.try_recv() {
            out.push(note);
        }
        out
    }

    pub fn teardown(&mut self) {
        self.liveness.end();
        self.notifications.close();
    }
}

impl Drop for SwipeSession {
    fn drop(&mut self) {
        self.liveness.end();
    }
}

type SessionKey = (String, DeckKind);

/// Live sessions, one per user and deck.
#[derive(Clone, Default)]
pub struct DeckRegistry {
    sessions: Arc<RwLock<HashMap<SessionKey, Arc<Mutex<SwipeSession>>>>>,
}

impl DeckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, user_id: &str, kind: DeckKind) -> Option<Arc<Mutex<SwipeSession>>> {
        let sessions = self.sessions.read().await;
        sessions.get(&(user_id.to_string(), kind)).cloned()
    }

    /// Returns the user's session, creating it with `make` when there is none.
    ///
    /// The check and the insert happen under one write lock. A freshly created
    /// session comes back locked (`Some(guard)`) so only its creator populates it;
    /// everyone else waits on the session mutex.
    pub async fn get_or_insert_with(
        &self,
        user_id: &str,
        kind: DeckKind,
        make: impl FnOnce() -> SwipeSession,
    ) -> (Arc<Mutex<SwipeSession>>, Option<OwnedMutexGuard<SwipeSession>>) {
        let mut sessions = self.sessions.write().await;
        let key = (user_id.to_string(), kind);
        if let Some(existing) = sessions.get(&key) {
            return (Arc::clone(existing), None);
        }

        let handle = Arc::new(Mutex::new(make()));
        let guard = Arc::clone(&handle).lock_owned().await;
        sessions.insert(key, Arc::clone(&handle));
        (handle, Some(guard))
    }

    /// Registers `session` for the user, tearing down any previous one.
    ///
    /// The session is returned locked so the caller can populate it before
    /// concurrent requests observe it.
    pub async fn replace(
        &self,
        user_id: &str,
        session: SwipeSession,
    ) -> (Arc<Mutex<SwipeSession>>, OwnedMutexGuard<SwipeSession>) {
        let kind = session.kind();
        let handle = Arc::new(Mutex::new(session));
        let guard = Arc::clone(&handle).lock_owned().await;

        let previous = {
            let mut sessions = self.sessions.write().await;
            sessions.insert((user_id.to_string(), kind), Arc::clone(&handle))
        };
        if let Some(previous) = previous {
            previous.lock().await.teardown();
        }
        (handle, guard)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
