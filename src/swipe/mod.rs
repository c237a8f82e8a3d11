//! Swipe deck interaction: gestures, stack mutation and swipe recording.

pub mod candidate;
pub mod dispatcher;
pub mod gesture;
pub mod session;
pub mod stack;

pub use candidate::{Candidate, CandidateId, DeckKind, SwipeAction, SwipeDecision, SwipeDirection, SwipeRequest};
pub use dispatcher::{
    Actor, HttpSwipeRecorder, LocalSwipeRecorder, MatchNotification, SwipeDispatcher, SwipeError,
    SwipeOutcome, SwipeRecorder,
};
pub use session::{DeckRegistry, ReleaseOutcome, SwipeSession};
pub use stack::{DeckState, SwipeCounters, SwipeStack};
