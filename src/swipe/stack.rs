use std::collections::HashSet;

use thiserror::Error;

use super::candidate::{Candidate, CandidateId, SwipeDecision, SwipeDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckState {
    /// Initial fetch has not resolved (or failed).
    Loading,
    Active,
    /// Queue emptied; only a new session reopens the deck.
    Exhausted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwipeCounters {
    pub accepted: u32,
    pub rejected: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StackError {
    #[error("candidate stack already populated")]
    AlreadyPopulated,
}

/// Ordered candidate queue; the tail is the active card.
#[derive(Debug)]
pub struct SwipeStack {
    queue: Vec<Candidate>,
    state: DeckState,
    counters: SwipeCounters,
}

impl Default for SwipeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl SwipeStack {
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            state: DeckState::Loading,
            counters: SwipeCounters::default(),
        }
    }

    /// Hands the fetched ranking to the stack. Repeated ids keep their first position.
    pub fn populate(&mut self, candidates: Vec<Candidate>) -> Result<(), StackError> {
        if self.state != DeckState::Loading {
            return Err(StackError::AlreadyPopulated);
        }

        let mut seen = HashSet::new();
        self.queue = candidates
            .into_iter()
            .filter(|c| seen.insert(c.id()))
            .collect();
        self.state = if self.is_empty() {
            DeckState::Exhausted
        } else {
            DeckState::Active
        };
        Ok(())
    }

    pub fn state(&self) -> DeckState {
        self.state
    }

    pub fn counters(&self) -> SwipeCounters {
        self.counters
    }

    pub fn active(&self) -> Option<&Candidate> {
        match self.state {
            DeckState::Active => self.queue.last(),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn ids(&self) -> Vec<CandidateId> {
        self.queue.iter().map(Candidate::id).collect()
    }

    /// Removes the decided candidate and bumps its counter.
    ///
    /// Returns `false` (and leaves counters alone) when the id is not in the
    /// queue, so a repeated decision never double counts.
    pub fn apply(&mut self, decision: &SwipeDecision) -> bool {
        if self.state != DeckState::Active {
            return false;
        }
        let Some(index) = self
            .queue
            .iter()
            .position(|c| c.id() == decision.candidate_id)
        else {
            return false;
        };

        self.queue.remove(index);
        match decision.direction {
            SwipeDirection::Accept => self.counters.accepted += 1,
            SwipeDirection::Reject => self.counters.rejected += 1,
        }
        if self.is_empty() {
            self.state = DeckState::Exhausted;
        }
        true
    }
}
