//! Shared application state

use std::sync::{Arc, Mutex};

use crate::tally::{CastOutcome, Leaderboard, VoteTally};

/// Shared application state. The tally sits behind a single mutex so the
/// check-then-act admission sequence can never interleave with another
/// vote or a reset; every method here holds the lock for the whole
/// operation and does no I/O under it.
#[derive(Clone)]
pub struct AppState {
    tally: Arc<Mutex<VoteTally>>,
    pub metrics_auth_token: Option<String>,
}

impl AppState {
    pub fn new(metrics_auth_token: Option<String>) -> Self {
        AppState {
            tally: Arc::new(Mutex::new(VoteTally::new())),
            metrics_auth_token,
        }
    }

    pub fn cast_vote(&self, voter: &str, target: &str) -> CastOutcome {
        self.tally.lock().expect("tally mutex poisoned").cast_vote(voter, target)
    }

    pub fn ranked_results(&self) -> Leaderboard {
        self.tally.lock().expect("tally mutex poisoned").ranked_results()
    }

    pub fn reset(&self) {
        self.tally.lock().expect("tally mutex poisoned").reset()
    }
}
