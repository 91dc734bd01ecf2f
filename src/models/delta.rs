//! Stat writes produced by closing a round, and the report of applying them.

use crate::models::error::PersistenceError;
use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// One independent write against a player's persisted stats.
///
/// Both variants are additive, so a retried batch re-applies every operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatWrite {
    /// Add league points to a player's running total.
    Points { player: PlayerId, points: u32 },
    /// Apply a signed rating change.
    Rating { player: PlayerId, delta: i32 },
}

impl StatWrite {
    pub fn player(&self) -> PlayerId {
        match *self {
            StatWrite::Points { player, .. } => player,
            StatWrite::Rating { player, .. } => player,
        }
    }
}

/// Per-operation outcome of applying a stat batch in order. The batch is not
/// transactional: earlier successes stay written when a later write fails.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchReport {
    pub results: Vec<(StatWrite, Result<(), PersistenceError>)>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn failed(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_err()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.failed() == 0
    }

    /// The failed writes, for logging or a retry decision.
    pub fn failures(&self) -> impl Iterator<Item = (&StatWrite, &PersistenceError)> {
        self.results
            .iter()
            .filter_map(|(w, r)| r.as_ref().err().map(|e| (w, e)))
    }
}
