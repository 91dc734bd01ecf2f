//! Persistence seam. The engine computes; implementations of
//! [`TournamentStore`] decide where results actually land.

mod debounce;
mod memory;

pub use debounce::{ScoreDebouncer, ScoreWrite, DEFAULT_DEBOUNCE_WINDOW};
pub use memory::InMemoryStore;

use crate::models::{BatchReport, PersistenceError, PlayerId, RoundState, StatWrite};

/// Synchronous persistence operations the orchestrator drives. Every call is
/// independent; there is no transaction spanning them.
pub trait TournamentStore {
    /// Append a finished, fully scored round to the history.
    fn append_round(&mut self, round: &RoundState) -> Result<(), PersistenceError>;

    /// Save the round that is going on court now.
    fn save_current_round(&mut self, round: &RoundState) -> Result<(), PersistenceError>;

    /// Persist one court's score entry for a round.
    fn save_score(
        &mut self,
        round: u32,
        court: u32,
        score_a: u32,
        score_b: u32,
    ) -> Result<(), PersistenceError>;

    /// Add league points to a player's running total.
    fn add_points(&mut self, player: PlayerId, points: u32) -> Result<(), PersistenceError>;

    /// Apply a signed change to a player's persisted rating.
    fn apply_rating(&mut self, player: PlayerId, delta: i32) -> Result<(), PersistenceError>;
}

/// Run a stat batch against a store, one write at a time, and report every
/// outcome. A failed write does not stop the batch and nothing is rolled
/// back; the caller decides what an incomplete report means.
pub fn apply_stat_batch<S: TournamentStore + ?Sized>(
    store: &mut S,
    writes: &[StatWrite],
) -> BatchReport {
    let results = writes
        .iter()
        .map(|w| {
            let outcome = match *w {
                StatWrite::Points { player, points } => store.add_points(player, points),
                StatWrite::Rating { player, delta } => store.apply_rating(player, delta),
            };
            (*w, outcome)
        })
        .collect();
    BatchReport { results }
}
