//! In-process store for tests and the demo driver.

use crate::models::{PersistenceError, PlayerId, RoundState};
use crate::store::TournamentStore;
use std::collections::HashMap;

/// Keeps everything in maps and vectors; never fails. Fields are public so
/// tests and the demo can look straight at what was persisted.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    pub history: Vec<RoundState>,
    pub current_round: Option<RoundState>,
    /// Latest score per (round, court).
    pub scores: HashMap<(u32, u32), (u32, u32)>,
    /// Running point totals.
    pub points: HashMap<PlayerId, u32>,
    /// Accumulated rating changes.
    pub ratings: HashMap<PlayerId, i32>,
}

impl TournamentStore for InMemoryStore {
    fn append_round(&mut self, round: &RoundState) -> Result<(), PersistenceError> {
        self.history.push(round.clone());
        Ok(())
    }

    fn save_current_round(&mut self, round: &RoundState) -> Result<(), PersistenceError> {
        self.current_round = Some(round.clone());
        Ok(())
    }

    fn save_score(
        &mut self,
        round: u32,
        court: u32,
        score_a: u32,
        score_b: u32,
    ) -> Result<(), PersistenceError> {
        self.scores.insert((round, court), (score_a, score_b));
        Ok(())
    }

    fn add_points(&mut self, player: PlayerId, points: u32) -> Result<(), PersistenceError> {
        *self.points.entry(player).or_insert(0) += points;
        Ok(())
    }

    fn apply_rating(&mut self, player: PlayerId, delta: i32) -> Result<(), PersistenceError> {
        *self.ratings.entry(player).or_insert(0) += delta;
        Ok(())
    }
}
