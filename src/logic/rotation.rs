//! Rotation schedule: 8 players, 2 courts, 7 rounds, every pair of players
//! partnering exactly once.

use crate::models::{
    ConfigError, CourtMatch, EngineError, Player, PlayerId, PositionMap, RoundState,
    ValidationError,
};
use rand::seq::SliceRandom;
use rand::Rng;

pub const ROTATION_COURTS: u32 = 2;
pub const ROTATION_ROUNDS: usize = 7;

/// One court of a round template: team A positions against team B positions.
type CourtTemplate = ([u8; 2], [u8; 2]);

/// The published schedule over positions 1..=8. Each row partitions all eight
/// positions; across the seven rows, every unordered pair of positions
/// appears as teammates exactly once.
const ROUND_TEMPLATES: [[CourtTemplate; 2]; ROTATION_ROUNDS] = [
    [([1, 2], [3, 4]), ([5, 6], [7, 8])],
    [([1, 3], [5, 7]), ([2, 4], [6, 8])],
    [([1, 4], [6, 7]), ([2, 3], [5, 8])],
    [([1, 5], [2, 6]), ([3, 7], [4, 8])],
    [([1, 6], [3, 8]), ([2, 7], [4, 5])],
    [([1, 7], [4, 6]), ([2, 8], [3, 5])],
    [([1, 8], [2, 5]), ([3, 6], [4, 7])],
];

/// Deal positions 1..=8 to the roster at random. The map never changes after
/// this.
pub fn assign_positions(
    players: &[Player],
    rng: &mut impl Rng,
) -> Result<PositionMap, ValidationError> {
    let mut ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    ids.shuffle(rng);
    PositionMap::from_ids(ids)
}

/// Materialize all seven rounds up front, pairings only. Scores are filled in
/// as the rounds are actually played.
pub fn generate(positions: &PositionMap, courts: u32) -> Result<Vec<RoundState>, EngineError> {
    if courts != ROTATION_COURTS {
        return Err(ConfigError::RotationCourts { courts }.into());
    }
    let rounds = ROUND_TEMPLATES
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let matches = row
                .iter()
                .enumerate()
                .map(|(c, (a, b))| {
                    CourtMatch::new(
                        c as u32 + 1,
                        [positions.player_at(a[0]), positions.player_at(a[1])],
                        [positions.player_at(b[0]), positions.player_at(b[1])],
                    )
                })
                .collect();
            RoundState::new(i as u32 + 1, matches)
        })
        .collect();
    Ok(rounds)
}

/// Round `n` (1-based) out of a pre-generated schedule.
pub fn get_round(n: u32, rounds: &[RoundState]) -> Option<&RoundState> {
    rounds.iter().find(|r| r.number == n)
}

/// True once every match of every given round has a result.
pub fn is_complete(rounds: &[RoundState]) -> bool {
    !rounds.is_empty() && rounds.iter().all(RoundState::is_complete)
}
