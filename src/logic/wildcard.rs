//! Wildcard rounds: a randomized scramble of a computed ladder pairing.
//!
//! The cadence check lives on [`WildcardConfig`](crate::models::WildcardConfig);
//! this module only reshuffles. Every variant keeps the round number, the
//! court numbers, and the full player set intact.

use crate::models::{CourtMatch, PlayerId, RoundState, WildcardIntensity};
use rand::seq::SliceRandom;
use rand::Rng;

/// Scramble a computed round at the given intensity.
pub fn perturb(round: &RoundState, intensity: WildcardIntensity, rng: &mut impl Rng) -> RoundState {
    let mut pots: Vec<Vec<PlayerId>> = round.matches.iter().map(|m| m.players().to_vec()).collect();

    match intensity {
        WildcardIntensity::Mild => {}
        WildcardIntensity::Medium => {
            // One player trades between each pair of adjacent courts.
            for upper in 0..pots.len().saturating_sub(1) {
                let i = rng.gen_range(0..4);
                let j = rng.gen_range(0..4);
                let moved_down = pots[upper][i];
                let moved_up = pots[upper + 1][j];
                pots[upper][i] = moved_up;
                pots[upper + 1][j] = moved_down;
            }
        }
        WildcardIntensity::Mayhem => {
            let mut all: Vec<PlayerId> = pots.concat();
            all.shuffle(rng);
            for (court, pot) in pots.iter_mut().enumerate() {
                pot.copy_from_slice(&all[court * 4..court * 4 + 4]);
            }
        }
    }

    let matches = pots
        .into_iter()
        .enumerate()
        .map(|(i, mut pot)| {
            pot.shuffle(rng);
            CourtMatch::new(i as u32 + 1, [pot[0], pot[1]], [pot[2], pot[3]])
        })
        .collect();
    RoundState::new(round.number, matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use uuid::Uuid;

    fn three_court_round() -> RoundState {
        let p: Vec<PlayerId> = (0..12).map(|_| Uuid::new_v4()).collect();
        RoundState::new(
            4,
            vec![
                CourtMatch::new(1, [p[0], p[1]], [p[2], p[3]]),
                CourtMatch::new(2, [p[4], p[5]], [p[6], p[7]]),
                CourtMatch::new(3, [p[8], p[9]], [p[10], p[11]]),
            ],
        )
    }

    fn assert_same_player_set(before: &RoundState, after: &RoundState) {
        let b: HashSet<PlayerId> = before.players().into_iter().collect();
        let a: HashSet<PlayerId> = after.players().into_iter().collect();
        assert_eq!(a, b);
        assert!(after.validate().is_ok());
        assert_eq!(after.number, before.number);
        let courts: Vec<u32> = after.matches.iter().map(|m| m.court).collect();
        assert_eq!(courts, vec![1, 2, 3]);
    }

    #[test]
    fn mild_keeps_each_court_pot_together() {
        let round = three_court_round();
        let mut rng = StdRng::seed_from_u64(11);
        let shuffled = perturb(&round, WildcardIntensity::Mild, &mut rng);
        assert_same_player_set(&round, &shuffled);
        for (before, after) in round.matches.iter().zip(&shuffled.matches) {
            let b: HashSet<PlayerId> = before.players().into_iter().collect();
            let a: HashSet<PlayerId> = after.players().into_iter().collect();
            assert_eq!(a, b, "mild must not move players across courts");
        }
    }

    #[test]
    fn medium_trades_exactly_one_player_between_adjacent_courts() {
        let round = three_court_round();
        let mut rng = StdRng::seed_from_u64(5);
        let shuffled = perturb(&round, WildcardIntensity::Medium, &mut rng);
        assert_same_player_set(&round, &shuffled);
        // Court 2 sits between both trades, so it can lose up to two of its
        // original four. Court 1 loses exactly one.
        let before: HashSet<PlayerId> = round.matches[0].players().into_iter().collect();
        let after: HashSet<PlayerId> = shuffled.matches[0].players().into_iter().collect();
        assert_eq!(before.intersection(&after).count(), 3);
    }

    #[test]
    fn mayhem_still_fills_every_court_exactly() {
        let round = three_court_round();
        let mut rng = StdRng::seed_from_u64(99);
        let shuffled = perturb(&round, WildcardIntensity::Mayhem, &mut rng);
        assert_same_player_set(&round, &shuffled);
        for m in &shuffled.matches {
            let players: HashSet<PlayerId> = m.players().into_iter().collect();
            assert_eq!(players.len(), 4);
        }
    }
}
