//! Rounds: a full set of courts with pairings and, eventually, scores.

use crate::models::config::WildcardIntensity;
use crate::models::court::CourtMatch;
use crate::models::delta::StatWrite;
use crate::models::error::InvariantViolation;
use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Normalize an unordered teammate pair so lookups don't depend on slot order.
pub fn pair_key(x: PlayerId, y: PlayerId) -> (PlayerId, PlayerId) {
    if x <= y {
        (x, y)
    } else {
        (y, x)
    }
}

/// One round of play across all courts. Round numbers are 1-based.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub number: u32,
    pub matches: Vec<CourtMatch>,
}

impl RoundState {
    pub fn new(number: u32, matches: Vec<CourtMatch>) -> Self {
        Self { number, matches }
    }

    pub fn courts(&self) -> u32 {
        self.matches.len() as u32
    }

    pub fn match_for_court(&self, court: u32) -> Option<&CourtMatch> {
        self.matches.iter().find(|m| m.court == court)
    }

    pub fn match_for_court_mut(&mut self, court: u32) -> Option<&mut CourtMatch> {
        self.matches.iter_mut().find(|m| m.court == court)
    }

    /// True once every court has a result.
    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(CourtMatch::is_complete)
    }

    /// All players of the round, court by court.
    pub fn players(&self) -> Vec<PlayerId> {
        self.matches.iter().flat_map(|m| m.players()).collect()
    }

    /// The court a player is placed on this round.
    pub fn court_of(&self, player: PlayerId) -> Option<u32> {
        self.matches
            .iter()
            .find(|m| m.contains(player))
            .map(|m| m.court)
    }

    /// Normalized teammate pairs of every court.
    pub fn teammate_pairs(&self) -> Vec<(PlayerId, PlayerId)> {
        self.matches
            .iter()
            .flat_map(|m| {
                [
                    pair_key(m.team_a[0], m.team_a[1]),
                    pair_key(m.team_b[0], m.team_b[1]),
                ]
            })
            .collect()
    }

    /// Structural checks: courts numbered 1..N in order, no player on two
    /// courts. Violations mean corrupted upstream data, not bad user input.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let mut seen = HashSet::new();
        for (i, m) in self.matches.iter().enumerate() {
            let expected = i as u32 + 1;
            if m.court != expected {
                return Err(InvariantViolation::CourtNumbering {
                    expected,
                    found: m.court,
                });
            }
            for player in m.players() {
                if !seen.insert(player) {
                    return Err(InvariantViolation::DuplicatePlayer {
                        round: self.number,
                        player,
                    });
                }
            }
        }
        Ok(())
    }
}

/// A computed round held back for review instead of being committed.
/// Carries everything the eventual commit needs, so confirmation persists
/// exactly what was computed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PendingRound {
    pub round: RoundState,
    pub intensity: WildcardIntensity,
    /// Stat writes for the round that just closed, deferred with the pairing.
    pub stats: Vec<StatWrite>,
}
