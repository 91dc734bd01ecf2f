//! A doubles match on one court.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Which side of a court match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    A,
    B,
}

impl TeamSide {
    pub fn other(self) -> Self {
        match self {
            TeamSide::A => TeamSide::B,
            TeamSide::B => TeamSide::A,
        }
    }
}

/// Two fixed pairs on a numbered court, plus an optional result.
/// Court 1 is the top court.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CourtMatch {
    pub court: u32,
    pub team_a: [PlayerId; 2],
    pub team_b: [PlayerId; 2],
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
}

impl CourtMatch {
    /// Create a match with no result yet.
    pub fn new(court: u32, team_a: [PlayerId; 2], team_b: [PlayerId; 2]) -> Self {
        Self {
            court,
            team_a,
            team_b,
            score_a: None,
            score_b: None,
        }
    }

    /// True once both scores are set.
    pub fn is_complete(&self) -> bool {
        self.score_a.is_some() && self.score_b.is_some()
    }

    /// Overwrite the result for this court.
    pub fn set_score(&mut self, score_a: u32, score_b: u32) {
        self.score_a = Some(score_a);
        self.score_b = Some(score_b);
    }

    /// Winning side of a completed match, `None` while scores are missing.
    /// Equal scores go to team A.
    pub fn winner(&self) -> Option<TeamSide> {
        match (self.score_a, self.score_b) {
            (Some(a), Some(b)) => Some(if b > a { TeamSide::B } else { TeamSide::A }),
            _ => None,
        }
    }

    /// Winning margin of a completed match.
    pub fn margin(&self) -> Option<u32> {
        match (self.score_a, self.score_b) {
            (Some(a), Some(b)) => Some(a.abs_diff(b)),
            _ => None,
        }
    }

    pub fn team(&self, side: TeamSide) -> [PlayerId; 2] {
        match side {
            TeamSide::A => self.team_a,
            TeamSide::B => self.team_b,
        }
    }

    /// All four players, team A first, in slot order.
    pub fn players(&self) -> [PlayerId; 4] {
        [self.team_a[0], self.team_a[1], self.team_b[0], self.team_b[1]]
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.players().contains(&player)
    }

    /// Which side a player is on, if they are in this match at all.
    pub fn side_of(&self, player: PlayerId) -> Option<TeamSide> {
        if self.team_a.contains(&player) {
            Some(TeamSide::A)
        } else if self.team_b.contains(&player) {
            Some(TeamSide::B)
        } else {
            None
        }
    }
}
