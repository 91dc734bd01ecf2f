//! The tournament aggregate and its lifecycle phases.

use crate::models::config::TournamentConfig;
use crate::models::error::ValidationError;
use crate::models::player::{Player, PlayerId};
use crate::models::positions::PositionMap;
use crate::models::round::{PendingRound, RoundState};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Lifecycle phase between engine calls. The transient preparing state of an
/// advancement never rests here; it lives in the `advancing` flag while the
/// orchestrator runs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentPhase {
    /// Roster and configuration assembled, round 1 not yet seeded.
    #[default]
    Setup,
    /// A round is on court collecting scores.
    Active,
    /// A wildcard round is computed and waiting for explicit confirmation.
    PendingReview,
    /// Terminal. No further rounds.
    Ended,
}

impl std::fmt::Display for TournamentPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TournamentPhase::Setup => "setup",
            TournamentPhase::Active => "active",
            TournamentPhase::PendingReview => "pending_review",
            TournamentPhase::Ended => "ended",
        };
        write!(f, "{s}")
    }
}

/// Why a tournament reached its end.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// An organizer closed it by hand.
    Manual,
    /// The configured round limit was reached.
    RoundLimit,
    /// The configured wall-clock limit expired.
    TimeLimit,
    /// All seven rotation rounds have been played.
    RotationComplete,
}

/// The whole tournament: roster, configuration, the round on court, committed
/// history, and whatever is held for review. Serializes to a single document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub config: TournamentConfig,
    pub players: Vec<Player>,
    pub phase: TournamentPhase,
    /// Rotation format only: positions fixed at start.
    pub positions: Option<PositionMap>,
    /// Rotation format only: all seven rounds, pairings without scores.
    pub schedule: Option<Vec<RoundState>>,
    /// The round currently collecting scores.
    pub current_round: Option<RoundState>,
    /// Committed rounds, oldest first. The leaderboard reads only these.
    pub history: Vec<RoundState>,
    /// A computed wildcard round awaiting confirmation.
    pub pending: Option<PendingRound>,
    pub end_reason: Option<EndReason>,
    pub started_at: Option<DateTime<Utc>>,
    /// When the current round went on court. Reset on every commit.
    pub round_started_at: Option<DateTime<Utc>>,
    /// True while an advancement sequence is in flight.
    pub advancing: bool,
}

impl Tournament {
    pub fn new(config: TournamentConfig, players: Vec<Player>) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            players,
            phase: TournamentPhase::Setup,
            positions: None,
            schedule: None,
            current_round: None,
            history: Vec::new(),
            pending: None,
            end_reason: None,
            started_at: None,
            round_started_at: None,
            advancing: false,
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn roster_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }

    /// The round on court, or a phase error when there is none.
    pub fn require_current_round(&self) -> Result<&RoundState, ValidationError> {
        self.current_round
            .as_ref()
            .ok_or(ValidationError::WrongPhase {
                action: "advance a round",
                phase: self.phase,
            })
    }

    /// Enter (or overwrite) the result for one court of the current round.
    /// Only allowed while the round is actively collecting scores.
    pub fn record_score(
        &mut self,
        court: u32,
        score_a: u32,
        score_b: u32,
    ) -> Result<(), ValidationError> {
        if self.phase != TournamentPhase::Active {
            return Err(ValidationError::WrongPhase {
                action: "record a score",
                phase: self.phase,
            });
        }
        let round = self
            .current_round
            .as_mut()
            .ok_or(ValidationError::UnknownCourt { court })?;
        let m = round
            .match_for_court_mut(court)
            .ok_or(ValidationError::UnknownCourt { court })?;
        m.set_score(score_a, score_b);
        Ok(())
    }

    /// Close the tournament. Allowed from any phase but `Ended`; a round
    /// still on court stays uncommitted and out of the standings.
    pub fn end(&mut self, reason: EndReason) -> Result<(), ValidationError> {
        if self.phase == TournamentPhase::Ended {
            return Err(ValidationError::WrongPhase {
                action: "end the tournament",
                phase: self.phase,
            });
        }
        self.phase = TournamentPhase::Ended;
        self.end_reason = Some(reason);
        self.pending = None;
        Ok(())
    }

    /// True when a configured wall-clock limit has run out by `now`.
    pub fn is_time_expired(&self, now: DateTime<Utc>) -> bool {
        match (self.config.time_limit_minutes, self.started_at) {
            (Some(minutes), Some(started)) => now >= started + Duration::minutes(minutes as i64),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::court::CourtMatch;

    fn active_tournament() -> Tournament {
        let players: Vec<Player> = (0..8).map(|i| Player::new(format!("p{i}"))).collect();
        let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
        let mut t = Tournament::new(TournamentConfig::ladder(2), players);
        t.current_round = Some(RoundState::new(
            1,
            vec![
                CourtMatch::new(1, [ids[0], ids[1]], [ids[2], ids[3]]),
                CourtMatch::new(2, [ids[4], ids[5]], [ids[6], ids[7]]),
            ],
        ));
        t.phase = TournamentPhase::Active;
        t
    }

    #[test]
    fn scores_can_be_corrected_until_the_round_closes() {
        let mut t = active_tournament();
        t.record_score(1, 21, 15).unwrap();
        t.record_score(1, 15, 21).unwrap();
        let m = t.current_round.as_ref().unwrap().match_for_court(1).unwrap();
        assert_eq!((m.score_a, m.score_b), (Some(15), Some(21)));
    }

    #[test]
    fn scoring_an_unknown_court_is_refused() {
        let mut t = active_tournament();
        assert_eq!(
            t.record_score(5, 21, 15),
            Err(ValidationError::UnknownCourt { court: 5 })
        );
    }

    #[test]
    fn scoring_requires_an_active_round() {
        let mut t = active_tournament();
        t.phase = TournamentPhase::PendingReview;
        assert!(matches!(
            t.record_score(1, 21, 15),
            Err(ValidationError::WrongPhase { .. })
        ));
    }

    #[test]
    fn ending_twice_is_an_error() {
        let mut t = active_tournament();
        t.end(EndReason::Manual).unwrap();
        assert_eq!(t.phase, TournamentPhase::Ended);
        assert_eq!(t.end_reason, Some(EndReason::Manual));
        assert!(t.end(EndReason::Manual).is_err());
    }

    #[test]
    fn time_limit_is_checked_against_the_start_stamp() {
        let mut t = active_tournament();
        let start = Utc::now();
        t.started_at = Some(start);
        assert!(!t.is_time_expired(start + Duration::minutes(30)));

        t.config.time_limit_minutes = Some(90);
        assert!(!t.is_time_expired(start + Duration::minutes(89)));
        assert!(t.is_time_expired(start + Duration::minutes(90)));
    }
}
