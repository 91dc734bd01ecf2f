//! Error taxonomy: validation, invariant, persistence, and configuration errors.

use crate::models::delta::BatchReport;
use crate::models::player::PlayerId;
use crate::models::tournament::TournamentPhase;
use thiserror::Error;

/// Recoverable input problems. The requested operation is refused and the
/// tournament is left unchanged.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ValidationError {
    /// A court in the current round is missing one or both scores.
    #[error("court {court} has no result yet")]
    IncompleteScores { court: u32 },
    /// Roster size does not match `courts × 4`.
    #[error("need exactly {required} players for this format, got {actual}")]
    RosterSize { required: usize, actual: usize },
    /// The rotation position map must cover exactly 8 players.
    #[error("position map needs exactly 8 players, got {actual}")]
    MalformedPositionMap { actual: usize },
    /// Court number not present in the current round.
    #[error("no court {court} in the current round")]
    UnknownCourt { court: u32 },
    /// Action not allowed in the tournament's current phase.
    #[error("cannot {action} while the tournament is {phase}")]
    WrongPhase {
        action: &'static str,
        phase: TournamentPhase,
    },
    /// Player id referenced by a round but absent from the roster.
    #[error("player {0} is not on the roster")]
    PlayerNotFound(PlayerId),
    /// Confirmation requested but no round is held for review.
    #[error("no round is waiting for confirmation")]
    NoPendingRound,
}

/// Corrupted state detected mid-computation. Fatal for the attempt; surfaced
/// rather than patched because it points at bad upstream data.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum InvariantViolation {
    /// A ladder destination court did not receive exactly 4 players.
    #[error("court {court} received {arrivals} players instead of 4")]
    ArrivalCount { court: u32, arrivals: usize },
    /// The same player appears on more than one court in a round.
    #[error("player {player} appears twice in round {round}")]
    DuplicatePlayer { round: u32, player: PlayerId },
    /// Round courts must be numbered 1..N in order.
    #[error("expected court {expected} at its slot, found court {found}")]
    CourtNumbering { expected: u32, found: u32 },
    /// The rotation schedule has no template for a round that should exist.
    #[error("rotation schedule has no round {round}")]
    ScheduleGap { round: u32 },
}

/// Failures in the persistence collaborator. In-memory state is not advanced
/// past what was actually saved.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum PersistenceError {
    #[error("failed writing {target}: {reason}")]
    Write { target: String, reason: String },
    /// One or more writes of a stat batch failed; the per-operation report
    /// shows which. Completed writes stay written.
    #[error("stat batch incomplete: {} of {} writes failed", report.failed(), report.len())]
    BatchIncomplete { report: BatchReport },
}

/// Invalid or missing configuration for the active format. Defaults are
/// applied where documented; everything else is surfaced.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("ladder format needs at least 2 courts, got {courts}")]
    LadderCourts { courts: u32 },
    #[error("rotation format is defined for exactly 2 courts, got {courts}")]
    RotationCourts { courts: u32 },
    #[error("wildcard frequency must be at least 1")]
    WildcardFrequency,
    #[error("wildcard rounds cannot start before round 2, got {start_round}")]
    WildcardStart { start_round: u32 },
    #[error("max points per match ({max}) is below the base win points ({base})")]
    PointsCapBelowBase { base: u32, max: u32 },
    #[error("rating K-factor must be positive, got {k}")]
    NonPositiveK { k: f64 },
    #[error("rating gain/loss caps must not be negative")]
    NegativeRatingCap,
    #[error("round limit must be at least 1")]
    ZeroRoundLimit,
}

/// Umbrella error for engine entry points.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
