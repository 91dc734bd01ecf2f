//! Data structures for the league engine: players, courts, rounds, config.

mod config;
mod court;
mod delta;
mod error;
mod player;
mod positions;
mod round;
mod tournament;

pub use config::{
    RatingParams, ScoringMode, ScoringParams, TournamentConfig, TournamentFormat, WildcardConfig,
    WildcardIntensity, DEFAULT_ANTI_REPEAT_WINDOW,
};
pub use court::{CourtMatch, TeamSide};
pub use delta::{BatchReport, StatWrite};
pub use error::{
    ConfigError, EngineError, InvariantViolation, PersistenceError, ValidationError,
};
pub use player::{Player, PlayerId, DEFAULT_RATING};
pub use positions::PositionMap;
pub use round::{pair_key, PendingRound, RoundState};
pub use tournament::{EndReason, Tournament, TournamentId, TournamentPhase};
