//! Padel social league engine: court pairings, scoring, ratings, standings.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    advance_round, confirm_round, end_tournament, rank_players, start_tournament, AdvanceOutcome,
    StandingsRow,
};
pub use models::{
    pair_key, BatchReport, ConfigError, CourtMatch, EndReason, EngineError, InvariantViolation,
    PendingRound, PersistenceError, Player, PlayerId, PositionMap, RatingParams, RoundState,
    ScoringMode, ScoringParams, StatWrite, TeamSide, Tournament, TournamentConfig,
    TournamentFormat, TournamentId, TournamentPhase, ValidationError, WildcardConfig,
    WildcardIntensity,
};
pub use store::{
    apply_stat_batch, InMemoryStore, ScoreDebouncer, ScoreWrite, TournamentStore,
    DEFAULT_DEBOUNCE_WINDOW,
};
