//! Engine logic: seeding, pairing, scoring, ratings, standings, advancement.

pub mod advance;
pub mod ladder;
pub mod rating;
pub mod rotation;
pub mod scoring;
pub mod setup;
pub mod standings;
pub mod wildcard;

pub use advance::{advance_round, confirm_round, end_tournament, AdvanceOutcome};
pub use setup::start_tournament;
pub use standings::{rank_players, StandingsRow};
