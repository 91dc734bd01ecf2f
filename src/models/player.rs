//! Player identity and skill rating.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in pairings and lookups).
pub type PlayerId = Uuid;

/// Rating every player starts from.
pub const DEFAULT_RATING: i32 = 1000;

/// A league member. Points and match history live in the round records and
/// the persistence layer; the rating here is the in-memory authoritative
/// copy, touched only when a round's rating batch is applied.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub rating: i32,
}

impl Player {
    /// Create a new player with the given name and the default rating.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_rating(name, DEFAULT_RATING)
    }

    /// Create a player carrying a rating from a previous season.
    pub fn with_rating(name: impl Into<String>, rating: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            rating,
        }
    }

    /// Apply a signed rating change from a committed round.
    pub fn apply_rating_delta(&mut self, delta: i32) {
        self.rating += delta;
    }
}
