//! Fixed position assignment for the rotation format.

use crate::models::error::ValidationError;
use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};

/// Players pinned to positions 1..=8 for the whole tournament. Immutable once
/// built; the rotation schedule is expressed in positions and resolved
/// through this map.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PositionMap {
    slots: [PlayerId; 8],
}

impl PositionMap {
    pub fn new(slots: [PlayerId; 8]) -> Self {
        Self { slots }
    }

    /// Map roster order directly to positions 1..=8.
    pub fn from_ordered(players: &[Player]) -> Result<Self, ValidationError> {
        let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
        Self::from_ids(ids)
    }

    pub fn from_ids(ids: Vec<PlayerId>) -> Result<Self, ValidationError> {
        let actual = ids.len();
        let slots: [PlayerId; 8] = ids
            .try_into()
            .map_err(|_| ValidationError::MalformedPositionMap { actual })?;
        Ok(Self { slots })
    }

    /// The player at a 1-based position. Positions come from the published
    /// round templates, which only use 1..=8.
    pub fn player_at(&self, position: u8) -> PlayerId {
        debug_assert!(
            (1..=8).contains(&position),
            "positions are 1-based up to 8, got {position}"
        );
        self.slots[(position - 1) as usize]
    }

    pub fn slots(&self) -> &[PlayerId; 8] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_anything_but_eight_players() {
        let players: Vec<Player> = (0..7).map(|i| Player::new(format!("p{i}"))).collect();
        assert_eq!(
            PositionMap::from_ordered(&players),
            Err(ValidationError::MalformedPositionMap { actual: 7 })
        );
    }

    #[test]
    fn positions_are_one_based() {
        let players: Vec<Player> = (0..8).map(|i| Player::new(format!("p{i}"))).collect();
        let map = PositionMap::from_ordered(&players).unwrap();
        assert_eq!(map.player_at(1), players[0].id);
        assert_eq!(map.player_at(8), players[7].id);
    }

    #[test]
    #[should_panic]
    fn position_zero_is_outside_the_contract() {
        let players: Vec<Player> = (0..8).map(|i| Player::new(format!("p{i}"))).collect();
        let map = PositionMap::from_ordered(&players).unwrap();
        map.player_at(0);
    }
}
