//! The leaderboard: accumulated stats over committed rounds, fully ordered.

use crate::models::{Player, PlayerId, RoundState, TeamSide};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One leaderboard row. `points` comes from the persisted running totals;
/// everything else is re-derived from committed round history.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub player: PlayerId,
    pub name: String,
    pub points: u32,
    pub wins: u32,
    pub played: u32,
    pub points_for: u32,
    pub points_against: u32,
    pub differential: i64,
    pub rating: i32,
}

/// Build and order the leaderboard. Rounds still on court are ignored; only
/// committed history counts.
///
/// Sort order: points, then wins, then score differential, then fewer matches
/// played, then rating, and finally player id so equal rows always land in
/// the same order.
pub fn rank_players(
    players: &[Player],
    points: &HashMap<PlayerId, u32>,
    history: &[RoundState],
) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = players
        .iter()
        .map(|p| StandingsRow {
            player: p.id,
            name: p.name.clone(),
            points: points.get(&p.id).copied().unwrap_or(0),
            wins: 0,
            played: 0,
            points_for: 0,
            points_against: 0,
            differential: 0,
            rating: p.rating,
        })
        .collect();
    let index: HashMap<PlayerId, usize> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| (r.player, i))
        .collect();

    for round in history {
        for m in &round.matches {
            let Some(winner) = m.winner() else {
                continue;
            };
            let (score_a, score_b) = (m.score_a.unwrap_or(0), m.score_b.unwrap_or(0));
            for side in [TeamSide::A, TeamSide::B] {
                let (own, other) = match side {
                    TeamSide::A => (score_a, score_b),
                    TeamSide::B => (score_b, score_a),
                };
                for player in m.team(side) {
                    let Some(&i) = index.get(&player) else {
                        continue;
                    };
                    let row = &mut rows[i];
                    row.played += 1;
                    row.points_for += own;
                    row.points_against += other;
                    if side == winner {
                        row.wins += 1;
                    }
                }
            }
        }
    }
    for row in &mut rows {
        row.differential = row.points_for as i64 - row.points_against as i64;
    }

    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.wins.cmp(&a.wins))
            .then(b.differential.cmp(&a.differential))
            .then(a.played.cmp(&b.played))
            .then(b.rating.cmp(&a.rating))
            .then(a.player.cmp(&b.player))
    });
    rows
}
