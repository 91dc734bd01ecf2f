//! Zero-sum skill rating updates.
//!
//! Ratings move by an expected-score model: the shared swing of a match is
//! computed once from the winning side's perspective and applied `+d` to each
//! winner and `-d` to each loser, so the roster's rating sum never changes.

use crate::models::{EngineError, Player, PlayerId, RatingParams, RoundState, ValidationError};

/// Win probability of a side rated `rating` against one rated `opponent`.
pub fn expected_score(rating: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) / 400.0))
}

/// Shared swing of a completed team match, from the winners' average against
/// the losers' average. Clamped so that neither the winners' gain nor the
/// losers' loss can exceed its cap.
pub fn team_delta(winner_avg: f64, loser_avg: f64, params: &RatingParams) -> i32 {
    let expected = expected_score(winner_avg, loser_avg);
    let raw = (params.k_factor * (1.0 - expected)).round() as i32;
    raw.clamp(0, params.max_gain.min(params.max_loss))
}

/// Rating change for a single player against an opposing side's average,
/// when the update is not required to balance against a partner.
pub fn individual_delta(rating: i32, opponent_avg: f64, won: bool, params: &RatingParams) -> i32 {
    let expected = expected_score(rating as f64, opponent_avg);
    let actual = if won { 1.0 } else { 0.0 };
    let raw = (params.k_factor * (actual - expected)).round() as i32;
    raw.clamp(-params.max_loss, params.max_gain)
}

/// Per-player rating deltas for every match of a fully scored round. Ratings
/// are read from the roster as it stands when the round closes.
pub fn round_rating_deltas(
    closing: &RoundState,
    players: &[Player],
    params: &RatingParams,
) -> Result<Vec<(PlayerId, i32)>, EngineError> {
    let rating_of = |id: PlayerId| -> Result<f64, ValidationError> {
        players
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.rating as f64)
            .ok_or(ValidationError::PlayerNotFound(id))
    };

    let mut deltas = Vec::with_capacity(closing.matches.len() * 4);
    for m in &closing.matches {
        let winner = m
            .winner()
            .ok_or(ValidationError::IncompleteScores { court: m.court })?;
        let winners = m.team(winner);
        let losers = m.team(winner.other());
        let winner_avg = (rating_of(winners[0])? + rating_of(winners[1])?) / 2.0;
        let loser_avg = (rating_of(losers[0])? + rating_of(losers[1])?) / 2.0;
        let d = team_delta(winner_avg, loser_avg, params);
        deltas.extend(winners.into_iter().map(|p| (p, d)));
        deltas.extend(losers.into_iter().map(|p| (p, -d)));
    }
    Ok(deltas)
}
