//! League point awards for finished matches.

use crate::models::{PlayerId, RoundState, ScoringParams, TeamSide, ValidationError};

/// One player's result facts, as used by the point calculator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MatchOutcome {
    pub won: bool,
    pub court: u32,
    /// Winning margin of the match, regardless of side.
    pub margin: u32,
    /// Won on court 1 after being on the winning side there last round too.
    pub defended_top_court: bool,
}

/// Points one player earns from one match. Losses earn nothing; bonuses only
/// stack on a win, and the total never exceeds the per-match cap.
pub fn match_points(outcome: &MatchOutcome, params: &ScoringParams) -> u32 {
    if !outcome.won {
        return 0;
    }
    let mut points = params.base_win_points;
    if outcome.margin >= params.margin_bonus_threshold {
        points += params.margin_bonus_points;
    }
    if outcome.defended_top_court {
        points += params.defend_bonus_points;
    }
    points.min(params.max_points_per_match)
}

/// Point awards for every player of a fully scored round, court by court,
/// team A before team B. `previous` is the round before the closing one and
/// feeds the top-court defence check.
pub fn round_point_deltas(
    closing: &RoundState,
    previous: Option<&RoundState>,
    params: &ScoringParams,
) -> Result<Vec<(PlayerId, u32)>, ValidationError> {
    let mut deltas = Vec::with_capacity(closing.matches.len() * 4);
    for m in &closing.matches {
        let winner = m
            .winner()
            .ok_or(ValidationError::IncompleteScores { court: m.court })?;
        let margin = m.margin().unwrap_or(0);
        for side in [TeamSide::A, TeamSide::B] {
            let won = side == winner;
            for player in m.team(side) {
                let defended = won && m.court == 1 && won_top_court_before(previous, player);
                let outcome = MatchOutcome {
                    won,
                    court: m.court,
                    margin,
                    defended_top_court: defended,
                };
                deltas.push((player, match_points(&outcome, params)));
            }
        }
    }
    Ok(deltas)
}

fn won_top_court_before(previous: Option<&RoundState>, player: PlayerId) -> bool {
    let Some(prev) = previous else {
        return false;
    };
    let Some(m) = prev.match_for_court(1) else {
        return false;
    };
    match (m.side_of(player), m.winner()) {
        (Some(side), Some(winner)) => side == winner,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CourtMatch;
    use uuid::Uuid;

    fn params() -> ScoringParams {
        ScoringParams::ladder_default()
    }

    fn outcome(won: bool, margin: u32) -> MatchOutcome {
        MatchOutcome {
            won,
            court: 2,
            margin,
            defended_top_court: false,
        }
    }

    #[test]
    fn plain_win_earns_the_base_award() {
        assert_eq!(match_points(&outcome(true, 3), &params()), 10);
    }

    #[test]
    fn margin_bonus_starts_exactly_at_the_threshold() {
        assert_eq!(match_points(&outcome(true, 4), &params()), 10);
        assert_eq!(match_points(&outcome(true, 5), &params()), 12);
        assert_eq!(match_points(&outcome(true, 21), &params()), 12);
    }

    #[test]
    fn losing_earns_nothing_whatever_the_margin() {
        assert_eq!(match_points(&outcome(false, 21), &params()), 0);
        assert_eq!(match_points(&outcome(false, 0), &params()), 0);
    }

    #[test]
    fn stacked_bonuses_stop_at_the_cap() {
        let o = MatchOutcome {
            won: true,
            court: 1,
            margin: 12,
            defended_top_court: true,
        };
        // 10 base + 2 margin + 3 defence = 15, exactly the ladder cap.
        assert_eq!(match_points(&o, &params()), 15);

        let mut tight = params();
        tight.max_points_per_match = 13;
        assert_eq!(match_points(&o, &tight), 13);
    }

    #[test]
    fn defence_bonus_needs_a_court_one_win_last_round_too() {
        let p: Vec<PlayerId> = (0..8).map(|_| Uuid::new_v4()).collect();
        let mut prev = RoundState::new(
            1,
            vec![
                CourtMatch::new(1, [p[0], p[1]], [p[2], p[3]]),
                CourtMatch::new(2, [p[4], p[5]], [p[6], p[7]]),
            ],
        );
        prev.match_for_court_mut(1).unwrap().set_score(21, 10);
        prev.match_for_court_mut(2).unwrap().set_score(21, 12);

        // p0 defends court 1, p4 arrives fresh from court 2.
        let mut closing = RoundState::new(
            2,
            vec![
                CourtMatch::new(1, [p[0], p[4]], [p[1], p[5]]),
                CourtMatch::new(2, [p[2], p[6]], [p[3], p[7]]),
            ],
        );
        closing.match_for_court_mut(1).unwrap().set_score(21, 19);
        closing.match_for_court_mut(2).unwrap().set_score(21, 19);

        let deltas = round_point_deltas(&closing, Some(&prev), &params()).unwrap();
        let points_of = |id: PlayerId| deltas.iter().find(|(p, _)| *p == id).unwrap().1;

        assert_eq!(points_of(p[0]), 13); // base + defence
        assert_eq!(points_of(p[4]), 10); // base only
        assert_eq!(points_of(p[1]), 0); // lost this round
        assert_eq!(points_of(p[2]), 10); // court 2 win, no defence there
    }

    #[test]
    fn every_player_of_the_round_gets_a_delta() {
        let p: Vec<PlayerId> = (0..8).map(|_| Uuid::new_v4()).collect();
        let mut closing = RoundState::new(
            1,
            vec![
                CourtMatch::new(1, [p[0], p[1]], [p[2], p[3]]),
                CourtMatch::new(2, [p[4], p[5]], [p[6], p[7]]),
            ],
        );
        closing.match_for_court_mut(1).unwrap().set_score(15, 21);
        closing.match_for_court_mut(2).unwrap().set_score(21, 0);

        let deltas = round_point_deltas(&closing, None, &params()).unwrap();
        assert_eq!(deltas.len(), 8);
        let winners: Vec<PlayerId> = deltas
            .iter()
            .filter(|(_, pts)| *pts > 0)
            .map(|(id, _)| *id)
            .collect();
        assert_eq!(winners, vec![p[2], p[3], p[4], p[5]]);
    }

    #[test]
    fn an_unscored_court_fails_the_whole_computation() {
        let p: Vec<PlayerId> = (0..8).map(|_| Uuid::new_v4()).collect();
        let mut closing = RoundState::new(
            1,
            vec![
                CourtMatch::new(1, [p[0], p[1]], [p[2], p[3]]),
                CourtMatch::new(2, [p[4], p[5]], [p[6], p[7]]),
            ],
        );
        closing.match_for_court_mut(1).unwrap().set_score(21, 15);

        assert_eq!(
            round_point_deltas(&closing, None, &params()),
            Err(ValidationError::IncompleteScores { court: 2 })
        );
    }
}
