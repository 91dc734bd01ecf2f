//! Ladder pairing: promotion and relegation between ranked courts.
//!
//! Winners move one court up (court 1 defends), losers one court down, and
//! arrivals at each court are split so that no arriving pair stays together.

use crate::models::{
    pair_key, CourtMatch, EngineError, InvariantViolation, PlayerId, RoundState, ValidationError,
};
use std::collections::HashSet;

/// Winners and losers of one court, kept in team slot order.
struct CourtOutcome {
    winners: [PlayerId; 2],
    losers: [PlayerId; 2],
}

fn court_outcomes(round: &RoundState) -> Result<Vec<CourtOutcome>, ValidationError> {
    round
        .matches
        .iter()
        .map(|m| {
            let winner = m
                .winner()
                .ok_or(ValidationError::IncompleteScores { court: m.court })?;
            Ok(CourtOutcome {
                winners: m.team(winner),
                losers: m.team(winner.other()),
            })
        })
        .collect()
}

/// Teammate pairs seen in the trailing `window` rounds of committed history.
pub fn recent_teammate_pairs(
    history: &[RoundState],
    window: usize,
) -> HashSet<(PlayerId, PlayerId)> {
    history
        .iter()
        .rev()
        .take(window)
        .flat_map(RoundState::teammate_pairs)
        .collect()
}

/// One best-effort swap when a freshly formed team repeats a recent
/// partnership: the second member of each team changes sides. Returns the
/// final teams plus whether a repeat survived the swap.
pub fn resolve_repeat(
    team_a: [PlayerId; 2],
    team_b: [PlayerId; 2],
    recent: &HashSet<(PlayerId, PlayerId)>,
) -> ([PlayerId; 2], [PlayerId; 2], bool) {
    let repeats = |t: [PlayerId; 2]| recent.contains(&pair_key(t[0], t[1]));
    if !repeats(team_a) && !repeats(team_b) {
        return (team_a, team_b, false);
    }
    let swapped_a = [team_a[0], team_b[1]];
    let swapped_b = [team_b[0], team_a[1]];
    let still_colliding = repeats(swapped_a) || repeats(swapped_b);
    (swapped_a, swapped_b, still_colliding)
}

/// Compute the next ladder round from a fully scored one.
///
/// Arrivals at each destination court keep their source order: the higher
/// court's movers first, each pair in team slot order. The four arrivals
/// `[a, b, c, d]` split into teams `[a, c]` and `[b, d]`, which always breaks
/// up pairs that just played together.
pub fn next_round(
    current: &RoundState,
    history: &[RoundState],
    anti_repeat_window: usize,
) -> Result<RoundState, EngineError> {
    let outcomes = court_outcomes(current)?;
    let courts = outcomes.len() as u32;
    let recent = recent_teammate_pairs(history, anti_repeat_window);

    let winners = |court: u32| outcomes.get(court as usize - 1).map(|o| o.winners);
    let losers = |court: u32| outcomes.get(court as usize - 1).map(|o| o.losers);

    let mut matches = Vec::with_capacity(outcomes.len());
    for dest in 1..=courts {
        let mut arrivals: Vec<PlayerId> = Vec::with_capacity(4);
        let sources = if dest == 1 {
            [winners(1), winners(2)]
        } else if dest == courts {
            [losers(dest - 1), losers(dest)]
        } else {
            [losers(dest - 1), winners(dest + 1)]
        };
        for pair in sources.into_iter().flatten() {
            arrivals.extend(pair);
        }
        let [a, b, c, d]: [PlayerId; 4] =
            arrivals
                .try_into()
                .map_err(|v: Vec<PlayerId>| InvariantViolation::ArrivalCount {
                    court: dest,
                    arrivals: v.len(),
                })?;

        let (team_a, team_b, collided) = resolve_repeat([a, c], [b, d], &recent);
        if collided {
            log::debug!(
                "round {}: court {dest} keeps a repeated partnership after the swap",
                current.number + 1
            );
        }
        matches.push(CourtMatch::new(dest, team_a, team_b));
    }

    let next = RoundState::new(current.number + 1, matches);
    next.validate()?;
    Ok(next)
}
