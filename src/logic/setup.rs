//! Tournament start: configuration checks, roster checks, round 1 seeding.

use crate::logic::rotation;
use crate::models::{
    CourtMatch, EngineError, RoundState, Tournament, TournamentFormat, TournamentPhase,
    ValidationError,
};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

/// Validate the configuration and roster, seed round 1, and move the
/// tournament onto court.
///
/// Ladder round 1 is a random deal: the shuffled roster fills courts top to
/// bottom, four at a time. The rotation format instead fixes a random
/// position map and pre-generates its whole schedule.
pub fn start_tournament(
    tournament: &mut Tournament,
    rng: &mut impl Rng,
    now: DateTime<Utc>,
) -> Result<(), EngineError> {
    if tournament.phase != TournamentPhase::Setup {
        return Err(ValidationError::WrongPhase {
            action: "start the tournament",
            phase: tournament.phase,
        }
        .into());
    }
    tournament.config.validate()?;

    let required = tournament.config.required_players();
    if tournament.players.len() != required {
        return Err(ValidationError::RosterSize {
            required,
            actual: tournament.players.len(),
        }
        .into());
    }

    let first = match tournament.config.format {
        TournamentFormat::Ladder => {
            let mut ids = tournament.roster_ids();
            ids.shuffle(rng);
            let matches = ids
                .chunks_exact(4)
                .enumerate()
                .map(|(i, four)| {
                    CourtMatch::new(i as u32 + 1, [four[0], four[1]], [four[2], four[3]])
                })
                .collect();
            RoundState::new(1, matches)
        }
        TournamentFormat::Rotation => {
            let positions = rotation::assign_positions(&tournament.players, rng)?;
            let schedule = rotation::generate(&positions, tournament.config.courts)?;
            let first = schedule[0].clone();
            tournament.positions = Some(positions);
            tournament.schedule = Some(schedule);
            first
        }
    };
    first.validate()?;

    log::info!(
        "tournament {} started: {:?} format, {} courts, {} players",
        tournament.id,
        tournament.config.format,
        tournament.config.courts,
        tournament.players.len()
    );

    tournament.current_round = Some(first);
    tournament.phase = TournamentPhase::Active;
    tournament.started_at = Some(now);
    tournament.round_started_at = Some(now);
    Ok(())
}
