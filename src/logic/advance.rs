//! Round advancement orchestration.
//!
//! Closing a round runs in one sequence: validate the scores, build the stat
//! batch, check end conditions, compute the next pairing, and either commit
//! everything or hold a wildcard round for review. Nothing is persisted and
//! the aggregate is not touched until every store write of a commit lands.

use crate::logic::{ladder, rating, rotation, scoring, wildcard};
use crate::models::{
    EndReason, EngineError, InvariantViolation, PendingRound, PersistenceError, Player, RoundState,
    StatWrite, Tournament, TournamentConfig, TournamentFormat, TournamentPhase, ValidationError,
    WildcardIntensity,
};
use crate::store::{apply_stat_batch, TournamentStore};
use chrono::{DateTime, Utc};
use rand::Rng;

/// What one advancement attempt did.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AdvanceOutcome {
    /// The closing round is in the books and the next one is on court.
    Committed { round: u32 },
    /// A wildcard pairing was computed and parked for confirmation. Nothing
    /// was persisted yet.
    HeldForReview {
        round: u32,
        intensity: WildcardIntensity,
    },
    /// An end condition fired. The closing round was committed; no next
    /// round exists.
    Ended { reason: EndReason },
    /// Another advancement was already in flight; this call did nothing.
    Busy,
}

/// Close the current round and move the tournament forward.
///
/// Re-entrancy is refused, not queued: a second call while one is in flight
/// reports [`AdvanceOutcome::Busy`] and leaves everything alone. Calling this
/// while a round is held for review discards the held round and computes a
/// fresh one from the same closing scores.
pub fn advance_round(
    tournament: &mut Tournament,
    store: &mut impl TournamentStore,
    rng: &mut impl Rng,
    now: DateTime<Utc>,
) -> Result<AdvanceOutcome, EngineError> {
    if tournament.advancing {
        log::warn!("tournament {}: advancement already in flight", tournament.id);
        return Ok(AdvanceOutcome::Busy);
    }
    tournament.advancing = true;
    let result = advance_inner(tournament, store, rng, now);
    tournament.advancing = false;
    result
}

/// Commit a round held for review, exactly as it was computed.
pub fn confirm_round(
    tournament: &mut Tournament,
    store: &mut impl TournamentStore,
    now: DateTime<Utc>,
) -> Result<AdvanceOutcome, EngineError> {
    if tournament.advancing {
        log::warn!("tournament {}: advancement already in flight", tournament.id);
        return Ok(AdvanceOutcome::Busy);
    }
    tournament.advancing = true;
    let result = confirm_inner(tournament, store, now);
    tournament.advancing = false;
    result
}

/// Close the tournament by hand. A round still collecting scores stays
/// uncommitted and out of the standings.
pub fn end_tournament(tournament: &mut Tournament, reason: EndReason) -> Result<(), EngineError> {
    tournament.end(reason)?;
    log::info!("tournament {} ended: {:?}", tournament.id, reason);
    Ok(())
}

fn advance_inner(
    t: &mut Tournament,
    store: &mut impl TournamentStore,
    rng: &mut impl Rng,
    now: DateTime<Utc>,
) -> Result<AdvanceOutcome, EngineError> {
    match t.phase {
        TournamentPhase::Active | TournamentPhase::PendingReview => {}
        phase => {
            return Err(ValidationError::WrongPhase {
                action: "advance a round",
                phase,
            }
            .into())
        }
    }
    let closing = t.require_current_round()?.clone();
    if let Some(m) = closing.matches.iter().find(|m| !m.is_complete()) {
        return Err(ValidationError::IncompleteScores { court: m.court }.into());
    }
    closing.validate()?;

    let stats = closing_stat_writes(&closing, t.history.last(), &t.players, &t.config)?;

    // End conditions win over computing another pairing. The closing round
    // still gets scored, rated, and committed.
    if let Some(reason) = end_condition(t, now) {
        commit(t, store, &stats, closing, None, now)?;
        t.end(reason)?;
        log::info!("tournament {} ended: {:?}", t.id, reason);
        return Ok(AdvanceOutcome::Ended { reason });
    }

    let next_number = closing.number + 1;
    let next = match t.config.format {
        TournamentFormat::Ladder => ladder::next_round(
            &closing,
            &t.history,
            t.config.anti_repeat_window as usize,
        )?,
        TournamentFormat::Rotation => {
            let schedule = t.schedule.as_deref().unwrap_or(&[]);
            rotation::get_round(next_number, schedule)
                .cloned()
                .ok_or(InvariantViolation::ScheduleGap { round: next_number })?
        }
    };

    if t.config.format == TournamentFormat::Ladder && t.config.wildcard.applies_to(next_number) {
        let intensity = t.config.wildcard.intensity_or_default();
        let scrambled = wildcard::perturb(&next, intensity, rng);
        scrambled.validate()?;
        t.pending = Some(PendingRound {
            round: scrambled,
            intensity,
            stats,
        });
        t.phase = TournamentPhase::PendingReview;
        log::info!("round {next_number} held for review ({intensity:?} wildcard)");
        return Ok(AdvanceOutcome::HeldForReview {
            round: next_number,
            intensity,
        });
    }

    commit(t, store, &stats, closing, Some(next), now)?;
    t.phase = TournamentPhase::Active;
    t.pending = None;
    log::info!("round {next_number} committed");
    Ok(AdvanceOutcome::Committed { round: next_number })
}

fn confirm_inner(
    t: &mut Tournament,
    store: &mut impl TournamentStore,
    now: DateTime<Utc>,
) -> Result<AdvanceOutcome, EngineError> {
    if t.phase != TournamentPhase::PendingReview {
        return Err(ValidationError::WrongPhase {
            action: "confirm a round",
            phase: t.phase,
        }
        .into());
    }
    let pending = t.pending.clone().ok_or(ValidationError::NoPendingRound)?;
    let closing = t.require_current_round()?.clone();

    commit(
        t,
        store,
        &pending.stats,
        closing,
        Some(pending.round.clone()),
        now,
    )?;
    t.pending = None;
    t.phase = TournamentPhase::Active;
    log::info!("round {} confirmed and committed", pending.round.number);
    Ok(AdvanceOutcome::Committed {
        round: pending.round.number,
    })
}

/// Point and rating writes for a round that just closed, points first,
/// courts in order, team A before team B.
fn closing_stat_writes(
    closing: &RoundState,
    previous: Option<&RoundState>,
    players: &[Player],
    config: &TournamentConfig,
) -> Result<Vec<StatWrite>, EngineError> {
    let points = scoring::round_point_deltas(closing, previous, &config.scoring)?;
    let ratings = rating::round_rating_deltas(closing, players, &config.rating)?;
    let mut writes = Vec::with_capacity(points.len() + ratings.len());
    writes.extend(
        points
            .into_iter()
            .map(|(player, points)| StatWrite::Points { player, points }),
    );
    writes.extend(
        ratings
            .into_iter()
            .map(|(player, delta)| StatWrite::Rating { player, delta }),
    );
    Ok(writes)
}

fn end_condition(t: &Tournament, now: DateTime<Utc>) -> Option<EndReason> {
    let current = t.current_round.as_ref()?;
    if t.config.format == TournamentFormat::Rotation
        && current.number as usize >= rotation::ROTATION_ROUNDS
    {
        return Some(EndReason::RotationComplete);
    }
    if let Some(limit) = t.config.round_limit {
        if current.number >= limit {
            return Some(EndReason::RoundLimit);
        }
    }
    if t.is_time_expired(now) {
        return Some(EndReason::TimeLimit);
    }
    None
}

/// Persist a closing round and, when the tournament goes on, its successor.
/// Store writes come first; the aggregate only changes once all of them have
/// landed, so a failure leaves the in-memory state on the closing round.
fn commit(
    t: &mut Tournament,
    store: &mut impl TournamentStore,
    stats: &[StatWrite],
    closing: RoundState,
    next: Option<RoundState>,
    now: DateTime<Utc>,
) -> Result<(), EngineError> {
    let report = apply_stat_batch(store, stats);
    if !report.is_complete() {
        for (w, e) in report.failures() {
            log::error!("stat write for player {} failed: {e}", w.player());
        }
        return Err(PersistenceError::BatchIncomplete { report }.into());
    }
    store.append_round(&closing)?;
    if let Some(next) = &next {
        store.save_current_round(next)?;
    }

    for w in stats {
        if let StatWrite::Rating { player, delta } = *w {
            if let Some(p) = t.player_mut(player) {
                p.apply_rating_delta(delta);
            }
        }
    }
    t.history.push(closing);
    t.round_started_at = next.as_ref().map(|_| now);
    t.current_round = next;
    Ok(())
}
