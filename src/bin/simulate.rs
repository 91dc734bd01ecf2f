//! Demo driver: plays a whole tournament in memory and prints the standings.
//! Run with: cargo run --bin simulate
//! Override with env: FORMAT (ladder|rotation), COURTS (ladder court count),
//! ROUNDS (ladder round limit), WILDCARD (off to disable), EXPORT_PATH
//! (where the final JSON state lands).

use chrono::Utc;
use padel_rounds::{
    advance_round, confirm_round, rank_players, start_tournament, AdvanceOutcome, InMemoryStore,
    Player, ScoreDebouncer, ScoreWrite, ScoringMode, Tournament, TournamentConfig,
    TournamentStore, WildcardConfig,
};
use rand::Rng;
use std::time::Instant;

const NAMES: [&str; 16] = [
    "Ada", "Mateo", "Ines", "Viktor", "Lucia", "Bram", "Sofia", "Jonas", "Carmen", "Oscar",
    "Noor", "Felix", "Alba", "Ruben", "Elin", "Diego",
];

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn random_score(mode: &ScoringMode, rng: &mut impl Rng) -> (u32, u32) {
    match mode {
        ScoringMode::PointsCap { target } => {
            let loser = rng.gen_range(0..*target);
            if rng.gen_bool(0.5) {
                (*target, loser)
            } else {
                (loser, *target)
            }
        }
        ScoringMode::TimeLimit { .. } => (rng.gen_range(5..30), rng.gen_range(5..30)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let format = env_or("FORMAT", "ladder");
    let courts: u32 = env_or("COURTS", "3").parse()?;
    let rounds: u32 = env_or("ROUNDS", "6").parse()?;
    let wildcard_on = env_or("WILDCARD", "on") != "off";
    let export_path = env_or("EXPORT_PATH", "tournament_export.json");

    let config = match format.as_str() {
        "rotation" => TournamentConfig::rotation(),
        _ => {
            let mut cfg = TournamentConfig::ladder(courts);
            cfg.round_limit = Some(rounds);
            cfg.wildcard = WildcardConfig {
                enabled: wildcard_on,
                start_round: 3,
                frequency: 2,
                intensity: None,
            };
            cfg
        }
    };

    let mut rng = rand::thread_rng();
    let roster: Vec<Player> = NAMES
        .iter()
        .take(config.required_players())
        .map(|name| Player::with_rating(*name, 950 + rng.gen_range(0..140)))
        .collect();

    let mut tournament = Tournament::new(config, roster);
    let mut store = InMemoryStore::default();
    let mut debouncer = ScoreDebouncer::default();

    start_tournament(&mut tournament, &mut rng, Utc::now())?;
    if let Some(round) = &tournament.current_round {
        store.save_current_round(round)?;
    }

    loop {
        // Make up plausible results for every court of the round on court,
        // funnelling them through the debouncer like a flurry of UI edits.
        let (number, court_numbers) = match &tournament.current_round {
            Some(r) => (r.number, r.matches.iter().map(|m| m.court).collect::<Vec<_>>()),
            None => break,
        };
        for court in court_numbers {
            let (a, b) = random_score(&tournament.config.scoring_mode, &mut rng);
            tournament.record_score(court, a, b)?;
            debouncer.push(
                ScoreWrite {
                    round: number,
                    court,
                    score_a: a,
                    score_b: b,
                },
                Instant::now(),
            );
        }
        for w in debouncer.drain_all() {
            store.save_score(w.round, w.court, w.score_a, w.score_b)?;
        }

        match advance_round(&mut tournament, &mut store, &mut rng, Utc::now())? {
            AdvanceOutcome::Committed { round } => log::info!("round {round} under way"),
            AdvanceOutcome::HeldForReview { round, intensity } => {
                log::info!("wildcard round {round} held for review ({intensity:?}); confirming");
                confirm_round(&mut tournament, &mut store, Utc::now())?;
            }
            AdvanceOutcome::Ended { reason } => {
                log::info!("tournament over: {reason:?}");
                break;
            }
            AdvanceOutcome::Busy => {
                log::warn!("unexpected concurrent advancement; stopping");
                break;
            }
        }
    }

    let rows = rank_players(&tournament.players, &store.points, &tournament.history);
    println!(
        "{:<4} {:<8} {:>6} {:>5} {:>7} {:>6} {:>7}",
        "#", "player", "points", "wins", "played", "diff", "rating"
    );
    for (i, row) in rows.iter().enumerate() {
        println!(
            "{:<4} {:<8} {:>6} {:>5} {:>7} {:>6} {:>7}",
            i + 1,
            row.name,
            row.points,
            row.wins,
            row.played,
            row.differential,
            row.rating
        );
    }

    std::fs::write(&export_path, serde_json::to_string_pretty(&tournament)?)?;
    println!("\nfull tournament state written to {export_path}");
    Ok(())
}
