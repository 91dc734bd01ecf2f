//! Integration tests for the rotation schedule: partner exhaustion and the
//! position map contract.

use padel_rounds::logic::rotation::{
    assign_positions, generate, get_round, is_complete, ROTATION_ROUNDS,
};
use padel_rounds::{pair_key, ConfigError, EngineError, Player, PlayerId, PositionMap};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn roster() -> Vec<Player> {
    (0..8).map(|i| Player::new(format!("P{i}"))).collect()
}

fn identity_schedule(players: &[Player]) -> Vec<padel_rounds::RoundState> {
    let map = PositionMap::from_ordered(players).unwrap();
    generate(&map, 2).unwrap()
}

#[test]
fn round_one_of_the_identity_map_matches_the_published_table() {
    let players = roster();
    let id = |i: usize| players[i].id;
    let schedule = identity_schedule(&players);

    let r1 = &schedule[0];
    assert_eq!(r1.number, 1);
    let c1 = r1.match_for_court(1).unwrap();
    assert_eq!(c1.team_a, [id(0), id(1)]);
    assert_eq!(c1.team_b, [id(2), id(3)]);
    let c2 = r1.match_for_court(2).unwrap();
    assert_eq!(c2.team_a, [id(4), id(5)]);
    assert_eq!(c2.team_b, [id(6), id(7)]);
}

#[test]
fn every_pair_partners_exactly_once_over_seven_rounds() {
    let players = roster();
    let schedule = identity_schedule(&players);
    assert_eq!(schedule.len(), ROTATION_ROUNDS);

    let mut seen: Vec<(PlayerId, PlayerId)> = Vec::new();
    for round in &schedule {
        seen.extend(round.teammate_pairs());
    }
    // 7 rounds × 2 courts × 2 teams = 28 partnerships, all distinct:
    // exactly the number of unordered pairs of 8 players.
    assert_eq!(seen.len(), 28);
    let unique: HashSet<_> = seen.iter().copied().collect();
    assert_eq!(unique.len(), 28);
    assert!(seen.iter().all(|(x, y)| x != y));
}

#[test]
fn every_round_is_a_partition_of_all_eight_players() {
    let players = roster();
    let all: HashSet<PlayerId> = players.iter().map(|p| p.id).collect();
    for round in &identity_schedule(&players) {
        let round_players: HashSet<PlayerId> = round.players().into_iter().collect();
        assert_eq!(round_players, all, "round {} loses someone", round.number);
        assert!(round.validate().is_ok());
    }
}

#[test]
fn a_randomized_map_reaches_the_same_exhaustion() {
    let players = roster();
    let mut rng = StdRng::seed_from_u64(7);
    let map = assign_positions(&players, &mut rng).unwrap();
    let schedule = generate(&map, 2).unwrap();

    let mut seen = HashSet::new();
    for round in &schedule {
        for (x, y) in round.teammate_pairs() {
            assert!(seen.insert(pair_key(x, y)), "pair repeated");
        }
    }
    assert_eq!(seen.len(), 28);
}

#[test]
fn position_maps_require_exactly_eight_players() {
    let short: Vec<Player> = (0..6).map(|i| Player::new(format!("P{i}"))).collect();
    let mut rng = StdRng::seed_from_u64(8);
    assert!(assign_positions(&short, &mut rng).is_err());
    assert!(PositionMap::from_ordered(&short).is_err());
}

#[test]
fn generate_refuses_other_court_counts() {
    let players = roster();
    let map = PositionMap::from_ordered(&players).unwrap();
    assert!(matches!(
        generate(&map, 3),
        Err(EngineError::Config(ConfigError::RotationCourts { courts: 3 }))
    ));
}

#[test]
fn rounds_are_looked_up_by_number_and_completion_needs_every_score() {
    let players = roster();
    let mut schedule = identity_schedule(&players);

    assert_eq!(get_round(3, &schedule).unwrap().number, 3);
    assert!(get_round(8, &schedule).is_none());
    assert!(!is_complete(&schedule));

    for round in &mut schedule {
        for m in &mut round.matches {
            m.set_score(21, 15);
        }
    }
    assert!(is_complete(&schedule));
}
