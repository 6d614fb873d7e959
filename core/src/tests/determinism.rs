use crate::engine::BattleSession;
use crate::opponents::random_roster;
use crate::rng::XorShiftRng;
use crate::tests::*;
use crate::types::*;

/// Plays a whole match with the built-in selector on both sides
fn play_match(seed: u64) -> BattleSession {
    let mut rng = XorShiftRng::seed_from_u64(seed);
    let player = random_roster(&mut rng);
    let opponent = random_roster(&mut rng);
    let mut session = BattleSession::new(&player, &opponent).unwrap();

    for _ in 0..500 {
        if session.is_match_over() {
            break;
        }
        session.submit_auto(Side::Player, &mut rng).unwrap();
        session.submit_auto(Side::Opponent, &mut rng).unwrap();
        session.resolve_round(&mut rng).unwrap();
        assert_health_in_bounds(session.state());
        assert!(session.heal_charges(Side::Player) <= 3);
        assert!(session.heal_charges(Side::Opponent) <= 3);
    }
    session
}

#[test]
fn test_same_seed_replays_identically() {
    for seed in [1u64, 42, 9_001] {
        let a = play_match(seed);
        let b = play_match(seed);
        assert_eq!(a.encoded_state(), b.encoded_state());
        assert_eq!(a.log(), b.log());
        assert_eq!(a.outcome(), b.outcome());
    }
}

#[test]
fn test_every_seeded_match_finishes() {
    for seed in 0..50u64 {
        let session = play_match(seed);
        assert!(session.is_match_over(), "seed {} did not finish", seed);
    }
}

#[test]
fn test_heal_charges_never_increase() {
    let mut rng = XorShiftRng::seed_from_u64(77);
    let mut session = BattleSession::new(
        &[Kind::Warrior, Kind::Archer, Kind::King],
        &[Kind::Brawler, Kind::Assassin, Kind::Archer],
    )
    .unwrap();

    let mut last = [3u32; 2];
    while !session.is_match_over() && session.round() < 500 {
        session.submit_auto(Side::Player, &mut rng).unwrap();
        session.submit_auto(Side::Opponent, &mut rng).unwrap();
        session.resolve_round(&mut rng).unwrap();
        for (i, side) in Side::BOTH.into_iter().enumerate() {
            let now = session.heal_charges(side);
            assert!(now <= last[i]);
            last[i] = now;
        }
    }
}
