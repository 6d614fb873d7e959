use crate::battle::{validate_actions, CombatEvent};
use crate::engine::{validate_roster, BattleSession};
use crate::error::GameError;
use crate::rng::XorShiftRng;
use crate::state::BattleState;
use crate::tests::*;
use crate::types::*;

const PLAYER: [Kind; 3] = [Kind::Warrior, Kind::Archer, Kind::Brawler];
const OPPONENT: [Kind; 3] = [Kind::King, Kind::Assassin, Kind::Archer];

fn new_session() -> BattleSession {
    BattleSession::new(&PLAYER, &OPPONENT).unwrap()
}

fn play_round(session: &mut BattleSession, player: Vec<ActionRequest>, rng: &mut XorShiftRng) {
    session.submit_actions(Side::Player, player).unwrap();
    session.submit_actions(Side::Opponent, idle_all()).unwrap();
    session.resolve_round(rng).unwrap();
}

#[test]
fn test_new_session_starts_fresh() {
    let session = new_session();
    assert_eq!(session.round(), 1);
    assert_eq!(session.heal_charges(Side::Player), 3);
    assert_eq!(session.heal_charges(Side::Opponent), 3);
    assert!(session.log().is_empty());
    assert!(!session.is_match_over());
    assert_eq!(session.state().player[0].name, "Ruby Warrior");
    assert_eq!(session.state().opponent[0].name, "Quartz King");
}

#[test]
fn test_roster_validation() {
    assert_eq!(
        validate_roster(&[Kind::Warrior, Kind::Archer]),
        Err(GameError::WrongRosterSize {
            expected: 3,
            got: 2
        })
    );
    assert_eq!(
        validate_roster(&[Kind::Warrior, Kind::Archer, Kind::Warrior]),
        Err(GameError::DuplicateKind)
    );
    assert!(BattleSession::new(&PLAYER, &[Kind::King, Kind::King, Kind::Archer]).is_err());
    assert!(validate_roster(&OPPONENT).is_ok());
}

#[test]
fn test_repeated_move_is_rejected_without_mutation() {
    let mut rng = XorShiftRng::seed_from_u64(7);
    let mut session = new_session();
    play_round(
        &mut session,
        vec![ActionRequest::cast(Move::RubyShield), ActionRequest::idle(), ActionRequest::idle()],
        &mut rng,
    );

    let before = session.encoded_state();
    let log_len = session.log().len();
    let result = session.submit_actions(
        Side::Player,
        vec![ActionRequest::cast(Move::RubyShield), ActionRequest::idle(), ActionRequest::idle()],
    );

    assert_eq!(
        result,
        Err(GameError::RepeatedMove {
            side: Side::Player,
            slot: 0,
            actor: "Ruby Warrior".into(),
            action: Move::RubyShield,
        })
    );
    assert!(!session.has_submitted(Side::Player));
    assert_eq!(session.encoded_state(), before);
    assert_eq!(session.log().len(), log_len);

    // Retrying from the same state with a legal move goes through
    session
        .submit_actions(
            Side::Player,
            vec![ActionRequest::attack(0), ActionRequest::idle(), ActionRequest::idle()],
        )
        .unwrap();
    assert!(session.has_submitted(Side::Player));
}

#[test]
fn test_repetition_clears_after_a_different_move() {
    let mut rng = XorShiftRng::seed_from_u64(11);
    let mut session = new_session();
    let shield = || vec![ActionRequest::cast(Move::RubyShield), ActionRequest::idle(), ActionRequest::idle()];
    let rally = vec![ActionRequest::cast(Move::HeroicRaise), ActionRequest::idle(), ActionRequest::idle()];

    play_round(&mut session, shield(), &mut rng);
    play_round(&mut session, rally, &mut rng);
    assert!(session.submit_actions(Side::Player, shield()).is_ok());
}

#[test]
fn test_attack_may_repeat() {
    let mut rng = XorShiftRng::seed_from_u64(3);
    let mut session = new_session();
    let attack = || vec![ActionRequest::attack(1), ActionRequest::idle(), ActionRequest::idle()];

    play_round(&mut session, attack(), &mut rng);
    assert!(session.submit_actions(Side::Player, attack()).is_ok());
}

#[test]
fn test_rejected_batch_keeps_earlier_submission() {
    let mut rng = XorShiftRng::seed_from_u64(5);
    let mut session = new_session();
    play_round(
        &mut session,
        vec![ActionRequest::idle(), ActionRequest::cast(Move::SharpAim), ActionRequest::idle()],
        &mut rng,
    );

    session.submit_actions(Side::Player, idle_all()).unwrap();
    let err = session
        .submit_actions(
            Side::Player,
            vec![ActionRequest::idle(), ActionRequest::cast(Move::SharpAim), ActionRequest::idle()],
        )
        .unwrap_err();

    assert!(matches!(err, GameError::RepeatedMove { slot: 1, .. }));
    assert!(session.has_submitted(Side::Player));
}

#[test]
fn test_opponent_submissions_are_validated_too() {
    let mut rng = XorShiftRng::seed_from_u64(9);
    let mut session = new_session();
    let command = || vec![ActionRequest::cast(Move::KingsCommand), ActionRequest::idle(), ActionRequest::idle()];

    session.submit_actions(Side::Player, idle_all()).unwrap();
    session.submit_actions(Side::Opponent, command()).unwrap();
    session.resolve_round(&mut rng).unwrap();

    let err = session.submit_actions(Side::Opponent, command()).unwrap_err();
    assert!(matches!(
        err,
        GameError::RepeatedMove {
            side: Side::Opponent,
            slot: 0,
            ..
        }
    ));
}

#[test]
fn test_moves_outside_the_kind_are_rejected() {
    let mut session = new_session();
    let err = session
        .submit_actions(
            Side::Player,
            vec![ActionRequest::idle(), ActionRequest::targeted(Move::StunPunch, 0), ActionRequest::idle()],
        )
        .unwrap_err();

    assert_eq!(
        err,
        GameError::MoveNotAvailable {
            side: Side::Player,
            slot: 1,
            actor: "Emerald Archer".into(),
            action: Move::StunPunch,
        }
    );
}

#[test]
fn test_action_count_must_match_roster() {
    let mut session = new_session();
    let err = session
        .submit_actions(Side::Player, vec![ActionRequest::idle()])
        .unwrap_err();
    assert_eq!(err, GameError::WrongActionCount { expected: 3, got: 1 });
}

#[test]
fn test_idle_round_clears_repetition_memory() {
    let mut rng = XorShiftRng::seed_from_u64(3);
    let mut session = new_session();
    let shield = || vec![ActionRequest::cast(Move::RubyShield), ActionRequest::idle(), ActionRequest::idle()];

    play_round(&mut session, shield(), &mut rng);
    assert_eq!(
        session.submit_actions(Side::Player, shield()).unwrap_err(),
        GameError::RepeatedMove {
            side: Side::Player,
            slot: 0,
            actor: "Ruby Warrior".into(),
            action: Move::RubyShield,
        }
    );

    play_round(&mut session, idle_all(), &mut rng);
    assert_eq!(session.state().player[0].last_non_attack_move, Some(Move::Idle));
    // Idle twice in a row stays legal
    session.submit_actions(Side::Player, idle_all()).unwrap();
    session.submit_actions(Side::Player, shield()).unwrap();
}

#[test]
fn test_dead_combatants_are_forced_idle() {
    let mut state = BattleState::new(&PLAYER, &OPPONENT);
    state.player[1].health = 0;
    state.player[1].last_non_attack_move = Some(Move::SharpAim);

    let normalized = validate_actions(
        Side::Player,
        &state.player,
        &[
            ActionRequest::attack(0),
            ActionRequest::cast(Move::SharpAim),
            ActionRequest::targeted(Move::StunPunch, 2),
        ],
    )
    .unwrap();

    assert_eq!(normalized[1], ActionRequest::idle());
    assert_eq!(normalized[2], ActionRequest::targeted(Move::StunPunch, 2));
}

#[test]
fn test_resolve_waits_for_both_sides() {
    let mut rng = XorShiftRng::seed_from_u64(1);
    let mut session = new_session();

    assert_eq!(
        session.resolve_round(&mut rng).unwrap_err(),
        GameError::ActionsPending { side: Side::Player }
    );

    session.submit_actions(Side::Player, idle_all()).unwrap();
    assert_eq!(
        session.resolve_round(&mut rng).unwrap_err(),
        GameError::ActionsPending {
            side: Side::Opponent
        }
    );
    assert!(session.has_submitted(Side::Player), "pending batch survives");
    assert_eq!(session.round(), 1);
}

#[test]
fn test_resolve_clears_submissions_and_reports() {
    let mut rng = XorShiftRng::seed_from_u64(2);
    let mut session = new_session();
    session.submit_actions(Side::Player, idle_all()).unwrap();
    session.submit_actions(Side::Opponent, idle_all()).unwrap();

    let report = session.resolve_round(&mut rng).unwrap();

    assert_eq!(report.round, 1);
    assert_eq!(report.lines[0], "--- Round 1 ---");
    assert_eq!(report.lines.len(), report.events.len());
    assert_eq!(report.view.round, 2);
    assert_eq!(report.outcome(), None);
    assert!(!session.has_submitted(Side::Player));
    assert!(!session.has_submitted(Side::Opponent));
}

#[test]
fn test_log_is_append_only_and_queryable() {
    let mut rng = XorShiftRng::seed_from_u64(4);
    let mut session = new_session();
    play_round(&mut session, idle_all(), &mut rng);
    play_round(
        &mut session,
        vec![ActionRequest::attack(0), ActionRequest::idle(), ActionRequest::idle()],
        &mut rng,
    );

    let log = session.log();
    assert_eq!(log[0], "--- Round 1 ---");
    assert!(log.iter().any(|line| line == "--- Round 2 ---"));
    assert!(log
        .last()
        .is_some_and(|line| line.starts_with("[YOU] Ruby Warrior attacks Quartz King")));

    assert_eq!(session.last_log(1), &log[log.len() - 1..]);
    assert_eq!(session.last_log(100).len(), log.len());
    assert!(session.last_log(0).is_empty());
}

#[test]
fn test_match_runs_to_completion() {
    let mut rng = XorShiftRng::seed_from_u64(2024);
    let mut session = new_session();

    for _ in 0..500 {
        if session.is_match_over() {
            break;
        }
        session.submit_auto(Side::Player, &mut rng).unwrap();
        session.submit_auto(Side::Opponent, &mut rng).unwrap();
        session.resolve_round(&mut rng).unwrap();
        assert_health_in_bounds(session.state());
    }

    let outcome = session.outcome().unwrap();
    let winner = outcome.winner().unwrap();
    assert!(session.state().is_defeated(winner.other()));
    assert!(!session.state().is_defeated(winner));

    let expected = CombatEvent::MatchEnd { outcome }.to_string();
    assert_eq!(session.last_log(1)[0], expected);

    assert_eq!(session.resolve_round(&mut rng).unwrap_err(), GameError::MatchOver);
    assert_eq!(
        session.submit_actions(Side::Player, idle_all()).unwrap_err(),
        GameError::MatchOver
    );
    assert_eq!(session.submit_auto(Side::Opponent, &mut rng).unwrap_err(), GameError::MatchOver);
}

#[test]
fn test_start_match_resets_everything() {
    let mut rng = XorShiftRng::seed_from_u64(6);
    let mut session = new_session();
    play_round(
        &mut session,
        vec![ActionRequest::cast(Move::HealAll), ActionRequest::idle(), ActionRequest::idle()],
        &mut rng,
    );
    session.submit_actions(Side::Player, idle_all()).unwrap();
    assert_eq!(session.heal_charges(Side::Player), 2);

    session
        .start_match(&[Kind::King, Kind::Assassin, Kind::Brawler], &PLAYER)
        .unwrap();

    assert_eq!(session.round(), 1);
    assert_eq!(session.heal_charges(Side::Player), 3);
    assert!(session.log().is_empty());
    assert!(!session.has_submitted(Side::Player));
    assert_eq!(session.state().player[0].kind, Kind::King);
    assert!(session.state().player[0].last_non_attack_move.is_none());
}

#[test]
fn test_simultaneous_wipe_is_a_draw() {
    let mut state = BattleState::new(&PLAYER, &OPPONENT);
    for side in Side::BOTH {
        for unit in state.roster_mut(side).iter_mut() {
            unit.health = 0;
        }
    }
    assert_eq!(state.outcome(), Some(MatchOutcome::Draw));
    assert_eq!(MatchOutcome::Draw.winner(), None);
}
