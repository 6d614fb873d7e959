mod determinism;
mod session;

use std::collections::VecDeque;

use crate::battle::{resolve_round, CombatEvent};
use crate::rng::BattleRng;
use crate::state::BattleState;
use crate::types::*;

// ==========================================
// HELPER FUNCTIONS (Boilerplate Reduction)
// ==========================================

/// RNG that replays queued draws.
///
/// `roll` clamps the next queued value into range and returns `high` once the
/// queue is empty, so an empty script means max damage and no crits.
/// `next_u32` returns 0 when empty, so fallback picks land on the first
/// candidate.
pub struct ScriptedRng {
    draws: VecDeque<u32>,
}

impl ScriptedRng {
    pub fn new(draws: &[u32]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::new(&[])
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl BattleRng for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.draws.pop_front().unwrap_or(0)
    }

    fn roll(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        match self.draws.pop_front() {
            Some(value) => value.clamp(low, high),
            None => high,
        }
    }
}

fn create_state(player: [Kind; 3], opponent: [Kind; 3]) -> BattleState {
    BattleState::new(&player, &opponent)
}

fn idle_all() -> Vec<ActionRequest> {
    vec![ActionRequest::idle(); 3]
}

fn run_round(
    state: &mut BattleState,
    player: &[ActionRequest],
    opponent: &[ActionRequest],
    rng: &mut ScriptedRng,
) -> Vec<CombatEvent> {
    resolve_round(state, player, opponent, rng)
}

fn run_idle_round(state: &mut BattleState) -> Vec<CombatEvent> {
    run_round(state, &idle_all(), &idle_all(), &mut ScriptedRng::empty())
}

/// Attacks in the event list made by `side`
fn attacks_by(events: &[CombatEvent], side: Side) -> Vec<&CombatEvent> {
    events
        .iter()
        .filter(|e| matches!(e, CombatEvent::Attack { actor, .. } if actor.side == side))
        .collect()
}

fn assert_health_in_bounds(state: &BattleState) {
    for side in Side::BOTH {
        for unit in state.roster(side) {
            assert!(
                unit.health <= unit.max_health,
                "{} has {} of {} health",
                unit.name,
                unit.health,
                unit.max_health
            );
        }
    }
}
