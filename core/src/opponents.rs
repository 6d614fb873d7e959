//! Built-in action selection
//!
//! A table-driven heuristic that produces a full action batch for either
//! side. It reads the battle state but never mutates it; heal charges are
//! reserved against a local counter only.

use alloc::vec::Vec;

use crate::combatant::Combatant;
use crate::rng::BattleRng;
use crate::state::{living_indices, BattleState, ROSTER_SIZE};
use crate::types::{ActionRequest, Kind, Move, Side};

/// An ally below this share of its max health gets Heal One
pub const HEAL_THRESHOLD_PERCENT: u32 = 35;
/// Proposals tried before giving up on the repetition rule
pub const MAX_ATTEMPTS: u32 = 20;

/// One action per roster slot for `side`, obeying the repetition rule.
///
/// Dead combatants get Idle.
pub fn choose_actions<R: BattleRng>(
    state: &BattleState,
    side: Side,
    rng: &mut R,
) -> Vec<ActionRequest> {
    let allies = state.roster(side);
    let foes = state.roster(side.other());
    let mut charges = state.heal_charges(side);

    let mut actions = Vec::with_capacity(allies.len());
    for actor in allies {
        if !actor.is_alive() {
            actions.push(ActionRequest::idle());
            continue;
        }
        let request = pick_action(actor, allies, foes, charges, rng);
        if request.action.is_heal() {
            charges = charges.saturating_sub(1);
        }
        actions.push(request);
    }
    actions
}

fn pick_action<R: BattleRng>(
    actor: &Combatant,
    allies: &[Combatant],
    foes: &[Combatant],
    charges: u32,
    rng: &mut R,
) -> ActionRequest {
    for _ in 0..MAX_ATTEMPTS {
        let candidate = propose(actor, allies, foes, charges, rng);
        if !actor.repeats(candidate.action) {
            return candidate;
        }
    }
    attack_random(foes, rng)
}

fn propose<R: BattleRng>(
    actor: &Combatant,
    allies: &[Combatant],
    foes: &[Combatant],
    charges: u32,
    rng: &mut R,
) -> ActionRequest {
    if charges > 0 {
        if let Some(slot) = wounded_ally(allies) {
            return ActionRequest::targeted(Move::HealOne, slot as u8);
        }
    }

    let profile = actor.profile();
    let tactics = if charges > 0 {
        profile.tactics
    } else {
        profile.exhausted_tactics
    };
    if tactics.is_empty() {
        return attack_random(foes, rng);
    }

    let draw = rng.gen_range(100) as u32;
    match tactics.iter().find(|t| draw < t.threshold).map(|t| t.action) {
        Some(Move::StunPunch) => {
            let fresh: Vec<usize> = living_indices(foes)
                .into_iter()
                .filter(|&i| !foes[i].stunned)
                .collect();
            match rng.choose(&fresh) {
                Some(&target) => ActionRequest::targeted(Move::StunPunch, target as u8),
                None => attack_random(foes, rng),
            }
        }
        Some(Move::VitalStab) => match rng.choose(&living_indices(foes)) {
            Some(&target) => ActionRequest::targeted(Move::VitalStab, target as u8),
            None => attack_random(foes, rng),
        },
        Some(action) => ActionRequest::cast(action),
        None => attack_random(foes, rng),
    }
}

/// The living ally with the least health, if it is below the heal threshold.
/// Ties go to the earlier slot.
fn wounded_ally(allies: &[Combatant]) -> Option<usize> {
    let mut lowest: Option<usize> = None;
    for (index, ally) in allies.iter().enumerate() {
        if !ally.is_alive() {
            continue;
        }
        match lowest {
            Some(current) if allies[current].health <= ally.health => {}
            _ => lowest = Some(index),
        }
    }
    lowest.filter(|&i| {
        let ally = &allies[i];
        (ally.health as u64) * 100 < (ally.max_health as u64) * HEAL_THRESHOLD_PERCENT as u64
    })
}

fn attack_random<R: BattleRng>(foes: &[Combatant], rng: &mut R) -> ActionRequest {
    match rng.choose(&living_indices(foes)) {
        Some(&target) => ActionRequest::attack(target as u8),
        None => ActionRequest::new(Move::Attack, None),
    }
}

/// Three distinct kinds drawn uniformly
pub fn random_roster<R: BattleRng>(rng: &mut R) -> Vec<Kind> {
    let mut pool = Kind::ALL.to_vec();
    let mut roster = Vec::with_capacity(ROSTER_SIZE);
    for _ in 0..ROSTER_SIZE {
        let pick = rng.gen_range(pool.len());
        roster.push(pool.remove(pick));
    }
    roster
}
