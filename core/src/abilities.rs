//! Ability rules.
//!
//! Each function computes and applies the effect of one named move on the
//! combatants it is handed. None of them know about turn order, the
//! repetition rule, heal charges or log formatting; the resolver in
//! `battle.rs` owns those.

use alloc::vec::Vec;

use crate::combatant::Combatant;
use crate::rng::BattleRng;
use crate::state::{
    CRIT_IMMUNITY_TURNS, DAMAGE_RESIST_TURNS, HEAL_ALL_PERCENT, HEAL_ONE_PERCENT,
    KINGS_COMMAND_TURNS, SPEED_BUFF_TURNS, TEAM_CRIT_TURNS,
};
use crate::status::StatusKind;
use crate::types::Kind;

pub const DAMAGE_BUFF_PERCENT: u32 = 120;
pub const RESIST_BUFF_PERCENT: u32 = 80;
pub const DAMAGE_RESIST_PERCENT: u32 = 70;

pub const ARROW_SHOWER_ROLL: (u32, u32) = (50, 70);
pub const STUN_PUNCH_DAMAGE: u32 = 90;
pub const VITAL_STAB_DAMAGE: u32 = 60;
/// Percent of the assassin's own max health restored by Vital Stab
pub const VITAL_STAB_HEAL_PERCENT: u32 = 10;

/// Outcome of a single-target attack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub damage: u32,
    pub crit: bool,
}

/// Multiplies by `percent / 100`, truncating.
pub fn scale(amount: u32, percent: u32) -> u32 {
    (amount as u64 * percent as u64 / 100) as u32
}

/// Rolls a plain attack from `attacker` against `target` without applying it.
///
/// The multipliers are applied one after another with truncation in between,
/// so their order matters: crit, attacker damage buff, target resist buff,
/// target damage resist. A set guaranteed-crit flag is consumed here even if
/// the target's crit immunity cancels the crit.
pub fn attack<R: BattleRng>(attacker: &mut Combatant, target: &Combatant, rng: &mut R) -> Hit {
    let (low, high) = attacker.profile().attack;
    let mut damage = rng.roll(low, high);

    let mut crit = if attacker.guaranteed_crit {
        true
    } else {
        rng.percent(attacker.effective_crit_chance())
    };
    if target.statuses.is_active(StatusKind::CritImmunity) {
        crit = false;
    }

    if crit {
        damage = scale(damage, 100 + attacker.crit_amp);
    }
    if attacker.statuses.is_active(StatusKind::DamageBuff) {
        damage = scale(damage, DAMAGE_BUFF_PERCENT);
    }
    if target.statuses.is_active(StatusKind::ResistBuff) {
        damage = scale(damage, RESIST_BUFF_PERCENT);
    }
    if target.statuses.is_active(StatusKind::DamageResist) {
        damage = scale(damage, DAMAGE_RESIST_PERCENT);
    }

    attacker.guaranteed_crit = false;
    Hit { damage, crit }
}

/// Reduction applied to fixed and area ability damage: damage resist, then
/// resist buff. Never crits and ignores the caster's damage buff.
pub fn reduce_ability_damage(amount: u32, target: &Combatant) -> u32 {
    let mut damage = amount;
    if target.statuses.is_active(StatusKind::DamageResist) {
        damage = scale(damage, DAMAGE_RESIST_PERCENT);
    }
    if target.statuses.is_active(StatusKind::ResistBuff) {
        damage = scale(damage, RESIST_BUFF_PERCENT);
    }
    damage
}

/// Arrow Shower: an independent 50-70 roll against every living opponent.
///
/// Returns `(index, damage)` per opponent hit, in roster order.
pub fn arrow_shower<R: BattleRng>(opponents: &mut [Combatant], rng: &mut R) -> Vec<(usize, u32)> {
    let (low, high) = ARROW_SHOWER_ROLL;
    let mut hits = Vec::new();
    for (index, target) in opponents.iter_mut().enumerate() {
        if !target.is_alive() {
            continue;
        }
        let damage = reduce_ability_damage(rng.roll(low, high), target);
        target.take_damage(damage);
        hits.push((index, damage));
    }
    hits
}

/// Stun Punch: flat damage and the target skips its next action.
pub fn stun_punch(target: &mut Combatant) -> u32 {
    let damage = reduce_ability_damage(STUN_PUNCH_DAMAGE, target);
    target.take_damage(damage);
    target.stunned = true;
    damage
}

/// Vital Stab: flat damage, then the actor heals 10% of its own max health.
///
/// Returns `(damage dealt, health restored)`.
pub fn vital_stab(actor: &mut Combatant, target: &mut Combatant) -> (u32, u32) {
    let damage = reduce_ability_damage(VITAL_STAB_DAMAGE, target);
    target.take_damage(damage);
    let healed = actor.heal(scale(actor.max_health, VITAL_STAB_HEAL_PERCENT));
    (damage, healed)
}

/// Heroic Raise: team crit buff on every living ally, caster included.
pub fn heroic_raise(allies: &mut [Combatant]) {
    for ally in allies.iter_mut().filter(|a| a.is_alive()) {
        ally.statuses.set(StatusKind::TeamCrit, TEAM_CRIT_TURNS, 0);
    }
}

/// Sneak Boost: team speed buff on every living ally, caster included.
pub fn sneak_boost(allies: &mut [Combatant]) {
    for ally in allies.iter_mut().filter(|a| a.is_alive()) {
        ally.apply_speed_buff(SPEED_BUFF_TURNS);
    }
}

pub fn ruby_shield(actor: &mut Combatant) {
    actor
        .statuses
        .set(StatusKind::CritImmunity, CRIT_IMMUNITY_TURNS, 0);
}

pub fn sharp_aim(actor: &mut Combatant) {
    actor.guaranteed_crit = true;
}

pub fn shiny_flex(actor: &mut Combatant) {
    actor
        .statuses
        .set(StatusKind::DamageResist, DAMAGE_RESIST_TURNS, 0);
}

/// Die For Me: marks the healthiest living ally of a different kind as the
/// caster's protector. Ties go to the earlier roster slot.
///
/// Returns the protector's index, or `None` when no ally qualifies.
pub fn die_for_me(caster_kind: Kind, allies: &mut [Combatant]) -> Option<usize> {
    let mut chosen: Option<usize> = None;
    for (index, ally) in allies.iter().enumerate() {
        if !ally.is_alive() || ally.kind == caster_kind {
            continue;
        }
        match chosen {
            Some(best) if allies[best].health >= ally.health => {}
            _ => chosen = Some(index),
        }
    }
    if let Some(index) = chosen {
        allies[index].protector = true;
    }
    chosen
}

/// King's Command: damage and resist buffs on the caster.
///
/// Fails without effect if either buff is still running.
pub fn kings_command(actor: &mut Combatant) -> bool {
    if actor.statuses.is_active(StatusKind::DamageBuff)
        || actor.statuses.is_active(StatusKind::ResistBuff)
    {
        return false;
    }
    actor
        .statuses
        .set(StatusKind::DamageBuff, KINGS_COMMAND_TURNS, 0);
    actor
        .statuses
        .set(StatusKind::ResistBuff, KINGS_COMMAND_TURNS, 0);
    true
}

/// Heal All: 30% of each living ally's max health.
///
/// Returns `(index, restored)` per living ally.
pub fn heal_all(allies: &mut [Combatant]) -> Vec<(usize, u32)> {
    allies
        .iter_mut()
        .enumerate()
        .filter(|(_, ally)| ally.is_alive())
        .map(|(index, ally)| {
            let amount = scale(ally.max_health, HEAL_ALL_PERCENT);
            (index, ally.heal(amount))
        })
        .collect()
}

/// Heal One: 75% of the target's max health.
pub fn heal_one(target: &mut Combatant) -> u32 {
    let amount = scale(target.max_health, HEAL_ONE_PERCENT);
    target.heal(amount)
}
