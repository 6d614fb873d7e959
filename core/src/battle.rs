use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::abilities;
use crate::combatant::Combatant;
use crate::error::{GameError, GameResult};
use crate::log;
use crate::rng::BattleRng;
use crate::state::{living_indices, BattleState, HEAL_ALL_PERCENT, HEAL_ONE_PERCENT};
use crate::types::{ActionRequest, Kind, MatchOutcome, Move, Side};

/// Phases one round walks through, always in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundPhase {
    AwaitingActions,
    HealPhase,
    OrderingPhase,
    ExecutionPhase,
    DecayPhase,
    RoundComplete,
}

/// A combatant as named in an event
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitRef {
    pub side: Side,
    pub slot: u8,
    pub name: String,
}

impl UnitRef {
    fn new(side: Side, slot: usize, combatant: &Combatant) -> Self {
        Self {
            side,
            slot: slot as u8,
            name: combatant.name.clone(),
        }
    }
}

/// Why a conditional move had no effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailReason {
    /// Die For Me found no living ally of another kind
    NoProtector,
    /// King's Command while its buffs are still running
    AlreadyActive,
    /// No living opponent left to aim at
    NoTarget,
}

/// Everything that happened during a round, in order.
///
/// The human-readable log is the `Display` rendering of these events.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum CombatEvent {
    RoundStart {
        round: u32,
    },
    HealAll {
        actor: UnitRef,
        restored: u32,
    },
    HealOne {
        actor: UnitRef,
        target: UnitRef,
        restored: u32,
    },
    /// A heal was chosen with no charges left
    HealFailed {
        actor: UnitRef,
        action: Move,
    },
    Stunned {
        actor: UnitRef,
    },
    /// A protector absorbed an attack aimed at its King
    Redirect {
        protector: UnitRef,
        king: UnitRef,
    },
    Attack {
        actor: UnitRef,
        target: UnitRef,
        damage: u32,
        crit: bool,
    },
    /// A buff or area move was used
    AbilityUsed {
        actor: UnitRef,
        action: Move,
    },
    AreaDamage {
        target: UnitRef,
        damage: u32,
    },
    StunPunch {
        actor: UnitRef,
        target: UnitRef,
        damage: u32,
    },
    VitalStab {
        actor: UnitRef,
        target: UnitRef,
        damage: u32,
        healed: u32,
    },
    ProtectorMarked {
        actor: UnitRef,
        protector: UnitRef,
    },
    MoveFailed {
        actor: UnitRef,
        action: Move,
        reason: FailReason,
    },
    Defeated {
        unit: UnitRef,
    },
    MatchEnd {
        outcome: MatchOutcome,
    },
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatEvent::RoundStart { round } => write!(f, "--- Round {} ---", round),
            CombatEvent::HealAll { actor, restored } => write!(
                f,
                "[{}] {} used Heal All ({}%), restoring {} HP.",
                actor.side, actor.name, HEAL_ALL_PERCENT, restored
            ),
            CombatEvent::HealOne {
                actor,
                target,
                restored,
            } => write!(
                f,
                "[{}] {} used Heal One on {} ({}%), restoring {} HP.",
                actor.side, actor.name, target.name, HEAL_ONE_PERCENT, restored
            ),
            CombatEvent::HealFailed { actor, action } => write!(
                f,
                "[{}] {} tried {} but no heal charges remain.",
                actor.side, actor.name, action
            ),
            CombatEvent::Stunned { actor } => write!(
                f,
                "[{}] {} is stunned and cannot act this round.",
                actor.side, actor.name
            ),
            CombatEvent::Redirect { protector, king } => write!(
                f,
                "[{}] {} takes the hit for {}.",
                protector.side, protector.name, king.name
            ),
            CombatEvent::Attack {
                actor,
                target,
                damage,
                crit,
            } => write!(
                f,
                "[{}] {} attacks {} for {}{}.",
                actor.side,
                actor.name,
                target.name,
                damage,
                if *crit { " (CRIT)" } else { "" }
            ),
            CombatEvent::AbilityUsed { actor, action } => {
                write!(f, "[{}] {} uses {}.", actor.side, actor.name, action)
            }
            CombatEvent::AreaDamage { target, damage } => {
                write!(f, "  -> {} takes {} area damage.", target.name, damage)
            }
            CombatEvent::StunPunch {
                actor,
                target,
                damage,
            } => write!(
                f,
                "[{}] {} hits {} with Stun Punch for {} and stuns them.",
                actor.side, actor.name, target.name, damage
            ),
            CombatEvent::VitalStab {
                actor,
                target,
                damage,
                healed,
            } => write!(
                f,
                "[{}] {} uses Vital Stab on {} for {} damage and heals {} HP.",
                actor.side, actor.name, target.name, damage, healed
            ),
            CombatEvent::ProtectorMarked { actor, protector } => write!(
                f,
                "[{}] {} uses Die For Me: {} will absorb the next hit aimed at {}.",
                actor.side, actor.name, protector.name, actor.name
            ),
            CombatEvent::MoveFailed {
                actor,
                action,
                reason,
            } => {
                let why = match reason {
                    FailReason::NoProtector => "no available protector",
                    FailReason::AlreadyActive => "buff already active",
                    FailReason::NoTarget => "no target left",
                };
                write!(
                    f,
                    "[{}] {} tried to use {} but it failed ({}).",
                    actor.side, actor.name, action, why
                )
            }
            CombatEvent::Defeated { unit } => {
                write!(f, "[{}] {} has been defeated.", unit.side, unit.name)
            }
            CombatEvent::MatchEnd { outcome } => match outcome {
                MatchOutcome::PlayerVictory => f.write_str("All CPU combatants defeated. YOU WIN!"),
                MatchOutcome::OpponentVictory => {
                    f.write_str("All your combatants are defeated. YOU LOSE.")
                }
                MatchOutcome::Draw => f.write_str("Both teams fell in the same round. DRAW."),
            },
        }
    }
}

/// One non-heal action with its ordering key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderEntry {
    pub side: Side,
    pub slot: usize,
    pub request: ActionRequest,
    pub speed: u32,
    /// Independent 1-100 draw, higher goes first on equal speed
    pub tiebreak: u32,
}

// ==========================================
// VALIDATION (AwaitingActions)
// ==========================================

/// Checks one side's submission against its roster.
///
/// Dead combatants are forced to Idle. Returns the normalized batch, or the
/// first violation found; nothing is mutated either way.
pub fn validate_actions(
    side: Side,
    roster: &[Combatant],
    actions: &[ActionRequest],
) -> GameResult<Vec<ActionRequest>> {
    if actions.len() != roster.len() {
        return Err(GameError::WrongActionCount {
            expected: roster.len() as u32,
            got: actions.len() as u32,
        });
    }

    let mut normalized = Vec::with_capacity(actions.len());
    for (slot, (actor, request)) in roster.iter().zip(actions).enumerate() {
        if !actor.is_alive() {
            normalized.push(ActionRequest::idle());
            continue;
        }
        if !actor.profile().allows(request.action) {
            return Err(GameError::MoveNotAvailable {
                side,
                slot: slot as u8,
                actor: actor.name.clone(),
                action: request.action,
            });
        }
        if actor.repeats(request.action) {
            return Err(GameError::RepeatedMove {
                side,
                slot: slot as u8,
                actor: actor.name.clone(),
                action: request.action,
            });
        }
        normalized.push(*request);
    }
    Ok(normalized)
}

// ==========================================
// MAIN ROUND RESOLVER
// ==========================================

/// Resolves one full round against already validated actions.
///
/// `player_actions` and `opponent_actions` must have one entry per roster
/// slot (see [`validate_actions`]).
pub fn resolve_round<R: BattleRng>(
    state: &mut BattleState,
    player_actions: &[ActionRequest],
    opponent_actions: &[ActionRequest],
    rng: &mut R,
) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    let round = state.round;
    events.push(CombatEvent::RoundStart { round });

    for combatant in state.all_combatants_mut() {
        combatant.acted_this_round = false;
    }

    log::phase(round, RoundPhase::HealPhase);
    execute_heal_phase(state, Side::Player, player_actions, &mut events, rng);
    execute_heal_phase(state, Side::Opponent, opponent_actions, &mut events, rng);

    log::phase(round, RoundPhase::OrderingPhase);
    let order = order_actions(state, player_actions, opponent_actions, rng);

    log::phase(round, RoundPhase::ExecutionPhase);
    for entry in &order {
        execute_entry(state, entry, &mut events, rng);
    }

    log::phase(round, RoundPhase::DecayPhase);
    execute_decay_phase(state);

    if let Some(outcome) = state.outcome() {
        events.push(CombatEvent::MatchEnd { outcome });
    }
    log::phase(round, RoundPhase::RoundComplete);
    log::round_summary(state);

    events
}

fn execute_heal_phase<R: BattleRng>(
    state: &mut BattleState,
    side: Side,
    actions: &[ActionRequest],
    events: &mut Vec<CombatEvent>,
    rng: &mut R,
) {
    for (slot, request) in actions.iter().enumerate() {
        if !request.action.is_heal() {
            continue;
        }
        let Some(actor) = state.roster(side).get(slot) else {
            continue;
        };
        if !actor.is_alive() {
            continue;
        }
        let actor_ref = UnitRef::new(side, slot, actor);

        if !state.spend_heal_charge(side) {
            log::action(&actor_ref.name, "heal attempted without charges");
            events.push(CombatEvent::HealFailed {
                actor: actor_ref,
                action: request.action,
            });
            continue;
        }

        let roster = state.roster_mut(side);
        match request.action {
            Move::HealAll => {
                let restored = abilities::heal_all(roster).iter().map(|(_, hp)| hp).sum();
                events.push(CombatEvent::HealAll {
                    actor: actor_ref,
                    restored,
                });
            }
            _ => {
                let Some(target) = pick_target(roster, request.target, rng) else {
                    continue;
                };
                let restored = abilities::heal_one(&mut roster[target]);
                events.push(CombatEvent::HealOne {
                    actor: actor_ref,
                    target: UnitRef::new(side, target, &roster[target]),
                    restored,
                });
            }
        }
        roster[slot].record_move(request.action);
    }
}

/// Collects every living non-heal action from both sides and sorts it by
/// effective speed, then by an independent tiebreak draw, both descending.
///
/// Tiebreaks are drawn in collection order: player slots first, then
/// opponent slots.
pub fn order_actions<R: BattleRng>(
    state: &BattleState,
    player_actions: &[ActionRequest],
    opponent_actions: &[ActionRequest],
    rng: &mut R,
) -> Vec<OrderEntry> {
    let mut entries = Vec::new();
    for (side, actions) in [(Side::Player, player_actions), (Side::Opponent, opponent_actions)] {
        for (slot, request) in actions.iter().enumerate() {
            let Some(actor) = state.roster(side).get(slot) else {
                continue;
            };
            if !actor.is_alive() || request.action.is_heal() {
                continue;
            }
            entries.push(OrderEntry {
                side,
                slot,
                request: *request,
                speed: actor.effective_speed(),
                tiebreak: rng.roll(1, 100),
            });
        }
    }

    entries.sort_by(|a, b| {
        b.speed
            .cmp(&a.speed)
            .then_with(|| b.tiebreak.cmp(&a.tiebreak))
    });
    entries
}

fn execute_entry<R: BattleRng>(
    state: &mut BattleState,
    entry: &OrderEntry,
    events: &mut Vec<CombatEvent>,
    rng: &mut R,
) {
    let side = entry.side;
    let slot = entry.slot;
    let action = entry.request.action;
    let (allies, opponents) = state.split_mut(side);

    let Some(actor) = allies.get_mut(slot) else {
        return;
    };
    if !actor.is_alive() || actor.acted_this_round {
        return;
    }
    let actor_ref = UnitRef::new(side, slot, actor);
    if actor.stunned {
        actor.stunned = false;
        actor.acted_this_round = true;
        events.push(CombatEvent::Stunned { actor: actor_ref });
        return;
    }
    log::action(&actor_ref.name, action.id());

    // Single-target moves resolve their target (with fallback) up front
    let target = if action.targets_opponent() {
        match pick_target(opponents, entry.request.target, rng) {
            Some(found) => found,
            None => {
                events.push(CombatEvent::MoveFailed {
                    actor: actor_ref,
                    action,
                    reason: FailReason::NoTarget,
                });
                let actor = &mut allies[slot];
                actor.record_move(action);
                actor.acted_this_round = true;
                return;
            }
        }
    } else {
        0
    };

    match action {
        Move::Attack => {
            let target = redirect_target(side.other(), opponents, target, events);
            let hit = abilities::attack(&mut allies[slot], &opponents[target], rng);
            opponents[target].take_damage(hit.damage);
            events.push(CombatEvent::Attack {
                actor: actor_ref,
                target: UnitRef::new(side.other(), target, &opponents[target]),
                damage: hit.damage,
                crit: hit.crit,
            });
            push_if_defeated(side.other(), opponents, target, events);
        }
        Move::StunPunch => {
            let damage = abilities::stun_punch(&mut opponents[target]);
            events.push(CombatEvent::StunPunch {
                actor: actor_ref,
                target: UnitRef::new(side.other(), target, &opponents[target]),
                damage,
            });
            push_if_defeated(side.other(), opponents, target, events);
        }
        Move::VitalStab => {
            let (damage, healed) = abilities::vital_stab(&mut allies[slot], &mut opponents[target]);
            events.push(CombatEvent::VitalStab {
                actor: actor_ref,
                target: UnitRef::new(side.other(), target, &opponents[target]),
                damage,
                healed,
            });
            push_if_defeated(side.other(), opponents, target, events);
        }
        Move::ArrowShower => {
            events.push(CombatEvent::AbilityUsed {
                actor: actor_ref,
                action,
            });
            for (target, damage) in abilities::arrow_shower(opponents, rng) {
                events.push(CombatEvent::AreaDamage {
                    target: UnitRef::new(side.other(), target, &opponents[target]),
                    damage,
                });
                push_if_defeated(side.other(), opponents, target, events);
            }
        }
        Move::HeroicRaise | Move::SneakBoost => {
            if action == Move::HeroicRaise {
                abilities::heroic_raise(allies);
            } else {
                abilities::sneak_boost(allies);
            }
            events.push(CombatEvent::AbilityUsed {
                actor: actor_ref,
                action,
            });
        }
        Move::RubyShield | Move::SharpAim | Move::ShinyFlex => {
            let caster = &mut allies[slot];
            match action {
                Move::RubyShield => abilities::ruby_shield(caster),
                Move::SharpAim => abilities::sharp_aim(caster),
                _ => abilities::shiny_flex(caster),
            }
            events.push(CombatEvent::AbilityUsed {
                actor: actor_ref,
                action,
            });
        }
        Move::DieForMe => {
            let caster_kind = allies[slot].kind;
            match abilities::die_for_me(caster_kind, allies) {
                Some(protector) => events.push(CombatEvent::ProtectorMarked {
                    protector: UnitRef::new(side, protector, &allies[protector]),
                    actor: actor_ref,
                }),
                None => events.push(CombatEvent::MoveFailed {
                    actor: actor_ref,
                    action,
                    reason: FailReason::NoProtector,
                }),
            }
        }
        Move::KingsCommand => {
            if abilities::kings_command(&mut allies[slot]) {
                events.push(CombatEvent::AbilityUsed {
                    actor: actor_ref,
                    action,
                });
            } else {
                events.push(CombatEvent::MoveFailed {
                    actor: actor_ref,
                    action,
                    reason: FailReason::AlreadyActive,
                });
            }
        }
        // Heals resolve in the heal phase and never reach the order
        Move::HealAll | Move::HealOne | Move::Idle => {}
    }

    let actor = &mut allies[slot];
    actor.record_move(action);
    actor.acted_this_round = true;
}

fn execute_decay_phase(state: &mut BattleState) {
    for combatant in state.all_combatants_mut() {
        for expired in combatant.statuses.tick() {
            log::expired(&combatant.name, expired);
        }
    }
    state.round += 1;
}

// ==========================================
// HELPERS
// ==========================================

/// The requested slot if it holds a living combatant, otherwise a random
/// living one. `None` only when the whole roster is down.
pub fn pick_target<R: BattleRng>(
    roster: &[Combatant],
    requested: Option<u8>,
    rng: &mut R,
) -> Option<usize> {
    if let Some(index) = requested.map(usize::from) {
        if roster.get(index).is_some_and(Combatant::is_alive) {
            return Some(index);
        }
    }
    rng.choose(&living_indices(roster)).copied()
}

/// Reroutes an attack aimed at a King to a living marked protector on the
/// King's side, consuming the mark.
fn redirect_target(
    defending_side: Side,
    defenders: &mut [Combatant],
    aimed: usize,
    events: &mut Vec<CombatEvent>,
) -> usize {
    if defenders[aimed].kind != Kind::King {
        return aimed;
    }
    let Some(protector) = defenders
        .iter()
        .position(|c| c.protector && c.is_alive() && c.kind != Kind::King)
    else {
        return aimed;
    };
    defenders[protector].protector = false;
    events.push(CombatEvent::Redirect {
        protector: UnitRef::new(defending_side, protector, &defenders[protector]),
        king: UnitRef::new(defending_side, aimed, &defenders[aimed]),
    });
    protector
}

fn push_if_defeated(
    side: Side,
    roster: &[Combatant],
    slot: usize,
    events: &mut Vec<CombatEvent>,
) {
    if !roster[slot].is_alive() {
        events.push(CombatEvent::Defeated {
            unit: UnitRef::new(side, slot, &roster[slot]),
        });
    }
}
