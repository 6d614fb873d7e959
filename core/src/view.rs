//! View types for presentation layers
//!
//! Read-only snapshots of a match. Nothing here can mutate a combatant.

use alloc::string::String;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::combatant::Combatant;
use crate::state::BattleState;
use crate::status::StatusEffect;
use crate::types::{Kind, MatchOutcome, Move, Side};

/// Snapshot of one combatant
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatantView {
    pub kind: Kind,
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub alive: bool,
    /// Base speed plus active bonus
    pub speed: u32,
    pub crit_chance: u32,
    /// Active timed effects with remaining rounds
    pub statuses: Vec<StatusEffect>,
    pub guaranteed_crit: bool,
    pub stunned: bool,
    pub protector: bool,
    pub last_move: Option<Move>,
}

impl From<&Combatant> for CombatantView {
    fn from(unit: &Combatant) -> Self {
        Self {
            kind: unit.kind,
            name: unit.name.clone(),
            health: unit.health,
            max_health: unit.max_health,
            alive: unit.is_alive(),
            speed: unit.effective_speed(),
            crit_chance: unit.effective_crit_chance(),
            statuses: unit.statuses.iter().copied().collect(),
            guaranteed_crit: unit.guaranteed_crit,
            stunned: unit.stunned,
            protector: unit.protector,
            last_move: unit.last_non_attack_move,
        }
    }
}

/// Snapshot of one side
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterView {
    pub side: Side,
    pub combatants: Vec<CombatantView>,
    pub heal_charges: u32,
}

impl RosterView {
    pub fn from_state(state: &BattleState, side: Side) -> Self {
        Self {
            side,
            combatants: state.roster(side).iter().map(CombatantView::from).collect(),
            heal_charges: state.heal_charges(side),
        }
    }

    pub fn living(&self) -> usize {
        self.combatants.iter().filter(|c| c.alive).count()
    }
}

/// The complete match view
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub round: u32,
    pub player: RosterView,
    pub opponent: RosterView,
    pub outcome: Option<MatchOutcome>,
}

impl SessionView {
    pub fn from_state(state: &BattleState) -> Self {
        Self {
            round: state.round,
            player: RosterView::from_state(state, Side::Player),
            opponent: RosterView::from_state(state, Side::Opponent),
            outcome: state.outcome(),
        }
    }

    pub fn roster(&self, side: Side) -> &RosterView {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }
}
