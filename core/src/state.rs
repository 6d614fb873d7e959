use alloc::vec::Vec;

use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::combatant::Combatant;
use crate::types::{Kind, MatchOutcome, Side};
use crate::units::spawn;

/// Combatants per roster
pub const ROSTER_SIZE: usize = 3;
/// Heal charges each side starts a match with
pub const STARTING_HEAL_CHARGES: u32 = 3;
/// Round number of a fresh match
pub const FIRST_ROUND: u32 = 1;

/// Crit chance granted by Heroic Raise
pub const TEAM_CRIT_CHANCE: u32 = 30;
pub const TEAM_CRIT_TURNS: u32 = 3;
/// Flat speed bonus granted by Sneak Boost
pub const SPEED_BUFF_BONUS: i32 = 20;
pub const SPEED_BUFF_TURNS: u32 = 3;
pub const CRIT_IMMUNITY_TURNS: u32 = 5;
pub const DAMAGE_RESIST_TURNS: u32 = 2;
pub const KINGS_COMMAND_TURNS: u32 = 2;

/// Percent of max health restored by Heal All / Heal One
pub const HEAL_ALL_PERCENT: u32 = 30;
pub const HEAL_ONE_PERCENT: u32 = 75;

/// The mutable world of one match
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleState {
    pub player: Vec<Combatant>,
    pub opponent: Vec<Combatant>,
    pub player_heal_charges: u32,
    pub opponent_heal_charges: u32,
    /// Current round number (1-indexed)
    pub round: u32,
}

impl BattleState {
    /// Fresh state from two kind lists. Rosters are validated by the session.
    pub fn new(player: &[Kind], opponent: &[Kind]) -> Self {
        Self {
            player: player.iter().copied().map(spawn).collect(),
            opponent: opponent.iter().copied().map(spawn).collect(),
            player_heal_charges: STARTING_HEAL_CHARGES,
            opponent_heal_charges: STARTING_HEAL_CHARGES,
            round: FIRST_ROUND,
        }
    }

    pub fn roster(&self, side: Side) -> &[Combatant] {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn roster_mut(&mut self, side: Side) -> &mut Vec<Combatant> {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// Both rosters at once, the acting side first
    pub fn split_mut(&mut self, side: Side) -> (&mut Vec<Combatant>, &mut Vec<Combatant>) {
        match side {
            Side::Player => (&mut self.player, &mut self.opponent),
            Side::Opponent => (&mut self.opponent, &mut self.player),
        }
    }

    pub fn heal_charges(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_heal_charges,
            Side::Opponent => self.opponent_heal_charges,
        }
    }

    /// Spends one heal charge. Returns false when none are left.
    pub fn spend_heal_charge(&mut self, side: Side) -> bool {
        let charges = match side {
            Side::Player => &mut self.player_heal_charges,
            Side::Opponent => &mut self.opponent_heal_charges,
        };
        if *charges == 0 {
            return false;
        }
        *charges -= 1;
        true
    }

    pub fn is_defeated(&self, side: Side) -> bool {
        self.roster(side).iter().all(|c| !c.is_alive())
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        match (self.is_defeated(Side::Player), self.is_defeated(Side::Opponent)) {
            (false, false) => None,
            (false, true) => Some(MatchOutcome::PlayerVictory),
            (true, false) => Some(MatchOutcome::OpponentVictory),
            (true, true) => Some(MatchOutcome::Draw),
        }
    }

    pub fn all_combatants_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        self.player.iter_mut().chain(self.opponent.iter_mut())
    }
}

/// Indices of living combatants in a roster
pub fn living_indices(roster: &[Combatant]) -> Vec<usize> {
    roster
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_alive())
        .map(|(i, _)| i)
        .collect()
}
