use alloc::string::{String, ToString};

use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::state::SPEED_BUFF_BONUS;
use crate::status::{StatusEffects, StatusKind};
use crate::types::{Kind, Move};
use crate::units::{profile, KindProfile};

/// A combatant instance in a running match.
///
/// Base stats are copied from the kind's template when the match starts so
/// templates are never shared between matches.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combatant {
    pub kind: Kind,
    pub name: String,
    pub max_health: u32,
    /// Always within [0, max_health]; 0 means dead.
    pub health: u32,
    pub base_speed: u32,
    pub crit_chance: u32,
    pub crit_amp: u32,
    pub statuses: StatusEffects,
    /// Next attack crits, consumed on use (Sharp Aim)
    pub guaranteed_crit: bool,
    /// Skips the next action, then clears (Stun Punch)
    pub stunned: bool,
    /// Absorbs the next attack aimed at this side's King (Die For Me)
    pub protector: bool,
    pub acted_this_round: bool,
    /// Last executed move other than Attack, Idle included
    pub last_non_attack_move: Option<Move>,
}

impl Combatant {
    pub fn from_profile(profile: &KindProfile) -> Self {
        Self {
            kind: profile.kind,
            name: profile.name.to_string(),
            max_health: profile.max_health,
            health: profile.max_health,
            base_speed: profile.speed,
            crit_chance: profile.crit_chance,
            crit_amp: profile.crit_amp,
            statuses: StatusEffects::new(),
            guaranteed_crit: false,
            stunned: false,
            protector: false,
            acted_this_round: false,
            last_non_attack_move: None,
        }
    }

    pub fn profile(&self) -> &'static KindProfile {
        profile(self.kind)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Base speed plus any active speed bonus
    pub fn effective_speed(&self) -> u32 {
        let bonus = self.statuses.magnitude(StatusKind::TeamSpeed).max(0) as u32;
        self.base_speed.saturating_add(bonus)
    }

    /// Crit chance in percent, accounting for the team crit buff
    pub fn effective_crit_chance(&self) -> u32 {
        if self.statuses.is_active(StatusKind::TeamCrit) {
            crate::state::TEAM_CRIT_CHANCE
        } else {
            self.crit_chance
        }
    }

    /// Applies damage, saturating at zero. Returns the health actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_sub(amount);
        before - self.health
    }

    /// Heals up to max health. Returns the health actually restored.
    ///
    /// Dead combatants are never revived.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health - before
    }

    /// Whether submitting `action` would break the repetition rule
    pub fn repeats(&self, action: Move) -> bool {
        action.is_restricted() && self.last_non_attack_move == Some(action)
    }

    /// Idle overwrites the memory, so it clears a previous signature move
    pub(crate) fn record_move(&mut self, action: Move) {
        if action != Move::Attack {
            self.last_non_attack_move = Some(action);
        }
    }

    pub fn apply_speed_buff(&mut self, turns: u32) {
        self.statuses.set(StatusKind::TeamSpeed, turns, SPEED_BUFF_BONUS);
    }
}
