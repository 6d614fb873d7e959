//! Duration-based status effects.
//!
//! Every timed buff a combatant can hold is a tagged [`StatusEffect`] with a
//! kind, the number of rounds it still has to run, and an optional magnitude.
//! Decay is one uniform pass over the set: an effect whose counter reaches
//! zero is removed, which clears its magnitude in the same step.
//!
//! One-shot flags (stun, protector mark, guaranteed crit) are not status
//! effects; they are consumed on use and never decay.

use alloc::vec::Vec;

use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Kinds of timed effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusKind {
    /// Incoming attacks cannot crit (Ruby Shield).
    CritImmunity,
    /// Incoming damage reduced by 30% (Shiny Flex).
    DamageResist,
    /// Crit chance becomes 30% (Heroic Raise, team-wide).
    TeamCrit,
    /// Flat speed bonus equal to the magnitude (Sneak Boost, team-wide).
    TeamSpeed,
    /// Outgoing attack damage +20% (King's Command).
    DamageBuff,
    /// Incoming attack damage -20% (King's Command).
    ResistBuff,
}

/// A single active effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Rounds left; always > 0 while the effect is stored.
    pub remaining: u32,
    pub magnitude: i32,
}

/// Active status effects on one combatant. At most one entry per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct StatusEffects {
    effects: Vec<StatusEffect>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets (or refreshes) an effect. A zero duration removes it.
    pub fn set(&mut self, kind: StatusKind, turns: u32, magnitude: i32) {
        self.effects.retain(|e| e.kind != kind);
        if turns > 0 {
            self.effects.push(StatusEffect {
                kind,
                remaining: turns,
                magnitude,
            });
        }
    }

    pub fn is_active(&self, kind: StatusKind) -> bool {
        self.get(kind).is_some()
    }

    /// Rounds left on an effect, 0 when inactive.
    pub fn remaining(&self, kind: StatusKind) -> u32 {
        self.get(kind).map_or(0, |e| e.remaining)
    }

    /// Magnitude of an effect, 0 when inactive.
    pub fn magnitude(&self, kind: StatusKind) -> i32 {
        self.get(kind).map_or(0, |e| e.magnitude)
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Decrements every counter by one and drops the ones that hit zero.
    ///
    /// Returns the kinds that expired during this tick.
    pub fn tick(&mut self) -> Vec<StatusKind> {
        let mut expired = Vec::new();
        for effect in self.effects.iter_mut() {
            effect.remaining = effect.remaining.saturating_sub(1);
            if effect.remaining == 0 {
                expired.push(effect.kind);
            }
        }
        self.effects.retain(|e| e.remaining > 0);
        expired
    }
}
