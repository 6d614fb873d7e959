//! Round resolution engine for 3v3 gem battles.
//!
//! [`BattleSession`] is the entry point: start a match from two rosters,
//! submit one action per combatant for each side, then resolve the round.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod abilities;
pub mod battle;
pub mod combatant;
pub mod engine;
pub mod error;
mod log;
pub mod opponents;
pub mod rng;
pub mod state;
pub mod status;
pub mod types;
pub mod units;
pub mod view;

#[cfg(test)]
mod tests;

pub use battle::{CombatEvent, FailReason, RoundPhase, UnitRef};
pub use combatant::Combatant;
pub use engine::{BattleSession, RoundReport};
pub use error::{GameError, GameResult};
pub use opponents::{choose_actions, random_roster};
pub use rng::{BattleRng, XorShiftRng};
pub use state::*;
pub use status::{StatusEffect, StatusEffects, StatusKind};
pub use types::*;
pub use units::{profile, spawn, KindProfile};
pub use view::*;
