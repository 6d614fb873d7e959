//! Logging utilities
//!
//! Thin helpers over the `log` facade so call sites stay one line. Nothing is
//! emitted unless the embedding binary installs a logger.

use crate::battle::RoundPhase;
use crate::error::GameError;
use crate::state::BattleState;
use crate::status::StatusKind;
use crate::types::{Kind, MatchOutcome, Side};

const TARGET: &str = "gembattle";

/// Log a new match
#[inline]
pub fn match_started(player: &[Kind], opponent: &[Kind]) {
    ::log::info!(target: TARGET, "=== MATCH STARTED === player={:?} opponent={:?}", player, opponent);
}

/// Log the final outcome
#[inline]
pub fn match_ended(round: u32, outcome: MatchOutcome) {
    ::log::info!(target: TARGET, "=== MATCH OVER === after round {}: {:?}", round, outcome);
}

/// Log a phase transition
#[inline]
pub fn phase(round: u32, phase: RoundPhase) {
    ::log::debug!(target: TARGET, "[round {}] {:?}", round, phase);
}

/// Log an action being performed
#[inline]
pub fn action(name: &str, details: &str) {
    ::log::trace!(target: TARGET, "[ACTION] {} -> {}", name, details);
}

/// Log a status wearing off
#[inline]
pub fn expired(name: &str, kind: StatusKind) {
    ::log::trace!(target: TARGET, "{} loses {:?}", name, kind);
}

/// Log a rejected submission
#[inline]
pub fn rejected(side: Side, err: &GameError) {
    ::log::warn!(target: TARGET, "{} submission rejected: {}", side, err);
}

/// Log both sides' health and heal charges
pub fn round_summary(state: &BattleState) {
    if !::log::log_enabled!(target: TARGET, ::log::Level::Debug) {
        return;
    }
    for side in Side::BOTH {
        let health: alloc::vec::Vec<u32> = state.roster(side).iter().map(|c| c.health).collect();
        ::log::debug!(
            target: TARGET,
            "[{}] health={:?} heal_charges={}",
            side,
            health,
            state.heal_charges(side)
        );
    }
}
