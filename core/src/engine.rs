//! Battle session
//!
//! Owns one match: both rosters, heal charges, the round counter, pending
//! submissions and the append-only log. Callers drive it with
//! `submit_actions` for each side followed by `resolve_round`.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use parity_scale_codec::Encode;
use serde::{Deserialize, Serialize};

use crate::battle::{resolve_round, validate_actions, CombatEvent, RoundPhase};
use crate::error::{GameError, GameResult};
use crate::log;
use crate::opponents::choose_actions;
use crate::rng::BattleRng;
use crate::state::{BattleState, ROSTER_SIZE};
use crate::types::{ActionRequest, Kind, MatchOutcome, Side};
use crate::view::SessionView;

/// What one call to [`BattleSession::resolve_round`] produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundReport {
    /// The round that was resolved
    pub round: u32,
    pub events: Vec<CombatEvent>,
    /// Log lines appended for this round
    pub lines: Vec<String>,
    /// State after the round
    pub view: SessionView,
}

impl RoundReport {
    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.view.outcome
    }
}

/// One match between two rosters
#[derive(Debug, Clone)]
pub struct BattleSession {
    state: BattleState,
    pending_player: Option<Vec<ActionRequest>>,
    pending_opponent: Option<Vec<ActionRequest>>,
    log: Vec<String>,
}

impl BattleSession {
    /// Create a session with a match already started
    pub fn new(player: &[Kind], opponent: &[Kind]) -> GameResult<Self> {
        validate_roster(player)?;
        validate_roster(opponent)?;
        log::match_started(player, opponent);
        Ok(Self {
            state: BattleState::new(player, opponent),
            pending_player: None,
            pending_opponent: None,
            log: Vec::new(),
        })
    }

    /// Throw away the current match and start a fresh one.
    ///
    /// Combatants are rebuilt from their templates, heal charges reset, the
    /// log cleared and the round set back to one.
    pub fn start_match(&mut self, player: &[Kind], opponent: &[Kind]) -> GameResult<()> {
        *self = Self::new(player, opponent)?;
        Ok(())
    }

    /// Store one side's actions for the coming round.
    ///
    /// The batch is validated against the current rosters and rejected as a
    /// whole on the first violation. A rejected submission changes nothing,
    /// including a previously accepted batch for the same side.
    pub fn submit_actions(&mut self, side: Side, actions: Vec<ActionRequest>) -> GameResult<()> {
        if self.is_match_over() {
            return Err(GameError::MatchOver);
        }
        let normalized = validate_actions(side, self.state.roster(side), &actions).map_err(|err| {
            log::rejected(side, &err);
            err
        })?;
        *self.pending_mut(side) = Some(normalized);
        Ok(())
    }

    /// Let the built-in action selector submit for `side`.
    ///
    /// Serves both the computer opponent and the player's auto-play.
    pub fn submit_auto<R: BattleRng>(&mut self, side: Side, rng: &mut R) -> GameResult<()> {
        let actions = choose_actions(&self.state, side, rng);
        self.submit_actions(side, actions)
    }

    pub fn has_submitted(&self, side: Side) -> bool {
        match side {
            Side::Player => self.pending_player.is_some(),
            Side::Opponent => self.pending_opponent.is_some(),
        }
    }

    /// Resolve the round once both sides have submitted.
    ///
    /// Either the whole round commits or, on error, nothing changes.
    pub fn resolve_round<R: BattleRng>(&mut self, rng: &mut R) -> GameResult<RoundReport> {
        if self.is_match_over() {
            return Err(GameError::MatchOver);
        }
        for side in Side::BOTH {
            if !self.has_submitted(side) {
                return Err(GameError::ActionsPending { side });
            }
        }
        let (Some(player), Some(opponent)) =
            (self.pending_player.take(), self.pending_opponent.take())
        else {
            return Err(GameError::ActionsPending { side: Side::Player });
        };

        let round = self.state.round;
        let events = resolve_round(&mut self.state, &player, &opponent, rng);
        let lines: Vec<String> = events.iter().map(ToString::to_string).collect();
        self.log.extend(lines.iter().cloned());

        match self.state.outcome() {
            Some(outcome) => log::match_ended(round, outcome),
            None => log::phase(self.state.round, RoundPhase::AwaitingActions),
        }

        Ok(RoundReport {
            round,
            events,
            lines,
            view: self.view(),
        })
    }

    pub fn is_match_over(&self) -> bool {
        self.state.outcome().is_some()
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.state.outcome()
    }

    /// Round that the next `resolve_round` will play
    pub fn round(&self) -> u32 {
        self.state.round
    }

    pub fn heal_charges(&self, side: Side) -> u32 {
        self.state.heal_charges(side)
    }

    /// The whole log since the match started
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// The last `n` log lines (fewer if the log is shorter)
    pub fn last_log(&self, n: usize) -> &[String] {
        let start = self.log.len().saturating_sub(n);
        &self.log[start..]
    }

    pub fn view(&self) -> SessionView {
        SessionView::from_state(&self.state)
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// SCALE encoding of the battle state, for byte-for-byte replay checks
    pub fn encoded_state(&self) -> Vec<u8> {
        self.state.encode()
    }

    fn pending_mut(&mut self, side: Side) -> &mut Option<Vec<ActionRequest>> {
        match side {
            Side::Player => &mut self.pending_player,
            Side::Opponent => &mut self.pending_opponent,
        }
    }
}

/// A roster is exactly three distinct kinds
pub fn validate_roster(kinds: &[Kind]) -> GameResult<()> {
    if kinds.len() != ROSTER_SIZE {
        return Err(GameError::WrongRosterSize {
            expected: ROSTER_SIZE as u32,
            got: kinds.len() as u32,
        });
    }
    for (i, kind) in kinds.iter().enumerate() {
        if kinds[..i].contains(kind) {
            return Err(GameError::DuplicateKind);
        }
    }
    Ok(())
}
