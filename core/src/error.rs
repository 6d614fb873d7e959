//! Error types for battle operations
//!
//! Only [`GameError::RepeatedMove`] happens in normal play; the remaining
//! variants report callers breaking the session contract. Every error is
//! returned before any state is touched.

use alloc::string::String;
use core::fmt;

use parity_scale_codec::{Decode, Encode};

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

use crate::types::{Move, Side};

/// Errors returned by the battle session
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(tag = "type", rename_all = "camelCase"))]
pub enum GameError {
    /// A restricted move matches the actor's last non-attack move
    RepeatedMove {
        side: Side,
        slot: u8,
        actor: String,
        action: Move,
    },
    /// The move is not in the actor's kind's move set
    MoveNotAvailable {
        side: Side,
        slot: u8,
        actor: String,
        action: Move,
    },
    /// One action per roster slot is required
    WrongActionCount { expected: u32, got: u32 },
    /// Rosters must have exactly `expected` members
    WrongRosterSize { expected: u32, got: u32 },
    /// A roster lists the same kind twice
    DuplicateKind,
    /// `side` has not submitted actions for this round
    ActionsPending { side: Side },
    /// The match already has an outcome
    MatchOver,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::RepeatedMove { actor, action, .. } => {
                write!(f, "{} cannot use {} twice in a row", actor, action)
            }
            GameError::MoveNotAvailable { actor, action, .. } => {
                write!(f, "{} does not know {}", actor, action)
            }
            GameError::WrongActionCount { expected, got } => {
                write!(f, "expected {} actions, got {}", expected, got)
            }
            GameError::WrongRosterSize { expected, got } => {
                write!(f, "roster must have {} members, got {}", expected, got)
            }
            GameError::DuplicateKind => f.write_str("roster lists the same kind twice"),
            GameError::ActionsPending { side } => {
                write!(f, "{} side has not submitted actions", side)
            }
            GameError::MatchOver => f.write_str("match is already over"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

/// Result type alias for battle operations
pub type GameResult<T> = Result<T, GameError>;
