use core::fmt;

use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Which roster a combatant belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Player, Side::Opponent];

    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Player => "YOU",
            Side::Opponent => "CPU",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The five combatant kinds. Per-kind data lives in [`crate::units::profile`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Kind {
    Warrior,
    Archer,
    Brawler,
    Assassin,
    King,
}

impl Kind {
    pub const ALL: [Kind; 5] = [
        Kind::Warrior,
        Kind::Archer,
        Kind::Brawler,
        Kind::Assassin,
        Kind::King,
    ];

    /// Two-letter tag used in compact roster notation ("RW,EA,TB")
    pub fn code(self) -> &'static str {
        match self {
            Kind::Warrior => "RW",
            Kind::Archer => "EA",
            Kind::Brawler => "TB",
            Kind::Assassin => "CA",
            Kind::King => "QK",
        }
    }

    pub fn from_code(code: &str) -> Option<Kind> {
        Kind::ALL
            .into_iter()
            .find(|kind| kind.code().eq_ignore_ascii_case(code))
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Every move identifier the engine accepts.
///
/// Attack, the two heals and Idle are shared; the rest belong to exactly one
/// kind (see [`crate::units::KindProfile::signature`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Move {
    Attack,
    HeroicRaise,
    RubyShield,
    ArrowShower,
    SharpAim,
    ShinyFlex,
    StunPunch,
    VitalStab,
    SneakBoost,
    DieForMe,
    KingsCommand,
    HealAll,
    HealOne,
    Idle,
}

impl Move {
    /// Moves any living combatant may submit regardless of kind
    pub const SHARED: [Move; 4] = [Move::Attack, Move::HealAll, Move::HealOne, Move::Idle];

    /// Stable snake_case identifier
    pub fn id(self) -> &'static str {
        match self {
            Move::Attack => "attack",
            Move::HeroicRaise => "heroic_raise",
            Move::RubyShield => "ruby_shield",
            Move::ArrowShower => "arrow_shower",
            Move::SharpAim => "sharp_aim",
            Move::ShinyFlex => "shiny_flex",
            Move::StunPunch => "stun_punch",
            Move::VitalStab => "vital_stab",
            Move::SneakBoost => "sneak_boost",
            Move::DieForMe => "die_for_me",
            Move::KingsCommand => "kings_command",
            Move::HealAll => "heal_all",
            Move::HealOne => "heal_one",
            Move::Idle => "idle",
        }
    }

    /// Display name used in the battle log
    pub fn name(self) -> &'static str {
        match self {
            Move::Attack => "Attack",
            Move::HeroicRaise => "Heroic Raise",
            Move::RubyShield => "Ruby Shield",
            Move::ArrowShower => "Arrow Shower",
            Move::SharpAim => "Sharp Aim",
            Move::ShinyFlex => "Shiny Flex",
            Move::StunPunch => "Stun Punch",
            Move::VitalStab => "Vital Stab",
            Move::SneakBoost => "Sneak Boost",
            Move::DieForMe => "Die For Me",
            Move::KingsCommand => "King's Command",
            Move::HealAll => "Heal All",
            Move::HealOne => "Heal One",
            Move::Idle => "Idle",
        }
    }

    pub fn is_heal(self) -> bool {
        matches!(self, Move::HealAll | Move::HealOne)
    }

    /// Moves covered by the repetition rule: everything except Attack and Idle.
    pub fn is_restricted(self) -> bool {
        !matches!(self, Move::Attack | Move::Idle)
    }

    /// Moves whose target index points at the opposing roster
    pub fn targets_opponent(self) -> bool {
        matches!(self, Move::Attack | Move::StunPunch | Move::VitalStab)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One chosen action for one roster slot: a move plus an optional target index.
///
/// The target index refers to the opposing roster for offensive moves and to
/// the actor's own roster for Heal One; every other move ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    pub action: Move,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<u8>,
}

impl ActionRequest {
    pub fn new(action: Move, target: Option<u8>) -> Self {
        Self { action, target }
    }

    pub fn idle() -> Self {
        Self::new(Move::Idle, None)
    }

    pub fn attack(target: u8) -> Self {
        Self::new(Move::Attack, Some(target))
    }

    /// A move that takes no target
    pub fn cast(action: Move) -> Self {
        Self::new(action, None)
    }

    pub fn targeted(action: Move, target: u8) -> Self {
        Self::new(action, Some(target))
    }
}

impl Default for ActionRequest {
    fn default() -> Self {
        Self::idle()
    }
}

/// Final result of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchOutcome {
    PlayerVictory,
    OpponentVictory,
    /// Both rosters fell in the same round
    Draw,
}

impl MatchOutcome {
    pub fn winner(self) -> Option<Side> {
        match self {
            MatchOutcome::PlayerVictory => Some(Side::Player),
            MatchOutcome::OpponentVictory => Some(Side::Opponent),
            MatchOutcome::Draw => None,
        }
    }
}
