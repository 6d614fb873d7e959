//! Per-kind templates.
//!
//! [`KINDS`] is the single dispatch table for everything that differs by
//! kind: base stats, the attack roll, the two signature moves and the
//! opponent heuristic's move weights. Adding a kind means adding a row here
//! and a `Kind` variant. The only kind-specific rule outside this table is
//! protector redirection, which shields `Kind::King`.

use crate::combatant::Combatant;
use crate::types::{Kind, Move};

/// One weighted choice for the opponent heuristic.
///
/// `threshold` is cumulative: a 0-99 draw below it picks `action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tactic {
    pub threshold: u32,
    pub action: Move,
}

const fn tactic(threshold: u32, action: Move) -> Tactic {
    Tactic { threshold, action }
}

/// Immutable template for one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindProfile {
    pub kind: Kind,
    pub name: &'static str,
    pub max_health: u32,
    pub speed: u32,
    /// Base crit chance in percent
    pub crit_chance: u32,
    /// Extra damage on crit in percent (70 means x1.70)
    pub crit_amp: u32,
    /// Inclusive damage roll of a plain attack
    pub attack: (u32, u32),
    pub signature: [Move; 2],
    /// Opponent heuristic weights while heal charges remain
    pub tactics: &'static [Tactic],
    /// Opponent heuristic weights once heal charges are spent
    pub exhausted_tactics: &'static [Tactic],
}

impl KindProfile {
    /// Whether a combatant of this kind may submit `action`
    pub fn allows(&self, action: Move) -> bool {
        Move::SHARED.contains(&action) || self.signature.contains(&action)
    }
}

/// Indexed by `Kind as usize`.
pub const KINDS: [KindProfile; 5] = [
    KindProfile {
        kind: Kind::Warrior,
        name: "Ruby Warrior",
        max_health: 1250,
        speed: 50,
        crit_chance: 10,
        crit_amp: 70,
        attack: (200, 300),
        signature: [Move::HeroicRaise, Move::RubyShield],
        tactics: &[tactic(18, Move::HeroicRaise), tactic(43, Move::RubyShield)],
        exhausted_tactics: &[],
    },
    KindProfile {
        kind: Kind::Archer,
        name: "Emerald Archer",
        max_health: 800,
        speed: 80,
        crit_chance: 15,
        crit_amp: 65,
        attack: (100, 150),
        signature: [Move::ArrowShower, Move::SharpAim],
        tactics: &[tactic(25, Move::ArrowShower), tactic(45, Move::SharpAim)],
        exhausted_tactics: &[tactic(25, Move::ArrowShower)],
    },
    KindProfile {
        kind: Kind::Brawler,
        name: "Topaz Brawler",
        max_health: 1500,
        speed: 30,
        crit_chance: 5,
        crit_amp: 105,
        attack: (400, 450),
        signature: [Move::ShinyFlex, Move::StunPunch],
        tactics: &[tactic(25, Move::StunPunch)],
        exhausted_tactics: &[],
    },
    KindProfile {
        kind: Kind::Assassin,
        name: "Crystal Assassin",
        max_health: 700,
        speed: 100,
        crit_chance: 25,
        crit_amp: 85,
        attack: (200, 270),
        signature: [Move::VitalStab, Move::SneakBoost],
        tactics: &[tactic(22, Move::SneakBoost), tactic(38, Move::VitalStab)],
        exhausted_tactics: &[],
    },
    KindProfile {
        kind: Kind::King,
        name: "Quartz King",
        max_health: 1300,
        speed: 35,
        crit_chance: 5,
        crit_amp: 185,
        attack: (250, 350),
        signature: [Move::DieForMe, Move::KingsCommand],
        tactics: &[tactic(18, Move::DieForMe), tactic(36, Move::KingsCommand)],
        exhausted_tactics: &[],
    },
];

/// Look up the template for a kind
pub fn profile(kind: Kind) -> &'static KindProfile {
    &KINDS[kind.index()]
}

/// Build a fresh combatant from its kind's template
pub fn spawn(kind: Kind) -> Combatant {
    Combatant::from_profile(profile(kind))
}
