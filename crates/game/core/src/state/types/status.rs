//! Debuffs and shields carried by combat entities.
//!
//! # Turn-based Duration
//!
//! Every debuff and shield counts remaining turns. The status tick
//! (see [`crate::combat::tick_status`]) decrements them once per completed turn
//! and drops whatever reaches zero.

use core::fmt;

use arrayvec::ArrayVec;
use strum::{Display, EnumCount, EnumIter};

use crate::config::CombatConfig;
use crate::state::Element;

/// Named debuffs that reactions can apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumCount, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DebuffKind {
    /// Cannot act. Mirrors `is_frozen`.
    Freeze,
    /// Cannot act. Mirrors `is_petrified`.
    Petrify,
    /// Defense halved while present.
    Superconduct,
    /// Cannot attack.
    Disarmed,
    Burning,
    Corrosion,
    Frostbite,
    #[strum(serialize = "Movement Speed Reduction")]
    MovementSpeedReduction,
    /// Deferred burst when the countdown reaches zero.
    #[strum(serialize = "Toxic Spores")]
    ToxicSpores,
    /// Dice for base damage are rolled twice, keeping the lower total.
    Disadvantage,
}

/// Per-debuff state.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DebuffState {
    /// Plain countdown.
    Timed { remaining_turns: i32 },
    /// Deals `percent_of_max_hp` of the carrier's max HP every tick.
    DamageOverTime {
        remaining_turns: i32,
        percent_of_max_hp: f64,
    },
}

impl DebuffState {
    pub const fn timed(turns: i32) -> Self {
        Self::Timed {
            remaining_turns: turns,
        }
    }

    pub const fn damage_over_time(percent_of_max_hp: f64, turns: i32) -> Self {
        Self::DamageOverTime {
            remaining_turns: turns,
            percent_of_max_hp,
        }
    }

    pub const fn remaining_turns(&self) -> i32 {
        match self {
            Self::Timed { remaining_turns } | Self::DamageOverTime { remaining_turns, .. } => {
                *remaining_turns
            }
        }
    }

    fn decrement(&mut self) -> i32 {
        match self {
            Self::Timed { remaining_turns } | Self::DamageOverTime { remaining_turns, .. } => {
                *remaining_turns -= 1;
                *remaining_turns
            }
        }
    }
}

/// A debuff entry.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Debuff {
    pub kind: DebuffKind,
    pub state: DebuffState,
}

/// Active debuffs on an entity, in the order they were first applied.
///
/// Each kind appears at most once. Re-applying a kind replaces its state but
/// keeps its position.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Debuffs {
    entries: ArrayVec<Debuff, { CombatConfig::MAX_DEBUFFS }>,
}

impl Debuffs {
    pub fn new() -> Self {
        Self {
            entries: ArrayVec::new(),
        }
    }

    pub fn get(&self, kind: DebuffKind) -> Option<&DebuffState> {
        self.entries
            .iter()
            .find(|debuff| debuff.kind == kind)
            .map(|debuff| &debuff.state)
    }

    pub fn contains(&self, kind: DebuffKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Debuff> {
        self.entries.iter()
    }

    /// Damage-over-time debuffs with their percent of max HP.
    pub fn damage_over_time(&self) -> impl Iterator<Item = (DebuffKind, f64)> + '_ {
        self.entries.iter().filter_map(|debuff| match debuff.state {
            DebuffState::DamageOverTime {
                percent_of_max_hp, ..
            } => Some((debuff.kind, percent_of_max_hp)),
            DebuffState::Timed { .. } => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn insert(&mut self, kind: DebuffKind, state: DebuffState) {
        if let Some(existing) = self.entries.iter_mut().find(|debuff| debuff.kind == kind) {
            existing.state = state;
            return;
        }
        if !self.entries.is_full() {
            self.entries.push(Debuff { kind, state });
        }
    }

    /// Decrements every countdown and removes entries that reach zero or below.
    ///
    /// Returns the removed kinds in their stored order.
    pub(crate) fn decrement_all(&mut self) -> ArrayVec<DebuffKind, { CombatConfig::MAX_DEBUFFS }> {
        let mut expired = ArrayVec::new();
        for debuff in self.entries.iter_mut() {
            if debuff.state.decrement() <= 0 {
                expired.push(debuff.kind);
            }
        }
        self.entries.retain(|debuff| debuff.state.remaining_turns() > 0);
        expired
    }
}

/// Kinds of shield a reaction can grant.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShieldKind {
    /// Scales incoming damage by `1 - fraction`.
    DamageReduction { fraction: f64 },
    /// Negates damage flagged with `element`.
    ElementalImmunity { element: Element },
}

impl ShieldKind {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::DamageReduction { .. } => "Damage Reduction",
            Self::ElementalImmunity { .. } => "Elemental Immunity",
        }
    }
}

impl fmt::Display for ShieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DamageReduction { fraction } => {
                write!(f, "{} ({:.0}%)", self.label(), fraction * 100.0)
            }
            Self::ElementalImmunity { element } => write!(f, "{} ({element})", self.label()),
        }
    }
}

/// The single shield an entity may carry.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shield {
    pub kind: ShieldKind,
    pub remaining_turns: i32,
}

impl Shield {
    pub const fn new(kind: ShieldKind, remaining_turns: i32) -> Self {
        Self {
            kind,
            remaining_turns,
        }
    }
}
