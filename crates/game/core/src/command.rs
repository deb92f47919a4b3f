//! Commands accepted by [`crate::CombatEngine::execute`].

use core::fmt;

use crate::config::CombatConfig;
use crate::env::{RngOracle, context};
use crate::state::{Element, EntityId};

/// Where an attack's base damage comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaseDamageSpec {
    /// Explicit override.
    Fixed(f64),
    /// Sum of `count` rolls of a `faces`-sided die.
    Dice { faces: u32, count: u32 },
    /// [`CombatConfig::default_base_damage`].
    Default,
}

impl BaseDamageSpec {
    /// Dice spec with the count clamped to `1..=MAX_DICE`. Zero faces falls
    /// back to [`BaseDamageSpec::Default`].
    pub fn dice(faces: u32, count: u32) -> Self {
        if faces == 0 {
            return Self::Default;
        }
        Self::Dice {
            faces,
            count: count.clamp(1, CombatConfig::MAX_DICE),
        }
    }

    /// Resolves the base damage.
    ///
    /// `seed_for` maps a roll context to a seed. Under disadvantage the whole
    /// set of dice is rolled twice and the lower total is kept.
    pub fn roll(
        &self,
        rng: &dyn RngOracle,
        seed_for: impl Fn(u32) -> u64,
        disadvantage: bool,
        default_base: f64,
    ) -> RolledDamage {
        match *self {
            Self::Fixed(value) => RolledDamage::flat(value.max(0.0)),
            Self::Default => RolledDamage::flat(default_base),
            Self::Dice { faces: 0, .. } => RolledDamage::flat(default_base),
            Self::Dice { faces, count } => {
                let count = count.clamp(1, CombatConfig::MAX_DICE);
                let roll_set = |base: u32| -> Vec<u32> {
                    (0..count)
                        .map(|index| rng.roll_die(seed_for(base + index), faces))
                        .collect()
                };

                let rolls = roll_set(context::DAMAGE_DICE);
                if !disadvantage {
                    return RolledDamage::from_rolls(rolls, None);
                }

                let second = roll_set(context::DISADVANTAGE_DICE);
                if sum(&second) < sum(&rolls) {
                    RolledDamage::from_rolls(second, Some(rolls))
                } else {
                    RolledDamage::from_rolls(rolls, Some(second))
                }
            }
        }
    }
}

fn sum(rolls: &[u32]) -> u64 {
    rolls.iter().map(|roll| u64::from(*roll)).sum()
}

/// Resolved base damage plus the dice that produced it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RolledDamage {
    pub total: f64,
    /// Kept dice. Empty when no dice were rolled.
    pub rolls: Vec<u32>,
    /// The losing set under disadvantage.
    pub discarded: Option<Vec<u32>>,
}

impl RolledDamage {
    fn flat(total: f64) -> Self {
        Self {
            total,
            rolls: Vec::new(),
            discarded: None,
        }
    }

    fn from_rolls(rolls: Vec<u32>, discarded: Option<Vec<u32>>) -> Self {
        Self {
            total: sum(&rolls) as f64,
            rolls,
            discarded,
        }
    }

    pub fn is_rolled(&self) -> bool {
        !self.rolls.is_empty()
    }
}

impl fmt::Display for RolledDamage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rolled {:?} for {:.2} base damage", self.rolls, self.total)?;
        if let Some(discarded) = &self.discarded {
            write!(f, " (disadvantage, discarded {discarded:?})")?;
        }
        Ok(())
    }
}

/// Input to the engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// Apply an element to `target`, resolving any reaction it triggers.
    ///
    /// Without an explicit element the actor's default element is used; an
    /// actor with neither deals plain damage.
    Attack {
        actor: EntityId,
        target: EntityId,
        element: Option<Element>,
        damage: BaseDamageSpec,
    },
    /// Finish the current player's turn and run enemies up to the next player.
    AdvanceTurn,
    /// Report status and elements of an entity. Never mutates state.
    StatusQuery { entity: EntityId },
}
