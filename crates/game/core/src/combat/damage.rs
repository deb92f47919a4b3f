//! Damage calculation and application.

use crate::event::CombatEvent;
use crate::state::{CombatEntity, DebuffKind, Element, ShieldKind};

/// Outcome of routing damage through [`resolve_damage`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageOutcome {
    /// HP was reduced by `amount` (possibly zero).
    Applied { amount: f64, remaining_hp: f64 },
    /// An elemental immunity shield negated the hit.
    Immune { element: Element },
}

impl DamageOutcome {
    /// Damage actually subtracted from HP.
    pub fn amount(&self) -> f64 {
        match self {
            Self::Applied { amount, .. } => *amount,
            Self::Immune { .. } => 0.0,
        }
    }

    /// Log line for a direct hit on `target`.
    pub fn event(&self, target: &str) -> CombatEvent {
        match *self {
            Self::Applied {
                amount,
                remaining_hp,
            } => CombatEvent::Damaged {
                target: target.to_owned(),
                amount,
                remaining_hp,
            },
            Self::Immune { element } => CombatEvent::Immune {
                target: target.to_owned(),
                element,
            },
        }
    }
}

/// Calculate damage against `entity` without applying it.
///
/// # Formula
///
/// ```text
/// defense = entity.defense            (halved under Superconduct)
/// raw     = base_damage * multiplier - defense
/// raw     = raw * (1 - fraction)      (DamageReduction shield)
/// final   = max(raw, 0)
/// ```
///
/// An `ElementalImmunity` shield matching `attack_element` yields
/// [`DamageOutcome::Immune`]. `remaining_hp` is the projected HP after the hit.
pub fn calculate_damage(
    entity: &CombatEntity,
    base_damage: f64,
    multiplier: f64,
    attack_element: Option<Element>,
) -> DamageOutcome {
    let mut defense = entity.defense;
    if entity.has_debuff(DebuffKind::Superconduct) {
        defense *= 0.5;
    }

    let mut damage = base_damage * multiplier - defense;

    if let Some(shield) = entity.shield() {
        match shield.kind {
            ShieldKind::DamageReduction { fraction } => damage *= 1.0 - fraction,
            ShieldKind::ElementalImmunity { element } => {
                if attack_element == Some(element) {
                    return DamageOutcome::Immune { element };
                }
            }
        }
    }

    let amount = damage.max(0.0);
    DamageOutcome::Applied {
        amount,
        remaining_hp: (entity.current_hp() - amount).max(0.0),
    }
}

/// Calculate and apply damage. The only path that lowers HP.
///
/// Applied damage is appended to the entity's damage log and added to its
/// `total_damage_taken`, including zero-damage hits.
pub fn resolve_damage(
    entity: &mut CombatEntity,
    base_damage: f64,
    multiplier: f64,
    attack_element: Option<Element>,
) -> DamageOutcome {
    let outcome = calculate_damage(entity, base_damage, multiplier, attack_element);
    if let DamageOutcome::Applied { amount, .. } = outcome {
        entity.lose_hp(amount);
    }
    outcome
}

/// Restore `percent` of max HP, clamped to max HP.
pub fn apply_heal(entity: &mut CombatEntity, percent: f64) -> CombatEvent {
    let amount = entity.max_hp() * percent / 100.0;
    entity.restore_hp(amount);
    CombatEvent::Healed {
        target: entity.name.clone(),
        amount,
        current_hp: entity.current_hp(),
    }
}
