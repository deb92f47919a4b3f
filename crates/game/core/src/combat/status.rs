//! Per-turn status tick.

use crate::event::{CombatEvent, StatusFlag};
use crate::state::{CombatEntity, DebuffKind};

use super::damage::{DamageOutcome, resolve_damage};

/// Percent of max HP dealt when Toxic Spores run out.
pub const SPORES_BURST_PERCENT: f64 = 5.0;

/// Advance an entity's statuses by one turn.
///
/// Order:
/// 1. every damage-over-time debuff deals its share of max HP (durations untouched)
/// 2. every debuff counts down; expired ones are removed
/// 3. the shield counts down
/// 4. Toxic Spores that reached zero this tick burst
pub fn tick_status(entity: &mut CombatEntity) -> Vec<CombatEvent> {
    let mut events = Vec::new();

    let dots: Vec<(DebuffKind, f64)> = entity.debuffs().damage_over_time().collect();
    for (debuff, percent) in dots {
        let amount = entity.max_hp() * percent / 100.0;
        let outcome = resolve_damage(entity, amount, 1.0, None);
        events.push(CombatEvent::DotDamage {
            target: entity.name.clone(),
            debuff,
            amount: outcome.amount(),
            remaining_hp: entity.current_hp(),
        });
    }

    let spores_due = entity
        .debuffs()
        .get(DebuffKind::ToxicSpores)
        .is_some_and(|state| state.remaining_turns() == 1);

    for debuff in entity.expire_debuffs() {
        if debuff == DebuffKind::ToxicSpores {
            continue;
        }
        events.push(CombatEvent::DebuffEnded {
            target: entity.name.clone(),
            debuff,
        });
    }

    if entity.decay_shield() {
        events.push(CombatEvent::ShieldExpired {
            target: entity.name.clone(),
        });
    }

    if spores_due {
        let burst = entity.max_hp() * SPORES_BURST_PERCENT / 100.0;
        if let DamageOutcome::Applied {
            amount,
            remaining_hp,
        } = resolve_damage(entity, burst, 1.0, None)
        {
            events.push(CombatEvent::SporesBurst {
                target: entity.name.clone(),
                amount,
                remaining_hp,
            });
        }
    }

    events
}

/// Control and shield status plus current elements. Read-only.
pub fn status_report(entity: &CombatEntity) -> Vec<CombatEvent> {
    let mut flags = Vec::new();
    if entity.is_frozen() {
        flags.push(StatusFlag::Frozen);
    }
    if entity.is_petrified() {
        flags.push(StatusFlag::Petrified);
    }
    if let Some(shield) = entity.shield() {
        flags.push(StatusFlag::Shielded(shield.kind));
    }

    let mut events = vec![
        CombatEvent::Status {
            name: entity.name.clone(),
            flags,
        },
        CombatEvent::Elements {
            name: entity.name.clone(),
            elements: entity.applied_elements().clone(),
        },
    ];
    if !entity.swirled_elements().is_empty() {
        events.push(CombatEvent::SwirledElements {
            name: entity.name.clone(),
            elements: entity.swirled_elements().clone(),
        });
    }
    events
}
