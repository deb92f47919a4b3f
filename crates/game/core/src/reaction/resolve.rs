//! Attack resolution: element application, reaction matching and effects.

use crate::combat::{apply_heal, resolve_damage};
use crate::event::CombatEvent;
use crate::state::{
    DebuffKind, DebuffState, Element, Encounter, EntityId, Shield, ShieldKind, Side,
};

use super::table::{MatchContext, ReactionDefinition, ReactionKind};

const CONTROL_TURNS: i32 = 1;
const CRYSTALLIZE_TURNS: i32 = 1;
const STABILIZE_FRACTION: f64 = 0.3;
const STABILIZE_TURNS: i32 = 2;
const BURNING: (f64, i32) = (3.0, 3);
const CORROSION: (f64, i32) = (5.0, 2);
const FROSTBITE: (f64, i32) = (3.0, 3);
const SLOW_TURNS: i32 = 3;
const BLOOM_PERCENT: f64 = 25.0;
const HEALING_WINDS_PERCENT: f64 = 20.0;
const TOXIC_SPORES_TURNS: i32 = 3;
const THUNDERSTORM_CASTER_HP_FRACTION: f64 = 0.4;

/// Resolve one attack from `attacker` on `target`.
///
/// The element is applied to the target, the reaction table is consulted and
/// at most one reaction executes, then the reaction's clear rule runs. With no
/// element or no matching reaction the hit deals plain damage. Status ticks and
/// defeat removal are left to the caller.
pub fn resolve_attack(
    encounter: &mut Encounter,
    attacker: EntityId,
    target: EntityId,
    element: Option<Element>,
    base_damage: f64,
) -> Vec<CombatEvent> {
    let mut resolution = Resolution {
        encounter,
        attacker,
        events: Vec::new(),
    };
    resolution.attack(target, element, base_damage);
    resolution.events
}

struct Resolution<'a> {
    encounter: &'a mut Encounter,
    attacker: EntityId,
    events: Vec<CombatEvent>,
}

impl Resolution<'_> {
    fn attack(&mut self, target: EntityId, element: Option<Element>, base_damage: f64) {
        let Some(entity) = self.encounter.entity_mut(target) else {
            return;
        };
        let Some(element) = element else {
            self.strike(target, base_damage, 1.0, None);
            return;
        };

        let name = entity.name.clone();
        let side = entity.side;
        let prior = entity.element_mask();

        if entity.apply_element(element) {
            self.events.push(CombatEvent::ElementApplied {
                target: name.clone(),
                element,
            });
        } else {
            self.events.push(CombatEvent::ElementAlreadyApplied {
                target: name.clone(),
                element,
            });
        }

        let context = MatchContext::new(prior, element);
        let Some(definition) = self.encounter.reactions().find(&context).cloned() else {
            self.strike(target, base_damage, 1.0, Some(element));
            return;
        };

        self.events.push(CombatEvent::ReactionTriggered {
            target: name.clone(),
            reaction: definition.kind,
            description: definition.description.clone(),
        });
        self.react(&definition, target, side, element, base_damage);

        let cleared = self
            .encounter
            .entity_mut(target)
            .is_some_and(|entity| entity.clear_elements(&definition.clear));
        if cleared {
            self.events.push(CombatEvent::ElementsCleared { target: name });
        }
    }

    fn react(
        &mut self,
        definition: &ReactionDefinition,
        target: EntityId,
        side: Side,
        element: Element,
        base_damage: f64,
    ) {
        let flagged = Some(definition.induced_element.unwrap_or(element));
        let multiplier = definition.damage_multiplier;

        match definition.kind {
            ReactionKind::Melt | ReactionKind::Vaporize => {
                self.strike(target, base_damage, multiplier, flagged);
            }
            ReactionKind::Freeze => self.debuff(target, DebuffKind::Freeze, CONTROL_TURNS),
            ReactionKind::Superconduct => {
                self.debuff(target, DebuffKind::Superconduct, CONTROL_TURNS);
                self.strike(target, base_damage, multiplier, flagged);
            }
            ReactionKind::ElectroCharged => {
                for id in self.encounter.living_ids(side) {
                    self.strike(id, base_damage, multiplier, flagged);
                }
            }
            ReactionKind::Swirl => self.swirl(target, side),
            ReactionKind::Crystallize => self.crystallize(target),
            ReactionKind::Stabilize => self.shield(
                target,
                ShieldKind::DamageReduction {
                    fraction: STABILIZE_FRACTION,
                },
                STABILIZE_TURNS,
            ),
            ReactionKind::Petrify => self.debuff(target, DebuffKind::Petrify, CONTROL_TURNS),
            ReactionKind::Overload => self.debuff(target, DebuffKind::Disarmed, CONTROL_TURNS),
            ReactionKind::Burning => self.dot(target, DebuffKind::Burning, BURNING),
            ReactionKind::Corrosion => self.dot(target, DebuffKind::Corrosion, CORROSION),
            ReactionKind::Frostbite => {
                self.dot(target, DebuffKind::Frostbite, FROSTBITE);
                self.debuff(target, DebuffKind::MovementSpeedReduction, SLOW_TURNS);
            }
            ReactionKind::Bloom => self.heal(target, BLOOM_PERCENT),
            ReactionKind::HealingWinds => {
                let party = self
                    .encounter
                    .entity(self.attacker)
                    .map_or(Side::Player, |attacker| attacker.side);
                for id in self.encounter.living_ids(party) {
                    self.heal(id, HEALING_WINDS_PERCENT);
                }
            }
            ReactionKind::ToxicSpores => {
                self.debuff(target, DebuffKind::ToxicSpores, TOXIC_SPORES_TURNS);
            }
            ReactionKind::Sandstorm => {
                for id in self.encounter.living_ids(side) {
                    self.debuff(id, DebuffKind::Disadvantage, CONTROL_TURNS);
                }
            }
            ReactionKind::Thunderstorm => {
                let caster_hp = self
                    .encounter
                    .entity(self.attacker)
                    .map_or(0.0, |attacker| attacker.max_hp());
                let damage = caster_hp * THUNDERSTORM_CASTER_HP_FRACTION;
                for id in self.encounter.living_ids(side) {
                    self.strike(id, damage, multiplier, flagged);
                }
            }
        }
    }

    /// Direct damage credited to the attacker.
    fn strike(&mut self, target: EntityId, base: f64, multiplier: f64, element: Option<Element>) {
        let Some(entity) = self.encounter.entity_mut(target) else {
            return;
        };
        let outcome = resolve_damage(entity, base, multiplier, element);
        self.events.push(outcome.event(&entity.name));

        if let Some(attacker) = self.encounter.entity_mut(self.attacker) {
            attacker.stats.total_damage_dealt += outcome.amount();
        }
    }

    fn debuff(&mut self, target: EntityId, debuff: DebuffKind, turns: i32) {
        let Some(entity) = self.encounter.entity_mut(target) else {
            return;
        };
        entity.set_debuff(debuff, DebuffState::timed(turns));
        self.events.push(CombatEvent::DebuffApplied {
            target: entity.name.clone(),
            debuff,
            turns,
        });
    }

    fn dot(&mut self, target: EntityId, debuff: DebuffKind, (percent, turns): (f64, i32)) {
        let Some(entity) = self.encounter.entity_mut(target) else {
            return;
        };
        entity.set_debuff(debuff, DebuffState::damage_over_time(percent, turns));
        self.events.push(CombatEvent::DotApplied {
            target: entity.name.clone(),
            debuff,
            per_turn: entity.max_hp() * percent / 100.0,
            turns,
        });
    }

    fn shield(&mut self, target: EntityId, kind: ShieldKind, turns: i32) {
        let Some(entity) = self.encounter.entity_mut(target) else {
            return;
        };
        entity.grant_shield(Shield::new(kind, turns));
        self.events.push(CombatEvent::ShieldGranted {
            target: entity.name.clone(),
            shield: kind,
            turns,
        });
    }

    fn heal(&mut self, target: EntityId, percent: f64) {
        if let Some(entity) = self.encounter.entity_mut(target) {
            self.events.push(apply_heal(entity, percent));
        }
    }

    /// Spreads the target's applied elements, Anemo aside, onto every living
    /// member of its side as swirled tags.
    fn swirl(&mut self, target: EntityId, side: Side) {
        let Some(entity) = self.encounter.entity(target) else {
            return;
        };
        let spread: Vec<Element> = entity
            .applied_elements()
            .iter()
            .filter(|element| *element != Element::Anemo)
            .collect();

        for id in self.encounter.living_ids(side) {
            let Some(entity) = self.encounter.entity_mut(id) else {
                continue;
            };
            for element in &spread {
                if entity.add_swirled(*element) {
                    self.events.push(CombatEvent::ElementSwirled {
                        target: entity.name.clone(),
                        element: *element,
                    });
                }
            }
        }
    }

    /// One immunity shield per non-Geo tag; the last one granted stays.
    fn crystallize(&mut self, target: EntityId) {
        let Some(entity) = self.encounter.entity(target) else {
            return;
        };
        let elements: Vec<Element> = entity
            .applied_elements()
            .iter()
            .chain(entity.swirled_elements().iter())
            .filter(|element| *element != Element::Geo)
            .collect();

        for element in elements {
            self.shield(
                target,
                ShieldKind::ElementalImmunity { element },
                CRYSTALLIZE_TURNS,
            );
        }
    }
}
