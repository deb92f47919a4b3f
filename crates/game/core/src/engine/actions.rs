use crate::combat::{status_report, tick_status};
use crate::command::BaseDamageSpec;
use crate::error::CommandError;
use crate::event::CombatEvent;
use crate::reaction::resolve_attack;
use crate::state::{DebuffKind, Element, EntityId, Side};

use super::CombatEngine;

/// Player actions for CombatEngine.
impl CombatEngine<'_> {
    /// The current player's action for this turn.
    ///
    /// A frozen, petrified or disarmed actor is rejected with an event but
    /// still uses up its action, and its status tick runs either way.
    pub(super) fn attack(
        &mut self,
        actor: EntityId,
        target: EntityId,
        element: Option<Element>,
        damage: &BaseDamageSpec,
    ) -> Result<Vec<CombatEvent>, CommandError> {
        self.validate_attack(actor, target)?;

        let mut events = Vec::new();
        self.encounter.set_acted(true);

        let Some(attacker) = self.encounter.entity(actor) else {
            return Err(CommandError::UnknownEntity(actor));
        };

        if let Some(reason) = attacker.action_block() {
            events.push(CombatEvent::ActionRejected {
                actor: attacker.name.clone(),
                reason,
            });
        } else {
            let element = element.or(attacker.default_element());
            let disadvantage = attacker.has_debuff(DebuffKind::Disadvantage);
            let name = attacker.name.clone();

            let encounter = &*self.encounter;
            let rolled = damage.roll(
                self.rng,
                |context| encounter.roll_seed(actor, context),
                disadvantage,
                encounter.config.default_base_damage,
            );
            let base_damage = rolled.total;
            if rolled.is_rolled() {
                events.push(CombatEvent::DamageRolled {
                    actor: name,
                    rolled,
                });
            }

            events.extend(resolve_attack(
                self.encounter,
                actor,
                target,
                element,
                base_damage,
            ));

            if let Some(attacker) = self.encounter.entity_mut(actor) {
                attacker.stats.actions_taken += 1;
            }
        }

        if let Some(attacker) = self.encounter.entity_mut(actor) {
            events.extend(tick_status(attacker));
        }
        self.remove_defeated(&mut events);
        self.finish_if_over(&mut events);

        Ok(events)
    }

    fn validate_attack(&self, actor: EntityId, target: EntityId) -> Result<(), CommandError> {
        if self.encounter.phase().is_terminal() {
            return Err(CommandError::EncounterFinished);
        }

        let attacker = self
            .encounter
            .entity(actor)
            .ok_or(CommandError::UnknownEntity(actor))?;
        if attacker.side != Side::Player {
            return Err(CommandError::NotAPlayer(actor));
        }

        let current = self
            .encounter
            .current_actor()
            .ok_or(CommandError::EncounterFinished)?;
        if current != actor {
            return Err(CommandError::ActorNotCurrent { actor, current });
        }
        if self.encounter.has_acted() {
            return Err(CommandError::AlreadyActed(actor));
        }

        if !self.encounter.has_living(Side::Enemy) {
            return Err(CommandError::NoLivingEnemies);
        }
        let defender = self
            .encounter
            .entity(target)
            .ok_or(CommandError::UnknownEntity(target))?;
        if defender.side != Side::Enemy {
            return Err(CommandError::NotAnEnemy(target));
        }

        Ok(())
    }

    pub(super) fn status_query(&self, entity: EntityId) -> Result<Vec<CombatEvent>, CommandError> {
        self.encounter
            .entity(entity)
            .map(status_report)
            .ok_or(CommandError::UnknownEntity(entity))
    }
}
