//! Command execution and turn scheduling.
//!
//! The [`CombatEngine`] is the authoritative reducer for [`Encounter`]. Every
//! command runs to completion, including AOE fan-out, status ticks, defeat
//! removal and enemy auto-turns, before control returns to the caller. The
//! events it produces are returned and appended to the encounter log.

mod actions;
mod turns;

use crate::command::Command;
use crate::env::RngOracle;
use crate::error::CommandError;
use crate::event::CombatEvent;
use crate::state::Encounter;

/// Combat engine driving one encounter.
///
/// Holds no state of its own: construct one per command batch over the
/// encounter and the RNG oracle.
pub struct CombatEngine<'a> {
    encounter: &'a mut Encounter,
    rng: &'a dyn RngOracle,
}

impl<'a> CombatEngine<'a> {
    pub fn new(encounter: &'a mut Encounter, rng: &'a dyn RngOracle) -> Self {
        Self { encounter, rng }
    }

    pub fn encounter(&self) -> &Encounter {
        self.encounter
    }

    /// Opens the encounter: enemies ahead of the first player take their turns.
    pub fn start(&mut self) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        self.run_until_player(&mut events);
        self.encounter.log_mut().extend(events.iter().cloned());
        events
    }

    /// Executes a command and appends its events to the encounter log.
    ///
    /// A refused command returns an error and leaves the encounter untouched.
    pub fn execute(&mut self, command: &Command) -> Result<Vec<CombatEvent>, CommandError> {
        let events = match command {
            Command::Attack {
                actor,
                target,
                element,
                damage,
            } => self.attack(*actor, *target, *element, damage)?,
            Command::AdvanceTurn => self.advance()?,
            Command::StatusQuery { entity } => self.status_query(*entity)?,
        };

        if !matches!(command, Command::StatusQuery { .. }) {
            self.encounter.bump_nonce();
        }
        self.encounter.log_mut().extend(events.iter().cloned());
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::BaseDamageSpec;
    use crate::env::{EnemyTemplate, PlayerRecord};
    use crate::state::{Element, EntityId, TurnPhase};

    /// Always returns the same value.
    struct Fixed(u32);

    impl RngOracle for Fixed {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    const AYLA: EntityId = EntityId(1);
    const GOLEM: EntityId = EntityId(2);

    fn duel() -> Encounter {
        Encounter::builder()
            .player(PlayerRecord::new("Ayla", 100.0, 20))
            .enemy(
                EnemyTemplate::new("Golem", 500.0)
                    .with_defense(20.0)
                    .with_initiative(10),
            )
            .build(&Fixed(0))
            .unwrap()
    }

    fn attack(element: Element, damage: f64) -> Command {
        Command::Attack {
            actor: AYLA,
            target: GOLEM,
            element: Some(element),
            damage: BaseDamageSpec::Fixed(damage),
        }
    }

    #[test]
    fn execute_appends_to_the_log_and_bumps_nonce() {
        let mut encounter = duel();
        let rng = Fixed(0);
        let mut engine = CombatEngine::new(&mut encounter, &rng);
        let opening = engine.start();
        assert_eq!(opening.len(), 1);

        let events = engine.execute(&attack(Element::Hydro, 0.0)).unwrap();
        assert!(!events.is_empty());
        assert_eq!(encounter.log().len(), 1 + events.len());
        assert_eq!(encounter.nonce(), 1);
    }

    #[test]
    fn vaporize_scenario_end_to_end() {
        let mut encounter = duel();
        let rng = Fixed(0);
        let mut engine = CombatEngine::new(&mut encounter, &rng);
        engine.start();

        engine.execute(&attack(Element::Hydro, 0.0)).unwrap();
        engine.execute(&Command::AdvanceTurn).unwrap();
        engine.execute(&attack(Element::Pyro, 100.0)).unwrap();

        let golem = encounter.entity(GOLEM).unwrap();
        assert_eq!(golem.current_hp(), 370.0);
        assert!(golem.element_mask().is_empty());
    }

    #[test]
    fn status_query_leaves_state_alone() {
        let mut encounter = duel();
        let rng = Fixed(0);
        let before = {
            let mut engine = CombatEngine::new(&mut encounter, &rng);
            engine.start();
            engine.encounter().clone()
        };

        let mut engine = CombatEngine::new(&mut encounter, &rng);
        let events = engine
            .execute(&Command::StatusQuery { entity: GOLEM })
            .unwrap();
        assert_eq!(events[0].to_string(), "Golem has no special status effects.");

        assert_eq!(encounter.nonce(), before.nonce());
        assert_eq!(encounter.enemies(), before.enemies());
        assert_eq!(encounter.phase(), TurnPhase::AwaitingPlayerAction(0));
    }

    #[test]
    fn unknown_entities_are_refused() {
        let mut encounter = duel();
        let rng = Fixed(0);
        let mut engine = CombatEngine::new(&mut encounter, &rng);
        engine.start();

        assert_eq!(
            engine.execute(&Command::StatusQuery {
                entity: EntityId(99)
            }),
            Err(CommandError::UnknownEntity(EntityId(99)))
        );
    }
}
