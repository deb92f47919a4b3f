use crate::combat::{resolve_damage, tick_status};
use crate::env::context;
use crate::error::CommandError;
use crate::event::{CombatEvent, EncounterOutcome};
use crate::state::{EntityId, Side, TurnPhase};

use super::CombatEngine;

/// Turn scheduling methods for CombatEngine.
impl CombatEngine<'_> {
    /// Completes the current player's turn and runs enemies up to the next player.
    ///
    /// A player that skipped its action ticks here instead of after attacking.
    pub(super) fn advance(&mut self) -> Result<Vec<CombatEvent>, CommandError> {
        if self.encounter.phase().is_terminal() {
            return Err(CommandError::EncounterFinished);
        }

        let mut events = Vec::new();
        if !self.encounter.has_acted()
            && let Some(current) = self.encounter.current_actor()
            && let Some(entity) = self.encounter.entity_mut(current)
        {
            events.extend(tick_status(entity));
            self.remove_defeated(&mut events);
        }

        if !self.finish_if_over(&mut events) {
            self.encounter.turn_mut().step();
            self.run_until_player(&mut events);
        }
        Ok(events)
    }

    /// Resolves enemy turns from the cursor onward and stops at the first player.
    ///
    /// Each enemy is removed from the order as soon as it dies, so the cursor
    /// always steps to the next living actor.
    pub(super) fn run_until_player(&mut self, events: &mut Vec<CombatEvent>) {
        loop {
            if self.finish_if_over(events) {
                return;
            }
            let Some(actor) = self.encounter.current_actor() else {
                return;
            };
            let Some(entity) = self.encounter.entity(actor) else {
                return;
            };
            let side = entity.side;
            let cursor = self.encounter.turn_order().cursor();
            events.push(CombatEvent::TurnStarted {
                actor: entity.name.clone(),
                side,
            });

            match side {
                Side::Player => {
                    self.encounter
                        .set_phase(TurnPhase::AwaitingPlayerAction(cursor));
                    self.encounter.set_acted(false);
                    return;
                }
                Side::Enemy => {
                    self.encounter
                        .set_phase(TurnPhase::ResolvingEnemyAction(cursor));
                    self.enemy_turn(actor, events);
                    self.remove_defeated(events);
                    self.encounter.turn_mut().step();
                }
            }
        }
    }

    /// Strikes a random living player for the configured flat damage unless
    /// the enemy is blocked, then ticks the enemy.
    fn enemy_turn(&mut self, enemy: EntityId, events: &mut Vec<CombatEvent>) {
        let Some(entity) = self.encounter.entity(enemy) else {
            return;
        };
        let name = entity.name.clone();
        let block = entity.action_block();

        if let Some(reason) = block {
            events.push(CombatEvent::ActionRejected {
                actor: name,
                reason,
            });
        } else {
            let targets = self.encounter.living_ids(Side::Player);
            if !targets.is_empty() {
                let seed = self.encounter.roll_seed(enemy, context::ENEMY_TARGET);
                let pick = self.rng.range(seed, 0, targets.len() as u32 - 1) as usize;
                let target = targets[pick.min(targets.len() - 1)];
                let damage = self.encounter.config.enemy_attack_damage;

                if let Some(player) = self.encounter.entity_mut(target) {
                    let outcome = resolve_damage(player, damage, 1.0, None);
                    events.push(CombatEvent::EnemyAttack {
                        enemy: name,
                        target: player.name.clone(),
                        amount: outcome.amount(),
                        remaining_hp: player.current_hp(),
                    });
                    if let Some(attacker) = self.encounter.entity_mut(enemy) {
                        attacker.stats.total_damage_dealt += outcome.amount();
                        attacker.stats.actions_taken += 1;
                    }
                }
            }
        }

        if let Some(entity) = self.encounter.entity_mut(enemy) {
            events.extend(tick_status(entity));
        }
    }

    pub(super) fn remove_defeated(&mut self, events: &mut Vec<CombatEvent>) {
        for entity in self.encounter.remove_defeated() {
            events.push(CombatEvent::Defeated {
                name: entity.name,
                side: entity.side,
            });
        }
    }

    /// Moves to a terminal phase once a side is wiped out. Enemies are checked
    /// first. Returns true if the encounter is over.
    pub(super) fn finish_if_over(&mut self, events: &mut Vec<CombatEvent>) -> bool {
        if self.encounter.phase().is_terminal() {
            return true;
        }

        let (phase, outcome) = if !self.encounter.has_living(Side::Enemy) {
            (
                TurnPhase::AllEnemiesDefeated,
                EncounterOutcome::AllEnemiesDefeated,
            )
        } else if !self.encounter.has_living(Side::Player) {
            (
                TurnPhase::AllPlayersDefeated,
                EncounterOutcome::AllPlayersDefeated,
            )
        } else {
            return false;
        };

        self.encounter.set_phase(phase);
        events.push(CombatEvent::EncounterEnded(outcome));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{BaseDamageSpec, Command};
    use crate::env::{EnemyTemplate, PlayerRecord, RngOracle};
    use crate::state::{DebuffKind, DebuffState, Element, Encounter, TurnOrder};

    /// Always picks the first candidate.
    struct First;

    impl RngOracle for First {
        fn next_u32(&self, _seed: u64) -> u32 {
            0
        }
    }

    const P1: EntityId = EntityId(1);
    const P2: EntityId = EntityId(2);
    const E1: EntityId = EntityId(3);
    const E2: EntityId = EntityId(4);

    /// Turn order [P1, P2, E1, E2].
    fn skirmish() -> Encounter {
        Encounter::builder()
            .player(PlayerRecord::new("P1", 100.0, 20))
            .player(PlayerRecord::new("P2", 100.0, 15))
            .enemy(EnemyTemplate::new("E1", 50.0).with_initiative(10))
            .enemy(EnemyTemplate::new("E2", 50.0).with_initiative(5))
            .build(&First)
            .unwrap()
    }

    fn started(encounter: &mut Encounter) -> Vec<CombatEvent> {
        CombatEngine::new(encounter, &First).start()
    }

    fn order(encounter: &Encounter) -> Vec<EntityId> {
        encounter.turn_order().iter().collect()
    }

    fn names(events: &[CombatEvent]) -> Vec<String> {
        events
            .iter()
            .filter_map(|event| match event {
                CombatEvent::TurnStarted { actor, .. } => Some(actor.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn advance_runs_enemies_and_stops_at_next_player() {
        let mut encounter = skirmish();
        started(&mut encounter);
        assert_eq!(order(&encounter), vec![P1, P2, E1, E2]);

        let mut engine = CombatEngine::new(&mut encounter, &First);
        let first = engine.execute(&Command::AdvanceTurn).unwrap();
        assert_eq!(names(&first), vec!["P2"]);
        assert_eq!(
            engine.encounter().phase(),
            TurnPhase::AwaitingPlayerAction(1)
        );

        let second = engine.execute(&Command::AdvanceTurn).unwrap();
        assert_eq!(names(&second), vec!["E1", "E2", "P1"]);
        assert_eq!(
            engine.encounter().phase(),
            TurnPhase::AwaitingPlayerAction(0)
        );

        // Both enemies struck the first living player.
        let p1 = encounter.entity(P1).unwrap();
        assert_eq!(p1.current_hp(), 80.0);
        assert_eq!(p1.stats.total_damage_taken, 20.0);
        assert_eq!(encounter.entity(E1).unwrap().stats.actions_taken, 1);
    }

    #[test]
    fn enemy_dying_before_its_turn_is_skipped() {
        let mut encounter = skirmish();
        started(&mut encounter);
        let mut engine = CombatEngine::new(&mut encounter, &First);

        engine.execute(&Command::AdvanceTurn).unwrap();
        // P2 kills E1 while the cursor sits on P2.
        engine
            .execute(&Command::Attack {
                actor: P2,
                target: E1,
                element: None,
                damage: BaseDamageSpec::Fixed(500.0),
            })
            .unwrap();
        assert_eq!(order(engine.encounter()), vec![P1, P2, E2]);

        let events = engine.execute(&Command::AdvanceTurn).unwrap();
        assert_eq!(names(&events), vec!["E2", "P1"]);
        assert!(!order(&encounter).contains(&E1));
    }

    #[test]
    fn cursor_survives_the_current_enemy_dying() {
        let mut encounter = skirmish();
        started(&mut encounter);
        // E1 burns to death on its own tick.
        let e1 = encounter.entity_mut(E1).unwrap();
        e1.set_debuff(DebuffKind::Burning, DebuffState::damage_over_time(100.0, 3));

        let mut engine = CombatEngine::new(&mut encounter, &First);
        engine.execute(&Command::AdvanceTurn).unwrap();
        let events = engine.execute(&Command::AdvanceTurn).unwrap();

        assert_eq!(names(&events), vec!["E1", "E2", "P1"]);
        assert!(events.contains(&CombatEvent::Defeated {
            name: "E1".into(),
            side: Side::Enemy
        }));
        assert_eq!(order(&encounter), vec![P1, P2, E2]);
        assert_eq!(encounter.turn_order().cursor(), 0);
    }

    #[test]
    fn frozen_enemy_loses_its_turn_then_thaws() {
        let mut encounter = skirmish();
        started(&mut encounter);
        let mut engine = CombatEngine::new(&mut encounter, &First);

        let attack = |actor, element| Command::Attack {
            actor,
            target: E1,
            element: Some(element),
            damage: BaseDamageSpec::Fixed(0.0),
        };
        engine.execute(&attack(P1, Element::Cryo)).unwrap();
        engine.execute(&Command::AdvanceTurn).unwrap();
        engine.execute(&attack(P2, Element::Hydro)).unwrap();
        assert!(engine.encounter().entity(E1).unwrap().is_frozen());

        let events = engine.execute(&Command::AdvanceTurn).unwrap();
        assert!(events.iter().any(|event| matches!(
            event,
            CombatEvent::ActionRejected { actor, .. } if actor == "E1"
        )));
        assert!(events.contains(&CombatEvent::DebuffEnded {
            target: "E1".into(),
            debuff: DebuffKind::Freeze
        }));

        let e1 = encounter.entity(E1).unwrap();
        assert!(!e1.is_frozen());
        assert_eq!(e1.stats.actions_taken, 0);
        // Only E2 landed a hit.
        assert_eq!(encounter.entity(P1).unwrap().current_hp(), 90.0);
    }

    #[test]
    fn wiping_the_party_ends_the_encounter() {
        let mut encounter = Encounter::builder()
            .config(crate::config::CombatConfig::new().with_enemy_attack_damage(500.0))
            .player(PlayerRecord::new("P1", 100.0, 1))
            .enemy(EnemyTemplate::new("E1", 50.0).with_initiative(10))
            .build(&First)
            .unwrap();

        let events = started(&mut encounter);
        assert_eq!(
            events.last(),
            Some(&CombatEvent::EncounterEnded(
                EncounterOutcome::AllPlayersDefeated
            ))
        );
        assert_eq!(encounter.phase(), TurnPhase::AllPlayersDefeated);
        assert!(encounter.players().is_empty());
    }

    #[test]
    fn removal_bookkeeping_matches_turn_order() {
        let mut order = TurnOrder::from_sequence([P1, P2, E1, E2]).with_cursor(2);
        order.remove(E1);
        assert_eq!(order.step(), Some(E2));
        assert_eq!(order.step(), Some(P1));
    }
}
