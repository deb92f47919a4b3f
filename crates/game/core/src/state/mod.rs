//! Authoritative encounter state.
//!
//! [`Encounter`] owns every combat entity, the turn order, the scheduler phase
//! and the event log. Front ends receive `&Encounter` for display and mutate it
//! exclusively through [`crate::CombatEngine`].
pub mod types;

pub use types::{
    ActionBlock, CombatEntity, Debuff, DebuffKind, DebuffState, Debuffs, ELEMENT_COUNT, Element,
    ElementList, ElementMask, EntityId, EntityStats, PlayerProfile, Shield, ShieldKind, Side,
    TurnOrder, TurnPhase,
};

use crate::config::CombatConfig;
use crate::env::{EnemyTemplate, PlayerRecord, RngOracle, compute_seed, context};
use crate::error::SetupError;
use crate::event::{CombatEvent, EventLog};
use crate::reaction::ReactionTable;

/// One combat encounter between a party and a group of enemies.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Encounter {
    /// RNG seed for deterministic random generation.
    ///
    /// Set once when the encounter is built and never modified. Combined with
    /// `nonce` to derive a distinct seed for every roll.
    pub game_seed: u64,

    /// Executed-command counter.
    nonce: u64,

    pub config: CombatConfig,
    reactions: ReactionTable,

    players: Vec<CombatEntity>,
    enemies: Vec<CombatEntity>,

    turn: TurnOrder,
    phase: TurnPhase,
    /// The current player has used its action this turn.
    acted: bool,
    log: EventLog,
}

impl Encounter {
    pub fn builder() -> EncounterBuilder {
        EncounterBuilder::new()
    }

    // ===== read access =====

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn reactions(&self) -> &ReactionTable {
        &self.reactions
    }

    pub fn players(&self) -> &[CombatEntity] {
        &self.players
    }

    pub fn enemies(&self) -> &[CombatEntity] {
        &self.enemies
    }

    pub fn side(&self, side: Side) -> &[CombatEntity] {
        match side {
            Side::Player => &self.players,
            Side::Enemy => &self.enemies,
        }
    }

    pub fn turn_order(&self) -> &TurnOrder {
        &self.turn
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn has_acted(&self) -> bool {
        self.acted
    }

    pub fn current_actor(&self) -> Option<EntityId> {
        self.turn.current()
    }

    pub fn entity(&self, id: EntityId) -> Option<&CombatEntity> {
        self.players
            .iter()
            .chain(self.enemies.iter())
            .find(|entity| entity.id == id)
    }

    /// Ids of living members of `side`, in collection order.
    pub fn living_ids(&self, side: Side) -> Vec<EntityId> {
        self.side(side)
            .iter()
            .filter(|entity| entity.is_alive())
            .map(|entity| entity.id)
            .collect()
    }

    pub fn has_living(&self, side: Side) -> bool {
        self.side(side).iter().any(CombatEntity::is_alive)
    }

    /// Appends an informational line to the log. Combat state is untouched.
    pub fn note(&mut self, message: impl Into<String>) {
        self.log.push(CombatEvent::Notice(message.into()));
    }

    // ===== engine access =====

    pub(crate) fn entity_mut(&mut self, id: EntityId) -> Option<&mut CombatEntity> {
        self.players
            .iter_mut()
            .chain(self.enemies.iter_mut())
            .find(|entity| entity.id == id)
    }

    pub(crate) fn turn_mut(&mut self) -> &mut TurnOrder {
        &mut self.turn
    }

    pub(crate) fn set_phase(&mut self, phase: TurnPhase) {
        self.phase = phase;
    }

    pub(crate) fn set_acted(&mut self, acted: bool) {
        self.acted = acted;
    }

    pub(crate) fn log_mut(&mut self) -> &mut EventLog {
        &mut self.log
    }

    pub(crate) fn bump_nonce(&mut self) {
        self.nonce += 1;
    }

    /// Seed for a roll made by `actor` within the current command.
    pub(crate) fn roll_seed(&self, actor: EntityId, context: u32) -> u64 {
        compute_seed(self.game_seed, self.nonce, actor.0, context)
    }

    /// Drops every entity at 0 HP from its collection and the turn order.
    ///
    /// Returns the removed entities in turn-order position. Calling this when
    /// nothing is dead changes nothing.
    pub(crate) fn remove_defeated(&mut self) -> Vec<CombatEntity> {
        let mut removed = Vec::new();
        for collection in [&mut self.players, &mut self.enemies] {
            let mut index = 0;
            while index < collection.len() {
                if collection[index].is_alive() {
                    index += 1;
                } else {
                    removed.push(collection.remove(index));
                }
            }
        }

        let position = |id: EntityId| self.turn.iter().position(|entry| entry == id);
        removed.sort_by_key(|entity| position(entity.id));

        for entity in &removed {
            self.turn.remove(entity.id);
        }
        removed
    }
}

/// Seeds an [`Encounter`] from roster records and enemy templates.
#[derive(Clone, Debug, Default)]
pub struct EncounterBuilder {
    game_seed: u64,
    config: CombatConfig,
    reactions: Option<ReactionTable>,
    players: Vec<PlayerRecord>,
    enemies: Vec<EnemyTemplate>,
}

impl EncounterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(mut self, game_seed: u64) -> Self {
        self.game_seed = game_seed;
        self
    }

    pub fn config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the default reaction table.
    pub fn reactions(mut self, reactions: ReactionTable) -> Self {
        self.reactions = Some(reactions);
        self
    }

    pub fn player(mut self, record: PlayerRecord) -> Self {
        self.players.push(record);
        self
    }

    pub fn players(mut self, records: impl IntoIterator<Item = PlayerRecord>) -> Self {
        self.players.extend(records);
        self
    }

    pub fn enemy(mut self, template: EnemyTemplate) -> Self {
        self.enemies.push(template);
        self
    }

    pub fn enemies(mut self, templates: impl IntoIterator<Item = EnemyTemplate>) -> Self {
        self.enemies.extend(templates);
        self
    }

    /// Validates the rosters, allocates ids and orders the turn sequence.
    ///
    /// Ids are handed out from 1, players first. Enemies without a fixed
    /// initiative roll one on the configured die.
    pub fn build(self, rng: &dyn RngOracle) -> Result<Encounter, SetupError> {
        if self.players.is_empty() {
            return Err(SetupError::NoPlayers);
        }
        if self.enemies.is_empty() {
            return Err(SetupError::NoEnemies);
        }
        if self.players.len() > CombatConfig::MAX_PLAYERS {
            return Err(SetupError::TooManyPlayers {
                count: self.players.len(),
                max: CombatConfig::MAX_PLAYERS,
            });
        }
        if self.enemies.len() > CombatConfig::MAX_ENEMIES {
            return Err(SetupError::TooManyEnemies {
                count: self.enemies.len(),
                max: CombatConfig::MAX_ENEMIES,
            });
        }

        let invalid_hp = self
            .players
            .iter()
            .map(|record| (&record.name, record.max_hp))
            .chain(self.enemies.iter().map(|template| (&template.name, template.max_hp)))
            .find(|(_, max_hp)| !(max_hp.is_finite() && *max_hp > 0.0));
        if let Some((name, max_hp)) = invalid_hp {
            return Err(SetupError::InvalidMaxHp {
                name: name.clone(),
                max_hp,
            });
        }

        let mut next_id = 1u32;
        let mut allocate = || {
            let id = EntityId(next_id);
            next_id += 1;
            id
        };

        let players: Vec<CombatEntity> = self
            .players
            .iter()
            .map(|record| CombatEntity::player(allocate(), record))
            .collect();

        let enemies: Vec<CombatEntity> = self
            .enemies
            .iter()
            .map(|template| {
                let id = allocate();
                let initiative = template.initiative.unwrap_or_else(|| {
                    let seed = compute_seed(self.game_seed, 0, id.0, context::INITIATIVE);
                    rng.roll_die(seed, self.config.initiative_die) as i32
                });
                CombatEntity::enemy(id, template, initiative)
            })
            .collect();

        let turn = TurnOrder::from_initiative(
            players
                .iter()
                .chain(enemies.iter())
                .map(|entity| (entity.id, entity.initiative)),
        );

        let first_is_player = turn
            .current()
            .is_some_and(|id| players.iter().any(|player| player.id == id));
        let phase = if first_is_player {
            TurnPhase::AwaitingPlayerAction(0)
        } else {
            TurnPhase::ResolvingEnemyAction(0)
        };

        Ok(Encounter {
            game_seed: self.game_seed,
            nonce: 0,
            config: self.config,
            reactions: self.reactions.unwrap_or_default(),
            players,
            enemies,
            turn,
            phase,
            acted: false,
            log: EventLog::new(),
        })
    }
}
