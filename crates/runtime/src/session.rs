//! Session orchestration for one encounter.
//!
//! [`Session`] owns the [`Encounter`] and the RNG oracle, routes commands
//! through [`CombatEngine`], and turns refused commands into log notices so a
//! front end never has to handle a fatal path.

use combat_content::ContentFactory;
use combat_core::{
    CombatEngine, CombatEvent, Command, EncounterOutcome, EnemyTemplate, Encounter, EntityId, PcgRng, PlayerRecord, ReactionTable, RngOracle, TurnPhase,
};
use tracing::{debug, info, warn};

use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::input::AttackInput;

/// A running encounter.
pub struct Session {
    config: RuntimeConfig,
    encounter: Encounter,
    rng: Box<dyn RngOracle>,
}

impl Session {
    /// Create a new session builder
    pub fn builder(config: RuntimeConfig) -> SessionBuilder {
        SessionBuilder::new(config)
    }

    /// Seeds a session from the roster, enemy catalog and reaction table in
    /// `config.data_dir`.
    pub fn load(config: RuntimeConfig) -> Result<Self> {
        let factory = ContentFactory::new(config.data_dir());
        let reactions = factory.load_reactions()?;
        let roster = factory.load_roster()?;
        let enemies = factory.load_enemies()?;

        Self::builder(config)
            .reactions(reactions)
            .players(roster)
            .enemies(enemies)
            .build()
    }

    /// Executes a command. A refused command becomes a single notice line.
    pub fn submit(&mut self, command: &Command) -> Vec<CombatEvent> {
        match self.try_submit(command) {
            Ok(events) => events,
            Err(err) => {
                warn!(
                    error = %err,
                    code = err.error_code(),
                    severity = err.severity().as_str(),
                    ?command,
                    "command refused"
                );
                let line = err.to_string();
                self.encounter.note(line.clone());
                vec![CombatEvent::Notice(line)]
            }
        }
    }

    /// Executes a command, surfacing refusals as errors instead of notices.
    pub fn try_submit(&mut self, command: &Command) -> Result<Vec<CombatEvent>> {
        info!(?command, nonce = self.encounter.nonce(), "executing command");
        let events = CombatEngine::new(&mut self.encounter, self.rng.as_ref()).execute(command)?;
        trace_events(&events);
        Ok(events)
    }

    pub fn attack(
        &mut self,
        actor: EntityId,
        target: EntityId,
        input: &AttackInput<'_>,
    ) -> Vec<CombatEvent> {
        self.submit(&input.to_command(actor, target))
    }

    pub fn advance(&mut self) -> Vec<CombatEvent> {
        self.submit(&Command::AdvanceTurn)
    }

    pub fn status(&mut self, entity: EntityId) -> Vec<CombatEvent> {
        self.submit(&Command::StatusQuery { entity })
    }

    /// The most recent `event_window` log lines, oldest first.
    pub fn recent_lines(&self) -> Vec<String> {
        self.encounter
            .log()
            .recent(self.config.combat.event_window)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    pub fn encounter(&self) -> &Encounter {
        &self.encounter
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn current_actor(&self) -> Option<EntityId> {
        self.encounter.current_actor()
    }

    /// Looks up a living entity by display name.
    pub fn find(&self, name: &str) -> Option<EntityId> {
        self.encounter
            .players()
            .iter()
            .chain(self.encounter.enemies())
            .find(|entity| entity.name == name)
            .map(|entity| entity.id)
    }

    pub fn outcome(&self) -> Option<EncounterOutcome> {
        match self.encounter.phase() {
            TurnPhase::AllEnemiesDefeated => Some(EncounterOutcome::AllEnemiesDefeated),
            TurnPhase::AllPlayersDefeated => Some(EncounterOutcome::AllPlayersDefeated),
            TurnPhase::AwaitingPlayerAction(_) | TurnPhase::ResolvingEnemyAction(_) => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.outcome().is_some()
    }
}

fn trace_events(events: &[CombatEvent]) {
    for event in events {
        match event {
            CombatEvent::ReactionTriggered {
                target, reaction, ..
            } => debug!(%target, %reaction, "reaction triggered"),
            CombatEvent::DotDamage { .. }
            | CombatEvent::SporesBurst { .. }
            | CombatEvent::DebuffEnded { .. }
            | CombatEvent::ShieldExpired { .. } => debug!(%event, "status tick"),
            CombatEvent::Defeated { name, side } => info!(%name, ?side, "entity defeated"),
            CombatEvent::EncounterEnded(outcome) => info!(?outcome, "encounter finished"),
            _ => {}
        }
    }
}

/// Builder for [`Session`].
pub struct SessionBuilder {
    config: RuntimeConfig,
    rng: Option<Box<dyn RngOracle>>,
    reactions: Option<ReactionTable>,
    players: Vec<PlayerRecord>,
    enemies: Vec<EnemyTemplate>,
}

impl SessionBuilder {
    fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            rng: None,
            reactions: None,
            players: Vec::new(),
            enemies: Vec::new(),
        }
    }

    /// Override the RNG oracle. Defaults to [`PcgRng`].
    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    pub fn reactions(mut self, reactions: ReactionTable) -> Self {
        self.reactions = Some(reactions);
        self
    }

    pub fn players(mut self, records: impl IntoIterator<Item = PlayerRecord>) -> Self {
        self.players.extend(records);
        self
    }

    pub fn enemies(mut self, templates: impl IntoIterator<Item = EnemyTemplate>) -> Self {
        self.enemies.extend(templates);
        self
    }

    /// Seeds the encounter and runs any enemy turns ahead of the first player.
    pub fn build(self) -> Result<Session> {
        let rng = self.rng.unwrap_or_else(|| Box::new(PcgRng));

        let mut builder = Encounter::builder()
            .seed(self.config.game_seed)
            .config(self.config.combat.clone())
            .players(self.players)
            .enemies(self.enemies);
        if let Some(reactions) = self.reactions {
            builder = builder.reactions(reactions);
        }
        let mut encounter = builder.build(rng.as_ref())?;

        info!(
            seed = encounter.game_seed,
            players = encounter.players().len(),
            enemies = encounter.enemies().len(),
            reactions = encounter.reactions().len(),
            "encounter started"
        );
        let events = CombatEngine::new(&mut encounter, rng.as_ref()).start();
        trace_events(&events);

        Ok(Session {
            config: self.config,
            encounter,
            rng,
        })
    }
}
