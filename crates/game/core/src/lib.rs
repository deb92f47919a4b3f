//! Deterministic elemental combat rules shared by every front end.
//!
//! `combat-core` defines the canonical rules of an encounter: elemental tags,
//! the reaction table and its priority matching, combat entities with their
//! status effects, the damage path, and the initiative-based turn scheduler.
//! All state lives in one [`Encounter`] and every mutation flows through
//! [`CombatEngine`], which emits an ordered list of [`CombatEvent`]s per
//! command. Randomness is injected through [`RngOracle`] so that resolution is
//! reproducible for a given seed.
pub mod combat;
pub mod command;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod reaction;
pub mod state;

pub use combat::{
    DamageOutcome, apply_heal, calculate_damage, resolve_damage, status_report, tick_status,
};
pub use command::{BaseDamageSpec, Command, RolledDamage};
pub use config::CombatConfig;
pub use engine::CombatEngine;
pub use env::{EnemyTemplate, PcgRng, PlayerRecord, RngOracle, compute_seed, context};
pub use error::{CombatError, CommandError, ErrorSeverity, SetupError};
pub use event::{CombatEvent, EncounterOutcome, EventLog, StatusFlag};
pub use reaction::{
    ClearRule, MatchContext, ReactionDefinition, ReactionKind, ReactionRequirement, ReactionTable,
    default_definitions, resolve_attack,
};
pub use state::{
    ActionBlock, CombatEntity, Debuff, DebuffKind, DebuffState, Debuffs, Element, ElementList,
    ElementMask, Encounter, EncounterBuilder, EntityId, EntityStats, PlayerProfile, Shield,
    ShieldKind, Side, TurnOrder, TurnPhase,
};
