//! Common error infrastructure for combat-core.
//!
//! Nothing in the combat core is fatal to the process: every error describes a
//! command or setup request that was refused without touching encounter state.
//! Callers are expected to surface the error as an informational log line and
//! keep the encounter running.

use crate::state::EntityId;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the same command may succeed later or with another target.
    ///
    /// Examples: no enemies left, not this actor's turn
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown entity, enemy commanded as a player
    Validation,

    /// Fatal error - encounter state corrupted, cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all combat-core errors.
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

/// Reasons a command was refused by the engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandError {
    #[error("entity {0} is not part of this encounter")]
    UnknownEntity(EntityId),

    #[error("entity {0} is not a player and cannot be commanded")]
    NotAPlayer(EntityId),

    #[error("entity {0} is not an enemy and cannot be attacked")]
    NotAnEnemy(EntityId),

    #[error("it is not {actor}'s turn (current actor is {current})")]
    ActorNotCurrent { actor: EntityId, current: EntityId },

    #[error("entity {0} has already acted this turn")]
    AlreadyActed(EntityId),

    #[error("there are no enemies left to attack")]
    NoLivingEnemies,

    #[error("the encounter has already ended")]
    EncounterFinished,
}

impl CombatError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownEntity(_) | Self::NotAPlayer(_) | Self::NotAnEnemy(_) => {
                ErrorSeverity::Validation
            }
            Self::ActorNotCurrent { .. }
            | Self::AlreadyActed(_)
            | Self::NoLivingEnemies
            | Self::EncounterFinished => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownEntity(_) => "unknown_entity",
            Self::NotAPlayer(_) => "not_a_player",
            Self::NotAnEnemy(_) => "not_an_enemy",
            Self::ActorNotCurrent { .. } => "actor_not_current",
            Self::AlreadyActed(_) => "already_acted",
            Self::NoLivingEnemies => "no_living_enemies",
            Self::EncounterFinished => "encounter_finished",
        }
    }
}

/// Errors raised while seeding an encounter from roster and enemy data.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SetupError {
    #[error("an encounter needs at least one player")]
    NoPlayers,

    #[error("an encounter needs at least one enemy")]
    NoEnemies,

    #[error("too many players: {count} (max {max})")]
    TooManyPlayers { count: usize, max: usize },

    #[error("too many enemies: {count} (max {max})")]
    TooManyEnemies { count: usize, max: usize },

    #[error("'{name}' has invalid max hp {max_hp}")]
    InvalidMaxHp { name: String, max_hp: f64 },
}

impl CombatError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoPlayers => "no_players",
            Self::NoEnemies => "no_enemies",
            Self::TooManyPlayers { .. } => "too_many_players",
            Self::TooManyEnemies { .. } => "too_many_enemies",
            Self::InvalidMaxHp { .. } => "invalid_max_hp",
        }
    }
}
