//! Combat events and the append-only encounter log.
//!
//! Every command produces an ordered list of [`CombatEvent`]s. Their `Display`
//! impl is the human-readable line a front end shows; the typed payload lets
//! tests and tooling inspect outcomes without parsing text.

use core::fmt;

use crate::command::RolledDamage;
use crate::reaction::ReactionKind;
use crate::state::{ActionBlock, DebuffKind, Element, ElementList, ShieldKind, Side};

/// How an encounter ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterOutcome {
    AllEnemiesDefeated,
    AllPlayersDefeated,
}

/// Condition reported by a status query.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusFlag {
    Frozen,
    Petrified,
    Shielded(ShieldKind),
}

impl fmt::Display for StatusFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frozen => f.write_str("Frozen"),
            Self::Petrified => f.write_str("Petrified"),
            Self::Shielded(kind) => write!(f, "Shielded ({})", kind.label()),
        }
    }
}

/// One line of combat output.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    TurnStarted {
        actor: String,
        side: Side,
    },
    DamageRolled {
        actor: String,
        rolled: RolledDamage,
    },
    ElementApplied {
        target: String,
        element: Element,
    },
    ElementAlreadyApplied {
        target: String,
        element: Element,
    },
    ReactionTriggered {
        target: String,
        reaction: ReactionKind,
        description: String,
    },
    Damaged {
        target: String,
        amount: f64,
        remaining_hp: f64,
    },
    Immune {
        target: String,
        element: Element,
    },
    Healed {
        target: String,
        amount: f64,
        current_hp: f64,
    },
    DebuffApplied {
        target: String,
        debuff: DebuffKind,
        turns: i32,
    },
    DotApplied {
        target: String,
        debuff: DebuffKind,
        per_turn: f64,
        turns: i32,
    },
    DotDamage {
        target: String,
        debuff: DebuffKind,
        amount: f64,
        remaining_hp: f64,
    },
    DebuffEnded {
        target: String,
        debuff: DebuffKind,
    },
    ShieldGranted {
        target: String,
        shield: ShieldKind,
        turns: i32,
    },
    ShieldExpired {
        target: String,
    },
    ElementSwirled {
        target: String,
        element: Element,
    },
    ElementsCleared {
        target: String,
    },
    SporesBurst {
        target: String,
        amount: f64,
        remaining_hp: f64,
    },
    ActionRejected {
        actor: String,
        reason: ActionBlock,
    },
    EnemyAttack {
        enemy: String,
        target: String,
        amount: f64,
        remaining_hp: f64,
    },
    Defeated {
        name: String,
        side: Side,
    },
    EncounterEnded(EncounterOutcome),
    Status {
        name: String,
        flags: Vec<StatusFlag>,
    },
    Elements {
        name: String,
        elements: ElementList,
    },
    SwirledElements {
        name: String,
        elements: ElementList,
    },
    /// Informational line for refused commands.
    Notice(String),
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TurnStarted { actor, side } => write!(f, "It is now {actor}'s turn ({side})."),
            Self::DamageRolled { actor, rolled } => write!(f, "{actor} {rolled}"),
            Self::ElementApplied { target, element } => {
                write!(f, "{element} applied to {target}.")
            }
            Self::ElementAlreadyApplied { target, element } => {
                write!(f, "{target} already has {element} applied.")
            }
            Self::ReactionTriggered {
                target,
                reaction,
                description,
            } => write!(f, "{reaction} triggered on {target}! {description}"),
            Self::Damaged {
                target,
                amount,
                remaining_hp,
            } => write!(
                f,
                "{target} takes {amount:.2} damage! Remaining HP: {remaining_hp:.2}"
            ),
            Self::Immune { target, element } => {
                write!(f, "{target} is immune to {element} damage!")
            }
            Self::Healed {
                target,
                amount,
                current_hp,
            } => write!(
                f,
                "{target} heals for {amount:.2} HP! Current HP: {current_hp:.2}"
            ),
            Self::DebuffApplied {
                target,
                debuff,
                turns,
            } => write!(f, "{target} is affected by {debuff} for {turns} turn(s)."),
            Self::DotApplied {
                target,
                debuff,
                per_turn,
                turns,
            } => write!(
                f,
                "{debuff} will deal {per_turn:.2} damage per turn to {target} for {turns} turns."
            ),
            Self::DotDamage {
                target,
                debuff,
                amount,
                remaining_hp,
            } => write!(
                f,
                "{debuff} deals {amount:.2} damage to {target}. Remaining HP: {remaining_hp:.2}"
            ),
            Self::DebuffEnded { target, debuff } => write!(f, "{debuff} on {target} has ended."),
            Self::ShieldGranted {
                target,
                shield,
                turns,
            } => write!(f, "{target} gains a {shield} shield for {turns} turn(s)."),
            Self::ShieldExpired { target } => write!(f, "{target}'s shield has expired."),
            Self::ElementSwirled { target, element } => {
                write!(f, "Swirled {element} applied to {target}.")
            }
            Self::ElementsCleared { target } => write!(f, "Elements cleared from {target}."),
            Self::SporesBurst {
                target,
                amount,
                remaining_hp,
            } => write!(
                f,
                "Toxic Spores exploded on {target} for {amount:.2} damage! Remaining HP: {remaining_hp:.2}"
            ),
            Self::ActionRejected { actor, reason } => {
                write!(f, "{actor} is {reason} and cannot act this turn.")
            }
            Self::EnemyAttack {
                enemy,
                target,
                amount,
                remaining_hp,
            } => write!(
                f,
                "{enemy} attacks {target} for {amount:.2} damage! {target}'s HP: {remaining_hp:.2}"
            ),
            Self::Defeated { name, .. } => write!(f, "{name} has been defeated!"),
            Self::EncounterEnded(EncounterOutcome::AllEnemiesDefeated) => {
                f.write_str("All enemies have been defeated!")
            }
            Self::EncounterEnded(EncounterOutcome::AllPlayersDefeated) => {
                f.write_str("All players have been defeated!")
            }
            Self::Status { name, flags } if flags.is_empty() => {
                write!(f, "{name} has no special status effects.")
            }
            Self::Status { name, flags } => {
                write!(f, "{name} status: ")?;
                for (index, flag) in flags.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{flag}")?;
                }
                Ok(())
            }
            Self::Elements { name, elements } => {
                write!(f, "Current elements on {name}: {elements}")
            }
            Self::SwirledElements { name, elements } => {
                write!(f, "Swirled elements on {name}: {elements}")
            }
            Self::Notice(message) => f.write_str(message),
        }
    }
}

/// Append-only event history of an encounter.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventLog {
    events: Vec<CombatEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = CombatEvent>) {
        self.events.extend(events);
    }

    /// The last `count` events, oldest first.
    pub fn recent(&self, count: usize) -> &[CombatEvent] {
        let start = self.events.len().saturating_sub(count);
        &self.events[start..]
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatEvent> {
        self.events.iter()
    }
}
