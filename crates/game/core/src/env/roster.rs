//! Roster records and enemy templates.
//!
//! These are the external seeding interface of an encounter: an ordered list of
//! player records kept by the roster collaborator and the enemy catalog. The
//! core reads them once when the encounter is built and never writes them back.

use crate::state::Element;

/// A persisted player record.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerRecord {
    pub name: String,
    pub max_hp: f64,
    pub armor_class: i32,
    pub movement: i32,
    pub initiative: i32,
    /// Element used when a command does not name one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Option<Element>,
}

impl PlayerRecord {
    pub fn new(name: impl Into<String>, max_hp: f64, initiative: i32) -> Self {
        Self {
            name: name.into(),
            max_hp,
            armor_class: 10,
            movement: 30,
            initiative,
            element: None,
        }
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = Some(element);
        self
    }
}

/// Template an enemy is spawned from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub name: String,
    pub max_hp: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense: f64,
    /// Fixed initiative; rolled with the configured die when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub initiative: Option<i32>,
}

impl EnemyTemplate {
    pub fn new(name: impl Into<String>, max_hp: f64) -> Self {
        Self {
            name: name.into(),
            max_hp,
            defense: 0.0,
            initiative: None,
        }
    }

    pub fn with_defense(mut self, defense: f64) -> Self {
        self.defense = defense;
        self
    }

    pub fn with_initiative(mut self, initiative: i32) -> Self {
        self.initiative = Some(initiative);
        self
    }
}
