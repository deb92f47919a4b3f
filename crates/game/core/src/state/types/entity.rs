//! Combat entity state shared by players and enemies.
//!
//! Fields that carry invariants (`current_hp`, element lists, debuffs, shield,
//! control flags) are private. They change only through crate-internal methods
//! used by the damage path, the status tick and the reaction resolver, so a
//! front end holding `&CombatEntity` can read everything and break nothing.

use strum::Display;

use crate::env::{EnemyTemplate, PlayerRecord};
use crate::reaction::ClearRule;
use crate::state::{
    DebuffKind, DebuffState, Debuffs, Element, ElementList, ElementMask, EntityId, Shield, Side,
};

/// Player-only data carried over from the roster record.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerProfile {
    pub armor_class: i32,
    pub movement: i32,
    /// Default attack element.
    pub element: Option<Element>,
}

/// Running per-entity counters. Never reset during an encounter.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityStats {
    pub total_damage_dealt: f64,
    pub total_damage_taken: f64,
    pub actions_taken: u32,
}

/// Why an entity cannot take its action this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum ActionBlock {
    Frozen,
    Petrified,
    Disarmed,
}

/// A participant in an encounter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatEntity {
    pub id: EntityId,
    pub name: String,
    pub side: Side,
    pub defense: f64,
    pub initiative: i32,
    pub profile: Option<PlayerProfile>,
    pub stats: EntityStats,

    max_hp: f64,
    current_hp: f64,
    applied: ElementList,
    swirled: ElementList,
    debuffs: Debuffs,
    shield: Option<Shield>,
    is_frozen: bool,
    is_petrified: bool,
    damage_log: Vec<f64>,
}

impl CombatEntity {
    fn base(id: EntityId, name: String, side: Side, max_hp: f64) -> Self {
        Self {
            id,
            name,
            side,
            defense: 0.0,
            initiative: 0,
            profile: None,
            stats: EntityStats::default(),
            max_hp,
            current_hp: max_hp,
            applied: ElementList::new(),
            swirled: ElementList::new(),
            debuffs: Debuffs::new(),
            shield: None,
            is_frozen: false,
            is_petrified: false,
            damage_log: Vec::new(),
        }
    }

    /// Seeds a player from its roster record.
    pub fn player(id: EntityId, record: &PlayerRecord) -> Self {
        let mut entity = Self::base(id, record.name.clone(), Side::Player, record.max_hp);
        entity.initiative = record.initiative;
        entity.profile = Some(PlayerProfile {
            armor_class: record.armor_class,
            movement: record.movement,
            element: record.element,
        });
        entity
    }

    /// Spawns an enemy from a template with an already resolved initiative.
    pub fn enemy(id: EntityId, template: &EnemyTemplate, initiative: i32) -> Self {
        let mut entity = Self::base(id, template.name.clone(), Side::Enemy, template.max_hp);
        entity.defense = template.defense.max(0.0);
        entity.initiative = initiative;
        entity
    }

    // ===== read access =====

    pub fn max_hp(&self) -> f64 {
        self.max_hp
    }

    pub fn current_hp(&self) -> f64 {
        self.current_hp
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0.0
    }

    pub fn applied_elements(&self) -> &ElementList {
        &self.applied
    }

    pub fn swirled_elements(&self) -> &ElementList {
        &self.swirled
    }

    /// Union of applied and swirled tags, as seen by reaction matching.
    pub fn element_mask(&self) -> ElementMask {
        self.applied.mask() | self.swirled.mask()
    }

    pub fn debuffs(&self) -> &Debuffs {
        &self.debuffs
    }

    pub fn has_debuff(&self, kind: DebuffKind) -> bool {
        self.debuffs.contains(kind)
    }

    pub fn shield(&self) -> Option<&Shield> {
        self.shield.as_ref()
    }

    pub fn is_frozen(&self) -> bool {
        self.is_frozen
    }

    pub fn is_petrified(&self) -> bool {
        self.is_petrified
    }

    pub fn damage_log(&self) -> &[f64] {
        &self.damage_log
    }

    /// The player's default attack element, if any.
    pub fn default_element(&self) -> Option<Element> {
        self.profile.as_ref().and_then(|profile| profile.element)
    }

    /// Returns the reason this entity cannot act, if any.
    pub fn action_block(&self) -> Option<ActionBlock> {
        if self.is_frozen {
            Some(ActionBlock::Frozen)
        } else if self.is_petrified {
            Some(ActionBlock::Petrified)
        } else if self.debuffs.contains(DebuffKind::Disarmed) {
            Some(ActionBlock::Disarmed)
        } else {
            None
        }
    }

    // ===== elements =====

    pub(crate) fn apply_element(&mut self, element: Element) -> bool {
        self.applied.insert(element)
    }

    pub(crate) fn add_swirled(&mut self, element: Element) -> bool {
        self.swirled.insert(element)
    }

    /// Clears tags from both namespaces. Returns true if anything was removed.
    pub(crate) fn clear_elements(&mut self, rule: &ClearRule) -> bool {
        match rule {
            ClearRule::All => {
                let applied = self.applied.clear();
                let swirled = self.swirled.clear();
                applied || swirled
            }
            ClearRule::Only(mask) => {
                let applied = self.applied.remove_all(*mask);
                let swirled = self.swirled.remove_all(*mask);
                applied || swirled
            }
            ClearRule::Nothing => false,
        }
    }

    // ===== hit points =====

    /// Subtracts already-computed damage. Only the damage path calls this.
    pub(crate) fn lose_hp(&mut self, amount: f64) {
        let amount = amount.max(0.0);
        self.current_hp = (self.current_hp - amount).clamp(0.0, self.max_hp);
        self.damage_log.push(amount);
        self.stats.total_damage_taken += amount;
    }

    pub(crate) fn restore_hp(&mut self, amount: f64) {
        self.current_hp = (self.current_hp + amount.max(0.0)).clamp(0.0, self.max_hp);
    }

    // ===== debuffs and shield =====

    /// Applies or refreshes a debuff, keeping control flags in sync.
    pub(crate) fn set_debuff(&mut self, kind: DebuffKind, state: DebuffState) {
        self.debuffs.insert(kind, state);
        self.sync_control_flags();
    }

    /// Decrements every debuff and returns the kinds that expired.
    pub(crate) fn expire_debuffs(&mut self) -> Vec<DebuffKind> {
        let expired = self.debuffs.decrement_all().into_iter().collect();
        self.sync_control_flags();
        expired
    }

    /// Replaces any current shield.
    pub(crate) fn grant_shield(&mut self, shield: Shield) {
        self.shield = Some(shield);
    }

    /// Decrements the shield. Returns true if it expired.
    pub(crate) fn decay_shield(&mut self) -> bool {
        let Some(shield) = self.shield.as_mut() else {
            return false;
        };
        shield.remaining_turns -= 1;
        if shield.remaining_turns <= 0 {
            self.shield = None;
            return true;
        }
        false
    }

    fn sync_control_flags(&mut self) {
        self.is_frozen = self.debuffs.contains(DebuffKind::Freeze);
        self.is_petrified = self.debuffs.contains(DebuffKind::Petrify);
    }
}
