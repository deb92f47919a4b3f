/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Flat damage an enemy deals to a random living player on its turn.
    pub enemy_attack_damage: f64,
    /// Number of most recent log lines a front end is expected to render.
    pub event_window: usize,
    /// Base damage used when a command specifies neither an override nor dice.
    pub default_base_damage: f64,
    /// Die rolled for enemies whose template carries no fixed initiative.
    pub initiative_die: u32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_PLAYERS: usize = 8;
    pub const MAX_ENEMIES: usize = 16;
    /// One slot per [`crate::DebuffKind`] variant.
    pub const MAX_DEBUFFS: usize = 10;
    /// Upper bound on dice rolled for a single attack.
    pub const MAX_DICE: u32 = 100;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ENEMY_ATTACK_DAMAGE: f64 = 10.0;
    pub const DEFAULT_EVENT_WINDOW: usize = 10;
    pub const DEFAULT_BASE_DAMAGE: f64 = 1.0;
    pub const DEFAULT_INITIATIVE_DIE: u32 = 20;

    pub fn new() -> Self {
        Self {
            enemy_attack_damage: Self::DEFAULT_ENEMY_ATTACK_DAMAGE,
            event_window: Self::DEFAULT_EVENT_WINDOW,
            default_base_damage: Self::DEFAULT_BASE_DAMAGE,
            initiative_die: Self::DEFAULT_INITIATIVE_DIE,
        }
    }

    pub fn with_enemy_attack_damage(mut self, enemy_attack_damage: f64) -> Self {
        self.enemy_attack_damage = enemy_attack_damage;
        self
    }

    pub fn with_event_window(mut self, event_window: usize) -> Self {
        self.event_window = event_window;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use strum::EnumCount;

    use super::*;
    use crate::DebuffKind;

    #[test]
    fn debuff_capacity_covers_every_kind() {
        assert_eq!(CombatConfig::MAX_DEBUFFS, DebuffKind::COUNT);
    }

    #[test]
    fn builders_override_defaults() {
        let config = CombatConfig::new()
            .with_enemy_attack_damage(25.0)
            .with_event_window(4);
        assert_eq!(config.enemy_attack_damage, 25.0);
        assert_eq!(config.event_window, 4);
        assert_eq!(config.default_base_damage, CombatConfig::DEFAULT_BASE_DAMAGE);
    }
}
