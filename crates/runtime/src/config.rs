use std::path::{Path, PathBuf};

use combat_content::ContentFactory;
use combat_core::CombatConfig;

use crate::error::Result;

/// Session configuration.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    /// Seed every roll in the encounter is derived from.
    pub game_seed: u64,
    /// Directory holding `reactions.ron`, `roster.ron`, `enemies.ron` and `config.toml`.
    pub data_dir: PathBuf,
}

impl RuntimeConfig {
    pub const DEFAULT_DATA_DIR: &'static str = "data";

    /// Reads `config.toml` from `data_dir`.
    pub fn from_data_dir(data_dir: impl Into<PathBuf>, game_seed: u64) -> Result<Self> {
        let data_dir = data_dir.into();
        let combat = ContentFactory::new(&data_dir).load_config()?;
        Ok(Self {
            combat,
            game_seed,
            data_dir,
        })
    }

    pub fn with_seed(mut self, game_seed: u64) -> Self {
        self.game_seed = game_seed;
        self
    }

    pub fn with_combat(mut self, combat: CombatConfig) -> Self {
        self.combat = combat;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            game_seed: 0,
            data_dir: PathBuf::from(Self::DEFAULT_DATA_DIR),
        }
    }
}
