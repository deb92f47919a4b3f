//! Content factory for loading encounter content from a data directory.

use std::path::{Path, PathBuf};

use combat_core::{CombatConfig, EnemyTemplate, PlayerRecord, ReactionTable};

use crate::loaders::{ConfigLoader, EnemyLoader, LoadResult, ReactionLoader, RosterLoader};

/// Content factory that loads all encounter content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── reactions.ron
/// ├── roster.ron
/// └── enemies.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load the reaction table from `reactions.ron`.
    pub fn load_reactions(&self) -> LoadResult<ReactionTable> {
        let path = self.data_dir.join("reactions.ron");
        ReactionLoader::load(&path)
    }

    /// Load the player roster from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<Vec<PlayerRecord>> {
        let path = self.data_dir.join("roster.ron");
        RosterLoader::load(&path)
    }

    /// Load the enemy catalog from `enemies.ron`.
    pub fn load_enemies(&self) -> LoadResult<Vec<EnemyTemplate>> {
        let path = self.data_dir.join("enemies.ron");
        EnemyLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn loads_each_file_from_the_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "event_window = 4\n").unwrap();
        fs::write(
            dir.path().join("roster.ron"),
            r#"(players: [(name: "Ayla", max_hp: 100.0, armor_class: 12, movement: 30, initiative: 10)])"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("enemies.ron"),
            r#"(enemies: [(name: "Slime", max_hp: 500.0, defense: 20.0)])"#,
        )
        .unwrap();

        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap().event_window, 4);
        assert_eq!(factory.load_roster().unwrap()[0].name, "Ayla");
        assert_eq!(factory.load_enemies().unwrap()[0].defense, 20.0);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentFactory::new(dir.path()).load_reactions().unwrap_err();
        assert!(err.to_string().contains("reactions.ron"));
    }

    #[test]
    fn shipped_data_dir_loads() {
        let factory = ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../../../data"));
        assert_eq!(factory.load_reactions().unwrap().len(), 24);
        assert_eq!(factory.load_roster().unwrap().len(), 4);
        assert_eq!(factory.load_enemies().unwrap().len(), 3);
        assert_eq!(factory.load_config().unwrap(), CombatConfig::default());
    }
}
