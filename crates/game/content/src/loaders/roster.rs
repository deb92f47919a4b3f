//! Player roster loader.

use std::path::Path;

use combat_core::PlayerRecord;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Roster structure for RON files. Order is preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    pub players: Vec<PlayerRecord>,
}

/// Loader for the persisted player roster.
pub struct RosterLoader;

impl RosterLoader {
    /// Load the player roster from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<PlayerRecord>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<PlayerRecord>> {
        let roster: Roster = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        Ok(roster.players)
    }
}
