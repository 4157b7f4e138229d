//! Content factory for building battle inputs from data files.

use std::path::{Path, PathBuf};

use battle_core::{Actor, BattleConfig, BattleEnv, MasterDataSnapshot};
use tracing::debug;

use crate::loaders::{ConfigLoader, LoadResult, MasterDataLoader, PartyLoader};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── battle.toml
/// ├── enemies.ron
/// ├── skills.ron
/// ├── spells.ron
/// ├── statuses.ron
/// └── party.ron
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

    /// Load battle configuration from `battle.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("battle.toml");
        if !path.exists() {
            debug!(path = %path.display(), "no battle config, using defaults");
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load enemies, skills, spells and statuses.
    pub fn load_master_data(&self) -> LoadResult<MasterDataSnapshot> {
        MasterDataLoader::load(&self.data_dir)
    }

    /// Load `party.ron` and compile each member against `env`.
    pub fn load_party(&self, env: &BattleEnv<'_>) -> LoadResult<Vec<Actor>> {
        let path = self.data_dir.join("party.ron");
        PartyLoader::load_actors(&path, env)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
