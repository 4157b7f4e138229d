//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their defaults, so an empty file yields
    /// `BattleConfig::default()`.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.max_turns == 0 {
            anyhow::bail!("max_turns must be at least 1");
        }
        if config.rules.min_hit_chance > config.rules.max_hit_chance {
            anyhow::bail!(
                "min_hit_chance {} exceeds max_hit_chance {}",
                config.rules.min_hit_chance,
                config.rules.max_hit_chance
            );
        }
        Ok(config)
    }
}
