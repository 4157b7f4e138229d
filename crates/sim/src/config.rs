//! Simulation configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use battle_core::{EncounterSpec, EnemyId};

#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub data_dir: PathBuf,
    pub seed: u64,
    pub battles: u64,
    pub encounter: Vec<EncounterSpec>,
    pub dump_log: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data")),
            seed: 0x5EED,
            battles: 1,
            // One shaman, two wolves.
            encounter: vec![
                EncounterSpec::new(EnemyId(20), 6, 1),
                EncounterSpec::new(EnemyId(10), 5, 2),
            ],
            dump_log: false,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_DATA_DIR` - Directory with content files (default: `crates/sim/data`)
    /// - `BATTLE_SEED` - Base seed; battle `i` uses `compute_seed(seed, i)` (default: 0x5EED)
    /// - `BATTLE_COUNT` - Number of independent battles (default: 1)
    /// - `BATTLE_ENCOUNTER` - `id:level:count,...` (default: `20:6:1,10:5:2`)
    /// - `BATTLE_DUMP_LOG` - Print battle 0 as JSON (default: false)
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(dir) = env::var("BATTLE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(seed) = read_env::<u64>("BATTLE_SEED") {
            config.seed = seed;
        }
        if let Some(count) = read_env::<u64>("BATTLE_COUNT") {
            config.battles = count.max(1);
        }
        if let Ok(spec) = env::var("BATTLE_ENCOUNTER") {
            config.encounter = parse_encounter(&spec)?;
        }

        if let Some(enable) = read_env::<bool>("BATTLE_DUMP_LOG") {
            config.dump_log = enable;
        } else if env::var("BATTLE_DUMP_LOG").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.dump_log = true;
        }

        Ok(config)
    }
}

/// Parses `id:level:count` triples separated by commas.
pub fn parse_encounter(spec: &str) -> Result<Vec<EncounterSpec>> {
    let encounter = spec
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let fields: Vec<&str> = part.split(':').collect();
            let [id, level, count] = fields.as_slice() else {
                anyhow::bail!("Encounter entry '{}' is not id:level:count", part);
            };
            let parse = |field: &str, name: &str| {
                field
                    .trim()
                    .parse::<u32>()
                    .with_context(|| format!("Invalid {} in encounter entry '{}'", name, part))
            };
            Ok(EncounterSpec::new(
                EnemyId(parse(*id, "enemy id")?),
                parse(*level, "level")?,
                parse(*count, "count")?,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    if encounter.iter().all(|spec| spec.count == 0) {
        anyhow::bail!("Encounter '{}' requests no enemies", spec);
    }
    Ok(encounter)
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
