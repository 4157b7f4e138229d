//! Battle simulation binary.
//!
//! Composition root: reads [`SimConfig`] from the environment, loads content
//! through [`ContentFactory`], then runs independent battles in parallel.
//! Battle `i` uses `compute_seed(BATTLE_SEED, i)`, so any single battle can
//! be replayed on its own.
//!
//! # Examples
//!
//! ```bash
//! BATTLE_COUNT=100 cargo run -p battle-sim
//! BATTLE_ENCOUNTER=10:8:3 BATTLE_DUMP_LOG=1 cargo run -p battle-sim > battle.json
//! ```
mod config;
mod report;

use std::num::NonZeroUsize;
use std::thread;

use anyhow::Result;
use battle_content::ContentFactory;
use battle_core::{
    Actor, BattleConfig, BattleEngine, BattleEnv, BattleError, BattleResult, EncounterSpec,
    PcgRng, compute_seed,
};
use tracing::{debug, info};

use config::SimConfig;
use report::Summary;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // 1. Load configuration from environment
    let config = SimConfig::from_env()?;
    info!(
        data_dir = %config.data_dir.display(),
        seed = config.seed,
        battles = config.battles,
        "starting simulation"
    );

    // 2. Load content
    let factory = ContentFactory::new(&config.data_dir);
    let battle_config = factory.load_config()?;
    let master_data = factory.load_master_data()?;
    let env = master_data.env();
    let party = factory.load_party(&env)?;

    // 3. Run battles
    let results = run_battles(&config, env, &battle_config, &party)?;

    // 4. Report
    let mut summary = Summary::default();
    for (index, result) in results.iter().enumerate() {
        println!("{}", report::battle_line(index, result));
        summary.record(result);
    }
    println!("{}", summary);

    if config.dump_log {
        if let Some(first) = results.first() {
            println!("{}", serde_json::to_string_pretty(first)?);
        }
    }

    Ok(())
}

/// Runs `config.battles` battles across worker threads. Results are returned
/// in battle index order regardless of scheduling.
fn run_battles(
    config: &SimConfig,
    env: BattleEnv<'_>,
    battle_config: &BattleConfig,
    party: &[Actor],
) -> Result<Vec<BattleResult>> {
    let count = config.battles;
    let workers = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
        .min(usize::try_from(count).unwrap_or(usize::MAX))
        .max(1);
    debug!(workers, "spawning battle workers");

    let mut results = thread::scope(|scope| -> Result<Vec<(u64, BattleResult)>> {
        let handles: Vec<_> = (0..workers as u64)
            .map(|worker| {
                scope.spawn(move || {
                    (worker..count)
                        .step_by(workers)
                        .map(|index| {
                            let seed = compute_seed(config.seed, index);
                            simulate(env, battle_config, party, &config.encounter, seed)
                                .map(|result| (index, result))
                        })
                        .collect::<Result<Vec<_>, BattleError>>()
                })
            })
            .collect();

        let mut results = Vec::new();
        for handle in handles {
            let batch = handle
                .join()
                .map_err(|_| anyhow::anyhow!("battle worker panicked"))??;
            results.extend(batch);
        }
        Ok(results)
    })?;

    results.sort_by_key(|(index, _)| *index);
    Ok(results.into_iter().map(|(_, result)| result).collect())
}

fn simulate(
    env: BattleEnv<'_>,
    battle_config: &BattleConfig,
    party: &[Actor],
    encounter: &[EncounterSpec],
    seed: u64,
) -> Result<BattleResult, BattleError> {
    BattleEngine::from_encounter(
        env,
        battle_config.clone(),
        PcgRng::new(seed),
        party.to_vec(),
        encounter,
    )?
    .run()
}
