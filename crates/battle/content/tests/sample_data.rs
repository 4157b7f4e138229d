//! The sample content shipped with the simulator must load and battle.

use std::path::PathBuf;

use battle_content::ContentFactory;
use battle_core::{
    ActionKind, ActorId, BattleEngine, EncounterSpec, EnemyId, PcgRng, Side, compute_seed,
};

fn sample_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../sim/data")
}

#[test]
fn sample_content_loads() {
    let factory = ContentFactory::new(sample_dir());

    let config = factory.load_config().unwrap();
    assert_eq!(config.max_turns, 20);

    let data = factory.load_master_data().unwrap();
    assert_eq!(data.enemies.len(), 3);
    assert!(data.statuses.contains_key(&config.anti_healing_status));

    let party = factory.load_party(&data.env()).unwrap();
    let ids: Vec<ActorId> = party.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![ActorId::player(1), ActorId::player(2), ActorId::player(3)]);
    assert!(party.iter().all(|a| a.side == Side::Player));
    assert!(party[0].effects.misc.cover);
}

#[test]
fn sample_battles_conclude() {
    let factory = ContentFactory::new(sample_dir());
    let config = factory.load_config().unwrap();
    let data = factory.load_master_data().unwrap();
    let env = data.env();
    let party = factory.load_party(&env).unwrap();
    let encounter = [
        EncounterSpec::new(EnemyId(20), 6, 1),
        EncounterSpec::new(EnemyId(10), 5, 2),
        EncounterSpec::new(EnemyId(30), 4, 1),
    ];

    for battle in 0..8 {
        let result = BattleEngine::from_encounter(
            env,
            config.clone(),
            PcgRng::new(compute_seed(7, battle)),
            party.clone(),
            &encounter,
        )
        .unwrap()
        .run()
        .unwrap();

        assert!(result.turns <= config.max_turns);
        assert_eq!(result.enemies.len(), 4);
        assert_eq!(result.log.of_kind(ActionKind::BattleEnd).count(), 1);
    }
}
