#![allow(dead_code)]

use battle_core::{
    Actor, ActorId, BaseAttributes, BattleConfig, BattleEngine, BattleEnv, CombatSnapshot,
    EnemyGroup, ScriptedRng, Side,
};

/// Snapshot with no variance sources: hit is certain, critical impossible.
pub fn snapshot(max_hp: u32, attack: u32, defense: u32, attack_count: u32) -> CombatSnapshot {
    CombatSnapshot {
        max_hp,
        physical_attack: attack,
        physical_defense: defense,
        hit_rate: 200,
        evasion_rate: 0,
        critical_rate: 0,
        attack_count,
        ..CombatSnapshot::default()
    }
}

/// Luck 60 pins every stat roll to 1.0 without consuming a draw.
pub fn fighter(id: ActorId, slot: u8, agility: i32, snapshot: CombatSnapshot) -> Actor {
    let side = if id.is_enemy() { Side::Enemy } else { Side::Player };
    let attributes = BaseAttributes {
        luck: 60,
        agility,
        ..BaseAttributes::default()
    };
    Actor::new(id, format!("fighter {}", id.0), side, slot, 10, attributes, snapshot)
}

pub fn enemies(actors: Vec<Actor>) -> EnemyGroup {
    EnemyGroup {
        actors,
        encountered: Vec::new(),
    }
}

/// Engine over a scripted source with nothing scripted: every ranged draw
/// returns its maximum.
pub fn scripted_engine<'a>(
    env: BattleEnv<'a>,
    party: Vec<Actor>,
    foes: Vec<Actor>,
    config: BattleConfig,
) -> BattleEngine<'a, ScriptedRng> {
    BattleEngine::new(env, config, ScriptedRng::exhausted(), party, enemies(foes))
        .expect("both sides are populated")
}

/// Engine over a scripted source that replays `draws` before falling back to
/// range maxima.
pub fn engine_with_draws<'a>(
    env: BattleEnv<'a>,
    party: Vec<Actor>,
    foes: Vec<Actor>,
    draws: impl IntoIterator<Item = i32>,
) -> BattleEngine<'a, ScriptedRng> {
    BattleEngine::new(
        env,
        BattleConfig::new(),
        ScriptedRng::new(draws),
        party,
        enemies(foes),
    )
    .expect("both sides are populated")
}

/// Steps through start, turn start, selection and resolution of turn one.
pub fn resolve_first_turn(engine: &mut BattleEngine<'_, ScriptedRng>) {
    for _ in 0..4 {
        engine.step().expect("step succeeds");
    }
}
