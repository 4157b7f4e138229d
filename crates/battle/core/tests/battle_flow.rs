mod common;

use battle_core::skill::{
    AutoRevive, ForcedRevive, Reaction, ReactionTrigger, Retreat, ScalingStat, SpecialAttack,
};
use battle_core::{
    ActionKind, ActionRates, ActorId, BarrierCharges, BattleConfig, BattleEngine, BattleError,
    BattleLogEntry, BattleOutcome, BattlePhase, EffectFlags, EffectKind, MasterDataSnapshot,
    ScriptedRng, Side, SkillEffects, StatusDefinition, StatusId, StatusTags,
};

use common::{engine_with_draws, fighter, resolve_first_turn, scripted_engine, snapshot};

fn first_attack_by(engine: &BattleEngine<'_, ScriptedRng>, actor: ActorId) -> BattleLogEntry {
    engine
        .log()
        .iter()
        .find(|e| e.kind == ActionKind::Attack && e.actor == Some(actor))
        .cloned()
        .expect("actor attacked")
}

// ============================================================================
// Interrupts and mitigation
// ============================================================================

#[test]
fn parry_on_first_hit_stops_the_action() {
    let data = MasterDataSnapshot::new();
    let player = fighter(ActorId::player(1), 1, 50, snapshot(500, 100, 10, 3));
    let mut effects = SkillEffects::neutral();
    effects.combat.parry = Some(90.0);
    let enemy = fighter(ActorId::enemy(1), 1, 10, snapshot(500, 20, 10, 1)).with_effects(effects);

    let mut engine = scripted_engine(data.env(), vec![player], vec![enemy], BattleConfig::new());
    resolve_first_turn(&mut engine);

    let attack = first_attack_by(&engine, ActorId::player(1));
    assert_eq!(attack.meta("hits"), Some("3"));
    assert_eq!(attack.meta("interrupt"), Some("parry"));
    assert_eq!(attack.effects.len(), 1);
    assert_eq!(attack.effects[0].amount, 90);
    assert!(attack.effects[0].flags.contains(EffectFlags::PARRIED));
    assert_eq!(engine.actor(ActorId::enemy(1)).unwrap().hp(), 410);
}

#[test]
fn parry_after_second_hit_keeps_landed_hits() {
    let data = MasterDataSnapshot::new();
    let player = fighter(ActorId::player(1), 1, 50, snapshot(500, 100, 10, 3));
    let mut effects = SkillEffects::neutral();
    effects.combat.parry = Some(40.0);
    let enemy = fighter(ActorId::enemy(1), 1, 10, snapshot(500, 20, 10, 1)).with_effects(effects);

    // Two selection draws, then the parry rolls after hits one and two.
    let mut engine = engine_with_draws(data.env(), vec![player], vec![enemy], [100, 100, 100, 1]);
    resolve_first_turn(&mut engine);

    let attack = first_attack_by(&engine, ActorId::player(1));
    assert_eq!(attack.meta("hits"), Some("3"));
    assert_eq!(attack.meta("interrupt"), Some("parry"));
    let amounts: Vec<u32> = attack.effects.iter().map(|e| e.amount).collect();
    assert_eq!(amounts, vec![90, 90]);
    assert!(!attack.effects[0].flags.contains(EffectFlags::PARRIED));
    assert!(attack.effects[1].flags.contains(EffectFlags::PARRIED));
    assert_eq!(engine.actor(ActorId::enemy(1)).unwrap().hp(), 320);
}

#[test]
fn barrier_charge_absorbs_one_hit() {
    let data = MasterDataSnapshot::new();
    let player = fighter(ActorId::player(1), 1, 50, snapshot(500, 100, 10, 2));
    let mut effects = SkillEffects::neutral();
    effects.combat.barrier = BarrierCharges {
        physical: 1,
        ..BarrierCharges::default()
    };
    let enemy = fighter(ActorId::enemy(1), 1, 10, snapshot(500, 20, 10, 1)).with_effects(effects);

    let mut engine = scripted_engine(data.env(), vec![player], vec![enemy], BattleConfig::new());
    resolve_first_turn(&mut engine);

    let attack = first_attack_by(&engine, ActorId::player(1));
    let amounts: Vec<u32> = attack.effects.iter().map(|e| e.amount).collect();
    assert_eq!(amounts, vec![30, 90]);
    assert!(attack.effects[0].flags.contains(EffectFlags::BARRIER));
    assert!(!attack.effects[1].flags.contains(EffectFlags::BARRIER));
    assert_eq!(engine.actor(ActorId::enemy(1)).unwrap().barriers.physical, 0);
}

#[test]
fn defending_halves_incoming_damage() {
    let data = MasterDataSnapshot::new();
    let player = fighter(ActorId::player(1), 1, 50, snapshot(500, 100, 10, 1));
    let enemy = fighter(ActorId::enemy(1), 1, 10, snapshot(500, 20, 10, 1)).with_action_rates(
        ActionRates {
            attack: 0,
            defend: 100,
            ..ActionRates::default()
        },
    );

    let mut engine = scripted_engine(data.env(), vec![player], vec![enemy], BattleConfig::new());
    resolve_first_turn(&mut engine);

    let attack = first_attack_by(&engine, ActorId::player(1));
    assert_eq!(attack.effects[0].amount, 45);
    assert!(attack.effects[0].flags.contains(EffectFlags::GUARDED));
    assert!(
        engine
            .log()
            .iter()
            .any(|e| e.kind == ActionKind::Defend && e.actor == Some(ActorId::enemy(1)))
    );
}

#[test]
fn critical_hit_halves_defense_and_wears_equipment() {
    let data = MasterDataSnapshot::new();
    let mut stats = snapshot(500, 100, 10, 1);
    stats.critical_rate = 100;
    let player = fighter(ActorId::player(1), 1, 50, stats);
    let enemy = fighter(ActorId::enemy(1), 1, 10, snapshot(500, 20, 10, 1));

    let mut engine = scripted_engine(data.env(), vec![player], vec![enemy], BattleConfig::new());
    resolve_first_turn(&mut engine);

    // (100 - 10 × 0.5) × 1.5 = 142.5
    let attack = first_attack_by(&engine, ActorId::player(1));
    assert_eq!(attack.effects[0].amount, 143);
    assert!(attack.effects[0].flags.contains(EffectFlags::CRITICAL));
    let enemy = engine.actor(ActorId::enemy(1)).unwrap();
    assert_eq!(enemy.counters.degradation_percent, 1.0);
}

#[test]
fn counter_follows_the_provoking_attack() {
    let data = MasterDataSnapshot::new();
    let player = fighter(ActorId::player(1), 1, 50, snapshot(500, 100, 10, 1));
    let mut effects = SkillEffects::neutral();
    effects.combat.reactions.push(Reaction {
        label: "riposte".into(),
        trigger: ReactionTrigger::PhysicalDamageTaken,
        chance: 100.0,
        damage_multiplier: 1.0,
        hit_multiplier: 1.0,
    });
    let enemy = fighter(ActorId::enemy(1), 1, 10, snapshot(500, 50, 10, 1)).with_effects(effects);

    let mut engine = scripted_engine(data.env(), vec![player], vec![enemy], BattleConfig::new());
    resolve_first_turn(&mut engine);

    let entries = engine.log().entries();
    let attack_at = entries
        .iter()
        .position(|e| e.kind == ActionKind::Attack && e.actor == Some(ActorId::player(1)))
        .unwrap();
    let reaction = &entries[attack_at + 1];
    assert_eq!(reaction.kind, ActionKind::Reaction);
    assert_eq!(reaction.actor, Some(ActorId::enemy(1)));
    assert_eq!(reaction.meta("trigger"), Some("physical_damage_taken"));
    assert_eq!(reaction.effects[0].target, ActorId::player(1));
    assert_eq!(reaction.effects[0].amount, 40);
}

#[test]
fn hopeless_attacks_still_deal_one_damage() {
    let data = MasterDataSnapshot::new();
    let player = fighter(ActorId::player(1), 1, 50, snapshot(500, 5, 50, 1));
    let enemy = fighter(ActorId::enemy(1), 1, 10, snapshot(500, 5, 50, 1));

    let mut engine = scripted_engine(data.env(), vec![player], vec![enemy], BattleConfig::new());
    resolve_first_turn(&mut engine);

    assert_eq!(first_attack_by(&engine, ActorId::player(1)).damage_dealt(), 1);
    assert_eq!(first_attack_by(&engine, ActorId::enemy(1)).damage_dealt(), 1);
}

#[test]
fn sleep_landing_before_the_victim_acts_cancels_its_action() {
    let sleep = StatusId(2);
    let data = MasterDataSnapshot::new().with_status(
        StatusDefinition::new(sleep, "Sleep", 1)
            .with_tags(StatusTags::DEBUFF | StatusTags::INCAPACITATE),
    );

    let player = fighter(ActorId::player(1), 1, 10, snapshot(500, 100, 10, 1));
    let mut effects = SkillEffects::neutral();
    effects.combat.special_attacks.push(SpecialAttack {
        label: "lullaby strike".into(),
        chance: 100.0,
        damage_multiplier: 1.0,
        hit_multiplier: 1.0,
        ignore_defense: false,
        inflict: Some((sleep, 100.0)),
    });
    let enemy = fighter(ActorId::enemy(1), 1, 50, snapshot(500, 20, 10, 1)).with_effects(effects);

    let mut engine = scripted_engine(data.env(), vec![player], vec![enemy], BattleConfig::new());
    resolve_first_turn(&mut engine);

    let skipped: Vec<&BattleLogEntry> = engine
        .log()
        .iter()
        .filter(|e| e.actor == Some(ActorId::player(1)))
        .collect();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].kind, ActionKind::ActionSkipped);
    assert_eq!(skipped[0].meta("reason"), Some("incapacitated"));

    let strike = first_attack_by(&engine, ActorId::enemy(1));
    assert_eq!(strike.meta("special_attack"), Some("lullaby strike"));
    assert_eq!(strike.effects[1].kind, EffectKind::Status);
    assert_eq!(engine.actor(ActorId::enemy(1)).unwrap().hp(), 500);
    assert_eq!(engine.actor(ActorId::player(1)).unwrap().hp(), 490);
}

// ============================================================================
// Targeting
// ============================================================================

#[test]
fn sacrifice_strikes_the_weakest_eligible_ally() {
    let data = MasterDataSnapshot::new();
    let player = fighter(ActorId::player(1), 1, 50, snapshot(500, 1, 100, 1));

    let mut effects = SkillEffects::neutral();
    effects.resurrection.sacrifice_interval = Some(1);
    let cultist = fighter(ActorId::enemy(1), 1, 30, snapshot(500, 40, 10, 1)).with_effects(effects);
    let mut minion = fighter(ActorId::enemy(2), 2, 10, snapshot(500, 1, 10, 1))
        .with_sacrifice_eligible(true);
    minion.level = 3;

    let mut engine = scripted_engine(
        data.env(),
        vec![player],
        vec![cultist, minion],
        BattleConfig::new(),
    );
    resolve_first_turn(&mut engine);

    let entries = engine.log().entries();
    let at = entries
        .iter()
        .position(|e| e.kind == ActionKind::Sacrifice)
        .expect("sacrifice logged");
    assert_eq!(entries[at].actor, Some(ActorId::enemy(1)));
    assert_eq!(entries[at].meta("target"), Some("#1002"));

    let attack = &entries[at + 1];
    assert_eq!(attack.kind, ActionKind::Attack);
    assert_eq!(attack.effects[0].target, ActorId::enemy(2));
    assert_eq!(attack.effects[0].amount, 30);
}

// ============================================================================
// Outcomes
// ============================================================================

#[test]
fn stronger_party_wins_in_one_turn() {
    let data = MasterDataSnapshot::new();
    let player = fighter(ActorId::player(1), 1, 50, snapshot(100, 100, 10, 1));
    let enemy = fighter(ActorId::enemy(1), 1, 10, snapshot(50, 20, 0, 1));

    let result = scripted_engine(data.env(), vec![player], vec![enemy], BattleConfig::new())
        .run()
        .unwrap();

    assert_eq!(result.outcome, BattleOutcome::Victory);
    assert_eq!(result.turns, 1);
    assert_eq!(result.enemies[0].hp(), 0);
    assert_eq!(result.players[0].hp(), 100);

    let last = result.log.last().unwrap();
    assert_eq!(last.kind, ActionKind::BattleEnd);
    assert_eq!(last.meta("outcome"), Some("victory"));
    assert_eq!(result.log.entries()[0].kind, ActionKind::BattleStart);
}

#[test]
fn overwhelmed_party_is_defeated() {
    let data = MasterDataSnapshot::new();
    let player = fighter(ActorId::player(1), 1, 10, snapshot(50, 20, 0, 1));
    let enemy = fighter(ActorId::enemy(1), 1, 50, snapshot(500, 100, 10, 1));

    let result = scripted_engine(data.env(), vec![player], vec![enemy], BattleConfig::new())
        .run()
        .unwrap();

    assert_eq!(result.outcome, BattleOutcome::Defeat);
    assert!(
        !result
            .log
            .iter()
            .any(|e| e.kind == ActionKind::Attack && e.actor == Some(ActorId::player(1)))
    );
}

#[test]
fn turn_limit_ends_in_withdrawal() {
    let data = MasterDataSnapshot::new();
    let player = fighter(ActorId::player(1), 1, 50, snapshot(100, 5, 50, 1));
    let enemy = fighter(ActorId::enemy(1), 1, 10, snapshot(100, 5, 50, 1));

    let result = scripted_engine(
        data.env(),
        vec![player],
        vec![enemy],
        BattleConfig::new().with_max_turns(3),
    )
    .run()
    .unwrap();

    assert_eq!(result.outcome, BattleOutcome::Fled);
    assert_eq!(result.turns, 3);
    assert_eq!(result.players[0].hp(), 97);
    assert_eq!(result.enemies[0].hp(), 97);
    assert_eq!(result.log.last().unwrap().meta("turns"), Some("3"));
}

#[test]
fn retreating_party_flees() {
    let data = MasterDataSnapshot::new();
    let mut effects = SkillEffects::neutral();
    effects.misc.retreat = Some(Retreat {
        turn: 1,
        chance: 100.0,
    });
    let player = fighter(ActorId::player(1), 1, 50, snapshot(100, 5, 50, 1)).with_effects(effects);
    let enemy = fighter(ActorId::enemy(1), 1, 10, snapshot(100, 5, 50, 1));

    let result = scripted_engine(data.env(), vec![player], vec![enemy], BattleConfig::new())
        .run()
        .unwrap();

    assert_eq!(result.outcome, BattleOutcome::Fled);
    assert_eq!(result.turns, 1);
    assert!(result.players[0].fled);
    assert_eq!(result.log.of_kind(ActionKind::Retreat).count(), 1);
}

#[test]
fn forced_revive_fires_once() {
    let data = MasterDataSnapshot::new();
    let mut effects = SkillEffects::neutral();
    effects.resurrection.forced_revive = Some(ForcedRevive {
        max_triggers: 1,
        hp_ratio: 0.5,
    });
    let player = fighter(ActorId::player(1), 1, 10, snapshot(100, 5, 10, 1)).with_effects(effects);
    let enemy = fighter(ActorId::enemy(1), 1, 50, snapshot(10_000, 1000, 0, 1));

    let result = scripted_engine(data.env(), vec![player], vec![enemy], BattleConfig::new())
        .run()
        .unwrap();

    assert_eq!(result.outcome, BattleOutcome::Defeat);
    assert_eq!(result.turns, 2);

    let revivals: Vec<&BattleLogEntry> = result.log.of_kind(ActionKind::Resurrection).collect();
    assert_eq!(revivals.len(), 1);
    assert_eq!(revivals[0].meta("source"), Some("forced_revive"));
    assert_eq!(revivals[0].effects[0].kind, EffectKind::Revive);
    assert_eq!(revivals[0].effects[0].amount, 50);
    assert_eq!(result.players[0].counters.forced_revives_used, 1);
}

#[test]
fn auto_revive_respects_its_trigger_cap() {
    let data = MasterDataSnapshot::new();
    let mut effects = SkillEffects::neutral();
    effects.resurrection.auto_revive.push(AutoRevive {
        chance: 100.0,
        max_triggers: 1,
        stat: ScalingStat::MaxHp,
        scale: 0.5,
    });
    let player = fighter(ActorId::player(1), 1, 10, snapshot(100, 5, 10, 1)).with_effects(effects);
    let enemy = fighter(ActorId::enemy(1), 1, 50, snapshot(10_000, 1000, 0, 1));

    let result = scripted_engine(data.env(), vec![player], vec![enemy], BattleConfig::new())
        .run()
        .unwrap();

    assert_eq!(result.outcome, BattleOutcome::Defeat);
    assert_eq!(result.turns, 2);

    let revivals: Vec<&BattleLogEntry> = result.log.of_kind(ActionKind::Resurrection).collect();
    assert_eq!(revivals.len(), 1);
    assert_eq!(revivals[0].meta("source"), Some("auto_revive"));
    assert_eq!(revivals[0].meta("stat"), Some("max_hp"));
    assert_eq!(revivals[0].effects[0].amount, 50);
    assert_eq!(result.players[0].counters.resurrection_triggers, vec![1]);
}

// ============================================================================
// Engine contract
// ============================================================================

#[test]
fn stepping_a_concluded_battle_is_rejected() {
    let data = MasterDataSnapshot::new();
    let player = fighter(ActorId::player(1), 1, 50, snapshot(100, 100, 10, 1));
    let enemy = fighter(ActorId::enemy(1), 1, 10, snapshot(50, 20, 0, 1));
    let mut engine = scripted_engine(data.env(), vec![player], vec![enemy], BattleConfig::new());

    let mut phase = engine.phase();
    while phase.outcome().is_none() {
        phase = engine.step().unwrap();
    }
    assert_eq!(phase, BattlePhase::Concluded(BattleOutcome::Victory));
    assert_eq!(engine.step(), Err(BattleError::AlreadyConcluded));
    assert!(engine.into_result().is_some());
}

#[test]
fn empty_sides_are_rejected() {
    let data = MasterDataSnapshot::new();
    let enemy = fighter(ActorId::enemy(1), 1, 10, snapshot(50, 20, 0, 1));
    let err = BattleEngine::new(
        data.env(),
        BattleConfig::new(),
        ScriptedRng::exhausted(),
        Vec::new(),
        common::enemies(vec![enemy]),
    )
    .err()
    .unwrap();
    assert_eq!(err, BattleError::EmptySide { side: Side::Player });
}
