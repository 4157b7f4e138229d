//! Same inputs and seed must replay to the same log.

use battle_core::env::SkillEffect;
use battle_core::skill::{ReactionTrigger, SpecialAttack};
use battle_core::{
    ActionKind, ActionRates, ActionResources, Actor, ActorId, BaseAttributes, BattleConfig,
    BattleEngine, BattleResult, CombatSnapshot, DamageType, EncounterSpec, EnemyDefinition,
    EnemyId, MasterDataSnapshot, PcgRng, Side, SkillCompiler, SkillDefinition, SkillId,
    SpellBook, SpellDefinition, SpellId, SpellKind, SpellSchool, StatusDefinition, StatusId,
    StatusTags, compute_seed,
};

const POISON: StatusId = StatusId(1);
const SLEEP: StatusId = StatusId(2);

fn master_data() -> MasterDataSnapshot {
    let mut poison = StatusDefinition::new(POISON, "Poison", 3).with_tags(StatusTags::DEBUFF);
    poison.tick_damage_percent = Some(8.0);
    let sleep = StatusDefinition::new(SLEEP, "Sleep", 1)
        .with_tags(StatusTags::DEBUFF | StatusTags::INCAPACITATE);
    let wither = StatusDefinition::new(
        BattleConfig::DEFAULT_ANTI_HEALING_STATUS,
        "Wither",
        BattleConfig::DEFAULT_ANTI_HEALING_DURATION,
    );

    let mut wolf = EnemyDefinition::new(EnemyId(10), "Dire Wolf", BaseAttributes::uniform(12));
    wolf.skill_ids = vec![SkillId(1)];
    wolf.base_experience = 40;

    let mut shaman = EnemyDefinition::new(EnemyId(20), "Goblin Shaman", BaseAttributes::uniform(9));
    shaman.action_rates = ActionRates {
        attack: 40,
        mage_magic: 40,
        defend: 20,
        ..ActionRates::default()
    };
    shaman.spells = SpellBook {
        priest: Vec::new(),
        mage: vec![SpellId(2), SpellId(3)],
    };
    shaman.resources = ActionResources {
        mage_charges: 3,
        ..ActionResources::default()
    };

    MasterDataSnapshot::new()
        .with_enemy(wolf)
        .with_enemy(shaman)
        .with_status(poison)
        .with_status(sleep)
        .with_status(wither)
        .with_spell(SpellDefinition {
            id: SpellId(1),
            name: "Mend".into(),
            school: SpellSchool::Priest,
            tier: 1,
            kind: SpellKind::Heal {
                power: 1.0,
                all_targets: false,
            },
        })
        .with_spell(SpellDefinition {
            id: SpellId(2),
            name: "Flame".into(),
            school: SpellSchool::Mage,
            tier: 1,
            kind: SpellKind::Damage {
                power: 1.2,
                all_targets: true,
            },
        })
        .with_spell(SpellDefinition {
            id: SpellId(3),
            name: "Lull".into(),
            school: SpellSchool::Mage,
            tier: 2,
            kind: SpellKind::Inflict {
                status: SLEEP,
                base_chance: 35.0,
                all_targets: false,
            },
        })
        .with_skill(SkillDefinition::new(
            SkillId(1),
            "Venom Fang",
            vec![SkillEffect::SpecialAttack(SpecialAttack {
                label: "venom fang".into(),
                chance: 30.0,
                damage_multiplier: 1.2,
                hit_multiplier: 1.0,
                ignore_defense: false,
                inflict: Some((POISON, 60.0)),
            })],
        ))
        .with_skill(SkillDefinition::new(
            SkillId(2),
            "Counter Stance",
            vec![
                SkillEffect::Reaction(battle_core::skill::Reaction {
                    label: "counter".into(),
                    trigger: ReactionTrigger::PhysicalDamageTaken,
                    chance: 25.0,
                    damage_multiplier: 0.8,
                    hit_multiplier: 1.0,
                }),
                SkillEffect::Parry { bonus: 5.0 },
            ],
        ))
        .with_skill(SkillDefinition::new(
            SkillId(3),
            "Magic Ward",
            vec![SkillEffect::Barrier {
                damage_type: DamageType::Magical,
                charges: 1,
            }],
        ))
}

fn party(data: &MasterDataSnapshot) -> Vec<Actor> {
    let env = data.env();
    let knight = BaseAttributes::new(18, 6, 8, 16, 11, 9);
    let cleric = BaseAttributes::new(7, 12, 17, 10, 9, 14);

    vec![
        Actor::new(
            ActorId::player(1),
            "Knight",
            Side::Player,
            1,
            8,
            knight,
            CombatSnapshot::derive(&knight, 8),
        )
        .with_effects(SkillCompiler::compile_learned(&env, &[SkillId(2)]).unwrap()),
        Actor::new(
            ActorId::player(2),
            "Cleric",
            Side::Player,
            2,
            7,
            cleric,
            CombatSnapshot::derive(&cleric, 7),
        )
        .with_effects(SkillCompiler::compile_learned(&env, &[SkillId(3)]).unwrap())
        .with_action_rates(ActionRates {
            attack: 50,
            priest_magic: 50,
            ..ActionRates::default()
        })
        .with_spells(SpellBook {
            priest: vec![SpellId(1)],
            mage: Vec::new(),
        })
        .with_resources(ActionResources {
            priest_charges: 4,
            ..ActionResources::default()
        }),
    ]
}

fn encounter() -> [EncounterSpec; 2] {
    [
        EncounterSpec::new(EnemyId(20), 6, 1),
        EncounterSpec::new(EnemyId(10), 5, 2),
    ]
}

fn simulate(data: &MasterDataSnapshot, seed: u64) -> BattleResult {
    BattleEngine::from_encounter(
        data.env(),
        BattleConfig::new(),
        PcgRng::new(seed),
        party(data),
        &encounter(),
    )
    .unwrap()
    .run()
    .unwrap()
}

#[test]
fn identical_seeds_replay_identically() {
    let data = master_data();
    for battle in 0..8 {
        let seed = compute_seed(0x5EED, battle);
        let first = simulate(&data, seed);
        let second = simulate(&data, seed);

        assert_eq!(first.outcome, second.outcome);
        assert_eq!(first.turns, second.turns);
        assert_eq!(first.log, second.log);
        assert_eq!(
            hex::encode(first.log.digest()),
            hex::encode(second.log.digest())
        );
    }
}

#[test]
fn every_battle_is_bracketed_and_bounded() {
    let data = master_data();
    let config = BattleConfig::new();
    for battle in 0..16 {
        let result = simulate(&data, compute_seed(42, battle));
        let entries = result.log.entries();

        assert_eq!(entries.first().unwrap().kind, ActionKind::BattleStart);
        assert_eq!(entries.last().unwrap().kind, ActionKind::BattleEnd);
        assert_eq!(result.log.of_kind(ActionKind::BattleEnd).count(), 1);
        assert!(result.turns >= 1 && result.turns <= config.max_turns);
        assert!(entries.windows(2).all(|w| w[0].turn <= w[1].turn));

        for actor in result.players.iter().chain(&result.enemies) {
            assert!(actor.hp() <= actor.max_hp());
        }
    }
}

#[test]
fn enemies_are_placed_by_id_then_level() {
    let data = master_data();
    let engine = BattleEngine::from_encounter(
        data.env(),
        BattleConfig::new(),
        PcgRng::new(1),
        party(&data),
        &[
            EncounterSpec::new(EnemyId(20), 5, 1),
            EncounterSpec::new(EnemyId(10), 3, 1),
            EncounterSpec::new(EnemyId(10), 9, 1),
        ],
    )
    .unwrap();

    let placed: Vec<(String, u32, u8)> = engine
        .actors()
        .iter()
        .filter(|a| a.side == Side::Enemy)
        .map(|a| (a.name.clone(), a.level, a.formation_slot))
        .collect();
    assert_eq!(
        placed,
        vec![
            ("Dire Wolf".to_owned(), 9, 1),
            ("Dire Wolf".to_owned(), 3, 2),
            ("Goblin Shaman".to_owned(), 5, 3),
        ]
    );
}
