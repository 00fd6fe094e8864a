use battle_core::{
    AbilityTemplate, BattleEngine, BattleEnv, BattleResult, CombatEvent, DamageType,
    EncounterTemplate, EnemyTemplate, HeroId, HeroTemplate, PcgRng, SetupOptions, StatusCatalog,
    TargetMode, TemplateTables, TickIntents, Trigger, advance_idle, create_battle_state,
};

const BRISTLEBACK: HeroId = HeroId(99);
const LINA: HeroId = HeroId(25);
const DAZZLE: HeroId = HeroId(50);

fn reference_tables() -> TemplateTables {
    TemplateTables::new()
        .with_hero(
            HeroTemplate::new(BRISTLEBACK, "Bristleback")
                .with_attack(1.2, 24.0)
                .with_defenses(150.0, 4.0, 0.25)
                .with_ability("bristleback_return"),
        )
        .with_hero(
            HeroTemplate::new(LINA, "Lina")
                .with_attack(1.4, 21.0)
                .with_defenses(100.0, 1.0, 0.25)
                .with_spell_interval(10.0)
                .with_ability("laguna_blade"),
        )
        .with_hero(
            HeroTemplate::new(DAZZLE, "Dazzle")
                .with_attack(1.2, 22.0)
                .with_defenses(120.0, 2.0, 0.25)
                .with_spell_interval(8.0)
                .with_ability("poison_sting"),
        )
        .with_ability(
            AbilityTemplate::passive("bristleback_return", Trigger::OnDamageTaken)
                .with_target(TargetMode::Attacker)
                .with_return_ratio(0.2),
        )
        .with_ability(
            AbilityTemplate::active("laguna_blade")
                .with_damage(DamageType::Magical, 100.0)
                .with_status("stun", 1.5, None),
        )
        .with_ability(
            AbilityTemplate::active("poison_sting")
                .with_damage(DamageType::Magical, 10.0)
                .with_status("poison", 4.0, None),
        )
        .with_enemy(EnemyTemplate::new("large_wolf", 80.0, 3.0, 4.0).with_defenses(15.0, 0.25))
        .with_enemy(EnemyTemplate::new("small_wolf", 30.0, 2.5, 2.0).with_defenses(8.0, 0.15))
        .with_enemy(
            EnemyTemplate::new("skull_lord", 2500.0, 4.0, 5.0)
                .with_defenses(10.0, 0.2)
                .with_summon("small_wolf", 12.0),
        )
        .with_encounter(
            EncounterTemplate::new("wolf_pack")
                .with_enemy("large_wolf", 1)
                .with_enemy("small_wolf", 2),
        )
        .with_encounter(EncounterTemplate::new("skull_lord").with_enemy("skull_lord", 1))
}

fn run_to_end(
    tables: &TemplateTables,
    roster: &[HeroId],
    encounter: &str,
    seed: u64,
) -> battle_core::BattleState {
    let statuses = StatusCatalog::standard();
    let env = BattleEnv::new(tables, &statuses);
    let mut state =
        create_battle_state(roster, encounter, &SetupOptions::default(), tables).unwrap();
    let mut rng = PcgRng::seeded(seed);
    let mut engine = BattleEngine::new(&mut state);
    for _ in 0..5000 {
        if engine
            .tick(&env, &mut rng, 0.1, &TickIntents::none().with_auto_rotate(true))
            .is_some()
        {
            break;
        }
    }
    state
}

#[test]
fn reference_lineup_clears_wolf_pack() {
    let tables = reference_tables();
    let state = run_to_end(&tables, &[BRISTLEBACK, LINA, DAZZLE], "wolf_pack", 42);

    assert_eq!(state.result, Some(BattleResult::Win));
    assert!(state.enemy.is_empty());
    assert!(state.elapsed < 30.0, "took {}s", state.elapsed);
    assert!(state.player.iter().all(|h| h.is_alive()));
}

#[test]
fn same_seed_same_battle() {
    let tables = reference_tables();
    let first = run_to_end(&tables, &[BRISTLEBACK, LINA, DAZZLE], "wolf_pack", 9);
    let second = run_to_end(&tables, &[BRISTLEBACK, LINA, DAZZLE], "wolf_pack", 9);
    assert_eq!(first, second);
}

#[test]
fn boss_summons_land_in_the_log() {
    let tables = reference_tables();
    let statuses = StatusCatalog::standard();
    let env = BattleEnv::new(&tables, &statuses);
    let options = SetupOptions::default().with_level(2);
    let mut state = create_battle_state(&[BRISTLEBACK], "skull_lord", &options, &tables).unwrap();
    assert_eq!(state.enemy[0].vitals.max_hp, 5000.0);

    let mut rng = PcgRng::seeded(1);
    let mut engine = BattleEngine::new(&mut state);
    for _ in 0..125 {
        engine.tick(&env, &mut rng, 0.1, &TickIntents::none());
    }

    let summons: Vec<_> = state
        .log
        .iter()
        .filter(|e| matches!(e.event, CombatEvent::Summon { .. }))
        .collect();
    assert_eq!(summons.len(), 1);
    let minion = state
        .enemy
        .iter()
        .find(|e| e.template == "small_wolf")
        .expect("summoned wolf");
    assert_eq!(minion.vitals.max_hp, 60.0);
    assert_eq!(minion.attack_damage, 4.0);
}

#[test]
fn poison_from_a_spell_uses_cast_time_magnitude() {
    let tables = reference_tables();
    let statuses = StatusCatalog::standard();
    let env = BattleEnv::new(&tables, &statuses);
    let mut state =
        create_battle_state(&[DAZZLE], "wolf_pack", &SetupOptions::default(), &tables).unwrap();
    state.player[0].spell_timer = 7.95;
    state.player[0].attack_timer = -100.0;

    BattleEngine::new(&mut state).tick(&env, &mut PcgRng::seeded(1), 0.1, &TickIntents::none());

    let poison = state.enemy[0].buffs.get("poison").expect("poison applied");
    assert_eq!(poison.magnitude, Some(10.0));
    assert_eq!(poison.remaining, 4.0);
}

#[test]
fn losing_lineup_ends_in_defeat() {
    let tables = reference_tables()
        .with_enemy(EnemyTemplate::new("ancient", 100_000.0, 1.0, 200.0))
        .with_encounter(EncounterTemplate::new("hopeless").with_enemy("ancient", 1));
    let state = run_to_end(&tables, &[LINA, DAZZLE], "hopeless", 3);

    assert_eq!(state.result, Some(BattleResult::Lose));
    assert!(state.player.iter().all(|h| !h.is_alive()));
}

#[test]
fn idle_bar_counts_completions() {
    let out = advance_idle(0.0, 9.0, 3.0, 1.0);
    assert_eq!(out.completions, 3);
    assert_eq!(out.progress, 0.0);
}
