//! Shared test fixtures built from the reference balance.

use crate::env::{
    AbilityTemplate, BattleEnv, EncounterTemplate, EnemyTemplate, HeroId, HeroTemplate,
    TargetMode, TemplateTables, Trigger,
};
use crate::formulas::DamageType;
use crate::setup::{SetupOptions, create_battle_state};
use crate::state::BattleState;
use crate::status::StatusCatalog;

pub const BRISTLEBACK: HeroId = HeroId(99);
pub const LINA: HeroId = HeroId(25);
pub const DAZZLE: HeroId = HeroId(50);

pub fn tables() -> TemplateTables {
    TemplateTables::new()
        .with_hero(
            HeroTemplate::new(BRISTLEBACK, "bristleback")
                .with_attack(1.2, 24.0)
                .with_defenses(150.0, 4.0, 0.25)
                .with_ability("bristleback_return"),
        )
        .with_hero(
            HeroTemplate::new(LINA, "lina")
                .with_attack(1.4, 21.0)
                .with_defenses(100.0, 1.0, 0.25)
                .with_spell_interval(10.0)
                .with_ability("laguna_blade"),
        )
        .with_hero(
            HeroTemplate::new(DAZZLE, "dazzle")
                .with_attack(1.2, 22.0)
                .with_defenses(120.0, 2.0, 0.25)
                .with_spell_interval(8.0)
                .with_ability("poison_touch"),
        )
        .with_ability(AbilityTemplate {
            damage_type: Some(DamageType::Physical),
            ..AbilityTemplate::passive("bristleback_return", Trigger::OnDamageTaken)
                .with_target(TargetMode::Attacker)
                .with_return_ratio(0.2)
        })
        .with_ability(
            AbilityTemplate::active("laguna_blade")
                .with_target(TargetMode::SingleEnemy)
                .with_damage(DamageType::Magical, 100.0)
                .with_status("stun", 1.5, None),
        )
        .with_ability(
            AbilityTemplate::active("poison_touch")
                .with_target(TargetMode::SingleEnemy)
                .with_damage(DamageType::Magical, 30.0)
                .with_status("stun", 1.5, None),
        )
        .with_enemy(EnemyTemplate::new("large_wolf", 80.0, 3.0, 4.0).with_defenses(15.0, 0.25))
        .with_enemy(EnemyTemplate::new("small_wolf", 30.0, 2.5, 2.0).with_defenses(8.0, 0.15))
        .with_encounter(
            EncounterTemplate::new("wolf_pack")
                .with_enemy("large_wolf", 1)
                .with_enemy("small_wolf", 2),
        )
}

pub fn battle(tables: &TemplateTables, roster: &[HeroId], encounter: &str) -> BattleState {
    create_battle_state(roster, encounter, &SetupOptions::default(), tables)
        .expect("fixture battle")
}

pub fn env<'a>(tables: &'a TemplateTables, statuses: &'a StatusCatalog) -> BattleEnv<'a> {
    BattleEnv::new(tables, statuses)
}
