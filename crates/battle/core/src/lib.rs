//! Deterministic incremental battle simulation.
//!
//! `battle-core` owns the combat rules: a hero squad against an enemy squad,
//! driven by attack and spell timers, with status effects, focus and target
//! control, and level scaling. A battle is a plain [`BattleState`] value built
//! by [`create_battle_state`] and advanced by [`BattleEngine::tick`]. Templates
//! reach the engine through the [`TemplateOracle`] resolver and randomness
//! through an injected [`RandomSource`], so the same inputs always replay the
//! same battle.
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod formulas;
pub mod setup;
pub mod state;
pub mod stats;
pub mod status;

pub use config::BattleConfig;
pub use engine::{BattleEngine, TickIntents, tick};
pub use env::{
    AbilityKind, AbilityTemplate, BattleEnv, EncounterEntry, EncounterTemplate, EnemyTemplate,
    HeroId, HeroTemplate, PcgRng, RandomSource, StatBonuses, StatusOnHit, SummonAbility,
    TargetMode, TemplateOracle, TemplateTables, Trigger,
};
#[cfg(feature = "test-utils")]
pub use env::ScriptedRolls;
pub use error::{BattleError, ErrorSeverity};
pub use formulas::{DamageType, Defenses};
pub use setup::{SetupError, SetupOptions, create_battle_state};
pub use state::{
    BattleResult, BattleState, Buff, BuffApplied, Buffs, CombatEvent, CombatLog, EnemyInstance,
    HeroInstance, LogEntry, UnitRef, Vitals,
};
pub use stats::{HeroCombatStats, IdleProgress, LineupStats, advance_idle, advance_idle_between};
pub use status::{AffectedStat, EffectTags, StatusCatalog, StatusEffectDef};
