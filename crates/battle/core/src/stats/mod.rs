//! Lineup projections for display: per-hero DPS and durability, plus totals.
//!
//! These are steady-state numbers from templates alone. They ignore buffs,
//! targeting and the off-focus penalty, and every hero's spell is counted as
//! if it were always focused.

pub mod idle;

pub use idle::{IdleProgress, advance_idle, advance_idle_between};

use crate::env::{AbilityKind, HeroId, HeroTemplate, TemplateOracle};
use crate::formulas;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroCombatStats {
    pub hero_id: HeroId,
    pub auto_dps: f64,
    pub spell_dps: f64,
    pub total_dps: f64,
    pub max_hp: f64,
    pub armor: f64,
    pub magic_resist: f64,
    /// Physical damage needed to kill the hero.
    pub physical_ehp: f64,
    /// Magical damage needed to kill the hero. Infinite at full resist.
    pub magical_ehp: f64,
}

impl HeroCombatStats {
    pub fn compute(template: &HeroTemplate, templates: &dyn TemplateOracle) -> Self {
        let attack_interval =
            formulas::effective_interval(template.attack_interval, template.attack_speed(), None);
        let auto_dps = template.effective_attack_damage() / attack_interval;

        let spell_dps = template
            .effective_spell_interval()
            .map(|interval| {
                // Round-robin: N damaging actives share one timer, each firing every N casts.
                let damages: Vec<f64> = template
                    .abilities
                    .iter()
                    .filter_map(|id| templates.ability(id))
                    .filter(|a| a.kind == AbilityKind::Active)
                    .filter_map(|a| a.base_damage)
                    .map(|base| formulas::spell_damage(base, template.spell_power()))
                    .collect();
                if damages.is_empty() {
                    0.0
                } else {
                    damages.iter().sum::<f64>() / (damages.len() as f64 * interval)
                }
            })
            .unwrap_or(0.0);

        let max_hp = template.effective_max_hp().round();
        let defenses = template.base_defenses();
        let magical_ehp = if defenses.magic_resist >= 1.0 {
            f64::INFINITY
        } else {
            max_hp / (1.0 - defenses.magic_resist)
        };

        Self {
            hero_id: template.id,
            auto_dps,
            spell_dps,
            total_dps: auto_dps + spell_dps,
            max_hp,
            armor: defenses.armor,
            magic_resist: defenses.magic_resist,
            physical_ehp: max_hp * (100.0 + defenses.armor) / 100.0,
            magical_ehp,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineupStats {
    pub total_auto_dps: f64,
    pub total_spell_dps: f64,
    pub total_dps: f64,
    pub total_hp: f64,
    pub avg_armor: f64,
    pub avg_magic_resist: f64,
    pub hero_stats: Vec<HeroCombatStats>,
}

impl LineupStats {
    /// Aggregates the lineup in roster order. Unknown heroes are skipped.
    pub fn compute(roster: &[HeroId], templates: &dyn TemplateOracle) -> Self {
        let hero_stats: Vec<HeroCombatStats> = roster
            .iter()
            .filter_map(|&id| templates.hero(id))
            .map(|t| HeroCombatStats::compute(t, templates))
            .collect();
        if hero_stats.is_empty() {
            return Self::default();
        }

        let count = hero_stats.len() as f64;
        let total_auto_dps: f64 = hero_stats.iter().map(|h| h.auto_dps).sum();
        let total_spell_dps: f64 = hero_stats.iter().map(|h| h.spell_dps).sum();
        Self {
            total_auto_dps,
            total_spell_dps,
            total_dps: total_auto_dps + total_spell_dps,
            total_hp: hero_stats.iter().map(|h| h.max_hp).sum(),
            avg_armor: hero_stats.iter().map(|h| h.armor).sum::<f64>() / count,
            avg_magic_resist: hero_stats.iter().map(|h| h.magic_resist).sum::<f64>() / count,
            hero_stats,
        }
    }
}
