//! Aggregated stat modifiers from a unit's buffs.

use super::{AffectedStat, EffectTags, StatusEffectDef};
use crate::config::BattleConfig;
use crate::formulas::Defenses;
use crate::state::Buff;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Modifiers {
    pub armor: f64,
    pub magic_resist: f64,
    /// Summed fraction, e.g. `-0.2` for a 20% damage reduction.
    pub attack_damage: f64,
    pub attack_speed: f64,
    pub spell_damage: f64,
    pub evasion: f64,
    pub stunned: bool,
}

impl Modifiers {
    pub(crate) fn absorb(&mut self, def: &StatusEffectDef, buff: &Buff) {
        if def.tags.contains(EffectTags::STUN) {
            self.stunned = true;
        }
        let Some(modifier) = def.modifier else {
            return;
        };
        let amount = buff.magnitude.unwrap_or(modifier.amount);
        match modifier.stat {
            AffectedStat::Armor => self.armor += amount,
            AffectedStat::MagicResist => self.magic_resist += amount,
            AffectedStat::AttackDamage => self.attack_damage += amount,
            AffectedStat::AttackSpeed => self.attack_speed += amount,
            AffectedStat::SpellDamage => self.spell_damage += amount,
            AffectedStat::Evasion => self.evasion += amount,
            AffectedStat::Shield | AffectedStat::Health | AffectedStat::Timers => {}
        }
    }

    /// Base defenses with buff deltas; magic resist stays in `[0, 1]`.
    pub fn defenses(&self, base: Defenses) -> Defenses {
        Defenses {
            armor: base.armor + self.armor,
            magic_resist: (base.magic_resist + self.magic_resist).clamp(0.0, 1.0),
        }
    }

    /// Speed stat to feed into an interval, floored so the interval stays finite.
    pub fn attack_speed(&self, base_speed: f64) -> f64 {
        (base_speed + self.attack_speed).max(BattleConfig::MIN_SPEED_MODIFIER)
    }

    pub fn scale_attack_damage(&self, damage: f64) -> f64 {
        (damage * (1.0 + self.attack_damage)).max(0.0)
    }

    pub fn scale_spell_damage(&self, damage: f64) -> f64 {
        (damage * (1.0 + self.spell_damage)).max(0.0)
    }

    pub fn evasion_chance(&self) -> f64 {
        self.evasion.clamp(0.0, BattleConfig::EVASION_CAP)
    }
}
