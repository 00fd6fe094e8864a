//! Status effect catalog.
//!
//! Definitions are declarative: an id, a set of [`EffectTags`], an optional
//! periodic damage type and an optional stat modifier. Behaviour attached to a
//! tag lives in the [`EffectHandlers`] registry, so a new effect kind is a
//! registration rather than another branch in the resolver.
mod modifiers;
mod registry;

pub use modifiers::Modifiers;
pub use registry::{ApplyHandler, EffectHandlers, ExpireHandler, TickContext, TickHandler};

use std::collections::HashMap;

use bitflags::bitflags;

use crate::formulas::{DamageType, Defenses};
use crate::state::{BuffApplied, Buffs, Vitals};

bitflags! {
    /// Mechanical behaviours a status effect opts into.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EffectTags: u8 {
        /// Halts timer advancement while active.
        const STUN           = 1 << 0;
        /// Deals the buff's magnitude as damage per second.
        const TICK_DAMAGE    = 1 << 1;
        /// Restores the buff's magnitude as HP per second.
        const HEAL_OVER_TIME = 1 << 2;
        /// Grants a shield pool equal to the buff's magnitude.
        const SHIELD         = 1 << 3;
        /// Chance to dodge incoming enemy attacks.
        const EVASION        = 1 << 4;
        /// Adds a delta to one stat.
        const STAT_MODIFIER  = 1 << 5;
    }
}

/// Stat a buff touches, for display and for modifier aggregation.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum AffectedStat {
    Armor,
    MagicResist,
    AttackDamage,
    AttackSpeed,
    SpellDamage,
    Evasion,
    Shield,
    Health,
    /// Stun: freezes attack and spell timers.
    Timers,
}

/// Default delta for a stat. A buff's own magnitude replaces it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub stat: AffectedStat,
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffectDef {
    pub id: String,
    pub tags: EffectTags,
    /// Mitigation applied to periodic damage.
    pub tick_damage_type: Option<DamageType>,
    pub modifier: Option<StatModifier>,
}

impl StatusEffectDef {
    fn tagged(id: &str, tags: EffectTags) -> Self {
        Self {
            id: id.to_owned(),
            tags,
            tick_damage_type: None,
            modifier: None,
        }
    }

    pub fn stun(id: &str) -> Self {
        Self::tagged(id, EffectTags::STUN)
    }

    pub fn periodic(id: &str, damage_type: DamageType) -> Self {
        Self {
            tick_damage_type: Some(damage_type),
            ..Self::tagged(id, EffectTags::TICK_DAMAGE)
        }
    }

    pub fn heal_over_time(id: &str) -> Self {
        Self::tagged(id, EffectTags::HEAL_OVER_TIME)
    }

    pub fn shield(id: &str) -> Self {
        Self::tagged(id, EffectTags::SHIELD)
    }

    pub fn modifier(id: &str, stat: AffectedStat, amount: f64) -> Self {
        let mut tags = EffectTags::STAT_MODIFIER;
        if stat == AffectedStat::Evasion {
            tags |= EffectTags::EVASION;
        }
        Self {
            modifier: Some(StatModifier { stat, amount }),
            ..Self::tagged(id, tags)
        }
    }

    /// Whether an ability-derived value (damage + spell power) should feed the buff.
    pub fn scales_with_ability(&self) -> bool {
        self.tags
            .intersects(EffectTags::TICK_DAMAGE | EffectTags::SHIELD | EffectTags::HEAL_OVER_TIME)
    }
}

/// Lookup of status effect definitions plus their tag handlers.
#[derive(Clone, Debug)]
pub struct StatusCatalog {
    effects: HashMap<String, StatusEffectDef>,
    handlers: EffectHandlers,
}

impl StatusCatalog {
    /// An empty catalog with the standard tag handlers registered.
    pub fn new() -> Self {
        Self {
            effects: HashMap::new(),
            handlers: EffectHandlers::standard(),
        }
    }

    /// Every effect the shipped abilities reference.
    pub fn standard() -> Self {
        use AffectedStat as S;

        [
            StatusEffectDef::stun("stun"),
            StatusEffectDef::periodic("poison", DamageType::Magical),
            StatusEffectDef::modifier("armor_reduce", S::Armor, 0.0),
            StatusEffectDef::modifier("magic_resist_reduce", S::MagicResist, 0.0),
            StatusEffectDef::heal_over_time("heal_over_time"),
            StatusEffectDef::modifier("attack_damage_reduce", S::AttackDamage, 0.0),
            StatusEffectDef::modifier("spell_damage_boost", S::SpellDamage, 0.1),
            StatusEffectDef::modifier("attack_speed_slow", S::AttackSpeed, 0.0),
            StatusEffectDef::modifier("evasion", S::Evasion, 0.0),
            StatusEffectDef::shield("shield"),
            StatusEffectDef::periodic("magic_dot", DamageType::Magical),
            StatusEffectDef::periodic("physical_dot", DamageType::Physical),
            StatusEffectDef::modifier("attack_speed_bonus", S::AttackSpeed, 0.0),
        ]
        .into_iter()
        .fold(Self::new(), Self::with_effect)
    }

    pub fn with_effect(mut self, def: StatusEffectDef) -> Self {
        self.register(def);
        self
    }

    pub fn register(&mut self, def: StatusEffectDef) {
        self.effects.insert(def.id.clone(), def);
    }

    pub fn handlers_mut(&mut self) -> &mut EffectHandlers {
        &mut self.handlers
    }

    pub fn get(&self, id: &str) -> Option<&StatusEffectDef> {
        self.effects.get(id)
    }

    /// Which stat a buff of this effect touches. Display only.
    pub fn affected_stat(&self, id: &str) -> Option<AffectedStat> {
        let def = self.get(id)?;
        if let Some(modifier) = def.modifier {
            return Some(modifier.stat);
        }
        if def.tags.contains(EffectTags::STUN) {
            Some(AffectedStat::Timers)
        } else if def.tags.contains(EffectTags::SHIELD) {
            Some(AffectedStat::Shield)
        } else if def
            .tags
            .intersects(EffectTags::TICK_DAMAGE | EffectTags::HEAL_OVER_TIME)
        {
            Some(AffectedStat::Health)
        } else {
            None
        }
    }

    /// Sums every active modifier on a unit.
    pub fn modifiers(&self, buffs: &Buffs) -> Modifiers {
        let mut modifiers = Modifiers::default();
        for buff in buffs.iter() {
            if let Some(def) = self.get(&buff.effect) {
                modifiers.absorb(def, buff);
            }
        }
        modifiers
    }

    /// Applies an effect to a unit and runs its apply handlers.
    ///
    /// Unknown effect ids are ignored and reported as dropped.
    pub fn apply(
        &self,
        vitals: &mut Vitals,
        buffs: &mut Buffs,
        effect: &str,
        duration: f64,
        magnitude: Option<f64>,
    ) -> BuffApplied {
        let Some(def) = self.get(effect) else {
            return BuffApplied::Dropped;
        };
        let applied = buffs.apply(effect, duration, magnitude);
        if applied != BuffApplied::Dropped {
            self.handlers.on_apply(def, vitals, magnitude);
        }
        applied
    }

    /// Advances every buff on one unit by `dt` seconds.
    ///
    /// Periodic effects deliver `magnitude × min(dt, remaining)` so their total
    /// does not depend on how time is chunked. Defenses are sampled once before
    /// any buff expires.
    pub fn tick_unit(&self, vitals: &mut Vitals, buffs: &mut Buffs, base: Defenses, dt: f64) {
        if buffs.is_empty() {
            return;
        }
        let defenses = self.modifiers(buffs).defenses(base);

        buffs.retain(|buff| {
            let def = self.get(&buff.effect);
            let seconds = dt.min(buff.remaining).max(0.0);
            if let Some(def) = def {
                let mut ctx = TickContext {
                    vitals: &mut *vitals,
                    def,
                    magnitude: buff.magnitude,
                    defenses,
                    seconds,
                };
                self.handlers.on_tick(&mut ctx);
            }

            buff.remaining -= dt;
            if buff.remaining > 0.0 {
                return true;
            }
            if let Some(def) = def {
                self.handlers.on_expire(def, &mut *vitals);
            }
            false
        });
    }
}

impl Default for StatusCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero_vitals() -> Vitals {
        Vitals::full(100.0)
    }

    #[test]
    fn standard_catalog_resolves_known_effects() {
        let catalog = StatusCatalog::standard();
        assert!(catalog.get("stun").unwrap().tags.contains(EffectTags::STUN));
        assert_eq!(
            catalog.get("physical_dot").unwrap().tick_damage_type,
            Some(DamageType::Physical)
        );
        assert!(catalog.get("frozen").is_none());
    }

    #[test]
    fn affected_stat_for_display() {
        let catalog = StatusCatalog::standard();
        assert_eq!(catalog.affected_stat("armor_reduce"), Some(AffectedStat::Armor));
        assert_eq!(catalog.affected_stat("stun"), Some(AffectedStat::Timers));
        assert_eq!(catalog.affected_stat("shield"), Some(AffectedStat::Shield));
        assert_eq!(catalog.affected_stat("poison"), Some(AffectedStat::Health));
        assert_eq!(catalog.affected_stat("evasion"), Some(AffectedStat::Evasion));
        assert_eq!(catalog.affected_stat("nope"), None);
    }

    #[test]
    fn poison_is_mitigated_by_magic_resist() {
        let catalog = StatusCatalog::standard();
        let mut vitals = hero_vitals();
        let mut buffs = Buffs::empty();
        catalog.apply(&mut vitals, &mut buffs, "poison", 3.0, Some(20.0));

        catalog.tick_unit(&mut vitals, &mut buffs, Defenses::new(0.0, 0.5), 1.0);

        assert_eq!(vitals.current_hp, 90.0);
        assert_eq!(buffs.get("poison").unwrap().remaining, 2.0);
    }

    #[test]
    fn periodic_damage_bypasses_shield() {
        let catalog = StatusCatalog::standard();
        let mut vitals = hero_vitals();
        let mut buffs = Buffs::empty();
        catalog.apply(&mut vitals, &mut buffs, "shield", 10.0, Some(50.0));
        catalog.apply(&mut vitals, &mut buffs, "physical_dot", 5.0, Some(10.0));

        catalog.tick_unit(&mut vitals, &mut buffs, Defenses::default(), 1.0);

        assert_eq!(vitals.shield_hp, 50.0);
        assert_eq!(vitals.current_hp, 90.0);
    }

    #[test]
    fn periodic_total_ignores_overshoot() {
        let catalog = StatusCatalog::standard();
        let mut vitals = hero_vitals();
        let mut buffs = Buffs::empty();
        catalog.apply(&mut vitals, &mut buffs, "magic_dot", 2.0, Some(10.0));

        catalog.tick_unit(&mut vitals, &mut buffs, Defenses::default(), 5.0);

        assert_eq!(vitals.current_hp, 80.0);
        assert!(buffs.is_empty());
    }

    #[test]
    fn heal_over_time_caps_at_max() {
        let catalog = StatusCatalog::standard();
        let mut vitals = hero_vitals();
        vitals.current_hp = 95.0;
        let mut buffs = Buffs::empty();
        catalog.apply(&mut vitals, &mut buffs, "heal_over_time", 4.0, Some(10.0));

        catalog.tick_unit(&mut vitals, &mut buffs, Defenses::default(), 1.0);

        assert_eq!(vitals.current_hp, 100.0);
    }

    #[test]
    fn shield_expiry_discards_residual() {
        let catalog = StatusCatalog::standard();
        let mut vitals = hero_vitals();
        let mut buffs = Buffs::empty();
        catalog.apply(&mut vitals, &mut buffs, "shield", 2.0, Some(100.0));
        assert_eq!(vitals.shield_hp, 100.0);

        vitals.take_hit(40.0);
        catalog.tick_unit(&mut vitals, &mut buffs, Defenses::default(), 2.0);

        assert!(buffs.is_empty());
        assert_eq!(vitals.shield_hp, 0.0);
        assert_eq!(vitals.current_hp, 100.0);
    }

    #[test]
    fn unknown_effects_are_not_applied() {
        let catalog = StatusCatalog::standard();
        let mut vitals = hero_vitals();
        let mut buffs = Buffs::empty();
        let applied = catalog.apply(&mut vitals, &mut buffs, "frozen", 2.0, None);
        assert_eq!(applied, BuffApplied::Dropped);
        assert!(buffs.is_empty());
    }
}
