//! Immutable templates supplied by the content layer.
//!
//! Heroes are keyed by a numeric [`HeroId`], every other template by a
//! snake_case string id.

use crate::formulas::{self, DamageType, Defenses};

/// Numeric identifier of a hero template.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct HeroId(pub u32);

impl core::fmt::Display for HeroId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Flat bonuses baked into a hero template by an external progression system.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatBonuses {
    pub attack_speed: f64,
    pub attack_damage: f64,
    pub spell_power: f64,
    pub spell_haste: f64,
    pub hp: f64,
    pub armor: f64,
    pub magic_resist: f64,
}

/// Player combatant class.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroTemplate {
    pub id: HeroId,
    pub name: String,
    /// Seconds per basic attack before speed bonuses.
    pub attack_interval: f64,
    pub attack_damage: f64,
    pub max_hp: f64,
    pub armor: f64,
    pub magic_resist: f64,
    /// Absent when the hero has no active spell.
    #[cfg_attr(feature = "serde", serde(default))]
    pub spell_interval: Option<f64>,
    /// Ability ids in rotation order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonuses: StatBonuses,
}

impl HeroTemplate {
    pub fn new(id: HeroId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            attack_interval: 1.0,
            attack_damage: 0.0,
            max_hp: 1.0,
            armor: 0.0,
            magic_resist: 0.0,
            spell_interval: None,
            abilities: Vec::new(),
            bonuses: StatBonuses::default(),
        }
    }

    pub fn with_attack(mut self, interval: f64, damage: f64) -> Self {
        self.attack_interval = interval;
        self.attack_damage = damage;
        self
    }

    pub fn with_defenses(mut self, max_hp: f64, armor: f64, magic_resist: f64) -> Self {
        self.max_hp = max_hp;
        self.armor = armor;
        self.magic_resist = magic_resist;
        self
    }

    pub fn with_spell_interval(mut self, interval: f64) -> Self {
        self.spell_interval = Some(interval);
        self
    }

    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.abilities.push(ability.into());
        self
    }

    pub fn with_bonuses(mut self, bonuses: StatBonuses) -> Self {
        self.bonuses = bonuses;
        self
    }

    pub fn effective_max_hp(&self) -> f64 {
        self.max_hp + self.bonuses.hp
    }

    pub fn effective_attack_damage(&self) -> f64 {
        formulas::attack_damage(self.attack_damage, self.bonuses.attack_damage)
    }

    /// Base of the attack speed stat before buffs are added on top.
    pub fn attack_speed(&self) -> f64 {
        self.bonuses.attack_speed
    }

    pub fn spell_power(&self) -> f64 {
        self.bonuses.spell_power
    }

    pub fn effective_spell_interval(&self) -> Option<f64> {
        self.spell_interval
            .map(|base| formulas::effective_interval(base, self.bonuses.spell_haste, None))
    }

    pub fn base_defenses(&self) -> Defenses {
        Defenses::new(
            self.armor + self.bonuses.armor,
            self.magic_resist + self.bonuses.magic_resist,
        )
    }
}

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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AbilityKind {
    /// Fires on the owner's spell timer.
    Active,
    /// Fires on a trigger.
    Passive,
}

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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Trigger {
    Timer,
    OnDamageTaken,
    OnAttack,
}

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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TargetMode {
    /// The caster itself.
    #[cfg_attr(feature = "serde", serde(rename = "self"))]
    #[strum(serialize = "self")]
    Caster,
    SingleEnemy,
    AllEnemies,
    /// The enemy that just hit the owner.
    Attacker,
    /// The enemy the owner just hit.
    AttackedEnemy,
    LowestHpAlly,
}

/// Status effect applied by an ability to whatever it strikes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusOnHit {
    pub effect: String,
    pub duration: f64,
    /// Overrides the magnitude derived from the ability when present.
    #[cfg_attr(feature = "serde", serde(default))]
    pub magnitude: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityTemplate {
    pub id: String,
    pub kind: AbilityKind,
    pub trigger: Trigger,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_type: Option<DamageType>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_damage: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: Option<TargetMode>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub return_ratio: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status_on_hit: Option<StatusOnHit>,
}

impl AbilityTemplate {
    pub fn active(id: impl Into<String>) -> Self {
        Self::new(id, AbilityKind::Active, Trigger::Timer)
    }

    pub fn passive(id: impl Into<String>, trigger: Trigger) -> Self {
        Self::new(id, AbilityKind::Passive, trigger)
    }

    fn new(id: impl Into<String>, kind: AbilityKind, trigger: Trigger) -> Self {
        Self {
            id: id.into(),
            kind,
            trigger,
            damage_type: None,
            base_damage: None,
            target: None,
            return_ratio: None,
            status_on_hit: None,
        }
    }

    pub fn with_damage(mut self, damage_type: DamageType, base_damage: f64) -> Self {
        self.damage_type = Some(damage_type);
        self.base_damage = Some(base_damage);
        self
    }

    pub fn with_target(mut self, target: TargetMode) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_return_ratio(mut self, ratio: f64) -> Self {
        self.return_ratio = Some(ratio);
        self
    }

    pub fn with_status(
        mut self,
        effect: impl Into<String>,
        duration: f64,
        magnitude: Option<f64>,
    ) -> Self {
        self.status_on_hit = Some(StatusOnHit {
            effect: effect.into(),
            duration,
            magnitude,
        });
        self
    }

    /// Whether the spell timer may fire this ability.
    pub fn is_castable(&self) -> bool {
        self.kind == AbilityKind::Active
            && self.trigger == Trigger::Timer
            && (self.base_damage.is_some() || self.target.is_some())
    }

    /// Declared target, defaulting to a single enemy for damaging spells.
    pub fn target_mode(&self) -> Option<TargetMode> {
        self.target
            .or_else(|| self.base_damage.map(|_| TargetMode::SingleEnemy))
    }

    /// Reflect ratio when this is a damage-taken passive.
    pub fn reflect_ratio(&self) -> Option<f64> {
        match (self.kind, self.trigger) {
            (AbilityKind::Passive, Trigger::OnDamageTaken) => self.return_ratio,
            _ => None,
        }
    }
}

/// Periodic spawn owned by an enemy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SummonAbility {
    /// Enemy template spawned.
    pub template: String,
    /// Fixed seconds between spawns.
    pub interval: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: String,
    pub name: String,
    pub max_hp: f64,
    pub attack_interval: f64,
    pub damage: f64,
    pub armor: f64,
    pub magic_resist: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub summon: Option<SummonAbility>,
}

impl EnemyTemplate {
    pub fn new(id: impl Into<String>, max_hp: f64, attack_interval: f64, damage: f64) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            max_hp,
            attack_interval,
            damage,
            armor: 0.0,
            magic_resist: 0.0,
            summon: None,
        }
    }

    pub fn with_defenses(mut self, armor: f64, magic_resist: f64) -> Self {
        self.armor = armor;
        self.magic_resist = magic_resist;
        self
    }

    pub fn with_summon(mut self, template: impl Into<String>, interval: f64) -> Self {
        self.summon = Some(SummonAbility {
            template: template.into(),
            interval,
        });
        self
    }

    pub fn base_defenses(&self) -> Defenses {
        Defenses::new(self.armor, self.magic_resist)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterEntry {
    pub enemy: String,
    pub count: u32,
}

/// Ordered enemy groups making up one fight.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterTemplate {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub enemies: Vec<EncounterEntry>,
}

impl EncounterTemplate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            enemies: Vec::new(),
        }
    }

    pub fn with_enemy(mut self, enemy: impl Into<String>, count: u32) -> Self {
        self.enemies.push(EncounterEntry {
            enemy: enemy.into(),
            count,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_folds_flat_bonuses() {
        let hero = HeroTemplate::new(HeroId(25), "lina")
            .with_attack(1.4, 21.0)
            .with_defenses(100.0, 1.0, 0.25)
            .with_spell_interval(10.0)
            .with_bonuses(StatBonuses {
                attack_damage: 4.0,
                spell_haste: 0.25,
                hp: 20.0,
                armor: 2.0,
                ..StatBonuses::default()
            });

        assert_eq!(hero.effective_attack_damage(), 25.0);
        assert_eq!(hero.effective_max_hp(), 120.0);
        assert_eq!(hero.effective_spell_interval(), Some(8.0));
        assert_eq!(hero.base_defenses(), Defenses::new(3.0, 0.25));
    }

    #[test]
    fn castable_requires_active_timer_with_damage_or_target() {
        let nuke = AbilityTemplate::active("nuke").with_damage(DamageType::Magical, 50.0);
        let buff = AbilityTemplate::active("buff").with_target(TargetMode::Caster);
        let empty = AbilityTemplate::active("empty");
        let passive = AbilityTemplate::passive("thorns", Trigger::OnDamageTaken)
            .with_damage(DamageType::Physical, 1.0);

        assert!(nuke.is_castable());
        assert!(buff.is_castable());
        assert!(!empty.is_castable());
        assert!(!passive.is_castable());
        assert_eq!(nuke.target_mode(), Some(TargetMode::SingleEnemy));
    }

    #[test]
    fn reflect_ratio_only_for_damage_taken_passives() {
        let thorns = AbilityTemplate::passive("thorns", Trigger::OnDamageTaken).with_return_ratio(0.2);
        let strike = AbilityTemplate::passive("strike", Trigger::OnAttack).with_return_ratio(0.2);
        assert_eq!(thorns.reflect_ratio(), Some(0.2));
        assert_eq!(strike.reflect_ratio(), None);
    }

    #[test]
    fn target_mode_parses_self() {
        assert_eq!("self".parse::<TargetMode>(), Ok(TargetMode::Caster));
        assert_eq!(TargetMode::LowestHpAlly.as_ref(), "lowest_hp_ally");
    }
}
