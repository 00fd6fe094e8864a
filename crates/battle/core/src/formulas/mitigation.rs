//! Damage mitigation per damage type.

use crate::config::BattleConfig;

/// Damage type determining which defense applies.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum DamageType {
    /// Reduced by armor.
    #[default]
    Physical,
    /// Reduced by the magic resist fraction.
    Magical,
    /// Never reduced.
    Pure,
}

/// Armor and magic resist of whoever is being hit, buffs included.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Defenses {
    pub armor: f64,
    /// Fraction in `[0, 1]`.
    pub magic_resist: f64,
}

impl Defenses {
    pub fn new(armor: f64, magic_resist: f64) -> Self {
        Self {
            armor,
            magic_resist,
        }
    }
}

/// `damage × 100 / (100 + armor)`. Negative armor amplifies.
pub fn apply_physical_damage(damage: f64, armor: f64) -> f64 {
    if damage <= 0.0 {
        return 0.0;
    }
    let armor = armor.max(BattleConfig::MIN_ARMOR);
    damage * 100.0 / (100.0 + armor)
}

/// `damage × (1 − magic_resist)`, never negative.
pub fn apply_magical_damage(damage: f64, magic_resist: f64) -> f64 {
    if damage <= 0.0 {
        return 0.0;
    }
    (damage * (1.0 - magic_resist)).max(0.0)
}

pub fn apply_pure_damage(damage: f64) -> f64 {
    damage.max(0.0)
}

pub fn mitigate(damage: f64, damage_type: DamageType, defenses: Defenses) -> f64 {
    match damage_type {
        DamageType::Physical => apply_physical_damage(damage, defenses.armor),
        DamageType::Magical => apply_magical_damage(damage, defenses.magic_resist),
        DamageType::Pure => apply_pure_damage(damage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn physical_uses_armor_curve() {
        assert_eq!(apply_physical_damage(100.0, 0.0), 100.0);
        assert_eq!(apply_physical_damage(100.0, 100.0), 50.0);
        assert_eq!(apply_physical_damage(24.0, 20.0), 20.0);
    }

    #[test]
    fn negative_armor_amplifies() {
        assert_eq!(apply_physical_damage(100.0, -50.0), 200.0);
    }

    #[test]
    fn magical_uses_resist_fraction() {
        assert_eq!(apply_magical_damage(100.0, 0.25), 75.0);
        assert_eq!(apply_magical_damage(100.0, 1.0), 0.0);
        assert_eq!(apply_magical_damage(-5.0, 0.0), 0.0);
    }

    #[test]
    fn pure_is_unmitigated_and_floored() {
        assert_eq!(apply_pure_damage(42.0), 42.0);
        assert_eq!(apply_pure_damage(-3.0), 0.0);
    }

    #[test]
    fn mitigate_dispatches_on_type() {
        let defenses = Defenses::new(100.0, 0.5);
        assert_eq!(mitigate(80.0, DamageType::Physical, defenses), 40.0);
        assert_eq!(mitigate(80.0, DamageType::Magical, defenses), 40.0);
        assert_eq!(mitigate(80.0, DamageType::Pure, defenses), 80.0);
    }

    #[test]
    fn damage_type_parses_snake_case() {
        assert_eq!("magical".parse::<DamageType>(), Ok(DamageType::Magical));
        assert_eq!(DamageType::Pure.as_ref(), "pure");
    }

    proptest! {
        #[test]
        fn physical_stays_within_damage(d in 0.001f64..1.0e6, armor in 0.0f64..1.0e4) {
            let out = apply_physical_damage(d, armor);
            prop_assert!(out > 0.0);
            prop_assert!(out <= d);
        }

        #[test]
        fn magical_stays_within_damage(d in 0.0f64..1.0e6, mr in 0.0f64..=1.0) {
            let out = apply_magical_damage(d, mr);
            prop_assert!(out >= 0.0);
            prop_assert!(out <= d);
        }

        #[test]
        fn pure_is_max_zero(d in -1.0e6f64..1.0e6) {
            prop_assert_eq!(apply_pure_damage(d), d.max(0.0));
        }
    }
}
