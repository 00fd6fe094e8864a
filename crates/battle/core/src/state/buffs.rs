//! Timed status effect instances carried by a unit.
//!
//! Buffs are only removed by the status tick once their remaining duration
//! reaches zero. Re-applying an effect the unit already carries refreshes it.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;

/// A live instance of a status effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Buff {
    pub effect: String,
    /// Seconds left. Never increases except through [`Buffs::apply`].
    pub remaining: f64,
    /// Interpretation depends on the effect: DPS, shield amount, stat delta.
    pub magnitude: Option<f64>,
}

impl Buff {
    pub fn new(effect: impl Into<String>, remaining: f64, magnitude: Option<f64>) -> Self {
        Self {
            effect: effect.into(),
            remaining,
            magnitude,
        }
    }
}

/// How [`Buffs::apply`] changed the set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuffApplied {
    Added,
    Refreshed,
    /// The unit already carries the maximum number of distinct effects.
    Dropped,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Buffs {
    entries: ArrayVec<Buff, { BattleConfig::MAX_BUFFS }>,
}

impl Buffs {
    pub fn empty() -> Self {
        Self {
            entries: ArrayVec::new(),
        }
    }

    /// Adds an effect, or refreshes it if already present.
    ///
    /// A refresh keeps the longer of the two durations and takes the new
    /// magnitude when one is given.
    pub fn apply(&mut self, effect: &str, duration: f64, magnitude: Option<f64>) -> BuffApplied {
        if let Some(existing) = self.entries.iter_mut().find(|b| b.effect == effect) {
            existing.remaining = existing.remaining.max(duration);
            if magnitude.is_some() {
                existing.magnitude = magnitude;
            }
            return BuffApplied::Refreshed;
        }

        if self.entries.is_full() {
            return BuffApplied::Dropped;
        }
        self.entries.push(Buff::new(effect, duration, magnitude));
        BuffApplied::Added
    }

    pub fn get(&self, effect: &str) -> Option<&Buff> {
        self.entries.iter().find(|b| b.effect == effect)
    }

    pub fn has(&self, effect: &str) -> bool {
        self.get(effect).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Buff> {
        self.entries.iter()
    }

    /// Keeps buffs for which `keep` returns true. Reserved for the status tick.
    pub(crate) fn retain(&mut self, keep: impl FnMut(&mut Buff) -> bool) {
        self.entries.retain(keep);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reapplying_refreshes_instead_of_stacking() {
        let mut buffs = Buffs::empty();
        assert_eq!(buffs.apply("poison", 3.0, Some(10.0)), BuffApplied::Added);
        assert_eq!(buffs.apply("poison", 1.0, Some(20.0)), BuffApplied::Refreshed);

        assert_eq!(buffs.len(), 1);
        let poison = buffs.get("poison").unwrap();
        assert_eq!(poison.remaining, 3.0);
        assert_eq!(poison.magnitude, Some(20.0));
    }

    #[test]
    fn refresh_without_magnitude_keeps_old_value() {
        let mut buffs = Buffs::empty();
        buffs.apply("shield", 2.0, Some(50.0));
        buffs.apply("shield", 5.0, None);
        let shield = buffs.get("shield").unwrap();
        assert_eq!(shield.remaining, 5.0);
        assert_eq!(shield.magnitude, Some(50.0));
    }

    #[test]
    fn full_set_drops_new_effects() {
        let mut buffs = Buffs::empty();
        for i in 0..BattleConfig::MAX_BUFFS {
            buffs.apply(&format!("effect_{i}"), 1.0, None);
        }
        assert_eq!(buffs.apply("stun", 1.0, None), BuffApplied::Dropped);
        assert!(!buffs.has("stun"));
        assert_eq!(buffs.apply("effect_0", 2.0, None), BuffApplied::Refreshed);
    }
}
