//! Bounded combat log.

use std::collections::VecDeque;

use crate::config::BattleConfig;
use crate::env::HeroId;
use crate::formulas::DamageType;

/// Which side a logged unit belongs to, by index at the time of the event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitRef {
    Hero(usize),
    Enemy(usize),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CombatEvent {
    AutoAttack {
        hero: usize,
        hero_id: HeroId,
        target: usize,
        enemy: String,
        raw_damage: f64,
        damage: f64,
    },
    Spell {
        hero: usize,
        hero_id: HeroId,
        ability: String,
        /// Enemy struck, if the spell hit exactly one.
        target: Option<usize>,
        damage_type: Option<DamageType>,
        damage: f64,
    },
    Heal {
        hero: usize,
        ability: String,
        ally: usize,
        amount: f64,
    },
    StatusApplied {
        unit: UnitRef,
        effect: String,
        duration: f64,
    },
    EnemyAttack {
        enemy: usize,
        template: String,
        hero: usize,
        raw_damage: f64,
        damage: f64,
    },
    Evaded {
        enemy: usize,
        hero: usize,
    },
    ReturnDamage {
        hero: usize,
        enemy: usize,
        damage_type: DamageType,
        damage: f64,
    },
    Summon {
        summoner: usize,
        template: String,
    },
    Death {
        unit: UnitRef,
    },
    FocusChanged {
        from: usize,
        to: usize,
        /// Set when the previous focus died and focus was reassigned.
        forced: bool,
    },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    /// Battle time in seconds.
    pub time: f64,
    pub event: CombatEvent,
}

/// Most recent combat events, oldest dropped first.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl CombatLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(BattleConfig::DEFAULT_COMBAT_LOG_CAPACITY)),
            capacity,
        }
    }

    pub fn push(&mut self, time: f64, event: CombatEvent) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry { time, event });
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for CombatLog {
    fn default() -> Self {
        Self::with_capacity(BattleConfig::DEFAULT_COMBAT_LOG_CAPACITY)
    }
}
