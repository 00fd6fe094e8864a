/// Battle rule constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Fixed step used when a caller drives a battle in bulk (catch-up, run to completion).
    pub tick_step: f64,

    /// Upper bound on ticks for bulk driving. A battle without damage never ends on its own.
    pub max_ticks: u32,

    /// Whether bulk drivers opt in to automatic focus rotation.
    pub auto_rotate: bool,

    /// Maximum number of combat log entries kept per battle.
    pub combat_log_capacity: usize,
}

impl BattleConfig {
    // ===== rule constants =====
    /// Minimum simulated seconds between two player focus changes.
    pub const FOCUS_CHANGE_COOLDOWN: f64 = 2.0;
    /// Seconds since the last focus change after which auto-rotation moves focus.
    pub const AUTO_ROTATION_INTERVAL: f64 = 10.0;
    /// Damage multiplier for basic attacks on anything but the enemy focus.
    pub const OFF_FOCUS_MULTIPLIER: f64 = 0.5;
    pub const EVASION_CAP: f64 = 0.75;
    /// Lower bound for a summed speed modifier so intervals stay finite.
    pub const MIN_SPEED_MODIFIER: f64 = -0.9;
    /// Armor is floored here so the physical curve keeps a positive denominator.
    pub const MIN_ARMOR: f64 = -99.0;
    pub const MAX_BUFFS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TICK_STEP: f64 = 0.1;
    pub const DEFAULT_MAX_TICKS: u32 = 5000;
    pub const DEFAULT_COMBAT_LOG_CAPACITY: usize = 200;

    pub fn new() -> Self {
        Self {
            tick_step: Self::DEFAULT_TICK_STEP,
            max_ticks: Self::DEFAULT_MAX_TICKS,
            auto_rotate: false,
            combat_log_capacity: Self::DEFAULT_COMBAT_LOG_CAPACITY,
        }
    }

    pub fn with_tick_step(mut self, tick_step: f64) -> Self {
        self.tick_step = tick_step;
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: u32) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn with_auto_rotate(mut self, auto_rotate: bool) -> Self {
        self.auto_rotate = auto_rotate;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
