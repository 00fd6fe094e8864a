//! Builds the initial [`BattleState`] from templates.

use crate::config::BattleConfig;
use crate::env::{EnemyTemplate, HeroId, TemplateOracle};
use crate::error::{BattleError, ErrorSeverity};
use crate::formulas::{level_multiplier, scale_enemy_stat};
use crate::state::{BattleState, CombatLog, EnemyInstance, HeroInstance, Vitals};

/// Configuration errors raised before any state exists.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("roster is empty")]
    EmptyRoster,

    #[error("unknown hero {0}")]
    UnknownHero(HeroId),

    #[error("hero {hero} references unknown ability `{ability}`")]
    UnknownAbility { hero: HeroId, ability: String },

    #[error("unknown encounter `{0}`")]
    UnknownEncounter(String),

    #[error("unknown enemy template `{0}`")]
    UnknownEnemy(String),
}

impl BattleError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyRoster => "SETUP_EMPTY_ROSTER",
            Self::UnknownHero(_) => "SETUP_UNKNOWN_HERO",
            Self::UnknownAbility { .. } => "SETUP_UNKNOWN_ABILITY",
            Self::UnknownEncounter(_) => "SETUP_UNKNOWN_ENCOUNTER",
            Self::UnknownEnemy(_) => "SETUP_UNKNOWN_ENEMY",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SetupOptions {
    /// Encounter level; enemy HP and damage scale by `2^(level − 1)`.
    pub level: u32,
    /// HP per roster slot carried over from a previous battle. Ignored unless
    /// its length matches the roster.
    pub starting_hp: Option<Vec<f64>>,
    /// Battle clock at construction, for resumed runs.
    pub elapsed: f64,
    pub log_capacity: usize,
}

impl SetupOptions {
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_starting_hp(mut self, hp: Vec<f64>) -> Self {
        self.starting_hp = Some(hp);
        self
    }

    pub fn with_elapsed(mut self, elapsed: f64) -> Self {
        self.elapsed = elapsed;
        self
    }

    pub fn from_config(config: &BattleConfig) -> Self {
        Self {
            log_capacity: config.combat_log_capacity,
            ..Self::default()
        }
    }
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self {
            level: 1,
            starting_hp: None,
            elapsed: 0.0,
            log_capacity: BattleConfig::DEFAULT_COMBAT_LOG_CAPACITY,
        }
    }
}

/// Builds a fresh battle: every roster id, ability id, encounter id and enemy
/// template (summons included) must resolve.
pub fn create_battle_state(
    roster: &[HeroId],
    encounter_id: &str,
    options: &SetupOptions,
    templates: &dyn TemplateOracle,
) -> Result<BattleState, SetupError> {
    if roster.is_empty() {
        return Err(SetupError::EmptyRoster);
    }

    let starting_hp = options
        .starting_hp
        .as_deref()
        .filter(|hp| hp.len() == roster.len());

    let mut player = Vec::with_capacity(roster.len());
    for (slot, &hero_id) in roster.iter().enumerate() {
        let template = templates
            .hero(hero_id)
            .ok_or(SetupError::UnknownHero(hero_id))?;
        if let Some(missing) = template
            .abilities
            .iter()
            .find(|id| templates.ability(id).is_none())
        {
            return Err(SetupError::UnknownAbility {
                hero: hero_id,
                ability: missing.clone(),
            });
        }

        let max_hp = template.effective_max_hp();
        let mut vitals = Vitals::full(max_hp);
        if let Some(hp) = starting_hp.map(|hp| hp[slot]) {
            vitals.current_hp = if hp.is_nan() { max_hp } else { hp.clamp(0.0, max_hp) };
        }
        player.push(HeroInstance::new(hero_id, vitals));
    }

    let encounter = templates
        .encounter(encounter_id)
        .ok_or_else(|| SetupError::UnknownEncounter(encounter_id.to_owned()))?;

    let level = options.level.max(1);
    let mut enemy = Vec::new();
    for entry in &encounter.enemies {
        let template = templates
            .enemy(&entry.enemy)
            .ok_or_else(|| SetupError::UnknownEnemy(entry.enemy.clone()))?;
        if let Some(summon) = &template.summon
            && templates.enemy(&summon.template).is_none()
        {
            return Err(SetupError::UnknownEnemy(summon.template.clone()));
        }
        for _ in 0..entry.count {
            enemy.push(spawn_enemy(template, level));
        }
    }

    let mut state = BattleState {
        player,
        enemy,
        focused_hero: 0,
        target_index: 0,
        enemy_focus: 0,
        elapsed: options.elapsed.max(0.0),
        last_focus_change_at: options.elapsed.max(0.0) - BattleConfig::FOCUS_CHANGE_COOLDOWN,
        level,
        level_multiplier: level_multiplier(level),
        result: None,
        log: CombatLog::with_capacity(options.log_capacity),
    };

    // A carried-over roster may start with its first slot already dead.
    if !state.player[0].is_alive()
        && let Some(next) = state.next_living_hero(0)
    {
        state.focused_hero = next;
    }

    tracing::debug!(
        encounter = encounter_id,
        level,
        heroes = state.player.len(),
        enemies = state.enemy.len(),
        "battle created"
    );
    Ok(state)
}

/// A level-scaled enemy at full HP with zeroed timers.
pub fn spawn_enemy(template: &EnemyTemplate, level: u32) -> EnemyInstance {
    let instance = EnemyInstance::new(
        template.id.clone(),
        scale_enemy_stat(template.max_hp, level),
        scale_enemy_stat(template.damage, level),
    );
    match &template.summon {
        Some(summon) => instance.with_summon(summon.clone()),
        None => instance,
    }
}
