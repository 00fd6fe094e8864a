//! A single battle driven on behalf of an external caller.
//!
//! A [`BattleSession`] owns its state and its seeded random stream, so two
//! sessions started from the same [`BattleRequest`] and fed the same ticks end
//! in the same state.

use std::fmt;

use battle_content::ContentCatalog;
use battle_core::{
    BattleEngine, BattleResult, BattleState, HeroId, SetupOptions, TickIntents,
    create_battle_state,
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RuntimeError};
use crate::replay::Replay;
use crate::rng::RandSource;

/// Caller-chosen battle identifier.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BattleId(pub u64);

impl fmt::Display for BattleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything needed to build the same battle twice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleRequest {
    pub roster: Vec<HeroId>,
    pub encounter: String,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub seed: u64,
    /// HP carried over from a previous battle, one entry per roster slot.
    #[serde(default)]
    pub starting_hp: Option<Vec<f64>>,
}

fn default_level() -> u32 {
    1
}

impl BattleRequest {
    pub fn new(roster: Vec<HeroId>, encounter: impl Into<String>) -> Self {
        Self {
            roster,
            encounter: encounter.into(),
            level: default_level(),
            seed: 0,
            starting_hp: None,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_starting_hp(mut self, hp: Vec<f64>) -> Self {
        self.starting_hp = Some(hp);
        self
    }
}

/// Terminal summary handed to whatever applies rewards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub battle: BattleId,
    pub encounter: String,
    pub level: u32,
    pub result: BattleResult,
    pub elapsed: f64,
    pub ticks: u64,
    /// Remaining HP per roster slot.
    pub hero_hp: Vec<f64>,
}

/// Persisted form of a session: state plus the position in its random stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: BattleId,
    pub request: BattleRequest,
    pub state: BattleState,
    pub ticks: u64,
    pub rng_word_pos: u128,
}

#[derive(Debug)]
pub struct BattleSession {
    id: BattleId,
    request: BattleRequest,
    state: BattleState,
    rng: RandSource,
    ticks: u64,
    recording: Option<Replay>,
}

impl BattleSession {
    /// Builds the initial state from `catalog` and seeds the random stream.
    pub fn start(id: BattleId, request: BattleRequest, catalog: &ContentCatalog) -> Result<Self> {
        let mut options = SetupOptions::from_config(catalog.config()).with_level(request.level);
        if let Some(hp) = &request.starting_hp {
            options = options.with_starting_hp(hp.clone());
        }
        let state = create_battle_state(&request.roster, &request.encounter, &options, catalog)?;

        tracing::info!(
            battle = %id,
            encounter = %request.encounter,
            level = request.level,
            heroes = request.roster.len(),
            "battle started"
        );

        Ok(Self {
            id,
            rng: RandSource::seeded(request.seed),
            request,
            state,
            ticks: 0,
            recording: None,
        })
    }

    pub fn restore(snapshot: SessionSnapshot) -> Self {
        tracing::debug!(battle = %snapshot.id, ticks = snapshot.ticks, "battle restored");
        Self {
            id: snapshot.id,
            rng: RandSource::resumed(snapshot.request.seed, snapshot.rng_word_pos),
            request: snapshot.request,
            state: snapshot.state,
            ticks: snapshot.ticks,
            recording: None,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            request: self.request.clone(),
            state: self.state.clone(),
            ticks: self.ticks,
            rng_word_pos: self.rng.word_pos(),
        }
    }

    /// Keeps every subsequent tick so the battle can be replayed.
    ///
    /// Only meaningful on a fresh session; a replay always starts from the request.
    pub fn recording(mut self) -> Self {
        self.recording = Some(Replay::new(self.request.clone()));
        self
    }

    pub fn replay_log(&self) -> Option<&Replay> {
        self.recording.as_ref()
    }

    pub fn id(&self) -> BattleId {
        self.id
    }

    pub fn request(&self) -> &BattleRequest {
        &self.request
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// One engine tick. Ticking a finished battle is an error so callers
    /// notice they are driving a stale session.
    pub fn tick(
        &mut self,
        catalog: &ContentCatalog,
        dt: f64,
        intents: &TickIntents,
    ) -> Result<Option<BattleResult>> {
        if self.is_finished() {
            return Err(RuntimeError::Finished(self.id));
        }
        Ok(self.advance(catalog, dt, intents))
    }

    /// Replays `elapsed` seconds of absence in `tick_step` slices, the last
    /// one partial, stopping early at a terminal result.
    pub fn catch_up(
        &mut self,
        catalog: &ContentCatalog,
        elapsed: f64,
    ) -> Result<Option<BattleResult>> {
        if self.is_finished() {
            return Err(RuntimeError::Finished(self.id));
        }
        let config = catalog.config();
        let step = checked_step(config.tick_step)?;
        let intents = TickIntents::none().with_auto_rotate(config.auto_rotate);
        let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };

        let whole = (elapsed / step).floor();
        let partial = elapsed - whole * step;
        let before = self.ticks;
        let mut result = None;
        for _ in 0..whole as u64 {
            result = self.advance(catalog, step, &intents);
            if result.is_some() {
                break;
            }
        }
        if result.is_none() && partial > 1e-9 {
            result = self.advance(catalog, partial, &intents);
        }

        tracing::debug!(
            battle = %self.id,
            elapsed,
            ticks = self.ticks - before,
            finished = result.is_some(),
            "caught up"
        );
        Ok(result)
    }

    /// Ticks with `tick_step` until the battle ends, giving up after `max_ticks`.
    pub fn run_to_completion(&mut self, catalog: &ContentCatalog) -> Result<BattleOutcome> {
        let config = catalog.config();
        let step = checked_step(config.tick_step)?;
        let intents = TickIntents::none().with_auto_rotate(config.auto_rotate);
        for _ in 0..config.max_ticks {
            if self.is_finished() {
                break;
            }
            self.advance(catalog, step, &intents);
        }
        self.outcome().ok_or(RuntimeError::TickBudgetExhausted {
            ticks: config.max_ticks,
        })
    }

    /// The terminal summary, once the battle has ended.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        let result = self.state.result?;
        Some(BattleOutcome {
            battle: self.id,
            encounter: self.request.encounter.clone(),
            level: self.state.level,
            result,
            elapsed: self.state.elapsed,
            ticks: self.ticks,
            hero_hp: self.state.hero_hp(),
        })
    }

    pub(crate) fn advance(
        &mut self,
        catalog: &ContentCatalog,
        dt: f64,
        intents: &TickIntents,
    ) -> Option<BattleResult> {
        let env = catalog.env();
        let result = BattleEngine::new(&mut self.state).tick(&env, &mut self.rng, dt, intents);
        self.ticks += 1;
        if let Some(replay) = &mut self.recording {
            replay.push(dt, *intents);
        }
        if let Some(result) = result {
            tracing::info!(
                battle = %self.id,
                %result,
                elapsed = self.state.elapsed,
                ticks = self.ticks,
                "battle finished"
            );
        }
        result
    }
}

/// A zero or non-finite step would never cover the elapsed time.
fn checked_step(step: f64) -> Result<f64> {
    if step.is_finite() && step > 0.0 {
        Ok(step)
    } else {
        Err(RuntimeError::InvalidTickStep(step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{BattleConfig, EncounterTemplate, EnemyTemplate, HeroTemplate, TemplateTables};

    fn catalog() -> ContentCatalog {
        let tables = TemplateTables::new()
            .with_hero(
                HeroTemplate::new(HeroId(1), "knight")
                    .with_attack(1.0, 10.0)
                    .with_defenses(100.0, 0.0, 0.0),
            )
            .with_enemy(EnemyTemplate::new("dummy", 35.0, 100.0, 1.0))
            .with_enemy(EnemyTemplate::new("wall", 1e9, 100.0, 0.0))
            .with_encounter(EncounterTemplate::new("dummy").with_enemy("dummy", 1))
            .with_encounter(EncounterTemplate::new("wall").with_enemy("wall", 1));
        ContentCatalog::new(tables, BattleConfig::default().with_tick_step(0.5).with_max_ticks(40))
    }

    fn request(encounter: &str) -> BattleRequest {
        BattleRequest::new(vec![HeroId(1)], encounter).with_seed(5)
    }

    #[test]
    fn unknown_encounter_is_a_setup_error() {
        let err = BattleSession::start(BattleId(1), request("nowhere"), &catalog()).unwrap_err();
        assert!(matches!(err, RuntimeError::Setup(_)));
    }

    #[test]
    fn catch_up_slices_with_a_partial_tail() {
        let catalog = catalog();
        let mut session = BattleSession::start(BattleId(1), request("wall"), &catalog).unwrap();

        assert_eq!(session.catch_up(&catalog, 1.7).unwrap(), None);
        assert_eq!(session.ticks(), 4);
        assert!((session.state().elapsed - 1.7).abs() < 1e-9);
    }

    #[test]
    fn catch_up_stops_at_the_result() {
        let catalog = catalog();
        let mut session = BattleSession::start(BattleId(1), request("dummy"), &catalog).unwrap();

        // Four hits of 10 land at 1, 2, 3 and 4 seconds.
        assert_eq!(session.catch_up(&catalog, 60.0).unwrap(), Some(BattleResult::Win));
        assert_eq!(session.ticks(), 8);
        assert!(matches!(
            session.catch_up(&catalog, 1.0),
            Err(RuntimeError::Finished(BattleId(1)))
        ));
    }

    #[test]
    fn zero_tick_step_is_refused() {
        let catalog = catalog().with_config(BattleConfig::default().with_tick_step(0.0));
        let mut session = BattleSession::start(BattleId(1), request("wall"), &catalog).unwrap();

        assert!(matches!(
            session.catch_up(&catalog, 1.0),
            Err(RuntimeError::InvalidTickStep(step)) if step == 0.0
        ));
        assert!(matches!(
            session.run_to_completion(&catalog),
            Err(RuntimeError::InvalidTickStep(_))
        ));
        assert_eq!(session.ticks(), 0);
    }

    #[test]
    fn run_to_completion_reports_outcome() {
        let catalog = catalog();
        let mut session = BattleSession::start(BattleId(2), request("dummy"), &catalog).unwrap();
        let outcome = session.run_to_completion(&catalog).unwrap();

        assert_eq!(outcome.result, BattleResult::Win);
        assert_eq!(outcome.battle, BattleId(2));
        assert_eq!(outcome.hero_hp, vec![100.0]);
        assert_eq!(session.outcome(), Some(outcome));
    }

    #[test]
    fn run_to_completion_respects_the_budget() {
        let catalog = catalog();
        let mut session = BattleSession::start(BattleId(3), request("wall"), &catalog).unwrap();
        let err = session.run_to_completion(&catalog).unwrap_err();

        assert!(matches!(err, RuntimeError::TickBudgetExhausted { ticks: 40 }));
        assert_eq!(session.ticks(), 40);
    }

    #[test]
    fn snapshot_round_trip_resumes_identically() {
        let catalog = catalog();
        let mut session = BattleSession::start(BattleId(4), request("wall"), &catalog).unwrap();
        session.catch_up(&catalog, 3.0).unwrap();

        let mut restored = BattleSession::restore(session.snapshot());
        session.catch_up(&catalog, 2.0).unwrap();
        restored.catch_up(&catalog, 2.0).unwrap();

        assert_eq!(restored.state(), session.state());
        assert_eq!(restored.ticks(), session.ticks());
    }
}
