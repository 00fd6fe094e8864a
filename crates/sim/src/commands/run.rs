//! Run one battle to completion and report the outcome.

use std::path::PathBuf;

use anyhow::{Context, Result};
use battle_core::{BattleResult, HeroId, LogEntry};
use battle_runtime::{BattleId, BattleOutcome, BattleRequest, BattleSession, state_digest};
use clap::Parser;
use console::style;
use serde::Serialize;

use super::{hero_name, parse_roster};
use crate::content::ContentArgs;

/// Log entries shown in the summary view.
const LOG_TAIL: usize = 12;

/// Run a battle to completion
#[derive(Parser)]
pub struct Run {
    /// Hero ids in roster order, comma separated
    #[arg(long, value_delimiter = ',', default_value = "99,25,50")]
    roster: Vec<u32>,

    /// Encounter id
    #[arg(long, default_value = "wolf_pack")]
    encounter: String,

    /// Encounter level; enemy HP and damage double per level
    #[arg(long, default_value_t = 1)]
    pub level: u32,

    /// Seed for evasion rolls
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Seconds per tick (defaults to the config's tick_step)
    #[arg(long, value_name = "DT")]
    step: Option<f64>,

    /// Rotate the focused hero automatically
    #[arg(long)]
    auto_rotate: bool,

    /// Write the recorded ticks as a JSON replay
    #[arg(long, value_name = "FILE")]
    record: Option<PathBuf>,

    /// Print a JSON report instead of the summary
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    content: ContentArgs,
}

#[derive(Serialize)]
struct RunReport<'a> {
    outcome: &'a BattleOutcome,
    digest: String,
    log: Vec<&'a LogEntry>,
}

impl Run {
    pub fn roster(&self) -> Vec<HeroId> {
        parse_roster(&self.roster)
    }

    pub fn execute(self) -> Result<()> {
        let catalog = self.content.load()?;
        let mut config = catalog.config().clone();
        if let Some(step) = self.step {
            anyhow::ensure!(step.is_finite() && step > 0.0, "--step must be positive, got {step}");
            config.tick_step = step;
        }
        config.auto_rotate |= self.auto_rotate;
        let catalog = catalog.with_config(config);

        let request = BattleRequest::new(self.roster(), &self.encounter)
            .with_level(self.level)
            .with_seed(self.seed);
        let mut session = BattleSession::start(BattleId(self.seed), request, &catalog)?;
        if self.record.is_some() {
            session = session.recording();
        }
        let outcome = session.run_to_completion(&catalog)?;

        if let (Some(path), Some(replay)) = (&self.record, session.replay_log()) {
            let json = serde_json::to_string_pretty(replay).context("Failed to serialize replay")?;
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write replay: {}", path.display()))?;
            tracing::info!("Recorded {} ticks to {}", replay.len(), path.display());
        }

        let digest = state_digest(session.state())?;
        if self.json {
            let report = RunReport {
                outcome: &outcome,
                digest,
                log: session.state().log.iter().collect(),
            };
            let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{}", json);
            return Ok(());
        }

        let result = match outcome.result {
            BattleResult::Win => style("WIN").bold().green(),
            BattleResult::Lose => style("LOSE").bold().red(),
        };
        println!(
            "{} {} (level {})",
            style("Encounter:").bold().cyan(),
            outcome.encounter,
            outcome.level
        );
        println!("{} {}", style("Result:").bold().cyan(), result);
        println!(
            "{} {:.1}s over {} ticks",
            style("Elapsed:").bold().cyan(),
            outcome.elapsed,
            outcome.ticks
        );
        println!("{} {}", style("Digest:").bold().cyan(), digest);
        println!();

        println!("{}", style("Heroes:").bold().yellow());
        for (hero, hp) in session.state().player.iter().zip(&outcome.hero_hp) {
            println!(
                "  {:<12} {:>7.1}/{:<7.1}",
                hero_name(&catalog, hero.hero_id),
                hp,
                hero.vitals.max_hp
            );
        }
        println!();

        let log = &session.state().log;
        println!(
            "{} (last {} of {})",
            style("Combat log:").bold().yellow(),
            LOG_TAIL.min(log.len()),
            log.len()
        );
        for entry in log.iter().skip(log.len().saturating_sub(LOG_TAIL)) {
            println!("  [{:>7.2}] {:?}", entry.time, entry.event);
        }

        Ok(())
    }
}
