//! Replay a recorded battle and print its state digest.

use std::path::PathBuf;

use anyhow::{Context, Result};
use battle_runtime::state_digest;
use clap::Parser;
use console::style;
use serde_json::json;

use crate::content::ContentArgs;

/// Replay a recorded battle and print its state digest
#[derive(Parser)]
pub struct Replay {
    /// JSON replay written by `run --record`
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Print JSON instead of the summary
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    content: ContentArgs,
}

impl Replay {
    pub fn execute(self) -> Result<()> {
        let catalog = self.content.load()?;
        let text = std::fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read replay: {}", self.file.display()))?;
        let replay: battle_runtime::Replay = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse replay: {}", self.file.display()))?;

        let state = replay.replay(&catalog)?;
        let digest = state_digest(&state)?;

        if self.json {
            let report = json!({
                "steps": replay.len(),
                "result": state.result,
                "elapsed": state.elapsed,
                "digest": digest,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        let result = state
            .result
            .map(|r| r.to_string())
            .unwrap_or_else(|| "in progress".to_string());
        println!("{} {}", style("Replay:").bold().cyan(), self.file.display());
        println!("{} {}", style("Steps:").bold().cyan(), replay.len());
        println!("{} {}", style("Result:").bold().cyan(), result);
        println!("{} {:.1}s", style("Elapsed:").bold().cyan(), state.elapsed);
        println!("{} {}", style("Digest:").bold().cyan(), digest);

        Ok(())
    }
}
