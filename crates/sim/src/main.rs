//! Developer CLI for running and inspecting battles.
//!
//! Run with: `cargo run -p battle-sim -- <command>`

mod commands;
mod content;
mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{List, Replay, Run, Stats};

/// Battle simulator
#[derive(Parser)]
#[command(name = "battle-sim")]
#[command(about = "Run, replay and inspect incremental battles", long_about = None)]
#[command(version)]
struct Cli {
    /// Also write logs to `battle-sim.log` in this directory
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run a battle to completion
    Run(Run),

    /// Show lineup DPS and durability projections
    Stats(Stats),

    /// List heroes and encounters
    List(List),

    /// Replay a recorded battle and print its state digest
    Replay(Replay),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for RUST_LOG, BATTLE_CONTENT_DIR)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = logging::init(cli.log_dir.as_deref())?;

    match cli.command {
        Command::Run(cmd) => cmd.execute(),
        Command::Stats(cmd) => cmd.execute(),
        Command::List(cmd) => cmd.execute(),
        Command::Replay(cmd) => cmd.execute(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_parses_roster_list() {
        let cli = Cli::try_parse_from([
            "battle-sim", "run", "--roster", "99,25", "--encounter", "dps_camp", "--level", "3",
        ])
        .unwrap();
        let Command::Run(run) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(run.roster(), vec![battle_core::HeroId(99), battle_core::HeroId(25)]);
        assert_eq!(run.level, 3);
    }

    #[test]
    fn log_dir_is_global() {
        let cli = Cli::try_parse_from(["battle-sim", "list", "--log-dir", "/tmp/logs"]).unwrap();
        assert_eq!(cli.log_dir, Some(PathBuf::from("/tmp/logs")));
    }
}
