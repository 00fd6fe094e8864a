//! Lineup DPS and durability projections.

use anyhow::{Context, Result};
use battle_core::LineupStats;
use clap::Parser;
use console::style;

use super::{hero_name, parse_roster};
use crate::content::ContentArgs;

/// Show lineup DPS and durability projections
#[derive(Parser)]
pub struct Stats {
    /// Hero ids in roster order, comma separated
    #[arg(long, value_delimiter = ',', default_value = "99,25,50")]
    roster: Vec<u32>,

    /// Print JSON instead of the table
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    content: ContentArgs,
}

impl Stats {
    pub fn execute(self) -> Result<()> {
        let catalog = self.content.load()?;
        let stats = LineupStats::compute(&parse_roster(&self.roster), &catalog);

        if self.json {
            let json = serde_json::to_string_pretty(&stats).context("Failed to serialize stats")?;
            println!("{}", json);
            return Ok(());
        }

        println!("{}", style("=== Lineup ===").bold().green());
        println!(
            "  {:<12} {:>8} {:>8} {:>8} {:>7} {:>9} {:>9}",
            "hero", "auto", "spell", "total", "hp", "phys ehp", "mag ehp"
        );
        for hero in &stats.hero_stats {
            println!(
                "  {:<12} {:>8.2} {:>8.2} {:>8.2} {:>7.0} {:>9.1} {:>9.1}",
                hero_name(&catalog, hero.hero_id),
                hero.auto_dps,
                hero.spell_dps,
                hero.total_dps,
                hero.max_hp,
                hero.physical_ehp,
                hero.magical_ehp
            );
        }
        println!();
        println!(
            "{} {:.2} ({:.2} auto, {:.2} spell)",
            style("Total DPS:").bold().cyan(),
            stats.total_dps,
            stats.total_auto_dps,
            stats.total_spell_dps
        );
        println!("{} {:.0}", style("Total HP:").bold().cyan(), stats.total_hp);
        println!(
            "{} {:.1} armor, {:.2} magic resist",
            style("Average:").bold().cyan(),
            stats.avg_armor,
            stats.avg_magic_resist
        );

        Ok(())
    }
}
