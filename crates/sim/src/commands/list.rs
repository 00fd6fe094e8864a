//! List the heroes and encounters a content set provides.

use anyhow::{Context, Result};
use battle_core::TemplateOracle;
use clap::Parser;
use console::style;
use serde::Serialize;

use crate::content::ContentArgs;

/// List heroes and encounters
#[derive(Parser)]
pub struct List {
    /// Print JSON instead of the listing
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    content: ContentArgs,
}

#[derive(Serialize)]
struct Listing<'a> {
    heroes: Vec<&'a battle_core::HeroTemplate>,
    encounters: Vec<&'a battle_core::EncounterTemplate>,
}

impl List {
    pub fn execute(self) -> Result<()> {
        let catalog = self.content.load()?;
        let tables = catalog.templates();
        let listing = Listing {
            heroes: tables
                .hero_ids()
                .into_iter()
                .filter_map(|id| tables.hero(id))
                .collect(),
            encounters: tables
                .encounter_ids()
                .into_iter()
                .filter_map(|id| tables.encounter(id))
                .collect(),
        };

        if self.json {
            let json =
                serde_json::to_string_pretty(&listing).context("Failed to serialize listing")?;
            println!("{}", json);
            return Ok(());
        }

        println!("{}", style("Heroes:").bold().yellow());
        for hero in &listing.heroes {
            println!(
                "  {:>4}  {:<12} {}",
                hero.id,
                hero.name,
                style(hero.abilities.join(", ")).dim()
            );
        }
        println!();

        println!("{}", style("Encounters:").bold().yellow());
        for encounter in &listing.encounters {
            let enemies: Vec<String> = encounter
                .enemies
                .iter()
                .map(|e| format!("{}x {}", e.count, e.enemy))
                .collect();
            println!(
                "  {:<16} {}",
                encounter.id,
                style(enemies.join(", ")).dim()
            );
        }

        Ok(())
    }
}
