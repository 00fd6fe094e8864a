//! Content selection shared by every command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use battle_content::{ConfigLoader, ContentCatalog, ContentFactory};
use clap::Args;

/// Environment variable naming a content directory when `--content` is absent.
pub const CONTENT_DIR_ENV: &str = "BATTLE_CONTENT_DIR";

#[derive(Args, Clone, Debug, Default)]
pub struct ContentArgs {
    /// Data directory holding heroes.ron, abilities.ron, enemies.ron,
    /// encounters.ron and config.toml. Built-in content when omitted.
    #[arg(long, value_name = "DIR")]
    pub content: Option<PathBuf>,

    /// Config TOML replacing the content's config.toml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ContentArgs {
    pub fn content_dir(&self) -> Option<PathBuf> {
        self.content
            .clone()
            .or_else(|| std::env::var_os(CONTENT_DIR_ENV).map(PathBuf::from))
    }

    pub fn load(&self) -> Result<ContentCatalog> {
        let mut catalog = match self.content_dir() {
            Some(dir) => ContentFactory::new(&dir)
                .load_catalog()
                .with_context(|| format!("Failed to load content from {}", dir.display()))?,
            None => ContentCatalog::builtin().context("Built-in content is invalid")?,
        };
        if let Some(path) = &self.config {
            catalog = catalog.with_config(ConfigLoader::load(path)?);
        }
        Ok(catalog)
    }
}
