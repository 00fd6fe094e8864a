//! Data-driven battle content and loaders.
//!
//! This crate houses the shipped hero, ability, enemy and encounter tables and
//! provides loaders for RON/TOML data files:
//! - Hero templates (data-driven via RON)
//! - Abilities and passives (data-driven via RON)
//! - Enemy templates and summons (data-driven via RON)
//! - Encounters (data-driven via RON)
//! - Battle configuration (data-driven via TOML)
//!
//! Content is consumed through [`battle_core::TemplateOracle`] and never
//! appears in battle state.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{CatalogError, CatalogIssue, ContentCatalog};

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityCatalog, AbilityLoader, ConfigLoader, ContentFactory, EncounterCatalog,
    EncounterLoader, EnemyCatalog, EnemyLoader, HeroCatalog, HeroLoader, LoadResult,
};
