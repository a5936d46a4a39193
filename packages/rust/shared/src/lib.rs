//! Shared types, error model, and configuration for Signpost.
//!
//! This crate is the foundation depended on by all other Signpost crates.
//! It provides:
//! - [`SignpostError`] — the unified error type
//! - Catalogue types ([`Catalogue`], [`Question`], [`Outcome`], [`Step`], [`Answer`])
//! - Catalogue loading ([`load_catalogue_from`], [`builtin_catalogue`])
//! - Configuration ([`AppConfig`], [`CatalogueSource`], config loading)

pub mod catalogue;
pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use catalogue::{
    CatalogueFormat, builtin_catalogue, load_catalogue, load_catalogue_from, parse_catalogue,
};
pub use config::{
    AppConfig, BUILTIN_CATALOGUE, CatalogueRegistryEntry, CatalogueSource, DefaultsConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{Result, SignpostError};
pub use types::{Answer, Catalogue, Outcome, OutcomeId, Question, QuestionId, Step};
