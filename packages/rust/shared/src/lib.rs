//! Shared types, error model, and configuration for repolens.
//!
//! This crate is the foundation depended on by all other repolens crates.
//! It provides:
//! - [`RepolensError`], the unified error type
//! - Domain types ([`ProjectRecord`], [`EnrichedRecord`], [`EnrichmentReport`])
//! - Configuration ([`AppConfig`], [`EnrichConfig`], [`RenderConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ContributorCount, EnrichConfig, EnrichDefaults, GithubConfig, RenderConfig,
    RenderDefaults, config_dir, config_file_path, init_config, load_config, load_config_from,
};
pub use error::{RepolensError, Result};
pub use types::{
    DEFAULT_BRANCH, Degraded, EnrichedRecord, EnrichmentReport, NO_DESCRIPTION, NO_LICENSE,
    NOT_AVAILABLE, Outcome, ProjectRecord, RepoStats,
};
