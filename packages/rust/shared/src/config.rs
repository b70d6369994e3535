//! Application configuration for repolens.
//!
//! User config lives at `~/.repolens/repolens.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RepolensError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "repolens.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".repolens";

// ---------------------------------------------------------------------------
// Config structs (matching repolens.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// GitHub API settings.
    #[serde(default)]
    pub github: GithubConfig,

    /// Defaults for `repolens enrich`.
    #[serde(default)]
    pub enrich: EnrichDefaults,

    /// Defaults for `repolens render`.
    #[serde(default)]
    pub render: RenderDefaults,
}

/// `[github]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Base URL of the REST API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Identifying `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// `Accept` header requesting the versioned JSON media type.
    #[serde(default = "default_accept")]
    pub accept: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            user_agent: default_user_agent(),
            accept: default_accept(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.github.com".into()
}
fn default_user_agent() -> String {
    concat!("repolens/", env!("CARGO_PKG_VERSION")).into()
}
fn default_accept() -> String {
    "application/vnd.github.v3+json".into()
}
fn default_timeout_secs() -> u64 {
    30
}

/// How the contributor count of a repository is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContributorCount {
    /// Length of the first contributors page with `per_page=1` (0 or 1).
    #[default]
    FirstPage,
    /// Total read from the `rel="last"` page of the `Link` header.
    Exact,
}

impl std::fmt::Display for ContributorCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstPage => f.write_str("first-page"),
            Self::Exact => f.write_str("exact"),
        }
    }
}

/// `[enrich]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichDefaults {
    /// Project list to read.
    #[serde(default = "default_enrich_input")]
    pub input: String,

    /// Where the enrichment report is written.
    #[serde(default = "default_enrich_output")]
    pub output: String,

    /// Pause in ms between two records.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Contributor count strategy.
    #[serde(default)]
    pub contributors: ContributorCount,
}

impl Default for EnrichDefaults {
    fn default() -> Self {
        Self {
            input: default_enrich_input(),
            output: default_enrich_output(),
            delay_ms: default_delay_ms(),
            contributors: ContributorCount::default(),
        }
    }
}

fn default_enrich_input() -> String {
    "data.json".into()
}
fn default_enrich_output() -> String {
    "processed-data.json".into()
}
fn default_delay_ms() -> u64 {
    1000
}

/// `[render]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderDefaults {
    /// Enrichment report (or raw project list) to render.
    #[serde(default = "default_enrich_output")]
    pub input: String,

    /// Document the table is spliced into.
    #[serde(default = "default_readme")]
    pub readme: String,

    /// Line opening the generated region.
    #[serde(default = "default_start_marker")]
    pub start_marker: String,

    /// Line closing the generated region.
    #[serde(default = "default_end_marker")]
    pub end_marker: String,
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            input: default_enrich_output(),
            readme: default_readme(),
            start_marker: default_start_marker(),
            end_marker: default_end_marker(),
        }
    }
}

fn default_readme() -> String {
    "README.md".into()
}
fn default_start_marker() -> String {
    "<!-- PROJECTS:START -->".into()
}
fn default_end_marker() -> String {
    "<!-- PROJECTS:END -->".into()
}

// ---------------------------------------------------------------------------
// Runtime configs (merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime enrichment configuration.
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    /// Project list to read.
    pub input: PathBuf,
    /// Report destination.
    pub output: PathBuf,
    /// Pause in ms after every record except the last.
    pub delay_ms: u64,
    /// Contributor count strategy.
    pub contributors: ContributorCount,
    /// API client settings.
    pub github: GithubConfig,
}

impl From<&AppConfig> for EnrichConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            input: PathBuf::from(&config.enrich.input),
            output: PathBuf::from(&config.enrich.output),
            delay_ms: config.enrich.delay_ms,
            contributors: config.enrich.contributors,
            github: config.github.clone(),
        }
    }
}

/// Runtime render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Report or raw project list.
    pub input: PathBuf,
    /// Target document.
    pub readme: PathBuf,
    /// Start marker line.
    pub start_marker: String,
    /// End marker line.
    pub end_marker: String,
    /// Return the new document instead of writing it.
    pub dry_run: bool,
}

impl From<&AppConfig> for RenderConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            input: PathBuf::from(&config.render.input),
            readme: PathBuf::from(&config.render.readme),
            start_marker: config.render.start_marker.clone(),
            end_marker: config.render.end_marker.clone(),
            dry_run: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.repolens/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| RepolensError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.repolens/repolens.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = match config_file_path() {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(error = %e, "no home directory, using defaults");
            return Ok(AppConfig::default());
        }
    };

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| RepolensError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| RepolensError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| RepolensError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| RepolensError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| RepolensError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
