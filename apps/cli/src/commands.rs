//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use repolens_core::pipeline::{EnrichResult, ProgressReporter};
use repolens_shared::{
    AppConfig, ContributorCount, EnrichConfig, EnrichedRecord, RenderConfig, init_config,
    load_config, load_config_from,
};
use tracing::info;
use url::Url;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// repolens: GitHub metadata for a curated project list.
#[derive(Parser)]
#[command(
    name = "repolens",
    version,
    about = "Enrich a project list with GitHub metadata and render it into a README.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Config file (defaults to ~/.repolens/repolens.toml).
    #[arg(long, global = true, env = "REPOLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Contributor count strategy as accepted on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum ContributorsArg {
    /// Length of the first page (0 or 1).
    FirstPage,
    /// Total from the pagination links.
    Exact,
}

impl From<ContributorsArg> for ContributorCount {
    fn from(arg: ContributorsArg) -> Self {
        match arg {
            ContributorsArg::FirstPage => Self::FirstPage,
            ContributorsArg::Exact => Self::Exact,
        }
    }
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Fetch repository metadata for every project and write the report.
    Enrich {
        /// Project list (JSON array of {id, name, link}).
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Report destination.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pause between projects in milliseconds.
        #[arg(long)]
        delay_ms: Option<u64>,

        /// How to derive contributor counts.
        #[arg(long, value_enum)]
        contributors: Option<ContributorsArg>,

        /// GitHub API base URL.
        #[arg(long)]
        api_base: Option<String>,
    },

    /// Render the report into the README between the marker lines.
    Render {
        /// Report (or raw project list) to render.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Document to update.
        #[arg(short, long)]
        readme: Option<PathBuf>,

        /// Print the updated document instead of writing it.
        #[arg(long)]
        dry_run: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "repolens=info",
        1 => "repolens=debug",
        _ => "repolens=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so `render --dry-run` output stays clean.
    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    match cli.command {
        Command::Enrich {
            input,
            output,
            delay_ms,
            contributors,
            api_base,
        } => {
            let mut enrich = EnrichConfig::from(&config);
            if let Some(input) = input {
                enrich.input = input;
            }
            if let Some(output) = output {
                enrich.output = output;
            }
            if let Some(delay_ms) = delay_ms {
                enrich.delay_ms = delay_ms;
            }
            if let Some(contributors) = contributors {
                enrich.contributors = contributors.into();
            }
            if let Some(api_base) = api_base {
                Url::parse(&api_base).map_err(|e| eyre!("invalid API base '{api_base}': {e}"))?;
                enrich.github.api_base = api_base;
            }
            cmd_enrich(&enrich).await
        }
        Command::Render {
            input,
            readme,
            dry_run,
        } => {
            let mut render = RenderConfig::from(&config);
            if let Some(input) = input {
                render.input = input;
            }
            if let Some(readme) = readme {
                render.readme = readme;
            }
            render.dry_run = dry_run;
            cmd_render(&render)
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_enrich(config: &EnrichConfig) -> Result<()> {
    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        delay_ms = config.delay_ms,
        contributors = %config.contributors,
        "starting enrichment"
    );

    let reporter = CliProgress::new();
    let result = repolens_core::pipeline::run_enrichment(config, &reporter).await;
    reporter.finish();
    let result = result?;

    println!();
    println!("  Enrichment report written!");
    println!("  Projects: {}", result.total);
    println!("  Enriched: {}", result.enriched);
    println!("  Failed:   {}", result.degraded);
    println!("  Path:     {}", result.output_path.display());
    println!("  Time:     {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

fn cmd_render(config: &RenderConfig) -> Result<()> {
    let result = repolens_core::render::render_readme(config)?;

    if result.written {
        println!(
            "Updated {} ({} projects)",
            result.readme_path.display(),
            result.rows
        );
    } else {
        print!("{}", result.content);
    }

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif bar.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) =
            ProgressStyle::with_template("{spinner:.cyan} [{pos}/{len}] {wide_msg}")
        {
            bar.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
        }
        bar.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn started(&self, total: usize) {
        self.bar.set_length(total as u64);
    }

    fn record_started(&self, name: &str, _current: usize, _total: usize) {
        self.bar.set_message(format!("Fetching {name}"));
    }

    fn record_finished(&self, record: &EnrichedRecord, _current: usize, _total: usize) {
        if let Some(error) = record.error() {
            self.bar
                .println(format!("  failed: {} ({error})", record.project.name));
        }
        self.bar.inc(1);
    }

    fn done(&self, _result: &EnrichResult) {
        self.bar.finish_and_clear();
    }
}
