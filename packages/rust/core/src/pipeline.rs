//! End-to-end `enrich` pipeline: project list → lookups → report file.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, instrument};

use repolens_github::GithubClient;
use repolens_shared::{
    ContributorCount, EnrichConfig, EnrichedRecord, EnrichmentReport, ProjectRecord, Result,
};

use crate::enrichment::enrich_project;
use crate::report;

/// Result of the `enrich` pipeline.
#[derive(Debug)]
pub struct EnrichResult {
    /// Where the report was written.
    pub output_path: PathBuf,
    /// Number of projects processed.
    pub total: usize,
    /// Projects with live data.
    pub enriched: usize,
    /// Projects recorded with an error.
    pub degraded: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called once the project list is loaded.
    fn started(&self, total: usize);
    /// Called before a project is looked up (`current` is 1-based).
    fn record_started(&self, name: &str, current: usize, total: usize);
    /// Called after a project has its record.
    fn record_finished(&self, record: &EnrichedRecord, current: usize, total: usize);
    /// Called when the report has been written.
    fn done(&self, result: &EnrichResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn started(&self, _total: usize) {}
    fn record_started(&self, _name: &str, _current: usize, _total: usize) {}
    fn record_finished(&self, _record: &EnrichedRecord, _current: usize, _total: usize) {}
    fn done(&self, _result: &EnrichResult) {}
}

/// Run the full `enrich` pipeline.
///
/// 1. Load the project list (fatal on failure)
/// 2. Enrich every project in order, pausing between projects
/// 3. Write the report atomically (fatal on failure)
#[instrument(skip_all, fields(input = %config.input.display(), output = %config.output.display()))]
pub async fn run_enrichment(
    config: &EnrichConfig,
    progress: &dyn ProgressReporter,
) -> Result<EnrichResult> {
    let start = Instant::now();

    let projects = report::load_projects(&config.input)?;
    info!(count = projects.len(), "loaded project list");
    progress.started(projects.len());

    let client = GithubClient::new(&config.github)?;
    let records = enrich_all(
        &client,
        &projects,
        config.contributors,
        Duration::from_millis(config.delay_ms),
        progress,
    )
    .await;

    let report = EnrichmentReport::new(records);
    report::write_report(&config.output, &report)?;

    let degraded = report.projects.iter().filter(|r| r.is_degraded()).count();
    let result = EnrichResult {
        output_path: config.output.clone(),
        total: report.total_projects,
        enriched: report.total_projects - degraded,
        degraded,
        elapsed: start.elapsed(),
    };

    info!(
        total = result.total,
        enriched = result.enriched,
        degraded = result.degraded,
        elapsed_ms = result.elapsed.as_millis(),
        path = %result.output_path.display(),
        "enrichment report written"
    );
    progress.done(&result);

    Ok(result)
}

/// Enrich `projects` strictly one after another, sleeping `delay` after
/// every project except the last. The output has the input's length and order.
pub async fn enrich_all(
    client: &GithubClient,
    projects: &[ProjectRecord],
    contributors: ContributorCount,
    delay: Duration,
    progress: &dyn ProgressReporter,
) -> Vec<EnrichedRecord> {
    let total = projects.len();
    let mut records = Vec::with_capacity(total);

    for (i, project) in projects.iter().enumerate() {
        progress.record_started(&project.name, i + 1, total);

        let record = enrich_project(client, project, contributors).await;
        progress.record_finished(&record, i + 1, total);
        records.push(record);

        if i + 1 < total && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    records
}
