//! Per-project enrichment: resolve, look up, merge.
//!
//! Every failure below is captured on the returned record. Nothing here
//! returns an error, so a batch always yields one record per project.

use tracing::{error, info, warn};

use repolens_github::{GithubClient, RepoRef};
use repolens_shared::{ContributorCount, EnrichedRecord, ProjectRecord};

/// Error recorded for links that do not point at a GitHub repository.
pub const INVALID_LINK: &str = "Invalid GitHub URL";

/// Turn one project into one enriched (or degraded) record.
///
/// 1. Resolve the link; an unresolvable link degrades without any request.
/// 2. Fetch the repository; failure degrades with the error message.
/// 3. Fetch the contributor count; failure only zeroes that count.
pub async fn enrich_project(
    client: &GithubClient,
    project: &ProjectRecord,
    contributors: ContributorCount,
) -> EnrichedRecord {
    info!(name = %project.name, "fetching repository data");

    let Some(repo) = RepoRef::parse(&project.link) else {
        warn!(name = %project.name, link = %project.link, "not a GitHub repository link");
        return EnrichedRecord::degraded(project.clone(), INVALID_LINK);
    };

    let response = match client.fetch_repo(&repo).await {
        Ok(response) => response,
        Err(e) => {
            error!(name = %project.name, %repo, error = %e, "repository lookup failed");
            return EnrichedRecord::degraded(project.clone(), e.to_string());
        }
    };

    let contributor_count = match client.fetch_contributor_count(&repo, contributors).await {
        Ok(count) => count,
        Err(e) => {
            warn!(name = %project.name, %repo, error = %e, "could not fetch contributors");
            0
        }
    };

    info!(name = %project.name, %repo, "enriched");
    EnrichedRecord::enriched(project.clone(), response.into_stats(contributor_count))
}
