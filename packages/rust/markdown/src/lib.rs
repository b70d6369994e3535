//! README rendering for repolens.
//!
//! Turns an [`EnrichmentReport`] (or a raw project list) into a Markdown
//! block and splices it into a document between two marker lines. Everything
//! here is a pure function of its inputs.

mod splice;
mod stats;
mod table;

use tracing::{debug, instrument};

use repolens_shared::{EnrichmentReport, ProjectRecord};

pub use splice::{Markers, splice};
pub use stats::ReportStats;
pub use table::{render_plain_table, render_summary, render_table};

/// Summary block followed by the project table.
#[instrument(skip_all, fields(projects = report.projects.len()))]
pub fn render_report(report: &EnrichmentReport) -> String {
    let stats = ReportStats::compute(&report.projects);
    debug!(
        enriched = stats.enriched,
        degraded = stats.degraded,
        stars = stats.total_stars,
        "computed report statistics"
    );

    let summary = render_summary(report, &stats);
    let table = render_table(&report.projects);
    format!("{summary}\n{table}")
}

/// Plain `ID | Name | Link` table for a project list that was never enriched.
pub fn render_projects(projects: &[ProjectRecord]) -> String {
    render_plain_table(projects)
}

#[cfg(test)]
pub(crate) mod tests {
    use repolens_shared::{EnrichedRecord, RepoStats};

    use super::*;

    fn project(id: i64) -> ProjectRecord {
        ProjectRecord::new(id, format!("Project {id}"), format!("https://github.com/o/p{id}"))
    }

    pub(crate) fn enriched(id: i64, language: &str, stars: u64, archived: bool) -> EnrichedRecord {
        EnrichedRecord::enriched(
            project(id),
            RepoStats {
                stars,
                forks: 1,
                open_issues: 1,
                language: language.into(),
                description: format!("Project number {id}"),
                topics: vec![],
                last_updated: "2024-05-01".into(),
                created_at: "2020-01-01".into(),
                license: "MIT License".into(),
                watchers: stars,
                default_branch: "main".into(),
                is_archived: archived,
                homepage: String::new(),
                contributor_count: 1,
            },
        )
    }

    pub(crate) fn degraded(id: i64) -> EnrichedRecord {
        EnrichedRecord::degraded(project(id), "API returned status 404: Not Found")
    }

    #[test]
    fn report_block_has_summary_then_table() {
        let report = EnrichmentReport::new(vec![enriched(1, "Rust", 3, false), degraded(2)]);
        let block = render_report(&report);

        let summary_at = block.find("Projects: **2**").unwrap();
        let table_at = block.find("| ID | Project |").unwrap();
        assert!(summary_at < table_at);
        assert!(block.contains("| 2 | [Project 2](https://github.com/o/p2) | Unavailable |"));
    }

    #[test]
    fn rendered_block_splices_cleanly() {
        let report = EnrichmentReport::new(vec![enriched(1, "Go", 7, false)]);
        let readme = "# List\n<!-- PROJECTS:START -->\n<!-- PROJECTS:END -->\nfooter\n";

        let out = splice(readme, &Markers::default(), &render_report(&report)).unwrap();
        assert!(out.starts_with("# List\n<!-- PROJECTS:START -->\n\nProjects: **1**"));
        assert!(out.ends_with("|\n\n<!-- PROJECTS:END -->\nfooter\n"));
    }
}
