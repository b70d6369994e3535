//! End-to-end `render` pipeline: report file → Markdown block → README.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use repolens_markdown::{Markers, render_projects, render_report, splice};
use repolens_shared::{EnrichmentReport, ProjectRecord, RenderConfig, RepolensError, Result};

use crate::report::{read_json, write_atomic};

/// What the render input file contained.
#[derive(Debug, Clone)]
pub enum RenderSource {
    /// An enrichment report.
    Report(EnrichmentReport),
    /// A raw project list that was never enriched.
    Projects(Vec<ProjectRecord>),
}

impl RenderSource {
    /// Number of table rows this source produces.
    pub fn len(&self) -> usize {
        match self {
            Self::Report(report) => report.projects.len(),
            Self::Projects(projects) => projects.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The Markdown placed between the markers.
    pub fn to_markdown(&self) -> String {
        match self {
            Self::Report(report) => render_report(report),
            Self::Projects(projects) => render_projects(projects),
        }
    }
}

/// Result of the `render` pipeline.
#[derive(Debug)]
pub struct RenderResult {
    /// The document that was (or would be) written.
    pub readme_path: PathBuf,
    /// Rows in the generated table.
    pub rows: usize,
    /// Whether the input was a full report rather than a raw list.
    pub from_report: bool,
    /// `false` on a dry run.
    pub written: bool,
    /// The full new document.
    pub content: String,
}

/// Read `path` as a report (JSON object) or a raw project list (JSON array).
pub fn load_render_source(path: &Path) -> Result<RenderSource> {
    let value: serde_json::Value = read_json(path)?;

    let source = if value.is_array() {
        serde_json::from_value(value).map(RenderSource::Projects)
    } else {
        serde_json::from_value(value).map(RenderSource::Report)
    };

    source.map_err(|e| RepolensError::parse(format!("unrecognized data in {}: {e}", path.display())))
}

/// Run the full `render` pipeline.
///
/// The README is only replaced when splicing succeeded, and then atomically.
#[instrument(skip_all, fields(input = %config.input.display(), readme = %config.readme.display()))]
pub fn render_readme(config: &RenderConfig) -> Result<RenderResult> {
    let source = load_render_source(&config.input)?;

    let template = std::fs::read_to_string(&config.readme)
        .map_err(|e| RepolensError::io(&config.readme, e))?;

    let markers = Markers::new(&config.start_marker, &config.end_marker);
    let content = splice(&template, &markers, &source.to_markdown())?;

    if !config.dry_run {
        write_atomic(&config.readme, &content)?;
    }

    let result = RenderResult {
        readme_path: config.readme.clone(),
        rows: source.len(),
        from_report: matches!(source, RenderSource::Report(_)),
        written: !config.dry_run,
        content,
    };

    info!(
        rows = result.rows,
        from_report = result.from_report,
        written = result.written,
        "README rendered"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use repolens_shared::{EnrichedRecord, RepoStats};

    use super::*;
    use crate::report::write_report;
    use crate::test_support::temp_dir;

    const README: &str =
        "# Awesome list\n\nHand-written intro.\n\n<!-- PROJECTS:START -->\nstale\n<!-- PROJECTS:END -->\n\nFooter.\n";

    fn render_config(dir: &Path, input: &str) -> RenderConfig {
        RenderConfig {
            input: dir.join(input),
            readme: dir.join("README.md"),
            start_marker: "<!-- PROJECTS:START -->".into(),
            end_marker: "<!-- PROJECTS:END -->".into(),
            dry_run: false,
        }
    }

    fn sample_report() -> EnrichmentReport {
        let project = ProjectRecord::new(1, "ripgrep", "https://github.com/BurntSushi/ripgrep");
        let stats = RepoStats {
            stars: 50000,
            forks: 2000,
            open_issues: 100,
            language: "Rust".into(),
            description: "Fast search".into(),
            topics: vec![],
            last_updated: "2024-05-01".into(),
            created_at: "2016-03-11".into(),
            license: "The Unlicense".into(),
            watchers: 50000,
            default_branch: "master".into(),
            is_archived: false,
            homepage: String::new(),
            contributor_count: 1,
        };
        EnrichmentReport::new(vec![
            EnrichedRecord::enriched(project.clone(), stats),
            EnrichedRecord::degraded(
                ProjectRecord { id: 2, ..project },
                "Invalid GitHub URL",
            ),
        ])
    }

    #[test]
    fn renders_report_between_markers() {
        let tmp = temp_dir();
        write_report(&tmp.join("processed-data.json"), &sample_report()).unwrap();
        std::fs::write(tmp.join("README.md"), README).unwrap();

        let result = render_readme(&render_config(&tmp, "processed-data.json")).unwrap();
        assert_eq!(result.rows, 2);
        assert!(result.from_report);
        assert!(result.written);

        let written = std::fs::read_to_string(tmp.join("README.md")).unwrap();
        assert_eq!(written, result.content);
        assert!(written.starts_with("# Awesome list\n\nHand-written intro.\n\n<!-- PROJECTS:START -->\n\n"));
        assert!(written.ends_with("\n<!-- PROJECTS:END -->\n\nFooter.\n"));
        assert!(!written.contains("stale"));
        assert!(written.contains("| 50,000 |"));
        assert!(written.contains("| 2 | [ripgrep](https://github.com/BurntSushi/ripgrep) | Unavailable |"));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn raw_project_list_renders_plain_table() {
        let tmp = temp_dir();
        std::fs::write(
            tmp.join("data.json"),
            r#"[{"id": 3, "name": "tokio", "link": "https://github.com/tokio-rs/tokio"}]"#,
        )
        .unwrap();
        std::fs::write(tmp.join("README.md"), README).unwrap();

        let result = render_readme(&render_config(&tmp, "data.json")).unwrap();
        assert!(!result.from_report);
        assert!(result.content.contains(
            "| 3 | **tokio** | [View Repo](https://github.com/tokio-rs/tokio) |"
        ));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn dry_run_leaves_readme_alone() {
        let tmp = temp_dir();
        write_report(&tmp.join("processed-data.json"), &sample_report()).unwrap();
        std::fs::write(tmp.join("README.md"), README).unwrap();

        let mut config = render_config(&tmp, "processed-data.json");
        config.dry_run = true;
        let result = render_readme(&config).unwrap();

        assert!(!result.written);
        assert!(result.content.contains("ripgrep"));
        assert_eq!(std::fs::read_to_string(tmp.join("README.md")).unwrap(), README);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_markers_leave_readme_alone() {
        let tmp = temp_dir();
        write_report(&tmp.join("processed-data.json"), &sample_report()).unwrap();
        std::fs::write(tmp.join("README.md"), "# No markers\n").unwrap();

        let err = render_readme(&render_config(&tmp, "processed-data.json")).unwrap_err();
        assert!(matches!(err, RepolensError::Render(_)));
        assert_eq!(
            std::fs::read_to_string(tmp.join("README.md")).unwrap(),
            "# No markers\n"
        );

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn unrecognized_input_is_a_parse_error() {
        let tmp = temp_dir();
        std::fs::write(tmp.join("weird.json"), r#""just a string""#).unwrap();

        let err = load_render_source(&tmp.join("weird.json")).unwrap_err();
        assert!(matches!(err, RepolensError::Parse { .. }));

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
