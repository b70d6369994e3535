//! Core domain types: the input project list and the enrichment report.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Placeholder for a missing language or date.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a missing repository description.
pub const NO_DESCRIPTION: &str = "No description";

/// Placeholder for a repository without a detected license.
pub const NO_LICENSE: &str = "No license";

/// Branch name assumed when the API does not report one.
pub const DEFAULT_BRANCH: &str = "main";

// ---------------------------------------------------------------------------
// ProjectRecord
// ---------------------------------------------------------------------------

/// One entry of the human-maintained project list (`data.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Identifier, unique within the list.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Link to the hosted repository.
    pub link: String,
    /// Any other keys of the input entry, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProjectRecord {
    pub fn new(id: i64, name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            link: link.into(),
            extra: Map::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// EnrichedRecord
// ---------------------------------------------------------------------------

/// Live repository data merged into a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoStats {
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    pub language: String,
    pub description: String,
    pub topics: Vec<String>,
    /// `YYYY-MM-DD` or [`NOT_AVAILABLE`].
    pub last_updated: String,
    /// `YYYY-MM-DD` or [`NOT_AVAILABLE`].
    pub created_at: String,
    pub license: String,
    pub watchers: u64,
    pub default_branch: String,
    pub is_archived: bool,
    pub homepage: String,
    pub contributor_count: u64,
}

/// Placeholder data for a project whose lookup failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Degraded {
    /// Why the lookup failed.
    pub error: String,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub open_issues: u64,
    #[serde(default = "not_available")]
    pub language: String,
}

fn not_available() -> String {
    NOT_AVAILABLE.into()
}

impl Degraded {
    /// Zeroed placeholder carrying `error`.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            stars: 0,
            forks: 0,
            open_issues: 0,
            language: not_available(),
        }
    }
}

/// Result of enriching one project.
///
/// Serialized without a tag: a record carrying `error` is [`Outcome::Degraded`].
/// `Degraded` is listed first so it is tried first when reading a report back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    Degraded(Degraded),
    Enriched(RepoStats),
}

/// Keys written by either [`Outcome`] variant.
const OUTCOME_KEYS: &[&str] = &[
    "error",
    "stars",
    "forks",
    "openIssues",
    "language",
    "description",
    "topics",
    "lastUpdated",
    "createdAt",
    "license",
    "watchers",
    "defaultBranch",
    "isArchived",
    "homepage",
    "contributorCount",
];

/// A project together with the outcome of its lookup, written flat.
///
/// Outcome keys win over same-named input keys, which are dropped from
/// `project.extra` when the record is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub project: ProjectRecord,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl<'de> Deserialize<'de> for EnrichedRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;

        let mut outcome = Map::new();
        for key in OUTCOME_KEYS {
            if let Some(value) = fields.remove(*key) {
                outcome.insert((*key).to_string(), value);
            }
        }

        let project =
            ProjectRecord::deserialize(Value::Object(fields)).map_err(D::Error::custom)?;
        let outcome =
            Outcome::deserialize(Value::Object(outcome)).map_err(D::Error::custom)?;
        Ok(Self { project, outcome })
    }
}

impl EnrichedRecord {
    /// Successful enrichment.
    pub fn enriched(project: ProjectRecord, stats: RepoStats) -> Self {
        Self::with_outcome(project, Outcome::Enriched(stats))
    }

    /// Degraded record carrying `error`.
    pub fn degraded(project: ProjectRecord, error: impl Into<String>) -> Self {
        Self::with_outcome(project, Outcome::Degraded(Degraded::new(error)))
    }

    fn with_outcome(mut project: ProjectRecord, outcome: Outcome) -> Self {
        project.extra.retain(|key, _| !OUTCOME_KEYS.contains(&key.as_str()));
        Self { project, outcome }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.outcome, Outcome::Degraded(_))
    }

    /// Live data, if the lookup succeeded.
    pub fn stats(&self) -> Option<&RepoStats> {
        match &self.outcome {
            Outcome::Enriched(stats) => Some(stats),
            Outcome::Degraded(_) => None,
        }
    }

    /// Failure message, if the lookup failed.
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Enriched(_) => None,
            Outcome::Degraded(d) => Some(&d.error),
        }
    }
}

// ---------------------------------------------------------------------------
// EnrichmentReport
// ---------------------------------------------------------------------------

/// The persisted output of an enrichment run (`processed-data.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentReport {
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Number of entries in `projects`.
    pub total_projects: usize,
    /// One entry per input project, in input order.
    pub projects: Vec<EnrichedRecord>,
}

impl EnrichmentReport {
    /// Wrap `projects` with the current time and their count.
    pub fn new(projects: Vec<EnrichedRecord>) -> Self {
        Self {
            generated_at: Utc::now(),
            total_projects: projects.len(),
            projects,
        }
    }
}
