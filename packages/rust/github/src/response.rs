//! Partial `/repos/{owner}/{repo}` payload and its default-substitution rules.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use repolens_shared::{DEFAULT_BRANCH, NO_DESCRIPTION, NO_LICENSE, NOT_AVAILABLE, RepoStats};

/// The subset of the repository payload repolens reads.
///
/// Every field is optional: the API omits or nulls several of them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepoResponse {
    pub stargazers_count: Option<u64>,
    pub forks_count: Option<u64>,
    pub open_issues_count: Option<u64>,
    pub language: Option<String>,
    pub description: Option<String>,
    pub topics: Option<Vec<String>>,
    pub updated_at: Option<String>,
    pub created_at: Option<String>,
    pub license: Option<LicenseInfo>,
    pub watchers_count: Option<u64>,
    pub default_branch: Option<String>,
    pub archived: Option<bool>,
    pub homepage: Option<String>,
}

/// `license` object of the payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LicenseInfo {
    pub name: Option<String>,
}

impl RepoResponse {
    /// Fill every gap with its default and attach the contributor count.
    ///
    /// Empty strings count as missing.
    pub fn into_stats(self, contributor_count: u64) -> RepoStats {
        RepoStats {
            stars: self.stargazers_count.unwrap_or(0),
            forks: self.forks_count.unwrap_or(0),
            open_issues: self.open_issues_count.unwrap_or(0),
            language: text_or(self.language, NOT_AVAILABLE),
            description: text_or(self.description, NO_DESCRIPTION),
            topics: self.topics.unwrap_or_default(),
            last_updated: date_part(self.updated_at.as_deref()),
            created_at: date_part(self.created_at.as_deref()),
            license: text_or(self.license.and_then(|l| l.name), NO_LICENSE),
            watchers: self.watchers_count.unwrap_or(0),
            default_branch: text_or(self.default_branch, DEFAULT_BRANCH),
            is_archived: self.archived.unwrap_or(false),
            homepage: text_or(self.homepage, ""),
            contributor_count,
        }
    }
}

fn text_or(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// `YYYY-MM-DD` (UTC) of an RFC 3339 timestamp, or `N/A`.
fn date_part(timestamp: Option<&str>) -> String {
    timestamp
        .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
        .map(|dt| dt.with_timezone(&Utc).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
