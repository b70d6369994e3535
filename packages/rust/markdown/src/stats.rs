//! Aggregate statistics over an enrichment report.

use std::collections::HashMap;

use repolens_shared::{EnrichedRecord, NOT_AVAILABLE};

/// How many languages the summary lists.
const TOP_LANGUAGES: usize = 5;

/// Totals shown in the README summary block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportStats {
    /// Number of projects in the report.
    pub total: usize,
    /// Projects with live data.
    pub enriched: usize,
    /// Projects whose lookup failed.
    pub degraded: usize,
    /// Enriched projects whose repository is archived.
    pub archived: usize,
    pub total_stars: u64,
    pub total_forks: u64,
    pub total_open_issues: u64,
    /// `(language, project count)`, most used first, ties by name.
    pub top_languages: Vec<(String, usize)>,
}

impl ReportStats {
    /// Compute totals over `records`. Degraded records only count towards
    /// `total` and `degraded`.
    pub fn compute(records: &[EnrichedRecord]) -> Self {
        let mut stats = Self {
            total: records.len(),
            ..Self::default()
        };
        let mut languages: HashMap<&str, usize> = HashMap::new();

        for record in records {
            let Some(repo) = record.stats() else {
                stats.degraded += 1;
                continue;
            };

            stats.enriched += 1;
            stats.total_stars += repo.stars;
            stats.total_forks += repo.forks;
            stats.total_open_issues += repo.open_issues;
            if repo.is_archived {
                stats.archived += 1;
            }
            if repo.language != NOT_AVAILABLE {
                *languages.entry(repo.language.as_str()).or_default() += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = languages
            .into_iter()
            .map(|(lang, count)| (lang.to_string(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(TOP_LANGUAGES);
        stats.top_languages = ranked;

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{degraded, enriched};

    #[test]
    fn empty_report() {
        assert_eq!(ReportStats::compute(&[]), ReportStats::default());
    }

    #[test]
    fn degraded_records_are_not_summed() {
        let records = vec![
            enriched(1, "Rust", 10, false),
            degraded(2),
            enriched(3, "Go", 5, true),
        ];
        let stats = ReportStats::compute(&records);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.enriched, 2);
        assert_eq!(stats.degraded, 1);
        assert_eq!(stats.archived, 1);
        assert_eq!(stats.total_stars, 15);
        assert_eq!(stats.total_forks, 2);
        assert_eq!(stats.total_open_issues, 2);
    }

    #[test]
    fn languages_ranked_by_count_then_name() {
        let records = vec![
            enriched(1, "Rust", 1, false),
            enriched(2, "Go", 1, false),
            enriched(3, "Rust", 1, false),
            enriched(4, "C", 1, false),
            enriched(5, "N/A", 1, false),
        ];
        let stats = ReportStats::compute(&records);

        assert_eq!(
            stats.top_languages,
            vec![
                ("Rust".to_string(), 2),
                ("C".to_string(), 1),
                ("Go".to_string(), 1)
            ]
        );
    }
}
