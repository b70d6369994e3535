//! Markdown tables and the summary block.

use std::fmt::Write as _;

use repolens_shared::{EnrichedRecord, EnrichmentReport, ProjectRecord};

use crate::stats::ReportStats;

const REPORT_HEADER: &str = "| ID | Project | Description | Language | Stars | Forks | Last Updated |\n\
                             | ---: | --- | --- | --- | ---: | ---: | --- |\n";

const PLAIN_HEADER: &str = "| ID | Name | Link |\n| --- | --- | --- |\n";

/// One row per record, in report order.
pub fn render_table(records: &[EnrichedRecord]) -> String {
    let mut out = String::from(REPORT_HEADER);

    for record in records {
        let project = &record.project;
        let name = format!("[{}]({})", escape_cell(&project.name), escape_link(&project.link));

        match record.stats() {
            Some(repo) => {
                let archived = if repo.is_archived { " *(archived)*" } else { "" };
                let _ = writeln!(
                    out,
                    "| {} | {name}{archived} | {} | {} | {} | {} | {} |",
                    project.id,
                    escape_cell(&repo.description),
                    escape_cell(&repo.language),
                    format_count(repo.stars),
                    format_count(repo.forks),
                    repo.last_updated,
                );
            }
            None => {
                let _ = writeln!(out, "| {} | {name} | Unavailable | N/A | - | - | - |", project.id);
            }
        }
    }

    out
}

/// `| ID | Name | Link |` table for a raw project list.
pub fn render_plain_table(projects: &[ProjectRecord]) -> String {
    let mut out = String::from(PLAIN_HEADER);
    for project in projects {
        let _ = writeln!(
            out,
            "| {} | **{}** | [View Repo]({}) |",
            project.id,
            escape_cell(&project.name),
            escape_link(&project.link)
        );
    }
    out
}

/// Totals, top languages and the generation time.
pub fn render_summary(report: &EnrichmentReport, stats: &ReportStats) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Projects: **{}** · Stars: **{}** · Forks: **{}** · Open issues: **{}**",
        stats.total,
        format_count(stats.total_stars),
        format_count(stats.total_forks),
        format_count(stats.total_open_issues),
    );

    if !stats.top_languages.is_empty() {
        let languages: Vec<String> = stats
            .top_languages
            .iter()
            .map(|(lang, count)| format!("{} ({count})", escape_cell(lang)))
            .collect();
        let _ = writeln!(out, "\nTop languages: {}", languages.join(", "));
    }

    if stats.archived > 0 {
        let _ = writeln!(out, "\n{} archived", stats.archived);
    }

    if stats.degraded > 0 {
        let _ = writeln!(
            out,
            "\n{} of {} projects could not be fetched",
            stats.degraded, stats.total
        );
    }

    let _ = writeln!(
        out,
        "\n_Last generated: {}_",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );

    out
}

/// Make text safe inside a table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
        .replace("\r\n", " ")
        .replace('\n', " ")
        .trim()
        .to_string()
}

/// Percent-encode the characters that end a link target or a table cell.
fn escape_link(link: &str) -> String {
    let mut out = String::with_capacity(link.len());
    for ch in link.trim().chars() {
        match ch {
            ' ' => out.push_str("%20"),
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            '|' => out.push_str("%7C"),
            '\r' | '\n' => {}
            _ => out.push(ch),
        }
    }
    out
}

/// `1234567` → `1,234,567`.
fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
