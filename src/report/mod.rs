pub mod html;
pub mod json;
pub mod terminal;

use crate::config::{Breakdown, OutputConfig, OutputFormat};
use crate::dates::{active_working_days, working_days};
use crate::error::Result;
use crate::model::{CompareStats, RepoStats, TeamStats};
use crate::util::month_name;
use std::path::Path;

pub enum Report<'a> {
    Summary {
        stats: &'a RepoStats,
        breakdown: Option<Breakdown>,
    },
    Compare(&'a CompareStats),
    Team(&'a TeamStats),
}

impl Report<'_> {
    /// File written when an HTML report is requested without `--file`.
    fn default_html_file(&self) -> &'static str {
        match self {
            Report::Summary { .. } => "gitrespect-report.html",
            Report::Compare(_) => "gitrespect-compare.html",
            Report::Team(_) => "gitrespect-team.html",
        }
    }
}

pub fn render(report: &Report<'_>, output: &OutputConfig) -> Result<String> {
    let content = match (output.format, report) {
        (OutputFormat::Terminal, Report::Summary { stats, breakdown }) => {
            terminal::render(stats, *breakdown)
        }
        (OutputFormat::Terminal, Report::Compare(c)) => terminal::render_compare(c),
        (OutputFormat::Terminal, Report::Team(t)) => terminal::render_team(t),
        (OutputFormat::Json, Report::Summary { stats, breakdown }) => json::render(stats, *breakdown)?,
        (OutputFormat::Json, Report::Compare(c)) => json::render_compare(c)?,
        (OutputFormat::Json, Report::Team(t)) => json::render_team(t)?,
        (OutputFormat::Html, Report::Summary { stats, breakdown }) => {
            html::render(stats, *breakdown, output.theme)
        }
        (OutputFormat::Html, Report::Compare(c)) => html::render_compare(c, output.theme),
        (OutputFormat::Html, Report::Team(t)) => html::render_team(t, output.theme),
    };
    Ok(content)
}

/// Renders `report` and writes it to the configured destination.
pub fn deliver(report: &Report<'_>, output: &OutputConfig) -> Result<()> {
    let content = render(report, output)?;
    let file = match (output.format, &output.file) {
        (_, Some(file)) => Some(file.as_path()),
        (OutputFormat::Html, None) => Some(Path::new(report.default_html_file())),
        _ => None,
    };

    match (output.format, file) {
        (OutputFormat::Terminal, Some(file)) => {
            write_output(&console::strip_ansi_codes(&content), Some(file))
        }
        (_, file) => write_output(&content, file),
    }
}

pub fn write_output(content: &str, file: Option<&Path>) -> Result<()> {
    match file {
        Some(path) => {
            std::fs::write(path, content)?;
            println!("✓ Report saved to {}", path.display());
        }
        None => {
            print!("{content}");
            if !content.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

/// Per-working-day rates over the requested range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyRates {
    pub working_days: i64,
    pub active_working_days: i64,
    pub added: f64,
    pub deleted: f64,
    pub net: f64,
}

impl DailyRates {
    pub fn for_stats(stats: &RepoStats) -> Self {
        let days = working_days(stats.since(), stats.until());
        let per_day = |n: f64| n / days as f64;
        Self {
            working_days: days,
            active_working_days: active_working_days(stats),
            added: per_day(stats.added as f64),
            deleted: per_day(stats.deleted as f64),
            net: per_day(stats.net as f64),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    pub label: String,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub added: u64,
    pub deleted: u64,
    pub net: i64,
    pub commits: u32,
}

/// Rows of the requested breakdown, oldest first.
pub fn breakdown_rows(stats: &RepoStats, breakdown: Breakdown) -> Vec<BreakdownRow> {
    match breakdown {
        Breakdown::Monthly => stats
            .monthly
            .values()
            .map(|m| BreakdownRow {
                label: format!("{} {}", month_name(m.month), m.year),
                year: Some(m.year),
                month: Some(m.month),
                added: m.added,
                deleted: m.deleted,
                net: m.net,
                commits: m.commits,
            })
            .collect(),
        Breakdown::Weekly | Breakdown::Daily => {
            let buckets = if breakdown == Breakdown::Weekly {
                &stats.weekly
            } else {
                &stats.daily
            };
            buckets
                .iter()
                .map(|(key, b)| BreakdownRow {
                    label: key.clone(),
                    year: None,
                    month: None,
                    added: b.added,
                    deleted: b.deleted,
                    net: b.net,
                    commits: b.commits,
                })
                .collect()
        }
    }
}

pub fn breakdown_title(breakdown: Breakdown) -> &'static str {
    match breakdown {
        Breakdown::Monthly => "Monthly Breakdown",
        Breakdown::Weekly => "Weekly Breakdown",
        Breakdown::Daily => "Daily Breakdown",
    }
}

/// Rendered next to the change multiplier.
pub fn change_emoji(multiplier: f64) -> &'static str {
    if multiplier >= 5.0 {
        " 🚀"
    } else if multiplier >= 2.0 {
        " 📈"
    } else if multiplier >= 1.0 {
        ""
    } else {
        " 📉"
    }
}

/// Per-day rates for both sides of a comparison and their ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareRates {
    pub before_days: i64,
    pub after_days: i64,
    pub before_per_day: f64,
    pub after_per_day: f64,
    pub multiplier: f64,
}

impl CompareRates {
    pub fn for_comparison(comparison: &CompareStats) -> Self {
        let before = DailyRates::for_stats(&comparison.before);
        let after = DailyRates::for_stats(&comparison.after);
        Self {
            before_days: before.working_days,
            after_days: after.working_days,
            before_per_day: before.net,
            after_per_day: after.net,
            multiplier: crate::benchmark::calculate_multiplier(before.net, after.net),
        }
    }
}
