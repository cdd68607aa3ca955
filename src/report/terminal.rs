use super::{breakdown_rows, breakdown_title, change_emoji, CompareRates, DailyRates};
use crate::benchmark;
use crate::config::Breakdown;
use crate::model::{CompareStats, RepoStats, TeamStats};
use crate::util::format_number;
use console::style;
use std::fmt::Write;
use std::path::Path;

const RULE: &str = "─";

pub fn render(stats: &RepoStats, breakdown: Option<Breakdown>) -> String {
    let rates = DailyRates::for_stats(stats);
    let mut out = String::new();

    let repo_name = if stats.path.ends_with("repositories") {
        stats.path.clone()
    } else {
        Path::new(&stats.path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| stats.path.clone())
    };
    let date_range = format!(
        "{} to {}",
        stats.since().format("%b %-d %Y"),
        stats.until().format("%b %-d %Y")
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "{} - {}", style(" gitrespect").bold().cyan(), display_author(&stats.author));
    let _ = writeln!(out, "{}", style(format!("{repo_name} ({date_range})")).dim());
    let _ = writeln!(out, "{}", RULE.repeat(50));
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "  {:<11} {:<11} {:<11} {}",
        style("Added").dim(),
        style("Deleted").dim(),
        style("Net").dim(),
        style("Commits").dim()
    );
    let _ = writeln!(out, "  {}", RULE.repeat(44));
    let _ = writeln!(
        out,
        "  {:<11} {:<11} {:<11} {:<8}",
        style(format_number(stats.added as i64)).green(),
        format_number(stats.deleted as i64),
        style(format_number(stats.net)).cyan(),
        stats.commits
    );
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "  {} {:.0} lines/day ({} working days)",
        style("Daily avg:").dim(),
        rates.net,
        rates.working_days
    );
    if rates.active_working_days != rates.working_days && stats.first_commit.is_some() {
        let _ = writeln!(
            out,
            "  {} {} working days between first and last commit",
            style("Active span:").dim(),
            rates.active_working_days
        );
    }
    let _ = writeln!(out);

    let comparisons = benchmark::compare(rates.net);
    let _ = writeln!(out, "  {}", style("vs Industry:").dim());
    for (i, c) in comparisons.iter().enumerate() {
        let prefix = if i == comparisons.len() - 1 { "└──" } else { "├──" };
        let _ = writeln!(
            out,
            "  {} {} ({}/day): {} {}",
            prefix,
            c.label,
            c.benchmark,
            style(format!("{:.1}x", c.multiplier)).yellow(),
            render_bar(c.multiplier, 20)
        );
    }
    let _ = writeln!(out);

    if let Some(breakdown) = breakdown {
        render_breakdown(&mut out, stats, breakdown);
    }

    out
}

fn render_breakdown(out: &mut String, stats: &RepoStats, breakdown: Breakdown) {
    let rows = breakdown_rows(stats, breakdown);
    if rows.is_empty() {
        return;
    }

    let _ = writeln!(out, "  {}", style(format!("{}:", breakdown_title(breakdown))).dim());
    let _ = writeln!(out, "  {}", RULE.repeat(44));
    let _ = writeln!(
        out,
        "  {:<11} {:<9} {:<9} {}",
        style("Period").dim(),
        style("Added").dim(),
        style("Deleted").dim(),
        style("Net").dim()
    );
    let _ = writeln!(out, "  {}", RULE.repeat(44));

    for row in rows {
        let net = format!("{:<9}", format_number(row.net));
        let net = if row.net < 0 { style(net).yellow() } else { style(net).cyan() };
        let _ = writeln!(
            out,
            "  {:<11} {:<9} {:<9} {}",
            row.label,
            format_number(row.added as i64),
            format_number(row.deleted as i64),
            net
        );
    }
    let _ = writeln!(out);
}

pub fn render_compare(comparison: &CompareStats) -> String {
    let rates = CompareRates::for_comparison(comparison);
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "{} - Period Comparison", style(" gitrespect").bold().cyan());
    let _ = writeln!(out, "{}", RULE.repeat(50));
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "  {:<16} {:<11} {:<7} {}",
        style("Period").dim(),
        style("Net Lines").dim(),
        style("Days").dim(),
        style("Per Day").dim()
    );
    let _ = writeln!(out, "  {}", RULE.repeat(44));
    let _ = writeln!(
        out,
        "  {:<16} {:<11} {:<7} {}",
        comparison.before_label,
        style(format_number(comparison.before.net)).dim(),
        rates.before_days,
        style(format!("{:.0}", rates.before_per_day)).dim()
    );
    let _ = writeln!(
        out,
        "  {:<16} {:<11} {:<7} {}",
        comparison.after_label,
        style(format_number(comparison.after.net)).cyan(),
        rates.after_days,
        style(format!("{:.0}", rates.after_per_day)).cyan()
    );
    let _ = writeln!(out);

    let change = format!(
        "{}{:.1}x productivity{}",
        if rates.multiplier < 1.0 { "" } else { "+" },
        rates.multiplier,
        change_emoji(rates.multiplier)
    );
    let change = if rates.multiplier < 1.0 {
        style(change).yellow()
    } else {
        style(change).green()
    };
    let _ = writeln!(out, "  {} {}", style("Change:").dim(), change);
    let _ = writeln!(out);

    out
}

pub fn render_team(team: &TeamStats) -> String {
    let days = crate::dates::working_days(team.range.since, team.range.until);
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "{} - Team Report", style(" gitrespect").bold().cyan());
    let _ = writeln!(
        out,
        "{}",
        style(format!(
            "{} members ({} to {})",
            team.members.len(),
            team.range.since.format("%b %-d %Y"),
            team.range.until.format("%b %-d %Y")
        ))
        .dim()
    );
    let _ = writeln!(out, "{}", RULE.repeat(50));
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "  {} {} added, {} deleted, {} net, {} commits",
        style("Team:").dim(),
        style(format_number(team.total_added as i64)).green(),
        format_number(team.total_deleted as i64),
        style(format_number(team.total_net)).cyan(),
        team.total_commits
    );
    let _ = writeln!(
        out,
        "  {} {:.0} lines/day ({} working days)",
        style("Daily avg:").dim(),
        team.total_net as f64 / days as f64,
        days
    );
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "  {:<32} {:>9} {:>9} {:>9} {:>7} {:>6}",
        style("Contributor").dim(),
        style("Added").dim(),
        style("Deleted").dim(),
        style("Net").dim(),
        style("Commits").dim(),
        style("/Day").dim()
    );
    let _ = writeln!(out, "  {}", RULE.repeat(78));
    for (i, (author, stats)) in team.ranked_members().into_iter().enumerate() {
        let name = format!("{author:<32}");
        let name = if i == 0 { style(name).green().bold() } else { style(name) };
        let _ = writeln!(
            out,
            "  {} {:>9} {:>9} {:>9} {:>7} {:>6.0}",
            name,
            format_number(stats.added as i64),
            format_number(stats.deleted as i64),
            format_number(stats.net),
            stats.commits,
            stats.net as f64 / days as f64
        );
    }
    let _ = writeln!(out);

    out
}

fn display_author(author: &str) -> &str {
    if author.is_empty() {
        "all authors"
    } else {
        author
    }
}

/// Bar scaled so that 10x fills the whole width.
fn render_bar(value: f64, width: usize) -> String {
    let filled = ((value * width as f64 / 10.0) as i64).clamp(0, width as i64) as usize;
    format!(
        "{}{}",
        style("█".repeat(filled)).cyan(),
        style("░".repeat(width - filled)).dim()
    )
}
