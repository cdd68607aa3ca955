//! Self-contained HTML pages. Every interpolated string goes through
//! [`escape_html`]; numbers are formatted directly.

use super::{breakdown_rows, breakdown_title, change_emoji, CompareRates, DailyRates};
use crate::benchmark;
use crate::config::{Breakdown, Theme};
use crate::dates::working_days;
use crate::model::{CompareStats, RepoStats, TeamStats};
use crate::util::format_number;
use chrono::{DateTime, Utc};
use std::fmt::Write;

const DARK: &str = "--bg-primary: #0d1117; --bg-secondary: #161b22; --bg-tertiary: #21262d; \
--border: #30363d; --text-primary: #c9d1d9; --text-secondary: #8b949e; --text-muted: #484f58; \
--accent: #58a6ff; --success: #3fb950; --warning: #d29922;";

const LIGHT: &str = "--bg-primary: #ffffff; --bg-secondary: #f6f8fa; --bg-tertiary: #eaeef2; \
--border: #d0d7de; --text-primary: #1f2328; --text-secondary: #656d76; --text-muted: #8c959f; \
--accent: #0969da; --success: #1a7f37; --warning: #9a6700;";

const STYLE: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif; background: var(--bg-primary); color: var(--text-primary); line-height: 1.5; min-height: 100vh; }
.container { max-width: 900px; margin: 0 auto; padding: 32px 24px; }
header { margin-bottom: 32px; padding-bottom: 16px; border-bottom: 1px solid var(--border); }
.logo { font-size: 14px; font-weight: 600; color: var(--text-secondary); margin-bottom: 8px; font-family: ui-monospace, SFMono-Regular, Menlo, monospace; }
h1 { font-size: 24px; font-weight: 600; }
.period { font-size: 14px; color: var(--text-secondary); margin-top: 4px; }
.stats-grid { display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px; margin-bottom: 32px; }
@media (max-width: 640px) { .stats-grid { grid-template-columns: repeat(2, 1fr); } }
.stat-card { background: var(--bg-secondary); border: 1px solid var(--border); border-radius: 6px; padding: 16px; }
.stat-label { font-size: 12px; color: var(--text-secondary); text-transform: uppercase; letter-spacing: 0.5px; margin-bottom: 4px; }
.stat-value { font-size: 28px; font-weight: 600; font-family: ui-monospace, SFMono-Regular, Menlo, monospace; }
.stat-value.added { color: var(--success); }
.stat-value.deleted { color: var(--warning); }
.stat-value.net { color: var(--accent); }
.section { background: var(--bg-secondary); border: 1px solid var(--border); border-radius: 6px; padding: 20px; margin-bottom: 24px; }
.section-title { font-size: 14px; font-weight: 600; color: var(--text-secondary); margin-bottom: 16px; text-transform: uppercase; letter-spacing: 0.5px; }
.daily-stat { font-size: 32px; font-weight: 600; color: var(--accent); font-family: ui-monospace, SFMono-Regular, Menlo, monospace; }
.daily-label { color: var(--text-secondary); font-size: 14px; }
.benchmark-row { display: flex; align-items: center; padding: 12px 0; border-bottom: 1px solid var(--border); }
.benchmark-row:last-child { border-bottom: none; }
.benchmark-label { width: 140px; font-size: 14px; color: var(--text-secondary); }
.benchmark-value { width: 60px; font-size: 13px; color: var(--text-muted); font-family: ui-monospace, SFMono-Regular, Menlo, monospace; }
.benchmark-bar { flex: 1; height: 8px; background: var(--bg-tertiary); border-radius: 4px; overflow: hidden; margin: 0 12px; }
.benchmark-fill { height: 100%; background: linear-gradient(90deg, var(--accent), var(--success)); border-radius: 4px; }
.benchmark-multiplier { width: 60px; text-align: right; font-weight: 600; color: var(--accent); font-family: ui-monospace, SFMono-Regular, Menlo, monospace; }
.change { font-size: 32px; font-weight: 600; color: var(--success); }
.change.down { color: var(--warning); }
table { width: 100%; border-collapse: collapse; font-size: 14px; }
th { text-align: left; padding: 10px 12px; font-size: 12px; font-weight: 600; color: var(--text-secondary); text-transform: uppercase; letter-spacing: 0.5px; border-bottom: 1px solid var(--border); }
th:not(:first-child), td:not(:first-child) { text-align: right; }
td { padding: 10px 12px; border-bottom: 1px solid var(--border); font-family: ui-monospace, SFMono-Regular, Menlo, monospace; }
tr:hover { background: var(--bg-tertiary); }
.highlight td { color: var(--success); font-weight: 600; }
footer { text-align: center; padding: 24px; color: var(--text-muted); font-size: 12px; }
"#;

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, theme: Theme, body: &str) -> String {
    let vars = match theme {
        Theme::Dark => DARK,
        Theme::Light => LIGHT,
    };
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
<title>gitrespect - {}</title>\n<style>\n:root {{ {vars} }}\n{STYLE}</style>\n</head>\n<body>\n\
<div class=\"container\">\n{body}<footer>Generated by gitrespect</footer>\n</div>\n</body>\n</html>\n",
        escape_html(title)
    )
}

fn header(out: &mut String, logo: &str, title: &str, since: DateTime<Utc>, until: DateTime<Utc>) {
    let _ = writeln!(
        out,
        "<header>\n<div class=\"logo\">$ {}</div>\n<h1>{}</h1>\n<div class=\"period\">{} to {}</div>\n</header>",
        escape_html(logo),
        escape_html(title),
        since.format("%b %-d, %Y"),
        until.format("%b %-d, %Y")
    );
}

fn stat_cards(out: &mut String, prefix: &str, added: u64, deleted: u64, net: i64, commits: u32) {
    let _ = writeln!(out, "<div class=\"stats-grid\">");
    for (label, class, value) in [
        ("Added", " added", format!("+{}", format_number(added as i64))),
        ("Deleted", " deleted", format!("-{}", format_number(deleted as i64))),
        ("Net", " net", format_number(net)),
        ("Commits", "", commits.to_string()),
    ] {
        let _ = writeln!(
            out,
            "<div class=\"stat-card\"><div class=\"stat-label\">{prefix}{label}</div>\
<div class=\"stat-value{class}\">{value}</div></div>"
        );
    }
    let _ = writeln!(out, "</div>");
}

fn daily_section(out: &mut String, title: &str, per_day: f64, days: i64) {
    let _ = writeln!(
        out,
        "<div class=\"section\">\n<div class=\"section-title\">{title}</div>\n\
<div class=\"daily-stat\">{per_day:.0}</div>\n\
<div class=\"daily-label\">lines/day ({days} working days)</div>\n</div>"
    );
}

pub fn render(stats: &RepoStats, breakdown: Option<Breakdown>, theme: Theme) -> String {
    let rates = DailyRates::for_stats(stats);
    let author = if stats.author.is_empty() {
        "all authors"
    } else {
        stats.author.as_str()
    };
    let mut body = String::new();

    header(&mut body, "gitrespect", author, stats.since(), stats.until());
    stat_cards(&mut body, "", stats.added, stats.deleted, stats.net, stats.commits);
    daily_section(&mut body, "Daily Output", rates.net, rates.working_days);

    let _ = writeln!(
        body,
        "<div class=\"section\">\n<div class=\"section-title\">Industry Comparison</div>"
    );
    for c in benchmark::compare(rates.net) {
        let width = (c.multiplier * 10.0).clamp(0.0, 100.0) as u32;
        let _ = writeln!(
            body,
            "<div class=\"benchmark-row\"><div class=\"benchmark-label\">{}</div>\
<div class=\"benchmark-value\">{}/day</div>\
<div class=\"benchmark-bar\"><div class=\"benchmark-fill\" style=\"width: {width}%\"></div></div>\
<div class=\"benchmark-multiplier\">{:.1}x</div></div>",
            escape_html(c.label),
            c.benchmark,
            c.multiplier
        );
    }
    let _ = writeln!(body, "</div>");

    if let Some(breakdown) = breakdown {
        render_breakdown(&mut body, stats, breakdown);
    }

    page(author, theme, &body)
}

fn render_breakdown(out: &mut String, stats: &RepoStats, breakdown: Breakdown) {
    let rows = breakdown_rows(stats, breakdown);
    if rows.is_empty() {
        return;
    }
    // First row with the highest net.
    let best = rows
        .iter()
        .enumerate()
        .fold(0, |best, (i, row)| if row.net > rows[best].net { i } else { best });

    let _ = writeln!(
        out,
        "<div class=\"section\">\n<div class=\"section-title\">{}</div>\n<table>\n\
<thead><tr><th>Period</th><th>Added</th><th>Deleted</th><th>Net</th><th>Commits</th></tr></thead>\n<tbody>",
        breakdown_title(breakdown)
    );
    for (i, row) in rows.iter().enumerate() {
        let class = if i == best { " class=\"highlight\"" } else { "" };
        let _ = writeln!(
            out,
            "<tr{class}><td>{}</td><td>+{}</td><td>-{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&row.label),
            format_number(row.added as i64),
            format_number(row.deleted as i64),
            format_number(row.net),
            row.commits
        );
    }
    let _ = writeln!(out, "</tbody>\n</table>\n</div>");
}

pub fn render_compare(comparison: &CompareStats, theme: Theme) -> String {
    let rates = CompareRates::for_comparison(comparison);
    let mut body = String::new();

    let _ = writeln!(
        body,
        "<header>\n<div class=\"logo\">$ gitrespect compare</div>\n<h1>Period Comparison</h1>\n\
<div class=\"period\">{} vs {}</div>\n</header>",
        escape_html(&comparison.before_label),
        escape_html(&comparison.after_label)
    );

    let _ = writeln!(
        body,
        "<div class=\"section\">\n<div class=\"section-title\">Net Lines per Working Day</div>\n<table>\n\
<thead><tr><th>Period</th><th>Net Lines</th><th>Days</th><th>Per Day</th></tr></thead>\n<tbody>"
    );
    for (label, stats, days, per_day, class) in [
        (&comparison.before_label, &comparison.before, rates.before_days, rates.before_per_day, ""),
        (&comparison.after_label, &comparison.after, rates.after_days, rates.after_per_day, " class=\"highlight\""),
    ] {
        let _ = writeln!(
            body,
            "<tr{class}><td>{}</td><td>{}</td><td>{days}</td><td>{per_day:.0}</td></tr>",
            escape_html(label),
            format_number(stats.net)
        );
    }
    let _ = writeln!(body, "</tbody>\n</table>\n</div>");

    let (sign, class) = if rates.multiplier < 1.0 {
        ("", "change down")
    } else {
        ("+", "change")
    };
    let _ = writeln!(
        body,
        "<div class=\"section\">\n<div class=\"section-title\">Change</div>\n\
<div class=\"{class}\">{sign}{:.1}x productivity{}</div>\n</div>",
        rates.multiplier,
        change_emoji(rates.multiplier)
    );

    page("Period Comparison", theme, &body)
}

pub fn render_team(team: &TeamStats, theme: Theme) -> String {
    let days = working_days(team.range.since, team.range.until);
    let mut body = String::new();

    header(&mut body, "gitrespect --team", "Team Report", team.range.since, team.range.until);
    stat_cards(
        &mut body,
        "Team ",
        team.total_added,
        team.total_deleted,
        team.total_net,
        team.total_commits,
    );
    daily_section(&mut body, "Team Daily Output", team.total_net as f64 / days as f64, days);

    let _ = writeln!(
        body,
        "<div class=\"section\">\n<div class=\"section-title\">Team Members</div>\n<table>\n\
<thead><tr><th>Contributor</th><th>Added</th><th>Deleted</th><th>Net</th><th>Commits</th><th>/Day</th></tr></thead>\n<tbody>"
    );
    for (i, (email, stats)) in team.ranked_members().into_iter().enumerate() {
        let class = if i == 0 { " class=\"highlight\"" } else { "" };
        let _ = writeln!(
            body,
            "<tr{class}><td>{}</td><td>+{}</td><td>-{}</td><td>{}</td><td>{}</td><td>{:.0}</td></tr>",
            escape_html(email),
            format_number(stats.added as i64),
            format_number(stats.deleted as i64),
            format_number(stats.net),
            stats.commits,
            stats.net as f64 / days as f64
        );
    }
    let _ = writeln!(body, "</tbody>\n</table>\n</div>");

    page("Team Report", theme, &body)
}
