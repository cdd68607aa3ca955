use super::{breakdown_rows, CompareRates, DailyRates};
use crate::benchmark;
use crate::config::Breakdown;
use crate::dates::working_days;
use crate::error::Result;
use crate::model::{CompareStats, RepoStats, TeamStats, SCHEMA_VERSION};
use crate::util::month_name;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub version: u32,
    pub author: String,
    pub repository: String,
    pub period: PeriodInfo,
    pub summary: SummaryStats,
    pub daily: DailyStats,
    pub benchmarks: Vec<BenchmarkResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub monthly: Vec<MonthlyJsonStats>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub weekly: Vec<BucketJsonStats>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub daily_breakdown: Vec<BucketJsonStats>,
}

#[derive(Debug, Serialize)]
pub struct PeriodInfo {
    pub since: String,
    pub until: String,
    pub working_days: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_working_days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_commit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_commit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub added: u64,
    pub deleted: u64,
    pub net: i64,
    pub commits: u32,
    pub files_changed: u32,
}

#[derive(Debug, Serialize)]
pub struct DailyStats {
    pub added: f64,
    pub deleted: f64,
    pub net: f64,
}

#[derive(Debug, Serialize)]
pub struct BenchmarkResult {
    pub label: String,
    pub benchmark_loc_per_day: u32,
    pub multiplier: f64,
}

#[derive(Debug, Serialize)]
pub struct MonthlyJsonStats {
    pub month: String,
    pub year: i32,
    pub added: u64,
    pub deleted: u64,
    pub net: i64,
    pub commits: u32,
}

#[derive(Debug, Serialize)]
pub struct BucketJsonStats {
    pub period: String,
    pub added: u64,
    pub deleted: u64,
    pub net: i64,
    pub commits: u32,
}

#[derive(Debug, Serialize)]
pub struct CompareJsonReport {
    pub version: u32,
    pub before: PeriodStats,
    pub after: PeriodStats,
    pub productivity_multiplier: f64,
    pub change_description: String,
}

#[derive(Debug, Serialize)]
pub struct PeriodStats {
    pub label: String,
    pub added: u64,
    pub deleted: u64,
    pub net: i64,
    pub commits: u32,
    pub working_days: i64,
    pub per_day: f64,
}

#[derive(Debug, Serialize)]
pub struct TeamJsonReport {
    pub version: u32,
    pub period: PeriodInfo,
    pub totals: TeamTotals,
    pub members: Vec<MemberStats>,
}

#[derive(Debug, Serialize)]
pub struct TeamTotals {
    pub added: u64,
    pub deleted: u64,
    pub net: i64,
    pub commits: u32,
    pub per_day: f64,
}

#[derive(Debug, Serialize)]
pub struct MemberStats {
    pub email: String,
    pub added: u64,
    pub deleted: u64,
    pub net: i64,
    pub commits: u32,
    pub per_day: f64,
}

const DAY: &str = "%Y-%m-%d";

pub fn render(stats: &RepoStats, breakdown: Option<Breakdown>) -> Result<String> {
    let rates = DailyRates::for_stats(stats);

    let mut report = JsonReport {
        version: SCHEMA_VERSION,
        author: stats.author.clone(),
        repository: stats.path.clone(),
        period: PeriodInfo {
            since: stats.since().format(DAY).to_string(),
            until: stats.until().format(DAY).to_string(),
            working_days: rates.working_days,
            active_working_days: Some(rates.active_working_days),
            first_commit: stats.first_commit.map(|d| d.format(DAY).to_string()),
            last_commit: stats.last_commit.map(|d| d.format(DAY).to_string()),
        },
        summary: SummaryStats {
            added: stats.added,
            deleted: stats.deleted,
            net: stats.net,
            commits: stats.commits,
            files_changed: stats.files_changed,
        },
        daily: DailyStats {
            added: rates.added,
            deleted: rates.deleted,
            net: rates.net,
        },
        benchmarks: benchmark::compare(rates.net)
            .into_iter()
            .map(|c| BenchmarkResult {
                label: c.label.to_string(),
                benchmark_loc_per_day: c.benchmark,
                multiplier: c.multiplier,
            })
            .collect(),
        monthly: Vec::new(),
        weekly: Vec::new(),
        daily_breakdown: Vec::new(),
    };

    match breakdown {
        Some(Breakdown::Monthly) => {
            report.monthly = stats
                .monthly
                .values()
                .map(|m| MonthlyJsonStats {
                    month: month_name(m.month).to_string(),
                    year: m.year,
                    added: m.added,
                    deleted: m.deleted,
                    net: m.net,
                    commits: m.commits,
                })
                .collect();
        }
        Some(b @ Breakdown::Weekly) => report.weekly = bucket_rows(stats, b),
        Some(b @ Breakdown::Daily) => report.daily_breakdown = bucket_rows(stats, b),
        None => {}
    }

    Ok(serde_json::to_string_pretty(&report)?)
}

fn bucket_rows(stats: &RepoStats, breakdown: Breakdown) -> Vec<BucketJsonStats> {
    breakdown_rows(stats, breakdown)
        .into_iter()
        .map(|row| BucketJsonStats {
            period: row.label,
            added: row.added,
            deleted: row.deleted,
            net: row.net,
            commits: row.commits,
        })
        .collect()
}

pub fn render_compare(comparison: &CompareStats) -> Result<String> {
    let rates = CompareRates::for_comparison(comparison);
    let period = |label: &str, stats: &RepoStats, days: i64, per_day: f64| PeriodStats {
        label: label.to_string(),
        added: stats.added,
        deleted: stats.deleted,
        net: stats.net,
        commits: stats.commits,
        working_days: days,
        per_day,
    };

    let report = CompareJsonReport {
        version: SCHEMA_VERSION,
        before: period(
            &comparison.before_label,
            &comparison.before,
            rates.before_days,
            rates.before_per_day,
        ),
        after: period(
            &comparison.after_label,
            &comparison.after,
            rates.after_days,
            rates.after_per_day,
        ),
        productivity_multiplier: rates.multiplier,
        change_description: format!("{:.1}x productivity change", rates.multiplier),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn render_team(team: &TeamStats) -> Result<String> {
    let days = working_days(team.range.since, team.range.until);
    let per_day = |net: i64| net as f64 / days as f64;

    let report = TeamJsonReport {
        version: SCHEMA_VERSION,
        period: PeriodInfo {
            since: team.range.since.format(DAY).to_string(),
            until: team.range.until.format(DAY).to_string(),
            working_days: days,
            active_working_days: None,
            first_commit: None,
            last_commit: None,
        },
        totals: TeamTotals {
            added: team.total_added,
            deleted: team.total_deleted,
            net: team.total_net,
            commits: team.total_commits,
            per_day: per_day(team.total_net),
        },
        members: team
            .ranked_members()
            .into_iter()
            .map(|(email, s)| MemberStats {
                email: email.to_string(),
                added: s.added,
                deleted: s.deleted,
                net: s.net,
                commits: s.commits,
                per_day: per_day(s.net),
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}
