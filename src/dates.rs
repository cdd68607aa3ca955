//! Parsing of `--since`/`--until`/`--year` values and `YYYY-MM:YYYY-MM` periods,
//! plus the working-day approximation used for per-day rates.

use crate::error::{GitrespectError, Result};
use crate::model::{DateRange, RepoStats};
use chrono::{DateTime, Duration, Months, NaiveDate, TimeZone, Utc};

/// Parses an absolute (`YYYY-MM-DD`, `YYYY-MM`, `YYYY`) or relative
/// (`30 days ago`, `2 weeks`, `1 year ago`) date relative to now.
pub fn parse_date(input: &str) -> Result<DateTime<Utc>> {
    parse_date_at(input, Utc::now())
}

pub fn parse_date_at(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Some(date) = parse_absolute(input) {
        return Ok(start_of_day(date));
    }

    if let Some(dt) = parse_relative(input, now)? {
        return Ok(dt);
    }

    Err(GitrespectError::InvalidDate(format!("could not parse date: {input}")))
}

/// Parses `YYYY-MM:YYYY-MM` into a range from the first instant of the first
/// month to the last second of the second month.
pub fn parse_period(input: &str) -> Result<DateRange> {
    let parts: Vec<&str> = input.split(':').collect();
    let [start, end] = parts.as_slice() else {
        return Err(GitrespectError::InvalidInput(format!(
            "invalid period '{input}', expected YYYY-MM:YYYY-MM"
        )));
    };

    let start = parse_year_month(start)
        .ok_or_else(|| GitrespectError::InvalidInput(format!("invalid start month '{start}'")))?;
    let end = parse_year_month(end)
        .ok_or_else(|| GitrespectError::InvalidInput(format!("invalid end month '{end}'")))?;

    let until = start_of_day(end)
        .checked_add_months(Months::new(1))
        .map(|next| next - Duration::seconds(1))
        .ok_or_else(|| GitrespectError::InvalidInput(format!("period end out of range: {input}")))?;

    Ok(DateRange::new(start_of_day(start), until))
}

/// The whole calendar year, with the end clamped to `now`.
pub fn year_range(year: i32, now: DateTime<Utc>) -> Result<DateRange> {
    let since = Utc
        .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| GitrespectError::InvalidInput(format!("invalid year: {year}")))?;
    let until = Utc
        .with_ymd_and_hms(year, 12, 31, 23, 59, 59)
        .single()
        .ok_or_else(|| GitrespectError::InvalidInput(format!("invalid year: {year}")))?;

    Ok(DateRange::new(since, until.min(now)))
}

/// Approximate business days in a span: 5/7 of the elapsed whole days, at least 1.
pub fn working_days(since: DateTime<Utc>, until: DateTime<Utc>) -> i64 {
    let days = (until - since).num_hours() / 24;
    ((days * 5) / 7).max(1)
}

/// Working days between the first and last observed commit, falling back to
/// the requested range when nothing was committed.
pub fn active_working_days(stats: &RepoStats) -> i64 {
    match (stats.first_commit, stats.last_commit) {
        (Some(first), Some(last)) => working_days(first, last),
        _ => working_days(stats.since(), stats.until()),
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_absolute(input: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split('-').collect();
    match parts.as_slice() {
        [y] if is_digits(y, 4) => NaiveDate::from_ymd_opt(y.parse().ok()?, 1, 1),
        [y, m] if is_digits(y, 4) && is_digits(m, 2) => {
            NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, 1)
        }
        [y, m, d] if is_digits(y, 4) && is_digits(m, 2) && is_digits(d, 2) => {
            NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, d.parse().ok()?)
        }
        _ => None,
    }
}

fn parse_year_month(input: &str) -> Option<NaiveDate> {
    match input.split_once('-') {
        Some((y, m)) if is_digits(y, 4) && is_digits(m, 2) => {
            NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, 1)
        }
        _ => None,
    }
}

fn parse_relative(input: &str, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>> {
    let lowered = input.to_lowercase();
    let parts: Vec<&str> = lowered.split_whitespace().collect();

    let (amount, unit) = match parts.as_slice() {
        [n, unit] | [n, unit, "ago"] => (*n, *unit),
        _ => return Ok(None),
    };

    let Ok(n) = amount.parse::<u32>() else {
        return Ok(None);
    };

    let overflow = || GitrespectError::InvalidDate(format!("date out of range: {input}"));

    let target = match unit {
        "day" | "days" => now.checked_sub_signed(Duration::days(i64::from(n))),
        "week" | "weeks" => now.checked_sub_signed(Duration::days(i64::from(n) * 7)),
        "month" | "months" => now.checked_sub_months(Months::new(n)),
        "year" | "years" => n
            .checked_mul(12)
            .and_then(|months| now.checked_sub_months(Months::new(months))),
        _ => return Ok(None),
    };

    target.map(Some).ok_or_else(overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn absolute_forms() {
        let now = at(2026, 6, 15, 10, 0, 0);
        assert_eq!(parse_date_at("2025-03-14", now).unwrap(), at(2025, 3, 14, 0, 0, 0));
        assert_eq!(parse_date_at("2025-03", now).unwrap(), at(2025, 3, 1, 0, 0, 0));
        assert_eq!(parse_date_at("2024", now).unwrap(), at(2024, 1, 1, 0, 0, 0));
    }

    #[test]
    fn relative_weeks_are_exact_days() {
        let now = at(2026, 6, 15, 10, 30, 0);
        assert_eq!(parse_date_at("2 weeks ago", now).unwrap(), now - Duration::days(14));
        assert_eq!(parse_date_at("30 Days Ago", now).unwrap(), now - Duration::days(30));
        assert_eq!(parse_date_at("1 day", now).unwrap(), now - Duration::days(1));
    }

    #[test]
    fn relative_months_and_years_are_calendar_based() {
        let now = at(2026, 3, 31, 8, 0, 0);
        assert_eq!(parse_date_at("1 month ago", now).unwrap(), at(2026, 2, 28, 8, 0, 0));
        assert_eq!(parse_date_at("2 years", now).unwrap(), at(2024, 3, 31, 8, 0, 0));
    }

    #[test]
    fn rejects_garbage() {
        let now = at(2026, 1, 1, 0, 0, 0);
        for input in ["", "yesterday", "-3 days ago", "3 fortnights ago", "2025/01/01", "25-01", "2025-1"] {
            assert!(parse_date_at(input, now).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn period_covers_whole_months() {
        let range = parse_period("2025-01:2025-07").unwrap();
        assert_eq!(range.since, at(2025, 1, 1, 0, 0, 0));
        assert_eq!(range.until, at(2025, 7, 31, 23, 59, 59));
    }

    #[test]
    fn period_end_handles_december_and_february() {
        assert_eq!(parse_period("2024-02:2024-02").unwrap().until, at(2024, 2, 29, 23, 59, 59));
        assert_eq!(parse_period("2024-06:2024-12").unwrap().until, at(2024, 12, 31, 23, 59, 59));
    }

    #[test]
    fn period_rejects_malformed() {
        for input in ["2025-01", "2025-01:2025-02:2025-03", "2025-01:", "2025-13:2025-14", "2025-01-01:2025-02"] {
            assert!(parse_period(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn year_range_clamps_to_now() {
        let now = at(2026, 5, 1, 12, 0, 0);
        let range = year_range(2026, now).unwrap();
        assert_eq!(range.since, at(2026, 1, 1, 0, 0, 0));
        assert_eq!(range.until, now);

        let past = year_range(2024, now).unwrap();
        assert_eq!(past.until, at(2024, 12, 31, 23, 59, 59));
    }

    #[test]
    fn working_days_approximation() {
        assert_eq!(working_days(at(2025, 1, 1, 0, 0, 0), at(2025, 1, 1, 0, 0, 0)), 1);
        assert_eq!(working_days(at(2025, 1, 1, 0, 0, 0), at(2025, 1, 15, 0, 0, 0)), 10);
        assert_eq!(working_days(at(2025, 1, 1, 0, 0, 0), at(2025, 1, 31, 0, 0, 0)), 21);
    }

    #[test]
    fn active_working_days_prefers_observed_span() {
        let range = DateRange::new(at(2025, 1, 1, 0, 0, 0), at(2025, 12, 31, 0, 0, 0));
        let mut stats = RepoStats::new("repo", "me", range);
        assert_eq!(active_working_days(&stats), working_days(range.since, range.until));

        stats.observe_commit(at(2025, 3, 1, 0, 0, 0));
        stats.observe_commit(at(2025, 3, 15, 0, 0, 0));
        assert_eq!(active_working_days(&stats), 10);
    }
}
