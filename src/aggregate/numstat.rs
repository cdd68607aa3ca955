use crate::error::Result;
use crate::exclude::ExcludeSet;
use crate::git::{LogQuery, LogSource, HEADER_SEPARATOR};
use crate::model::{DateRange, MonthStats, RepoStats};
use crate::util::{day_key, month_key, week_key};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use std::path::Path;

/// Runs the log query for one repository and author and aggregates its output.
pub fn analyze<S: LogSource + ?Sized>(
    source: &S,
    repo_path: &Path,
    author: &str,
    range: &DateRange,
    excludes: &ExcludeSet,
) -> Result<RepoStats> {
    let query = LogQuery {
        repo: repo_path,
        author,
        range,
    };
    let output = source.numstat_log(&query)?;

    let stats = RepoStats::new(repo_path.to_string_lossy(), author, *range);
    Ok(parse_log(&output, stats, excludes))
}

/// Aggregates `git log --numstat` text into `stats`.
pub fn parse_log(output: &str, stats: RepoStats, excludes: &ExcludeSet) -> RepoStats {
    let mut parser = NumstatParser::new(stats, excludes);
    for line in output.lines() {
        parser.feed_line(line);
    }
    parser.finish()
}

struct Bucket {
    year: i32,
    month: u32,
    month_key: String,
    /// Week and day keys; absent when only the month is known.
    week_and_day: Option<(String, String)>,
}

impl Bucket {
    fn for_date(date: &DateTime<Utc>) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            month_key: month_key(date),
            week_and_day: Some((week_key(date), day_key(date))),
        }
    }

    /// Month-only bucket from a `YYYY-MM` prefix of an otherwise unreadable date.
    fn for_month_prefix(raw: &str) -> Option<Self> {
        let prefix = raw.get(..7)?;
        let first = NaiveDate::parse_from_str(&format!("{prefix}-01"), "%Y-%m-%d").ok()?;
        Some(Self {
            year: first.year(),
            month: first.month(),
            month_key: prefix.to_string(),
            week_and_day: None,
        })
    }
}

/// Line-oriented accumulator over `git log --numstat` output.
pub struct NumstatParser<'a> {
    stats: RepoStats,
    excludes: &'a ExcludeSet,
    current: Option<Bucket>,
}

impl<'a> NumstatParser<'a> {
    pub fn new(stats: RepoStats, excludes: &'a ExcludeSet) -> Self {
        Self {
            stats,
            excludes,
            current: None,
        }
    }

    pub fn feed_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        if !is_numstat_triple(line) && line.contains(HEADER_SEPARATOR) {
            self.commit_header(line);
            return;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() >= 3 {
            self.numstat_entry(&fields);
        }
    }

    pub fn finish(mut self) -> RepoStats {
        self.stats.recompute_net();
        self.stats
    }

    fn commit_header(&mut self, line: &str) {
        let mut parts = line.split(HEADER_SEPARATOR);
        let (Some(_hash), Some(date)) = (parts.next(), parts.next()) else {
            return;
        };

        self.stats.commits += 1;

        match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
            Ok(day) => {
                let date = Utc.from_utc_datetime(&day.and_time(chrono::NaiveTime::MIN));
                self.stats.observe_commit(date);
                self.current = Some(Bucket::for_date(&date));
            }
            Err(e) => {
                log::debug!("unparseable commit date {date:?}: {e}");
                self.current = Bucket::for_month_prefix(date.trim());
            }
        }
    }

    fn numstat_entry(&mut self, fields: &[&str]) {
        if fields[0] == "-" || fields[1] == "-" {
            return;
        }

        let filename = fields[2..].join(" ");
        if self.excludes.is_excluded(&filename) {
            return;
        }

        let (Ok(added), Ok(deleted)) = (fields[0].parse::<u64>(), fields[1].parse::<u64>()) else {
            log::trace!("ignoring malformed numstat line for {filename}");
            return;
        };

        self.stats.added += added;
        self.stats.deleted += deleted;
        self.stats.files_changed += 1;

        if let Some(bucket) = &self.current {
            self.stats
                .monthly
                .entry(bucket.month_key.clone())
                .or_insert_with(|| MonthStats::new(bucket.year, bucket.month))
                .add_lines(added, deleted);
            if let Some((week, day)) = &bucket.week_and_day {
                self.stats
                    .weekly
                    .entry(week.clone())
                    .or_default()
                    .add_lines(added, deleted);
                self.stats
                    .daily
                    .entry(day.clone())
                    .or_default()
                    .add_lines(added, deleted);
            }
        }
    }
}

/// `added<TAB>deleted<TAB>path`, where the counts are digits or `-`.
fn is_numstat_triple(line: &str) -> bool {
    let mut parts = line.splitn(3, '\t');
    let is_count = |s: &str| s == "-" || (!s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()));
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(a), Some(d), Some(path)) if is_count(a) && is_count(d) && !path.is_empty()
    )
}
