use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl DateRange {
    pub fn new(since: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        Self { since, until }
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH, DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// Lines and file-change count for one calendar month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthStats {
    pub year: i32,
    pub month: u32,
    pub added: u64,
    pub deleted: u64,
    pub net: i64,
    pub commits: u32,
}

impl MonthStats {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            ..Self::default()
        }
    }

    pub fn add_lines(&mut self, added: u64, deleted: u64) {
        self.added += added;
        self.deleted += deleted;
        self.net = self.added as i64 - self.deleted as i64;
        self.commits += 1;
    }

    pub fn merge(&mut self, other: &MonthStats) {
        self.added += other.added;
        self.deleted += other.deleted;
        self.net = self.added as i64 - self.deleted as i64;
        self.commits += other.commits;
        self.year = other.year;
        self.month = other.month;
    }
}

/// Lines and file-change count for one ISO week or one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketStats {
    pub added: u64,
    pub deleted: u64,
    pub net: i64,
    pub commits: u32,
}

impl BucketStats {
    pub fn add_lines(&mut self, added: u64, deleted: u64) {
        self.added += added;
        self.deleted += deleted;
        self.net = self.added as i64 - self.deleted as i64;
        self.commits += 1;
    }

    pub fn merge(&mut self, other: &BucketStats) {
        self.added += other.added;
        self.deleted += other.deleted;
        self.net = self.added as i64 - self.deleted as i64;
        self.commits += other.commits;
    }
}

/// Statistics of one repository, or one combined group, over a date range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStats {
    pub path: String,
    pub author: String,
    pub range: DateRange,
    /// Earliest commit date actually seen in the filtered log.
    pub first_commit: Option<DateTime<Utc>>,
    /// Latest commit date actually seen in the filtered log.
    pub last_commit: Option<DateTime<Utc>>,
    pub added: u64,
    pub deleted: u64,
    pub net: i64,
    pub commits: u32,
    pub files_changed: u32,
    pub monthly: BTreeMap<String, MonthStats>,
    pub weekly: BTreeMap<String, BucketStats>,
    pub daily: BTreeMap<String, BucketStats>,
}

impl RepoStats {
    pub fn new(path: impl Into<String>, author: impl Into<String>, range: DateRange) -> Self {
        Self {
            path: path.into(),
            author: author.into(),
            range,
            ..Self::default()
        }
    }

    pub fn since(&self) -> DateTime<Utc> {
        self.range.since
    }

    pub fn until(&self) -> DateTime<Utc> {
        self.range.until
    }

    pub fn recompute_net(&mut self) {
        self.net = self.added as i64 - self.deleted as i64;
    }

    pub fn observe_commit(&mut self, date: DateTime<Utc>) {
        if self.first_commit.map_or(true, |first| date < first) {
            self.first_commit = Some(date);
        }
        if self.last_commit.map_or(true, |last| date > last) {
            self.last_commit = Some(date);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareStats {
    pub before: RepoStats,
    pub after: RepoStats,
    pub before_label: String,
    pub after_label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamStats {
    pub range: DateRange,
    pub members: BTreeMap<String, RepoStats>,
    pub total_added: u64,
    pub total_deleted: u64,
    pub total_net: i64,
    pub total_commits: u32,
}

impl TeamStats {
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            ..Self::default()
        }
    }

    /// Adds or replaces a member; totals always equal the sum over members.
    pub fn add_member(&mut self, author: impl Into<String>, stats: RepoStats) {
        self.total_added += stats.added;
        self.total_deleted += stats.deleted;
        self.total_commits += stats.commits;
        if let Some(old) = self.members.insert(author.into(), stats) {
            self.total_added -= old.added;
            self.total_deleted -= old.deleted;
            self.total_commits -= old.commits;
        }
        self.total_net = self.total_added as i64 - self.total_deleted as i64;
    }

    /// Members ordered by net lines, highest first.
    pub fn ranked_members(&self) -> Vec<(&str, &RepoStats)> {
        let mut members: Vec<_> = self
            .members
            .iter()
            .map(|(author, stats)| (author.as_str(), stats))
            .collect();
        members.sort_by(|a, b| b.1.net.cmp(&a.1.net));
        members
    }
}
