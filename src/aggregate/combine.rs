use crate::model::RepoStats;

/// Merges per-repository statistics into one aggregate.
pub fn combine(stats: &[RepoStats]) -> RepoStats {
    let Some(first) = stats.first() else {
        return RepoStats::default();
    };

    let mut combined = RepoStats::new("", first.author.clone(), first.range);

    for s in stats {
        combined.added += s.added;
        combined.deleted += s.deleted;
        combined.commits += s.commits;
        combined.files_changed += s.files_changed;

        if let Some(first_commit) = s.first_commit {
            combined.observe_commit(first_commit);
        }
        if let Some(last_commit) = s.last_commit {
            combined.observe_commit(last_commit);
        }

        for (key, month) in &s.monthly {
            combined.monthly.entry(key.clone()).or_default().merge(month);
        }
        for (key, week) in &s.weekly {
            combined.weekly.entry(key.clone()).or_default().merge(week);
        }
        for (key, day) in &s.daily {
            combined.daily.entry(key.clone()).or_default().merge(day);
        }
    }

    combined.recompute_net();
    combined.path = if stats.len() > 1 {
        format!("{} repositories", stats.len())
    } else {
        first.path.clone()
    };

    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::parse_log;
    use crate::exclude::ExcludeSet;
    use crate::model::DateRange;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn range() -> DateRange {
        DateRange::new(
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap(),
        )
    }

    fn stats(path: &str, log: &str) -> RepoStats {
        parse_log(log, RepoStats::new(path, "me", range()), &ExcludeSet::default())
    }

    #[test]
    fn empty_input_is_zero() {
        let combined = combine(&[]);
        assert_eq!(combined.added, 0);
        assert_eq!(combined.deleted, 0);
        assert_eq!(combined.net, 0);
        assert_eq!(combined.commits, 0);
        assert!(combined.monthly.is_empty());
        assert!(combined.weekly.is_empty());
        assert!(combined.daily.is_empty());
    }

    #[test]
    fn single_input_is_identity() {
        let s = stats("/work/a", "x|2025-03-01\n4\t2\ta.rs\ny|2025-04-09\n1\t9\tb.rs\n");
        assert_eq!(combine(std::slice::from_ref(&s)), s);
    }

    #[test]
    fn merges_totals_spans_and_buckets() {
        let a = stats("/work/a", "x|2025-03-01\n4\t2\ta.rs\ny|2025-04-09\n1\t9\tb.rs\n");
        let b = stats("/work/b", "z|2025-02-14\n10\t0\tc.rs\nw|2025-03-20\n6\t1\td.rs\n");
        let empty = stats("/work/c", "");

        let combined = combine(&[a, b, empty]);
        assert_eq!(combined.path, "3 repositories");
        assert_eq!(combined.author, "me");
        assert_eq!((combined.added, combined.deleted, combined.net), (21, 12, 9));
        assert_eq!(combined.commits, 4);
        assert_eq!(combined.files_changed, 4);
        assert_eq!(combined.first_commit, Some(Utc.with_ymd_and_hms(2025, 2, 14, 0, 0, 0).unwrap()));
        assert_eq!(combined.last_commit, Some(Utc.with_ymd_and_hms(2025, 4, 9, 0, 0, 0).unwrap()));

        let march = &combined.monthly["2025-03"];
        assert_eq!((march.year, march.month), (2025, 3));
        assert_eq!((march.added, march.deleted, march.net, march.commits), (10, 3, 7, 2));

        let added: u64 = combined.monthly.values().map(|m| m.added).sum();
        assert_eq!(added, combined.added);
    }
}
