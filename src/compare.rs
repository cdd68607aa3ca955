use crate::aggregate::{analyze, combine};
use crate::cli::CompareArgs;
use crate::config::CompareConfig;
use crate::error::{GitrespectError, Result};
use crate::git::{GitCli, LogSource};
use crate::model::{CompareStats, RepoStats};
use crate::pipeline::{resolve_repos, spinner};
use crate::report::{self, Report};
use anyhow::Context;
use indicatif::ProgressBar;
use std::path::PathBuf;

pub fn exec(args: CompareArgs) -> anyhow::Result<()> {
    let git = GitCli::default();
    let config = CompareConfig::from_args(&args, &git).context("Invalid arguments")?;
    let comparison = gather(&config, &git).context("Failed to compare periods")?;
    report::deliver(&Report::Compare(&comparison), &config.output).context("Failed to write report")?;
    Ok(())
}

/// Analyzes every repository over both periods. A repository that fails
/// for the before period is skipped for the after period too. Each period
/// must yield at least one repository.
pub fn gather<S: LogSource + ?Sized>(config: &CompareConfig, source: &S) -> Result<CompareStats> {
    let repos = resolve_repos(&config.paths);
    let pb = spinner();
    let result = collect_periods(source, &repos, config, &pb);
    pb.finish_and_clear();
    let (before, after) = result?;

    if before.is_empty() || after.is_empty() {
        return Err(GitrespectError::NoData(
            "could not analyze repositories for both periods".to_string(),
        ));
    }

    Ok(CompareStats {
        before: combine(&before),
        after: combine(&after),
        before_label: config.before_label.clone(),
        after_label: config.after_label.clone(),
    })
}

fn collect_periods<S: LogSource + ?Sized>(
    source: &S,
    repos: &[PathBuf],
    config: &CompareConfig,
    pb: &ProgressBar,
) -> Result<(Vec<RepoStats>, Vec<RepoStats>)> {
    let mut before = Vec::with_capacity(repos.len());
    let mut after = Vec::with_capacity(repos.len());

    for repo in repos {
        pb.set_message(format!("Analyzing {}", repo.display()));
        pb.tick();

        match analyze(source, repo, &config.author, &config.before, &config.excludes) {
            Ok(stats) => before.push(stats),
            Err(e) if e.is_recoverable() => {
                pb.suspend(|| log::warn!("failed to analyze {}: {e}", repo.display()));
                continue;
            }
            Err(e) => return Err(e),
        }

        match analyze(source, repo, &config.author, &config.after, &config.excludes) {
            Ok(stats) => after.push(stats),
            Err(e) if e.is_recoverable() => {
                pb.suspend(|| log::warn!("failed to analyze {} for {}: {e}", repo.display(), config.after_label));
            }
            Err(e) => return Err(e),
        }
    }

    Ok((before, after))
}
