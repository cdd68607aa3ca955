use crate::aggregate::combine;
use crate::cli::AnalyzeArgs;
use crate::config::RunConfig;
use crate::error::{GitrespectError, Result};
use crate::git::{GitCli, LogSource};
use crate::model::{RepoStats, TeamStats};
use crate::pipeline::{collect_stats, resolve_repos, spinner};
use crate::report::{self, Report};
use anyhow::Context;
use chrono::Utc;

pub fn exec(args: AnalyzeArgs) -> anyhow::Result<()> {
    let git = GitCli::default();
    let config = RunConfig::from_args(&args, &git, Utc::now()).context("Invalid arguments")?;
    let analysis = gather(&config, &git).context("Failed to analyze repositories")?;

    let report = match &analysis {
        Analysis::Single(stats) => Report::Summary {
            stats,
            breakdown: config.breakdown,
        },
        Analysis::Team(team) => Report::Team(team),
    };
    report::deliver(&report, &config.output).context("Failed to write report")?;
    Ok(())
}

#[derive(Debug)]
pub enum Analysis {
    Single(RepoStats),
    Team(TeamStats),
}

/// Runs the configured analysis and combines the per-repository results.
pub fn gather<S: LogSource + ?Sized>(config: &RunConfig, source: &S) -> Result<Analysis> {
    let repos = resolve_repos(&config.paths);
    let pb = spinner();

    let result = if config.team {
        let mut team = TeamStats::new(config.range);
        for author in &config.authors {
            let stats = collect_stats(source, &repos, author, &config.range, &config.excludes, &pb)?;
            if stats.is_empty() {
                pb.suspend(|| log::warn!("no repository could be analyzed for {author}, skipping"));
                continue;
            }
            team.add_member(author.clone(), combine(&stats));
        }
        if team.members.is_empty() {
            Err(GitrespectError::NoData("no team member could be analyzed".to_string()))
        } else {
            Ok(Analysis::Team(team))
        }
    } else {
        let author = config.authors.first().map(String::as_str).unwrap_or_default();
        let stats = collect_stats(source, &repos, author, &config.range, &config.excludes, &pb)?;
        if stats.is_empty() {
            Err(GitrespectError::NoData("no repositories could be analyzed".to_string()))
        } else {
            Ok(Analysis::Single(combine(&stats)))
        }
    };

    pb.finish_and_clear();
    result
}
