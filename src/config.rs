//! Resolved run configuration, built once from the parsed command line.

use crate::cli::{AnalyzeArgs, CommonArgs, CompareArgs};
use crate::dates::{parse_date_at, parse_period, year_range};
use crate::error::{GitrespectError, Result};
use crate::exclude::ExcludeSet;
use crate::git::GitCli;
use crate::model::DateRange;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
    Html,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Breakdown {
    Monthly,
    Weekly,
    Daily,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub file: Option<PathBuf>,
    pub theme: Theme,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub paths: Vec<PathBuf>,
    /// One author normally; every member with `--team`.
    pub authors: Vec<String>,
    pub team: bool,
    pub range: DateRange,
    pub excludes: ExcludeSet,
    pub breakdown: Option<Breakdown>,
    pub output: OutputConfig,
}

#[derive(Debug, Clone)]
pub struct CompareConfig {
    pub paths: Vec<PathBuf>,
    pub author: String,
    pub before: DateRange,
    pub after: DateRange,
    pub before_label: String,
    pub after_label: String,
    pub excludes: ExcludeSet,
    pub output: OutputConfig,
}

impl RunConfig {
    pub fn from_args(args: &AnalyzeArgs, git: &GitCli, now: DateTime<Utc>) -> Result<Self> {
        let paths = resolve_paths(&args.common.paths)?;
        let range = resolve_range(args, now)?;

        let mut team: Vec<String> = Vec::with_capacity(args.team.len());
        for author in args.team.iter().map(|a| a.trim()).filter(|a| !a.is_empty()) {
            if !team.iter().any(|seen| seen == author) {
                team.push(author.to_string());
            }
        }

        let (authors, team) = if team.is_empty() {
            (vec![resolve_author(&args.common, &paths, git)], false)
        } else {
            (team, true)
        };

        Ok(Self {
            paths,
            authors,
            team,
            range,
            excludes: ExcludeSet::new(args.common.exclude.as_slice())?,
            breakdown: args.breakdown,
            output: OutputConfig::from_args(&args.common),
        })
    }
}

impl CompareConfig {
    pub fn from_args(args: &CompareArgs, git: &GitCli) -> Result<Self> {
        let paths = resolve_paths(&args.common.paths)?;
        let before = parse_period(&args.before).map_err(|e| for_flag("--before", e))?;
        let after = parse_period(&args.after).map_err(|e| for_flag("--after", e))?;

        Ok(Self {
            author: resolve_author(&args.common, &paths, git),
            paths,
            before,
            after,
            before_label: args.before.clone(),
            after_label: args.after.clone(),
            excludes: ExcludeSet::new(args.common.exclude.as_slice())?,
            output: OutputConfig::from_args(&args.common),
        })
    }
}

impl OutputConfig {
    fn from_args(common: &CommonArgs) -> Self {
        Self {
            format: common.output,
            file: common.file.clone(),
            theme: common.theme,
        }
    }
}

fn resolve_range(args: &AnalyzeArgs, now: DateTime<Utc>) -> Result<DateRange> {
    if let Some(year) = args.year {
        return year_range(year, now);
    }

    let since = parse_date_at(&args.since, now).map_err(|e| for_flag("--since", e))?;
    let until = match &args.until {
        Some(until) => parse_date_at(until, now).map_err(|e| for_flag("--until", e))?,
        None => now,
    };

    if since > until {
        return Err(GitrespectError::InvalidDate(format!(
            "since ({}) is after until ({})",
            since.format("%Y-%m-%d"),
            until.format("%Y-%m-%d")
        )));
    }

    Ok(DateRange::new(since, until))
}

fn for_flag(flag: &str, err: GitrespectError) -> GitrespectError {
    match err {
        GitrespectError::InvalidDate(msg) => GitrespectError::InvalidDate(format!("{flag}: {msg}")),
        GitrespectError::InvalidInput(msg) => GitrespectError::InvalidInput(format!("{flag}: {msg}")),
        other => other,
    }
}

/// Absolute paths for the given arguments, or the current directory.
pub fn resolve_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if paths.is_empty() {
        return Ok(vec![std::env::current_dir()?]);
    }
    paths.iter().map(|p| absolute(p)).collect()
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .map_err(|e| GitrespectError::InvalidInput(format!("invalid path {}: {e}", path.display())))
}

fn resolve_author(common: &CommonArgs, paths: &[PathBuf], git: &GitCli) -> String {
    if let Some(author) = common.author.as_deref().filter(|a| !a.trim().is_empty()) {
        return author.trim().to_string();
    }

    let Some(first) = paths.first() else {
        return String::new();
    };

    match git.default_author(first) {
        Ok(author) => author,
        Err(e) => {
            log::warn!("no --author given and git user.email is unavailable ({e}); counting all authors");
            String::new()
        }
    }
}
