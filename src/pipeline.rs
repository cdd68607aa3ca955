//! Runs the per-repository analysis over every target and collects what succeeded.

use crate::aggregate::analyze;
use crate::error::Result;
use crate::exclude::ExcludeSet;
use crate::git::{find_repos, LogSource};
use crate::model::{DateRange, RepoStats};
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

/// Repository roots for the given paths. A path with no repository below it is
/// kept as-is, since git also accepts a subdirectory of a work tree.
pub fn resolve_repos(paths: &[PathBuf]) -> Vec<PathBuf> {
    resolve_repos_with(paths, find_repos)
}

pub fn resolve_repos_with<F>(paths: &[PathBuf], discover: F) -> Vec<PathBuf>
where
    F: Fn(&Path) -> Vec<PathBuf>,
{
    let mut repos = Vec::new();
    for path in paths {
        let found = discover(path);
        if found.is_empty() {
            log::debug!("no repositories found under {}, analyzing it directly", path.display());
            repos.push(path.clone());
        } else {
            log::info!("found {} repositories under {}", found.len(), path.display());
            repos.extend(found);
        }
    }
    repos
}

pub fn spinner() -> ProgressBar {
    if !Term::stderr().is_term() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb
}

/// Analyzes every repository for one author. Recoverable failures are logged
/// and skipped; the result holds only the repositories that succeeded.
pub fn collect_stats<S: LogSource + ?Sized>(
    source: &S,
    repos: &[PathBuf],
    author: &str,
    range: &DateRange,
    excludes: &ExcludeSet,
    pb: &ProgressBar,
) -> Result<Vec<RepoStats>> {
    let mut all = Vec::with_capacity(repos.len());
    for repo in repos {
        pb.set_message(format!("Analyzing {}", repo.display()));
        pb.tick();
        match analyze(source, repo, author, range, excludes) {
            Ok(stats) => all.push(stats),
            Err(e) if e.is_recoverable() => {
                pb.suspend(|| log::warn!("failed to analyze {}: {e}", repo.display()));
            }
            Err(e) => return Err(e),
        }
    }
    Ok(all)
}
