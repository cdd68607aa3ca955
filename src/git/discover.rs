use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Whether `path` has a `.git` directory.
pub fn is_git_repo(path: &Path) -> bool {
    path.join(".git").is_dir()
}

/// Whether the repository at `path` has at least one commit (`HEAD` resolves).
pub fn has_commits(path: &Path) -> bool {
    match gix::open(path) {
        Ok(repo) => repo.head_id().is_ok(),
        Err(e) => {
            log::debug!("cannot open {}: {e}", path.display());
            false
        }
    }
}

/// Finds repository roots under `root`, without descending into hidden
/// directories or into repositories already found.
pub fn find_repos(root: &Path) -> Vec<PathBuf> {
    find_repos_with(root, has_commits)
}

pub fn find_repos_with<F>(root: &Path, probe: F) -> Vec<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    let mut repos = Vec::new();
    let mut walker = WalkDir::new(root).sort_by_file_name().into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("skipping unreadable entry: {e}");
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        let is_root = entry.depth() == 0;
        if !is_root && entry.file_name().to_string_lossy().starts_with('.') {
            walker.skip_current_dir();
            continue;
        }

        if is_git_repo(entry.path()) {
            if probe(entry.path()) {
                repos.push(entry.path().to_path_buf());
                walker.skip_current_dir();
            } else if !is_root {
                log::debug!("skipping empty repository {}", entry.path().display());
                walker.skip_current_dir();
            }
        }
    }

    repos
}
