use crate::error::{GitrespectError, Result};
use crate::model::DateRange;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Separator between the hash and the date in commit header lines.
pub const HEADER_SEPARATOR: char = '|';

/// One `git log --numstat` query: commits by `author` in `range`, day granularity.
#[derive(Debug, Clone, Copy)]
pub struct LogQuery<'a> {
    pub repo: &'a Path,
    pub author: &'a str,
    pub range: &'a DateRange,
}

impl LogQuery<'_> {
    pub fn args(&self) -> Vec<OsString> {
        vec![
            OsString::from("-C"),
            self.repo.as_os_str().to_owned(),
            OsString::from("log"),
            OsString::from(format!("--author={}", self.author)),
            OsString::from(format!("--since={}", self.range.since.format("%Y-%m-%d"))),
            OsString::from(format!("--until={}", self.range.until.format("%Y-%m-%d"))),
            OsString::from(format!("--pretty=format:%H{HEADER_SEPARATOR}%ad")),
            OsString::from("--date=short"),
            OsString::from("--numstat"),
        ]
    }
}

/// Where commit history text comes from.
///
/// The output is the interleaved `<hash>|<YYYY-MM-DD>` header lines and
/// `added<TAB>deleted<TAB>path` numstat lines of `git log --numstat`.
pub trait LogSource {
    fn numstat_log(&self, query: &LogQuery<'_>) -> Result<String>;
}

/// Runs the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[OsString]) -> Result<String> {
        let command = format!("{} {}", self.program.display(), describe(args));
        log::debug!("running {command}");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| GitrespectError::Subprocess {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            return Err(GitrespectError::Subprocess { command, message });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// `git config user.email` for the repository at `repo`.
    pub fn default_author(&self, repo: &Path) -> Result<String> {
        let args = [
            OsString::from("-C"),
            repo.as_os_str().to_owned(),
            OsString::from("config"),
            OsString::from("user.email"),
        ];
        Ok(self.run(&args)?.trim().to_string())
    }
}

impl LogSource for GitCli {
    fn numstat_log(&self, query: &LogQuery<'_>) -> Result<String> {
        self.run(&query.args())
    }
}

fn describe(args: &[OsString]) -> String {
    args.iter()
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    #[test]
    fn query_renders_day_bounds() {
        let range = DateRange::new(
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 7, 31, 23, 59, 59).unwrap(),
        );
        let query = LogQuery {
            repo: Path::new("/tmp/repo"),
            author: "me@example.com",
            range: &range,
        };
        let args: Vec<String> = query
            .args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "-C",
                "/tmp/repo",
                "log",
                "--author=me@example.com",
                "--since=2025-01-01",
                "--until=2025-07-31",
                "--pretty=format:%H|%ad",
                "--date=short",
                "--numstat",
            ]
        );
    }

    #[test]
    fn missing_binary_is_a_subprocess_error() {
        let git = GitCli::new("/nonexistent/definitely-not-git");
        let range = DateRange::default();
        let query = LogQuery {
            repo: Path::new("."),
            author: "",
            range: &range,
        };
        match git.numstat_log(&query) {
            Err(GitrespectError::Subprocess { .. }) => {}
            other => panic!("expected subprocess error, got {other:?}"),
        }
    }
}
