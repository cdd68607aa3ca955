pub mod command;
pub mod discover;

pub use command::{GitCli, LogQuery, LogSource, HEADER_SEPARATOR};
pub use discover::{find_repos, find_repos_with, has_commits, is_git_repo};
