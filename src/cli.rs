use crate::config::{Breakdown, OutputFormat, Theme};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gitrespect")]
#[command(about = "Respect your git work with real metrics: lines added, deleted and net per author")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, default_value = "warn", help = "Log level (error, warn, info, debug, trace)")]
    pub log_level: String,

    #[clap(flatten)]
    pub analyze: AnalyzeArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    #[arg(help = "Repositories or directories containing repositories (default: current directory)")]
    pub paths: Vec<PathBuf>,

    #[arg(short, long, help = "Filter by author email (default: git config user.email)")]
    pub author: Option<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Terminal, help = "Output format")]
    pub output: OutputFormat,

    #[arg(short, long, help = "Output file path (for html/json)")]
    pub file: Option<PathBuf>,

    #[arg(short, long, value_delimiter = ',', help = "Exclude files matching these glob patterns (e.g. 'vendor/*,*.min.js')")]
    pub exclude: Vec<String>,

    #[arg(long, value_enum, default_value_t = Theme::Dark, help = "HTML report theme")]
    pub theme: Theme,
}

#[derive(Args, Clone, Debug)]
pub struct AnalyzeArgs {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[arg(short, long, value_delimiter = ',', help = "Analyze a team: comma-separated author emails")]
    pub team: Vec<String>,

    #[arg(short, long, default_value = "30 days ago", help = "Start date (YYYY-MM-DD, YYYY-MM, YYYY or relative like '30 days ago')")]
    pub since: String,

    #[arg(short, long, help = "End date (default: now)")]
    pub until: Option<String>,

    #[arg(short, long, value_enum, help = "Show a breakdown table")]
    pub breakdown: Option<Breakdown>,

    #[arg(long, help = "Analyze a whole calendar year (e.g. --year 2025)")]
    pub year: Option<i32>,
}

#[derive(Args, Clone, Debug)]
pub struct CompareArgs {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[arg(long, help = "Before period (YYYY-MM:YYYY-MM)")]
    pub before: String,

    #[arg(long, help = "After period (YYYY-MM:YYYY-MM)")]
    pub after: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze contributions over a date range (the default command)
    Analyze(AnalyzeArgs),
    /// Compare productivity between two periods
    Compare(CompareArgs),
    /// Print version information
    Version,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn init_logging(&self) {
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .format_timestamp(None)
            .format_target(false)
            .init();
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Some(Commands::Analyze(args)) => crate::analyze::exec(args),
            Some(Commands::Compare(args)) => crate::compare::exec(args),
            Some(Commands::Version) => {
                print!("{}", crate::version::version_text());
                Ok(())
            }
            None => crate::analyze::exec(self.analyze),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(argv: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gitrespect").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_analyzes() {
        let cli = parse(&["-a", "me@example.com", "-b", "monthly", "repo-a", "repo-b"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.analyze.common.paths, vec![PathBuf::from("repo-a"), PathBuf::from("repo-b")]);
        assert_eq!(cli.analyze.breakdown, Some(Breakdown::Monthly));
        assert_eq!(cli.analyze.since, "30 days ago");
    }

    #[test]
    fn compare_subcommand() {
        let cli = parse(&["compare", "--before=2025-01:2025-06", "--after=2025-07:2025-12", "-o", "json"]);
        match cli.command {
            Some(Commands::Compare(args)) => {
                assert_eq!(args.before, "2025-01:2025-06");
                assert_eq!(args.common.output, OutputFormat::Json);
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn compare_requires_both_periods() {
        let argv = ["gitrespect", "compare", "--before=2025-01:2025-06"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn log_level_is_global() {
        let cli = parse(&["version", "--log-level", "debug"]);
        assert_eq!(cli.log_level, "debug");
        assert!(matches!(cli.command, Some(Commands::Version)));
    }
}
