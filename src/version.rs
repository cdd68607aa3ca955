pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Set by release builds, e.g. `GITRESPECT_COMMIT=$(git rev-parse --short HEAD) cargo build`.
const COMMIT: Option<&str> = option_env!("GITRESPECT_COMMIT");
const BUILD_DATE: Option<&str> = option_env!("GITRESPECT_BUILD_DATE");

pub fn version_text() -> String {
    let mut out = format!("gitrespect {VERSION}\n");
    if let Some(commit) = COMMIT {
        out.push_str(&format!("  commit: {commit}\n"));
        out.push_str(&format!("  built:  {}\n", BUILD_DATE.unwrap_or("unknown")));
    }
    out
}
