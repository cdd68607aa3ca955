//! File exclusion for numstat entries.
//!
//! A pattern excludes a path when it glob-matches the full path, the basename,
//! or (for `dir/rest` patterns) the part of the path below `dir/`. Globs never
//! cross a `/`: `**` is read as `*`, and `[^...]` negates like `[!...]`.

use glob::{MatchOptions, Pattern};

use crate::error::{GitrespectError, Result};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone)]
struct ExcludeRule {
    pattern: Pattern,
    /// `dir` prefix and the glob for the remainder; `None` when the remainder is `*`.
    dir: Option<(String, Option<Pattern>)>,
}

impl ExcludeRule {
    fn new(raw: &str) -> Result<Self> {
        let raw = normalize(raw);
        let raw = raw.as_str();
        let pattern = compile(raw)?;
        let dir = match raw.split_once('/') {
            Some((dir, "*")) => Some((format!("{dir}/"), None)),
            Some((dir, rest)) => Some((format!("{dir}/"), Some(compile(rest)?))),
            None => None,
        };
        Ok(Self { pattern, dir })
    }

    fn matches(&self, path: &str) -> bool {
        if self.pattern.matches_with(path, MATCH_OPTIONS) {
            return true;
        }
        if self.pattern.matches_with(basename(path), MATCH_OPTIONS) {
            return true;
        }
        if let Some((prefix, rest)) = &self.dir {
            if let Some(remainder) = path.strip_prefix(prefix.as_str()) {
                return match rest {
                    None => true,
                    Some(rest) => rest.matches_with(remainder, MATCH_OPTIONS),
                };
            }
        }
        false
    }
}

/// A compiled set of exclude patterns.
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet {
    rules: Vec<ExcludeRule>,
}

impl ExcludeSet {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let rules = patterns
            .iter()
            .map(|p| p.as_ref().trim())
            .filter(|p| !p.is_empty())
            .map(ExcludeRule::new)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(path))
    }
}

/// Uncompiled form of [`ExcludeSet::is_excluded`]; invalid patterns never match.
pub fn should_exclude(path: &str, patterns: &[String]) -> bool {
    patterns
        .iter()
        .filter_map(|p| ExcludeRule::new(p).ok())
        .any(|rule| rule.matches(path))
}

/// Rewrites shell-glob syntax that `glob::Pattern` reads differently.
fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                while chars.peek() == Some(&'*') {
                    chars.next();
                }
                out.push('*');
            }
            '[' if chars.peek() == Some(&'^') => {
                chars.next();
                out.push_str("[!");
            }
            _ => out.push(c),
        }
    }
    out
}

fn compile(raw: &str) -> Result<Pattern> {
    Pattern::new(raw).map_err(|e| {
        GitrespectError::InvalidInput(format!("invalid exclude pattern '{raw}': {e}"))
    })
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(patterns: &[&str]) -> ExcludeSet {
        ExcludeSet::new(patterns).unwrap()
    }

    #[test]
    fn directory_wildcard() {
        let ex = set(&["vendor/*"]);
        assert!(ex.is_excluded("vendor/lib.go"));
        assert!(ex.is_excluded("vendor/github.com/pkg/errors.go"));
        assert!(!ex.is_excluded("src/vendor.go"));
        assert!(!ex.is_excluded("src/vendor/lib.go"));
    }

    #[test]
    fn basename_match_at_any_depth() {
        let ex = set(&["*.min.js"]);
        assert!(ex.is_excluded("app.min.js"));
        assert!(ex.is_excluded("static/js/app.min.js"));
        assert!(!ex.is_excluded("static/js/app.js"));
    }

    #[test]
    fn directory_with_glob_remainder() {
        let ex = set(&["docs/*.md"]);
        assert!(ex.is_excluded("docs/intro.md"));
        assert!(!ex.is_excluded("docs/guide/intro.md"));
        assert!(!ex.is_excluded("docs/intro.txt"));
    }

    #[test]
    fn exact_full_path_and_classes() {
        let ex = set(&["go.sum", "file[0-9].txt", "?.lock"]);
        assert!(ex.is_excluded("go.sum"));
        assert!(ex.is_excluded("nested/go.sum"));
        assert!(ex.is_excluded("file7.txt"));
        assert!(!ex.is_excluded("fileA.txt"));
        assert!(ex.is_excluded("a.lock"));
        assert!(!ex.is_excluded("ab.lock"));
    }

    #[test]
    fn star_does_not_cross_separator() {
        let ex = set(&["src*"]);
        assert!(ex.is_excluded("src_gen"));
        assert!(!ex.is_excluded("src/main.rs"));
    }

    #[test]
    fn double_star_is_not_recursive() {
        let ex = set(&["**/gen.rs"]);
        assert!(ex.is_excluded("a/gen.rs"));
        assert!(!ex.is_excluded("a/b/gen.rs"));
    }

    #[test]
    fn double_star_inside_a_segment_reads_as_single() {
        let ex = set(&["src**"]);
        assert!(ex.is_excluded("src_gen"));
        assert!(!ex.is_excluded("src/main.rs"));
    }

    #[test]
    fn caret_negates_a_class() {
        let ex = set(&["[^a]x"]);
        assert!(ex.is_excluded("bx"));
        assert!(!ex.is_excluded("ax"));
    }

    #[test]
    fn empty_set_excludes_nothing() {
        let ex = ExcludeSet::new::<&str>(&[]).unwrap();
        assert!(!ex.is_excluded("anything.rs"));
    }

    #[test]
    fn invalid_pattern_is_rejected_when_compiled() {
        assert!(ExcludeSet::new(&["[unclosed"]).is_err());
        assert!(!should_exclude("[unclosed", &["[unclosed".to_string()]));
    }

    #[test]
    fn uncompiled_helper_matches_compiled_set() {
        let patterns = vec!["vendor/*".to_string(), "*.min.js".to_string()];
        assert!(should_exclude("vendor/lib.go", &patterns));
        assert!(should_exclude("web/app.min.js", &patterns));
        assert!(!should_exclude("src/vendor.go", &patterns));
    }
}
