//! Shell-style glob patterns
//!
//! `*` matches within a single path segment, `**` spans any number of
//! segments, `?` matches one character, and `[...]` / `{a,b}` behave as in
//! a shell. A trailing `/**` also matches zero segments, so `vendor/**`
//! matches `vendor` itself. Patterns are compiled up front so syntax errors
//! surface when a pattern is registered rather than when it is first used.

use std::fmt;

use globset::{GlobBuilder, GlobMatcher};

use crate::{Error, Result};

/// A compiled glob pattern together with its source text.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    pattern: String,
    matcher: GlobMatcher,
    /// For a pattern ending in `/**`, matches the directory itself.
    base: Option<GlobMatcher>,
}

impl GlobPattern {
    /// Compile a pattern, rejecting invalid syntax.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let matcher = compile(&pattern)?;
        let base = match pattern.strip_suffix("/**") {
            Some(prefix) if !prefix.is_empty() => Some(compile(prefix)?),
            _ => None,
        };

        Ok(Self {
            pattern,
            matcher,
            base,
        })
    }

    /// The pattern as it was written.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Check whether a repository-relative path matches.
    pub fn is_match(&self, path: &str) -> bool {
        self.matcher.is_match(path) || self.base.as_ref().is_some_and(|b| b.is_match(path))
    }
}

fn compile(pattern: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| Error::invalid_glob(pattern, e))?;
    Ok(glob.compile_matcher())
}

impl PartialEq for GlobPattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for GlobPattern {}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// True if any pattern matches. Stops at the first match.
pub fn match_any(patterns: &[GlobPattern], path: &str) -> bool {
    patterns.iter().any(|p| p.is_match(path))
}

/// True if `s` contains a glob metacharacter (`*`, `?` or `[`).
pub fn contains_glob_meta(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unclosed_class_is_rejected() {
        let err = GlobPattern::new("src/[a-z").unwrap_err();
        assert!(err.to_string().contains("src/[a-z"));
    }

    #[test]
    fn display_shows_source() {
        let p = GlobPattern::new("a/**/*.rs").unwrap();
        assert_eq!(p.to_string(), "a/**/*.rs");
    }
}
