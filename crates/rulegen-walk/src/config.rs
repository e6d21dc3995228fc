//! Per-directory walk configuration.
//!
//! A [`WalkConfig`] describes what the walker may see inside one directory.
//! The root configuration comes from process-level settings; every directory
//! below it derives its own by copying the parent and applying the
//! directives declared in that directory ([`WalkConfig::configure`]).
//!
//! Pattern lists are shared with the parent through `Arc` and copied the
//! first time a child appends to them, so deriving a child never changes
//! what the parent or any sibling sees.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use rulegen_match::path::{clean, join, segments};
use rulegen_match::{GitignoreMatcher, GitignorePattern, GlobPattern, match_any};

use crate::directive::Directive;
use crate::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct WalkConfig {
    excludes: Arc<Vec<GlobPattern>>,
    follow: Arc<Vec<GlobPattern>>,
    ignore: bool,
    gitignore_patterns: Arc<Vec<GitignorePattern>>,
    gitignore_matcher: Option<GitignoreMatcher>,
}

impl WalkConfig {
    /// Build the root configuration from process-level exclude patterns.
    ///
    /// Patterns are cleaned and validated like `exclude` directives; invalid
    /// ones are logged and dropped.
    pub fn new<I, S>(excludes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        for pattern in excludes {
            if let Some(glob) = compile("exclusion", clean(pattern.as_ref())) {
                Arc::make_mut(&mut config.excludes).push(glob);
            }
        }
        config
    }

    /// Derive the configuration for the directory `rel` from this one.
    ///
    /// `ignore` is reset (it never carries over to subdirectories) and the
    /// directives are applied in the order they were declared.
    pub fn configure(&self, rel: &str, directives: &[Directive]) -> Self {
        let mut child = self.clone();
        child.ignore = false;

        for directive in directives {
            child.apply(rel, directive);
        }
        child
    }

    fn apply(&mut self, rel: &str, directive: &Directive) {
        match directive {
            Directive::Exclude(value) => {
                if let Some(glob) = compile("exclusion", join(rel, value)) {
                    Arc::make_mut(&mut self.excludes).push(glob);
                }
            }
            Directive::Follow(value) => {
                if let Some(glob) = compile("follow", join(rel, value)) {
                    Arc::make_mut(&mut self.follow).push(glob);
                }
            }
            Directive::Ignore(value) => {
                if !value.is_empty() {
                    tracing::warn!(
                        dir = %display_rel(rel),
                        argument = %value,
                        "the ignore directive does not take any arguments; did you mean to use exclude instead?"
                    );
                }
                self.ignore = true;
            }
            Directive::Gitignore(value) if value == "on" => {
                if self.gitignore_matcher.is_none() {
                    tracing::debug!(
                        dir = %display_rel(rel),
                        patterns = self.gitignore_patterns.len(),
                        "gitignore matching enabled"
                    );
                    self.rebuild_matcher();
                }
            }
            Directive::Gitignore(_) => {
                tracing::debug!(dir = %display_rel(rel), "gitignore matching disabled");
                self.gitignore_matcher = None;
            }
        }
    }

    /// Append the patterns of a gitignore file declared in `rel`.
    ///
    /// Blank lines and `#` comments are skipped. The active matcher, if any,
    /// is rebuilt so the new patterns apply to the rest of the subtree. On a
    /// read error no pattern from `reader` is kept.
    pub fn load_gitignore(&mut self, rel: &str, reader: impl BufRead) -> std::io::Result<()> {
        let domain = segments(rel);
        let mut parsed = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            parsed.push(GitignorePattern::parse(line, &domain));
        }

        tracing::debug!(dir = %display_rel(rel), added = parsed.len(), "loaded gitignore patterns");
        Arc::make_mut(&mut self.gitignore_patterns).extend(parsed);

        if self.gitignore_matcher.is_some() {
            self.rebuild_matcher();
        }
        Ok(())
    }

    /// Read a gitignore file from disk and load it for the directory `rel`.
    pub fn load_gitignore_file(&mut self, rel: &str, path: &Path) -> Result<()> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        self.load_gitignore(rel, BufReader::new(file))
            .map_err(|e| Error::io(path, e))
    }

    fn rebuild_matcher(&mut self) {
        self.gitignore_matcher = Some(GitignoreMatcher::from_shared(Arc::clone(
            &self.gitignore_patterns,
        )));
    }

    /// True if `path` matches any exclude pattern in effect.
    pub fn is_excluded(&self, path: &str) -> bool {
        match_any(&self.excludes, path)
    }

    /// True if the symlink at `path` should be traversed.
    pub fn should_follow(&self, path: &str) -> bool {
        match_any(&self.follow, path)
    }

    /// True if gitignore matching is active and ignores the path.
    pub fn is_git_ignored<S: AsRef<str>>(&self, path: &[S], is_dir: bool) -> bool {
        self.gitignore_matcher
            .as_ref()
            .is_some_and(|m| m.is_match(path, is_dir))
    }

    /// [`is_git_ignored`](Self::is_git_ignored) for a slash-separated relative path.
    pub fn is_git_ignored_path(&self, rel: &str, is_dir: bool) -> bool {
        self.is_git_ignored(&segments(rel), is_dir)
    }

    /// Whether rule generation should be skipped for this directory.
    pub fn ignore(&self) -> bool {
        self.ignore
    }

    pub fn gitignore_enabled(&self) -> bool {
        self.gitignore_matcher.is_some()
    }

    pub fn excludes(&self) -> &[GlobPattern] {
        &self.excludes
    }

    pub fn follow(&self) -> &[GlobPattern] {
        &self.follow
    }

    pub fn gitignore_patterns(&self) -> &[GitignorePattern] {
        &self.gitignore_patterns
    }
}

fn compile(purpose: &str, pattern: String) -> Option<GlobPattern> {
    match GlobPattern::new(pattern) {
        Ok(glob) => Some(glob),
        Err(e) => {
            tracing::warn!("the {purpose} pattern is not valid: {e}");
            None
        }
    }
}

fn display_rel(rel: &str) -> &str {
    if rel.is_empty() { "." } else { rel }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_shares_storage_until_it_appends() {
        let root = WalkConfig::new(["vendor"]);
        let plain = root.configure("a", &[]);
        assert!(Arc::ptr_eq(&root.excludes, &plain.excludes));

        let extended = root.configure("b", &[Directive::Exclude("gen".into())]);
        assert!(!Arc::ptr_eq(&root.excludes, &extended.excludes));
        assert_eq!(root.excludes().len(), 1);
        assert_eq!(extended.excludes().len(), 2);
    }

    #[test]
    fn matcher_snapshot_tracks_loaded_patterns() {
        let mut config = WalkConfig::default().configure("", &[Directive::Gitignore("on".into())]);
        config.load_gitignore("", "*.o\n".as_bytes()).unwrap();

        let matcher = config.gitignore_matcher.as_ref().unwrap();
        assert_eq!(matcher.len(), 1);
    }
}
