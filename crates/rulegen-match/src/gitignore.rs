//! Gitignore-style pattern matching.
//!
//! Each pattern is bound to the directory it was declared in (its domain)
//! and only applies to paths strictly below that directory. A matcher walks
//! its patterns from last to first and the first one that matches decides,
//! so later patterns override earlier ones and `!pattern` can re-include a
//! path that an earlier pattern excluded.

use std::sync::Arc;

use globset::{GlobBuilder, GlobMatcher};

/// Outcome of a single pattern matching a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The path is ignored.
    Exclude,
    /// The path is re-included by a negated pattern.
    Include,
}

#[derive(Debug, Clone)]
enum Segment {
    /// Empty segment from a leading slash.
    Anchor,
    /// `**`: zero or more directories.
    AnyDirs,
    Name(GlobMatcher),
    /// A segment that can never match (bad syntax or a stray `**`).
    Never,
}

/// One parsed line of a gitignore file.
#[derive(Debug, Clone)]
pub struct GitignorePattern {
    source: String,
    domain: Vec<String>,
    segments: Vec<Segment>,
    negated: bool,
    dir_only: bool,
    anchored: bool,
}

impl GitignorePattern {
    /// Parse a pattern declared in the directory identified by `domain`.
    ///
    /// `domain` holds the path segments of the declaring directory; it is
    /// empty for the repository root.
    pub fn parse<S: AsRef<str>>(line: &str, domain: &[S]) -> Self {
        let source = line.to_string();
        let mut p = line;

        let negated = match p.strip_prefix('!') {
            Some(rest) => {
                p = rest;
                true
            }
            None => false,
        };

        if !p.ends_with("\\ ") {
            p = p.trim_end_matches(' ');
        }

        let dir_only = match p.strip_suffix('/') {
            Some(rest) => {
                p = rest;
                true
            }
            None => false,
        };

        let anchored = p.contains('/');
        let segments = if anchored {
            p.split('/').map(|s| compile_anchored_segment(s, &source)).collect()
        } else {
            vec![compile_name(&collapse_stars(p), &source)]
        };

        Self {
            source,
            domain: domain.iter().map(|s| s.as_ref().to_string()).collect(),
            segments,
            negated,
            dir_only,
            anchored,
        }
    }

    /// The line this pattern was parsed from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Segments of the directory this pattern was declared in.
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Match a path given as segments relative to the repository root.
    ///
    /// Returns `None` when the pattern says nothing about the path.
    pub fn matches<S: AsRef<str>>(&self, path: &[S], is_dir: bool) -> Option<Verdict> {
        let path: Vec<&str> = path.iter().map(|s| s.as_ref()).collect();
        self.matches_segments(&path, is_dir)
    }

    fn matches_segments(&self, path: &[&str], is_dir: bool) -> Option<Verdict> {
        if path.len() <= self.domain.len() {
            return None;
        }
        if self.domain.iter().zip(path).any(|(d, p)| d != p) {
            return None;
        }

        let rest = &path[self.domain.len()..];
        let hit = if self.anchored {
            self.anchored_match(rest, is_dir)
        } else {
            self.name_match(rest, is_dir)
        };

        match (hit, self.negated) {
            (false, _) => None,
            (true, false) => Some(Verdict::Exclude),
            (true, true) => Some(Verdict::Include),
        }
    }

    /// A slash-free pattern matches any segment of the path. A directory-only
    /// pattern does not match the final segment of a file, but still matches
    /// a parent directory of that file.
    fn name_match(&self, path: &[&str], is_dir: bool) -> bool {
        let Some(Segment::Name(matcher)) = self.segments.first() else {
            return false;
        };

        for (i, name) in path.iter().enumerate() {
            if !matcher.is_match(name) {
                continue;
            }
            return !(self.dir_only && !is_dir && i == path.len() - 1);
        }
        false
    }

    /// Segment-by-segment match relative to the domain. Matching a leading
    /// run of the path is enough: a matched directory covers its contents.
    fn anchored_match(&self, mut path: &[&str], is_dir: bool) -> bool {
        let last = self.segments.len() - 1;
        let mut matched = false;
        let mut can_traverse = false;

        for (i, segment) in self.segments.iter().enumerate() {
            let matcher = match segment {
                Segment::Anchor => {
                    can_traverse = false;
                    continue;
                }
                Segment::AnyDirs => {
                    if i == last {
                        break;
                    }
                    can_traverse = true;
                    continue;
                }
                Segment::Never => return false,
                Segment::Name(matcher) => matcher,
            };

            if path.is_empty() {
                return false;
            }

            if can_traverse {
                can_traverse = false;
                while let Some((head, tail)) = path.split_first() {
                    path = tail;
                    if matcher.is_match(head) {
                        matched = true;
                        break;
                    } else if path.is_empty() {
                        matched = false;
                    }
                }
            } else {
                if !matcher.is_match(path[0]) {
                    return false;
                }
                matched = true;
                path = &path[1..];
                // A file cannot satisfy the directory segments that follow.
                if path.is_empty() && i < last {
                    matched = false;
                }
            }
        }

        if matched && self.dir_only && !is_dir && path.is_empty() {
            matched = false;
        }
        matched
    }
}

fn compile_anchored_segment(segment: &str, source: &str) -> Segment {
    match segment {
        "" => Segment::Anchor,
        "**" => Segment::AnyDirs,
        s if s.contains("**") => Segment::Never,
        s => compile_name(s, source),
    }
}

fn compile_name(segment: &str, source: &str) -> Segment {
    match GlobBuilder::new(segment).literal_separator(true).build() {
        Ok(glob) => Segment::Name(glob.compile_matcher()),
        Err(e) => {
            tracing::warn!(pattern = source, error = %e, "gitignore pattern segment never matches");
            Segment::Never
        }
    }
}

/// Within a single segment `**` means the same as `*`.
fn collapse_stars(s: &str) -> String {
    let mut out = s.to_string();
    while out.contains("**") {
        out = out.replace("**", "*");
    }
    out
}

/// An immutable snapshot of an ordered gitignore pattern list.
#[derive(Debug, Clone, Default)]
pub struct GitignoreMatcher {
    patterns: Arc<Vec<GitignorePattern>>,
}

impl GitignoreMatcher {
    pub fn new(patterns: Vec<GitignorePattern>) -> Self {
        Self::from_shared(Arc::new(patterns))
    }

    /// Build a matcher over an already shared pattern list without copying it.
    pub fn from_shared(patterns: Arc<Vec<GitignorePattern>>) -> Self {
        Self { patterns }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True if the last pattern with an opinion on `path` excludes it.
    pub fn is_match<S: AsRef<str>>(&self, path: &[S], is_dir: bool) -> bool {
        let path: Vec<&str> = path.iter().map(|s| s.as_ref()).collect();
        self.patterns
            .iter()
            .rev()
            .find_map(|p| p.matches_segments(&path, is_dir))
            .is_some_and(|v| v == Verdict::Exclude)
    }
}
