//! Repository-wide list of ignored paths.
//!
//! `.rulegenignore` at the repository root lists literal, root-relative
//! paths, one per line. It has no glob support and no inheritance: a path
//! is ignored only if it appears in the file exactly (after cleaning).

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use rulegen_match::contains_glob_meta;
use rulegen_match::path::clean;

use crate::{Error, Result};

/// Name of the ignore file, relative to the repository root.
pub const FLAT_IGNORE_FILE: &str = ".rulegenignore";

#[derive(Debug, Clone, Default)]
pub struct FlatIgnore {
    paths: HashSet<String>,
}

impl FlatIgnore {
    /// A list that ignores nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load `.rulegenignore` from the repository root.
    ///
    /// A missing file is not an error and yields an empty list. A file that
    /// exists but cannot be read is.
    pub fn load(repo_root: &Path) -> Result<Self> {
        let path = repo_root.join(FLAT_IGNORE_FILE);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(?path, "no ignore file");
                return Ok(Self::empty());
            }
            Err(source) => return Err(Error::IgnoreFile { path, source }),
        };

        Self::from_reader(BufReader::new(file)).map_err(|source| Error::IgnoreFile { path, source })
    }

    /// Parse ignore file content.
    pub fn from_reader(reader: impl BufRead) -> std::io::Result<Self> {
        let mut paths = HashSet::new();

        for line in reader.lines() {
            let line = line?;
            let entry = line.trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            if contains_glob_meta(entry) {
                tracing::warn!(
                    "the {FLAT_IGNORE_FILE} exclusion pattern must not be a glob {entry}"
                );
                continue;
            }
            paths.insert(clean(entry));
        }

        Ok(Self { paths })
    }

    /// Exact membership test for a cleaned, root-relative path.
    pub fn is_ignored(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
