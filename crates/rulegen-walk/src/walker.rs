//! Depth-first directory traversal driven by [`WalkConfig`].
//!
//! The walker owns the filesystem side of a generation run: it reads each
//! directory, derives that directory's configuration from its parent, prunes
//! entries the configuration hides and reports every remaining directory to a
//! visitor. Subdirectories are visited before their parent. A followed
//! symlink that resolves to a directory already on the current descent is
//! skipped, so link cycles terminate.

use std::fs;
use std::path::{Path, PathBuf};

use rulegen_match::path::join;

use crate::config::WalkConfig;
use crate::directive::parse_directives;
use crate::flat_ignore::FlatIgnore;
use crate::{Error, Result};

/// Build file name used when none is configured.
pub const DEFAULT_BUILD_FILE: &str = "BUILD.toml";

/// Per-directory gitignore file name.
pub const GITIGNORE_FILE: &str = ".gitignore";

#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Build file names to look for, in order of preference.
    pub build_file_names: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            build_file_names: vec![DEFAULT_BUILD_FILE.to_string()],
        }
    }
}

/// A directory reported to the visitor.
#[derive(Debug)]
pub struct Visit<'a> {
    /// Path relative to the repository root; `""` for the root.
    pub rel: &'a str,
    /// Absolute (or root-joined) path of the directory.
    pub dir: &'a Path,
    /// Configuration in effect for this directory.
    pub config: &'a WalkConfig,
    /// The directory's build file, if it has one.
    pub build_file: Option<&'a Path>,
    /// Names of visible non-directory entries, sorted.
    pub files: &'a [String],
    /// Names of subdirectories that were descended into, sorted.
    pub subdirs: &'a [String],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Dir,
    SymlinkDir,
    File,
}

#[derive(Debug)]
struct Entry {
    name: String,
    kind: EntryKind,
}

/// Walk the repository rooted at `repo_root`.
///
/// `root` is the configuration in effect above the root directory; the
/// root's own directives are applied on top of it. The visitor is not called
/// for directories whose configuration sets `ignore`, but their
/// subdirectories are still walked.
pub fn walk<F>(
    repo_root: &Path,
    root: &WalkConfig,
    flat_ignore: &FlatIgnore,
    options: &WalkOptions,
    mut visit: F,
) -> Result<()>
where
    F: FnMut(&Visit<'_>) -> Result<()>,
{
    let real_root = fs::canonicalize(repo_root).map_err(|e| Error::io(repo_root, e))?;
    let mut walker = Walker {
        repo_root,
        flat_ignore,
        options,
        visit: &mut visit,
        ancestors: Vec::new(),
    };
    walker.walk_dir("", real_root, root)
}

struct Walker<'a, F> {
    repo_root: &'a Path,
    flat_ignore: &'a FlatIgnore,
    options: &'a WalkOptions,
    visit: &'a mut F,
    /// Resolved paths of the directories currently being walked, outermost first.
    ancestors: Vec<PathBuf>,
}

impl<F> Walker<'_, F>
where
    F: FnMut(&Visit<'_>) -> Result<()>,
{
    fn walk_dir(&mut self, rel: &str, real: PathBuf, parent: &WalkConfig) -> Result<()> {
        let dir = if rel.is_empty() {
            self.repo_root.to_path_buf()
        } else {
            self.repo_root.join(rel)
        };
        let entries = read_entries(&dir)?;

        let build_file = self.find_build_file(&dir, &entries);
        let directives = match &build_file {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
                parse_directives(&content)
            }
            None => Vec::new(),
        };

        let mut config = parent.configure(rel, &directives);
        if entries
            .iter()
            .any(|e| e.name == GITIGNORE_FILE && e.kind == EntryKind::File)
        {
            config.load_gitignore_file(rel, &dir.join(GITIGNORE_FILE))?;
        }

        let mut files = Vec::new();
        let mut subdirs = Vec::new();
        self.ancestors.push(real);

        for entry in entries {
            let entry_rel = join(rel, &entry.name);
            let is_dir = entry.kind != EntryKind::File;

            if self.flat_ignore.is_ignored(&entry_rel)
                || config.is_excluded(&entry_rel)
                || config.is_git_ignored_path(&entry_rel, is_dir)
            {
                tracing::debug!(path = %entry_rel, "skipping");
                continue;
            }

            match entry.kind {
                EntryKind::File => files.push(entry.name),
                EntryKind::SymlinkDir if !config.should_follow(&entry_rel) => {
                    tracing::debug!(path = %entry_rel, "not following symlink");
                }
                EntryKind::Dir => {
                    let real = self.current().join(&entry.name);
                    self.walk_dir(&entry_rel, real, &config)?;
                    subdirs.push(entry.name);
                }
                EntryKind::SymlinkDir => {
                    let link = dir.join(&entry.name);
                    let real = fs::canonicalize(&link).map_err(|e| Error::io(&link, e))?;
                    if self.ancestors.contains(&real) {
                        tracing::warn!(
                            path = %entry_rel,
                            target = %real.display(),
                            "symlink loops back to an enclosing directory; not following"
                        );
                        continue;
                    }
                    self.walk_dir(&entry_rel, real, &config)?;
                    subdirs.push(entry.name);
                }
            }
        }
        self.ancestors.pop();

        if config.ignore() {
            tracing::debug!(dir = %rel, "ignore directive set; not generating");
            return Ok(());
        }

        (self.visit)(&Visit {
            rel,
            dir: &dir,
            config: &config,
            build_file: build_file.as_deref(),
            files: &files,
            subdirs: &subdirs,
        })
    }

    fn current(&self) -> &Path {
        self.ancestors.last().map_or(self.repo_root, PathBuf::as_path)
    }

    fn find_build_file(&self, dir: &Path, entries: &[Entry]) -> Option<PathBuf> {
        self.options.build_file_names.iter().find_map(|name| {
            entries
                .iter()
                .any(|e| &e.name == name && e.kind == EntryKind::File)
                .then(|| dir.join(name))
        })
    }
}

fn read_entries(dir: &Path) -> Result<Vec<Entry>> {
    let read_dir = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut entries = Vec::new();

    for entry in read_dir {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| Error::io(&path, e))?;

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::warn!(?path, "skipping entry with a non UTF-8 name");
            continue;
        };

        let kind = if file_type.is_dir() {
            EntryKind::Dir
        } else if file_type.is_symlink() {
            match fs::metadata(&path) {
                Ok(meta) if meta.is_dir() => EntryKind::SymlinkDir,
                Ok(_) => EntryKind::File,
                Err(e) => {
                    tracing::debug!(?path, error = %e, "skipping broken symlink");
                    continue;
                }
            }
        } else {
            EntryKind::File
        };

        entries.push(Entry { name, kind });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
