//! Path matching for rulegen
//!
//! Two independent matching families used by the walk configuration:
//!
//! - [`glob`]: shell-style globs with `**` support, used for `exclude` and
//!   `follow` patterns. Patterns are compiled (and therefore validated) when
//!   they are registered.
//! - [`gitignore`]: ordered, domain-scoped gitignore patterns where the last
//!   matching pattern decides and `!` re-includes.
//!
//! All paths are repository-relative and use forward slashes; see [`path`].

pub mod error;
pub mod gitignore;
pub mod glob;
pub mod path;

pub use error::{Error, Result};
pub use gitignore::{GitignoreMatcher, GitignorePattern, Verdict};
pub use glob::{GlobPattern, contains_glob_meta, match_any};
