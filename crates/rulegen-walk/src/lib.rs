//! Hierarchical walk configuration for rulegen
//!
//! Decides which directories and files take part in generation:
//!
//! - [`WalkConfig`]: per-directory exclude/follow/ignore/gitignore state,
//!   derived from the parent directory's configuration.
//! - [`Directive`]: the directives a build file can declare.
//! - [`FlatIgnore`]: the repository-wide `.rulegenignore` list.
//! - [`walk`]: a depth-first traversal that consults all of the above.

pub mod config;
pub mod directive;
pub mod error;
pub mod flat_ignore;
pub mod walker;

pub use config::WalkConfig;
pub use directive::{Directive, parse_directives};
pub use error::{Error, Result};
pub use flat_ignore::{FLAT_IGNORE_FILE, FlatIgnore};
pub use walker::{DEFAULT_BUILD_FILE, GITIGNORE_FILE, Visit, WalkOptions, walk};
