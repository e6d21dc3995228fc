//! Repository configuration from `.rulegen.toml`

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use rulegen_rule::KindPolicies;
use rulegen_walk::{WalkConfig, WalkOptions};
use serde::Deserialize;

use crate::error::{CliError, Result};

/// Config file name, looked up at the repository root.
pub const CONFIG_FILE: &str = ".rulegen.toml";

/// Parsed repository configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Root-relative patterns excluded from every walk
    pub exclude: Vec<String>,

    /// Build file names, in order of preference
    pub build_file_names: Vec<String>,

    /// Merge policy per rule kind
    pub kinds: KindPolicies,
}

impl RepoConfig {
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::config(path, e.to_string()))
    }

    /// Load the config for `repo_root`; a missing file yields the defaults.
    pub fn load(repo_root: &Path) -> Result<Self> {
        let path = repo_root.join(CONFIG_FILE);
        match fs::read_to_string(&path) {
            Ok(content) => {
                tracing::debug!(path = %path.display(), "Loaded repository config");
                Self::parse(&content, &path)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(CliError::config(&path, e.to_string())),
        }
    }

    /// Root walk configuration: config excludes followed by `extra`.
    pub fn root_walk_config(&self, extra: &[String]) -> WalkConfig {
        WalkConfig::new(self.exclude.iter().chain(extra))
    }

    pub fn walk_options(&self) -> WalkOptions {
        if self.build_file_names.is_empty() {
            WalkOptions::default()
        } else {
            WalkOptions {
                build_file_names: self.build_file_names.clone(),
            }
        }
    }
}
