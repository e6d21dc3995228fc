//! Per-directory directives.
//!
//! Directives are written as comments in a directory's build file:
//!
//! ```text
//! # rulegen:exclude testdata/**
//! # rulegen:follow third_party/linked
//! # rulegen:ignore
//! # rulegen:gitignore on
//! ```

use std::sync::LazyLock;

use regex::Regex;

/// Matches `# rulegen:<key> <value>` comment lines.
static DIRECTIVE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#\s*rulegen:(\w+)\s*(.*?)\s*$").expect("Invalid directive regex")
});

/// A directive understood by the walk configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Glob pattern, relative to the declaring directory, to skip.
    Exclude(String),
    /// Glob pattern, relative to the declaring directory, of symlinks to traverse.
    Follow(String),
    /// Skip rule generation for this directory only. Takes no argument.
    Ignore(String),
    /// `on` enables gitignore matching for the subtree; anything else disables it.
    Gitignore(String),
}

impl Directive {
    /// Keys of every directive this module understands.
    pub const KNOWN: [&'static str; 4] = ["exclude", "follow", "ignore", "gitignore"];

    /// Build a directive from its key and value. Unknown keys yield `None`.
    pub fn parse(key: &str, value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        match key {
            "exclude" => Some(Self::Exclude(value)),
            "follow" => Some(Self::Follow(value)),
            "ignore" => Some(Self::Ignore(value)),
            "gitignore" => Some(Self::Gitignore(value)),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Exclude(_) => "exclude",
            Self::Follow(_) => "follow",
            Self::Ignore(_) => "ignore",
            Self::Gitignore(_) => "gitignore",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Exclude(v) | Self::Follow(v) | Self::Ignore(v) | Self::Gitignore(v) => v,
        }
    }
}

/// Extract every known directive from build file content, in order.
pub fn parse_directives(content: &str) -> Vec<Directive> {
    content
        .lines()
        .filter_map(|line| {
            let caps = DIRECTIVE_REGEX.captures(line.trim())?;
            let key = caps.get(1)?.as_str();
            let value = caps.get(2).map_or("", |m| m.as_str());
            let directive = Directive::parse(key, value);
            if directive.is_none() {
                tracing::debug!(key, "skipping unknown directive");
            }
            directive
        })
        .collect()
}
