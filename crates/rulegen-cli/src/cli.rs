//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// rulegen - walk a source tree and reconcile generated build rules
#[derive(Parser, Debug)]
#[command(name = "rulegen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Repository root (defaults to the current directory)
    #[arg(long, global = true, env = "RULEGEN_REPO_ROOT", value_name = "DIR")]
    pub repo_root: Option<PathBuf>,

    /// Exclude a root-relative glob pattern from the walk (repeatable)
    #[arg(long = "exclude", global = true, value_name = "PATTERN")]
    pub excludes: Vec<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Walk the repository and list every visited directory
    ///
    /// Directories are listed children first, the way rules are generated.
    ///
    /// Examples:
    ///   rulegen walk                      # Human-readable listing
    ///   rulegen walk --json               # Machine-readable listing
    ///   rulegen walk --exclude 'docs/**'  # Skip a subtree
    Walk {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Merge generated rules into an existing build file
    ///
    /// Attributes listed as mergeable for a rule's kind are made to match
    /// the generated rule; protected attributes are left alone.
    ///
    /// Examples:
    ///   rulegen merge --generated gen.toml --existing BUILD.toml
    ///   rulegen merge --generated gen.toml --existing BUILD.toml --mergeable srcs --write
    Merge {
        /// Build file holding the generated rules
        #[arg(long, value_name = "FILE")]
        generated: PathBuf,

        /// Build file to merge into (treated as empty if missing)
        #[arg(long, value_name = "FILE")]
        existing: PathBuf,

        /// Mark an attribute mergeable for every kind (repeatable)
        #[arg(long = "mergeable", value_name = "ATTR")]
        mergeable: Vec<String>,

        /// Mark an attribute protected for every kind (repeatable)
        #[arg(long = "protect", value_name = "ATTR")]
        protect: Vec<String>,

        /// Write the result back instead of printing it
        #[arg(long)]
        write: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_no_args() {
        let cli = Cli::parse_from(["rulegen"]);
        assert!(!cli.verbose);
        assert!(cli.excludes.is_empty());
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_walk_with_global_options() {
        let cli = Cli::parse_from([
            "rulegen",
            "walk",
            "--json",
            "-v",
            "--exclude",
            "docs",
            "--exclude",
            "**/*.bak",
            "--repo-root",
            "/tmp/repo",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.excludes, vec!["docs", "**/*.bak"]);
        assert_eq!(cli.repo_root, Some(PathBuf::from("/tmp/repo")));
        assert_eq!(cli.command, Some(Commands::Walk { json: true }));
    }

    #[test]
    fn parse_merge_command() {
        let cli = Cli::parse_from([
            "rulegen",
            "merge",
            "--generated",
            "gen.toml",
            "--existing",
            "BUILD.toml",
            "--mergeable",
            "srcs",
            "--mergeable",
            "deps",
            "--protect",
            "visibility",
        ]);
        match cli.command {
            Some(Commands::Merge {
                generated,
                existing,
                mergeable,
                protect,
                write,
            }) => {
                assert_eq!(generated, PathBuf::from("gen.toml"));
                assert_eq!(existing, PathBuf::from("BUILD.toml"));
                assert_eq!(mergeable, vec!["srcs", "deps"]);
                assert_eq!(protect, vec!["visibility"]);
                assert!(!write);
            }
            _ => panic!("Expected Merge command"),
        }
    }

    #[test]
    fn merge_requires_both_files() {
        assert!(Cli::try_parse_from(["rulegen", "merge", "--generated", "gen.toml"]).is_err());
    }
}
