//! rulegen CLI
//!
//! Walks a source tree the way a build-rule generator does and reconciles
//! generated rules into hand-maintained build files.

mod cli;
mod commands;
mod config;
mod error;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use config::RepoConfig;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        println!("{} build rule generator", "rulegen".green().bold());
        println!();
        println!("Run {} for available commands.", "rulegen --help".cyan());
        return Ok(());
    };

    let repo_root = resolve_root(cli.repo_root)?;
    let config = RepoConfig::load(&repo_root)?;
    tracing::debug!(root = %repo_root.display(), "Using repository root");

    match command {
        Commands::Walk { json } => commands::run_walk(&repo_root, &config, &cli.excludes, json),
        Commands::Merge {
            generated,
            existing,
            mergeable,
            protect,
            write,
        } => commands::run_merge(
            &config,
            &commands::MergeArgs {
                generated: &generated,
                existing: &existing,
                mergeable: &mergeable,
                protect: &protect,
                write,
            },
        ),
    }
}

/// Logs go to stderr: warnings by default, debug output with `--verbose`.
fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");
}

fn resolve_root(repo_root: Option<PathBuf>) -> Result<PathBuf> {
    let root = match repo_root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    if !root.is_dir() {
        return Err(CliError::user(format!(
            "repository root {} is not a directory",
            root.display()
        )));
    }
    Ok(root)
}
