//! Walk command implementation
//!
//! Lists every directory the walker would hand to a generator.

use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use rulegen_walk::{FlatIgnore, walk};

use crate::config::RepoConfig;
use crate::error::Result;

/// One visited directory, as reported by `rulegen walk`.
#[derive(Debug, Serialize)]
struct VisitedDir {
    dir: String,
    build_file: Option<String>,
    files: Vec<String>,
    subdirs: Vec<String>,
}

/// Run the walk command
pub fn run_walk(repo_root: &Path, config: &RepoConfig, excludes: &[String], json: bool) -> Result<()> {
    let root = config.root_walk_config(excludes);
    let flat = FlatIgnore::load(repo_root)?;
    let options = config.walk_options();

    let mut dirs = Vec::new();
    walk(repo_root, &root, &flat, &options, |visit| {
        dirs.push(VisitedDir {
            dir: display_rel(visit.rel),
            build_file: visit
                .build_file
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned()),
            files: visit.files.to_vec(),
            subdirs: visit.subdirs.to_vec(),
        });
        Ok(())
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dirs)?);
    } else {
        print_dirs(&dirs);
    }

    Ok(())
}

fn display_rel(rel: &str) -> String {
    if rel.is_empty() {
        ".".to_string()
    } else {
        rel.to_string()
    }
}

fn print_dirs(dirs: &[VisitedDir]) {
    for dir in dirs {
        match &dir.build_file {
            Some(build_file) => println!("{} ({})", dir.dir.bold(), build_file.cyan()),
            None => println!("{}", dir.dir.bold()),
        }
        for file in &dir.files {
            println!("  {}", file);
        }
    }

    println!();
    println!("{} {} directories visited.", "Total:".dimmed(), dirs.len());
}
