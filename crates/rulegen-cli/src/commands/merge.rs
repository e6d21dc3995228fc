//! Merge command implementation
//!
//! Reconciles generated rules into an existing build file.

use std::io::ErrorKind;
use std::path::Path;

use colored::Colorize;

use rulegen_rule::{BuildFile, KindPolicies};

use crate::config::RepoConfig;
use crate::error::{CliError, Result};

/// Arguments of the merge command
#[derive(Debug)]
pub struct MergeArgs<'a> {
    pub generated: &'a Path,
    pub existing: &'a Path,
    pub mergeable: &'a [String],
    pub protect: &'a [String],
    pub write: bool,
}

/// Run the merge command
pub fn run_merge(config: &RepoConfig, args: &MergeArgs<'_>) -> Result<()> {
    if let Some(attr) = args.mergeable.iter().find(|a| args.protect.contains(a)) {
        return Err(CliError::user(format!(
            "attribute `{attr}` cannot be both mergeable and protected"
        )));
    }

    let generated_file = BuildFile::load(args.generated)?;
    let mut policies = config.kinds.clone();
    let generated = generated_file.generated_rules(&policies);
    extend_policies(&mut policies, generated.iter().map(|r| r.kind()), args);

    let mut existing = match BuildFile::load(args.existing) {
        Ok(file) => file,
        Err(rulegen_rule::Error::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %args.existing.display(), "Existing build file missing, starting empty");
            BuildFile::new()
        }
        Err(e) => return Err(e.into()),
    };

    let summary = existing.reconcile(&generated, &policies)?;

    if args.write {
        existing.save(args.existing)?;
        println!(
            "{} Merged {} rule(s) and inserted {} into {}",
            "OK".green().bold(),
            summary.merged,
            summary.inserted,
            args.existing.display()
        );
    } else {
        print!("{existing}");
    }

    Ok(())
}

/// Apply the flag-supplied dispositions to every generated kind.
fn extend_policies<'k>(
    policies: &mut KindPolicies,
    kinds: impl Iterator<Item = &'k str>,
    args: &MergeArgs<'_>,
) {
    for kind in kinds {
        let policy = policies.entry(kind);
        for attr in args.mergeable {
            if !policy.mergeable.contains(attr) {
                policy.mergeable.push(attr.clone());
            }
        }
        for attr in args.protect {
            if !policy.protected.contains(attr) {
                policy.protected.push(attr.clone());
            }
        }
    }
}
