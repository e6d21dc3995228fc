//! Command implementations for rulegen-cli

pub mod merge;
pub mod walk;

pub use merge::{MergeArgs, run_merge};
pub use walk::run_walk;
