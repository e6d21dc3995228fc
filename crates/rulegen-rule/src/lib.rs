//! Rule model and reconciliation for rulegen
//!
//! Generators produce [`Rule`]s; [`merge_rules`] folds each one into an
//! existing rule according to the kind's [`ManagedAttrs`]. [`BuildFile`]
//! holds existing rules in a TOML document and applies merges without
//! disturbing the rest of the file.

pub mod document;
pub mod error;
pub mod managed;
pub mod merge;
pub mod rule;
pub mod value;

pub use document::{
    BuildFile, KIND_KEY, NAME_KEY, RULE_TABLE, ReconcileSummary, RuleId, RuleMut, RuleRef,
};
pub use error::{Error, Result};
pub use managed::{Disposition, KindPolicies, KindPolicy, ManagedAttrs};
pub use merge::{RuleTarget, merge_rules};
pub use rule::Rule;
pub use value::AttrValue;
