//! Merging a generated rule into an existing one.

use tracing::trace;

use crate::managed::{Disposition, ManagedAttrs};
use crate::rule::Rule;
use crate::value::AttrValue;

/// Something a generated rule can be merged into.
pub trait RuleTarget {
    fn set_attr(&mut self, key: &str, value: AttrValue);
    fn del_attr(&mut self, key: &str);
    fn set_private_attr(&mut self, key: &str, value: serde_json::Value);
}

impl RuleTarget for Rule {
    fn set_attr(&mut self, key: &str, value: AttrValue) {
        Rule::set_attr(self, key, value);
    }

    fn del_attr(&mut self, key: &str) {
        Rule::del_attr(self, key);
    }

    fn set_private_attr(&mut self, key: &str, value: serde_json::Value) {
        Rule::set_private_attr(self, key, value);
    }
}

/// Merge `generated` into `existing`.
///
/// Mergeable attributes are made to match the generated rule, including
/// removal when the generator produced no value. Unspecified attributes are
/// set when generated and left alone otherwise. Protected attributes are
/// never touched. Private attributes are copied over, replacing any value
/// already present under the same key.
///
/// Attributes new to `existing` are added in the generated rule's order.
pub fn merge_rules<T: RuleTarget + ?Sized>(
    generated: &Rule,
    existing: &mut T,
    managed: &ManagedAttrs,
    kind: &str,
) {
    let _span = tracing::debug_span!("merge_rules", kind, name = generated.name()).entered();

    for (name, value) in generated.attrs() {
        match managed.disposition(name) {
            None | Some(Disposition::Mergeable) => assign(existing, name, value),
            Some(Disposition::Protected) => {
                trace!(attr = name, "Leaving protected attribute unchanged");
            }
        }
    }

    for name in managed.mergeable_names() {
        if generated.attr(name).is_none() {
            trace!(attr = name, "Retracting attribute absent from generated rule");
            existing.del_attr(name);
        }
    }

    for (key, value) in generated.private_attrs() {
        existing.set_private_attr(key, value.clone());
    }
}

fn assign<T: RuleTarget + ?Sized>(existing: &mut T, name: &str, value: &AttrValue) {
    match value.normalized() {
        Some(value) => existing.set_attr(name, value),
        None => existing.del_attr(name),
    }
}
