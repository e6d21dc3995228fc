//! Which attributes the generator owns, per rule kind.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

/// How an attribute named by a kind is treated during a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The generator owns it: set or removed to match the generated rule.
    Mergeable,
    /// The user owns it: never touched.
    Protected,
}

impl From<bool> for Disposition {
    fn from(mergeable: bool) -> Self {
        if mergeable {
            Self::Mergeable
        } else {
            Self::Protected
        }
    }
}

/// Attribute dispositions for a single rule kind.
///
/// Attributes not listed are unspecified: the generator sets them when it
/// has a value and otherwise leaves them alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagedAttrs {
    entries: BTreeMap<String, Disposition>,
}

impl ManagedAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, disposition: Disposition) {
        self.entries.insert(name.into(), disposition);
    }

    pub fn disposition(&self, name: &str) -> Option<Disposition> {
        self.entries.get(name).copied()
    }

    pub fn mergeable_names(&self) -> impl Iterator<Item = &str> {
        self.names(Disposition::Mergeable)
    }

    pub fn protected_names(&self) -> impl Iterator<Item = &str> {
        self.names(Disposition::Protected)
    }

    fn names(&self, wanted: Disposition) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |(_, d)| **d == wanted)
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, D: Into<Disposition>> FromIterator<(K, D)> for ManagedAttrs {
    fn from_iter<I: IntoIterator<Item = (K, D)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        attrs.extend(iter);
        attrs
    }
}

impl<K: Into<String>, D: Into<Disposition>> Extend<(K, D)> for ManagedAttrs {
    fn extend<I: IntoIterator<Item = (K, D)>>(&mut self, iter: I) {
        for (name, disposition) in iter {
            self.insert(name, disposition.into());
        }
    }
}

/// Merge policy for one rule kind, as written in configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KindPolicy {
    /// Attributes the generator owns.
    pub mergeable: Vec<String>,
    /// Attributes the generator must never change.
    pub protected: Vec<String>,
    /// String-list attributes whose order is significant.
    pub unsorted: Vec<String>,
}

impl KindPolicy {
    /// An attribute listed as both mergeable and protected is protected.
    pub fn managed_attrs(&self) -> ManagedAttrs {
        let mut attrs = ManagedAttrs::new();
        for name in &self.mergeable {
            attrs.insert(name.clone(), Disposition::Mergeable);
        }
        for name in &self.protected {
            attrs.insert(name.clone(), Disposition::Protected);
        }
        attrs
    }
}

/// Merge policies keyed by rule kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct KindPolicies(HashMap<String, KindPolicy>);

impl KindPolicies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: impl Into<String>, policy: KindPolicy) {
        self.0.insert(kind.into(), policy);
    }

    pub fn get(&self, kind: &str) -> Option<&KindPolicy> {
        self.0.get(kind)
    }

    /// Get the policy for `kind`, creating an empty one if needed.
    pub fn entry(&mut self, kind: impl Into<String>) -> &mut KindPolicy {
        self.0.entry(kind.into()).or_default()
    }

    /// Managed attributes for `kind`; empty for kinds with no policy.
    pub fn managed_attrs(&self, kind: &str) -> ManagedAttrs {
        self.get(kind).map(KindPolicy::managed_attrs).unwrap_or_default()
    }

    pub fn is_unsorted(&self, kind: &str, attr: &str) -> bool {
        self.get(kind)
            .is_some_and(|policy| policy.unsorted.iter().any(|a| a == attr))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
