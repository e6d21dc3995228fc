//! In-memory rules produced by generators.

use std::collections::BTreeMap;

use crate::value::AttrValue;

/// A named build target of a given kind.
///
/// Attributes keep insertion order so a rule renders the way the generator
/// built it. Private attributes are never written to a build file; they
/// carry generator metadata from one pass to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    kind: String,
    name: String,
    attrs: Vec<(String, AttrValue)>,
    private: BTreeMap<String, serde_json::Value>,
}

impl Rule {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            attrs: Vec::new(),
            private: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// The strings of a list attribute.
    pub fn string_list(&self, key: &str) -> Option<&[String]> {
        self.attr(key)?.as_strings()
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn attr_names(&self) -> impl Iterator<Item = &str> {
        self.attrs.iter().map(|(k, _)| k.as_str())
    }

    /// Set an attribute, replacing any previous value in place.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.attrs.push((key, value)),
        }
    }

    pub fn del_attr(&mut self, key: &str) -> Option<AttrValue> {
        let index = self.attrs.iter().position(|(k, _)| k == key)?;
        Some(self.attrs.remove(index).1)
    }

    pub fn private_attr(&self, key: &str) -> Option<&serde_json::Value> {
        self.private.get(key)
    }

    pub fn private_attrs(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.private.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn set_private_attr(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.private.insert(key.into(), value.into());
    }
}
