//! Format-preserving build files.
//!
//! A build file is a TOML document whose `[[rule]]` tables are rules. Edits
//! go through [`toml_edit`], so comments and formatting of anything a merge
//! does not touch are printed back unchanged.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use toml_edit::{ArrayOfTables, DocumentMut, Item, Table, value};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::managed::KindPolicies;
use crate::merge::{RuleTarget, merge_rules};
use crate::rule::Rule;
use crate::value::AttrValue;

/// Key of the top-level array of rule tables.
pub const RULE_TABLE: &str = "rule";
/// Reserved key holding a rule's kind.
pub const KIND_KEY: &str = "kind";
/// Reserved key holding a rule's name.
pub const NAME_KEY: &str = "name";

fn is_reserved(key: &str) -> bool {
    key == KIND_KEY || key == NAME_KEY
}

/// Identity of a rule within a build file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId {
    pub kind: String,
    pub name: String,
}

impl RuleId {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }

    fn of(table: &Table) -> Option<Self> {
        let kind = table.get(KIND_KEY)?.as_str()?;
        let name = table.get(NAME_KEY)?.as_str()?;
        Some(Self::new(kind, name))
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.name)
    }
}

/// Counts of what [`BuildFile::reconcile`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub merged: usize,
    pub inserted: usize,
}

type PrivateAttrs = BTreeMap<String, serde_json::Value>;

/// A parsed build file.
#[derive(Debug, Clone, Default)]
pub struct BuildFile {
    doc: DocumentMut,
    private: HashMap<RuleId, PrivateAttrs>,
}

impl BuildFile {
    /// An empty build file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse build file text.
    ///
    /// Every rule table needs string `kind` and `name` keys, and no two
    /// rules may share both.
    pub fn parse(source: &str) -> Result<Self> {
        let doc: DocumentMut = source
            .parse()
            .map_err(|e: toml_edit::TomlError| Error::parse(e.to_string()))?;

        if let Some(item) = doc.get(RULE_TABLE) {
            let tables = item.as_array_of_tables().ok_or(Error::NotARuleList)?;
            let mut seen = HashSet::new();
            for (index, table) in tables.iter().enumerate() {
                for key in [KIND_KEY, NAME_KEY] {
                    if table.get(key).and_then(Item::as_str).is_none() {
                        return Err(Error::malformed(
                            index,
                            format!("missing string `{key}`"),
                        ));
                    }
                }
                if let Some(id) = RuleId::of(table) {
                    if !seen.insert(id.clone()) {
                        return Err(Error::malformed(index, format!("duplicate rule {id}")));
                    }
                }
            }
        }

        Ok(Self {
            doc,
            private: HashMap::new(),
        })
    }

    /// Read and parse a build file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&source)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.doc.to_string()).map_err(|e| Error::io(path, e))
    }

    fn rule_tables(&self) -> Option<&ArrayOfTables> {
        self.doc.get(RULE_TABLE)?.as_array_of_tables()
    }

    /// Rule identities in file order.
    pub fn rules(&self) -> Vec<RuleId> {
        self.rule_tables()
            .map(|tables| tables.iter().filter_map(RuleId::of).collect())
            .unwrap_or_default()
    }

    pub fn rule(&self, kind: &str, name: &str) -> Option<RuleRef<'_>> {
        let table = self
            .rule_tables()?
            .iter()
            .find(|t| is_rule(t, kind, name))?;
        Some(RuleRef {
            table,
            private: self.private.get(&RuleId::new(kind, name)),
        })
    }

    pub fn rule_mut(&mut self, kind: &str, name: &str) -> Option<RuleMut<'_>> {
        let table = self
            .doc
            .get_mut(RULE_TABLE)?
            .as_array_of_tables_mut()?
            .iter_mut()
            .find(|t| is_rule(t, kind, name))?;
        let private = self.private.entry(RuleId::new(kind, name)).or_default();
        Some(RuleMut { table, private })
    }

    /// Append an empty rule table. The caller is responsible for not
    /// inserting a rule that already exists.
    pub fn insert_rule(&mut self, kind: &str, name: &str) -> Result<RuleMut<'_>> {
        let spaced = !self.doc.as_table().is_empty();
        let tables = self
            .doc
            .entry(RULE_TABLE)
            .or_insert(Item::ArrayOfTables(ArrayOfTables::new()))
            .as_array_of_tables_mut()
            .ok_or(Error::NotARuleList)?;

        let mut table = Table::new();
        if spaced {
            table.decor_mut().set_prefix("\n");
        }
        table.insert(KIND_KEY, value(kind));
        table.insert(NAME_KEY, value(name));
        tables.push(table);
        debug!(kind, name, "Inserted rule");

        let index = tables.len() - 1;
        let table = tables.get_mut(index).ok_or(Error::NotARuleList)?;
        let private = self.private.entry(RuleId::new(kind, name)).or_default();
        Ok(RuleMut { table, private })
    }

    /// Read every rule as a generated rule. String arrays become sorted
    /// lists unless `policies` marks the attribute unsorted for the kind.
    pub fn generated_rules(&self, policies: &KindPolicies) -> Vec<Rule> {
        let Some(tables) = self.rule_tables() else {
            return Vec::new();
        };

        tables
            .iter()
            .filter_map(|table| {
                let id = RuleId::of(table)?;
                let mut rule = Rule::new(&id.kind, &id.name);
                for (key, item) in table.iter() {
                    if is_reserved(key) {
                        continue;
                    }
                    match item.as_value() {
                        Some(v) => {
                            let unsorted = policies.is_unsorted(&id.kind, key);
                            rule.set_attr(key, AttrValue::from_toml(v, unsorted));
                        }
                        None => warn!(rule = %id, attr = key, "Skipping non-value attribute"),
                    }
                }
                if let Some(private) = self.private.get(&id) {
                    for (key, v) in private {
                        rule.set_private_attr(key.clone(), v.clone());
                    }
                }
                Some(rule)
            })
            .collect()
    }

    /// Merge generated rules into this file.
    ///
    /// Each rule is merged into the existing rule with the same kind and
    /// name; rules with no counterpart are appended.
    pub fn reconcile(
        &mut self,
        generated: &[Rule],
        policies: &KindPolicies,
    ) -> Result<ReconcileSummary> {
        let mut summary = ReconcileSummary::default();

        for rule in generated {
            let managed = policies.managed_attrs(rule.kind());

            if let Some(mut existing) = self.rule_mut(rule.kind(), rule.name()) {
                merge_rules(rule, &mut existing, &managed, rule.kind());
                summary.merged += 1;
                continue;
            }

            let mut inserted = self.insert_rule(rule.kind(), rule.name())?;
            merge_rules(rule, &mut inserted, &managed, rule.kind());
            summary.inserted += 1;
        }

        debug!(
            merged = summary.merged,
            inserted = summary.inserted,
            "Reconciled build file"
        );
        Ok(summary)
    }
}

impl fmt::Display for BuildFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.doc)
    }
}

fn is_rule(table: &Table, kind: &str, name: &str) -> bool {
    table.get(KIND_KEY).and_then(Item::as_str) == Some(kind)
        && table.get(NAME_KEY).and_then(Item::as_str) == Some(name)
}

fn read_attr<'a>(table: &'a Table, key: &str) -> Option<&'a Item> {
    if is_reserved(key) {
        return None;
    }
    table.get(key)
}

fn string_list(item: &Item) -> Option<Vec<String>> {
    AttrValue::from_toml(item.as_value()?, true)
        .as_strings()
        .map(<[String]>::to_vec)
}

fn attr_names(table: &Table) -> Vec<&str> {
    table
        .iter()
        .map(|(k, _)| k)
        .filter(|k| !is_reserved(k))
        .collect()
}

/// Read access to a rule in a [`BuildFile`].
#[derive(Debug, Clone, Copy)]
pub struct RuleRef<'a> {
    table: &'a Table,
    private: Option<&'a PrivateAttrs>,
}

impl<'a> RuleRef<'a> {
    pub fn kind(&self) -> &'a str {
        self.table.get(KIND_KEY).and_then(Item::as_str).unwrap_or_default()
    }

    pub fn name(&self) -> &'a str {
        self.table.get(NAME_KEY).and_then(Item::as_str).unwrap_or_default()
    }

    pub fn attr(&self, key: &str) -> Option<&'a Item> {
        read_attr(self.table, key)
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attr(key).is_some()
    }

    /// The attribute read as an unsorted value.
    pub fn attr_value(&self, key: &str) -> Option<AttrValue> {
        Some(AttrValue::from_toml(self.attr(key)?.as_value()?, true))
    }

    pub fn string(&self, key: &str) -> Option<&'a str> {
        self.attr(key)?.as_str()
    }

    pub fn string_list(&self, key: &str) -> Option<Vec<String>> {
        string_list(self.attr(key)?)
    }

    pub fn attr_names(&self) -> Vec<&'a str> {
        attr_names(self.table)
    }

    pub fn private_attr(&self, key: &str) -> Option<&'a serde_json::Value> {
        self.private?.get(key)
    }
}

/// Write access to a rule in a [`BuildFile`].
#[derive(Debug)]
pub struct RuleMut<'a> {
    table: &'a mut Table,
    private: &'a mut PrivateAttrs,
}

impl RuleMut<'_> {
    /// Read access to the same rule.
    pub fn view(&self) -> RuleRef<'_> {
        RuleRef {
            table: &*self.table,
            private: Some(&*self.private),
        }
    }
}

impl RuleTarget for RuleMut<'_> {
    fn set_attr(&mut self, key: &str, value: AttrValue) {
        if is_reserved(key) {
            warn!(attr = key, "Refusing to set reserved key");
            return;
        }

        let mut node = value.to_toml();
        match self.table.get_mut(key) {
            Some(item) => {
                if let Some(old) = item.as_value() {
                    *node.decor_mut() = old.decor().clone();
                }
                *item = Item::Value(node);
            }
            None => {
                self.table.insert(key, Item::Value(node));
            }
        }
    }

    fn del_attr(&mut self, key: &str) {
        if is_reserved(key) {
            warn!(attr = key, "Refusing to delete reserved key");
            return;
        }
        self.table.remove(key);
    }

    fn set_private_attr(&mut self, key: &str, value: serde_json::Value) {
        self.private.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_are_listed_in_file_order() {
        let file = BuildFile::parse(
            "[[rule]]\nkind = \"b\"\nname = \"x\"\n\n[[rule]]\nkind = \"a\"\nname = \"y\"\n",
        )
        .unwrap();
        assert_eq!(file.rules(), vec![RuleId::new("b", "x"), RuleId::new("a", "y")]);
    }

    #[test]
    fn reserved_keys_are_not_attributes() {
        let mut file = BuildFile::parse("[[rule]]\nkind = \"k\"\nname = \"n\"\n").unwrap();
        let mut rule = file.rule_mut("k", "n").unwrap();
        rule.set_attr(KIND_KEY, AttrValue::from("other"));
        rule.del_attr(NAME_KEY);

        let rule = file.rule("k", "n").unwrap();
        assert!(rule.attr(KIND_KEY).is_none());
        assert!(rule.attr_names().is_empty());
    }

    #[test]
    fn rule_table_must_be_an_array() {
        let err = BuildFile::parse("[rule]\nkind = \"k\"\n").unwrap_err();
        assert!(matches!(err, Error::NotARuleList));
    }
}
