//! Merge behaviour over in-memory rules

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use rulegen_rule::{AttrValue, ManagedAttrs, Rule, merge_rules};

fn library() -> Rule {
    Rule::new("rust_library", "core")
}

fn managed(pairs: &[(&str, bool)]) -> ManagedAttrs {
    pairs.iter().copied().collect()
}

fn strings(rule: &Rule, key: &str) -> Vec<String> {
    rule.string_list(key).unwrap_or_default().to_vec()
}

#[test]
fn private_attributes_are_copied_with_no_managed_attrs() {
    let mut generated = library();
    generated.set_private_attr("_crate_root", "src/lib.rs");
    let mut existing = library();

    merge_rules(&generated, &mut existing, &ManagedAttrs::new(), "");

    assert_eq!(
        existing.private_attr("_crate_root"),
        Some(&serde_json::json!("src/lib.rs"))
    );
}

#[test]
fn private_attributes_overwrite_and_keep_existing_keys() {
    let mut generated = library();
    generated.set_private_attr("_shared", 2);
    let mut existing = library();
    existing.set_private_attr("_shared", 1);
    existing.set_private_attr("_only_here", true);

    merge_rules(&generated, &mut existing, &ManagedAttrs::new(), "rust_library");

    assert_eq!(existing.private_attr("_shared"), Some(&serde_json::json!(2)));
    assert_eq!(existing.private_attr("_only_here"), Some(&serde_json::json!(true)));
}

#[rstest]
#[case::into_empty_rule(None)]
#[case::into_existing_list(Some(["@qux", "//foo:bar", "//bacon:eggs"]))]
fn sorted_strings_are_sorted(#[case] before: Option<[&str; 3]>) {
    let mut generated = library();
    generated.set_attr("deps", AttrValue::sorted(["@qux", "//foo:bar", "//foo:baz"]));
    let mut existing = library();
    if let Some(before) = before {
        existing.set_attr("deps", AttrValue::sorted(before));
    }

    merge_rules(&generated, &mut existing, &managed(&[("deps", true)]), "");

    assert_eq!(strings(&existing, "deps"), vec!["//foo:bar", "//foo:baz", "@qux"]);
}

#[rstest]
#[case::into_empty_rule(None)]
#[case::into_existing_list(Some(["@qux", "//foo:bar", "//bacon:eggs"]))]
fn unsorted_strings_keep_generated_order(#[case] before: Option<[&str; 3]>) {
    let mut generated = library();
    generated.set_attr("deps", AttrValue::unsorted(["@qux", "//foo:bar", "//foo:baz"]));
    let mut existing = library();
    if let Some(before) = before {
        existing.set_attr("deps", AttrValue::unsorted(before));
    }

    merge_rules(&generated, &mut existing, &managed(&[("deps", true)]), "");

    assert_eq!(strings(&existing, "deps"), vec!["@qux", "//foo:bar", "//foo:baz"]);
}

#[test]
fn mergeable_attribute_missing_from_generated_is_retracted() {
    let generated = library();
    let mut existing = library();
    existing.set_attr("deps", AttrValue::sorted(["@qux", "//foo:bar", "//foo:baz"]));

    merge_rules(&generated, &mut existing, &managed(&[("deps", true)]), "");

    assert_eq!(existing.attr("deps"), None);
}

#[test]
fn empty_generated_list_removes_the_attribute() {
    let mut generated = library();
    generated.set_attr("deps", AttrValue::sorted(Vec::<String>::new()));
    generated.set_attr("tags", AttrValue::unsorted(Vec::<String>::new()));
    let mut existing = library();
    existing.set_attr("deps", AttrValue::sorted(["//a"]));
    existing.set_attr("tags", AttrValue::unsorted(["manual"]));

    merge_rules(&generated, &mut existing, &managed(&[("deps", true)]), "");

    assert_eq!(existing.attr("deps"), None);
    assert_eq!(existing.attr("tags"), None);
}

#[test]
fn new_attributes_follow_generated_order() {
    let mut generated = library();
    generated.set_attr("srcs", AttrValue::sorted(["lib.rs"]));
    generated.set_attr("deps", AttrValue::sorted(["//a"]));
    generated.set_attr("edition", "2024");
    let mut existing = library();
    existing.set_attr("visibility", AttrValue::unsorted(["//visibility:public"]));

    merge_rules(
        &generated,
        &mut existing,
        &managed(&[("srcs", true), ("deps", true)]),
        "",
    );

    assert_eq!(
        existing.attr_names().collect::<Vec<_>>(),
        vec!["visibility", "srcs", "deps", "edition"]
    );
}

#[test]
fn unspecified_attribute_is_overwritten() {
    let mut generated = library();
    generated.set_attr("unknown_attr", "foobar");
    let mut existing = library();
    existing.set_attr(
        "unknown_attr",
        AttrValue::unsorted(["@qux", "//foo:bar", "//foo:baz"]),
    );

    merge_rules(&generated, &mut existing, &ManagedAttrs::new(), "");

    assert_eq!(existing.attr("unknown_attr").and_then(AttrValue::as_str), Some("foobar"));
}

#[test]
fn unspecified_attribute_absent_from_generated_is_kept() {
    let generated = library();
    let mut existing = library();
    existing.set_attr("visibility", AttrValue::unsorted(["//visibility:public"]));

    merge_rules(&generated, &mut existing, &ManagedAttrs::new(), "");

    assert_eq!(strings(&existing, "visibility"), vec!["//visibility:public"]);
}

#[test]
fn protected_attribute_is_not_overwritten() {
    let mut generated = library();
    generated.set_attr("unknown_attr", "foobar");
    generated.set_attr("known_attr", "foobar");
    let mut existing = library();
    existing.set_attr("unknown_attr", "original");
    existing.set_attr("known_attr", "original");

    merge_rules(&generated, &mut existing, &managed(&[("known_attr", false)]), "");

    assert_eq!(existing.attr("unknown_attr").and_then(AttrValue::as_str), Some("foobar"));
    assert_eq!(existing.attr("known_attr").and_then(AttrValue::as_str), Some("original"));
}

#[test]
fn protected_attribute_is_never_added_or_removed() {
    let mut generated = library();
    generated.set_attr("visibility", AttrValue::unsorted(["//visibility:private"]));
    let mut existing = library();

    merge_rules(&generated, &mut existing, &managed(&[("visibility", false)]), "");
    assert_eq!(existing.attr("visibility"), None);

    existing.set_attr("visibility", AttrValue::unsorted(["//visibility:public"]));
    merge_rules(&library(), &mut existing, &managed(&[("visibility", false)]), "");
    assert_eq!(strings(&existing, "visibility"), vec!["//visibility:public"]);
}

fn attr_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["srcs", "deps", "tags", "data", "visibility"]).prop_map(String::from)
}

fn attr_value() -> impl Strategy<Value = AttrValue> {
    prop_oneof![
        prop::collection::vec("[a-c]{1,2}", 0..4).prop_map(AttrValue::SortedStrings),
        prop::collection::vec("[a-c]{1,2}", 0..4).prop_map(AttrValue::UnsortedStrings),
        "[a-z]{0,5}".prop_map(AttrValue::from),
    ]
}

fn any_rule() -> impl Strategy<Value = Rule> {
    (
        prop::collection::vec((attr_name(), attr_value()), 0..5),
        prop::collection::vec(("_[a-z]{1,3}", any::<i64>()), 0..3),
    )
        .prop_map(|(attrs, private)| {
            let mut rule = library();
            for (key, value) in attrs {
                rule.set_attr(key, value);
            }
            for (key, value) in private {
                rule.set_private_attr(key, value);
            }
            rule
        })
}

fn any_managed() -> impl Strategy<Value = ManagedAttrs> {
    prop::collection::vec((attr_name(), any::<bool>()), 0..4)
        .prop_map(|pairs| pairs.into_iter().collect())
}

proptest! {
    #[test]
    fn merging_twice_equals_merging_once(
        generated in any_rule(),
        existing in any_rule(),
        managed in any_managed(),
    ) {
        let mut once = existing.clone();
        merge_rules(&generated, &mut once, &managed, "rust_library");

        let mut twice = once.clone();
        merge_rules(&generated, &mut twice, &managed, "rust_library");

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn mergeable_names_follow_generated_presence(
        generated in any_rule(),
        existing in any_rule(),
        managed in any_managed(),
    ) {
        let mut merged = existing.clone();
        merge_rules(&generated, &mut merged, &managed, "rust_library");

        for name in managed.mergeable_names() {
            let expected = generated.attr(name).and_then(AttrValue::normalized);
            prop_assert_eq!(merged.attr(name), expected.as_ref());
        }
    }
}
