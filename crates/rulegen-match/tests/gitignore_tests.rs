//! Tests for domain-scoped gitignore matching

use pretty_assertions::assert_eq;
use rstest::rstest;
use rulegen_match::{GitignoreMatcher, GitignorePattern, Verdict};

const ROOT: &[&str] = &[];

fn split(path: &str) -> Vec<&str> {
    path.split('/').collect()
}

fn root_matcher(lines: &[&str]) -> GitignoreMatcher {
    GitignoreMatcher::new(
        lines
            .iter()
            .map(|l| GitignorePattern::parse(l, ROOT))
            .collect(),
    )
}

#[rstest]
#[case("*.log", "b.log", false, true)]
#[case("*.log", "a/b.log", false, true)]
#[case("*.log", "a/b.txt", false, false)]
#[case("/build", "build", true, true)]
#[case("/build", "src/build", true, false)]
#[case("docs/*.md", "docs/a.md", false, true)]
#[case("docs/*.md", "x/docs/a.md", false, false)]
#[case("**/gen", "a/b/gen", true, true)]
#[case("**/gen", "gen", true, true)]
#[case("foo/**", "foo/x/y", false, true)]
#[case("foo/**", "foo", true, false)]
#[case("out/", "out", true, true)]
#[case("out/", "out", false, false)]
#[case("out/", "out/x.txt", false, true)]
#[case("a/b", "a/b/c.txt", false, true)]
fn single_pattern_at_root(
    #[case] pattern: &str,
    #[case] path: &str,
    #[case] is_dir: bool,
    #[case] ignored: bool,
) {
    let matcher = root_matcher(&[pattern]);
    assert_eq!(
        matcher.is_match(&split(path), is_dir),
        ignored,
        "pattern {pattern:?} against {path:?} (dir: {is_dir})"
    );
}

#[test]
fn later_negation_reincludes() {
    let matcher = root_matcher(&["*.log", "!keep.log"]);

    assert!(matcher.is_match(&["debug.log"], false));
    assert!(!matcher.is_match(&["keep.log"], false));
}

#[test]
fn later_exclusion_wins_over_earlier_negation() {
    let matcher = root_matcher(&["!keep.log", "*.log"]);

    assert!(matcher.is_match(&["keep.log"], false));
}

#[test]
fn pattern_only_applies_within_its_domain() {
    let pattern = GitignorePattern::parse("*.tmp", &["sub"]);
    let matcher = GitignoreMatcher::new(vec![pattern]);

    assert!(matcher.is_match(&["sub", "a.tmp"], false));
    assert!(matcher.is_match(&["sub", "deep", "a.tmp"], false));
    assert!(!matcher.is_match(&["other", "a.tmp"], false));
    assert!(!matcher.is_match(&["a.tmp"], false));
}

#[test]
fn deeper_negation_overrides_ancestor_pattern() {
    let matcher = GitignoreMatcher::new(vec![
        GitignorePattern::parse("*.gen", ROOT),
        GitignorePattern::parse("!keep.gen", &["sub"]),
    ]);

    assert!(!matcher.is_match(&["sub", "keep.gen"], false));
    assert!(matcher.is_match(&["keep.gen"], false));
    assert!(matcher.is_match(&["sub", "other.gen"], false));
}

#[test]
fn anchored_pattern_is_relative_to_domain() {
    let pattern = GitignorePattern::parse("/cache", &["app"]);

    assert_eq!(pattern.matches(&["app", "cache"], true), Some(Verdict::Exclude));
    assert_eq!(pattern.matches(&["app", "x", "cache"], true), None);
    assert_eq!(pattern.domain(), &["app".to_string()]);
}

#[test]
fn empty_matcher_ignores_nothing() {
    let matcher = GitignoreMatcher::default();
    assert!(matcher.is_empty());
    assert!(!matcher.is_match(&["anything"], false));
}

#[test]
fn matcher_accepts_owned_segments() {
    let matcher = root_matcher(&["target"]);
    let path = vec!["target".to_string(), "debug".to_string()];
    assert!(matcher.is_match(&path, true));
}
