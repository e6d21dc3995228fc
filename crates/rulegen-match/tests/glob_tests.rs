//! Tests for glob pattern compilation and matching

use rstest::rstest;
use rulegen_match::{GlobPattern, contains_glob_meta, match_any};

#[rstest]
#[case("vendor", "vendor", true)]
#[case("vendor", "vendor/lib", false)]
#[case("vendor/**", "vendor/lib/a.rs", true)]
#[case("vendor/**", "vendor", true)]
#[case("alt/**", "alt", true)]
#[case("vendor/**", "vendored", false)]
#[case("a/**/b", "a/b", true)]
#[case("{docs,site}/**", "site", true)]
#[case("**/testdata", "a/b/testdata", true)]
#[case("**/testdata", "testdata", true)]
#[case("src/*.rs", "src/lib.rs", true)]
#[case("src/*.rs", "src/nested/lib.rs", false)]
#[case("src/**/*.rs", "src/nested/deep/lib.rs", true)]
#[case("file?.txt", "file1.txt", true)]
#[case("file?.txt", "file10.txt", false)]
#[case("[ab]/x", "a/x", true)]
#[case("[ab]/x", "c/x", false)]
#[case("{docs,site}/**", "site/index.html", true)]
fn glob_matching(#[case] pattern: &str, #[case] path: &str, #[case] expected: bool) {
    let glob = GlobPattern::new(pattern).unwrap();
    assert_eq!(
        glob.is_match(path),
        expected,
        "pattern {pattern:?} against {path:?}"
    );
}

#[rstest]
#[case("a/[b")]
#[case("{a,b")]
fn invalid_patterns_are_rejected(#[case] pattern: &str) {
    assert!(GlobPattern::new(pattern).is_err());
}

#[test]
fn match_any_is_true_if_one_pattern_matches() {
    let patterns = vec![
        GlobPattern::new("docs/**").unwrap(),
        GlobPattern::new("**/*.bak").unwrap(),
    ];

    assert!(match_any(&patterns, "src/old.bak"));
    assert!(match_any(&patterns, "docs/index.md"));
    assert!(!match_any(&patterns, "src/lib.rs"));
}

#[test]
fn match_any_of_nothing_is_false() {
    assert!(!match_any(&[], "anything"));
}

#[test]
fn patterns_compare_by_source() {
    let a = GlobPattern::new("x/*").unwrap();
    let b = GlobPattern::new("x/*").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.as_str(), "x/*");
}

#[rstest]
#[case("plain/path", false)]
#[case("with*star", true)]
#[case("what?", true)]
#[case("class[0]", true)]
fn glob_meta_detection(#[case] input: &str, #[case] expected: bool) {
    assert_eq!(contains_glob_meta(input), expected);
}
