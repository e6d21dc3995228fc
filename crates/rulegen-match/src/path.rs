//! Repository-relative path handling
//!
//! Paths handed to the matchers are plain strings relative to the repository
//! root, always separated by forward slashes. The root itself is `""`.

/// Lexically normalize a slash-separated path.
///
/// Removes empty and `.` segments, resolves `..` against the preceding
/// segment and drops trailing slashes. An empty result becomes `"."`.
/// Leading `..` segments of a relative path are kept; for a rooted path
/// they are discarded.
pub fn clean(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Join a directory and a relative element, then clean the result.
///
/// Empty inputs are skipped, so joining onto the repository root (`""`)
/// yields the cleaned element, and joining two empty strings yields `""`.
pub fn join(dir: &str, elem: &str) -> String {
    match (dir.is_empty(), elem.is_empty()) {
        (true, true) => String::new(),
        (true, false) => clean(elem),
        (false, true) => clean(dir),
        (false, false) => clean(&format!("{dir}/{elem}")),
    }
}

/// Split a relative path into its segments. The root yields no segments.
pub fn segments(rel: &str) -> Vec<&str> {
    rel.split('/').filter(|s| !s.is_empty()).collect()
}
