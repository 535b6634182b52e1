//! Path resolution for the virtual filesystem.
//!
//! Canonical paths are always rooted at [`ROOT`]: `~`, `~/projects`,
//! `~/projects/queue.md`. Resolution never fails; whether the result exists
//! is for the caller to check against [`VirtualFs`](super::VirtualFs).

/// Name of the root directory.
pub const ROOT: &str = "~";

/// Resolve `expr` against `current_dir` into a canonical path.
///
/// - `~/...` and `/...` resolve from the root
/// - anything else resolves from `current_dir`, including a bare `~`, which
///   only names the root when `current_dir` is the root
/// - `..` never climbs above the root, `.` is a no-op
/// - an expression without segments returns its base unchanged
pub fn resolve(expr: &str, current_dir: &str) -> String {
    let (base, rest) = if let Some(rest) = expr.strip_prefix("~/") {
        (ROOT, rest)
    } else if let Some(rest) = expr.strip_prefix('/') {
        (ROOT, rest)
    } else {
        (current_dir, expr)
    };

    let tail: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
    if tail.is_empty() {
        return base.to_string();
    }

    let mut parts: Vec<&str> = segments(base).filter(|s| !s.is_empty()).collect();
    for segment in tail {
        match segment {
            ".." => {
                parts.pop();
            }
            "." => {}
            // `~` pushed straight onto the root is the root itself
            ROOT if parts.is_empty() => {}
            _ => parts.push(segment),
        }
    }

    join(&parts)
}

/// Join root-relative segments into a canonical path.
fn join(parts: &[&str]) -> String {
    if parts.is_empty() {
        ROOT.to_string()
    } else {
        format!("{}/{}", ROOT, parts.join("/"))
    }
}

/// Segments of a canonical path below the root.
///
/// `~` yields nothing, `~/a/b` yields `a`, `b`. Empty segments are kept so
/// that malformed paths fail lookup instead of silently matching.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    let rest = if path == ROOT {
        None
    } else {
        Some(path.strip_prefix("~/").unwrap_or(path))
    };
    rest.into_iter().flat_map(|r| r.split('/'))
}
