//! Materialized path algebra
//!
//! Paths are absolute, slash-separated strings rooted at `/`. Ancestry is
//! always decided with a separator-aware prefix test: `X` is an ancestor of
//! `Y` only if `Y` starts with `X + "/"`. Rename, move, delete and cycle
//! detection all go through [`is_ancestor_of`].

use crate::types::ROOT_PATH;

/// Path of `name` inside `directory`.
pub fn join(directory: &str, name: &str) -> String {
    if is_root(directory) {
        format!("/{}", name)
    } else {
        format!("{}/{}", directory.trim_end_matches('/'), name)
    }
}

/// Root test. The empty string is treated as root as well.
pub fn is_root(path: &str) -> bool {
    path.is_empty() || path == ROOT_PATH
}

/// Directory part of a path; `/` for top-level paths.
pub fn parent_path(path: &str) -> String {
    match path.trim_end_matches('/').rfind('/') {
        Some(0) | None => ROOT_PATH.to_string(),
        Some(idx) => path[..idx].to_string(),
    }
}

/// Last segment of a path.
pub fn file_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Number of non-empty segments; 0 for root.
pub fn segment_count(path: &str) -> usize {
    path.split('/').filter(|s| !s.is_empty()).count()
}

/// Canonical form of a user-supplied directory path.
///
/// Adds a leading slash, strips trailing ones; empty becomes `/`.
pub fn normalize_directory(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        ROOT_PATH.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// True if `descendant` lies strictly below `ancestor`.
///
/// Root is an ancestor of every non-root path.
pub fn is_ancestor_of(ancestor: &str, descendant: &str) -> bool {
    if is_root(ancestor) {
        return !is_root(descendant);
    }
    descendant.len() > ancestor.len()
        && descendant.starts_with(ancestor)
        && descendant.as_bytes()[ancestor.len()] == b'/'
}

/// Swap the `old_prefix` ancestor of `path` for `new_prefix`.
///
/// Returns `None` when `path` is neither `old_prefix` nor below it.
pub fn rebase(path: &str, old_prefix: &str, new_prefix: &str) -> Option<String> {
    if path == old_prefix {
        return Some(new_prefix.to_string());
    }
    if !is_ancestor_of(old_prefix, path) {
        return None;
    }
    Some(format!("{}{}", new_prefix, &path[old_prefix.len()..]))
}

/// Cumulative (label, path) pairs from root to `path`, root included.
pub fn breadcrumbs(path: &str) -> Vec<(String, String)> {
    let mut crumbs = vec![(ROOT_PATH.to_string(), ROOT_PATH.to_string())];
    let mut current = String::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        current.push('/');
        current.push_str(segment);
        crumbs.push((segment.to_string(), current.clone()));
    }
    crumbs
}

/// Name check shared by create, rename and upload insertion.
pub fn validate_name(name: &str) -> Result<String, String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("name cannot be empty".to_string());
    }
    if trimmed.contains('/') {
        return Err(format!("name cannot contain '/': {}", trimmed));
    }
    Ok(trimmed.to_string())
}
