//! The recursive find module of the bridge.
//!
//! This module implements the [search] function, a bounded depth-first walk of the project
//! tree, and the [QueryMatcher] that decides whether a single entry matches the query.
//!
//! The walk runs on [walkdir], never descends into ignored directories and stops as soon as
//! the depth or result caps are hit. Results come back in walk order; callers sort them with
//! [crate::core::formatter::sort_entries].

use crate::core::fm::{FileEntry, list_children, to_relative, walk_entries};
use crate::core::formatter::sort_entries;
use crate::core::ignore::IgnoreList;
use crate::core::protocol::ListFilesRequest;

use std::path::Path;

/// Default recursion depth for query searches.
pub const DEFAULT_MAX_DEPTH: usize = 15;
/// Default result cap for query searches.
pub const DEFAULT_MAX_RESULTS: usize = 200;
/// Default result cap for plain directory listings.
pub const DEFAULT_LIST_MAX_RESULTS: usize = 100;

/// Caps applied to a single `list_files` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_depth: usize,
    pub max_results: usize,
    pub list_max_results: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_results: DEFAULT_MAX_RESULTS,
            list_max_results: DEFAULT_LIST_MAX_RESULTS,
        }
    }
}

/// Serves a `list_files` request against `root`.
///
/// A non-empty query searches the whole project; otherwise the immediate children of
/// `root/currentPath` are listed. Either way the result comes back sorted.
pub fn list_files(
    root: &Path,
    request: &ListFilesRequest,
    limits: SearchLimits,
    ignore: &IgnoreList,
) -> Vec<FileEntry> {
    let mut files = if request.query.is_empty() {
        list_children(root, &request.current_path, limits.list_max_results, ignore)
    } else {
        search(
            root,
            &request.query,
            limits.max_depth,
            limits.max_results,
            ignore,
        )
    };
    sort_entries(&mut files);
    files
}

/// Case-insensitive matcher for a single query.
///
/// An entry matches when the query is a substring of its base name or of its root-relative
/// path, or when the query starts with `.` and the base name ends with it.
#[derive(Debug, Clone)]
pub struct QueryMatcher {
    lowered: String,
}

impl QueryMatcher {
    pub fn new(query: &str) -> Self {
        Self {
            lowered: query.to_lowercase(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lowered.is_empty()
    }

    pub fn matches(&self, name: &str, relative: &str) -> bool {
        if self.lowered.is_empty() {
            return true;
        }
        let name = name.to_lowercase();
        let matches_name = name.contains(&self.lowered);
        let matches_path = relative.to_lowercase().contains(&self.lowered);
        let matches_extension = self.lowered.starts_with('.') && name.ends_with(&self.lowered);
        matches_name || matches_path || matches_extension
    }
}

/// Recursively search `root` for entries matching `query`.
///
/// Depth counts from 0 for the children of `root`, so no result is more than
/// `max_depth + 1` segments deep. At most `max_count` entries are returned and the caller
/// gets no signal when the cap was hit.
///
/// Directories that do not match are still descended into, linked ones included; a link
/// back into one of its own ancestors is skipped. Files that do not match are skipped.
/// With an empty query every non-ignored entry is collected until a cap is hit.
pub fn search(
    root: &Path,
    query: &str,
    max_depth: usize,
    max_count: usize,
    ignore: &IgnoreList,
) -> Vec<FileEntry> {
    let matcher = QueryMatcher::new(query);
    let mut out = Vec::new();
    if max_count == 0 || !root.is_dir() {
        return out;
    }

    for entry in walk_entries(root, max_depth.saturating_add(1), true, ignore) {
        let name = entry.file_name().to_string_lossy();
        if matcher.matches(&name, &to_relative(entry.path(), root)) {
            out.push(FileEntry::from_path(entry.path(), root));
            if out.len() >= max_count {
                break;
            }
        }
    }
    out
}
