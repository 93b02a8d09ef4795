//! Helpers for the bridge.
//!
//! This module defines the minimum, default and maximum values for the search caps read from
//! `webview-bridge.toml`, and provides small utilities:
//! - Clamping the search caps to safe values
//! - Locating the home directory
//! - Expanding `~` and resolving the project root given on the command line

use crate::core::find::{DEFAULT_LIST_MAX_RESULTS, DEFAULT_MAX_DEPTH, DEFAULT_MAX_RESULTS};

use std::path::{Path, PathBuf};

/// Smallest accepted `max_depth`. A depth of 0 still searches the root's children.
pub const MIN_SEARCH_DEPTH: usize = 0;
/// Largest accepted `max_depth`.
pub const MAX_SEARCH_DEPTH: usize = 64;
/// Smallest accepted result cap.
pub const MIN_RESULTS: usize = 1;
/// Largest accepted result cap.
/// Can be set higher, but the front end has to render every entry.
pub const MAX_RESULTS_LIMIT: usize = 10_000;

/// Clamp the search depth to `MIN_SEARCH_DEPTH..=MAX_SEARCH_DEPTH`, warning when it was out of range.
pub fn clamp_search_depth(value: usize) -> usize {
    clamp_logged("max_depth", value, MIN_SEARCH_DEPTH, MAX_SEARCH_DEPTH)
}

/// Clamp a result cap to `MIN_RESULTS..=MAX_RESULTS_LIMIT`, warning when it was out of range.
pub fn clamp_results(field: &'static str, value: usize) -> usize {
    clamp_logged(field, value, MIN_RESULTS, MAX_RESULTS_LIMIT)
}

fn clamp_logged(field: &'static str, value: usize, min: usize, max: usize) -> usize {
    let clamped = value.clamp(min, max);
    if clamped != value {
        tracing::warn!(
            field,
            value,
            min,
            max,
            clamped,
            "Config value out of range, clamped"
        );
    }
    clamped
}

// Serde defaults for the [search] section

pub(crate) fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

pub(crate) fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

pub(crate) fn default_list_max_results() -> usize {
    DEFAULT_LIST_MAX_RESULTS
}

/// Returns the user's home directory, if one can be determined.
#[inline]
pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Expands a leading `~` to the home directory. Other paths are returned unchanged.
pub fn expand_home_path(raw: &str) -> PathBuf {
    if raw == "~" {
        return get_home().unwrap_or_else(|| PathBuf::from(raw));
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\"))
        && let Some(home) = get_home()
    {
        return home.join(rest);
    }
    PathBuf::from(raw)
}

/// Resolves the project root passed to `wvb`.
///
/// Returns `None` when the path does not exist or is not a directory.
pub fn resolve_project_root(raw: &str) -> Option<PathBuf> {
    let expanded = expand_home_path(raw);
    let absolute = std::path::absolute(&expanded).ok()?;
    is_directory(&absolute).then_some(absolute)
}

#[inline]
fn is_directory(path: &Path) -> bool {
    path.metadata().is_ok_and(|md| md.is_dir())
}
