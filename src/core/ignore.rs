//! Ignore-list used by the child lister and the recursive search.
//!
//! The defaults live in a compile-time [phf::Set]. Membership is an exact, case-sensitive
//! match against an entry's base name only, never against the full path.
//!
//! [IgnoreList::from_names] swaps the defaults for a custom set (mostly for tests),
//! [IgnoreList::with_extra] keeps the defaults and adds names from the configuration.

use phf::phf_set;

use std::collections::HashSet;
use std::sync::Arc;

/// Base names that are never surfaced by listing or search, and never descended into.
#[rustfmt::skip]
pub static DEFAULT_IGNORED: phf::Set<&'static str> = phf_set! {
    // version control
    ".git", ".svn", ".hg", ".bzr",
    // ide configuration
    ".idea", ".vscode", ".eclipse", ".settings", ".intellijPlatform", ".project",
    ".classpath", ".factorypath", ".apt_generated", ".sts4-cache", ".springBeans",
    "nbproject", ".nb-gradle",
    // build output and dependencies
    "node_modules", "target", "build", "dist", "out", "bin", ".gradle", "vendor",
    "bower_components", "jspm_packages", ".pnp", ".pnp.js",
    // caches and temp files
    "__pycache__", ".cache", ".npm", ".yarn", ".parcel-cache", ".turbo", ".sass-cache",
    ".eslintcache", ".stylelintcache", ".tsbuildinfo", ".temp", ".tmp", "tmp", "temp",
    // os metadata
    ".DS_Store", "Thumbs.db", "desktop.ini", ".Spotlight-V100", ".Trashes", "ehthumbs.db",
    // framework output
    ".next", ".nuxt", ".output", ".docusaurus", ".serverless", ".vercel", ".netlify",
    // coverage
    "coverage", ".nyc_output", "htmlcov", ".pytest_cache", ".tox", ".nox", ".hypothesis",
    // logs
    "logs",
    // local environment overrides
    ".env.local", ".env.development.local", ".env.test.local", ".env.production.local",
    // tool specific
    ".sandbox", ".claude", ".kotlin", ".metals", ".bloop",
};

/// Immutable set of ignored base names.
///
/// Cheap to clone: the custom names sit behind an [Arc] so the same list can be handed to
/// every worker task.
#[derive(Debug, Clone)]
pub struct IgnoreList {
    use_defaults: bool,
    extra: Arc<HashSet<String>>,
}

impl Default for IgnoreList {
    fn default() -> Self {
        Self {
            use_defaults: true,
            extra: Arc::new(HashSet::new()),
        }
    }
}

impl IgnoreList {
    /// Replaces the built-in defaults with exactly the given names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            use_defaults: false,
            extra: Arc::new(names.into_iter().map(Into::into).collect()),
        }
    }

    /// Keeps the built-in defaults and adds the given names on top.
    pub fn with_extra<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            use_defaults: true,
            extra: Arc::new(names.into_iter().map(Into::into).collect()),
        }
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        (self.use_defaults && DEFAULT_IGNORED.contains(name)) || self.extra.contains(name)
    }

    pub fn len(&self) -> usize {
        let defaults = if self.use_defaults {
            DEFAULT_IGNORED.len()
        } else {
            0
        };
        defaults
            + self
                .extra
                .iter()
                .filter(|n| !(self.use_defaults && DEFAULT_IGNORED.contains(n.as_str())))
                .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_common_artifacts() {
        let list = IgnoreList::default();
        for name in [".git", "node_modules", "target", ".DS_Store", "coverage", ".env.local"] {
            assert!(list.contains(name), "{name} should be ignored");
        }
        assert!(!list.contains("src"));
        assert!(!list.contains(".env"));
    }

    #[test]
    fn membership_is_case_sensitive_and_by_base_name() {
        let list = IgnoreList::default();
        assert!(!list.contains("Node_Modules"));
        assert!(!list.contains("TARGET"));
        assert!(!list.contains("src/node_modules"));
    }

    #[test]
    fn custom_names_replace_defaults() {
        let list = IgnoreList::from_names(["secret"]);
        assert!(list.contains("secret"));
        assert!(!list.contains("node_modules"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn extra_names_extend_defaults() {
        let list = IgnoreList::with_extra(["generated", ".git"]);
        assert!(list.contains("generated"));
        assert!(list.contains(".git"));
        assert_eq!(list.len(), DEFAULT_IGNORED.len() + 1);
    }
}
