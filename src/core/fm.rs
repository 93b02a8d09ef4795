//! File entries and directory listing for the bridge.
//!
//! Provides the [FileEntry] struct which is what the front end receives for every file or
//! directory, the [list_children] function behind plain directory browsing, and the path
//! helpers ([to_relative], [resolve_subpath]) shared with the recursive search.

use crate::core::formatter::normalize_separators;
use crate::core::ignore::IgnoreList;

use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

use std::fs;
use std::path::{Component, Path, PathBuf};

/// Kind of a surfaced entry. Serialized as `"file"` / `"directory"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// Represents a single file-system node in a listing or search result.
///
/// `path` is relative to the project root, `absolute_path` is fully resolved. Both use
/// forward slashes on every platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    name: String,
    path: String,
    absolute_path: String,
    #[serde(rename = "type")]
    kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    extension: Option<String>,
}

impl FileEntry {
    /// Builds an entry for `absolute`, located under `root`.
    ///
    /// The kind follows symlinks; a dangling link is reported as an extensionless file.
    pub fn from_path(absolute: &Path, root: &Path) -> Self {
        let name = absolute
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let metadata = fs::metadata(absolute).ok();
        let is_dir = metadata.as_ref().is_some_and(|md| md.is_dir());
        let is_file = metadata.as_ref().is_some_and(|md| md.is_file());

        let extension = if is_file { extension_of(&name) } else { None };

        FileEntry {
            path: to_relative(absolute, root),
            absolute_path: normalize_separators(&absolute.to_string_lossy()).into_owned(),
            kind: if is_dir {
                EntryKind::Directory
            } else {
                EntryKind::File
            },
            extension,
            name,
        }
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn absolute_path(&self) -> &str {
        &self.absolute_path
    }

    #[inline]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    #[inline]
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Number of `/`-delimited segments in the relative path.
    #[inline]
    pub fn depth(&self) -> usize {
        self.path.split('/').count()
    }

    /// Everything before the last `/` of the relative path, or `""` for top-level entries.
    #[inline]
    pub fn parent_path(&self) -> &str {
        self.path.rfind('/').map_or("", |idx| &self.path[..idx])
    }
}

/// Substring after the last `.`, when the dot is not the first character.
fn extension_of(name: &str) -> Option<String> {
    match name.rfind('.') {
        Some(idx) if idx > 0 => Some(name[idx + 1..].to_string()),
        _ => None,
    }
}

/// Strips the root prefix from `absolute`, drops one leading separator and converts all
/// backslashes to forward slashes.
pub fn to_relative(absolute: &Path, root: &Path) -> String {
    let abs = absolute.to_string_lossy();
    let root = root.to_string_lossy();
    let rel = abs.strip_prefix(root.as_ref()).unwrap_or(&abs);
    let rel = rel
        .strip_prefix('/')
        .or_else(|| rel.strip_prefix('\\'))
        .unwrap_or(rel);
    normalize_separators(rel).into_owned()
}

/// Resolves a front-end supplied subpath against the project root.
///
/// Returns `None` when the subpath is absolute or tries to climb out of the root, so a
/// request payload can never point the lister outside the project.
pub fn resolve_subpath(root: &Path, subpath: &str) -> Option<PathBuf> {
    let subpath = normalize_separators(subpath);
    let rel = Path::new(subpath.as_ref());
    let mut target = root.to_path_buf();
    for component in rel.components() {
        match component {
            Component::Normal(part) => target.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(target)
}

/// Resolves an `open_file` path.
///
/// The path is tried as given first. A relative path that does not exist there is retried
/// under `base`. Returns `None` when neither location exists.
pub fn resolve_open_path(raw: &str, base: Option<&Path>) -> Option<PathBuf> {
    let given = PathBuf::from(raw);
    if given.exists() {
        return Some(given);
    }
    if given.is_absolute() {
        return None;
    }
    let under_root = base?.join(&given);
    if under_root.exists() {
        tracing::info!(path = %under_root.display(), "Resolved file against project root");
        Some(under_root)
    } else {
        None
    }
}

/// Walks the children of `dir` up to `max_depth` levels down, in byte order of their names.
///
/// Entries whose base name is ignored are skipped and, for directories, never entered.
/// Unreadable entries are logged and skipped. With `follow_links` set, linked directories
/// are walked too and link cycles are detected and skipped by [WalkDir].
pub(crate) fn walk_entries<'a>(
    dir: &Path,
    max_depth: usize,
    follow_links: bool,
    ignore: &'a IgnoreList,
) -> impl Iterator<Item = DirEntry> + use<'a> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |e| !ignore.contains(&e.file_name().to_string_lossy()))
        .filter_map(|res| match res {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unreadable entry");
                None
            }
        })
}

/// Lists the immediate children of `root/subpath`.
///
/// A subpath that does not exist, is not a directory, or escapes the root yields an empty
/// listing. Ignored names are skipped and the listing stops silently at `max_count`.
/// Links are listed as they are, dangling ones included.
pub fn list_children(
    root: &Path,
    subpath: &str,
    max_count: usize,
    ignore: &IgnoreList,
) -> Vec<FileEntry> {
    let Some(target) = resolve_subpath(root, subpath) else {
        return Vec::new();
    };
    if !target.is_dir() {
        return Vec::new();
    }
    walk_entries(&target, 1, false, ignore)
        .take(max_count)
        .map(|entry| FileEntry::from_path(entry.path(), root))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    #[test]
    fn entry_for_file_has_extension() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        fs::create_dir(tmp.path().join("src"))?;
        let file = tmp.path().join("src").join("main.rs");
        File::create(&file)?;

        let entry = FileEntry::from_path(&file, tmp.path());
        assert_eq!(entry.name(), "main.rs");
        assert_eq!(entry.path(), "src/main.rs");
        assert_eq!(entry.kind(), EntryKind::File);
        assert_eq!(entry.extension(), Some("rs"));
        assert_eq!(entry.depth(), 2);
        assert_eq!(entry.parent_path(), "src");
        assert!(entry.absolute_path().ends_with("src/main.rs"));
        Ok(())
    }

    #[test]
    fn extension_absent_for_dotfiles_dirs_and_plain_names() -> Result<(), Box<dyn std::error::Error>>
    {
        let tmp = TempDir::new()?;
        File::create(tmp.path().join(".gitignore"))?;
        File::create(tmp.path().join("Makefile"))?;
        fs::create_dir(tmp.path().join("pkg.d"))?;

        assert_eq!(
            FileEntry::from_path(&tmp.path().join(".gitignore"), tmp.path()).extension(),
            None
        );
        assert_eq!(
            FileEntry::from_path(&tmp.path().join("Makefile"), tmp.path()).extension(),
            None
        );
        let dir = FileEntry::from_path(&tmp.path().join("pkg.d"), tmp.path());
        assert!(dir.is_dir());
        assert_eq!(dir.extension(), None);
        Ok(())
    }

    #[test]
    fn relative_path_strips_root_and_separators() {
        assert_eq!(
            to_relative(Path::new("/home/me/proj/src/lib.rs"), Path::new("/home/me/proj")),
            "src/lib.rs"
        );
        assert_eq!(
            to_relative(Path::new(r"C:\proj\src\lib.rs"), Path::new(r"C:\proj")),
            "src/lib.rs"
        );
        assert_eq!(to_relative(Path::new("/proj"), Path::new("/proj")), "");
    }

    #[test]
    fn subpath_cannot_escape_root() {
        let root = Path::new("/proj");
        assert_eq!(resolve_subpath(root, ""), Some(PathBuf::from("/proj")));
        assert_eq!(
            resolve_subpath(root, "src/./core"),
            Some(PathBuf::from("/proj/src/core"))
        );
        assert_eq!(resolve_subpath(root, "../etc"), None);
        assert_eq!(resolve_subpath(root, "/etc"), None);
    }

    #[test]
    fn open_path_falls_back_to_project_root() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        fs::create_dir(tmp.path().join("docs"))?;
        File::create(tmp.path().join("docs/guide-7f3a.md"))?;

        let resolved = resolve_open_path("docs/guide-7f3a.md", Some(tmp.path()));
        assert_eq!(resolved, Some(tmp.path().join("docs/guide-7f3a.md")));

        assert_eq!(resolve_open_path("docs/missing.md", Some(tmp.path())), None);
        assert_eq!(resolve_open_path("docs/guide-7f3a.md", None), None);

        let absolute = tmp.path().join("docs/guide-7f3a.md");
        let absolute = absolute.to_string_lossy();
        assert_eq!(
            resolve_open_path(&absolute, None),
            Some(PathBuf::from(absolute.as_ref()))
        );
        Ok(())
    }

    #[test]
    fn list_children_skips_ignored_and_caps() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        fs::create_dir(tmp.path().join("node_modules"))?;
        fs::create_dir(tmp.path().join(".git"))?;
        for i in 0..5 {
            File::create(tmp.path().join(format!("f{i}.txt")))?;
        }

        let all = list_children(tmp.path(), "", 100, &IgnoreList::default());
        assert_eq!(all.len(), 5);
        assert!(all.iter().all(|e| e.name() != "node_modules" && e.name() != ".git"));

        let capped = list_children(tmp.path(), "", 3, &IgnoreList::default());
        assert_eq!(capped.len(), 3);
        Ok(())
    }

    #[test]
    fn list_children_of_missing_dir_is_empty() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        File::create(tmp.path().join("file.txt"))?;
        let ignore = IgnoreList::default();
        assert!(list_children(tmp.path(), "does/not/exist", 100, &ignore).is_empty());
        assert!(list_children(tmp.path(), "file.txt", 100, &ignore).is_empty());
        Ok(())
    }

    #[test]
    fn list_children_is_sorted_and_stays_one_level() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        fs::create_dir_all(tmp.path().join("b/deep"))?;
        fs::create_dir(tmp.path().join("a"))?;
        File::create(tmp.path().join("a/1.txt"))?;
        File::create(tmp.path().join("C.md"))?;

        let listed = list_children(tmp.path(), "", 100, &IgnoreList::default());
        let paths: Vec<_> = listed.iter().map(|e| e.path()).collect();
        assert_eq!(paths, vec!["C.md", "a", "b"]);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn list_children_keeps_dangling_links() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        std::os::unix::fs::symlink(tmp.path().join("gone"), tmp.path().join("stale.ts"))?;

        let listed = list_children(tmp.path(), "", 100, &IgnoreList::default());
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].kind(), EntryKind::File);
        assert_eq!(listed[0].extension(), None);
        Ok(())
    }
}
