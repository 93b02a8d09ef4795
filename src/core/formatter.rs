//! Sorting and string shaping for result sets.
//!
//! [sort_entries] orders a flat result list so that it reads like a file tree: shallow
//! entries first, siblings grouped under their parent, directories before files, then
//! alphabetically. The separator helpers keep every path the engine compares in the same
//! forward-slash shape.

use crate::core::FileEntry;

use std::borrow::Cow;
use std::cmp::Ordering;

/// Sorts entries in place by depth, parent path, kind and name.
///
/// The sort is stable, so entries that compare equal keep their walk order.
pub fn sort_entries(entries: &mut [FileEntry]) {
    entries.sort_by(compare_entries);
}

/// Comparator used by [sort_entries].
pub fn compare_entries(a: &FileEntry, b: &FileEntry) -> Ordering {
    a.depth()
        .cmp(&b.depth())
        .then_with(|| cmp_ignore_case(a.parent_path(), b.parent_path()))
        .then_with(|| match (a.is_dir(), b.is_dir()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => Ordering::Equal,
        })
        .then_with(|| cmp_ignore_case(a.name(), b.name()))
}

/// Case-insensitive lexical comparison without allocating lowered copies.
fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Normalize separators in a given string to use forward slashes.
pub fn normalize_separators(path: &str) -> Cow<'_, str> {
    if path.contains('\\') {
        Cow::Owned(path.replace('\\', "/"))
    } else {
        Cow::Borrowed(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FileEntry;
    use std::fs::{self, File};
    use tempfile::TempDir;

    fn entry(root: &std::path::Path, rel: &str) -> FileEntry {
        FileEntry::from_path(&root.join(rel), root)
    }

    #[test]
    fn shallow_first_then_parent_then_dirs_then_name() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let root = tmp.path();
        fs::create_dir_all(root.join("b/inner"))?;
        fs::create_dir_all(root.join("A"))?;
        File::create(root.join("b/z.txt"))?;
        File::create(root.join("A/y.txt"))?;
        File::create(root.join("readme.md"))?;

        let mut entries = vec![
            entry(root, "b/z.txt"),
            entry(root, "readme.md"),
            entry(root, "b/inner"),
            entry(root, "A/y.txt"),
            entry(root, "b"),
            entry(root, "A"),
        ];
        sort_entries(&mut entries);

        let order: Vec<_> = entries.iter().map(|e| e.path()).collect();
        assert_eq!(
            order,
            vec!["A", "b", "readme.md", "A/y.txt", "b/inner", "b/z.txt"]
        );
        Ok(())
    }

    #[test]
    fn directory_beats_file_with_same_parent() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let root = tmp.path();
        fs::create_dir(root.join("zeta"))?;
        File::create(root.join("alpha.txt"))?;

        let dir = entry(root, "zeta");
        let file = entry(root, "alpha.txt");
        assert_eq!(compare_entries(&dir, &file), Ordering::Less);
        assert_eq!(compare_entries(&file, &dir), Ordering::Greater);
        Ok(())
    }

    #[test]
    fn ignore_case_comparison() {
        assert_eq!(cmp_ignore_case("Apple", "apple"), Ordering::Equal);
        assert_eq!(cmp_ignore_case("apple", "Banana"), Ordering::Less);
        assert_eq!(cmp_ignore_case("", "a"), Ordering::Less);
    }

    #[test]
    fn separators_are_normalized_only_when_needed() {
        assert!(matches!(normalize_separators("a/b"), Cow::Borrowed(_)));
        assert_eq!(normalize_separators(r"a\b\c"), "a/b/c");
    }
}
