use webview_bridge::core::protocol::ListFilesRequest;
use webview_bridge::core::{
    EntryKind, FileEntry, IgnoreList, SearchLimits, compare_entries, list_children, list_files,
    search,
};

use std::cmp::Ordering;
use std::fs::{self, File};
use std::path::Path;
use tempfile::tempdir;

fn paths(entries: &[FileEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.path()).collect()
}

fn request(query: &str, current_path: &str) -> ListFilesRequest {
    ListFilesRequest {
        query: query.to_string(),
        current_path: current_path.to_string(),
    }
}

/// Builds a small project with sources, docs and the usual noise directories.
fn sample_project(root: &Path) -> std::io::Result<()> {
    fs::create_dir_all(root.join("src/components"))?;
    fs::create_dir_all(root.join("docs"))?;
    fs::create_dir_all(root.join("node_modules/x"))?;
    fs::create_dir_all(root.join(".git/objects"))?;
    fs::create_dir_all(root.join("target/debug"))?;
    File::create(root.join("src/app.ts"))?;
    File::create(root.join("src/components/Button.ts"))?;
    File::create(root.join("src/components/button.css"))?;
    File::create(root.join("docs/guide.md"))?;
    File::create(root.join("node_modules/x/index.ts"))?;
    File::create(root.join("target/debug/app.ts"))?;
    File::create(root.join("README.md"))?;
    File::create(root.join(".DS_Store"))?;
    Ok(())
}

#[test]
fn test_extension_query_skips_ignored_dirs() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("src"))?;
    fs::create_dir_all(dir.path().join("node_modules/x"))?;
    File::create(dir.path().join("src/app.ts"))?;
    File::create(dir.path().join("node_modules/x/index.ts"))?;

    let files = list_files(
        dir.path(),
        &request(".ts", ""),
        SearchLimits::default(),
        &IgnoreList::default(),
    );
    assert_eq!(paths(&files), vec!["src/app.ts"]);

    let entry = &files[0];
    assert_eq!(entry.name(), "app.ts");
    assert_eq!(entry.kind(), EntryKind::File);
    assert_eq!(entry.extension(), Some("ts"));
    Ok(())
}

#[test]
fn test_extension_query_finds_every_ts_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("src"))?;
    fs::create_dir_all(dir.path().join("node_modules"))?;
    File::create(dir.path().join("src/app.ts"))?;
    File::create(dir.path().join("src/app.test.ts"))?;
    File::create(dir.path().join("node_modules/x.ts"))?;

    let files = search(dir.path(), ".ts", 15, 200, &IgnoreList::default());
    let mut found = paths(&files);
    found.sort_unstable();
    assert_eq!(found, vec!["src/app.test.ts", "src/app.ts"]);
    assert!(files.iter().all(|e| !e.path().starts_with("node_modules")));
    Ok(())
}

#[test]
fn test_child_lister_returns_only_top_level_dirs() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("a"))?;
    fs::create_dir(dir.path().join("b"))?;
    File::create(dir.path().join("a/1.txt"))?;
    File::create(dir.path().join("b/2.txt"))?;

    let listed = list_files(
        dir.path(),
        &request("", ""),
        SearchLimits::default(),
        &IgnoreList::default(),
    );
    assert_eq!(paths(&listed), vec!["a", "b"]);
    assert!(listed.iter().all(|e| e.kind() == EntryKind::Directory));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_files_inside_linked_packages_are_found() -> Result<(), Box<dyn std::error::Error>> {
    let outer = tempdir()?;
    let root = outer.path().join("proj");
    fs::create_dir_all(outer.path().join("shared"))?;
    fs::create_dir_all(root.join("node_modules"))?;
    File::create(outer.path().join("shared/util.ts"))?;
    std::os::unix::fs::symlink(outer.path().join("shared"), root.join("pkg"))?;
    std::os::unix::fs::symlink(outer.path().join("shared"), root.join("node_modules/shared"))?;

    let files = list_files(
        &root,
        &request("util", ""),
        SearchLimits::default(),
        &IgnoreList::default(),
    );
    assert_eq!(paths(&files), vec!["pkg/util.ts"]);
    Ok(())
}

#[test]
fn test_empty_query_lists_children_dirs_first() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("a"))?;
    File::create(dir.path().join("a/b"))?;

    let top = list_files(
        dir.path(),
        &request("", ""),
        SearchLimits::default(),
        &IgnoreList::default(),
    );
    assert_eq!(paths(&top), vec!["a"]);
    assert!(top[0].is_dir());

    let inner = list_files(
        dir.path(),
        &request("", "a"),
        SearchLimits::default(),
        &IgnoreList::default(),
    );
    assert_eq!(paths(&inner), vec!["a/b"]);
    assert_eq!(inner[0].kind(), EntryKind::File);
    Ok(())
}

#[test]
fn test_listing_escape_attempts_are_empty() -> Result<(), Box<dyn std::error::Error>> {
    let outer = tempdir()?;
    let root = outer.path().join("project");
    fs::create_dir(&root)?;
    File::create(outer.path().join("sibling.txt"))?;

    let ignore = IgnoreList::default();
    assert!(list_children(&root, "..", 100, &ignore).is_empty());
    assert!(list_children(&root, "../", 100, &ignore).is_empty());
    let absolute = outer.path().to_string_lossy();
    assert!(list_children(&root, &absolute, 100, &ignore).is_empty());
    Ok(())
}

#[test]
fn test_ignored_names_never_surface_or_get_walked() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    sample_project(dir.path())?;
    let ignore = IgnoreList::default();

    let everything = search(dir.path(), "", 15, 10_000, &ignore);
    assert!(!everything.is_empty());
    for entry in &everything {
        for segment in entry.path().split('/') {
            assert!(
                !ignore.contains(segment),
                "ignored segment '{}' in {}",
                segment,
                entry.path()
            );
        }
    }
    Ok(())
}

#[test]
fn test_result_count_never_exceeds_cap() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    sample_project(dir.path())?;
    for i in 0..30 {
        File::create(dir.path().join(format!("src/file_{i}.ts")))?;
    }
    let ignore = IgnoreList::default();

    for max in [0, 1, 5, 17, 1000] {
        let found = search(dir.path(), "", 15, max, &ignore);
        assert!(found.len() <= max, "{} results for cap {}", found.len(), max);
        let listed = list_children(dir.path(), "src", max, &ignore);
        assert!(listed.len() <= max);
    }
    Ok(())
}

#[test]
fn test_depth_never_exceeds_cap_plus_one() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let deep = dir.path().join("l1/l2/l3/l4/l5/l6");
    fs::create_dir_all(&deep)?;
    File::create(deep.join("leaf.txt"))?;
    File::create(dir.path().join("l1/l2/mid.txt"))?;
    let ignore = IgnoreList::default();

    for max_depth in 0..8 {
        let found = search(dir.path(), "", max_depth, 10_000, &ignore);
        for entry in &found {
            assert!(
                entry.depth() <= max_depth + 1,
                "{} deeper than {}",
                entry.path(),
                max_depth + 1
            );
        }
    }
    Ok(())
}

#[test]
fn test_results_are_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    sample_project(dir.path())?;
    for i in 0..40 {
        File::create(dir.path().join(format!("docs/page_{i}.md")))?;
    }
    let limits = SearchLimits {
        max_depth: 15,
        max_results: 10,
        list_max_results: 10,
    };
    let ignore = IgnoreList::default();

    for req in [request("", ""), request("", "docs"), request("page", "")] {
        let first = list_files(dir.path(), &req, limits, &ignore);
        let second = list_files(dir.path(), &req, limits, &ignore);
        assert_eq!(first, second);
    }
    Ok(())
}

#[test]
fn test_sorted_output_follows_ordering_law() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    sample_project(dir.path())?;

    let files = list_files(
        dir.path(),
        &request("t", ""),
        SearchLimits::default(),
        &IgnoreList::default(),
    );
    assert!(files.len() > 2);
    for pair in files.windows(2) {
        assert_ne!(
            compare_entries(&pair[0], &pair[1]),
            Ordering::Greater,
            "{} sorted after {}",
            pair[0].path(),
            pair[1].path()
        );
        if pair[0].depth() == pair[1].depth()
            && pair[0].parent_path().eq_ignore_ascii_case(pair[1].parent_path())
            && pair[1].is_dir()
        {
            assert!(pair[0].is_dir(), "file {} before dir {}", pair[0].path(), pair[1].path());
        }
    }
    Ok(())
}

#[test]
fn test_search_paths_are_relative_with_forward_slashes() -> Result<(), Box<dyn std::error::Error>>
{
    let dir = tempdir()?;
    sample_project(dir.path())?;

    let files = search(dir.path(), "button", 15, 200, &IgnoreList::default());
    let mut found = paths(&files);
    found.sort_unstable();
    assert_eq!(
        found,
        vec!["src/components/Button.ts", "src/components/button.css"]
    );
    for entry in &files {
        assert!(!entry.path().starts_with('/'));
        assert!(!entry.path().contains('\\'));
        assert!(entry.absolute_path().ends_with(entry.path()));
    }
    Ok(())
}
