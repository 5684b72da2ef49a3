use dirhook::error::{DirhookError, DirhookResult};
use dirhook::snapshot::diff::diff;
use dirhook::snapshot::{DirectorySet, snapshot};
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper: a set of absolute paths under a fake root
fn set(names: &[&str]) -> DirectorySet {
    DirectorySet::from_paths(names.iter().map(|n| PathBuf::from("/watch").join(n)))
}

#[test]
fn snapshot_lists_only_direct_child_directories() -> DirhookResult<()> {
    let tmpdir = TempDir::new()?;
    let root = tmpdir.path();

    fs::create_dir(root.join("beta"))?;
    fs::create_dir(root.join("alpha"))?;
    fs::create_dir_all(root.join("alpha/nested/deeper"))?;
    fs::write(root.join("file.txt"), "not a directory")?;

    let listed = snapshot(root, None)?;
    assert_eq!(
        listed.paths(),
        &[root.join("alpha"), root.join("beta")],
        "only immediate subdirectories, sorted"
    );

    Ok(())
}

#[test]
fn snapshot_treats_dot_directories_as_ordinary() -> DirhookResult<()> {
    let tmpdir = TempDir::new()?;
    let root = tmpdir.path();

    fs::create_dir(root.join(".hidden"))?;
    fs::create_dir(root.join("visible"))?;

    let listed = snapshot(root, None)?;
    assert_eq!(listed.len(), 2);
    assert!(listed.contains(&root.join(".hidden")));

    Ok(())
}

#[test]
fn snapshot_applies_exclusion_to_names() -> DirhookResult<()> {
    let tmpdir = TempDir::new()?;
    let root = tmpdir.path();

    for name in ["keep", "skip-me", "tmp-1", "tmp-2"] {
        fs::create_dir(root.join(name))?;
    }

    let exclusion = Regex::new("^(tmp-|skip)").unwrap();
    let listed = snapshot(root, Some(&exclusion))?;
    assert_eq!(listed.paths(), &[root.join("keep")]);

    Ok(())
}

#[test]
fn snapshot_of_large_tree_is_sorted_and_complete() -> DirhookResult<()> {
    let tmpdir = TempDir::new()?;
    let root = tmpdir.path();

    for i in (0..200).rev() {
        fs::create_dir(root.join(format!("tenant-{i:03}")))?;
        fs::write(root.join(format!("file-{i:03}")), "")?;
    }

    let listed = snapshot(root, None)?;
    assert_eq!(listed.len(), 200);
    assert!(listed.paths().windows(2).all(|w| w[0] < w[1]));

    Ok(())
}

#[test]
fn snapshot_of_missing_root_is_a_listing_error() {
    let tmpdir = TempDir::new().unwrap();
    let missing = tmpdir.path().join("gone");

    let result = snapshot(&missing, None);
    assert!(matches!(result, Err(DirhookError::Listing { .. })));
}

#[test]
fn diff_reports_additions_and_removals() {
    let previous = set(&["a", "b", "c"]);
    let current = set(&["b", "c", "d", "e"]);

    let changes = diff(&previous, &current);
    assert_eq!(changes.added, set(&["d", "e"]));
    assert_eq!(changes.removed, set(&["a"]));
}

#[test]
fn diff_of_identical_sets_is_empty() {
    let previous = set(&["a", "b"]);
    let changes = diff(&previous, &previous.clone());
    assert!(changes.is_empty());
}

#[test]
fn diff_from_empty_adds_everything() {
    let current = set(&["x", "y"]);
    let changes = diff(&DirectorySet::default(), &current);
    assert_eq!(changes.added, current);
    assert!(changes.removed.is_empty());
}

#[test]
fn diff_to_empty_removes_everything() {
    let previous = set(&["x", "y"]);
    let changes = diff(&previous, &DirectorySet::default());
    assert!(changes.added.is_empty());
    assert_eq!(changes.removed, previous);
}

#[test]
fn diff_satisfies_reconstruction_law() {
    let cases = [
        (set(&[]), set(&[])),
        (set(&["a"]), set(&["b"])),
        (set(&["a", "c", "e", "g"]), set(&["b", "c", "d", "g", "h"])),
        (set(&["m", "n"]), set(&["a", "m", "n", "z"])),
    ];

    for (previous, current) in cases {
        let changes = diff(&previous, &current);

        let added: BTreeSet<_> = changes.added.iter().collect();
        let removed: BTreeSet<_> = changes.removed.iter().collect();
        assert!(added.is_disjoint(&removed));

        let lhs: BTreeSet<_> = previous.iter().chain(changes.added.iter()).collect();
        let rhs: BTreeSet<_> = current.iter().chain(changes.removed.iter()).collect();
        assert_eq!(lhs, rhs);
    }
}

#[test]
fn directory_set_sorts_and_deduplicates() {
    let built = DirectorySet::from_paths(vec![
        PathBuf::from("/watch/b"),
        PathBuf::from("/watch/a"),
        PathBuf::from("/watch/b"),
    ]);
    assert_eq!(built, set(&["a", "b"]));
}
