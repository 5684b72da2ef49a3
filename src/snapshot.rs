//! Listing of the immediate child directories of a watch root.
//!
//! A [`DirectorySet`] is the sorted, duplicate-free collection of absolute
//! child-directory paths that the polling backend compares round after
//! round. The sort order is load-bearing: [`diff::diff`] walks two sets in
//! lockstep and relies on both being ordered the same way.
//!
//! ```rust,no_run
//! use dirhook::snapshot::{diff::diff, snapshot, DirectorySet};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let current = snapshot(Path::new("/srv/tenants"), None)?;
//! let changes = diff(&DirectorySet::default(), &current);
//! assert_eq!(changes.added, current);
//! # Ok(())
//! # }
//! ```

pub mod diff;

use crate::error::{DirhookError, DirhookResult};
use rayon::prelude::*;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// An ordered, duplicate-free set of absolute child-directory paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorySet {
    paths: Vec<PathBuf>,
}

impl DirectorySet {
    /// Builds a set from arbitrary paths, sorting and deduplicating them.
    pub fn from_paths<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut paths: Vec<PathBuf> = paths.into_iter().collect();
        paths.sort();
        paths.dedup();
        DirectorySet { paths }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.binary_search_by(|p| p.as_path().cmp(path)).is_ok()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.paths.iter()
    }

    pub(crate) fn push_sorted(&mut self, path: PathBuf) {
        debug_assert!(self.paths.last().is_none_or(|last| *last < path));
        self.paths.push(path);
    }
}

impl<'a> IntoIterator for &'a DirectorySet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// Returns true when `name` matches the exclusion pattern, if any.
///
/// Both backends route their basename checks through here so a name is
/// excluded the same way whether it was seen by a listing or an event.
pub fn is_excluded(name: &str, exclusion: Option<&Regex>) -> bool {
    exclusion.is_some_and(|re| re.is_match(name))
}

/// Lists the direct child directories of `root` that are not excluded.
///
/// # Errors
/// Returns [`DirhookError::Listing`] if `root` cannot be read.
pub fn snapshot(root: &Path, exclusion: Option<&Regex>) -> DirhookResult<DirectorySet> {
    let mut set = DirectorySet::default();
    snapshot_into(root, exclusion, &mut set)?;
    Ok(set)
}

/// Refills `set` with the current child directories of `root`.
///
/// The previous contents of `set` are discarded but its buffer is reused.
/// Entry type checks run on the rayon pool; the set is only written once
/// every check has finished, then sorted.
///
/// Entries that vanish between the directory read and the type check are
/// skipped rather than failing the whole listing.
pub fn snapshot_into(
    root: &Path,
    exclusion: Option<&Regex>,
    set: &mut DirectorySet,
) -> DirhookResult<()> {
    let listing_error = |source: std::io::Error| DirhookError::Listing {
        path: root.to_path_buf(),
        source,
    };

    let entries = fs::read_dir(root)
        .map_err(listing_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(listing_error)?;

    let found: Vec<PathBuf> = entries
        .into_par_iter()
        .filter_map(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if is_excluded(&name, exclusion) {
                return None;
            }
            let ft = entry.file_type().ok()?;
            if ft.is_dir() { Some(entry.path()) } else { None }
        })
        .collect();

    set.paths.clear();
    set.paths.extend(found);
    set.paths.sort();
    set.paths.dedup();
    Ok(())
}
