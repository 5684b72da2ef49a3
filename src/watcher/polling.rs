use crate::error::DirhookResult;
use crate::event::ChangeEvent;
use crate::snapshot::{DirectorySet, diff::diff, snapshot_into};
use crate::watcher::ChangeSource;
use regex::Regex;
use std::path::PathBuf;
use std::{mem, thread, time::Duration};

/// Detects changes by diffing listings of the root taken `interval` apart.
///
/// The two listings live in buffers owned by the backend and are swapped
/// after every round instead of being reallocated.
pub struct Polling {
    root: PathBuf,
    exclusion: Option<Regex>,
    interval: Duration,
    previous: DirectorySet,
    current: DirectorySet,
}

impl Polling {
    pub fn new(root: PathBuf, exclusion: Option<Regex>, interval: Duration) -> Self {
        Polling {
            root,
            exclusion,
            interval,
            previous: DirectorySet::default(),
            current: DirectorySet::default(),
        }
    }

    /// The listing the next round will be compared against.
    pub fn baseline(&self) -> &DirectorySet {
        &self.previous
    }

    /// Takes a listing and diffs it against the baseline, without sleeping.
    ///
    /// Removals come before additions in the returned batch. On a listing
    /// error the baseline is left untouched.
    pub fn poll(&mut self) -> DirhookResult<Vec<ChangeEvent>> {
        snapshot_into(&self.root, self.exclusion.as_ref(), &mut self.current)?;
        let changes = diff(&self.previous, &self.current);
        mem::swap(&mut self.previous, &mut self.current);

        let removed = changes.removed.iter().cloned().map(ChangeEvent::removed);
        let added = changes.added.iter().cloned().map(ChangeEvent::added);
        Ok(removed.chain(added).collect())
    }
}

impl ChangeSource for Polling {
    fn seed(&mut self, baseline: DirectorySet) {
        self.previous = baseline;
    }

    fn next_batch(&mut self) -> DirhookResult<Vec<ChangeEvent>> {
        thread::sleep(self.interval);
        self.poll()
    }
}
