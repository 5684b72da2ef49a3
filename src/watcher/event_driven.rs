use crate::error::{ConfigError, DirhookError, DirhookResult};
use crate::event::{ChangeEvent, ChangeKind, RawEvent, normalize};
use crate::snapshot::DirectorySet;
use crate::watcher::ChangeSource;
use crate::watcher::native::{setup_dir_watcher, to_raw_events};
use notify::{Event, RecommendedWatcher};
use regex::Regex;
use std::collections::{BTreeSet, VecDeque};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, channel};
use tracing::{debug, warn};

/// Detects changes from the platform's native filesystem notifications.
///
/// Each raw event is its own unit of work, so every batch holds at most
/// one change and is handed out in the order the events arrived.
///
/// Events that would not change the set of known child directories, such
/// as a second addition of the same path, produce an empty batch.
pub struct EventDriven {
    root: PathBuf,
    exclusion: Option<Regex>,
    raw_rx: Receiver<notify::Result<Event>>,
    pending: VecDeque<RawEvent>,
    known: BTreeSet<PathBuf>,
    _watcher: Option<RecommendedWatcher>,
}

impl EventDriven {
    /// Starts watching `root`.
    ///
    /// # Errors
    /// [`ConfigError::BackendUnavailable`] if the native mechanism cannot
    /// be set up on this platform or for this path.
    pub fn create(root: PathBuf, exclusion: Option<Regex>) -> Result<Self, ConfigError> {
        let (raw_tx, raw_rx) = channel();
        let watcher = setup_dir_watcher(&root, raw_tx)?;

        Ok(EventDriven {
            _watcher: Some(watcher),
            ..Self::from_channel(root, exclusion, raw_rx)
        })
    }

    /// Builds a backend fed by an existing channel instead of a native watch.
    pub fn from_channel(
        root: PathBuf,
        exclusion: Option<Regex>,
        raw_rx: Receiver<notify::Result<Event>>,
    ) -> Self {
        EventDriven {
            root,
            exclusion,
            raw_rx,
            pending: VecDeque::new(),
            known: BTreeSet::new(),
            _watcher: None,
        }
    }

    /// Blocks until a raw event is available.
    fn next_raw(&mut self) -> DirhookResult<RawEvent> {
        loop {
            if let Some(raw) = self.pending.pop_front() {
                return Ok(raw);
            }

            match self.raw_rx.recv() {
                Ok(Ok(event)) => {
                    self.pending
                        .extend(to_raw_events(event, &self.root, &self.known));
                }
                Ok(Err(e)) => warn!("native watcher error: {e}"),
                Err(_) => return Err(DirhookError::SourceClosed),
            }
        }
    }
}

impl ChangeSource for EventDriven {
    fn seed(&mut self, baseline: DirectorySet) {
        self.known = baseline.iter().cloned().collect();
    }

    fn next_batch(&mut self) -> DirhookResult<Vec<ChangeEvent>> {
        let raw = self.next_raw()?;
        let Some(event) = normalize(&raw, self.exclusion.as_ref()) else {
            return Ok(Vec::new());
        };

        // a rename is also reported as a combined event after its two halves,
        // and the initial listing may already cover queued creations
        let changed = match event.kind {
            ChangeKind::Added => self.known.insert(event.path.clone()),
            ChangeKind::Removed => self.known.remove(&event.path),
        };
        if !changed {
            debug!(kind = %event.kind, path = %event.path.display(), "already seen");
            return Ok(Vec::new());
        }
        Ok(vec![event])
    }
}
