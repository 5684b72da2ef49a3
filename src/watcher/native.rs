use crate::error::ConfigError;
use crate::event::{RawEvent, RawKind};
use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

/// Starts a non-recursive native watch on `watch_path`.
///
/// Every notification, including watcher errors, is forwarded to
/// `raw_event_tx` untouched. Failing to set the watch up means the platform
/// mechanism is unusable, which is a configuration problem.
pub fn setup_dir_watcher(
    watch_path: &Path,
    raw_event_tx: Sender<notify::Result<Event>>,
) -> Result<RecommendedWatcher, ConfigError> {
    let event_handler = move |res: notify::Result<Event>| {
        let _ = raw_event_tx.send(res);
    };

    let mut watcher = RecommendedWatcher::new(event_handler, Config::default())?;
    watcher.watch(watch_path, RecursiveMode::NonRecursive)?;

    Ok(watcher)
}

/// Translates one notify event into raw events for direct children of `root`.
///
/// When the directory flag cannot be read off the event, it is recovered
/// from the filesystem for paths that still exist and from `known` for
/// paths that are gone.
pub fn to_raw_events(event: Event, root: &Path, known: &BTreeSet<PathBuf>) -> Vec<RawEvent> {
    let is_child = |p: &PathBuf| p.parent() == Some(root);
    let was_dir = |p: &Path| known.contains(p);

    match event.kind {
        EventKind::Create(kind) => event
            .paths
            .into_iter()
            .filter(is_child)
            .map(|p| {
                let is_dir = match kind {
                    CreateKind::Folder => true,
                    CreateKind::File => false,
                    _ => p.is_dir(),
                };
                RawEvent::new(RawKind::Create, is_dir, p)
            })
            .collect(),

        EventKind::Remove(kind) => event
            .paths
            .into_iter()
            .filter(is_child)
            .map(|p| {
                let is_dir = match kind {
                    RemoveKind::Folder => true,
                    RemoveKind::File => false,
                    _ => was_dir(&p),
                };
                RawEvent::new(RawKind::Delete, is_dir, p)
            })
            .collect(),

        EventKind::Modify(ModifyKind::Name(mode)) => {
            let mut raws = Vec::with_capacity(event.paths.len());
            for (i, p) in event.paths.into_iter().enumerate() {
                let from = match mode {
                    RenameMode::From => true,
                    RenameMode::To => false,
                    RenameMode::Both => i == 0,
                    _ => !p.exists(),
                };
                if !is_child(&p) {
                    continue;
                }
                raws.push(if from {
                    let is_dir = was_dir(&p);
                    RawEvent::new(RawKind::MovedFrom, is_dir, p)
                } else {
                    let is_dir = p.is_dir();
                    RawEvent::new(RawKind::MovedTo, is_dir, p)
                });
            }
            raws
        }

        EventKind::Modify(_) => event
            .paths
            .into_iter()
            .filter(is_child)
            .map(|p| RawEvent::new(RawKind::Modify, false, p))
            .collect(),

        _ => Vec::new(),
    }
}
