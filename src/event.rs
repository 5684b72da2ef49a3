//! Raw native events and their normalization into [`ChangeEvent`]s.

use crate::error::DirhookError;
use crate::snapshot::is_excluded;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Removed,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Added => f.write_str("added"),
            ChangeKind::Removed => f.write_str("removed"),
        }
    }
}

/// A child directory that appeared or disappeared under the watch root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub path: PathBuf,
    pub name: String,
    pub kind: ChangeKind,
}

impl ChangeEvent {
    pub fn new(path: PathBuf, kind: ChangeKind) -> Self {
        let name = basename(&path);
        ChangeEvent { path, name, kind }
    }

    pub fn added(path: PathBuf) -> Self {
        Self::new(path, ChangeKind::Added)
    }

    pub fn removed(path: PathBuf) -> Self {
        Self::new(path, ChangeKind::Removed)
    }
}

pub(crate) fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKind {
    Create,
    Delete,
    MovedFrom,
    MovedTo,
    Modify,
    Other,
}

/// One event as reported by the native watch mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub kinds: Vec<RawKind>,
    pub is_dir: bool,
    pub path: PathBuf,
}

impl RawEvent {
    pub fn new(kind: RawKind, is_dir: bool, path: impl Into<PathBuf>) -> Self {
        RawEvent {
            kinds: vec![kind],
            is_dir,
            path: path.into(),
        }
    }

    fn has(&self, kind: RawKind) -> bool {
        self.kinds.contains(&kind)
    }
}

/// Parses lines of the form `CREATE,ISDIR /watch/foo`.
///
/// The path is everything after the first space, so paths containing
/// spaces survive intact.
impl FromStr for RawEvent {
    type Err = DirhookError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (tags, path) = line
            .split_once(' ')
            .filter(|(tags, path)| !tags.is_empty() && !path.is_empty())
            .ok_or_else(|| DirhookError::MalformedEvent(line.to_string()))?;

        let mut kinds = Vec::new();
        let mut is_dir = false;
        for tag in tags.split(',') {
            match tag {
                "ISDIR" => is_dir = true,
                "CREATE" => kinds.push(RawKind::Create),
                "DELETE" => kinds.push(RawKind::Delete),
                "MOVED_FROM" => kinds.push(RawKind::MovedFrom),
                "MOVED_TO" => kinds.push(RawKind::MovedTo),
                "MODIFY" => kinds.push(RawKind::Modify),
                _ => kinds.push(RawKind::Other),
            }
        }

        Ok(RawEvent {
            kinds,
            is_dir,
            path: PathBuf::from(path),
        })
    }
}

/// Classifies a raw event, dropping anything that is not a directory
/// appearing or disappearing.
///
/// Excluded basenames are dropped with the same test the listing uses.
pub fn normalize(raw: &RawEvent, exclusion: Option<&Regex>) -> Option<ChangeEvent> {
    if !raw.is_dir {
        return None;
    }

    let kind = if raw.has(RawKind::Create) || raw.has(RawKind::MovedTo) {
        ChangeKind::Added
    } else if raw.has(RawKind::Delete) || raw.has(RawKind::MovedFrom) {
        ChangeKind::Removed
    } else {
        return None;
    };

    let name = basename(&raw.path);
    if name.is_empty() || is_excluded(&name, exclusion) {
        return None;
    }

    Some(ChangeEvent {
        path: raw.path.clone(),
        name,
        kind,
    })
}
