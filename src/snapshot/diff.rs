use super::DirectorySet;
use std::cmp::Ordering;

/// The paths that appeared and disappeared between two listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotDiff {
    pub added: DirectorySet,
    pub removed: DirectorySet,
}

impl SnapshotDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Computes `current - previous` and `previous - current`.
///
/// Both inputs are sorted and duplicate-free, so a single merge pass over
/// the two sets is enough; the outputs come out sorted as well.
pub fn diff(previous: &DirectorySet, current: &DirectorySet) -> SnapshotDiff {
    let mut out = SnapshotDiff::default();
    let mut prev = previous.iter().peekable();
    let mut curr = current.iter().peekable();

    loop {
        match (prev.peek(), curr.peek()) {
            (Some(p), Some(c)) => match p.cmp(c) {
                Ordering::Less => {
                    out.removed.push_sorted((*p).clone());
                    prev.next();
                }
                Ordering::Greater => {
                    out.added.push_sorted((*c).clone());
                    curr.next();
                }
                Ordering::Equal => {
                    prev.next();
                    curr.next();
                }
            },
            (Some(p), None) => {
                out.removed.push_sorted((*p).clone());
                prev.next();
            }
            (None, Some(c)) => {
                out.added.push_sorted((*c).clone());
                curr.next();
            }
            (None, None) => break,
        }
    }

    out
}
