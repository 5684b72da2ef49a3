//! Change detection backends and the loop that drives them.
//!
//! Both backends implement [`ChangeSource`]: each call to
//! [`ChangeSource::next_batch`] blocks until the next unit of work is ready
//! and returns its events. The loop dispatches every event in a batch and
//! then makes one trigger decision for it, so the batch boundary is also
//! the trigger boundary:
//!
//! - [`polling::Polling`] returns one batch per polling round
//! - [`event_driven::EventDriven`] returns one batch per native event

pub mod event_driven;
pub mod native;
pub mod polling;
pub mod service;

use crate::error::DirhookResult;
use crate::event::ChangeEvent;
use crate::snapshot::DirectorySet;

pub trait ChangeSource {
    /// Hands over the listing taken during the initial sync.
    fn seed(&mut self, baseline: DirectorySet);

    /// Blocks until the next unit of work and returns its events.
    ///
    /// An empty batch is valid and means nothing relevant happened.
    fn next_batch(&mut self) -> DirhookResult<Vec<ChangeEvent>>;
}
