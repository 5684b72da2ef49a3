//! The batch command fired after a unit of work with at least one success.

use crate::dispatch::run_command;
use crate::error::DispatchError;
use tracing::{error, info};

/// Whether any dispatch in the current unit of work succeeded.
///
/// A fresh outcome is created for every round (polling) or event
/// (event-driven) and passed by value through the processing of that unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundOutcome {
    pub any_success: bool,
}

impl RoundOutcome {
    #[must_use]
    pub fn record(self, result: &Result<(), DispatchError>) -> Self {
        RoundOutcome {
            any_success: self.any_success || result.is_ok(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    Fired,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, Default)]
pub struct TriggerAggregator {
    template: Option<String>,
}

impl TriggerAggregator {
    /// An empty template is the same as no trigger at all.
    pub fn new(template: Option<String>) -> Self {
        TriggerAggregator {
            template: template.filter(|t| !t.trim().is_empty()),
        }
    }

    /// Runs the trigger if one is configured and `outcome` saw a success.
    ///
    /// A failing trigger is logged and reported, never propagated.
    pub fn maybe_trigger(&self, outcome: RoundOutcome) -> TriggerOutcome {
        let Some(template) = self.template.as_deref() else {
            return TriggerOutcome::Skipped;
        };
        if !outcome.any_success {
            return TriggerOutcome::Skipped;
        }

        match run_command(template) {
            Ok(()) => {
                info!(status = "ok", "trigger: {template}");
                TriggerOutcome::Fired
            }
            Err(e) => {
                error!(command = %template, "trigger failed: {e}");
                TriggerOutcome::Failed
            }
        }
    }
}
