use crate::config::{Backend, WatchConfig};
use crate::dispatch::CommandDispatcher;
use crate::error::{ConfigError, DirhookResult};
use crate::event::ChangeEvent;
use crate::snapshot::snapshot;
use crate::trigger::{RoundOutcome, TriggerAggregator, TriggerOutcome};
use crate::watcher::ChangeSource;
use crate::watcher::event_driven::EventDriven;
use crate::watcher::polling::Polling;
use tracing::info;

/// What happened while processing one unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundReport {
    pub succeeded: usize,
    pub failed: usize,
    pub trigger: TriggerOutcome,
}

impl RoundReport {
    pub fn dispatched(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Drives one backend forever: initial sync, then batch after batch.
///
/// Everything runs on the calling thread. Each command blocks the loop
/// until it exits.
pub struct WatchLoop {
    config: WatchConfig,
    dispatcher: CommandDispatcher,
    trigger: TriggerAggregator,
    source: Box<dyn ChangeSource>,
}

impl WatchLoop {
    /// Builds the loop with the backend selected in `config`.
    ///
    /// # Errors
    /// [`ConfigError::BackendUnavailable`] if the event-driven backend is
    /// selected but the native watch cannot be established.
    pub fn create(config: WatchConfig) -> Result<Self, ConfigError> {
        let source: Box<dyn ChangeSource> = match config.backend {
            Backend::Polling => Box::new(Polling::new(
                config.root.clone(),
                config.exclusion.clone(),
                config.interval,
            )),
            Backend::EventDriven => Box::new(EventDriven::create(
                config.root.clone(),
                config.exclusion.clone(),
            )?),
        };
        Ok(Self::with_source(config, source))
    }

    /// Builds the loop around an already constructed backend.
    pub fn with_source(config: WatchConfig, source: Box<dyn ChangeSource>) -> Self {
        WatchLoop {
            dispatcher: CommandDispatcher::new(&config.add_command, &config.delete_command),
            trigger: TriggerAggregator::new(config.trigger_command.clone()),
            config,
            source,
        }
    }

    /// Treats every directory currently under the root as newly added.
    ///
    /// The listing becomes the backend's baseline.
    pub fn initial_sync(&mut self) -> DirhookResult<RoundReport> {
        let baseline = snapshot(&self.config.root, self.config.exclusion.as_ref())?;
        let events: Vec<ChangeEvent> = baseline.iter().cloned().map(ChangeEvent::added).collect();

        let report = self.process(&events, RoundOutcome::default());
        self.source.seed(baseline);
        Ok(report)
    }

    /// Waits for the next batch from the backend and processes it.
    ///
    /// # Errors
    /// Listing failures and a closed event source are returned; command
    /// failures never are.
    pub fn run_round(&mut self) -> DirhookResult<RoundReport> {
        let events = self.source.next_batch()?;
        Ok(self.process(&events, RoundOutcome::default()))
    }

    /// Runs the initial sync and then rounds until an error ends the loop.
    pub fn run(&mut self) -> DirhookResult<()> {
        info!(
            root = %self.config.root.display(),
            backend = %self.config.backend,
            interval = self.config.interval.as_secs(),
            exclude = self.config.exclusion.as_ref().map(|r| r.as_str()),
            "watching"
        );

        self.initial_sync()?;
        loop {
            self.run_round()?;
        }
    }

    /// Dispatches every event, then makes one trigger decision for the lot.
    fn process(&self, events: &[ChangeEvent], outcome: RoundOutcome) -> RoundReport {
        let mut succeeded = 0;
        let mut failed = 0;

        let outcome = events.iter().fold(outcome, |outcome, event| {
            info!(kind = %event.kind, path = %event.path.display(), "detected {}", event.name);
            let result = self.dispatcher.dispatch(event);
            match result {
                Ok(()) => succeeded += 1,
                Err(_) => failed += 1,
            }
            outcome.record(&result)
        });

        RoundReport {
            succeeded,
            failed,
            trigger: self.trigger.maybe_trigger(outcome),
        }
    }
}
