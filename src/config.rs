//! Command-line surface and the validated configuration it produces.

use crate::error::ConfigError;
use clap::{Parser, ValueEnum};
use regex::Regex;
use std::path::PathBuf;
use std::time::Duration;

/// How directory changes are discovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Compare listings of the root every interval.
    #[default]
    Polling,
    /// React to native filesystem events as they arrive.
    EventDriven,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Polling => f.write_str("polling"),
            Backend::EventDriven => f.write_str("event-driven"),
        }
    }
}

/// Run commands when child directories appear in or disappear from a directory.
///
/// Templates may contain `%p` (full path of the directory) and `%n` (its name).
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Cli {
    /// Directory whose immediate subdirectories are watched
    #[clap(short, long)]
    pub path: PathBuf,

    /// Command run for every added directory
    #[clap(short, long)]
    pub add: String,

    /// Command run for every removed directory
    #[clap(short, long)]
    pub delete: String,

    /// Regex; subdirectories whose name matches are ignored
    #[clap(short, long)]
    pub exclude: Option<String>,

    /// Command run after a round (or event) with at least one successful command
    #[clap(short, long)]
    pub trigger: Option<String>,

    /// Change detection backend
    #[clap(short, long, value_enum, default_value_t = Backend::Polling)]
    pub backend: Backend,

    /// Seconds between polling rounds
    #[clap(short, long, default_value_t = 1)]
    pub interval: u64,

    /// Log successful commands as well as failures
    #[clap(short, long)]
    pub verbose: bool,

    /// Colorize log output
    #[clap(short, long)]
    pub color: bool,
}

/// Everything the watch loop needs, fixed for the daemon's lifetime.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub root: PathBuf,
    pub exclusion: Option<Regex>,
    pub add_command: String,
    pub delete_command: String,
    pub trigger_command: Option<String>,
    pub backend: Backend,
    pub interval: Duration,
}

impl WatchConfig {
    /// Polling config with a one second interval and no exclusion or trigger.
    pub fn new(
        root: impl Into<PathBuf>,
        add_command: impl Into<String>,
        delete_command: impl Into<String>,
    ) -> Self {
        WatchConfig {
            root: root.into(),
            exclusion: None,
            add_command: add_command.into(),
            delete_command: delete_command.into(),
            trigger_command: None,
            backend: Backend::Polling,
            interval: Duration::from_secs(1),
        }
    }

    /// Checks the invariants the watch loop relies on.
    ///
    /// The root is canonicalised so every reported path is absolute.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if !self.root.exists() {
            return Err(ConfigError::MissingRoot(self.root));
        }
        if !self.root.is_dir() {
            return Err(ConfigError::NotADirectory(self.root));
        }
        self.root = self.root.canonicalize()?;

        if self.add_command.trim().is_empty() {
            return Err(ConfigError::EmptyCommand("add"));
        }
        if self.delete_command.trim().is_empty() {
            return Err(ConfigError::EmptyCommand("delete"));
        }
        if self.interval.is_zero() {
            return Err(ConfigError::InvalidInterval(0));
        }

        self.trigger_command = self.trigger_command.filter(|t| !t.trim().is_empty());
        Ok(self)
    }
}

impl Cli {
    pub fn into_config(self) -> Result<WatchConfig, ConfigError> {
        if self.interval < 1 {
            return Err(ConfigError::InvalidInterval(self.interval));
        }

        let exclusion = self
            .exclude
            .filter(|e| !e.is_empty())
            .map(|e| Regex::new(&e))
            .transpose()?;

        WatchConfig {
            root: self.path,
            exclusion,
            add_command: self.add,
            delete_command: self.delete,
            trigger_command: self.trigger,
            backend: self.backend,
            interval: Duration::from_secs(self.interval),
        }
        .validate()
    }
}
