use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("watch root does not exist: {0}")]
    MissingRoot(PathBuf),

    #[error("watch root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("interval must be a whole number of seconds >= 1, got {0}")]
    InvalidInterval(u64),

    #[error("invalid exclusion pattern: {0}")]
    InvalidExclusion(#[from] regex::Error),

    #[error("{0} command must not be empty")]
    EmptyCommand(&'static str),

    #[error("event-driven backend unavailable: {0}")]
    BackendUnavailable(#[from] notify::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("refusing to run an empty command")]
    EmptyCommand,

    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` failed with {status}")]
    Failed { command: String, status: ExitStatus },

    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(PathBuf),
}

#[derive(Debug, Error)]
pub enum DirhookError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("cannot list {path}: {source}")]
    Listing {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("native event source closed")]
    SourceClosed,

    #[error("malformed event line: {0:?}")]
    MalformedEvent(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type DirhookResult<T> = Result<T, DirhookError>;
