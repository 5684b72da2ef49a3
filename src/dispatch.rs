//! Rendering of command templates and running them through the shell.
//!
//! Rendering and execution are kept apart: [`render`] is a pure string
//! transformation, and [`run_command`] only ever sees a finished command.

use crate::error::DispatchError;
use crate::event::{ChangeEvent, ChangeKind};
use std::process::Command;
use tracing::{error, info, warn};

/// Substitutes `%p` with `path` and `%n` with `name`, verbatim.
///
/// No shell escaping is applied. `%p` is replaced first, so a path that
/// itself contains `%n` is expanded as well.
pub fn render(template: &str, path: &str, name: &str) -> String {
    template.replace("%p", path).replace("%n", name)
}

/// Runs a rendered command with `sh -c`, inheriting stdout and stderr.
///
/// # Errors
/// - [`DispatchError::EmptyCommand`] if `command` is blank
/// - [`DispatchError::Spawn`] if the shell cannot be started
/// - [`DispatchError::Failed`] on a nonzero exit or death by signal
pub fn run_command(command: &str) -> Result<(), DispatchError> {
    if command.trim().is_empty() {
        return Err(DispatchError::EmptyCommand);
    }

    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .status()
        .map_err(|source| DispatchError::Spawn {
            command: command.to_string(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(DispatchError::Failed {
            command: command.to_string(),
            status,
        })
    }
}

/// Maps change events onto the add and delete templates.
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    add: String,
    delete: String,
}

impl CommandDispatcher {
    pub fn new(add: impl Into<String>, delete: impl Into<String>) -> Self {
        CommandDispatcher {
            add: add.into(),
            delete: delete.into(),
        }
    }

    pub fn template_for(&self, kind: ChangeKind) -> &str {
        match kind {
            ChangeKind::Added => &self.add,
            ChangeKind::Removed => &self.delete,
        }
    }

    /// Runs the command matching `event.kind` for this one event.
    ///
    /// Failures are logged here and handed back to the caller, which only
    /// uses them to decide whether the round had any success.
    ///
    /// Paths that are not valid UTF-8 cannot be spelled inside a command
    /// string and fail without running anything.
    pub fn dispatch(&self, event: &ChangeEvent) -> Result<(), DispatchError> {
        let Some(path) = event.path.to_str() else {
            warn!(kind = %event.kind, path = %event.path.display(), "skipping non UTF-8 path");
            return Err(DispatchError::NonUtf8Path(event.path.clone()));
        };
        let command = render(self.template_for(event.kind), path, &event.name);

        match run_command(&command) {
            Ok(()) => {
                info!(status = "ok", kind = %event.kind, path = %path, "{command}");
                Ok(())
            }
            Err(e) => {
                error!(kind = %event.kind, path = %path, command = %command, "{e}");
                Err(e)
            }
        }
    }
}
