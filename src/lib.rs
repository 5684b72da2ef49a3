//! # dirhook
//!
//! A daemon library that watches one directory for immediate child
//! directories appearing and disappearing, and runs user-supplied commands
//! in response.
//!
//! ## Features
//!
//! - **Two backends**: periodic listing diffs ([`watcher::polling`]) or
//!   native filesystem notifications ([`watcher::event_driven`])
//! - **Command templates**: `%p` expands to the directory's full path and
//!   `%n` to its name
//! - **Trigger command**: one aggregate command after a unit of work that
//!   had at least one successful dispatch
//! - **Exclusion**: a regex suppressing matching directory names in both
//!   backends
//! - **Failure isolation**: a failing command is logged and never stops the
//!   loop
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dirhook::config::WatchConfig;
//! use dirhook::watcher::service::WatchLoop;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = WatchConfig::new(
//!     "/srv/tenants",
//!     "provision.sh --path %p --name %n",
//!     "teardown.sh --name %n",
//! );
//! config.trigger_command = Some("systemctl reload nginx".into());
//!
//! let mut watch = WatchLoop::create(config.validate()?)?;
//! watch.run()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Units of work
//!
//! The polling backend collects every change between two listings into a
//! single round and decides on the trigger once per round. The event-driven
//! backend treats each native event as its own unit, so the trigger may run
//! once per event.
//!
//! ## Error Handling
//!
//! Fallible operations return [`DirhookResult<T>`], wrapping
//! [`DirhookError`]. Only configuration problems, an unreadable root and a
//! closed event source ever reach the caller.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod logging;
pub mod snapshot;
pub mod trigger;
pub mod watcher;

pub use error::{DirhookError, DirhookResult};
