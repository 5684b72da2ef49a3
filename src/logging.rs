use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Installs the global subscriber writing to stdout and stderr.
pub fn init(verbose: bool, color: bool) {
    let _ = tracing::subscriber::set_global_default(subscriber(
        verbose,
        color,
        std::io::stdout,
        std::io::stderr,
    ));
}

/// Builds the daemon's subscriber over arbitrary output streams.
///
/// Warnings and errors always go to `err`. Everything else goes to `out`
/// and is only emitted in verbose mode.
pub fn subscriber<O, E>(
    verbose: bool,
    color: bool,
    out: O,
    err: E,
) -> impl Subscriber + Send + Sync + 'static
where
    O: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    E: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let max_level = if verbose { Level::INFO } else { Level::WARN };
    let writer = err.with_max_level(Level::WARN).or_else(out);

    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(writer)
        .with_ansi(color)
        .with_target(false)
        .finish()
}
