use clap::Parser;
use dirhook::config::Cli;
use dirhook::logging;
use dirhook::watcher::service::WatchLoop;
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    // clap exits with 2 on bad usage; configuration errors are 1 here
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    logging::init(cli.verbose, cli.color);

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut watch = match WatchLoop::create(config) {
        Ok(watch) => watch,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = watch.run() {
        error!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
