// Entrypoint for the CLI application.
// - Keeps `main` small: parse flags, set up logging, run the command.
// - Errors are printed once here and mapped to an exit code.

use actions_cli::{cli::Cli, commands::execute_command, output};
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = execute_command(&cli) {
        tracing::debug!(error = ?e, "command failed");
        output::error(&e);
        std::process::exit(e.exit_code());
    }
}

/// Log to stderr. `-v` raises the level; `RUST_LOG` wins when set.
fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
