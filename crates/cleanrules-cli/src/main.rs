use std::io;
use std::process::ExitCode;

use clap::Parser;
use cleanrules_cli::{run, Cli};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    let settings_dir = cleanrules_core::settings_dir();
    let mut stdout = io::stdout().lock();

    match run(cli, &settings_dir, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so rendered rules on stdout stay pipeable.
fn init_logging() {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .try_init();
}
