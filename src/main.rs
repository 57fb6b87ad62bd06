//! typeahead - a terminal text editor with real-time word completion
//!
//! This is the main entry point. It parses CLI arguments, sets up logging
//! and hands over to the terminal runner.

use clap::Parser;
use tracing::error;

use typeahead::{cli, config, logging, run, user_config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli::Cli::parse();
    let _log_guard = logging::init(cli.log_file.as_deref(), cli.debug)?;

    // Compiled-in defaults, then CLI overrides
    let mut config = config::Config::default();
    user_config::configure(&mut config);
    cli.apply_to_config(&mut config);

    if !run::is_interactive() {
        eprintln!("typeahead needs an interactive terminal");
        std::process::exit(1);
    }

    let file = cli
        .file
        .as_deref()
        .map(run::validate_file_path)
        .transpose()?;

    if let Err(e) = run::run_terminal_mode(file.as_deref(), &config) {
        error!(error = %e, "editor failed");
        return Err(e);
    }
    Ok(())
}
