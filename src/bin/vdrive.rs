//! vdrive CLI Binary
//!
//! Command-line interface for the in-memory virtual drive.

use anyhow::Context;
use clap::Parser;
use std::process;
use vdrive::logging::init_logging;
use vdrive::tooling::cli::{Cli, CliContext};

fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = cli.load_config().context("Failed to load configuration")?;
    // A broken logging setup should not block the command itself.
    if let Err(e) = init_logging(Some(&config.logging), cli.log_file.clone()) {
        eprintln!("Warning: logging disabled: {}", e);
    }
    let mut context = CliContext::new(config).context("Failed to initialize explorer session")?;
    let output = context.execute(&cli.command)?;
    Ok(output)
}

fn main() {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
