//! Entry point for the `input-replay` binary.

mod cli;
mod error;
mod handlers;
mod replay;
mod scenario;

use std::{fs, io, process};

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, registry};

use crate::{cli::Cli, error::Result, scenario::Scenario};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, and replay the scenario.
fn run() -> Result<()> {
    let Cli {
        log,
        scenario,
        bare,
    } = Cli::parse();
    registry()
        .with(log.env_filter())
        .with(fmt::layer().without_time().with_writer(io::stderr))
        .try_init()
        .ok();

    let text = fs::read_to_string(&scenario)?;
    let parsed = Scenario::parse(&text)?;
    info!(
        path = %scenario.display(),
        rules = parsed.rules.len(),
        events = parsed.events.len(),
        "scenario_loaded"
    );

    handlers::install_pointer();
    for event in replay::replay(&parsed, !bare)? {
        println!("{event}");
    }
    Ok(())
}
