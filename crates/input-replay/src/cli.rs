//! Command-line interface definitions for input-replay.

use std::path::PathBuf;

use clap::Parser;
use logging::LogArgs;

/// Command-line interface for the `input-replay` binary.
#[derive(Parser, Debug)]
#[command(
    name = "input-replay",
    about = "Replay a scripted event scenario through the input observer",
    version
)]
pub struct Cli {
    /// Logging controls.
    #[command(flatten)]
    pub log: LogArgs,

    /// Scenario file in RON syntax.
    #[arg(value_name = "SCENARIO")]
    pub scenario: PathBuf,

    /// Skip the built-in rule set; only the scenario's rules apply.
    #[arg(long)]
    pub bare: bool,
}
