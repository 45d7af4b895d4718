//! Log setup for the observer workspace.
//!
//! [`LogArgs`] is flattened into a binary's clap parser and turned into an
//! [`EnvFilter`] with [`LogArgs::env_filter`]. Level flags only raise the
//! workspace crates; dependencies stay at their default. [`fmt`] renders
//! events as logfmt and [`capture`] keeps them in memory for tests.

use std::env;

use clap::Args;
use tracing::Level;
use tracing_subscriber::EnvFilter;

pub mod capture;
pub mod fmt;

/// Targets the level flags apply to.
const WORKSPACE_TARGETS: &[&str] = &["input_observer", "input_event", "input_replay", "logging"];

/// Verbosity flags shared by the workspace binaries.
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Log every dispatch phase and latch change
    #[arg(long, conflicts_with_all = ["debug", "log_level", "log_filter"])]
    pub trace: bool,

    /// Log rule changes and dispatched events
    #[arg(long, conflicts_with_all = ["trace", "log_level", "log_filter"])]
    pub debug: bool,

    /// Level for the workspace crates (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<Level>,

    /// Raw filter directives, e.g. "input_observer::observer=trace";
    /// overrides every other flag and RUST_LOG
    #[arg(long, value_name = "DIRECTIVES")]
    pub log_filter: Option<String>,
}

impl LogArgs {
    /// Level requested through `--trace`, `--debug` or `--log-level`.
    fn level(&self) -> Option<Level> {
        if self.trace {
            Some(Level::TRACE)
        } else if self.debug {
            Some(Level::DEBUG)
        } else {
            self.log_level
        }
    }

    /// Filter directives these flags select.
    ///
    /// `--log-filter` wins, then a level flag, then `RUST_LOG`; with none of
    /// them the workspace crates log at `info`.
    pub fn directives(&self) -> String {
        if let Some(filter) = &self.log_filter {
            return filter.clone();
        }
        match self.level() {
            Some(level) => workspace_at(level),
            None => env::var(EnvFilter::DEFAULT_ENV)
                .unwrap_or_else(|_| workspace_at(Level::INFO)),
        }
    }

    /// Filter for a subscriber built from these flags.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::new(self.directives())
    }
}

/// Directives setting every workspace target to `level`.
fn workspace_at(level: Level) -> String {
    let level = level.to_string().to_ascii_lowercase();
    WORKSPACE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
