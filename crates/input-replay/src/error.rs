//! Error handling for the input-replay crate.

use std::{io, result};

use thiserror::Error;

/// Convenient result type for input-replay operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while replaying a scenario.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The scenario file is not valid RON for the scenario schema.
    #[error("Scenario error: {0}")]
    Scenario(#[from] ron::error::SpannedError),
    /// The observer rejected its configuration.
    #[error("Observer error: {0}")]
    Observer(#[from] input_observer::Error),
    /// A rule names a handler the demo set does not have.
    #[error("Unknown handler {0:?}")]
    UnknownHandler(String),
}
