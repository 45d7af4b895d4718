//! Error type and result alias for the observer crate.

use std::result::Result as StdResult;

use input_event::SourceId;
use thiserror::Error;

use crate::ActionMode;

/// Convenient result type for the observer crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for the observer.
#[derive(Debug, Error)]
pub enum Error {
    /// Two handlers were registered under one source id.
    #[error("handlers {first} and {second} both claim source id {id}")]
    DuplicateSourceId {
        /// The contested source id.
        id: SourceId,
        /// Handler that sorted first.
        first: String,
        /// Handler that sorted second.
        second: String,
    },

    /// `map_action` on a pair that already has a binding.
    #[error("{handler} already has a {mode:?} action; use remap_action")]
    ActionAlreadyMapped {
        /// Handler that owns the binding.
        handler: String,
        /// Mode that is already bound.
        mode: ActionMode,
    },

    /// A key action received an event without key input.
    #[error("event from source {source_id} carries no key payload")]
    MissingKeyPayload {
        /// Source id of the offending event.
        source_id: SourceId,
    },

    /// The toolkit refused to consume an event.
    #[error("event from source {source_id} is not an input event")]
    NotConsumable {
        /// Source id of the offending event.
        source_id: SourceId,
    },

    /// The pointer warp capability failed.
    #[error("pointer warp failed: {0}")]
    Pointer(String),

    /// Failure reported by a bound action.
    #[error("action failed: {0}")]
    Action(String),
}

impl Error {
    /// Helper for actions that fail with a plain message.
    pub fn action<M: Into<String>>(msg: M) -> Self {
        Self::Action(msg.into())
    }

    /// True for toolkit-boundary mismatches, which are logged at error severity.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(
            self,
            Self::MissingKeyPayload { .. } | Self::NotConsumable { .. }
        )
    }
}
