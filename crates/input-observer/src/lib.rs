//! Input Observer
//!
//! Routes toolkit input events into an engine event queue through a
//! configurable rule graph:
//! - a [`Registry`] resolves each event to a [`Handler`] by source id
//! - an action table binds executables per (handler, [`ActionMode`])
//! - a [`RelationGraph`] makes handlers cooperate (DEPEND / CAUSE / REVERT)
//!   or adjust each other's enablement (ENABLE / DISABLE)
//! - a [`KeyLatch`] debounces key state on its way to the engine
//!
//! [`Observer`] ties these together and is the type embedders construct and
//! drive. The pointer warp capability lives in [`pointer`].

mod action;
mod enablement;
mod error;
mod handler;
mod key_latch;
mod observer;
pub mod pointer;
mod registry;
mod relation;
pub mod test_support;

pub use action::ActionTable;
pub use enablement::Enablement;
pub use error::{Error, Result};
pub use handler::{ActionMode, Affection, Handler, RelationType};
pub use input_event::{
    CANCEL_KEYS, CANCEL_MOUSE, EngineEvent, EventKind, Scancode, SourceEvent, SourceId,
};
pub use key_latch::KeyLatch;
pub use observer::{Action, Observer};
pub use registry::Registry;
pub use relation::RelationGraph;
