//! input-event: the event vocabulary shared by the observer and its embedders.
//!
//! - [`SourceEvent`]: what an inbound toolkit event must expose to be observed.
//! - [`EngineEvent`]: the normalized `{kind, data1, data2, data3}` record handed
//!   to the downstream engine, plus the [`CANCEL_KEYS`] and [`CANCEL_MOUSE`]
//!   sentinels.
//! - [`Scancode`]: the engine-side key identifier carried by key events.
//!
//! Translating toolkit keycodes into scancodes is left to the embedder.

mod engine;
pub use engine::{CANCEL_KEYS, CANCEL_MOUSE, EngineEvent, EventKind};

mod scancode;
pub use scancode::{SCANCODE_COUNT, Scancode};

mod source;
pub use source::{SourceEvent, SourceId};
