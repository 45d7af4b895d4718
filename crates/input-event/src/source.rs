//! Inbound events as seen by the observer.

use crate::Scancode;

/// Numeric id of the toolkit event type a handler is registered under.
pub type SourceId = i32;

/// An inbound toolkit event.
///
/// The observer itself only reads [`SourceEvent::source_id`]. The key payload
/// and consumption hooks are used by the built-in actions; toolkits whose
/// events have neither keep the defaults.
pub trait SourceEvent {
    /// Id used to resolve the handler for this event.
    fn source_id(&self) -> SourceId;

    /// Engine scancode for events that carry key input, `None` otherwise.
    fn scancode(&self) -> Option<Scancode> {
        None
    }

    /// Mark the event as consumed so the toolkit stops propagating it.
    ///
    /// Returns false if this kind of event cannot be consumed.
    fn consume(&self) -> bool {
        false
    }
}
