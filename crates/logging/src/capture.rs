//! Collect rendered tracing events in memory.
//!
//! Install [`Captured::layer`] in a subscriber and inspect
//! [`Captured::records`] afterwards. Used by tests that assert on what was
//! logged and at which level.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::fmt::{self, RenderedLog};

/// Shared buffer of rendered events.
#[derive(Debug, Clone, Default)]
pub struct Captured {
    /// Rendered events in arrival order.
    records: Arc<Mutex<Vec<RenderedLog>>>,
}

impl Captured {
    /// Empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer that appends every event to this buffer.
    pub fn layer(&self) -> CaptureLayer {
        CaptureLayer {
            records: self.records.clone(),
        }
    }

    /// Events captured so far.
    pub fn records(&self) -> Vec<RenderedLog> {
        self.records.lock().clone()
    }

    /// True if an event with this level and message was captured.
    pub fn contains(&self, level: &str, message: &str) -> bool {
        self.records
            .lock()
            .iter()
            .any(|r| r.level == level && r.message == message)
    }
}

/// Tracing layer that renders events into a [`Captured`] buffer.
pub struct CaptureLayer {
    /// Destination buffer.
    records: Arc<Mutex<Vec<RenderedLog>>>,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let r = fmt::render_event(event);
        self.records.lock().push(r);
    }
}

#[cfg(test)]
mod tests {
    use tracing::subscriber;
    use tracing_subscriber::{prelude::*, registry};

    use super::*;

    #[test]
    fn captures_level_and_message() {
        let captured = Captured::new();
        let sub = registry().with(captured.layer());
        subscriber::with_default(sub, || {
            tracing::warn!(code = 7, "something_odd");
            tracing::info!(answer = 42);
        });
        assert!(captured.contains("WARN", "something_odd"));
        let records = captured.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].message, "answer=42");
    }
}
