//! Lookup of handlers by source event id.

use input_event::SourceId;
use tracing::debug;

use crate::{Error, Handler, Result};

/// Immutable handler set sorted by source id.
///
/// Built once at startup; [`Registry::find_by_id`] is the only lookup path.
#[derive(Debug, Clone)]
pub struct Registry<H> {
    /// Handlers in ascending source-id order.
    by_id: Box<[H]>,
}

impl<H: Handler> Registry<H> {
    /// Sort `handlers` by source id, rejecting duplicate ids.
    pub fn new(handlers: impl IntoIterator<Item = H>) -> Result<Self> {
        let mut sorted: Vec<H> = handlers.into_iter().collect();
        sorted.sort_by_key(|h| h.source_id());
        if let Some(pair) = sorted
            .windows(2)
            .find(|w| w[0].source_id() == w[1].source_id())
        {
            return Err(Error::DuplicateSourceId {
                id: pair[0].source_id(),
                first: format!("{:?}", pair[0]),
                second: format!("{:?}", pair[1]),
            });
        }
        debug!(count = sorted.len(), "registry_built");
        Ok(Self {
            by_id: sorted.into_boxed_slice(),
        })
    }

    /// Registry over every value of the handler type.
    pub fn from_all() -> Result<Self> {
        Self::new(H::all().iter().copied())
    }

    /// Binary search for the handler registered under `id`.
    pub fn find_by_id(&self, id: SourceId) -> Option<H> {
        self.by_id
            .binary_search_by_key(&id, |h| h.source_id())
            .ok()
            .and_then(|idx| self.by_id.get(idx).copied())
    }

    /// Handlers in source-id order.
    pub fn handlers(&self) -> &[H] {
        &self.by_id
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// True when no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
