//! Per (handler, mode) enablement flags.

use std::collections::BTreeMap;

use crate::{ActionMode, Handler};

/// Flags gating which actions may run.
///
/// Pairs that were never touched report [`Handler::initially_enabled`].
#[derive(Debug, Clone)]
pub struct Enablement<H> {
    /// Explicitly set flags.
    flags: BTreeMap<(H, ActionMode), bool>,
}

impl<H: Handler> Enablement<H> {
    /// All pairs at their initial value.
    pub fn new() -> Self {
        Self {
            flags: BTreeMap::new(),
        }
    }

    /// Current flag for the pair.
    pub fn is_enabled(&self, handler: H, mode: ActionMode) -> bool {
        self.flags
            .get(&(handler, mode))
            .copied()
            .unwrap_or_else(|| handler.initially_enabled(mode))
    }

    /// Set the flag; returns true if the value changed.
    pub fn set(&mut self, handler: H, mode: ActionMode, enabled: bool) -> bool {
        let before = self.is_enabled(handler, mode);
        self.flags.insert((handler, mode), enabled);
        before != enabled
    }
}

impl<H: Handler> Default for Enablement<H> {
    fn default() -> Self {
        Self::new()
    }
}
