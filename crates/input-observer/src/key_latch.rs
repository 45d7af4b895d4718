//! Pressed/released state per scancode, shared across threads.
//!
//! The toolkit thread reports key changes while render and game logic read the
//! latched state. Every slot is an `AtomicBool`: transitions use `swap` with
//! `AcqRel` so exactly one of two racing reports sees a given transition, and
//! readers load with `Acquire`. No lock is ever taken.

use std::{
    array,
    sync::atomic::{AtomicBool, Ordering},
};

use input_event::{SCANCODE_COUNT, Scancode};
use tracing::trace;

/// Debounces repeated key notifications.
#[derive(Debug)]
pub struct KeyLatch {
    /// Down flag per scancode.
    keys: [AtomicBool; SCANCODE_COUNT],
}

impl KeyLatch {
    /// Latch with every key released.
    pub fn new() -> Self {
        Self {
            keys: array::from_fn(|_| AtomicBool::new(false)),
        }
    }

    /// Record a key change from `origin`.
    ///
    /// Returns true only for a real transition (down after up, or up after
    /// down). A repeated report of the current state returns false and the
    /// caller must treat the event as already handled.
    pub fn notify_key_change(&self, origin: &str, sc: Scancode, is_down: bool) -> bool {
        let was_down = self.slot(sc).swap(is_down, Ordering::AcqRel);
        let changed = was_down != is_down;
        trace!(origin, sc, is_down, changed, "key_latch");
        changed
    }

    /// True if the key is currently latched down.
    pub fn is_down(&self, sc: Scancode) -> bool {
        self.slot(sc).load(Ordering::Acquire)
    }

    /// Scancodes currently latched down, ascending.
    pub fn held(&self) -> Vec<Scancode> {
        (0..=Scancode::MAX).filter(|sc| self.is_down(*sc)).collect()
    }

    /// Mark every key released; returns how many were down.
    pub fn release_all(&self) -> usize {
        self.keys
            .iter()
            .filter(|k| k.swap(false, Ordering::AcqRel))
            .count()
    }

    /// Slot for a scancode; the table covers the whole scancode range.
    fn slot(&self, sc: Scancode) -> &AtomicBool {
        &self.keys[usize::from(sc)]
    }
}

impl Default for KeyLatch {
    fn default() -> Self {
        Self::new()
    }
}
