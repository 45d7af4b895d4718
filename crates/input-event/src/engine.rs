//! Normalized events delivered to the downstream engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Scancode;

/// Kind tag of an [`EngineEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Key pressed; `data1` is the scancode.
    KeyDown,
    /// Key released; `data1` is the scancode.
    KeyUp,
    /// Mouse state; `data1` buttons, `data2`/`data3` motion.
    Mouse,
    /// Joystick state; `data1` buttons, `data2`/`data3` axes.
    Joystick,
    /// Drop all key state held by the engine.
    ClearKeys,
    /// Drop all mouse state held by the engine.
    ClearMouse,
}

/// Tagged record handed to the engine's event queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngineEvent {
    /// What the data fields mean.
    pub kind: EventKind,
    /// Scancode for key events, button mask for mouse and joystick.
    pub data1: i32,
    /// Horizontal motion or first axis.
    #[serde(default)]
    pub data2: i32,
    /// Vertical motion or second axis.
    #[serde(default)]
    pub data3: i32,
}

/// Sentinel that forces the engine to forget every held key.
pub const CANCEL_KEYS: EngineEvent = EngineEvent::new(EventKind::ClearKeys, 0, 0, 0);

/// Sentinel that forces the engine to forget mouse buttons and motion.
pub const CANCEL_MOUSE: EngineEvent = EngineEvent::new(EventKind::ClearMouse, 0, 0, 0);

impl EngineEvent {
    /// Build an event from raw parts.
    pub const fn new(kind: EventKind, data1: i32, data2: i32, data3: i32) -> Self {
        Self {
            kind,
            data1,
            data2,
            data3,
        }
    }

    /// Key-down event for a scancode.
    pub const fn key_down(sc: Scancode) -> Self {
        Self::new(EventKind::KeyDown, sc as i32, 0, 0)
    }

    /// Key-up event for a scancode.
    pub const fn key_up(sc: Scancode) -> Self {
        Self::new(EventKind::KeyUp, sc as i32, 0, 0)
    }

    /// Mouse event with a button mask and relative motion.
    pub const fn mouse(buttons: i32, dx: i32, dy: i32) -> Self {
        Self::new(EventKind::Mouse, buttons, dx, dy)
    }

    /// True for key-down and key-up events, whatever their payload.
    pub fn is_key(&self) -> bool {
        matches!(self.kind, EventKind::KeyDown | EventKind::KeyUp)
    }

    /// Scancode of a key event; `None` for every other kind.
    ///
    /// Also `None` for a key event whose `data1` does not fit a scancode;
    /// check [`EngineEvent::is_key`] to tell the two apart.
    pub fn scancode(&self) -> Option<Scancode> {
        match self.kind {
            EventKind::KeyDown | EventKind::KeyUp => Scancode::try_from(self.data1).ok(),
            _ => None,
        }
    }

    /// True for key-down events.
    pub fn is_key_down(&self) -> bool {
        self.kind == EventKind::KeyDown
    }
}

impl fmt::Display for EngineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EventKind::KeyDown => write!(f, "key_down sc={}", self.data1),
            EventKind::KeyUp => write!(f, "key_up sc={}", self.data1),
            EventKind::Mouse => write!(
                f,
                "mouse buttons={:#x} dx={} dy={}",
                self.data1, self.data2, self.data3
            ),
            EventKind::Joystick => write!(
                f,
                "joystick buttons={:#x} x={} y={}",
                self.data1, self.data2, self.data3
            ),
            EventKind::ClearKeys => f.write_str("cancel_keys"),
            EventKind::ClearMouse => f.write_str("cancel_mouse"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scancode_only_for_key_events() {
        assert_eq!(EngineEvent::key_down(30).scancode(), Some(30));
        assert_eq!(EngineEvent::key_up(255).scancode(), Some(255));
        assert_eq!(EngineEvent::mouse(30, 0, 0).scancode(), None);
        assert_eq!(CANCEL_KEYS.scancode(), None);
        // Out-of-range payloads carry no scancode but are still key events.
        let wide = EngineEvent::new(EventKind::KeyDown, 300, 0, 0);
        assert_eq!(wide.scancode(), None);
        assert!(wide.is_key());
        assert_eq!(EngineEvent::new(EventKind::KeyUp, -1, 0, 0).scancode(), None);
        assert!(!EngineEvent::mouse(30, 0, 0).is_key());
    }

    #[test]
    fn sentinels_are_distinct() {
        assert_ne!(CANCEL_KEYS, CANCEL_MOUSE);
        assert_eq!(CANCEL_KEYS.kind, EventKind::ClearKeys);
        assert_eq!(CANCEL_MOUSE.kind, EventKind::ClearMouse);
    }

    #[test]
    fn display_is_compact() {
        assert_eq!(EngineEvent::key_down(30).to_string(), "key_down sc=30");
        assert_eq!(EngineEvent::mouse(1, -2, 3).to_string(), "mouse buttons=0x1 dx=-2 dy=3");
        assert_eq!(CANCEL_MOUSE.to_string(), "cancel_mouse");
    }

    #[test]
    fn parses_from_ron_with_defaults() {
        let ev: EngineEvent = ron::from_str("(kind: KeyDown, data1: 57)").unwrap();
        assert_eq!(ev, EngineEvent::key_down(57));
    }
}
