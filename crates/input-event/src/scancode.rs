//! Engine scancodes.
//!
//! A "scancode" here is the engine's own positional key identifier, the value
//! carried in `data1` of key events. It is not a toolkit keycode and not a
//! character; the embedder maps toolkit keys onto it before feeding.

/// Engine key identifier carried by key-down and key-up events.
pub type Scancode = u8;

/// Number of distinct scancodes; sizes per-key state tables.
pub const SCANCODE_COUNT: usize = Scancode::MAX as usize + 1;
