//! Demonstration handler set: a windowed game reacting to window, focus,
//! keyboard and mouse events.

use std::cell::Cell;

use input_event::{EngineEvent, Scancode, SourceEvent, SourceId};
use input_observer::{
    ActionMode, Error, Handler, Observer, RelationType, Result,
    pointer::{self, CursorShape, PointerWarp, Surface},
};
use tracing::info;

use crate::error;

/// Observer over the demo handlers.
pub type DemoObserver = Observer<DemoHandler, DemoEvent>;

/// Handlers of the demo, registered under the toolkit's event ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DemoHandler {
    /// The window became active.
    WindowActivate,
    /// The window stopped being active.
    WindowDeactivate,
    /// Keyboard focus arrived.
    FocusGain,
    /// Keyboard focus left.
    FocusLose,
    /// Key pressed.
    KeyPress,
    /// Key released.
    KeyRelease,
    /// Mouse button pressed.
    MousePress,
    /// Mouse button released.
    MouseRelease,
    /// Pointer moved.
    MouseMove,
}

/// Handlers that turn device input into engine events.
const INPUT: [DemoHandler; 5] = [
    DemoHandler::KeyPress,
    DemoHandler::KeyRelease,
    DemoHandler::MousePress,
    DemoHandler::MouseRelease,
    DemoHandler::MouseMove,
];

/// Keyboard subset of [`INPUT`].
const KEYBOARD: [DemoHandler; 2] = [DemoHandler::KeyPress, DemoHandler::KeyRelease];

impl DemoHandler {
    /// Look a handler up by its variant name.
    pub fn from_name(name: &str) -> error::Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|h| format!("{h:?}") == name)
            .ok_or_else(|| error::Error::UnknownHandler(name.to_string()))
    }

    /// True for handlers that feed device input.
    fn is_input(self) -> bool {
        INPUT.contains(&self)
    }
}

impl Handler for DemoHandler {
    fn source_id(&self) -> SourceId {
        match self {
            Self::WindowActivate => 205,
            Self::WindowDeactivate => 206,
            Self::FocusGain => 1004,
            Self::FocusLose => 1005,
            Self::KeyPress => 401,
            Self::KeyRelease => 402,
            Self::MousePress => 501,
            Self::MouseRelease => 502,
            Self::MouseMove => 503,
        }
    }

    fn all() -> &'static [Self] {
        &[
            Self::WindowActivate,
            Self::WindowDeactivate,
            Self::FocusGain,
            Self::FocusLose,
            Self::KeyPress,
            Self::KeyRelease,
            Self::MousePress,
            Self::MouseRelease,
            Self::MouseMove,
        ]
    }

    /// Input is ignored until the window is first activated.
    fn initially_enabled(&self, mode: ActionMode) -> bool {
        !(self.is_input() && mode == ActionMode::Perform)
    }
}

/// Payload carried by a [`DemoEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payload {
    /// Window or focus notification.
    Notify,
    /// Key event.
    Key(Scancode),
    /// Mouse event: button mask and relative motion.
    Mouse {
        /// Buttons held after the event.
        buttons: i32,
        /// Horizontal motion.
        dx: i32,
        /// Vertical motion.
        dy: i32,
    },
}

/// A toolkit event of the demo.
#[derive(Debug)]
pub struct DemoEvent {
    /// Handler the event is addressed to.
    handler: DemoHandler,
    /// Event data.
    payload: Payload,
    /// Set once an action consumed the event.
    consumed: Cell<bool>,
}

impl DemoEvent {
    /// Event for `handler` with `payload`.
    pub fn new(handler: DemoHandler, payload: Payload) -> Self {
        Self {
            handler,
            payload,
            consumed: Cell::new(false),
        }
    }

    /// True once an action consumed the event.
    pub fn consumed(&self) -> bool {
        self.consumed.get()
    }
}

impl SourceEvent for DemoEvent {
    fn source_id(&self) -> SourceId {
        self.handler.source_id()
    }

    fn scancode(&self) -> Option<Scancode> {
        match self.payload {
            Payload::Key(sc) => Some(sc),
            _ => None,
        }
    }

    fn consume(&self) -> bool {
        let input = self.payload != Payload::Notify;
        if input {
            self.consumed.set(true);
        }
        input
    }
}

/// Surface that reports cursor changes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceSurface;

impl Surface for TraceSurface {
    fn set_cursor(&self, shape: CursorShape) {
        info!(?shape, "cursor");
    }

    fn size(&self) -> (i32, i32) {
        (640, 400)
    }

    fn screen_origin(&self) -> Option<(i32, i32)> {
        Some((0, 0))
    }
}

/// Pointer warp that reports warps to the log.
struct TraceWarp;

impl PointerWarp for TraceWarp {
    fn warp_to(&self, x: i32, y: i32) -> Result<()> {
        info!(x, y, "pointer_warp");
        Ok(())
    }
}

/// Install the logging pointer warp for this process.
pub fn install_pointer() {
    pointer::install(|| Ok(Box::new(TraceWarp) as Box<dyn PointerWarp>));
}

/// Action: feed the event's mouse state and consume the event.
fn send_mouse(obs: &mut DemoObserver, event: &DemoEvent) -> Result<()> {
    let Payload::Mouse { buttons, dx, dy } = event.payload else {
        return Err(Error::action(format!(
            "{:?} event carries no mouse state",
            event.handler
        )));
    };
    obs.feed(EngineEvent::mouse(buttons, dx, dy));
    obs.discard_input_event(event)
}

/// Bind the demo's actions and relations.
///
/// Activating the window hides and centres the cursor and lets input
/// through. Deactivating it drops held keys and mouse state, restores the
/// cursor and blocks input again. Focus changes gate the keyboard alone.
pub fn install_defaults(obs: &mut DemoObserver) -> Result<()> {
    use DemoHandler::*;

    obs.map_action(WindowActivate, ActionMode::Perform, DemoObserver::centre_cursor)?;
    obs.map_action(WindowActivate, ActionMode::Depend, DemoObserver::modify_cursor)?;
    obs.map_action(WindowActivate, ActionMode::Revert, DemoObserver::restore_cursor)?;
    obs.map_relation(WindowActivate, RelationType::Enable(ActionMode::Perform), &INPUT);

    obs.map_action(WindowDeactivate, ActionMode::Perform, DemoObserver::cancel_keys)?;
    obs.map_relation(WindowDeactivate, RelationType::Cause, &[MousePress]);
    obs.map_relation(WindowDeactivate, RelationType::Revert, &[WindowActivate]);
    obs.map_relation(WindowDeactivate, RelationType::Disable(ActionMode::Perform), &INPUT);

    obs.map_relation(FocusGain, RelationType::Enable(ActionMode::Perform), &KEYBOARD);
    obs.map_action(FocusLose, ActionMode::Perform, DemoObserver::cancel_keys)?;
    obs.map_relation(FocusLose, RelationType::Disable(ActionMode::Perform), &KEYBOARD);

    obs.map_action(KeyPress, ActionMode::Perform, DemoObserver::send_key_down)?;
    obs.map_action(KeyRelease, ActionMode::Perform, DemoObserver::send_key_up)?;

    obs.map_action(MousePress, ActionMode::Perform, send_mouse)?;
    obs.map_action(MousePress, ActionMode::Cause, DemoObserver::cancel_mouse)?;
    // Clicking into the window hides the cursor again.
    obs.map_relation(MousePress, RelationType::Depend, &[WindowActivate]);
    obs.map_action(MouseRelease, ActionMode::Perform, send_mouse)?;
    obs.map_action(MouseMove, ActionMode::Perform, send_mouse)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_to_handlers() {
        assert_eq!(
            DemoHandler::from_name("FocusLose").unwrap(),
            DemoHandler::FocusLose
        );
        assert!(DemoHandler::from_name("Teleport").is_err());
    }

    #[test]
    fn input_starts_blocked() {
        assert!(!DemoHandler::KeyPress.initially_enabled(ActionMode::Perform));
        assert!(DemoHandler::KeyPress.initially_enabled(ActionMode::Cause));
        assert!(DemoHandler::WindowActivate.initially_enabled(ActionMode::Perform));
    }

    #[test]
    fn only_input_events_are_consumable() {
        let key = DemoEvent::new(DemoHandler::KeyPress, Payload::Key(30));
        assert!(key.consume());
        assert!(key.consumed());
        let focus = DemoEvent::new(DemoHandler::FocusGain, Payload::Notify);
        assert!(!focus.consume());
        assert_eq!(focus.scancode(), None);
    }
}
