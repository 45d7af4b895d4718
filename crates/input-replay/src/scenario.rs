//! RON scenario schema.
//!
//! A scenario is a list of rule changes applied after the default rule set,
//! followed by the toolkit events to replay:
//!
//! ```ron
//! (
//!     rules: [ disable(handler: "KeyPress", mode: Perform) ],
//!     events: [ window_activated, key_press(30), key_release(30) ],
//! )
//! ```

use input_event::{EngineEvent, Scancode};
use input_observer::{ActionMode, RelationType};
use ron::{Options, extensions::Extensions};
use serde::Deserialize;

use crate::error::Result;

/// A parsed scenario.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    /// Rule changes, applied in order before any event.
    #[serde(default)]
    pub rules: Vec<Rule>,
    /// Events replayed in order.
    pub events: Vec<ScriptEvent>,
}

impl Scenario {
    /// Parse scenario text.
    pub fn parse(text: &str) -> Result<Self> {
        let options = Options::default()
            .with_default_extension(Extensions::UNWRAP_NEWTYPES)
            .with_default_extension(Extensions::IMPLICIT_SOME);
        Ok(options.from_str(text)?)
    }
}

/// One configuration change, named after the observer call it makes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Allow a mode of a handler to run.
    Enable {
        /// Handler name.
        handler: String,
        /// Mode to enable.
        mode: Mode,
    },
    /// Stop a mode of a handler from running.
    Disable {
        /// Handler name.
        handler: String,
        /// Mode to disable.
        mode: Mode,
    },
    /// Clear an action binding.
    UnmapAction {
        /// Handler name.
        handler: String,
        /// Mode to unbind.
        mode: Mode,
    },
    /// Rebind the default action.
    RestoreAction {
        /// Handler name.
        handler: String,
        /// Mode to rebind.
        mode: Mode,
    },
    /// Replace the targets of a relation.
    MapRelation {
        /// Handler name.
        handler: String,
        /// Relation to replace.
        relation: Relation,
        /// New target handler names.
        targets: Vec<String>,
    },
    /// Clear a relation, or remove the listed targets.
    UnmapRelation {
        /// Handler name.
        handler: String,
        /// Relation to edit.
        relation: Relation,
        /// Targets to remove; empty clears the relation.
        #[serde(default)]
        targets: Vec<String>,
    },
    /// Restore a relation, or re-add the listed default targets.
    RestoreRelation {
        /// Handler name.
        handler: String,
        /// Relation to edit.
        relation: Relation,
        /// Targets to re-add; empty restores the whole default.
        #[serde(default)]
        targets: Vec<String>,
    },
}

/// Scenario spelling of [`ActionMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[allow(missing_docs, clippy::missing_docs_in_private_items)]
pub enum Mode {
    Perform,
    Depend,
    Cause,
    Revert,
}

impl From<Mode> for ActionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Perform => Self::Perform,
            Mode::Depend => Self::Depend,
            Mode::Cause => Self::Cause,
            Mode::Revert => Self::Revert,
        }
    }
}

/// Scenario spelling of [`RelationType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[allow(missing_docs, clippy::missing_docs_in_private_items)]
pub enum Relation {
    Depend,
    Cause,
    Revert,
    Enable(Mode),
    Disable(Mode),
}

impl From<Relation> for RelationType {
    fn from(relation: Relation) -> Self {
        match relation {
            Relation::Depend => Self::Depend,
            Relation::Cause => Self::Cause,
            Relation::Revert => Self::Revert,
            Relation::Enable(mode) => Self::Enable(mode.into()),
            Relation::Disable(mode) => Self::Disable(mode.into()),
        }
    }
}

/// A toolkit event to replay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptEvent {
    /// The window became the active window.
    WindowActivated,
    /// The window stopped being the active window.
    WindowDeactivated,
    /// The window gained keyboard focus.
    FocusGained,
    /// The window lost keyboard focus.
    FocusLost,
    /// A key was pressed.
    KeyPress(Scancode),
    /// A key was released.
    KeyRelease(Scancode),
    /// A mouse button (0-based) was pressed.
    MousePress(u8),
    /// A mouse button (0-based) was released.
    MouseRelease(u8),
    /// The pointer moved by a relative amount.
    MouseMove(i32, i32),
    /// Feed an engine event directly, bypassing dispatch.
    Inject(EngineEvent),
}

#[cfg(test)]
mod tests {
    use input_event::EventKind;

    use super::*;

    #[test]
    fn parses_rules_and_events() {
        let s = Scenario::parse(
            r#"(
                rules: [
                    disable(handler: "KeyPress", mode: Perform),
                    map_relation(handler: "FocusLose", relation: Disable(Perform), targets: ["KeyPress"]),
                    unmap_relation(handler: "WindowDeactivate", relation: Cause),
                ],
                events: [
                    window_activated,
                    key_press(30),
                    mouse_move(-2, 3),
                    inject((kind: KeyDown, data1: 57)),
                ],
            )"#,
        )
        .unwrap();
        assert_eq!(s.rules.len(), 3);
        assert_eq!(
            s.rules[0],
            Rule::Disable {
                handler: "KeyPress".into(),
                mode: Mode::Perform,
            }
        );
        assert_eq!(
            s.rules[2],
            Rule::UnmapRelation {
                handler: "WindowDeactivate".into(),
                relation: Relation::Cause,
                targets: Vec::new(),
            }
        );
        assert_eq!(s.events[1], ScriptEvent::KeyPress(30));
        assert_eq!(s.events[2], ScriptEvent::MouseMove(-2, 3));
        let ScriptEvent::Inject(ev) = s.events[3] else {
            panic!("expected inject");
        };
        assert_eq!(ev.kind, EventKind::KeyDown);
        assert_eq!(ev.data2, 0);
    }

    #[test]
    fn rules_are_optional() {
        let s = Scenario::parse("(events: [focus_lost])").unwrap();
        assert!(s.rules.is_empty());
        assert_eq!(s.events, vec![ScriptEvent::FocusLost]);
    }

    #[test]
    fn relation_spelling_maps_onto_observer_types() {
        assert_eq!(
            RelationType::from(Relation::Enable(Mode::Cause)),
            RelationType::Enable(ActionMode::Cause)
        );
        assert_eq!(ActionMode::from(Mode::Revert), ActionMode::Revert);
    }

    #[test]
    fn unknown_event_is_rejected() {
        assert!(Scenario::parse("(events: [teleport])").is_err());
    }
}
