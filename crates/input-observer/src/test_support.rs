//! Test support utilities for observer unit and integration tests.
//! These helpers are public so integration tests can share them; they are
//! lightweight and carry no global state.

use std::{cell::Cell, sync::Arc};

use input_event::{EngineEvent, Scancode, SourceEvent, SourceId};
use parking_lot::Mutex;

use crate::{ActionMode, Handler, Observer, Result};

/// Small handler set used across the test suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum TestHandler {
    Forward,
    CrouchCheck,
    Fire,
    Jump,
    Use,
    Duck,
}

impl Handler for TestHandler {
    fn source_id(&self) -> SourceId {
        match self {
            Self::Forward => 1,
            Self::CrouchCheck => 2,
            Self::Fire => 3,
            Self::Jump => 5,
            Self::Use => 8,
            Self::Duck => 13,
        }
    }

    fn all() -> &'static [Self] {
        // Deliberately not in source-id order.
        &[
            Self::Duck,
            Self::Forward,
            Self::Use,
            Self::CrouchCheck,
            Self::Jump,
            Self::Fire,
        ]
    }

    fn initially_enabled(&self, mode: ActionMode) -> bool {
        !matches!((self, mode), (Self::Duck, ActionMode::Revert))
    }
}

/// Toolkit event stand-in with an optional key payload.
#[derive(Debug)]
pub struct TestEvent {
    /// Source id the event resolves through.
    pub id: SourceId,
    /// Key payload, if any.
    pub scancode: Option<Scancode>,
    /// Whether `consume` succeeds.
    consumable: bool,
    /// Set once consumed.
    consumed: Cell<bool>,
}

impl TestEvent {
    /// Non-input event for `id`.
    pub fn new(id: SourceId) -> Self {
        Self {
            id,
            scancode: None,
            consumable: false,
            consumed: Cell::new(false),
        }
    }

    /// Event for `handler` without a key payload.
    pub fn for_handler<H: Handler>(handler: H) -> Self {
        Self::new(handler.source_id())
    }

    /// Consumable key event for `handler`.
    pub fn key<H: Handler>(handler: H, sc: Scancode) -> Self {
        Self {
            scancode: Some(sc),
            consumable: true,
            ..Self::for_handler(handler)
        }
    }

    /// True once an action consumed the event.
    pub fn consumed(&self) -> bool {
        self.consumed.get()
    }
}

impl SourceEvent for TestEvent {
    fn source_id(&self) -> SourceId {
        self.id
    }

    fn scancode(&self) -> Option<Scancode> {
        self.scancode
    }

    fn consume(&self) -> bool {
        if self.consumable {
            self.consumed.set(true);
        }
        self.consumable
    }
}

/// Collects every event an observer feeds.
#[derive(Clone, Default)]
pub struct Recorder {
    /// Fed events in order.
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl Recorder {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumer closure to hand to an observer.
    pub fn consumer(&self) -> impl FnMut(EngineEvent) + Send + use<> {
        let events = self.events.clone();
        move |ev| events.lock().push(ev)
    }

    /// Events fed so far.
    pub fn events(&self) -> Vec<EngineEvent> {
        self.events.lock().clone()
    }

    /// Drain the events fed so far.
    pub fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().drain(..).collect()
    }
}

/// Ordered log of action invocations.
#[derive(Clone, Default)]
pub struct CallLog {
    /// Labels in call order.
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Action that appends `label` when run.
    pub fn action<H, E>(
        &self,
        label: &str,
    ) -> impl Fn(&mut Observer<H, E>, &E) -> Result<()> + Send + Sync + use<H, E>
    where
        H: Handler,
        E: SourceEvent + 'static,
    {
        let calls = self.calls.clone();
        let label = label.to_string();
        move |_, _| {
            calls.lock().push(label.clone());
            Ok(())
        }
    }

    /// Labels recorded so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Drain the labels recorded so far.
    pub fn take(&self) -> Vec<String> {
        self.calls.lock().drain(..).collect()
    }
}

/// Observer over [`TestHandler`] feeding a fresh [`Recorder`].
pub fn observer() -> (Observer<TestHandler, TestEvent>, Recorder) {
    let rec = Recorder::new();
    let obs = Observer::new(rec.consumer()).expect("test handlers have unique ids");
    (obs, rec)
}
