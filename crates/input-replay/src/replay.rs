//! Drive a scenario through an observer over the demo handlers.

use std::sync::Arc;

use input_event::EngineEvent;
use parking_lot::Mutex;
use tracing::debug;

use crate::{
    error::Result,
    handlers::{self, DemoEvent, DemoHandler, DemoObserver, Payload, TraceSurface},
    scenario::{Rule, Scenario, ScriptEvent},
};

/// Resolve a list of handler names.
fn resolve_all(names: &[String]) -> Result<Vec<DemoHandler>> {
    names.iter().map(|n| DemoHandler::from_name(n)).collect()
}

/// Apply one scenario rule.
fn apply(obs: &mut DemoObserver, rule: &Rule) -> Result<()> {
    match rule {
        Rule::Enable { handler, mode } => {
            obs.enable_action(DemoHandler::from_name(handler)?, (*mode).into());
        }
        Rule::Disable { handler, mode } => {
            obs.disable_action(DemoHandler::from_name(handler)?, (*mode).into());
        }
        Rule::UnmapAction { handler, mode } => {
            obs.unmap_action(DemoHandler::from_name(handler)?, (*mode).into());
        }
        Rule::RestoreAction { handler, mode } => {
            obs.restore_action(DemoHandler::from_name(handler)?, (*mode).into());
        }
        Rule::MapRelation {
            handler,
            relation,
            targets,
        } => {
            let targets = resolve_all(targets)?;
            obs.map_relation(DemoHandler::from_name(handler)?, (*relation).into(), &targets);
        }
        Rule::UnmapRelation {
            handler,
            relation,
            targets,
        } => {
            let targets = resolve_all(targets)?;
            obs.unmap_relation(DemoHandler::from_name(handler)?, (*relation).into(), &targets);
        }
        Rule::RestoreRelation {
            handler,
            relation,
            targets,
        } => {
            let targets = resolve_all(targets)?;
            obs.restore_relation(DemoHandler::from_name(handler)?, (*relation).into(), &targets);
        }
    }
    Ok(())
}

/// Turns script events into toolkit events, tracking held mouse buttons.
#[derive(Debug, Default)]
struct Toolkit {
    /// Button mask after the last mouse event.
    buttons: i32,
}

impl Toolkit {
    /// Toolkit event for a script step; `None` for injected engine events.
    fn event(&mut self, step: &ScriptEvent) -> Option<DemoEvent> {
        let (handler, payload) = match *step {
            ScriptEvent::WindowActivated => (DemoHandler::WindowActivate, Payload::Notify),
            ScriptEvent::WindowDeactivated => (DemoHandler::WindowDeactivate, Payload::Notify),
            ScriptEvent::FocusGained => (DemoHandler::FocusGain, Payload::Notify),
            ScriptEvent::FocusLost => (DemoHandler::FocusLose, Payload::Notify),
            ScriptEvent::KeyPress(sc) => (DemoHandler::KeyPress, Payload::Key(sc)),
            ScriptEvent::KeyRelease(sc) => (DemoHandler::KeyRelease, Payload::Key(sc)),
            ScriptEvent::MousePress(button) => {
                self.buttons |= Self::bit(button);
                (DemoHandler::MousePress, self.mouse(0, 0))
            }
            ScriptEvent::MouseRelease(button) => {
                self.buttons &= !Self::bit(button);
                (DemoHandler::MouseRelease, self.mouse(0, 0))
            }
            ScriptEvent::MouseMove(dx, dy) => (DemoHandler::MouseMove, self.mouse(dx, dy)),
            ScriptEvent::Inject(_) => return None,
        };
        Some(DemoEvent::new(handler, payload))
    }

    /// Mask bit of a 0-based button; buttons past the mask width are ignored.
    fn bit(button: u8) -> i32 {
        1_i32.checked_shl(u32::from(button)).unwrap_or(0)
    }

    /// Mouse payload with the current buttons.
    fn mouse(&self, dx: i32, dy: i32) -> Payload {
        Payload::Mouse {
            buttons: self.buttons,
            dx,
            dy,
        }
    }
}

/// Replay `scenario` and return every engine event the observer fed.
///
/// With `defaults` the demo rule set is installed before the scenario's own
/// rules.
pub fn replay(scenario: &Scenario, defaults: bool) -> Result<Vec<EngineEvent>> {
    let fed = Arc::new(Mutex::new(Vec::new()));
    let sink = fed.clone();
    let mut obs = DemoObserver::new(move |ev| sink.lock().push(ev))?
        .with_name("replay")
        .with_surface(TraceSurface);
    if defaults {
        handlers::install_defaults(&mut obs)?;
    }
    for rule in &scenario.rules {
        apply(&mut obs, rule)?;
    }

    let mut toolkit = Toolkit::default();
    for (step, script) in scenario.events.iter().enumerate() {
        debug!(step, ?script, "replay_step");
        match (script, toolkit.event(script)) {
            (ScriptEvent::Inject(ev), _) => obs.feed(*ev),
            (_, Some(event)) => {
                obs.observe(&event);
                debug!(step, consumed = event.consumed(), "replay_dispatched");
            }
            (_, None) => {}
        }
    }
    let out = fed.lock().clone();
    Ok(out)
}
