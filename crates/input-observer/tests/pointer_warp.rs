use std::sync::Arc;

use input_observer::{
    Observer, Result,
    pointer::{self, CursorShape, PointerWarp, Surface},
    test_support::{TestEvent, TestHandler, observer},
};
use parking_lot::Mutex;

/// Warp stub recording every target.
struct RecordingWarp {
    /// Warp targets in call order.
    targets: Arc<Mutex<Vec<(i32, i32)>>>,
}

impl PointerWarp for RecordingWarp {
    fn warp_to(&self, x: i32, y: i32) -> Result<()> {
        self.targets.lock().push((x, y));
        Ok(())
    }
}

/// Surface at a fixed screen position.
#[derive(Clone, Default)]
struct Window {
    /// Cursor shapes in the order they were set.
    shapes: Arc<Mutex<Vec<CursorShape>>>,
    /// Top-left corner; `None` while the window is not showing.
    origin: Option<(i32, i32)>,
}

impl Surface for Window {
    fn set_cursor(&self, shape: CursorShape) {
        self.shapes.lock().push(shape);
    }

    fn size(&self) -> (i32, i32) {
        (801, 600)
    }

    fn screen_origin(&self) -> Option<(i32, i32)> {
        self.origin
    }
}

/// Build an observer over `window`.
fn observer_on(window: Window) -> Observer<TestHandler, TestEvent> {
    let (obs, _rec) = observer();
    obs.with_surface(window)
}

#[test]
fn centre_cursor_warps_to_the_middle() {
    let targets = Arc::new(Mutex::new(Vec::new()));
    let sink = targets.clone();
    assert!(pointer::install(move || {
        Ok(Box::new(RecordingWarp { targets: sink }) as Box<dyn PointerWarp>)
    }));
    // Only the first install runs its factory.
    assert!(pointer::install(|| panic!("factory must not run twice")));
    assert!(pointer::warp().is_some());

    let window = Window {
        origin: Some((20, 40)),
        ..Window::default()
    };
    let mut obs = observer_on(window.clone());
    let ev = TestEvent::for_handler(TestHandler::Use);
    obs.centre_cursor(&ev).unwrap();
    assert_eq!(*targets.lock(), vec![(20 + 400, 40 + 300)]);
    assert_eq!(*window.shapes.lock(), vec![CursorShape::Hidden]);

    // A window that is not showing is only hidden, never warped to.
    let offscreen = Window::default();
    let mut obs = observer_on(offscreen.clone());
    obs.centre_cursor(&ev).unwrap();
    assert_eq!(targets.lock().len(), 1);
    assert_eq!(*offscreen.shapes.lock(), vec![CursorShape::Hidden]);

    // Centres past the coordinate range clamp instead of overflowing.
    let far = Window {
        origin: Some((i32::MAX - 10, i32::MIN)),
        ..Window::default()
    };
    let mut obs = observer_on(far);
    obs.centre_cursor(&ev).unwrap();
    assert_eq!(targets.lock().last(), Some(&(i32::MAX, i32::MIN + 300)));
}
