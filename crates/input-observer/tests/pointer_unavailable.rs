use input_observer::{
    Error, Result,
    pointer::{self, PointerWarp},
    test_support::{TestEvent, TestHandler, observer},
};
use logging::capture::Captured;
use tracing::subscriber;
use tracing_subscriber::{prelude::*, registry};

#[test]
fn failed_install_warns_once_and_stays_absent() {
    let captured = Captured::new();
    let sub = registry().with(captured.layer());
    subscriber::with_default(sub, || {
        let failing = || -> Result<Box<dyn PointerWarp>> {
            Err(Error::Pointer("no display".into()))
        };
        assert!(!pointer::install(failing));
        assert!(!pointer::install(failing));
    });
    let warnings: Vec<_> = captured
        .records()
        .into_iter()
        .filter(|r| r.level == "WARN")
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].field("error").unwrap().contains("no display"));
    assert!(pointer::warp().is_none());

    // Centring still succeeds; it just cannot move the pointer.
    let (mut obs, _rec) = observer();
    assert!(obs
        .centre_cursor(&TestEvent::for_handler(TestHandler::Use))
        .is_ok());
}
