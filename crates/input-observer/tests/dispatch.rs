use input_observer::{
    ActionMode, EngineEvent, Observer, RelationType, Result,
    test_support::{
        CallLog, TestEvent,
        TestHandler::{self, *},
        observer,
    },
};

/// Observer type under test.
type Obs = Observer<TestHandler, TestEvent>;

/// Scancode the crouch check emits.
const SC_CROUCH: u8 = 29;
/// Scancode of the move-forward key.
const SC_FORWARD: u8 = 17;

/// Action feeding a key press for a fixed scancode.
fn emit(sc: u8) -> impl Fn(&mut Obs, &TestEvent) -> Result<()> + Send + Sync {
    move |obs: &mut Obs, _: &TestEvent| {
        obs.feed(EngineEvent::key_down(sc));
        Ok(())
    }
}

/// Action feeding a key release for a fixed scancode.
fn release(sc: u8) -> impl Fn(&mut Obs, &TestEvent) -> Result<()> + Send + Sync {
    move |obs: &mut Obs, _: &TestEvent| {
        obs.feed(EngineEvent::key_up(sc));
        Ok(())
    }
}

#[test]
fn depend_perform_adjust_cause_revert_order() {
    let (mut obs, _rec) = observer();
    let log = CallLog::new();
    obs.map_action(CrouchCheck, ActionMode::Depend, log.action("a.depend"))
        .unwrap();
    obs.map_action(Jump, ActionMode::Depend, log.action("b.depend"))
        .unwrap();
    obs.map_action(Forward, ActionMode::Perform, log.action("h.perform"))
        .unwrap();
    obs.map_action(Fire, ActionMode::Cause, log.action("cause"))
        .unwrap();
    obs.map_action(Use, ActionMode::Revert, log.action("revert"))
        .unwrap();
    obs.map_relation(Forward, RelationType::Depend, &[CrouchCheck, Jump]);
    obs.map_relation(Forward, RelationType::Cause, &[Fire]);
    obs.map_relation(Forward, RelationType::Revert, &[Use]);
    // The adjustment turns off Use.Revert after PERFORM and before the
    // REVERT phase reads the flag.
    obs.map_relation(Forward, RelationType::Disable(ActionMode::Revert), &[Use]);

    obs.observe(&TestEvent::for_handler(Forward));
    assert_eq!(log.take(), vec!["a.depend", "b.depend", "h.perform", "cause"]);

    obs.enable_action(Use, ActionMode::Revert);
    obs.unmap_relation(Forward, RelationType::Disable(ActionMode::Revert), &[]);
    obs.observe(&TestEvent::for_handler(Forward));
    assert_eq!(
        log.take(),
        vec!["a.depend", "b.depend", "h.perform", "cause", "revert"]
    );
}

#[test]
fn disabled_perform_runs_nothing() {
    let (mut obs, rec) = observer();
    let log = CallLog::new();
    obs.map_action(CrouchCheck, ActionMode::Depend, emit(SC_CROUCH))
        .unwrap();
    obs.map_action(Forward, ActionMode::Perform, emit(SC_FORWARD))
        .unwrap();
    obs.map_action(Fire, ActionMode::Cause, log.action("cause"))
        .unwrap();
    obs.map_relation(Forward, RelationType::Depend, &[CrouchCheck]);
    obs.map_relation(Forward, RelationType::Cause, &[Fire]);
    obs.map_relation(Forward, RelationType::Disable(ActionMode::Cause), &[Jump]);
    obs.disable_action(Forward, ActionMode::Perform);

    obs.observe(&TestEvent::for_handler(Forward));
    assert!(log.calls().is_empty());
    assert!(rec.events().is_empty());
    // Adjustments did not run either.
    assert!(obs.is_enabled(Jump, ActionMode::Cause));
}

#[test]
fn enable_adjustment_flips_flag_until_unmapped() {
    let (mut obs, _rec) = observer();
    obs.disable_action(Fire, ActionMode::Perform);
    obs.map_relation(Jump, RelationType::Enable(ActionMode::Perform), &[Fire]);

    obs.observe(&TestEvent::for_handler(Jump));
    assert!(obs.is_enabled(Fire, ActionMode::Perform));

    obs.unmap_relation(Jump, RelationType::Enable(ActionMode::Perform), &[]);
    obs.disable_action(Fire, ActionMode::Perform);
    obs.observe(&TestEvent::for_handler(Jump));
    assert!(!obs.is_enabled(Fire, ActionMode::Perform));
}

#[test]
fn disable_adjustment_targets_only_its_mode() {
    let (mut obs, _rec) = observer();
    obs.map_relation(Jump, RelationType::Disable(ActionMode::Cause), &[Fire, Use]);
    obs.observe(&TestEvent::for_handler(Jump));
    assert!(!obs.is_enabled(Fire, ActionMode::Cause));
    assert!(!obs.is_enabled(Use, ActionMode::Cause));
    assert!(obs.is_enabled(Fire, ActionMode::Perform));
}

#[test]
fn restore_relation_returns_setup_targets() {
    let (mut obs, _rec) = observer();
    obs.map_relation(Forward, RelationType::Depend, &[CrouchCheck, Jump]);
    obs.map_relation(Forward, RelationType::Depend, &[Duck]);
    obs.unmap_relation(Forward, RelationType::Depend, &[]);
    assert!(obs
        .relations()
        .cooperations(Forward, RelationType::Depend)
        .is_empty());

    obs.restore_relation(Forward, RelationType::Depend, &[]);
    assert_eq!(
        obs.relations().cooperations(Forward, RelationType::Depend),
        &[CrouchCheck, Jump]
    );
}

#[test]
fn restored_relation_dispatches_as_before() {
    let (mut obs, _rec) = observer();
    let log = CallLog::new();
    obs.map_action(CrouchCheck, ActionMode::Depend, log.action("crouch"))
        .unwrap();
    obs.map_action(Forward, ActionMode::Perform, log.action("forward"))
        .unwrap();
    obs.map_relation(Forward, RelationType::Depend, &[CrouchCheck]);

    obs.unmap_relation(Forward, RelationType::Depend, &[CrouchCheck]);
    obs.observe(&TestEvent::for_handler(Forward));
    assert_eq!(log.take(), vec!["forward"]);

    obs.restore_relation(Forward, RelationType::Depend, &[CrouchCheck]);
    obs.observe(&TestEvent::for_handler(Forward));
    assert_eq!(log.take(), vec!["crouch", "forward"]);
}

#[test]
fn latch_suppresses_repeats_through_feed() {
    let (mut obs, rec) = observer();
    obs.feed(EngineEvent::key_down(30));
    obs.feed(EngineEvent::key_down(30));
    obs.feed(EngineEvent::key_up(30));
    obs.feed(EngineEvent::key_down(30));
    assert_eq!(
        rec.take(),
        vec![
            EngineEvent::key_down(30),
            EngineEvent::key_up(30),
            EngineEvent::key_down(30)
        ]
    );
    let latch = obs.latch();
    assert!(!latch.notify_key_change("test", 30, true));
    assert!(latch.notify_key_change("test", 30, false));
    assert!(latch.notify_key_change("test", 30, true));
}

#[test]
fn unmap_restore_action_round_trip() {
    let (mut obs, rec) = observer();
    obs.map_action(Forward, ActionMode::Perform, emit(SC_FORWARD))
        .unwrap();
    obs.map_action(Duck, ActionMode::Perform, release(SC_FORWARD))
        .unwrap();
    let press = TestEvent::for_handler(Forward);
    let lift = TestEvent::for_handler(Duck);

    obs.observe(&press);
    obs.observe(&lift);
    let before = rec.take();
    assert_eq!(before.len(), 2);

    obs.unmap_action(Forward, ActionMode::Perform);
    assert!(!obs.is_mapped(Forward, ActionMode::Perform));
    obs.observe(&press);
    assert!(rec.take().is_empty());

    obs.restore_action(Forward, ActionMode::Perform);
    obs.observe(&press);
    obs.observe(&lift);
    assert_eq!(rec.take(), before);
}

#[test]
fn forward_with_crouch_check_end_to_end() {
    let (mut obs, rec) = observer();
    obs.map_action(Forward, ActionMode::Perform, emit(SC_FORWARD))
        .unwrap();
    obs.map_action(CrouchCheck, ActionMode::Depend, emit(SC_CROUCH))
        .unwrap();
    obs.map_relation(Forward, RelationType::Depend, &[CrouchCheck]);

    obs.observe(&TestEvent::new(1));
    assert_eq!(
        rec.events(),
        vec![EngineEvent::key_down(SC_CROUCH), EngineEvent::key_down(SC_FORWARD)]
    );
}

#[test]
fn map_action_is_bind_once_remap_overwrites() {
    let (mut obs, rec) = observer();
    obs.map_action(Fire, ActionMode::Perform, emit(1)).unwrap();
    assert!(obs.map_action(Fire, ActionMode::Perform, emit(2)).is_err());
    obs.observe(&TestEvent::for_handler(Fire));
    assert_eq!(rec.take(), vec![EngineEvent::key_down(1)]);

    obs.remap_action(Fire, ActionMode::Perform, emit(2));
    obs.observe(&TestEvent::for_handler(Fire));
    assert_eq!(rec.take(), vec![EngineEvent::key_down(2)]);
}
