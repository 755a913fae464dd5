use super::{Behavior, Procedure};
use crate::kind::{self, Kind};
use crate::render::Headless;
use crate::test_util::{init, Event, Recorder};
use crate::time::Manual;
use crate::{tracer, Context, Delay, Entity};

struct Diary(Vec<&'static str>);

impl Kind for Diary {
    fn declare(spec: &mut kind::Spec) {
        spec.start(Procedure::once(|cx| cx.data::<Diary>().0.push("start")).named("diary"));
    }
}

#[test]
fn test_once_is_not_kept_after_termination() {
    init();
    let clock = Manual::default();
    let mut world = crate::world_test!(clock; Diary);
    let recorder = Recorder::default();

    let entity = world.spawn(Diary(Vec::new())).expect("Diary is not a singleton");
    world.tick(&recorder, &mut Headless);
    world.tick(&recorder, &mut Headless);

    assert_eq!(world.get::<Diary>(entity).map(|d| d.0.clone()), Some(vec!["start"]));
    assert_eq!(world.active_count(entity), Some(0));

    let calls: Vec<_> = recorder
        .take()
        .into_iter()
        .filter(|event| matches!(event, Event::StartCall(..) | Event::FinishCall(..)))
        .collect();
    assert_eq!(
        calls,
        vec![
            Event::StartCall(entity, "diary".into()),
            Event::FinishCall(entity, "diary".into()),
        ]
    );
}

struct Ticker(u32);

impl Kind for Ticker {
    fn declare(spec: &mut kind::Spec) {
        spec.start(Procedure::forever(|cx| cx.data::<Ticker>().0 += 1));
    }
}

#[test]
fn test_forever_runs_once_per_tick() {
    init();
    let clock = Manual::default();
    let mut world = crate::world_test!(clock; Ticker);

    let entity = world.spawn(Ticker(0)).expect("Ticker is not a singleton");
    for tick in 1..=5 {
        world.tick(&tracer::Noop, &mut Headless);
        assert_eq!(world.get::<Ticker>(entity).map(|t| t.0), Some(tick));
    }
    assert_eq!(world.active_count(entity), Some(1));
}

struct Spin(u32);

impl Kind for Spin {
    fn declare(spec: &mut kind::Spec) {
        spec.start(Procedure::forever(|cx| {
            let spin = cx.data::<Spin>();
            spin.0 += 1;
            if spin.0 == 3 {
                cx.delete(cx.this());
            }
        }));
    }
}

#[test]
fn test_forever_stops_when_its_entity_is_deleted() {
    init();
    let clock = Manual::default();
    let mut world = crate::world_test!(clock; Spin);

    let entity = world.spawn(Spin(0)).expect("Spin is not a singleton");
    let before = crate::delay::unused_count();
    let mut last = None;
    for _ in 0..6 {
        world.tick(&tracer::Noop, &mut Headless);
        if let Some(spin) = world.get::<Spin>(entity) {
            last = Some(spin.0);
        }
    }

    assert_eq!(last, Some(3));
    assert_eq!(world.lifecycle(entity), None);
    assert_eq!(crate::delay::unused_count(), before, "the pending repetition is discarded quietly");
}

struct Mourner {
    target: Entity,
    log:    Vec<&'static str>,
}

impl Kind for Mourner {
    fn declare(spec: &mut kind::Spec) {
        spec.start(Procedure::new(|| {
            move |cx: &mut Context<'_>| -> Option<Delay> {
                let target = cx.data::<Mourner>().target;
                if cx.lifecycle(target).map_or(false, |lifecycle| lifecycle.is_alive()) {
                    cx.data::<Mourner>().log.push("waiting");
                    return Some(Delay::frame());
                }
                cx.data::<Mourner>().log.push("gone");
                None
            }
        }));
    }
}

#[test]
fn test_call_polls_world_state_each_frame() {
    init();
    let clock = Manual::default();
    let mut world = crate::world_test!(clock; Ticker, Mourner);

    let target = world.spawn(Ticker(0)).expect("Ticker is not a singleton");
    let mourner =
        world.spawn(Mourner { target, log: Vec::new() }).expect("Mourner is not a singleton");
    world.tick(&tracer::Noop, &mut Headless);
    world.tick(&tracer::Noop, &mut Headless);
    assert_eq!(world.active_count(mourner), Some(1));

    world.delete(target);
    world.tick(&tracer::Noop, &mut Headless);
    world.tick(&tracer::Noop, &mut Headless);

    assert_eq!(
        world.get::<Mourner>(mourner).map(|m| m.log.clone()),
        Some(vec!["waiting", "waiting", "gone"])
    );
    assert_eq!(world.active_count(mourner), Some(0));
}

struct Blinker(Vec<&'static str>);

impl Kind for Blinker {
    fn declare(spec: &mut kind::Spec) {
        spec.start(Procedure::forever_call(|| {
            let mut on = false;
            move |cx: &mut Context<'_>| -> Option<Delay> {
                if on {
                    cx.data::<Blinker>().0.push("off");
                    return None;
                }
                on = true;
                cx.data::<Blinker>().0.push("on");
                Some(Delay::frame())
            }
        }));
    }
}

#[test]
fn test_forever_call_restarts_with_fresh_state() {
    init();
    let clock = Manual::default();
    let mut world = crate::world_test!(clock; Blinker);

    let entity = world.spawn(Blinker(Vec::new())).expect("Blinker is not a singleton");
    for _ in 0..5 {
        world.tick(&tracer::Noop, &mut Headless);
    }

    // the inner call terminates on the second resume,
    // then the repetition waits one frame before binding a fresh call
    assert_eq!(
        world.get::<Blinker>(entity).map(|b| b.0.clone()),
        Some(vec!["on", "off", "on", "off", "on"])
    );
}

struct Nested(Vec<&'static str>);

impl Kind for Nested {
    fn declare(spec: &mut kind::Spec) {
        spec.start(Behavior::routine(|cx| {
            cx.run(Behavior::routine(|cx| cx.data::<Nested>().0.push("routine")));
            cx.run(Procedure::once(|cx| cx.data::<Nested>().0.push("procedure")));
            cx.data::<Nested>().0.push("start");
        }));
    }
}

#[test]
fn test_routine_runs_inline_and_procedure_is_queued() {
    init();
    let clock = Manual::default();
    let mut world = crate::world_test!(clock; Nested);

    let entity = world.spawn(Nested(Vec::new())).expect("Nested is not a singleton");
    world.tick(&tracer::Noop, &mut Headless);

    assert_eq!(
        world.get::<Nested>(entity).map(|n| n.0.clone()),
        Some(vec!["routine", "start", "procedure"])
    );
}

#[test]
fn test_behavior_kinds() {
    assert!(Behavior::from(Procedure::once(|_| {})).is_resumable());
    assert!(!Behavior::routine(|_| {}).is_resumable());
    assert_eq!(Procedure::forever(|_| {}).named("spin").repeat().debug_name(), "spin");
}
