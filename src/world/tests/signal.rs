use crate::kind::{self, Kind};
use crate::render::Headless;
use crate::test_util::{init, Event, Recorder};
use crate::time::Manual;
use crate::{tracer, Behavior, Context, Delay, Procedure};

struct Listener(u32);

impl Kind for Listener {
    fn declare(spec: &mut kind::Spec) {
        spec.on_receive("go", Behavior::routine(|cx| cx.data::<Listener>().0 += 1));
    }
}

struct Shouter;

impl Kind for Shouter {
    fn declare(spec: &mut kind::Spec) {
        spec.update(Behavior::routine(|cx| {
            cx.broadcast("go");
        }));
    }
}

fn heard(world: &crate::World, entity: crate::Entity) -> Option<u32> {
    world.get::<Listener>(entity).map(|listener| listener.0)
}

#[test]
fn test_broadcast_only_enqueues() {
    init();
    let clock = Manual::default();
    let mut world = crate::world_test!(clock; Listener);
    let listener = world.spawn(Listener(0)).expect("Listener is not a singleton");
    world.tick(&tracer::Noop, &mut Headless);

    assert_eq!(world.broadcast("go"), 1);
    assert_eq!(world.broadcast("go"), 1);
    assert_eq!(heard(&world, listener), Some(0));
    assert_eq!(world.pending_count(listener), Some(2));

    world.tick(&tracer::Noop, &mut Headless);
    assert_eq!(heard(&world, listener), Some(2));
    assert_eq!(world.pending_count(listener), Some(0));
}

#[test]
fn test_receivers_later_in_wave_hear_it_in_same_tick() {
    init();
    let clock = Manual::default();
    let mut world = crate::world_test!(clock; Listener, Shouter);
    let recorder = Recorder::default();

    let early = world.spawn(Listener(0)).expect("Listener is not a singleton");
    world.spawn(Shouter).expect("Shouter is not a singleton");
    let late = world.spawn(Listener(0)).expect("Listener is not a singleton");

    // the first step only runs `start`
    world.tick(&tracer::Noop, &mut Headless);
    assert_eq!((heard(&world, early), heard(&world, late)), (Some(0), Some(0)));

    world.tick(&recorder, &mut Headless);
    assert_eq!((heard(&world, early), heard(&world, late)), (Some(0), Some(1)));
    assert_eq!(world.pending_count(early), Some(1));
    assert!(recorder.take().contains(&Event::Broadcast { name: "go".into(), receivers: 2 }));

    world.tick(&tracer::Noop, &mut Headless);
    assert_eq!((heard(&world, early), heard(&world, late)), (Some(1), Some(2)));
}

#[test]
fn test_uncommitted_and_dead_entities_do_not_receive() {
    init();
    let clock = Manual::default();
    let mut world = crate::world_test!(clock; Listener);

    let first = world.spawn(Listener(0)).expect("Listener is not a singleton");
    assert_eq!(world.broadcast("go"), 0, "staged entities are not receivers yet");
    assert_eq!(world.pending_count(first), Some(0));

    world.tick(&tracer::Noop, &mut Headless);
    let second = world.spawn(Listener(0)).expect("Listener is not a singleton");
    assert_eq!(world.broadcast("go"), 1);
    assert_eq!(world.pending_count(second), Some(0));

    world.delete(first);
    assert_eq!(world.broadcast("go"), 0);
    assert_eq!(world.broadcast("stop"), 0);
}

struct Echo(Vec<&'static str>);

impl Kind for Echo {
    fn declare(spec: &mut kind::Spec) {
        spec.on_receive("ping", Behavior::routine(|cx| cx.data::<Echo>().0.push("routine")))
            .on_receive(
                "ping",
                Procedure::new(|| {
                    let mut resumed = false;
                    move |cx: &mut Context<'_>| -> Option<Delay> {
                        if resumed {
                            cx.data::<Echo>().0.push("procedure resumed");
                            return None;
                        }
                        resumed = true;
                        cx.data::<Echo>().0.push("procedure");
                        Some(Delay::frame())
                    }
                }),
            );
    }
}

#[test]
fn test_every_receiver_of_a_message_is_started_in_declaration_order() {
    init();
    let clock = Manual::default();
    let mut world = crate::world_test!(clock; Echo);
    let echo = world.spawn(Echo(Vec::new())).expect("Echo is not a singleton");
    world.tick(&tracer::Noop, &mut Headless);

    assert_eq!(world.broadcast("ping"), 1);
    assert_eq!(world.pending_count(echo), Some(2));

    world.tick(&tracer::Noop, &mut Headless);
    assert_eq!(world.get::<Echo>(echo).map(|e| e.0.clone()), Some(vec!["routine", "procedure"]));
    assert_eq!(world.active_count(echo), Some(1));

    world.tick(&tracer::Noop, &mut Headless);
    assert_eq!(
        world.get::<Echo>(echo).map(|e| e.0.clone()),
        Some(vec!["routine", "procedure", "procedure resumed"])
    );
    assert_eq!(world.active_count(echo), Some(0));
}
