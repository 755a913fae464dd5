use crate::error::LookupError;
use crate::kind::{self, Kind, KindId};
use crate::render::Headless;
use crate::test_util::init;
use crate::time::Manual;
use crate::{tracer, Behavior};

struct Stage;

impl Kind for Stage {
    const SINGLETON: bool = true;

    fn declare(_: &mut kind::Spec) {}
}

struct Actor;

impl Kind for Actor {
    fn declare(_: &mut kind::Spec) {}
}

#[test]
fn test_singleton_is_visible_after_commit() {
    init();
    let clock = Manual::default();
    let mut world = crate::world_test!(clock; Stage);

    assert_eq!(world.singleton::<Stage>(), Err(LookupError::Missing { kind: KindId::of::<Stage>() }));

    let stage = world.spawn(Stage).expect("no Stage exists yet");
    assert_eq!(world.singleton::<Stage>(), Err(LookupError::Missing { kind: KindId::of::<Stage>() }));

    world.tick(&tracer::Noop, &mut Headless);
    assert_eq!(world.singleton::<Stage>(), Ok(stage));
}

#[test]
fn test_singleton_lookup_of_plain_kind() {
    let clock = Manual::default();
    let mut world = crate::world_test!(clock; Actor);
    world.spawn(Actor).expect("Actor is not a singleton");
    world.tick(&tracer::Noop, &mut Headless);

    assert_eq!(
        world.singleton::<Actor>(),
        Err(LookupError::NotSingleton { kind: KindId::of::<Actor>() })
    );
}

#[test]
#[should_panic(expected = "Cannot list instances of singleton kind")]
fn test_instances_of_singleton_kind() {
    let clock = Manual::default();
    let world = crate::world_test!(clock; Stage);
    world.instances::<Stage>();
}

#[test]
fn test_deletion_frees_slot_immediately() {
    init();
    let clock = Manual::default();
    let mut world = crate::world_test!(clock; Stage);

    let first = world.spawn(Stage).expect("no Stage exists yet");
    world.tick(&tracer::Noop, &mut Headless);

    assert!(world.delete(first));
    assert!(world.singleton::<Stage>().is_err());
    let second = world.spawn(Stage).expect("the first Stage was deleted");
    assert_ne!(first, second);

    world.tick(&tracer::Noop, &mut Headless);
    assert_eq!(world.singleton::<Stage>(), Ok(second));
    assert_eq!(world.lifecycle(first), None);
}

struct Director;

impl Kind for Director {
    fn declare(spec: &mut kind::Spec) {
        spec.update(Behavior::routine(|cx| {
            let stage = cx.singleton::<Stage>().expect("the stage was spawned first");
            cx.delete(stage);
            cx.spawn(Stage).expect("the old stage was just deleted");
        }));
    }
}

#[test]
fn test_singleton_replaced_within_a_tick() {
    init();
    let clock = Manual::default();
    let mut world = crate::world_test!(clock; Stage, Director);

    let stage = world.spawn(Stage).expect("no Stage exists yet");
    world.spawn(Director).expect("Director is not a singleton");
    world.tick(&tracer::Noop, &mut Headless);
    assert_eq!(world.singleton::<Stage>(), Ok(stage));

    world.tick(&tracer::Noop, &mut Headless);
    let replacement = world.singleton::<Stage>().expect("the replacement was committed");
    assert_ne!(replacement, stage);
    assert_eq!(world.lifecycle(stage), None);
}
