use super::{hook, Info, Kind, Resolved, Shape, Spec};
use crate::error::Error;
use crate::resource::Cache;
use crate::test_util::FakeLoader;
use crate::{Behavior, Procedure};

struct Greeter;

impl Kind for Greeter {
    fn declare(spec: &mut Spec) {
        spec.on_receive("hello", Procedure::once(|_| {}))
            .on_receive("hello", Behavior::routine(|_| {}))
            .on_receive("bye", Procedure::once(|_| {}))
            .forbid(hook::receive("shout"));
    }
}

struct Shouter;

impl Kind for Shouter {
    fn declare(spec: &mut Spec) {
        spec.forbid(hook::receive("shout")).on_receive("shout", Procedure::once(|_| {}));
    }
}

struct Sneaky;

impl Kind for Sneaky {
    fn declare(spec: &mut Spec) { spec.hook(hook::UPDATE, Procedure::once(|_| {})); }
}

struct Cat;

impl Kind for Cat {
    fn declare(spec: &mut Spec) { spec.shape(Shape::sprite(["cat-a.png", "cat-b.png"])); }
}

struct Ghost;

impl Kind for Ghost {
    fn declare(spec: &mut Spec) { spec.shape(Shape::sprite(["cat-a.png", "missing.png"])); }
}

#[test]
fn test_receive_hook_name() {
    assert_eq!(hook::receive("ping"), "receive<ping>");
}

#[test]
fn test_hooks_keep_declaration_order() {
    let mut cache = Cache::new(FakeLoader::default());
    let info = Info::compile::<Greeter>(&mut cache).expect("Greeter declares no forbidden hook");

    assert_eq!(
        info.hooks.keys().collect::<Vec<_>>(),
        vec![&hook::receive("hello"), &hook::receive("bye")]
    );
    let hello = &info.hooks[&hook::receive("hello")];
    assert_eq!(hello.len(), 2);
    assert!(hello[0].is_resumable());
    assert!(!hello[1].is_resumable());

    assert!(info.has_hook(&hook::receive("bye")));
    assert!(!info.has_hook(&hook::receive("shout")));
    assert!(!info.singleton);
    assert!(info.initial_spatial().is_none());
}

#[test]
fn test_forbidden_hook_is_rejected() {
    let mut cache = Cache::new(FakeLoader::default());
    match Info::compile::<Shouter>(&mut cache) {
        Err(Error::Hook(err)) => {
            assert_eq!(err.hook, "receive<shout>");
            assert!(err.kind.name.ends_with("Shouter"));
        }
        Err(err) => panic!("unexpected error {err}"),
        Ok(_) => panic!("forbidden hook was accepted"),
    }
}

#[test]
fn test_reserved_hook_is_rejected() {
    let mut cache = Cache::new(FakeLoader::default());
    assert!(matches!(
        Info::compile::<Sneaky>(&mut cache),
        Err(Error::Hook(err)) if err.hook == hook::UPDATE
    ));
}

#[test]
fn test_sprite_costumes_are_resolved() {
    let mut cache = Cache::new(FakeLoader::default());
    let info = Info::compile::<Cat>(&mut cache).expect("all costumes exist");

    assert!(matches!(info.shape, Resolved::Sprite { .. }));
    let names: Vec<_> = info.costumes().iter().map(|image| image.name().to_string()).collect();
    assert_eq!(names, ["cat-a.png", "cat-b.png"]);
    assert!(info.initial_spatial().is_some());
}

#[test]
fn test_missing_costume_is_reported() {
    let mut cache = Cache::new(FakeLoader::default());
    match Info::compile::<Ghost>(&mut cache) {
        Err(Error::Resource { kind, source }) => {
            assert!(kind.name.ends_with("Ghost"));
            assert_eq!(source.name, "missing.png");
        }
        Err(err) => panic!("unexpected error {err}"),
        Ok(_) => panic!("missing costume was accepted"),
    }
}
