/// Convenience macro that builds a world for testing a small number of kinds.
///
/// The world loads images through [`test_util::FakeLoader`](crate::test_util::FakeLoader)
/// and reads time from the given [`time::Manual`](crate::time::Manual) clock.
///
/// ```ignore
/// let clock = pounce::time::Manual::default();
/// let mut world = pounce::world_test!(clock; Spawner, Leaf);
/// ```
#[macro_export]
macro_rules! world_test {
    ($clock:expr; $($kind:ty),* $(,)?) => {{
        let mut builder = $crate::world::Builder::new($crate::test_util::FakeLoader::default());
        builder.clock(::std::rc::Rc::new(::std::clone::Clone::clone(&$clock)));
        builder.seed(0);
        $(
            if let Err(err) = builder.register::<$kind>() {
                panic!("Cannot register {}: {}", stringify!($kind), err);
            }
        )*
        builder.build()
    }};
}
