use std::hash;

use super::{Allocator, Entity, Lifecycle};

// Entity handles are plain values that can be freely copied around behaviors.
static_assertions::assert_impl_all!(Entity: Copy, Ord, hash::Hash, Send, Sync);

#[test]
fn test_allocation_follows_creation_order() {
    let mut alloc = Allocator::default();
    let first = alloc.allocate();
    let second = alloc.allocate();
    let third = alloc.allocate();

    assert_eq!(first.id(), 1);
    assert!(first < second && second < third);
}

#[test]
fn test_dead_is_not_alive() {
    assert!(Lifecycle::New.is_alive());
    assert!(Lifecycle::Live.is_alive());
    assert!(!Lifecycle::Dead.is_alive());
}
