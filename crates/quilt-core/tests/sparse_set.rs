//! SparseSet generational handle tests.
//!
//! These tests verify generation counter increments, stale-handle detection,
//! and slot reuse.

use quilt_core::alloc::sparse_set::{IndexSlot, SparseSet};

#[test]
fn test_push_and_get() {
    let mut set = SparseSet::new();

    let idx = set.push(42);
    assert_eq!(set.get(idx), Some(&42));

    let idx2 = set.push(100);
    assert_eq!(set.get(idx2), Some(&100));

    // Original value should still be accessible
    assert_eq!(set.get(idx), Some(&42));
}

#[test]
fn test_push_returns_correct_index() {
    let mut set = SparseSet::<i32>::new();

    let idx0 = set.push(0);
    assert_eq!(idx0.index(), 0);
    assert_eq!(idx0.generation(), 0);

    let idx1 = set.push(1);
    assert_eq!(idx1.index(), 1);
    assert_eq!(idx1.generation(), 0);
}

#[test]
fn test_get_mut() {
    let mut set = SparseSet::new();

    let idx = set.push(42);
    if let Some(value) = set.get_mut(idx) {
        *value = 7;
    }
    assert_eq!(set.get(idx), Some(&7));
}

#[test]
fn test_generation_increments_on_reuse() {
    let mut set = SparseSet::new();

    let first = set.push("a");
    set.remove(first);
    let second = set.push("b");
    set.remove(second);
    let third = set.push("c");

    assert_eq!(first.index(), third.index());
    assert_eq!(third.generation(), 2);
    assert!(!set.contains(first));
    assert!(!set.contains(second));
    assert_eq!(set.get(third), Some(&"c"));
}

#[test]
fn test_stale_handle_get_mut_is_none() {
    let mut set = SparseSet::new();

    let idx = set.push(1u32);
    set.remove(idx);
    assert!(set.get_mut(idx).is_none());
    assert!(set.is_empty());
}

#[test]
fn test_slot_encoding_roundtrip() {
    let slot = IndexSlot::new(3, 17);
    assert_eq!(slot.generation(), 3);
    assert_eq!(slot.index(), 17);
}
