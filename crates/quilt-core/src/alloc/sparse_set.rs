use crate::profiling::profile_function;
use std::num::NonZeroU64;

/// Generational handle into a [`SparseSet`].
///
/// A handle whose slot has been freed and reused no longer resolves, so stale handles
/// are detected instead of aliasing the new occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexSlot(NonZeroU64);

impl IndexSlot {
    pub fn new(generation: u32, idx: u32) -> Self {
        let raw = ((generation as u64) << 32) | (idx as u64 + 1);
        match NonZeroU64::new(raw) {
            Some(raw) => Self(raw),
            None => unreachable!("the low half always holds idx + 1"),
        }
    }

    pub fn generation(&self) -> u32 {
        (self.0.get() >> 32) as u32
    }

    pub fn index(&self) -> u32 {
        (self.0.get() & u32::MAX as u64) as u32 - 1
    }
}

#[derive(Debug)]
struct Entry<T> {
    generation: u32,
    data: Option<T>,
}

/// Slot storage with O(1) insert/remove and slot reuse.
#[derive(Debug)]
pub struct SparseSet<T> {
    vec: Vec<Entry<T>>,
    free: Vec<u32>,
}

impl<T> SparseSet<T> {
    pub const fn new() -> Self {
        Self {
            vec: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn push(&mut self, data: T) -> IndexSlot {
        profile_function!();
        if let Some(idx) = self.free.pop()
            && let Some(entry) = self.vec.get_mut(idx as usize)
        {
            entry.data = Some(data);
            return IndexSlot::new(entry.generation, idx);
        }
        let idx = self.vec.len() as u32;
        self.vec.push(Entry {
            generation: 0,
            data: Some(data),
        });
        IndexSlot::new(0, idx)
    }

    fn entry(&self, idx: IndexSlot) -> Option<&Entry<T>> {
        self.vec
            .get(idx.index() as usize)
            .filter(|entry| entry.generation == idx.generation())
    }

    pub fn get(&self, idx: IndexSlot) -> Option<&T> {
        self.entry(idx).and_then(|entry| entry.data.as_ref())
    }

    pub fn get_mut(&mut self, idx: IndexSlot) -> Option<&mut T> {
        self.vec
            .get_mut(idx.index() as usize)
            .filter(|entry| entry.generation == idx.generation())
            .and_then(|entry| entry.data.as_mut())
    }

    pub fn contains(&self, idx: IndexSlot) -> bool {
        self.get(idx).is_some()
    }

    /// Remove the value behind `idx`, bumping the slot generation.
    ///
    /// Returns `None` for stale or unknown handles.
    pub fn remove(&mut self, idx: IndexSlot) -> Option<T> {
        profile_function!();
        let index = idx.index();
        let entry = self
            .vec
            .get_mut(index as usize)
            .filter(|entry| entry.generation == idx.generation())?;
        let data = entry.data.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(index);
        Some(data)
    }

    pub fn len(&self) -> usize {
        self.vec.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.vec.iter().filter_map(|entry| entry.data.as_ref())
    }
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_eq_size!(IndexSlot, Option<IndexSlot>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_set_push() {
        let mut set = SparseSet::<u8>::new();
        let idx = set.push(15);
        assert_eq!(idx.generation(), 0);
        assert_eq!(idx.index(), 0);
        assert_eq!(set.get(idx), Some(&15));
    }

    #[test]
    fn test_sparse_set_stale_generation() {
        let mut set = SparseSet::<u8>::new();
        let _ = set.push(15);
        let idx = IndexSlot::new(1, 0);
        assert_eq!(set.get(idx), None);
    }

    #[test]
    fn test_sparse_set_remove_reuses_slot() {
        let mut set = SparseSet::<u8>::new();
        let idx = set.push(15);
        assert_eq!(set.remove(idx), Some(15));
        let new_idx = set.push(45);
        assert_eq!(idx.index(), new_idx.index());
        assert_ne!(idx.generation(), new_idx.generation());
        assert_eq!(set.get(idx), None);
        assert_eq!(set.remove(idx), None);
    }

    #[test]
    fn test_sparse_set_iter_skips_freed() {
        let mut set = SparseSet::<u8>::new();
        let slots: Vec<_> = (0..10).map(|i| set.push(i)).collect();
        set.remove(slots[0]);
        set.remove(slots[1]);
        let collected: Vec<_> = set.iter().copied().collect();
        assert_eq!(collected, (2..10).collect::<Vec<u8>>());
        assert_eq!(set.len(), 8);
    }
}
