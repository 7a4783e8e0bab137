use std::collections::BTreeMap;
use std::fmt;

use crate::geometry::Span;

/// Ticket issued for every image the loader creates. Load/error
/// notifications carry it back so late events for discarded slots can be
/// told apart from a later slot at the same page index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub u64);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Pending,
    Loaded,
    Failed,
}

/// Height a prepended image occupied right after insertion, before its
/// pixels arrived. Whatever it grows by on load is owed to the scroll offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollAnchor {
    pub inserted_height: f64,
}

/// One attached page image.
#[derive(Debug)]
pub struct ImageSlot<I> {
    pub index: usize,
    pub id: SlotId,
    pub image: I,
    pub state: LoadState,
    /// Present while a prepended image still owes a scroll correction.
    pub anchor: Option<ScrollAnchor>,
}

impl<I> ImageSlot<I> {
    pub fn new(index: usize, id: SlotId, image: I) -> Self {
        Self {
            index,
            id,
            image,
            state: LoadState::Pending,
            anchor: None,
        }
    }
}

/// Attached slots keyed by page index.
///
/// Presence means "in the document", not "decoded". Keys are kept ordered so
/// the first and last attached pages are found without a scan.
#[derive(Debug)]
pub struct SlotRegistry<I> {
    slots: BTreeMap<usize, ImageSlot<I>>,
}

impl<I> Default for SlotRegistry<I> {
    fn default() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }
}

impl<I> SlotRegistry<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, index: usize) -> bool {
        self.slots.contains_key(&index)
    }

    /// Register `slot`. Returns false and drops the argument when its index
    /// is already present.
    pub fn set(&mut self, slot: ImageSlot<I>) -> bool {
        if self.has(slot.index) {
            return false;
        }
        self.slots.insert(slot.index, slot);
        true
    }

    pub fn get(&self, index: usize) -> Option<&ImageSlot<I>> {
        self.slots.get(&index)
    }

    pub fn find_mut(&mut self, id: SlotId) -> Option<&mut ImageSlot<I>> {
        self.slots.values_mut().find(|s| s.id == id)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn first_by_index(&self) -> Option<&ImageSlot<I>> {
        self.slots.values().next()
    }

    pub fn last_by_index(&self) -> Option<&ImageSlot<I>> {
        self.slots.values().next_back()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Attached page indices in ascending order.
    pub fn indices(&self) -> Vec<usize> {
        self.slots.keys().copied().collect()
    }

    /// Slots in ascending page order.
    pub fn iter(&self) -> impl Iterator<Item = &ImageSlot<I>> {
        self.slots.values()
    }

    /// Index of the first slot whose span (as measured by `span_of`)
    /// contains `y`.
    pub fn index_at(&self, y: f64, span_of: impl Fn(&I) -> Span) -> Option<usize> {
        self.slots
            .values()
            .find(|s| span_of(&s.image).contains(y))
            .map(|s| s.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(index: usize, id: u64) -> ImageSlot<&'static str> {
        ImageSlot::new(index, SlotId(id), "img")
    }

    #[test]
    fn test_set_is_idempotent_per_index() {
        let mut reg = SlotRegistry::new();
        assert!(reg.set(slot(4, 1)));
        assert!(!reg.set(slot(4, 2)));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get(4).map(|s| s.id), Some(SlotId(1)));
    }

    #[test]
    fn test_first_and_last_by_index_ignore_insertion_order() {
        let mut reg = SlotRegistry::new();
        assert!(reg.first_by_index().is_none());
        reg.set(slot(7, 1));
        reg.set(slot(3, 2));
        reg.set(slot(9, 3));
        reg.set(slot(5, 4));
        assert_eq!(reg.first_by_index().map(|s| s.index), Some(3));
        assert_eq!(reg.last_by_index().map(|s| s.index), Some(9));
        assert_eq!(reg.indices(), vec![3, 5, 7, 9]);
    }

    #[test]
    fn test_find_by_slot_id() {
        let mut reg = SlotRegistry::new();
        reg.set(slot(0, 10));
        reg.set(slot(1, 11));
        assert_eq!(reg.find_mut(SlotId(11)).map(|s| s.index), Some(1));
        reg.clear();
        assert!(reg.find_mut(SlotId(11)).is_none());
        assert!(reg.is_empty());
    }
}
