//! Active-playback set

use indexmap::IndexSet;

use crate::registry::ItemId;

/// Items currently holding a play slot, oldest first
#[derive(Debug, Clone)]
pub struct AdmissionState {
    active: IndexSet<ItemId>,
    max_concurrent: usize,
}

impl AdmissionState {
    /// Create an empty set bounded by `max_concurrent`
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            active: IndexSet::with_capacity(max_concurrent),
            max_concurrent,
        }
    }

    /// Check if the set is at capacity
    pub fn is_full(&self) -> bool {
        self.active.len() >= self.max_concurrent
    }

    /// Remove and return the oldest admitted item
    pub fn evict_oldest(&mut self) -> Option<ItemId> {
        self.active.shift_remove_index(0)
    }

    /// Add an item. Caller must make room first.
    pub(crate) fn admit(&mut self, id: ItemId) -> bool {
        debug_assert!(!self.is_full() || self.active.contains(&id));
        self.active.insert(id)
    }

    /// Remove an item
    pub fn remove(&mut self, id: &ItemId) -> bool {
        self.active.shift_remove(id)
    }

    /// Check membership
    pub fn contains(&self, id: &ItemId) -> bool {
        self.active.contains(id)
    }

    /// Number of admitted items
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Check if no item is admitted
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Admitted items, oldest first
    pub fn ids(&self) -> Vec<ItemId> {
        self.active.iter().cloned().collect()
    }

    /// Capacity
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }
}
