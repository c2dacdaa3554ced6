//! Registry storage
//!
//! Keyed, insertion-ordered collection of [`RegistryEntry`] values.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::error::{RegistryError, Result};
use crate::player::MediaPlayer;

use super::entry::RegistryEntry;
use super::id::{ElementHandle, ItemId};

/// Registry handle shared between the controller and the arbiter
pub type SharedRegistry = Arc<RwLock<MediaRegistry>>;

/// Collection of all observed feed items
#[derive(Debug, Default)]
pub struct MediaRegistry {
    entries: IndexMap<ItemId, RegistryEntry>,
    elements: HashMap<ElementHandle, ItemId>,
}

impl MediaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry wrapped for sharing
    pub fn shared() -> SharedRegistry {
        Arc::new(RwLock::new(Self::new()))
    }

    /// Insert a new entry for `element`
    ///
    /// Fails if the id is already registered, or if the element is already
    /// observed under another id.
    pub fn insert(&mut self, id: ItemId, element: ElementHandle) -> Result<&mut RegistryEntry> {
        if self.entries.contains_key(&id) {
            return Err(RegistryError::AlreadyObserved(id));
        }
        if let Some(owner) = self.elements.get(&element) {
            return Err(RegistryError::ElementInUse {
                element,
                owner: owner.clone(),
            });
        }
        self.elements.insert(element, id.clone());
        Ok(self
            .entries
            .entry(id)
            .or_insert_with(|| RegistryEntry::new(element)))
    }

    /// Remove an entry, preserving the order of the remaining ones
    pub fn remove(&mut self, id: &ItemId) -> Option<RegistryEntry> {
        let entry = self.entries.shift_remove(id)?;
        self.elements.remove(&entry.element);
        Some(entry)
    }

    /// Get an entry
    pub fn get(&self, id: &ItemId) -> Option<&RegistryEntry> {
        self.entries.get(id)
    }

    /// Get a mutable entry
    pub fn get_mut(&mut self, id: &ItemId) -> Option<&mut RegistryEntry> {
        self.entries.get_mut(id)
    }

    /// Get an entry, or an error naming the missing id
    pub fn try_get(&self, id: &ItemId) -> Result<&RegistryEntry> {
        self.entries
            .get(id)
            .ok_or_else(|| RegistryError::ItemNotFound(id.clone()))
    }

    /// Get the attached player, or an error if the entry or player is missing
    pub fn try_player(&self, id: &ItemId) -> Result<Arc<dyn MediaPlayer>> {
        self.try_get(id)?
            .player()
            .ok_or_else(|| RegistryError::NoPlayer(id.clone()))
    }

    /// Get the attached player if any
    pub fn player(&self, id: &ItemId) -> Option<Arc<dyn MediaPlayer>> {
        self.entries.get(id).and_then(|e| e.player())
    }

    /// Check if an id is registered
    pub fn contains(&self, id: &ItemId) -> bool {
        self.entries.contains_key(id)
    }

    /// Check if an item is registered and currently visible
    pub fn is_visible(&self, id: &ItemId) -> bool {
        self.entries.get(id).map(|e| e.is_visible).unwrap_or(false)
    }

    /// Find the item observed through `element`
    pub fn id_for_element(&self, element: ElementHandle) -> Option<ItemId> {
        self.elements.get(&element).cloned()
    }

    /// Iterate entries in observation order
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, &RegistryEntry)> {
        self.entries.iter()
    }

    /// Iterate entries that have a player attached, in observation order
    pub fn players(&self) -> impl Iterator<Item = (&ItemId, &Arc<dyn MediaPlayer>)> {
        self.entries
            .iter()
            .filter_map(|(id, entry)| entry.player.as_ref().map(|p| (id, p)))
    }

    /// Number of registered entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakePlayer;

    #[test]
    fn test_insert_and_lookup() {
        let mut registry = MediaRegistry::new();
        let id = ItemId::new("a");

        registry.insert(id.clone(), ElementHandle::new(1)).unwrap();
        assert!(registry.contains(&id));
        assert!(!registry.is_visible(&id));
        assert_eq!(registry.id_for_element(ElementHandle::new(1)), Some(id.clone()));
        assert_eq!(registry.id_for_element(ElementHandle::new(2)), None);

        let result = registry.insert(id.clone(), ElementHandle::new(3));
        assert!(matches!(result, Err(RegistryError::AlreadyObserved(_))));
    }

    #[test]
    fn test_try_player() {
        let mut registry = MediaRegistry::new();
        let id = ItemId::new("a");

        assert!(matches!(
            registry.try_player(&id),
            Err(RegistryError::ItemNotFound(_))
        ));

        registry.insert(id.clone(), ElementHandle::new(1)).unwrap();
        assert!(matches!(
            registry.try_player(&id),
            Err(RegistryError::NoPlayer(_))
        ));

        registry.get_mut(&id).unwrap().player = Some(FakePlayer::paused());
        assert!(registry.try_player(&id).is_ok());
        assert_eq!(registry.players().count(), 1);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut registry = MediaRegistry::new();
        for (i, name) in ["a", "b", "c"].iter().enumerate() {
            registry
                .insert(ItemId::new(name), ElementHandle::new(i as u64))
                .unwrap();
        }

        registry.remove(&ItemId::new("a"));

        let order: Vec<_> = registry.iter().map(|(id, _)| id.to_string()).collect();
        assert_eq!(order, vec!["b", "c"]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.id_for_element(ElementHandle::new(0)), None);
    }

    #[test]
    fn test_element_observed_once() {
        let mut registry = MediaRegistry::new();
        let a = ItemId::new("a");
        registry.insert(a.clone(), ElementHandle::new(1)).unwrap();

        let result = registry.insert(ItemId::new("b"), ElementHandle::new(1));
        assert_eq!(
            result.err(),
            Some(RegistryError::ElementInUse {
                element: ElementHandle::new(1),
                owner: a.clone(),
            })
        );
        assert!(!registry.contains(&ItemId::new("b")));
        assert_eq!(registry.id_for_element(ElementHandle::new(1)), Some(a.clone()));

        // Freed once the first item goes away
        registry.remove(&a);
        registry.insert(ItemId::new("b"), ElementHandle::new(1)).unwrap();
        assert_eq!(
            registry.id_for_element(ElementHandle::new(1)),
            Some(ItemId::new("b"))
        );
    }
}
