//! Registry entry
//!
//! Per-item state stored in the registry.

use std::sync::Arc;

use crate::player::MediaPlayer;

use super::id::ElementHandle;

/// Entry for a single feed item
///
/// Created when the item's element is first observed. The player is attached
/// later, once the item's media has loaded.
pub struct RegistryEntry {
    /// Element used for intersection observation
    pub element: ElementHandle,

    /// Player handle (None until registered, or after unload)
    pub player: Option<Arc<dyn MediaPlayer>>,

    /// Last known intersection result
    pub is_visible: bool,

    /// Became visible before a player was attached; play on registration
    pub pending_visibility_play: bool,

    /// Player was torn down while the element stays observed
    pub is_unloaded: bool,

    /// Bumped on every visibility transition or player swap.
    /// Scheduled play attempts compare against it to detect staleness.
    pub(crate) epoch: u64,
}

impl RegistryEntry {
    /// Create a new entry for an element
    pub(crate) fn new(element: ElementHandle) -> Self {
        Self {
            element,
            player: None,
            is_visible: false,
            pending_visibility_play: false,
            is_unloaded: false,
            epoch: 0,
        }
    }

    /// Check if a player is attached
    pub fn has_player(&self) -> bool {
        self.player.is_some()
    }

    /// Get a clone of the player handle
    pub fn player(&self) -> Option<Arc<dyn MediaPlayer>> {
        self.player.clone()
    }

    /// Check whether `player` is the handle currently attached
    pub(crate) fn holds_player(&self, player: &Arc<dyn MediaPlayer>) -> bool {
        self.player
            .as_ref()
            .map(|p| Arc::ptr_eq(p, player))
            .unwrap_or(false)
    }

    pub(crate) fn bump_epoch(&mut self) -> u64 {
        self.epoch = self.epoch.wrapping_add(1);
        self.epoch
    }
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("element", &self.element)
            .field("has_player", &self.has_player())
            .field("is_visible", &self.is_visible)
            .field("pending_visibility_play", &self.pending_visibility_play)
            .field("is_unloaded", &self.is_unloaded)
            .field("epoch", &self.epoch)
            .finish()
    }
}
