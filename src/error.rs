//! Error types
//!
//! Nothing here is fatal. Playback errors are caught and logged by the
//! admission controller; registry errors only surface through the `try_*`
//! accessors and are otherwise turned into silent no-ops.

use crate::registry::{ElementHandle, ItemId};

/// Error returned by [`MediaPlayer::play`](crate::player::MediaPlayer::play)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// Playback was refused by the autoplay policy
    NotAllowed(String),
    /// Playback was interrupted (e.g. by a pause or a new load)
    Aborted(String),
    /// The media element is no longer attached to the document
    Detached,
    /// Any other player failure
    Other(String),
}

impl std::fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackError::NotAllowed(msg) => write!(f, "Playback not allowed: {}", msg),
            PlaybackError::Aborted(msg) => write!(f, "Playback aborted: {}", msg),
            PlaybackError::Detached => write!(f, "Media element detached"),
            PlaybackError::Other(msg) => write!(f, "Playback failed: {}", msg),
        }
    }
}

impl std::error::Error for PlaybackError {}

/// Error type for registry lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No entry is registered for this item
    ItemNotFound(ItemId),
    /// The item is already being observed
    AlreadyObserved(ItemId),
    /// The element is already observed under another item
    ElementInUse {
        /// Element passed to `observe`
        element: ElementHandle,
        /// Item currently observed through it
        owner: ItemId,
    },
    /// The entry exists but has no player attached
    NoPlayer(ItemId),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::ItemNotFound(id) => write!(f, "Item not found: {}", id),
            RegistryError::AlreadyObserved(id) => write!(f, "Item already observed: {}", id),
            RegistryError::ElementInUse { element, owner } => {
                write!(f, "{} already observed for item {}", element, owner)
            }
            RegistryError::NoPlayer(id) => write!(f, "Item has no player: {}", id),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Result alias for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
