//! Media item registry
//!
//! The registry is the one mutable structure shared by the visibility
//! controller and the audio focus arbiter. Each side writes only its own
//! fields and reads the other's:
//!
//! ```text
//!                      SharedRegistry (Arc<RwLock<MediaRegistry>>)
//!                 ┌──────────────────────────────────────┐
//!                 │ entries: IndexMap<ItemId,            │
//!                 │   RegistryEntry {                    │
//!                 │     element, player, is_visible,     │
//!                 │     pending_visibility_play, ...     │
//!                 │   }                                  │
//!                 │ >                                    │
//!                 └───────┬──────────────────────┬───────┘
//!                 writes  │                      │  reads
//!       lifecycle, element│                      │  visibility, player
//!             visibility  ▼                      ▼
//!              [VisibilityController]     [AudioFocusArbiter]
//!                 activeSet (own)          owner/priority/mute (own)
//! ```
//!
//! Entries keep insertion order; the mobile auto-grant fallback depends on it.

pub mod entry;
pub mod id;
pub mod store;

pub use entry::RegistryEntry;
pub use id::{ElementHandle, ItemId};
pub use store::{MediaRegistry, SharedRegistry};
