//! Playback coordination for media feeds
//!
//! A feed mounts many video players at once. This crate decides which of
//! them may play and which single one may be heard:
//!
//! - [`admission::VisibilityController`] watches viewport intersection and keeps
//!   a bounded, FIFO-evicted set of actively playing items.
//! - [`focus::AudioFocusArbiter`] owns the one "audio owner" slot, resolved
//!   through a small priority lattice (hover > manual > center), and keeps every
//!   other player muted.
//! - [`coordinator::FeedCoordinator`] wires both to the same event stream so that
//!   visibility facts are committed before audio focus is recomputed.
//!
//! The media player and the viewport observation primitive are supplied by the
//! embedding UI layer through the [`player::MediaPlayer`] and
//! [`admission::ViewportObserver`] traits.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use feed_playback::admission::{IntersectionRecord, NoopObserver};
//! use feed_playback::coordinator::{FeedConfig, FeedCoordinator};
//! use feed_playback::registry::{ElementHandle, ItemId};
//!
//! # async fn example(player: Arc<dyn feed_playback::player::MediaPlayer>) {
//! let (feed, events) = FeedCoordinator::new(FeedConfig::default(), Arc::new(NoopObserver));
//! let feed = Arc::new(feed);
//! let _pump = feed.spawn_event_pump(events);
//!
//! let id = ItemId::new("post-1");
//! feed.observe(ElementHandle::new(1), id.clone()).await;
//! feed.register_player(&id, player).await;
//! feed.handle_intersections(&[IntersectionRecord::new(ElementHandle::new(1), true, 1.0)])
//!     .await;
//! feed.on_hover_enter(&id).await;
//! # }
//! ```

pub mod admission;
pub mod coordinator;
pub mod debug;
pub mod error;
pub mod focus;
pub mod player;
pub mod registry;

#[cfg(test)]
pub(crate) mod test_support;

pub use admission::{AdmissionConfig, AdmissionEvent, VisibilityController};
pub use coordinator::{FeedConfig, FeedCoordinator};
pub use error::{PlaybackError, RegistryError};
pub use focus::{AudioFocusArbiter, AudioPriority, FocusConfig};
pub use player::{DeviceClass, MediaPlayer};
pub use registry::{ElementHandle, ItemId, SharedRegistry};
