//! Visibility-driven playback admission
//!
//! Items start playing as they scroll into view and stop as they leave. At
//! most `max_concurrent` items hold a play slot; when a new item becomes
//! visible and the set is full, the oldest admitted item is paused and evicted.
//!
//! ```text
//!  intersection batch ──► VisibilityController ──► registry.is_visible
//!                              │                         (committed first)
//!                              ├─ evict oldest (pause)
//!                              ├─ spawn play attempt ─► play() ─► admit
//!                              │        └─ on reject: one retry, then give up
//!                              ▼
//!                       Vec<VisibilityChange> ─► AudioFocusArbiter
//! ```
//!
//! Eviction is strict FIFO over admission order. It does not consult audio
//! focus: an item holding hover focus can still lose its play slot.

pub mod config;
pub mod controller;
pub mod event;
pub mod observer;
pub mod state;

pub use config::AdmissionConfig;
pub use controller::VisibilityController;
pub use event::{AdmissionEvent, VisibilityChange};
pub use observer::{IntersectionRecord, NoopObserver, ObserverOptions, ViewportObserver};
pub use state::AdmissionState;
