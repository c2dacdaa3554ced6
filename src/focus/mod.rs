//! Audio focus arbitration
//!
//! Exactly one feed item may be heard at a time. The arbiter keeps a single
//! owner slot, resolved through a strict priority lattice:
//!
//! ```text
//!   Hover (3)  >  Manual (2)  >  Center (1)  >  None (0)
//! ```
//!
//! Ownership changes in three ways:
//! - `request_audio_focus` promotes an item if it outranks the current owner
//! - `release_audio_focus` (or visibility loss) demotes the owner
//! - `update_audio_focus` recomputes from hover state and the manually started list
//!
//! After every change the mute state of every registered player is re-applied,
//! so that with global mute off only the owner is unmuted.

pub mod arbiter;
pub mod config;
pub mod priority;
pub mod state;

pub use arbiter::AudioFocusArbiter;
pub use config::FocusConfig;
pub use priority::AudioPriority;
pub use state::{AudioFocusState, FocusSnapshot};
