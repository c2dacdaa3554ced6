//! Debug event hook
//!
//! Besides `tracing` output, the embedding app can install a callback that
//! receives every focus transition. It is only invoked when `debug` is enabled
//! in [`FocusConfig`](crate::focus::FocusConfig).

use std::sync::Arc;

use crate::focus::AudioPriority;
use crate::registry::ItemId;

/// Debug logger callback
pub type DebugLogger = Arc<dyn Fn(&DebugEvent) + Send + Sync>;

/// A focus transition reported to the debug logger
#[derive(Debug, Clone, PartialEq)]
pub enum DebugEvent {
    /// Focus request granted
    FocusGranted { id: ItemId, priority: AudioPriority },
    /// Focus request refused
    FocusDenied {
        id: ItemId,
        priority: AudioPriority,
        reason: &'static str,
    },
    /// Ownership released
    FocusReleased { id: ItemId },
    /// Full recompute finished
    FocusRecomputed {
        owner: Option<ItemId>,
        priority: AudioPriority,
    },
    /// Mobile fallback granted ownership during mute application
    MobileAutoGrant { id: ItemId, priority: AudioPriority },
    /// Owner paused; muted but kept as owner
    OwnerPaused { id: ItemId },
    /// Global mute toggled
    GlobalMute { muted: bool },
    /// Hover entered or left an item
    Hover { id: ItemId, entered: bool },
}

impl DebugEvent {
    /// Stable event name
    pub fn name(&self) -> &'static str {
        match self {
            DebugEvent::FocusGranted { .. } => "focus_granted",
            DebugEvent::FocusDenied { .. } => "focus_denied",
            DebugEvent::FocusReleased { .. } => "focus_released",
            DebugEvent::FocusRecomputed { .. } => "focus_recomputed",
            DebugEvent::MobileAutoGrant { .. } => "mobile_auto_grant",
            DebugEvent::OwnerPaused { .. } => "owner_paused",
            DebugEvent::GlobalMute { .. } => "global_mute",
            DebugEvent::Hover { .. } => "hover",
        }
    }
}

impl std::fmt::Display for DebugEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DebugEvent::FocusGranted { id, priority } => {
                write!(f, "{}: {} at {:?}", self.name(), id, priority)
            }
            DebugEvent::FocusDenied {
                id,
                priority,
                reason,
            } => write!(f, "{}: {} at {:?} ({})", self.name(), id, priority, reason),
            DebugEvent::FocusReleased { id } => write!(f, "{}: {}", self.name(), id),
            DebugEvent::FocusRecomputed { owner, priority } => match owner {
                Some(id) => write!(f, "{}: {} at {:?}", self.name(), id, priority),
                None => write!(f, "{}: no owner", self.name()),
            },
            DebugEvent::MobileAutoGrant { id, priority } => {
                write!(f, "{}: {} at {:?}", self.name(), id, priority)
            }
            DebugEvent::OwnerPaused { id } => write!(f, "{}: {}", self.name(), id),
            DebugEvent::GlobalMute { muted } => write!(f, "{}: {}", self.name(), muted),
            DebugEvent::Hover { id, entered } => {
                let dir = if *entered { "enter" } else { "leave" };
                write!(f, "{}: {} {}", self.name(), dir, id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_and_display() {
        let granted = DebugEvent::FocusGranted {
            id: ItemId::new("a"),
            priority: AudioPriority::Hover,
        };
        assert_eq!(granted.name(), "focus_granted");
        assert_eq!(granted.to_string(), "focus_granted: a at Hover");

        let recomputed = DebugEvent::FocusRecomputed {
            owner: None,
            priority: AudioPriority::None,
        };
        assert_eq!(recomputed.to_string(), "focus_recomputed: no owner");

        let hover = DebugEvent::Hover {
            id: ItemId::new("b"),
            entered: false,
        };
        assert_eq!(hover.to_string(), "hover: leave b");
    }
}
