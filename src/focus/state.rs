//! Audio focus state

use indexmap::IndexSet;

use crate::registry::ItemId;

use super::priority::AudioPriority;

/// Singleton ownership state held by the arbiter
#[derive(Debug, Clone)]
pub struct AudioFocusState {
    /// Current audio owner
    pub current_owner: Option<ItemId>,

    /// Priority the owner holds (None iff there is no owner)
    pub owner_priority: AudioPriority,

    /// Item under the pointer, independent of ownership
    pub hovered: Option<ItemId>,

    /// Items the user explicitly started, in start order
    pub manually_started: IndexSet<ItemId>,

    /// Global mute
    pub global_mute: bool,
}

impl AudioFocusState {
    /// Create a state with no owner
    pub fn new(global_mute: bool) -> Self {
        Self {
            current_owner: None,
            owner_priority: AudioPriority::None,
            hovered: None,
            manually_started: IndexSet::new(),
            global_mute,
        }
    }

    /// Check if `id` is the current owner
    pub fn is_owner(&self, id: &ItemId) -> bool {
        self.current_owner.as_ref() == Some(id)
    }

    pub(crate) fn set_owner(&mut self, id: ItemId, priority: AudioPriority) {
        debug_assert!(priority != AudioPriority::None);
        self.current_owner = Some(id);
        self.owner_priority = priority;
    }

    pub(crate) fn clear_owner(&mut self) {
        self.current_owner = None;
        self.owner_priority = AudioPriority::None;
    }

    /// Snapshot for inspection
    pub fn snapshot(&self) -> FocusSnapshot {
        FocusSnapshot {
            owner: self.current_owner.clone(),
            priority: self.owner_priority,
            hovered: self.hovered.clone(),
            manually_started: self.manually_started.iter().cloned().collect(),
            global_mute: self.global_mute,
        }
    }
}

/// Point-in-time copy of the focus state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusSnapshot {
    /// Current audio owner
    pub owner: Option<ItemId>,
    /// Owner priority
    pub priority: AudioPriority,
    /// Hovered item
    pub hovered: Option<ItemId>,
    /// Manually started items, in start order
    pub manually_started: Vec<ItemId>,
    /// Global mute
    pub global_mute: bool,
}
