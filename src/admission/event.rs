//! Admission events

use crate::registry::ItemId;

/// Events emitted by the visibility controller
///
/// Forwarded to the audio focus arbiter by the coordinator; `Admitted`
/// corresponds to an ambient play, `Evicted`/`Deactivated` to a pause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionEvent {
    /// Item started playing and took a play slot
    Admitted(ItemId),
    /// Item was paused to make room for a newer one
    Evicted(ItemId),
    /// Item left the viewport and was paused
    Deactivated(ItemId),
    /// A play attempt was rejected
    PlayRejected { id: ItemId, attempt: u32 },
    /// Both attempts failed; waiting for the next visibility transition
    Abandoned(ItemId),
}

impl AdmissionEvent {
    /// Item the event refers to
    pub fn id(&self) -> &ItemId {
        match self {
            AdmissionEvent::Admitted(id)
            | AdmissionEvent::Evicted(id)
            | AdmissionEvent::Deactivated(id)
            | AdmissionEvent::Abandoned(id) => id,
            AdmissionEvent::PlayRejected { id, .. } => id,
        }
    }
}

/// Committed visibility transition for one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityChange {
    /// Item
    pub id: ItemId,
    /// New visibility
    pub is_visible: bool,
}
