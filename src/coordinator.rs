//! Feed coordinator
//!
//! Routes UI events into the visibility controller and the audio focus
//! arbiter. For any event that touches both, the controller's registry and
//! active-set changes are committed before the arbiter recomputes, so focus
//! decisions never read one-tick-stale visibility.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::admission::{
    AdmissionConfig, AdmissionEvent, IntersectionRecord, VisibilityChange, VisibilityController,
    ViewportObserver,
};
use crate::focus::{AudioFocusArbiter, AudioPriority, FocusConfig, FocusSnapshot};
use crate::player::MediaPlayer;
use crate::registry::{ElementHandle, ItemId, MediaRegistry, SharedRegistry};

/// Combined configuration
#[derive(Debug, Clone, Default)]
pub struct FeedConfig {
    /// Visibility and admission settings
    pub admission: AdmissionConfig,
    /// Audio focus settings
    pub focus: FocusConfig,
}

impl FeedConfig {
    /// Set the admission configuration
    pub fn admission(mut self, admission: AdmissionConfig) -> Self {
        self.admission = admission;
        self
    }

    /// Set the focus configuration
    pub fn focus(mut self, focus: FocusConfig) -> Self {
        self.focus = focus;
        self
    }
}

/// Entry point for feed integration code
pub struct FeedCoordinator {
    registry: SharedRegistry,
    controller: Arc<VisibilityController>,
    arbiter: AudioFocusArbiter,
}

impl FeedCoordinator {
    /// Create a coordinator over a fresh registry
    ///
    /// Returns the coordinator and the controller's admission events. Pass
    /// them to [`spawn_event_pump`](Self::spawn_event_pump) or feed them to
    /// [`handle_admission_event`](Self::handle_admission_event) yourself.
    pub fn new(
        config: FeedConfig,
        observer: Arc<dyn ViewportObserver>,
    ) -> (Self, mpsc::Receiver<AdmissionEvent>) {
        let registry = MediaRegistry::shared();
        let (controller, events) =
            VisibilityController::new(Arc::clone(&registry), observer, config.admission);
        let arbiter = AudioFocusArbiter::with_config(Arc::clone(&registry), config.focus);

        let coordinator = Self {
            registry,
            controller,
            arbiter,
        };

        (coordinator, events)
    }

    /// Shared registry
    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    /// Visibility controller
    pub fn controller(&self) -> &Arc<VisibilityController> {
        &self.controller
    }

    /// Audio focus arbiter
    pub fn arbiter(&self) -> &AudioFocusArbiter {
        &self.arbiter
    }

    /// Start observing an item
    pub async fn observe(&self, element: ElementHandle, id: ItemId) -> bool {
        self.controller.observe(element, id).await
    }

    /// Attach a player to an observed item
    pub async fn register_player(&self, id: &ItemId, player: Arc<dyn MediaPlayer>) -> bool {
        self.controller.register_player(id, player).await
    }

    /// Tear an item down and release anything the arbiter held for it
    pub async fn unobserve(&self, id: &ItemId) -> bool {
        let removed = self.controller.unobserve(id).await;
        self.arbiter.forget(id).await;
        removed
    }

    /// Destroy an item's player, keep observing it
    pub async fn unload_player(&self, id: &ItemId) -> bool {
        let unloaded = self.controller.unload_player(id).await;
        if unloaded {
            self.arbiter.forget(id).await;
        }
        unloaded
    }

    /// Apply an intersection batch, then let the arbiter react
    pub async fn handle_intersections(&self, records: &[IntersectionRecord]) -> Vec<VisibilityChange> {
        let changes = self.controller.handle_intersections(records).await;
        for change in &changes {
            self.arbiter
                .on_visibility_change(&change.id, change.is_visible)
                .await;
        }
        changes
    }

    /// Forward one admission event to the arbiter
    pub async fn handle_admission_event(&self, event: &AdmissionEvent) {
        match event {
            AdmissionEvent::Admitted(id) => self.arbiter.on_video_play(id, false).await,
            AdmissionEvent::Evicted(id) | AdmissionEvent::Deactivated(id) => {
                self.arbiter.on_video_pause(id).await
            }
            AdmissionEvent::PlayRejected { .. } | AdmissionEvent::Abandoned(_) => {}
        }
    }

    /// Spawn a task forwarding admission events to the arbiter
    ///
    /// The task ends when the controller is dropped.
    pub fn spawn_event_pump(
        self: &Arc<Self>,
        mut events: mpsc::Receiver<AdmissionEvent>,
    ) -> tokio::task::JoinHandle<()> {
        let coordinator = Arc::clone(self);
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                coordinator.handle_admission_event(&event).await;
            }
            tracing::debug!("Admission event pump stopped");
        })
    }

    /// See [`AudioFocusArbiter::request_audio_focus`]
    pub async fn request_audio_focus(&self, id: &ItemId, priority: AudioPriority) -> bool {
        self.arbiter.request_audio_focus(id, priority).await
    }

    /// See [`AudioFocusArbiter::release_audio_focus`]
    pub async fn release_audio_focus(&self, id: &ItemId) -> bool {
        self.arbiter.release_audio_focus(id).await
    }

    /// See [`AudioFocusArbiter::update_audio_focus`]
    pub async fn update_audio_focus(&self) {
        self.arbiter.update_audio_focus().await
    }

    /// A player started playing (user tap or ambient)
    pub async fn on_video_play(&self, id: &ItemId, is_manual: bool) {
        self.arbiter.on_video_play(id, is_manual).await
    }

    /// A player paused
    pub async fn on_video_pause(&self, id: &ItemId) {
        self.arbiter.on_video_pause(id).await
    }

    /// Visibility changed outside an intersection batch
    pub async fn on_visibility_change(&self, id: &ItemId, is_visible: bool) {
        self.arbiter.on_visibility_change(id, is_visible).await
    }

    /// Pointer entered an item
    pub async fn on_hover_enter(&self, id: &ItemId) {
        self.arbiter.on_hover_enter(id).await
    }

    /// Pointer left an item
    pub async fn on_hover_leave(&self, id: &ItemId) {
        self.arbiter.on_hover_leave(id).await
    }

    /// Toggle global mute
    pub async fn set_global_mute_state(&self, muted: bool) {
        self.arbiter.set_global_mute_state(muted).await
    }

    /// Re-apply mute state to all players
    pub async fn apply_mute_state_to_all(&self) {
        self.arbiter.apply_mute_state_to_all().await
    }

    /// Mark an item as manually started
    pub async fn mark_manually_started(&self, id: &ItemId) {
        self.arbiter.mark_manually_started(id).await
    }

    /// Clear the manual-start mark
    pub async fn unmark_manually_started(&self, id: &ItemId) {
        self.arbiter.unmark_manually_started(id).await
    }

    /// Current audio owner
    pub async fn current_audio_owner(&self) -> Option<ItemId> {
        self.arbiter.current_audio_owner().await
    }

    /// Current owner priority
    pub async fn current_priority(&self) -> AudioPriority {
        self.arbiter.current_priority().await
    }

    /// Focus state snapshot
    pub async fn focus_snapshot(&self) -> FocusSnapshot {
        self.arbiter.snapshot().await
    }

    /// Items holding a play slot, oldest first
    pub async fn active_ids(&self) -> Vec<ItemId> {
        self.controller.active_ids().await
    }
}
