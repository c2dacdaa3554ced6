//! Visibility and admission controller
//!
//! Sole writer of entry lifecycle, `is_visible` and the active-playback set.

use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, Mutex};

use crate::player::MediaPlayer;
use crate::registry::{ElementHandle, ItemId, SharedRegistry};

use super::config::AdmissionConfig;
use super::event::{AdmissionEvent, VisibilityChange};
use super::observer::{IntersectionRecord, ObserverOptions, ViewportObserver};
use super::state::AdmissionState;

/// First attempt plus one retry
const MAX_PLAY_ATTEMPTS: u32 = 2;

/// Capacity of the admission event channel
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Bounded, visibility-driven playback scheduler
///
/// Play attempts run in spawned tasks, so methods that may start playback take
/// `self: &Arc<Self>`. A tokio runtime must be running.
pub struct VisibilityController {
    /// Shared item registry
    registry: SharedRegistry,

    /// Active-playback set. Always locked before the registry.
    admission: Mutex<AdmissionState>,

    /// Platform intersection observer
    observer: Arc<dyn ViewportObserver>,

    /// Configuration
    config: AdmissionConfig,

    /// Admission event sink
    event_tx: mpsc::Sender<AdmissionEvent>,
}

impl VisibilityController {
    /// Create a new controller
    ///
    /// Returns the controller and a receiver for admission events.
    pub fn new(
        registry: SharedRegistry,
        observer: Arc<dyn ViewportObserver>,
        config: AdmissionConfig,
    ) -> (Arc<Self>, mpsc::Receiver<AdmissionEvent>) {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let controller = Self {
            registry,
            admission: Mutex::new(AdmissionState::new(config.max_concurrent)),
            observer,
            config,
            event_tx: tx,
        };

        (Arc::new(controller), rx)
    }

    /// Get the controller configuration
    pub fn config(&self) -> &AdmissionConfig {
        &self.config
    }

    /// Options handed to the viewport observer
    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions {
            threshold: self.config.threshold,
            root_margin: self.config.root_margin.clone(),
        }
    }

    /// Register an item and start observing its element
    ///
    /// No-op if the id is already registered.
    pub async fn observe(&self, element: ElementHandle, id: ItemId) -> bool {
        {
            let mut registry = self.registry.write().await;
            if let Err(e) = registry.insert(id.clone(), element) {
                tracing::debug!(item = %id, error = %e, "Observe ignored");
                return false;
            }
        }

        self.observer.observe(element, &self.observer_options());
        tracing::debug!(item = %id, element = %element, "Item observed");
        true
    }

    /// Attach a player to an observed item
    ///
    /// A new player for a visible item starts playing right away (when
    /// autoplay is on), whether the item became visible before any player
    /// existed or an earlier player is being replaced. A replaced player is
    /// destroyed and its play slot released. Registering the attached player
    /// again changes nothing.
    pub async fn register_player(self: &Arc<Self>, id: &ItemId, player: Arc<dyn MediaPlayer>) -> bool {
        let (replaced, deactivated, play_epoch) = {
            let mut admission = self.admission.lock().await;
            let mut registry = self.registry.write().await;

            let Some(entry) = registry.get_mut(id) else {
                tracing::debug!(item = %id, "Player registration ignored: item not observed");
                return false;
            };

            if entry.holds_player(&player) {
                tracing::trace!(item = %id, "Player already registered");
                return true;
            }

            let replaced = entry.player.replace(Arc::clone(&player));
            entry.is_unloaded = false;
            entry.pending_visibility_play = false;
            let epoch = entry.bump_epoch();
            let play = entry.is_visible && self.config.auto_play;

            let deactivated = replaced.is_some() && admission.remove(id);

            (replaced, deactivated, play.then_some(epoch))
        };

        if let Some(old) = replaced {
            tracing::debug!(item = %id, "Replacing player");
            old.destroy();
        }
        if deactivated {
            self.emit(AdmissionEvent::Deactivated(id.clone()));
        }

        tracing::debug!(item = %id, play = play_epoch.is_some(), "Player registered");

        if let Some(epoch) = play_epoch {
            self.schedule_play(id.clone(), player, epoch);
        }
        true
    }

    /// Stop observing an item and destroy its player
    pub async fn unobserve(&self, id: &ItemId) -> bool {
        let removed = {
            let mut admission = self.admission.lock().await;
            let mut registry = self.registry.write().await;
            admission.remove(id);
            registry.remove(id)
        };

        let Some(entry) = removed else {
            return false;
        };

        self.observer.unobserve(entry.element);
        if let Some(player) = entry.player {
            player.destroy();
        }

        tracing::debug!(item = %id, "Item unobserved");
        true
    }

    /// Destroy an item's player but keep observing its element
    pub async fn unload_player(&self, id: &ItemId) -> bool {
        let player = {
            let mut admission = self.admission.lock().await;
            let mut registry = self.registry.write().await;

            let Some(entry) = registry.get_mut(id) else {
                return false;
            };
            let Some(player) = entry.player.take() else {
                return false;
            };
            entry.is_unloaded = true;
            entry.pending_visibility_play = false;
            entry.bump_epoch();
            admission.remove(id);
            player
        };

        player.destroy();
        tracing::debug!(item = %id, "Player unloaded");
        true
    }

    /// Apply a batch of intersection observations
    ///
    /// Visibility and admission changes are committed before this returns.
    /// The returned transitions are meant for the audio focus arbiter.
    pub async fn handle_intersections(
        self: &Arc<Self>,
        records: &[IntersectionRecord],
    ) -> Vec<VisibilityChange> {
        let mut changes = Vec::new();
        let mut events = Vec::new();
        let mut plays = Vec::new();

        {
            let mut admission = self.admission.lock().await;
            let mut registry = self.registry.write().await;

            for record in records {
                let Some(id) = registry.id_for_element(record.element) else {
                    tracing::trace!(element = %record.element, "Intersection for unknown element");
                    continue;
                };
                let Some(entry) = registry.get_mut(&id) else {
                    continue;
                };

                let visible = record.is_visible(self.config.threshold);
                if entry.is_visible == visible {
                    continue;
                }

                entry.is_visible = visible;
                let epoch = entry.bump_epoch();
                let player = entry.player();

                if visible {
                    match player {
                        Some(player) => {
                            if admission.is_full() && !admission.contains(&id) {
                                if let Some(oldest) = admission.evict_oldest() {
                                    if let Some(p) = registry.player(&oldest) {
                                        p.pause();
                                    }
                                    tracing::debug!(evicted = %oldest, admitting = %id, "Evicting oldest active item");
                                    events.push(AdmissionEvent::Evicted(oldest));
                                }
                            }
                            if self.config.auto_play {
                                plays.push((id.clone(), player, epoch));
                            }
                        }
                        None => entry.pending_visibility_play = true,
                    }
                } else {
                    entry.pending_visibility_play = false;
                    if admission.remove(&id) {
                        if let Some(player) = player {
                            player.pause();
                        }
                        events.push(AdmissionEvent::Deactivated(id.clone()));
                    }
                }

                tracing::trace!(item = %id, visible = visible, ratio = record.intersection_ratio, "Visibility changed");
                changes.push(VisibilityChange {
                    id,
                    is_visible: visible,
                });
            }
        }

        for event in events {
            self.emit(event);
        }
        for (id, player, epoch) in plays {
            self.schedule_play(id, player, epoch);
        }

        changes
    }

    /// Check if an item is visible
    pub async fn is_visible(&self, id: &ItemId) -> bool {
        self.registry.read().await.is_visible(id)
    }

    /// Check if an item holds a play slot
    pub async fn is_active(&self, id: &ItemId) -> bool {
        self.admission.lock().await.contains(id)
    }

    /// Admitted items, oldest first
    pub async fn active_ids(&self) -> Vec<ItemId> {
        self.admission.lock().await.ids()
    }

    fn schedule_play(self: &Arc<Self>, id: ItemId, player: Arc<dyn MediaPlayer>, epoch: u64) {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            controller.run_play_attempts(id, player, epoch).await;
        });
    }

    async fn run_play_attempts(&self, id: ItemId, player: Arc<dyn MediaPlayer>, epoch: u64) {
        // Avoid racing metadata load
        if player.state().duration.is_none() {
            tokio::time::sleep(self.config.play_defer_delay).await;
        }

        for attempt in 1..=MAX_PLAY_ATTEMPTS {
            if !self.is_current(&id, &player, epoch).await {
                tracing::trace!(item = %id, attempt = attempt, "Dropping stale play attempt");
                return;
            }

            match player.play().await {
                Ok(()) => {
                    self.admit(&id, &player).await;
                    return;
                }
                Err(e) => {
                    tracing::warn!(item = %id, attempt = attempt, error = %e, "Play rejected");
                    self.emit(AdmissionEvent::PlayRejected {
                        id: id.clone(),
                        attempt,
                    });
                    if attempt < MAX_PLAY_ATTEMPTS {
                        tokio::time::sleep(self.config.play_retry_delay).await;
                    }
                }
            }
        }

        tracing::debug!(item = %id, "Play abandoned until next visibility change");
        self.emit(AdmissionEvent::Abandoned(id));
    }

    async fn is_current(&self, id: &ItemId, player: &Arc<dyn MediaPlayer>, epoch: u64) -> bool {
        let registry = self.registry.read().await;
        registry
            .get(id)
            .map(|e| e.is_visible && e.epoch == epoch && e.holds_player(player))
            .unwrap_or(false)
    }

    /// Give a successfully started item a play slot
    ///
    /// `play()` may resolve after newer transitions. An attempt overtaken by
    /// a later show of the same player still admits (or finds it admitted);
    /// only a hidden, removed or replaced item is paused again.
    async fn admit(&self, id: &ItemId, player: &Arc<dyn MediaPlayer>) {
        let mut events = Vec::new();

        {
            let mut admission = self.admission.lock().await;
            let registry = self.registry.read().await;

            let current = registry
                .get(id)
                .map(|e| e.is_visible && e.holds_player(player))
                .unwrap_or(false);
            if !current {
                // Left the viewport (or was replaced) while play() was pending
                player.pause();
                return;
            }

            if admission.contains(id) {
                return;
            }

            // Several attempts may resolve out of order; keep the bound here too
            while admission.is_full() {
                let Some(oldest) = admission.evict_oldest() else {
                    break;
                };
                if let Some(p) = registry.player(&oldest) {
                    p.pause();
                }
                tracing::debug!(evicted = %oldest, admitting = %id, "Evicting oldest active item");
                events.push(AdmissionEvent::Evicted(oldest));
            }

            admission.admit(id.clone());
            tracing::debug!(item = %id, active = admission.len(), "Item admitted");
            events.push(AdmissionEvent::Admitted(id.clone()));
        }

        for event in events {
            self.emit(event);
        }
    }

    fn emit(&self, event: AdmissionEvent) {
        match self.event_tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                tracing::warn!(item = %event.id(), "Admission event dropped: channel full");
            }
            Err(TrySendError::Closed(_)) => {}
        }
    }
}
