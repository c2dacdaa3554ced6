//! Audio focus arbiter
//!
//! Owns the audio owner slot and applies mute state to every registered player.
//! Reads visibility and players from the shared registry; never writes them.

use tokio::sync::Mutex;

use crate::debug::DebugEvent;
use crate::player::is_ready;
use crate::registry::{ItemId, MediaRegistry, SharedRegistry};

use super::config::FocusConfig;
use super::priority::AudioPriority;
use super::state::{AudioFocusState, FocusSnapshot};

/// Single-owner audio focus arbiter
///
/// All operations are total: unknown ids, missing players and players that
/// are not ready turn into silent no-ops.
pub struct AudioFocusArbiter {
    /// Shared item registry (read-only from here)
    registry: SharedRegistry,

    /// Ownership state. Always locked before the registry.
    state: Mutex<AudioFocusState>,

    /// Configuration
    config: FocusConfig,
}

impl AudioFocusArbiter {
    /// Create an arbiter with default configuration
    pub fn new(registry: SharedRegistry) -> Self {
        Self::with_config(registry, FocusConfig::default())
    }

    /// Create an arbiter with custom configuration
    pub fn with_config(registry: SharedRegistry, config: FocusConfig) -> Self {
        Self {
            registry,
            state: Mutex::new(AudioFocusState::new(config.initially_muted)),
            config,
        }
    }

    /// Get the arbiter configuration
    pub fn config(&self) -> &FocusConfig {
        &self.config
    }

    /// Request audio focus for `id` at `priority`
    ///
    /// Granted only if the item has a ready player and `priority` outranks the
    /// current owner. Returns whether ownership changed.
    pub async fn request_audio_focus(&self, id: &ItemId, priority: AudioPriority) -> bool {
        let mut state = self.state.lock().await;
        let registry = self.registry.read().await;
        self.request_locked(&mut state, &registry, id, priority)
    }

    /// Release audio focus held by `id` and recompute
    ///
    /// No-op if `id` is not the owner.
    pub async fn release_audio_focus(&self, id: &ItemId) -> bool {
        let mut state = self.state.lock().await;
        let registry = self.registry.read().await;
        self.release_locked(&mut state, &registry, id)
    }

    /// Recompute ownership from hover state and the manually started list
    pub async fn update_audio_focus(&self) {
        let mut state = self.state.lock().await;
        let registry = self.registry.read().await;
        self.update_locked(&mut state, &registry);
    }

    /// A player started playing
    ///
    /// Manual starts are recorded and request `Manual` focus. Ambient starts
    /// only trigger a recompute when nobody owns focus.
    pub async fn on_video_play(&self, id: &ItemId, is_manual: bool) {
        let mut state = self.state.lock().await;
        let registry = self.registry.read().await;

        if is_manual {
            state.manually_started.insert(id.clone());
            self.request_locked(&mut state, &registry, id, AudioPriority::Manual);
        } else if state.current_owner.is_none() {
            self.update_locked(&mut state, &registry);
        } else if state.is_owner(id) {
            // Owner resumed after a pause; unmute it again
            self.apply_mute_locked(&mut state, &registry);
        }
    }

    /// A player paused
    ///
    /// A paused owner is muted but keeps ownership, so audio does not jump to
    /// another item. Any other item loses its manual-start mark.
    pub async fn on_video_pause(&self, id: &ItemId) {
        let mut state = self.state.lock().await;
        let registry = self.registry.read().await;

        if state.is_owner(id) {
            if let Some(player) = registry.player(id) {
                player.set_muted(true);
            }
            tracing::debug!(item = %id, "Owner paused, keeping focus");
            self.config.emit(DebugEvent::OwnerPaused { id: id.clone() });
        } else {
            state.manually_started.shift_remove(id);
        }
    }

    /// Visibility of `id` changed
    ///
    /// Must be called after the registry's `is_visible` has been committed.
    pub async fn on_visibility_change(&self, id: &ItemId, is_visible: bool) {
        let mut state = self.state.lock().await;
        let registry = self.registry.read().await;

        if is_visible {
            self.update_locked(&mut state, &registry);
        } else if state.is_owner(id) {
            self.release_locked(&mut state, &registry, id);
        }
    }

    /// Pointer entered `id`
    pub async fn on_hover_enter(&self, id: &ItemId) {
        let mut state = self.state.lock().await;
        let registry = self.registry.read().await;

        state.hovered = Some(id.clone());
        self.config.emit(DebugEvent::Hover {
            id: id.clone(),
            entered: true,
        });
        self.request_locked(&mut state, &registry, id, AudioPriority::Hover);
    }

    /// Pointer left `id`
    pub async fn on_hover_leave(&self, id: &ItemId) {
        let mut state = self.state.lock().await;
        let registry = self.registry.read().await;

        if state.hovered.as_ref() == Some(id) {
            state.hovered = None;
        }
        self.config.emit(DebugEvent::Hover {
            id: id.clone(),
            entered: false,
        });

        if state.is_owner(id) {
            self.release_locked(&mut state, &registry, id);
        } else {
            self.update_locked(&mut state, &registry);
        }
    }

    /// Set global mute and re-apply mute state
    pub async fn set_global_mute_state(&self, muted: bool) {
        let mut state = self.state.lock().await;
        let registry = self.registry.read().await;

        state.global_mute = muted;
        tracing::debug!(muted = muted, "Global mute changed");
        self.config.emit(DebugEvent::GlobalMute { muted });
        self.apply_mute_locked(&mut state, &registry);
    }

    /// Re-apply mute state to every registered player
    pub async fn apply_mute_state_to_all(&self) {
        let mut state = self.state.lock().await;
        let registry = self.registry.read().await;
        self.apply_mute_locked(&mut state, &registry);
    }

    /// Record `id` as manually started
    pub async fn mark_manually_started(&self, id: &ItemId) {
        self.state.lock().await.manually_started.insert(id.clone());
    }

    /// Remove the manual-start mark from `id`
    pub async fn unmark_manually_started(&self, id: &ItemId) {
        self.state.lock().await.manually_started.shift_remove(id);
    }

    /// Drop every reference to `id`
    ///
    /// Called after the item's entry or player was torn down. Releases
    /// ownership if it held it.
    pub async fn forget(&self, id: &ItemId) {
        let mut state = self.state.lock().await;
        let registry = self.registry.read().await;

        state.manually_started.shift_remove(id);
        if state.hovered.as_ref() == Some(id) {
            state.hovered = None;
        }
        self.release_locked(&mut state, &registry, id);
    }

    /// Current audio owner
    pub async fn current_audio_owner(&self) -> Option<ItemId> {
        self.state.lock().await.current_owner.clone()
    }

    /// Priority held by the current owner
    pub async fn current_priority(&self) -> AudioPriority {
        self.state.lock().await.owner_priority
    }

    /// Global mute state
    pub async fn is_global_muted(&self) -> bool {
        self.state.lock().await.global_mute
    }

    /// Currently hovered item
    pub async fn hovered_id(&self) -> Option<ItemId> {
        self.state.lock().await.hovered.clone()
    }

    /// Check if `id` is marked as manually started
    pub async fn is_manually_started(&self, id: &ItemId) -> bool {
        self.state.lock().await.manually_started.contains(id)
    }

    /// Snapshot of the focus state
    pub async fn snapshot(&self) -> FocusSnapshot {
        self.state.lock().await.snapshot()
    }

    fn request_locked(
        &self,
        state: &mut AudioFocusState,
        registry: &MediaRegistry,
        id: &ItemId,
        priority: AudioPriority,
    ) -> bool {
        let Some(player) = registry.player(id) else {
            tracing::debug!(item = %id, "Focus request ignored: no player");
            self.deny(id, priority, "no player");
            return false;
        };

        if !is_ready(player.as_ref(), self.config.device) {
            tracing::debug!(item = %id, priority = ?priority, "Focus request ignored: not playing");
            self.deny(id, priority, "not ready");
            return false;
        }

        if priority <= state.owner_priority {
            self.deny(id, priority, "outranked");
            return false;
        }

        tracing::debug!(
            item = %id,
            priority = ?priority,
            previous = ?state.current_owner,
            "Audio focus granted"
        );
        state.set_owner(id.clone(), priority);
        self.config.emit(DebugEvent::FocusGranted {
            id: id.clone(),
            priority,
        });
        self.apply_mute_locked(state, registry);
        true
    }

    fn release_locked(
        &self,
        state: &mut AudioFocusState,
        registry: &MediaRegistry,
        id: &ItemId,
    ) -> bool {
        if !state.is_owner(id) {
            return false;
        }

        state.clear_owner();
        tracing::debug!(item = %id, "Audio focus released");
        self.config.emit(DebugEvent::FocusReleased { id: id.clone() });
        self.update_locked(state, registry);
        true
    }

    /// Full recompute. Uses the strict `is_playing()` signal on every device.
    fn update_locked(&self, state: &mut AudioFocusState, registry: &MediaRegistry) {
        let eligible = |id: &ItemId| {
            registry
                .get(id)
                .filter(|entry| entry.is_visible)
                .and_then(|entry| entry.player.as_ref())
                .map(|player| player.is_playing())
                .unwrap_or(false)
        };

        let hovered = state.hovered.clone().filter(|id| eligible(id));
        let manual = state
            .manually_started
            .iter()
            .find(|&id| eligible(id))
            .cloned();

        if let Some(id) = hovered {
            state.set_owner(id, AudioPriority::Hover);
        } else if let Some(id) = manual {
            state.set_owner(id, AudioPriority::Manual);
        } else {
            state.clear_owner();
        }

        tracing::debug!(
            owner = ?state.current_owner,
            priority = ?state.owner_priority,
            "Audio focus recomputed"
        );
        self.config.emit(DebugEvent::FocusRecomputed {
            owner: state.current_owner.clone(),
            priority: state.owner_priority,
        });
        self.apply_mute_locked(state, registry);
    }

    fn apply_mute_locked(&self, state: &mut AudioFocusState, registry: &MediaRegistry) {
        if state.global_mute {
            for (_, player) in registry.players() {
                if player.video_element().is_some() {
                    player.set_muted(true);
                }
            }
            return;
        }

        let mobile = self.config.device.is_mobile();

        // play() may resolve after the focus request was dropped; pick up the
        // first visible item whose element is already running.
        if mobile && state.current_owner.is_none() {
            let candidate = registry.iter().find_map(|(id, entry)| {
                if !entry.is_visible {
                    return None;
                }
                entry
                    .player
                    .as_ref()?
                    .video_element()
                    .filter(|el| el.looks_playing())
                    .map(|_| id.clone())
            });

            if let Some(id) = candidate {
                let priority = if state.manually_started.contains(&id) {
                    AudioPriority::Manual
                } else {
                    AudioPriority::Center
                };
                tracing::debug!(item = %id, priority = ?priority, "Mobile auto-grant");
                state.set_owner(id.clone(), priority);
                self.config.emit(DebugEvent::MobileAutoGrant { id, priority });
            }
        }

        for (id, player) in registry.players() {
            // Browsers require muted state until playback has really started
            if !is_ready(player.as_ref(), self.config.device) {
                player.set_muted(true);
                continue;
            }

            let is_owner = state.is_owner(id);
            let muted = player.state().muted;

            if mobile {
                if is_owner && muted {
                    player.set_muted(false);
                } else if !is_owner && !muted {
                    player.set_muted(true);
                }
            } else if muted == is_owner {
                player.set_muted(!is_owner);
            }
        }
    }

    fn deny(&self, id: &ItemId, priority: AudioPriority, reason: &'static str) {
        self.config.emit(DebugEvent::FocusDenied {
            id: id.clone(),
            priority,
            reason,
        });
    }
}
