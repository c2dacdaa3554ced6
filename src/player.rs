//! Media player capability
//!
//! The player itself lives in the UI layer. This module describes only the
//! surface the arbiters consume.

use async_trait::async_trait;

use crate::error::PlaybackError;

/// Snapshot of the underlying media element
///
/// Used by the mobile readiness heuristic, where `play()` resolution races
/// focus requests and `is_playing()` can lag behind the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementSnapshot {
    /// Element `paused` flag
    pub paused: bool,
    /// Element `ended` flag
    pub ended: bool,
    /// Element `readyState` (0 = HAVE_NOTHING .. 4 = HAVE_ENOUGH_DATA)
    pub ready_state: u8,
}

impl ElementSnapshot {
    /// Unpaused, not ended, and has at least metadata
    pub fn looks_playing(&self) -> bool {
        !self.paused && !self.ended && self.ready_state > 0
    }
}

/// Player state as reported by the player
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerState {
    /// Media duration in seconds, once metadata has loaded
    pub duration: Option<f64>,
    /// Whether the player considers itself playing
    pub is_playing: bool,
    /// Current muted flag
    pub muted: bool,
}

/// A media player mounted in the feed
#[async_trait]
pub trait MediaPlayer: Send + Sync {
    /// Start playback. Resolves once playback has genuinely started.
    async fn play(&self) -> Result<(), PlaybackError>;

    /// Pause playback
    fn pause(&self);

    /// Whether the player reports active playback
    fn is_playing(&self) -> bool;

    /// Set the muted flag
    fn set_muted(&self, muted: bool);

    /// The underlying media element, if it is still alive
    fn video_element(&self) -> Option<ElementSnapshot>;

    /// Current player state
    fn state(&self) -> PlayerState;

    /// Tear the player down
    fn destroy(&self);
}

/// Device class used to pick readiness and mute-toggling rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceClass {
    /// Desktop browsers: strict `is_playing()` readiness
    #[default]
    Desktop,
    /// Touch/mobile browsers: relaxed readiness, conservative unmuting
    Mobile,
}

impl DeviceClass {
    const MOBILE_MARKERS: &'static [&'static str] = &[
        "android",
        "iphone",
        "ipad",
        "ipod",
        "mobile",
        "opera mini",
        "iemobile",
        "blackberry",
        "webos",
    ];

    /// Classify a browser user agent string
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        if Self::MOBILE_MARKERS.iter().any(|m| ua.contains(m)) {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    /// Check if this is a mobile device
    pub fn is_mobile(&self) -> bool {
        *self == DeviceClass::Mobile
    }
}

/// Platform-dependent "is this player playing" check.
///
/// On mobile the element heuristic is accepted in addition to `is_playing()`.
pub(crate) fn is_ready(player: &dyn MediaPlayer, device: DeviceClass) -> bool {
    if player.is_playing() {
        return true;
    }
    device.is_mobile()
        && player
            .video_element()
            .map(|el| el.looks_playing())
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakePlayer;

    #[test]
    fn test_user_agent_classification() {
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15";
        let android = "Mozilla/5.0 (Linux; Android 14; Pixel 8) Chrome/120.0 Mobile Safari/537.36";
        let desktop = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/120.0 Safari/537.36";

        assert_eq!(DeviceClass::from_user_agent(iphone), DeviceClass::Mobile);
        assert_eq!(DeviceClass::from_user_agent(android), DeviceClass::Mobile);
        assert_eq!(DeviceClass::from_user_agent(desktop), DeviceClass::Desktop);
        assert_eq!(DeviceClass::default(), DeviceClass::Desktop);
    }

    #[test]
    fn test_element_heuristic() {
        let playing = ElementSnapshot {
            paused: false,
            ended: false,
            ready_state: 1,
        };
        assert!(playing.looks_playing());
        assert!(!ElementSnapshot { ready_state: 0, ..playing }.looks_playing());
        assert!(!ElementSnapshot { ended: true, ..playing }.looks_playing());
        assert!(!ElementSnapshot { paused: true, ..playing }.looks_playing());
    }

    #[test]
    fn test_readiness_by_device() {
        // Element already unpaused but play() not yet resolved
        let player = FakePlayer::new();
        player.set_element_racing();

        assert!(!is_ready(&player, DeviceClass::Desktop));
        assert!(is_ready(&player, DeviceClass::Mobile));

        player.set_playing(true);
        assert!(is_ready(&player, DeviceClass::Desktop));
    }
}
