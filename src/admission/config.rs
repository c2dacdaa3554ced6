//! Admission controller configuration

use std::time::Duration;

/// Default fraction of an element that must be in view
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Default maximum number of concurrently playing items
pub const DEFAULT_MAX_CONCURRENT: usize = 3;

/// Configuration for [`VisibilityController`](super::VisibilityController)
#[derive(Debug, Clone, PartialEq)]
pub struct AdmissionConfig {
    /// Minimum intersection ratio for an item to count as visible
    pub threshold: f64,

    /// Root margin handed to the viewport observer (CSS margin syntax)
    pub root_margin: String,

    /// Start playback automatically when an item becomes visible
    pub auto_play: bool,

    /// Maximum number of items holding a play slot
    pub max_concurrent: usize,

    /// Delay before the first play attempt when metadata is not loaded yet
    pub play_defer_delay: Duration,

    /// Delay before the single retry after a rejected play
    pub play_retry_delay: Duration,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            root_margin: "0px".to_string(),
            auto_play: true,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            play_defer_delay: Duration::from_millis(100),
            play_retry_delay: Duration::from_secs(1),
        }
    }
}

impl AdmissionConfig {
    /// Set the visibility threshold (clamped to 0.0..=1.0)
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = if threshold.is_nan() {
            DEFAULT_THRESHOLD
        } else {
            threshold.clamp(0.0, 1.0)
        };
        self
    }

    /// Set the observer root margin
    pub fn root_margin(mut self, margin: impl Into<String>) -> Self {
        self.root_margin = margin.into();
        self
    }

    /// Enable or disable autoplay
    pub fn auto_play(mut self, enabled: bool) -> Self {
        self.auto_play = enabled;
        self
    }

    /// Set the concurrent playback limit (at least 1)
    pub fn max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max.max(1);
        self
    }

    /// Set the deferred first-attempt delay
    pub fn play_defer_delay(mut self, delay: Duration) -> Self {
        self.play_defer_delay = delay;
        self
    }

    /// Set the retry delay
    pub fn play_retry_delay(mut self, delay: Duration) -> Self {
        self.play_retry_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AdmissionConfig::default();

        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.root_margin, "0px");
        assert!(config.auto_play);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
    }

    #[test]
    fn test_builder_clamps() {
        let config = AdmissionConfig::default().threshold(1.7).max_concurrent(0);

        assert_eq!(config.threshold, 1.0);
        assert_eq!(config.max_concurrent, 1);

        let config = AdmissionConfig::default().threshold(f64::NAN);
        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_builder_chaining() {
        let config = AdmissionConfig::default()
            .threshold(0.25)
            .root_margin("100px 0px")
            .auto_play(false)
            .max_concurrent(2)
            .play_defer_delay(Duration::from_millis(50))
            .play_retry_delay(Duration::from_millis(750));

        assert_eq!(config.threshold, 0.25);
        assert_eq!(config.root_margin, "100px 0px");
        assert!(!config.auto_play);
        assert_eq!(config.max_concurrent, 2);
        assert_eq!(config.play_defer_delay, Duration::from_millis(50));
        assert_eq!(config.play_retry_delay, Duration::from_millis(750));
    }
}
