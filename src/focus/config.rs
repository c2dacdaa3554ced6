//! Audio focus configuration

use crate::debug::{DebugEvent, DebugLogger};
use crate::player::DeviceClass;

/// Configuration for [`AudioFocusArbiter`](super::AudioFocusArbiter)
#[derive(Clone)]
pub struct FocusConfig {
    /// Device class (selects readiness and mute-toggling rules)
    pub device: DeviceClass,

    /// Initial global mute state. Browsers only allow muted autoplay.
    pub initially_muted: bool,

    /// Forward transitions to `logger`
    pub debug: bool,

    /// Debug logger callback
    pub logger: Option<DebugLogger>,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            device: DeviceClass::Desktop,
            initially_muted: true,
            debug: false,
            logger: None,
        }
    }
}

impl FocusConfig {
    /// Set the device class
    pub fn device(mut self, device: DeviceClass) -> Self {
        self.device = device;
        self
    }

    /// Set the initial global mute state
    pub fn initially_muted(mut self, muted: bool) -> Self {
        self.initially_muted = muted;
        self
    }

    /// Install a debug logger and enable debug output
    pub fn logger(mut self, logger: DebugLogger) -> Self {
        self.logger = Some(logger);
        self.debug = true;
        self
    }

    /// Enable or disable the debug logger
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    pub(crate) fn emit(&self, event: DebugEvent) {
        tracing::trace!(event = event.name(), detail = %event, "Audio focus event");
        if !self.debug {
            return;
        }
        if let Some(ref logger) = self.logger {
            logger(&event);
        }
    }
}

impl std::fmt::Debug for FocusConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusConfig")
            .field("device", &self.device)
            .field("initially_muted", &self.initially_muted)
            .field("debug", &self.debug)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}
