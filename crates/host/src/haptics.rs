//! Haptic feedback host.

use tracing::debug;

/// Fire-and-forget haptic feedback.
pub trait Haptics {
    /// Trigger a short vibration. Never blocks and never fails.
    fn vibrate(&mut self);
}

/// Haptics stand-in that only counts requests.
#[derive(Debug, Default)]
pub struct RecordingHaptics {
    vibrations: usize,
}

impl RecordingHaptics {
    /// Create a recorder with no vibrations.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many vibrations were requested.
    pub fn vibrations(&self) -> usize {
        self.vibrations
    }
}

impl Haptics for RecordingHaptics {
    fn vibrate(&mut self) {
        self.vibrations += 1;
        debug!(total = self.vibrations, "Vibrate");
    }
}
