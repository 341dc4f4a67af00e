//! Commands the router emits and the notifications it produces.

use crate::{Anchor, AnchorId, PlaneExtent, SceneMutation};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Fire-and-forget request to the haptics host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HapticCommand {
    /// Short default vibration.
    Vibrate,
}

/// Request to remove an anchor from the host session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorRemoval {
    /// Anchor to remove.
    pub anchor: AnchorId,
}

/// Notification that a reference image has been sighted.
///
/// Produced at most once per image anchor identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDetectionEvent {
    /// Snapshot of the image anchor at detection time.
    pub anchor: Anchor,
    /// Session time of the frame in which the anchor was added.
    pub timestamp: Duration,
}

/// Outcome of hit-testing a screen point against the session.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HitTestResult {
    /// World-space position of the hit, if any.
    pub position: Option<Vec3>,
    /// Anchor that was hit, if any.
    pub anchor: Option<AnchorId>,
}

impl HitTestResult {
    /// A touch that hit nothing.
    pub fn miss() -> Self {
        Self::default()
    }

    /// A hit at `position` on `anchor`.
    pub fn hit(position: Vec3, anchor: AnchorId) -> Self {
        Self {
            position: Some(position),
            anchor: Some(anchor),
        }
    }
}

/// Diagnostic produced when a plane anchor's extent is refined.
///
/// No plausibility check is applied to `extent.z`; tiny depths from early
/// plane estimates are reported as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// The plane anchor that changed.
    pub anchor: AnchorId,
    /// Its updated extent.
    pub extent: PlaneExtent,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The (updated) extent of the anchor is [{}, {}, {}]",
            self.extent.x, self.extent.y, self.extent.z
        )
    }
}

/// Everything the host must do in response to one image detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePlacement {
    /// Vibrate first.
    pub haptic: HapticCommand,
    /// Then place the cube.
    pub mutation: SceneMutation,
    /// Finally drop the consumed anchor.
    pub removal: AnchorRemoval,
}

impl ImagePlacement {
    /// Flatten into the ordered command stream.
    pub fn into_commands(self) -> [RouterCommand; 3] {
        [
            RouterCommand::Haptic(self.haptic),
            RouterCommand::Scene(self.mutation),
            RouterCommand::RemoveAnchor(self.removal),
        ]
    }
}

/// A single instruction from the router to one of the host collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "target", content = "command", rename_all = "snake_case")]
pub enum RouterCommand {
    /// For the scene host.
    Scene(SceneMutation),
    /// For the haptics host.
    Haptic(HapticCommand),
    /// For the AR session host.
    RemoveAnchor(AnchorRemoval),
    /// Diagnostic only.
    Log(LogRecord),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_record_formats_extent() {
        let record = LogRecord {
            anchor: AnchorId(3),
            extent: PlaneExtent::new(0.5, 0.0, 0.25),
        };
        assert_eq!(
            record.to_string(),
            "The (updated) extent of the anchor is [0.5, 0, 0.25]"
        );
    }

    #[test]
    fn miss_has_no_position_or_anchor() {
        let miss = HitTestResult::miss();
        assert!(miss.position.is_none());
        assert!(miss.anchor.is_none());
    }
}
