//! AR session interface and its run configuration.

use crate::HostError;
use arplace_assets::ReferenceImage;
use arplace_core::{Anchor, AnchorId, HitTestResult, HostEvent};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which surfaces the session should look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneDetection {
    /// No plane anchors are produced.
    None,
    /// Horizontal surfaces (floors, tables).
    #[default]
    Horizontal,
}

/// Debug overlays drawn by the host view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DebugOptions {
    /// Draw tracked feature points.
    pub show_feature_points: bool,
    /// Draw the world origin axes.
    pub show_world_origin: bool,
}

impl Default for DebugOptions {
    fn default() -> Self {
        Self {
            show_feature_points: true,
            show_world_origin: true,
        }
    }
}

/// World-tracking configuration handed to [`ArSession::run`].
#[derive(Debug, Clone, Default)]
pub struct SessionConfiguration {
    /// Plane detection mode.
    pub plane_detection: PlaneDetection,
    /// Images to detect, with their physical size.
    pub detection_images: Vec<ReferenceImage>,
    /// Debug overlays.
    pub debug: DebugOptions,
}

/// Options for (re)starting a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Drop anchors left over from a previous run.
    pub remove_existing_anchors: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            remove_existing_anchors: true,
        }
    }
}

/// The AR session host.
pub trait ArSession {
    /// Start or restart tracking.
    fn run(&mut self, config: SessionConfiguration, options: RunOptions);

    /// Fold an incoming host event into the session's anchor table.
    ///
    /// Returns false when the event must not reach the router: the session
    /// is stopped, or it never reports this anchor.
    fn observe(&mut self, event: &HostEvent) -> bool;

    /// Current snapshot of a tracked anchor.
    fn anchor(&self, id: AnchorId) -> Option<&Anchor>;

    /// Stop tracking an anchor.
    fn remove_anchor(&mut self, id: AnchorId) -> Result<(), HostError>;

    /// Hit-test a view point against existing planes, in session order.
    fn hit_test(&self, point: Vec2) -> Vec<HitTestResult>;
}
