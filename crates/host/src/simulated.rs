//! In-memory AR session for headless runs and tests.

use crate::{
    hit_test_planes, ArCamera, ArSession, HostError, PlaneDetection, RunOptions,
    SessionConfiguration,
};
use arplace_core::{Anchor, AnchorId, AnchorKind, HitTestResult, HostEvent, ReferenceImageInfo};
use glam::Vec2;
use tracing::{info, warn};

/// Session whose anchors are fed in from outside instead of tracked.
///
/// Anchors are kept in the order they were first added; hit-test results
/// follow that order.
#[derive(Debug, Default)]
pub struct SimulatedSession {
    camera: ArCamera,
    anchors: Vec<Anchor>,
    config: Option<SessionConfiguration>,
}

impl SimulatedSession {
    /// Create a stopped session viewed through `camera`.
    pub fn new(camera: ArCamera) -> Self {
        Self {
            camera,
            anchors: Vec::new(),
            config: None,
        }
    }

    /// Whether [`ArSession::run`] has been called.
    pub fn is_running(&self) -> bool {
        self.config.is_some()
    }

    /// Active configuration, if running.
    pub fn configuration(&self) -> Option<&SessionConfiguration> {
        self.config.as_ref()
    }

    /// The camera used for hit-testing.
    pub fn camera(&self) -> &ArCamera {
        &self.camera
    }

    /// Tracked anchors, in insertion order.
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Metadata of a configured reference image, by asset name.
    pub fn reference_image(&self, name: &str) -> Option<ReferenceImageInfo> {
        self.config
            .as_ref()?
            .detection_images
            .iter()
            .find(|image| image.image.name == name)
            .map(|image| image.info())
    }

    /// Whether the running configuration would ever report `anchor`.
    pub fn would_detect(&self, anchor: &Anchor) -> bool {
        let Some(config) = &self.config else {
            return false;
        };
        match &anchor.kind {
            AnchorKind::Plane { .. } => {
                config.plane_detection != PlaneDetection::None
            }
            AnchorKind::Image { reference } => config
                .detection_images
                .iter()
                .any(|image| image.image.name == reference.name),
            AnchorKind::Unknown => true,
        }
    }
}

impl ArSession for SimulatedSession {
    fn run(&mut self, config: SessionConfiguration, options: RunOptions) {
        if options.remove_existing_anchors && !self.anchors.is_empty() {
            info!(count = self.anchors.len(), "Removing existing anchors");
            self.anchors.clear();
        }
        info!(
            plane_detection = ?config.plane_detection,
            detection_images = config.detection_images.len(),
            "Session running"
        );
        self.config = Some(config);
    }

    fn observe(&mut self, event: &HostEvent) -> bool {
        if !self.is_running() {
            warn!(event = event.label(), "Session not running; dropping event");
            return false;
        }
        match event {
            HostEvent::AnchorAdded { anchor } | HostEvent::AnchorUpdated { anchor } => {
                if !self.would_detect(anchor) {
                    warn!(anchor = %anchor.id, "Configuration does not detect this anchor");
                    return false;
                }
                match self.anchors.iter_mut().find(|a| a.id == anchor.id) {
                    Some(existing) => *existing = anchor.clone(),
                    None => self.anchors.push(anchor.clone()),
                }
            }
            HostEvent::AnchorRemoved { id } => {
                self.anchors.retain(|a| a.id != *id);
            }
            HostEvent::Touch { .. } => {}
        }
        true
    }

    fn anchor(&self, id: AnchorId) -> Option<&Anchor> {
        self.anchors.iter().find(|a| a.id == id)
    }

    fn remove_anchor(&mut self, id: AnchorId) -> Result<(), HostError> {
        let before = self.anchors.len();
        self.anchors.retain(|a| a.id != id);
        if self.anchors.len() == before {
            return Err(HostError::UnknownAnchor(id));
        }
        Ok(())
    }

    fn hit_test(&self, point: Vec2) -> Vec<HitTestResult> {
        if !self.is_running() {
            return Vec::new();
        }
        let ray = self.camera.screen_ray(point);
        hit_test_planes(&ray, &self.anchors)
    }
}
