//! The anchor event router.

use crate::lifecycle::{ImageAnchorPhase, ImageAnchorTable};
use arplace_core::{
    Anchor, AnchorId, AnchorKind, AnchorRemoval, CubeMaterials, Geometry, HapticCommand,
    HitTestResult, ImageDetectionEvent, ImagePlacement, LogRecord, Material, NodeId, NodeParent,
    PlaneExtent, Rgba, SceneMutation, SceneNode,
};
use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Side of the red marker box placed at a plane anchor's origin.
pub const PLANE_MARKER_SIDE: f32 = 0.18;
/// Side of the textured cube placed on touch or image detection.
pub const PLACED_CUBE_SIDE: f32 = 0.25;

/// Failures surfaced by the router.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterError {
    /// The anchor is not awaiting placement: never detected, already consumed,
    /// or removed by the host.
    #[error("image anchor {0} not found")]
    AnchorNotFound(AnchorId),
    /// A detection event was built from a non-image anchor.
    #[error("{0} is not an image anchor")]
    NotAnImageAnchor(AnchorId),
}

/// Result of [`AnchorEventRouter::on_anchor_added`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorAdded {
    /// Scene changes to apply, in order.
    pub mutations: Vec<SceneMutation>,
    /// Detection to hand to the placement step, for image anchors.
    pub detection: Option<ImageDetectionEvent>,
}

/// Maps anchor lifecycle and touch events to scene mutations.
#[derive(Debug)]
pub struct AnchorEventRouter {
    cube_materials: CubeMaterials,
    image_anchors: ImageAnchorTable,
    next_node: u64,
}

impl AnchorEventRouter {
    /// Create a router that skins placed cubes with `cube_materials`.
    pub fn new(cube_materials: CubeMaterials) -> Self {
        Self {
            cube_materials,
            image_anchors: ImageAnchorTable::default(),
            next_node: 1,
        }
    }

    /// React to the host adding an anchor.
    ///
    /// Plane anchors get a horizontal surface plus a marker box under the
    /// anchor node. Image anchors produce one detection event and nothing in
    /// the scene. Anything else is ignored.
    pub fn on_anchor_added(&mut self, anchor: &Anchor, timestamp: Duration) -> AnchorAdded {
        match &anchor.kind {
            AnchorKind::Plane { extent } => {
                info!(anchor = %anchor.id, width = extent.x, depth = extent.z, "Plane detected");
                AnchorAdded {
                    mutations: self.plane_mutations(anchor.id, *extent),
                    detection: None,
                }
            }
            AnchorKind::Image { reference } => {
                if !self.image_anchors.mark_detected(anchor.id) {
                    warn!(
                        anchor = %anchor.id,
                        phase = ?self.image_anchors.phase(anchor.id),
                        "Ignoring repeated add for image anchor"
                    );
                    return AnchorAdded::default();
                }
                info!(anchor = %anchor.id, image = %reference.name, "Reference image detected");
                AnchorAdded {
                    mutations: Vec::new(),
                    detection: Some(ImageDetectionEvent {
                        anchor: anchor.clone(),
                        timestamp,
                    }),
                }
            }
            AnchorKind::Unknown => {
                debug!(anchor = %anchor.id, "Ignoring anchor of unknown kind");
                AnchorAdded::default()
            }
        }
    }

    /// React to the host refining an anchor. Only plane anchors report.
    pub fn on_anchor_updated(&self, anchor: &Anchor) -> Option<LogRecord> {
        let extent = anchor.plane_extent()?;
        let record = LogRecord {
            anchor: anchor.id,
            extent,
        };
        info!(anchor = %anchor.id, x = extent.x, y = extent.y, z = extent.z, "{record}");
        Some(record)
    }

    /// React to the host dropping an anchor.
    pub fn on_anchor_removed(&mut self, id: AnchorId) {
        if self.image_anchors.forget(id) == ImageAnchorPhase::Detected {
            warn!(anchor = %id, "Image anchor removed before placement");
        }
    }

    /// Place a cube for a detected image and retire its anchor.
    ///
    /// Succeeds at most once per anchor identity. A repeated delivery gets
    /// [`RouterError::AnchorNotFound`] instead of a second cube.
    pub fn on_image_detected(
        &mut self,
        event: &ImageDetectionEvent,
    ) -> Result<ImagePlacement, RouterError> {
        let anchor = &event.anchor;
        if !anchor.is_image() {
            return Err(RouterError::NotAnImageAnchor(anchor.id));
        }
        if !self.image_anchors.mark_consumed(anchor.id) {
            return Err(RouterError::AnchorNotFound(anchor.id));
        }

        let position = anchor.translation();
        info!(anchor = %anchor.id, ?position, "Placing cube on detected image");
        Ok(ImagePlacement {
            haptic: HapticCommand::Vibrate,
            mutation: self.cube_at(position),
            removal: AnchorRemoval { anchor: anchor.id },
        })
    }

    /// Place a cube where a touch hit a plane, if it hit one.
    pub fn on_touch(&mut self, hit: &HitTestResult) -> Option<SceneMutation> {
        let Some(position) = hit.position else {
            debug!("Touch hit no plane");
            return None;
        };
        info!(?position, anchor = ?hit.anchor, "Placing cube at touch");
        Some(self.cube_at(position))
    }

    /// Lifecycle phase of an image anchor.
    pub fn image_phase(&self, id: AnchorId) -> ImageAnchorPhase {
        self.image_anchors.phase(id)
    }

    /// Drop all image-anchor history. Called when the session restarts with
    /// its previous anchors removed.
    pub fn reset_image_anchors(&mut self) {
        debug!(pending = self.image_anchors.pending(), "Resetting image anchor lifecycle");
        self.image_anchors.clear();
    }

    /// Number of image anchors detected but not yet consumed.
    pub fn pending_detections(&self) -> usize {
        self.image_anchors.pending()
    }

    fn plane_mutations(&mut self, anchor: AnchorId, extent: PlaneExtent) -> Vec<SceneMutation> {
        // Offset by the extent, not centered on the anchor origin.
        let surface = SceneNode {
            id: self.allocate_node(),
            position: Vec3::new(extent.width(), 0.0, extent.depth()),
            rotation: Quat::from_rotation_x(FRAC_PI_2),
            geometry: Geometry::Plane {
                width: extent.width(),
                height: extent.depth(),
            },
            materials: vec![Material::color(Rgba::LIGHT_GRAY)],
        };
        let marker = SceneNode {
            id: self.allocate_node(),
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            geometry: Geometry::cube(PLANE_MARKER_SIDE),
            materials: vec![Material::color(Rgba::RED)],
        };
        let parent = NodeParent::Anchor(anchor);
        vec![
            SceneMutation::AddNode {
                parent,
                node: surface,
            },
            SceneMutation::AddNode {
                parent,
                node: marker,
            },
        ]
    }

    fn cube_at(&mut self, position: Vec3) -> SceneMutation {
        SceneMutation::AddNode {
            parent: NodeParent::Root,
            node: SceneNode {
                id: self.allocate_node(),
                position,
                rotation: Quat::IDENTITY,
                geometry: Geometry::cube(PLACED_CUBE_SIDE),
                materials: self.cube_materials.face_cycle(),
            },
        }
    }

    fn allocate_node(&mut self) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        id
    }
}
