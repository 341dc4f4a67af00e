//! Read-only anchor snapshots as reported by the AR session host.
//!
//! The host owns the authoritative anchor; everything here is a copy taken at
//! the moment an event was delivered.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier assigned to an anchor by the host session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnchorId(pub u64);

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anchor#{}", self.0)
    }
}

/// Estimated size of a detected plane, in meters.
///
/// `x` is the width and `z` the depth of the plane in anchor-local space.
/// `y` is reported by the host but is always zero for a flat plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaneExtent {
    /// Width along the anchor's local X axis.
    pub x: f32,
    /// Height along the anchor's local Y axis (zero for flat planes).
    pub y: f32,
    /// Depth along the anchor's local Z axis.
    pub z: f32,
}

impl PlaneExtent {
    /// Construct an extent from its three components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Plane width (local X).
    pub fn width(&self) -> f32 {
        self.x
    }

    /// Plane depth (local Z).
    pub fn depth(&self) -> f32 {
        self.z
    }

    /// Returns true if `(x, z)` in anchor-local space lies within the extent.
    ///
    /// The extent is centered on the anchor origin.
    pub fn contains_local(&self, x: f32, z: f32) -> bool {
        x.abs() <= self.x * 0.5 && z.abs() <= self.z * 0.5
    }
}

/// Reference image recognised by the host, as seen from an image anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceImageInfo {
    /// Asset name the image was registered under (e.g. "marker_image").
    pub name: String,
    /// Physical width of the printed image in meters.
    pub physical_width: f32,
    /// Physical height of the printed image in meters.
    pub physical_height: f32,
}

/// Closed set of anchor kinds the router knows how to react to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnchorKind {
    /// A detected flat surface.
    Plane {
        /// Current estimated extent.
        extent: PlaneExtent,
    },
    /// A recognised reference image.
    Image {
        /// The reference image that was matched.
        reference: ReferenceImageInfo,
    },
    /// Any other anchor type the host may report (faces, objects, ...).
    Unknown,
}

/// Snapshot of a host anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Host-assigned identity.
    pub id: AnchorId,
    /// Anchor-to-world transform (rotation + translation).
    pub transform: Mat4,
    /// Kind tag and kind-specific metadata.
    pub kind: AnchorKind,
}

impl Anchor {
    /// Plane anchor with the given transform and extent.
    pub fn plane(id: AnchorId, transform: Mat4, extent: PlaneExtent) -> Self {
        Self {
            id,
            transform,
            kind: AnchorKind::Plane { extent },
        }
    }

    /// Image anchor for the given reference image.
    pub fn image(id: AnchorId, transform: Mat4, reference: ReferenceImageInfo) -> Self {
        Self {
            id,
            transform,
            kind: AnchorKind::Image { reference },
        }
    }

    /// Anchor of a kind the router ignores.
    pub fn unknown(id: AnchorId, transform: Mat4) -> Self {
        Self {
            id,
            transform,
            kind: AnchorKind::Unknown,
        }
    }

    /// World-space translation, i.e. the fourth column of the transform.
    pub fn translation(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }

    /// Plane extent if this is a plane anchor.
    pub fn plane_extent(&self) -> Option<PlaneExtent> {
        match &self.kind {
            AnchorKind::Plane { extent } => Some(*extent),
            _ => None,
        }
    }

    /// Returns true for plane anchors.
    pub fn is_plane(&self) -> bool {
        matches!(self.kind, AnchorKind::Plane { .. })
    }

    /// Returns true for image anchors.
    pub fn is_image(&self) -> bool {
        matches!(self.kind, AnchorKind::Image { .. })
    }
}
