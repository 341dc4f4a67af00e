#![warn(missing_docs)]
//! Host-side collaborators for the anchor router.
//!
//! The real AR session, scene graph and haptics engine live in a native
//! runtime. This crate defines the narrow interfaces the router output is
//! applied through, simulated in-memory implementations of them, and the
//! [`SessionDriver`] that feeds host events to the router and applies what
//! comes back, in order.

mod camera;
mod driver;
mod haptics;
mod scene;
mod session;
mod simulated;

pub use camera::ArCamera;
pub use driver::SessionDriver;
pub use haptics::{Haptics, RecordingHaptics};
pub use hit_test::{hit_test_planes, intersect_plane_extent, world_position_from_hit_test, Ray};
pub use scene::{PlacedNode, SceneGraph, SceneHost};
pub use session::{ArSession, DebugOptions, PlaneDetection, RunOptions, SessionConfiguration};
pub use simulated::SimulatedSession;

use arplace_core::{AnchorId, NodeId};
use thiserror::Error;

/// Errors raised by host collaborators when a command cannot be applied.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostError {
    /// The session has no anchor with this identity.
    #[error("session has no {0}")]
    UnknownAnchor(AnchorId),
    /// A node was parented to an anchor the scene has no node for.
    #[error("scene has no node for {0}")]
    UnknownParent(AnchorId),
    /// A node identity was reused.
    #[error("{0} already exists in the scene")]
    DuplicateNode(NodeId),
}
