#![warn(missing_docs)]
//! Core data model shared across the workspace: anchors reported by the AR
//! host, scene nodes and materials, and the commands/events that flow between
//! the router and the host collaborators.

pub mod anchor;
pub mod command;
pub mod event;
pub mod scene;

pub use anchor::{Anchor, AnchorId, AnchorKind, PlaneExtent, ReferenceImageInfo};
pub use command::{
    AnchorRemoval, HapticCommand, HitTestResult, ImageDetectionEvent, ImagePlacement, LogRecord,
    RouterCommand,
};
pub use event::HostEvent;
pub use scene::{
    CubeMaterials, DiffuseContents, Geometry, Material, NodeId, NodeParent, Rgba, SceneMutation,
    SceneNode, TextureRef, TransparencyMode,
};
