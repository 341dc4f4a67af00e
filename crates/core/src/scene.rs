//! Scene graph descriptors produced by the router and applied by the host.

use crate::AnchorId;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a node created through a [`SceneMutation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Where a new node is attached in the host scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeParent {
    /// The scene's root node (world space).
    Root,
    /// The node the host created for an anchor (anchor-local space).
    Anchor(AnchorId),
}

/// Geometry attached to a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Geometry {
    /// Flat rectangle in the node's local XY plane.
    Plane {
        /// Extent along local X.
        width: f32,
        /// Extent along local Y.
        height: f32,
    },
    /// Axis-aligned box centered on the node origin.
    Box {
        /// Extent along local X.
        width: f32,
        /// Extent along local Y.
        height: f32,
        /// Extent along local Z.
        length: f32,
    },
}

impl Geometry {
    /// Box with equal sides.
    pub fn cube(side: f32) -> Self {
        Self::Box {
            width: side,
            height: side,
            length: side,
        }
    }
}

/// Linear RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    /// Opaque light gray (2/3 white).
    pub const LIGHT_GRAY: Self = Self([2.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0, 1.0]);
    /// Opaque red.
    pub const RED: Self = Self([1.0, 0.0, 0.0, 1.0]);
}

/// Decoded image asset referenced by a material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureRef {
    /// Asset name the texture was loaded from.
    pub asset: String,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
}

/// What the diffuse channel of a material shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffuseContents {
    /// Flat colour.
    Color(Rgba),
    /// Image texture.
    Texture(TextureRef),
}

/// How the renderer sorts transparent surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransparencyMode {
    /// Alpha taken from the content's alpha channel, depth written normally.
    AOne,
    /// Single transparent layer: back faces culled before blending.
    SingleLayer,
}

/// Surface appearance for one face (or all faces) of a geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Diffuse contents.
    pub diffuse: DiffuseContents,
    /// Opacity in `0.0..=1.0` (1.0 is fully opaque).
    pub transparency: f32,
    /// Transparency blending mode.
    pub transparency_mode: TransparencyMode,
    /// Ambient channel follows diffuse.
    pub locks_ambient_with_diffuse: bool,
}

impl Material {
    /// Opacity used for the textured placement cubes.
    pub const CUBE_OPACITY: f32 = 0.6;

    /// Opaque flat-colour material.
    pub fn color(color: Rgba) -> Self {
        Self {
            diffuse: DiffuseContents::Color(color),
            transparency: 1.0,
            transparency_mode: TransparencyMode::AOne,
            locks_ambient_with_diffuse: false,
        }
    }

    /// Semi-transparent textured material used on placed cubes.
    pub fn translucent_texture(texture: TextureRef) -> Self {
        Self {
            diffuse: DiffuseContents::Texture(texture),
            transparency: Self::CUBE_OPACITY,
            transparency_mode: TransparencyMode::SingleLayer,
            locks_ambient_with_diffuse: true,
        }
    }
}

/// The three logo materials used to skin placed cubes.
///
/// Loaded once at startup; a missing asset never gets this far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubeMaterials {
    logo_a: Material,
    logo_b: Material,
    fsharp_logo: Material,
}

impl CubeMaterials {
    /// Bundle the three materials.
    pub fn new(logo_a: Material, logo_b: Material, fsharp_logo: Material) -> Self {
        Self {
            logo_a,
            logo_b,
            fsharp_logo,
        }
    }

    /// Per-face material list in the fixed order `[A, B, A, B, C, C]`.
    pub fn face_cycle(&self) -> Vec<Material> {
        vec![
            self.logo_a.clone(),
            self.logo_b.clone(),
            self.logo_a.clone(),
            self.logo_b.clone(),
            self.fsharp_logo.clone(),
            self.fsharp_logo.clone(),
        ]
    }
}

/// A node to be inserted into the host scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    /// Identity allocated by the router.
    pub id: NodeId,
    /// Position relative to the parent.
    pub position: Vec3,
    /// Orientation relative to the parent.
    pub rotation: Quat,
    /// Attached geometry.
    pub geometry: Geometry,
    /// Materials, one per geometry element (cycled by the renderer if shorter).
    pub materials: Vec<Material>,
}

/// A change to the host scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SceneMutation {
    /// Attach `node` under `parent`.
    AddNode {
        /// Parent to attach to.
        parent: NodeParent,
        /// The node itself.
        node: SceneNode,
    },
}

impl SceneMutation {
    /// The node this mutation inserts.
    pub fn node(&self) -> &SceneNode {
        match self {
            SceneMutation::AddNode { node, .. } => node,
        }
    }

    /// The parent the node is attached to.
    pub fn parent(&self) -> NodeParent {
        match self {
            SceneMutation::AddNode { parent, .. } => *parent,
        }
    }
}
