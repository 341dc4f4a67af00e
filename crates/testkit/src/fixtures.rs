//! Builders for anchors and materials used across test suites.

use arplace_core::{
    Anchor, AnchorId, CubeMaterials, DiffuseContents, Material, PlaneExtent, ReferenceImageInfo,
    SceneMutation, TextureRef,
};
use glam::{Mat4, Vec3};

/// Asset names used by [`test_cube_materials`], in constructor order.
pub const TEST_CUBE_ASSETS: [&str; 3] = ["logo_a.png", "logo_b.png", "fsharp.png"];

/// Cube materials backed by fake 16x16 textures.
pub fn test_cube_materials() -> CubeMaterials {
    let [a, b, c] = TEST_CUBE_ASSETS.map(|name| {
        Material::translucent_texture(TextureRef {
            asset: name.to_string(),
            width: 16,
            height: 16,
        })
    });
    CubeMaterials::new(a, b, c)
}

/// Plane anchor at the world origin with extent `(x, y, z)`.
pub fn plane_anchor(id: u64, extent: (f32, f32, f32)) -> Anchor {
    plane_anchor_at(id, Mat4::IDENTITY, extent)
}

/// Plane anchor with an explicit transform.
pub fn plane_anchor_at(id: u64, transform: Mat4, extent: (f32, f32, f32)) -> Anchor {
    Anchor::plane(
        AnchorId(id),
        transform,
        PlaneExtent::new(extent.0, extent.1, extent.2),
    )
}

/// Image anchor for the 7 cm "marker_image" at `translation`.
pub fn image_anchor(id: u64, translation: Vec3) -> Anchor {
    Anchor::image(
        AnchorId(id),
        Mat4::from_translation(translation),
        ReferenceImageInfo {
            name: "marker_image".to_string(),
            physical_width: 0.07,
            physical_height: 0.07,
        },
    )
}

/// Anchor of a kind the router does not handle.
pub fn unknown_anchor(id: u64) -> Anchor {
    Anchor::unknown(AnchorId(id), Mat4::IDENTITY)
}

/// Texture asset names of a mutation's materials, in order.
///
/// Flat-colour materials show up as `"<color>"`.
pub fn material_assets(mutation: &SceneMutation) -> Vec<String> {
    mutation
        .node()
        .materials
        .iter()
        .map(|m| match &m.diffuse {
            DiffuseContents::Texture(t) => t.asset.clone(),
            DiffuseContents::Color(_) => "<color>".to_string(),
        })
        .collect()
}
