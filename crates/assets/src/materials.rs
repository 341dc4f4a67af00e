use arplace_core::{CubeMaterials, Material, TextureRef};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{decode_image, AssetError, AssetSource};

/// Image assets used to skin placed cubes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MaterialAssets {
    /// First logo (faces 0 and 2).
    pub logo_a: String,
    /// Second logo (faces 1 and 3).
    pub logo_b: String,
    /// Third logo (faces 4 and 5).
    pub fsharp_logo: String,
}

impl Default for MaterialAssets {
    fn default() -> Self {
        Self {
            logo_a: "msft_logo.png".to_string(),
            logo_b: "xamagon.png".to_string(),
            fsharp_logo: "fsharp.png".to_string(),
        }
    }
}

/// Decode the three cube textures and build their materials.
///
/// Each texture is decoded once even when it appears on several faces.
pub fn load_cube_materials(
    source: &dyn AssetSource,
    assets: &MaterialAssets,
) -> Result<CubeMaterials, AssetError> {
    let load = |name: &str| -> Result<Material, AssetError> {
        let image = decode_image(source, name)?;
        Ok(Material::translucent_texture(TextureRef {
            asset: image.name,
            width: image.width,
            height: image.height,
        }))
    };

    let materials = CubeMaterials::new(
        load(&assets.logo_a)?,
        load(&assets.logo_b)?,
        load(&assets.fsharp_logo)?,
    );
    info!(
        logo_a = %assets.logo_a,
        logo_b = %assets.logo_b,
        fsharp_logo = %assets.fsharp_logo,
        "Loaded cube materials"
    );
    Ok(materials)
}
