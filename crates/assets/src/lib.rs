#![warn(missing_docs)]
//! Startup asset loading: cube material textures and detection reference
//! images. Any failure here is fatal; the caller is expected to abort.

mod decode;
mod materials;
mod reference;
mod source;

pub use decode::{decode_image, DecodedImage};
pub use materials::{load_cube_materials, MaterialAssets};
pub use reference::{load_reference_image, load_reference_images, DetectionImage, ReferenceImage};
pub use source::{AssetSource, DirAssetSource, MemoryAssetSource};

use thiserror::Error;

/// Errors emitted while resolving or decoding assets.
#[derive(Debug, Error)]
pub enum AssetError {
    /// No asset with that name exists in the source.
    #[error("asset '{name}' not found")]
    NotFound {
        /// Requested asset name.
        name: String,
    },
    /// Wrap IO errors when reading an asset.
    #[error("failed to read asset '{name}': {source}")]
    Io {
        /// Requested asset name.
        name: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The bytes could not be decoded as an image.
    #[error("failed to decode image '{name}': {source}")]
    Decode {
        /// Requested asset name.
        name: String,
        /// Underlying error.
        #[source]
        source: image::ImageError,
    },
    /// Configuration describing the assets is inconsistent.
    #[error("invalid asset configuration: {0}")]
    Invalid(String),
}
