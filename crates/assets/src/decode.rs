use crate::{AssetError, AssetSource};

/// An image asset decoded to RGBA8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Asset name it was loaded from.
    pub name: String,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// Tightly packed RGBA8 rows.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Height divided by width.
    pub fn aspect(&self) -> f32 {
        self.height as f32 / self.width as f32
    }
}

/// Read `name` from `source` and decode it.
pub fn decode_image(source: &dyn AssetSource, name: &str) -> Result<DecodedImage, AssetError> {
    let bytes = source.read(name)?;
    let image = image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
        name: name.to_string(),
        source,
    })?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(AssetError::Invalid(format!("image '{name}' is empty")));
    }
    tracing::debug!(asset = name, width, height, "Decoded image asset");
    Ok(DecodedImage {
        name: name.to_string(),
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

#[cfg(test)]
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::RgbaImage::from_pixel(width, height, image::Rgba([200, 40, 40, 255]))
        .write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .expect("encode png");
    bytes
}
