use arplace_core::ReferenceImageInfo;
use serde::{Deserialize, Serialize};

use crate::{decode_image, AssetError, AssetSource, DecodedImage};

/// Configured image the session should look for.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DetectionImage {
    /// Asset name ("marker_image").
    pub name: String,
    /// Printed width in meters.
    pub physical_width: f32,
}

impl Default for DetectionImage {
    fn default() -> Self {
        Self {
            name: "marker_image".to_string(),
            physical_width: 0.07,
        }
    }
}

/// A decoded reference image plus its physical size, ready for the session.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceImage {
    /// Decoded pixels.
    pub image: DecodedImage,
    /// Printed width in meters.
    pub physical_width: f32,
    /// Printed height in meters, from the pixel aspect ratio.
    pub physical_height: f32,
}

impl ReferenceImage {
    /// The metadata an image anchor carries for this reference.
    pub fn info(&self) -> ReferenceImageInfo {
        ReferenceImageInfo {
            name: self.image.name.clone(),
            physical_width: self.physical_width,
            physical_height: self.physical_height,
        }
    }
}

/// Decode a single detection image.
pub fn load_reference_image(
    source: &dyn AssetSource,
    detection: &DetectionImage,
) -> Result<ReferenceImage, AssetError> {
    if !(detection.physical_width.is_finite() && detection.physical_width > 0.0) {
        return Err(AssetError::Invalid(format!(
            "physical width of '{}' must be positive, got {}",
            detection.name, detection.physical_width
        )));
    }
    let image = decode_image(source, &detection.name)?;
    let physical_height = detection.physical_width * image.aspect();
    Ok(ReferenceImage {
        image,
        physical_width: detection.physical_width,
        physical_height,
    })
}

/// Decode every configured detection image, failing on the first problem.
pub fn load_reference_images(
    source: &dyn AssetSource,
    detections: &[DetectionImage],
) -> Result<Vec<ReferenceImage>, AssetError> {
    let mut seen = std::collections::HashSet::new();
    let mut images = Vec::with_capacity(detections.len());
    for detection in detections {
        if !seen.insert(detection.name.as_str()) {
            return Err(AssetError::Invalid(format!(
                "detection image '{}' listed twice",
                detection.name
            )));
        }
        images.push(load_reference_image(source, detection)?);
    }
    Ok(images)
}
