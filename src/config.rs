use anyhow::{Context, Result};
use arplace_assets::{DetectionImage, MaterialAssets};
use arplace_host::{ArCamera, DebugOptions, PlaneDetection};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/session.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    pub plane_detection: PlaneDetection,
    /// Directory image assets are resolved against.
    pub asset_dir: PathBuf,
    pub detection_images: Vec<DetectionImage>,
    pub debug: DebugOptions,
    pub materials: MaterialAssets,
    pub camera: CameraConfig,
}

/// Pose and intrinsics of the simulated device camera.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// View size in points.
    pub viewport: [f32; 2],
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            plane_detection: PlaneDetection::Horizontal,
            asset_dir: PathBuf::from("assets"),
            detection_images: vec![DetectionImage::default()],
            debug: DebugOptions::default(),
            materials: MaterialAssets::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [0.0, 1.5, 0.0],
            target: [0.0, 0.0, -1.5],
            fov_degrees: 60.0,
            viewport: [390.0, 844.0],
        }
    }
}

impl CameraConfig {
    pub fn to_camera(&self) -> ArCamera {
        ArCamera::looking_at(
            Vec3::from(self.eye),
            Vec3::from(self.target),
            self.fov_degrees.clamp(10.0, 150.0).to_radians(),
            Vec2::from(self.viewport),
        )
    }
}

impl SessionConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match Self::load_strict(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                let missing_default = path == Path::new(DEFAULT_CONFIG_PATH)
                    && err
                        .downcast_ref::<std::io::Error>()
                        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound);
                if missing_default {
                    warn!(
                        "Session config not found at {}. Using defaults",
                        path.display()
                    );
                } else {
                    warn!("Failed to load {}: {err:#}. Using defaults", path.display());
                }
                SessionConfig::default()
            }
        }
    }

    /// Load configuration, returning read and parse errors to the caller.
    pub fn load_strict(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_session_setup() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.plane_detection, PlaneDetection::Horizontal);
        assert_eq!(cfg.detection_images.len(), 1);
        assert_eq!(cfg.detection_images[0].name, "marker_image");
        assert_eq!(cfg.detection_images[0].physical_width, 0.07);
        assert_eq!(cfg.materials.logo_a, "msft_logo.png");
        assert_eq!(cfg.materials.logo_b, "xamagon.png");
        assert_eq!(cfg.materials.fsharp_logo, "fsharp.png");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("session.toml");
        fs::write(
            &path,
            "asset_dir = \"/opt/ar/assets\"\n[materials]\nlogo_b = \"other.png\"\n",
        )
        .expect("write config");

        let cfg = SessionConfig::load_strict(&path).expect("parses");
        assert_eq!(cfg.asset_dir, PathBuf::from("/opt/ar/assets"));
        assert_eq!(cfg.materials.logo_a, "msft_logo.png");
        assert_eq!(cfg.materials.logo_b, "other.png");
        assert_eq!(cfg.plane_detection, PlaneDetection::Horizontal);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("session.toml");
        fs::write(&path, "plane_detection = 42").expect("write config");

        assert!(SessionConfig::load_strict(&path).is_err());
        let cfg = SessionConfig::load_from_path(&path);
        assert_eq!(cfg.plane_detection, PlaneDetection::Horizontal);
    }

    #[test]
    fn save_then_load_strict() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("session.toml");
        let cfg = SessionConfig {
            plane_detection: PlaneDetection::None,
            ..SessionConfig::default()
        };
        cfg.save_to_path(&path).expect("saves");
        let loaded = SessionConfig::load_strict(&path).expect("loads");
        assert_eq!(loaded.plane_detection, PlaneDetection::None);
    }

    #[test]
    fn shipped_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_PATH);
        let cfg = SessionConfig::load_strict(&path).expect("shipped config parses");
        assert_eq!(cfg.asset_dir, PathBuf::from("demos/assets"));
        assert_eq!(cfg.detection_images, vec![DetectionImage::default()]);
    }
}
