//! Device camera used to turn view-space touches into world-space rays.

use crate::Ray;
use glam::{Mat4, Vec2, Vec3};

/// Pinhole camera tracked by the AR session.
///
/// The camera looks down its local -Z axis with +Y up.
#[derive(Debug, Clone)]
pub struct ArCamera {
    /// Camera-to-world transform.
    pub transform: Mat4,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// View size in points.
    pub viewport: Vec2,
}

impl Default for ArCamera {
    fn default() -> Self {
        Self {
            transform: Mat4::from_translation(Vec3::new(0.0, 1.5, 0.0)),
            fov_y: 60f32.to_radians(),
            viewport: Vec2::new(390.0, 844.0),
        }
    }
}

impl ArCamera {
    /// Camera at `eye` looking at `target`.
    pub fn looking_at(eye: Vec3, target: Vec3, fov_y: f32, viewport: Vec2) -> Self {
        Self {
            transform: Mat4::look_at_rh(eye, target, Vec3::Y).inverse(),
            fov_y,
            viewport,
        }
    }

    /// Camera position in world space.
    pub fn position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }

    /// View width divided by height.
    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    /// World-space ray through a view point (origin top-left, in points).
    pub fn screen_ray(&self, point: Vec2) -> Ray {
        let ndc_x = 2.0 * point.x / self.viewport.x - 1.0;
        let ndc_y = 1.0 - 2.0 * point.y / self.viewport.y;
        let half_height = (self.fov_y * 0.5).tan();
        let local = Vec3::new(ndc_x * half_height * self.aspect(), ndc_y * half_height, -1.0);

        Ray {
            origin: self.position(),
            direction: self.transform.transform_vector3(local).normalize(),
        }
    }
}
