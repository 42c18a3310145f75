//! Camera for ray generation.

use crate::Ray;
use glint_math::Vec3;

/// Axis-aligned pinhole camera looking down -Z.
///
/// The viewport frame is derived once at construction. Changing any input
/// goes through a `with_*` method, which derives the whole frame again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    // Inputs
    origin: Vec3,
    aspect_ratio: f64,
    viewport_height: f64,
    focal_length: f64,

    // Derived viewport frame
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    /// Create a camera and derive its viewport.
    pub fn new(origin: Vec3, aspect_ratio: f64, viewport_height: f64, focal_length: f64) -> Self {
        let viewport_width = aspect_ratio * viewport_height;
        let horizontal = Vec3::new(viewport_width, 0.0, 0.0);
        let vertical = Vec3::new(0.0, viewport_height, 0.0);
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - Vec3::new(0.0, 0.0, focal_length);

        Self {
            origin,
            aspect_ratio,
            viewport_height,
            focal_length,
            lower_left_corner,
            horizontal,
            vertical,
        }
    }

    /// Set camera position.
    pub fn with_origin(self, origin: Vec3) -> Self {
        Self::new(
            origin,
            self.aspect_ratio,
            self.viewport_height,
            self.focal_length,
        )
    }

    /// Set the viewport aspect ratio (width / height).
    pub fn with_aspect_ratio(self, aspect_ratio: f64) -> Self {
        Self::new(
            self.origin,
            aspect_ratio,
            self.viewport_height,
            self.focal_length,
        )
    }

    /// Set the viewport height in world units.
    pub fn with_viewport_height(self, viewport_height: f64) -> Self {
        Self::new(
            self.origin,
            self.aspect_ratio,
            viewport_height,
            self.focal_length,
        )
    }

    /// Set the distance from the origin to the viewport.
    pub fn with_focal_length(self, focal_length: f64) -> Self {
        Self::new(
            self.origin,
            self.aspect_ratio,
            self.viewport_height,
            focal_length,
        )
    }

    /// Generate the ray through normalized image-plane coordinates.
    ///
    /// `u` runs left to right and `v` bottom to top, both in [0, 1].
    pub fn get_ray(&self, u: f64, v: f64) -> Ray {
        let direction =
            self.lower_left_corner + u * self.horizontal + v * self.vertical - self.origin;
        Ray::new(self.origin, direction)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn focal_length(&self) -> f64 {
        self.focal_length
    }

    pub fn lower_left_corner(&self) -> Vec3 {
        self.lower_left_corner
    }

    pub fn horizontal(&self) -> Vec3 {
        self.horizontal
    }

    pub fn vertical(&self) -> Vec3 {
        self.vertical
    }
}

impl Default for Camera {
    /// Camera at the origin with a 16:9 viewport two units tall, one unit away.
    fn default() -> Self {
        Self::new(Vec3::ZERO, 16.0 / 9.0, 2.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-12
    }

    #[test]
    fn test_camera_frame() {
        let camera = Camera::new(Vec3::ZERO, 2.0, 2.0, 1.0);

        assert_eq!(camera.horizontal(), Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(camera.vertical(), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(camera.lower_left_corner(), Vec3::new(-2.0, -1.0, -1.0));
    }

    #[test]
    fn test_camera_ray_corners() {
        let camera = Camera::default();

        let center = camera.get_ray(0.5, 0.5);
        assert_eq!(center.origin, Vec3::ZERO);
        assert!(approx_eq(center.direction, Vec3::new(0.0, 0.0, -1.0)));

        let lower_left = camera.get_ray(0.0, 0.0);
        assert!(approx_eq(lower_left.direction, camera.lower_left_corner()));

        let upper_right = camera.get_ray(1.0, 1.0);
        assert!(approx_eq(
            upper_right.direction,
            Vec3::new(16.0 / 9.0, 1.0, -1.0)
        ));
    }

    #[test]
    fn test_camera_offset_origin() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let camera = Camera::default().with_origin(origin);

        let ray = camera.get_ray(0.5, 0.5);
        assert_eq!(ray.origin, origin);
        // Direction does not depend on where the camera sits
        assert!(approx_eq(ray.direction, Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_with_setters_rederive() {
        let camera = Camera::default().with_focal_length(2.5).with_aspect_ratio(1.0);

        assert_eq!(camera, Camera::new(Vec3::ZERO, 1.0, 2.0, 2.5));
        assert!(approx_eq(
            camera.get_ray(0.5, 0.5).direction,
            Vec3::new(0.0, 0.0, -2.5)
        ));

        let taller = camera.with_viewport_height(4.0);
        assert_eq!(taller.vertical(), Vec3::new(0.0, 4.0, 0.0));
        assert_eq!(taller.horizontal(), Vec3::new(4.0, 0.0, 0.0));
    }
}
