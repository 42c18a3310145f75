//! Scene description types for Glint.
//!
//! These are plain data, deserialized from scene files or built in code by
//! the driver. The renderer turns them into intersectable geometry.

use std::fmt;

use glint_math::Vec3;
use serde::Deserialize;

use crate::loader::{SceneError, SceneResult};

/// Shape kinds a scene may declare.
///
/// Only spheres carry geometry today; the other kinds are accepted by the
/// scene file format and rejected when the scene is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Sphere,
    Triangle,
    Box,
    Plane,
    Pyramid,
    Cone,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Sphere => "sphere",
            EntityKind::Triangle => "triangle",
            EntityKind::Box => "box",
            EntityKind::Plane => "plane",
            EntityKind::Pyramid => "pyramid",
            EntityKind::Cone => "cone",
        };
        f.write_str(name)
    }
}

/// Surface material as written in a scene file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MaterialDescription {
    Diffuse {
        #[serde(default)]
        albedo: [f64; 3],
    },
    Metal {
        #[serde(default)]
        albedo: [f64; 3],
        #[serde(default)]
        fuzz: f64,
    },
    Dielectric {
        #[serde(default = "default_refraction_index")]
        refraction_index: f64,
    },
}

/// Glass.
fn default_refraction_index() -> f64 {
    1.5
}

impl Default for MaterialDescription {
    /// Black diffuse, the fallback when an entity names no material.
    fn default() -> Self {
        MaterialDescription::Diffuse { albedo: [0.0; 3] }
    }
}

/// One entry of the scene's entity list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntityDescription {
    pub kind: EntityKind,

    #[serde(default)]
    pub center: [f64; 3],

    #[serde(default)]
    pub radius: f64,

    #[serde(default)]
    pub material: MaterialDescription,

    /// Diagnostic: shade this entity with its surface normal.
    #[serde(default)]
    pub render_normal_as_color: bool,
}

impl EntityDescription {
    /// Create a sphere entry.
    pub fn sphere(center: Vec3, radius: f64, material: MaterialDescription) -> Self {
        Self {
            kind: EntityKind::Sphere,
            center: center.to_array(),
            radius,
            material,
            render_normal_as_color: false,
        }
    }

    /// Center as a vector.
    pub fn center(&self) -> Vec3 {
        Vec3::from_array(self.center)
    }
}

/// Pinhole camera parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraDescription {
    pub origin: [f64; 3],
    pub aspect_ratio: f64,
    pub viewport_height: f64,
    pub focal_length: f64,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            origin: [0.0; 3],
            aspect_ratio: 16.0 / 9.0,
            viewport_height: 2.0,
            focal_length: 1.0,
        }
    }
}

/// Image size and sampling parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub image_width: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    pub gamma_correction: bool,
    pub seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            image_width: 400,
            samples_per_pixel: 100,
            max_depth: 50,
            gamma_correction: true,
            seed: 0,
        }
    }
}

impl RenderSettings {
    /// Image height implied by the width and the camera's aspect ratio,
    /// at least 1.
    ///
    /// Returns `None` when the height does not fit in a `u32`.
    pub fn checked_image_height(&self, aspect_ratio: f64) -> Option<u32> {
        let height = self.image_width as f64 / aspect_ratio;
        // Also rejects NaN
        if !(height < u32::MAX as f64) {
            return None;
        }
        Some((height as u32).max(1))
    }

    /// Image height for settings that passed `SceneDescription::validate`.
    pub fn image_height(&self, aspect_ratio: f64) -> u32 {
        self.checked_image_height(aspect_ratio).unwrap_or(u32::MAX)
    }
}

/// Largest image `validate` accepts, in pixels.
pub const MAX_IMAGE_PIXELS: u64 = 1 << 28;

/// A complete scene: camera, render settings and entities.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub camera: CameraDescription,
    pub render: RenderSettings,
    pub entities: Vec<EntityDescription>,
}

impl SceneDescription {
    /// The two-sphere demo scene: a reddish diffuse sphere resting on a
    /// large yellow-green ground sphere, seen from the origin.
    pub fn demo() -> Self {
        Self {
            camera: CameraDescription::default(),
            render: RenderSettings::default(),
            entities: vec![
                EntityDescription::sphere(
                    Vec3::new(0.0, 0.0, -1.0),
                    0.5,
                    MaterialDescription::Diffuse {
                        albedo: [0.7, 0.3, 0.3],
                    },
                ),
                EntityDescription::sphere(
                    Vec3::new(0.0, -100.5, -1.0),
                    100.0,
                    MaterialDescription::Diffuse {
                        albedo: [0.8, 0.8, 0.0],
                    },
                ),
            ],
        }
    }

    /// Check the numeric ranges the renderer relies on.
    pub fn validate(&self) -> SceneResult<()> {
        let camera = &self.camera;
        if !(camera.aspect_ratio > 0.0) {
            return invalid(format!(
                "aspect ratio must be positive, got {}",
                camera.aspect_ratio
            ));
        }
        if !(camera.viewport_height > 0.0) {
            return invalid(format!(
                "viewport height must be positive, got {}",
                camera.viewport_height
            ));
        }
        if !(camera.focal_length > 0.0) {
            return invalid(format!(
                "focal length must be positive, got {}",
                camera.focal_length
            ));
        }

        if self.render.image_width == 0 {
            return invalid("image width must be at least 1".to_string());
        }
        if self.render.samples_per_pixel == 0 {
            return invalid("samples per pixel must be at least 1".to_string());
        }

        let width = self.render.image_width;
        let Some(height) = self.render.checked_image_height(camera.aspect_ratio) else {
            return invalid(format!(
                "image width {width} at aspect ratio {} gives an image too tall to render",
                camera.aspect_ratio
            ));
        };
        if width as u64 * height as u64 > MAX_IMAGE_PIXELS {
            return invalid(format!(
                "image of {width}x{height} exceeds {MAX_IMAGE_PIXELS} pixels"
            ));
        }

        for (index, entity) in self.entities.iter().enumerate() {
            if entity.kind == EntityKind::Sphere && !(entity.radius > 0.0) {
                return invalid(format!(
                    "entity {index}: sphere radius must be positive, got {}",
                    entity.radius
                ));
            }
            match entity.material {
                MaterialDescription::Diffuse { albedo }
                | MaterialDescription::Metal { albedo, .. } => {
                    if !albedo.iter().all(|c| (0.0..=1.0).contains(c)) {
                        return invalid(format!(
                            "entity {index}: albedo components must lie in [0, 1], got {albedo:?}"
                        ));
                    }
                }
                MaterialDescription::Dielectric { refraction_index } => {
                    if !(refraction_index > 0.0) {
                        return invalid(format!(
                            "entity {index}: refraction index {refraction_index} is not positive"
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

fn invalid(message: String) -> SceneResult<()> {
    Err(SceneError::Invalid { message })
}
