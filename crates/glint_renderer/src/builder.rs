//! Turn a scene description into renderable geometry.

use crate::{Camera, Color, Material, RenderConfig, Scene, Sphere, DEFAULT_BUCKET_SIZE};
use glint_core::{
    CameraDescription, EntityDescription, EntityKind, MaterialDescription, RenderSettings,
    SceneDescription,
};
use glint_math::Vec3;
use thiserror::Error;

/// Errors from building a scene.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("entity kind '{0}' has no geometry yet")]
    UnsupportedEntity(EntityKind),
}

/// Everything needed to render one image.
pub struct RenderJob {
    pub scene: Scene,
    pub camera: Camera,
    pub config: RenderConfig,
}

/// Build scene, camera and render config from a description.
///
/// The description is expected to have passed `SceneDescription::validate`.
pub fn build_scene(description: &SceneDescription) -> Result<RenderJob, BuildError> {
    let mut scene = Scene::new();
    for entity in &description.entities {
        scene.add(build_entity(entity)?);
    }

    let camera = build_camera(&description.camera);
    let config = build_config(&description.render, description.camera.aspect_ratio);

    log::debug!(
        "Built scene with {} entities, {}x{} image",
        scene.len(),
        config.image_width,
        config.image_height
    );

    Ok(RenderJob {
        scene,
        camera,
        config,
    })
}

fn build_entity(entity: &EntityDescription) -> Result<Box<dyn crate::Hittable>, BuildError> {
    match entity.kind {
        EntityKind::Sphere => {
            let sphere = Sphere::new(entity.center(), entity.radius, (&entity.material).into())
                .with_normal_coloring(entity.render_normal_as_color);
            Ok(Box::new(sphere))
        }
        kind => Err(BuildError::UnsupportedEntity(kind)),
    }
}

fn build_camera(camera: &CameraDescription) -> Camera {
    Camera::new(
        Vec3::from_array(camera.origin),
        camera.aspect_ratio,
        camera.viewport_height,
        camera.focal_length,
    )
}

fn build_config(render: &RenderSettings, aspect_ratio: f64) -> RenderConfig {
    RenderConfig {
        image_width: render.image_width,
        image_height: render.image_height(aspect_ratio),
        samples_per_pixel: render.samples_per_pixel,
        max_depth: render.max_depth,
        gamma_correction: render.gamma_correction,
        seed: render.seed,
        bucket_size: DEFAULT_BUCKET_SIZE,
    }
}

impl From<&MaterialDescription> for Material {
    fn from(description: &MaterialDescription) -> Self {
        match *description {
            MaterialDescription::Diffuse { albedo } => Material::diffuse(Color::from_array(albedo)),
            MaterialDescription::Metal { albedo, fuzz } => {
                Material::metal(Color::from_array(albedo), fuzz)
            }
            MaterialDescription::Dielectric { refraction_index } => {
                Material::dielectric(refraction_index)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ray;
    use glint_math::Interval;

    #[test]
    fn test_build_demo_scene() {
        let job = build_scene(&SceneDescription::demo()).unwrap();

        assert_eq!(job.scene.len(), 2);
        assert_eq!(job.config.image_width, 400);
        assert_eq!(job.config.image_height, 225);
        assert_eq!(job.config.samples_per_pixel, 100);
        assert_eq!(job.camera, Camera::default());

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let ray_t = Interval::new(0.001, f64::INFINITY);
        let rec = job.scene.hit(&ray, ray_t).unwrap();
        assert_eq!(rec.material, Material::diffuse(Color::new(0.7, 0.3, 0.3)));
    }

    #[test]
    fn test_unsupported_kind_rejected() {
        let mut description = SceneDescription::demo();
        description.entities[1].kind = EntityKind::Cone;

        match build_scene(&description) {
            Err(err) => {
                assert_eq!(err, BuildError::UnsupportedEntity(EntityKind::Cone));
                assert_eq!(err.to_string(), "entity kind 'cone' has no geometry yet");
            }
            Ok(_) => panic!("cone should not build"),
        }
    }

    #[test]
    fn test_material_conversion() {
        let metal: Material = (&MaterialDescription::Metal {
            albedo: [0.8, 0.8, 0.8],
            fuzz: 3.0,
        })
            .into();
        assert_eq!(metal, Material::metal(Color::splat(0.8), 1.0));

        let glass: Material = (&MaterialDescription::Dielectric {
            refraction_index: 1.5,
        })
            .into();
        assert_eq!(glass, Material::dielectric(1.5));
    }

    #[test]
    fn test_normal_coloring_carried_through() {
        let mut description = SceneDescription::demo();
        description.entities[0].render_normal_as_color = true;
        let job = build_scene(&description).unwrap();

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let ray_t = Interval::new(0.001, f64::INFINITY);
        let rec = job.scene.hit(&ray, ray_t).unwrap();
        assert!(rec.render_normal_as_color);
    }

    #[test]
    fn test_camera_and_settings_applied() {
        let mut description = SceneDescription::demo();
        description.camera.origin = [0.0, 1.0, 2.0];
        description.camera.aspect_ratio = 2.0;
        description.render.image_width = 100;
        description.render.seed = 42;
        description.render.gamma_correction = false;

        let job = build_scene(&description).unwrap();
        assert_eq!(job.camera.origin(), Vec3::new(0.0, 1.0, 2.0));
        assert_eq!(job.config.image_height, 50);
        assert_eq!(job.config.seed, 42);
        assert!(!job.config.gamma_correction);
    }
}
