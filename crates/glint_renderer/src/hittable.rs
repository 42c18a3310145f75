//! Hittable trait, HitRecord, and the Scene container.

use crate::{Material, Ray};
use glint_core::EntityKind;
use glint_math::{Interval, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal, always pointing against the ray
    pub normal: Vec3,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Copy of the material of the entity that was hit
    pub material: Material,
    /// Shade with the normal instead of scattering
    pub render_normal_as_color: bool,
}

impl HitRecord {
    /// Build a record from an accepted root, orienting the normal against the ray.
    pub fn new(ray: &Ray, t: f64, outward_normal: Vec3, material: Material) -> Self {
        let mut rec = Self {
            t,
            point: ray.at(t),
            normal: outward_normal,
            front_face: true,
            material,
            render_normal_as_color: false,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction.dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
///
/// New shape kinds implement this trait; the scene dispatches through it
/// without knowing the concrete shape.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object within the given interval.
    ///
    /// Returns the nearest accepted intersection, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord>;

    /// The declared shape kind of this object.
    fn kind(&self) -> EntityKind;
}

/// An ordered collection of entities.
pub struct Scene {
    entities: Vec<Box<dyn Hittable>>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
        }
    }

    /// Add an entity to the scene.
    pub fn add(&mut self, entity: Box<dyn Hittable>) {
        self.entities.push(entity);
    }

    /// Remove all entities.
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Entities in insertion order.
    pub fn entities(&self) -> &[Box<dyn Hittable>] {
        &self.entities
    }

    /// Get the number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Find the nearest intersection among all entities.
    ///
    /// The accepted range shrinks to `[ray_t.min, closest_so_far]` as hits
    /// are found, so the result does not depend on insertion order.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;

        for entity in &self.entities {
            let closest_so_far = closest.map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = entity.hit(ray, ray_t.with_max(closest_so_far)) {
                closest = Some(rec);
            }
        }

        closest
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
