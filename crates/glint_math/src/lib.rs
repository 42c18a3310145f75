//! Math primitives shared by the Glint crates.
//!
//! Vectors come straight from glam in double precision; `Vec3` is an alias
//! for `DVec3` so the rest of the workspace reads naturally.

// Re-export glam for convenience
pub use glam::DVec3;

mod interval;
mod ray;

pub use interval::Interval;
pub use ray::Ray;

/// Double-precision 3-component vector used for points, directions and colors.
pub type Vec3 = DVec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
    }
}
