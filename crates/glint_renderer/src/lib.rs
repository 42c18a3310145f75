//! Glint Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer: spheres with diffuse, metal and dielectric
//! materials, a pinhole camera, and a recursive integrator under a
//! gradient sky.
//!
//! # Example
//!
//! ```ignore
//! use glint_core::SceneDescription;
//! use glint_renderer::{build_scene, render_parallel, write_image};
//!
//! let job = build_scene(&SceneDescription::demo())?;
//! let image = render_parallel(&job.camera, &job.scene, &job.config);
//! write_image(&image, "demo.png".as_ref())?;
//! ```

mod bucket;
mod builder;
mod camera;
mod hittable;
mod material;
mod output;
mod renderer;
pub mod sampling;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use builder::{build_scene, BuildError, RenderJob};
pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, Scene};
pub use material::{reflect, refract, Color, Material, ScatterResult};
pub use output::{
    write_image, write_to_sink, ImageFileSink, OutputError, OutputResult, PixelSink, PpmWriter,
};
pub use renderer::{
    color_to_rgb8, linear_to_gamma, ray_color, render, render_parallel, render_pixel,
    sky_gradient, test_pattern, ImageBuffer, RenderConfig, SHADOW_ACNE_EPSILON,
};
pub use sphere::Sphere;

pub use glint_core::EntityKind;
/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Interval, Ray, Vec3};
