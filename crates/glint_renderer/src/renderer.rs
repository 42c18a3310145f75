//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Gamma correction
//! - Anti-aliasing via multi-sampling
//! - Bucketed rendering, sequential or parallel, with identical output

use std::time::Instant;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::sampling::random_f64;
use crate::{Camera, Color, Ray, Scene};
use glint_math::Interval;
use rand::RngCore;
use rayon::prelude::*;

/// Lower bound on accepted hits, keeps scattered rays off their own surface.
pub const SHADOW_ACNE_EPSILON: f64 = 0.001;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Output width in pixels
    pub image_width: u32,
    /// Output height in pixels
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Encode output with gamma 2.0 (square root)
    pub gamma_correction: bool,
    /// Base seed; each bucket derives its own stream from it
    pub seed: u64,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            image_height: 225,
            samples_per_pixel: 100,
            max_depth: 50,
            gamma_correction: true,
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through
/// the scene, bouncing off surfaces and multiplying in their attenuation.
pub fn ray_color(ray: &Ray, scene: &Scene, depth: u32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.hit(ray, Interval::new(SHADOW_ACNE_EPSILON, f64::INFINITY)) else {
        return sky_gradient(ray);
    };

    if rec.render_normal_as_color {
        return 0.5 * (rec.normal + Color::ONE);
    }

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, scene, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Sky seen by rays that escape the scene: white at the horizon blending
/// to light blue overhead.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction.normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Quantize an accumulated sample sum to 8-bit RGB.
///
/// The sum is averaged over `samples`, optionally gamma encoded, clamped to
/// [0, 0.999] and scaled by 256.
pub fn color_to_rgb8(sum: Color, samples: u32, gamma_correction: bool) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let scale = 1.0 / samples.max(1) as f64;

    let channel = |value: f64| -> u8 {
        let mut value = value * scale;
        if gamma_correction {
            value = linear_to_gamma(value);
        }
        (256.0 * intensity.clamp(value)) as u8
    };

    [channel(sum.x), channel(sum.y), channel(sum.z)]
}

/// Render a single pixel with multi-sampling.
///
/// `i` counts columns left to right and `j` rows bottom to top. Returns
/// the sum over all samples; see [`color_to_rgb8`] for averaging.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    i: u32,
    j: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let u_span = config.image_width.saturating_sub(1).max(1) as f64;
    let v_span = config.image_height.saturating_sub(1).max(1) as f64;
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let u = (i as f64 + random_f64(rng)) / u_span;
        let v = (j as f64 + random_f64(rng)) / v_span;
        let ray = camera.get_ray(u, v);
        pixel_color += ray_color(&ray, scene, config.max_depth, rng);
    }

    pixel_color
}

/// 8-bit RGB image, row-major with the top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 3]>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; (width as usize) * (height as usize)],
        }
    }

    /// Get the pixel at (x, y), y counted from the top.
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y), y counted from the top.
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let index = self.index(x, y);
        self.pixels[index] = rgb;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for local_y in 0..bucket.height {
            for local_x in 0..bucket.width {
                let rgb = result.pixels[(local_y * bucket.width + local_x) as usize];
                self.set(bucket.x + local_x, bucket.y + local_y, rgb);
            }
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Diagonal grey ramp, brightening toward the last pixel.
///
/// Exercises an image sink without tracing any rays.
pub fn test_pattern(width: u32, height: u32) -> ImageBuffer {
    let mut image = ImageBuffer::new(width, height);
    let total = image.pixels.len() as f64;

    for (index, pixel) in image.pixels.iter_mut().enumerate() {
        let level = (255.0 * (index + 1) as f64 / total) as u8;
        *pixel = [level; 3];
    }

    image
}

/// Render the entire scene to an image buffer on the calling thread.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    render_with(camera, scene, config, false)
}

/// Render the entire scene, spreading buckets across the rayon pool.
///
/// Produces exactly the same image as [`render`] for the same config.
pub fn render_parallel(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    render_with(camera, scene, config, true)
}

fn render_with(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    parallel: bool,
) -> ImageBuffer {
    let buckets = generate_buckets(config.image_width, config.image_height, config.bucket_size);

    log::info!(
        "Rendering {}x{} @ {} spp, depth {} ({} buckets, {})",
        config.image_width,
        config.image_height,
        config.samples_per_pixel,
        config.max_depth,
        buckets.len(),
        if parallel { "parallel" } else { "single-threaded" }
    );
    if config.max_depth == 0 {
        log::warn!("max_depth is 0: every pixel will be black");
    }

    let start = Instant::now();
    let results: Vec<BucketResult> = if parallel {
        buckets
            .par_iter()
            .map(|bucket| render_bucket(bucket, camera, scene, config))
            .collect()
    } else {
        buckets
            .iter()
            .map(|bucket| render_bucket(bucket, camera, scene, config))
            .collect()
    };

    let mut image = ImageBuffer::new(config.image_width, config.image_height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Rendered in {:?}", start.elapsed());
    image
}
