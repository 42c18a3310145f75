//! Glint - render a scene file (or the built-in demo scene) to an image.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glint_core::{load_scene, SceneDescription};
use glint_renderer::{build_scene, render, render_parallel, test_pattern, write_image};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON scene file; the demo scene is rendered when omitted
    scene: Option<PathBuf>,
    /// Output image; `.ppm` writes text PPM, other extensions use the image crate
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,
    /// Image width in pixels (height follows the camera aspect ratio)
    #[arg(long)]
    width: Option<u32>,
    /// Samples per pixel
    #[arg(long)]
    samples: Option<u32>,
    /// Maximum ray bounce depth
    #[arg(long)]
    depth: Option<u32>,
    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
    /// Write linear values without gamma correction
    #[arg(long)]
    no_gamma: bool,
    /// Render on the calling thread only
    #[arg(long)]
    single_threaded: bool,
    /// Write a grey ramp instead of rendering, to check the output path
    #[arg(long)]
    test_image: bool,
}

impl Args {
    /// Apply command-line overrides on top of the scene's render settings.
    fn apply_overrides(&self, description: &mut SceneDescription) {
        let render = &mut description.render;
        if let Some(width) = self.width {
            render.image_width = width;
        }
        if let Some(samples) = self.samples {
            render.samples_per_pixel = samples;
        }
        if let Some(depth) = self.depth {
            render.max_depth = depth;
        }
        if let Some(seed) = self.seed {
            render.seed = seed;
        }
        if self.no_gamma {
            render.gamma_correction = false;
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let mut description = match &args.scene {
        Some(path) => {
            load_scene(path).with_context(|| format!("failed to load scene {}", path.display()))?
        }
        None => {
            log::info!("No scene file given, rendering the demo scene");
            SceneDescription::demo()
        }
    };
    args.apply_overrides(&mut description);
    description.validate().context("invalid render settings")?;

    let job = build_scene(&description).context("failed to build scene")?;

    let image = if args.test_image {
        log::info!(
            "Writing {}x{} test image",
            job.config.image_width,
            job.config.image_height
        );
        test_pattern(job.config.image_width, job.config.image_height)
    } else if args.single_threaded {
        render(&job.camera, &job.scene, &job.config)
    } else {
        render_parallel(&job.camera, &job.scene, &job.config)
    };

    write_image(&image, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    Ok(())
}
