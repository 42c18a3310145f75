//! Glint Core - scene description and scene file loading.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `CameraDescription`,
//!   `RenderSettings`, `EntityDescription`, `MaterialDescription`
//! - **Scene files**: JSON loading and validation
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene;
//!
//! let description = load_scene("scene.json")?;
//! println!("Loaded {} entities", description.entities.len());
//! ```

pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, SceneError, SceneResult};
pub use scene::{
    CameraDescription, EntityDescription, EntityKind, MaterialDescription, RenderSettings,
    SceneDescription, MAX_IMAGE_PIXELS,
};
