//! Scene file loading.
//!
//! Scene files are JSON documents matching [`SceneDescription`]. Every
//! section is optional; missing values fall back to their defaults.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::scene::SceneDescription;

/// Errors that can occur while loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene: {message}")]
    Invalid { message: String },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Load and validate a scene file from disk.
pub fn load_scene(path: impl AsRef<Path>) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let scene = load_scene_from_str(&content)?;

    log::info!(
        "Loaded scene {} ({} entities)",
        path.display(),
        scene.entities.len()
    );

    Ok(scene)
}

/// Parse and validate a scene from a JSON string.
pub fn load_scene_from_str(content: &str) -> SceneResult<SceneDescription> {
    let scene: SceneDescription = serde_json::from_str(content)?;
    scene.validate()?;
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{EntityKind, MaterialDescription, RenderSettings};

    #[test]
    fn test_empty_document_uses_defaults() {
        let scene = load_scene_from_str("{}").unwrap();
        assert!(scene.entities.is_empty());
        assert_eq!(scene.render, RenderSettings::default());
        assert_eq!(scene.camera.viewport_height, 2.0);
    }

    #[test]
    fn test_parse_full_scene() {
        let json = r#"{
            "camera": { "origin": [0, 1, 0], "aspect_ratio": 2.0 },
            "render": { "image_width": 64, "samples_per_pixel": 4, "gamma_correction": false },
            "entities": [
                { "kind": "sphere", "center": [0, 0, -1], "radius": 0.5,
                  "material": { "type": "metal", "albedo": [0.8, 0.8, 0.8], "fuzz": 0.3 } },
                { "kind": "sphere", "center": [1, 0, -1], "radius": 0.5,
                  "material": { "type": "dielectric", "refraction_index": 1.5 },
                  "render_normal_as_color": true },
                { "kind": "sphere", "center": [-1, 0, -1], "radius": 0.5 }
            ]
        }"#;

        let scene = load_scene_from_str(json).unwrap();
        assert_eq!(scene.camera.origin, [0.0, 1.0, 0.0]);
        assert_eq!(scene.camera.aspect_ratio, 2.0);
        assert_eq!(scene.camera.focal_length, 1.0);
        assert_eq!(scene.render.image_width, 64);
        assert_eq!(scene.render.max_depth, 50);
        assert!(!scene.render.gamma_correction);

        assert_eq!(scene.entities.len(), 3);
        assert_eq!(
            scene.entities[0].material,
            MaterialDescription::Metal {
                albedo: [0.8, 0.8, 0.8],
                fuzz: 0.3
            }
        );
        assert!(scene.entities[1].render_normal_as_color);
        assert_eq!(scene.entities[2].material, MaterialDescription::default());
    }

    #[test]
    fn test_dielectric_defaults_to_glass() {
        let json = r#"{ "entities": [
            { "kind": "sphere", "radius": 1.0, "material": { "type": "dielectric" } }
        ] }"#;
        let scene = load_scene_from_str(json).unwrap();
        assert_eq!(
            scene.entities[0].material,
            MaterialDescription::Dielectric {
                refraction_index: 1.5
            }
        );
    }

    #[test]
    fn test_oversized_image_is_invalid() {
        let json = r#"{ "camera": { "aspect_ratio": 1e-9 } }"#;
        assert!(matches!(
            load_scene_from_str(json),
            Err(SceneError::Invalid { .. })
        ));
    }

    #[test]
    fn test_unsupported_kinds_still_parse() {
        let json = r#"{ "entities": [ { "kind": "cone" } ] }"#;
        let scene = load_scene_from_str(json).unwrap();
        assert_eq!(scene.entities[0].kind, EntityKind::Cone);
    }

    #[test]
    fn test_unknown_kind_is_json_error() {
        let json = r#"{ "entities": [ { "kind": "torus", "radius": 1.0 } ] }"#;
        assert!(matches!(
            load_scene_from_str(json),
            Err(SceneError::Json(_))
        ));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let json = r#"{ "entities": [ { "kind": "sphere", "radius": -2.0 } ] }"#;
        assert!(matches!(
            load_scene_from_str(json),
            Err(SceneError::Invalid { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_scene("definitely/not/a/scene.json");
        assert!(matches!(result, Err(SceneError::Io(_))));
    }
}
