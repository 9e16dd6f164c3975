use std::fs;
use std::path::{Path, PathBuf};

use nalgebra::{Point2, Point3, Vector2};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::model::{Body, BodyError, SimulationConfig};

/// One body as written in a scene file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BodyDefinition {
    pub initial_position: [f64; 2],
    pub initial_velocity: [f64; 2],
    pub mass: f64,
    pub radius: f64,
    #[serde(rename = "colorRgb")]
    pub color: [f32; 3],
}

impl BodyDefinition {
    pub fn to_body(&self) -> Result<Body, BodyError> {
        let [x, y] = self.initial_position;
        let [vx, vy] = self.initial_velocity;
        let [r, g, b] = self.color;
        Body::new(
            Point2::new(x, y),
            Vector2::new(vx, vy),
            self.mass,
            self.radius,
            Point3::new(r, g, b),
        )
    }
}

/// A parsed scene: optional simulation settings plus the bodies, in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub settings: Option<SimulationConfig>,
    pub bodies: Vec<BodyDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneDocument {
    #[serde(default)]
    settings: Option<SimulationConfig>,
    bodies: Vec<BodyDefinition>,
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("could not read scene file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed scene: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("scene must be a list of bodies or an object with a \"bodies\" list")]
    UnexpectedLayout,
    #[error("body {index} in scene is invalid")]
    InvalidBody {
        index: usize,
        #[source]
        source: BodyError,
    },
}

/// Parses a scene from JSON text.
///
/// Two layouts are accepted: a bare list of bodies, or an object with a
/// `bodies` list and an optional `settings` object.
pub fn parse_scene(text: &str) -> Result<Scene, SceneError> {
    // Pick the layout from the opening bracket and parse straight from the
    // text, so errors keep their line and column.
    match text.trim_start().as_bytes().first() {
        Some(b'[') => Ok(Scene {
            settings: None,
            bodies: serde_json::from_str(text)?,
        }),
        Some(b'{') => {
            let document: SceneDocument = serde_json::from_str(text)?;
            Ok(Scene {
                settings: document.settings,
                bodies: document.bodies,
            })
        }
        _ => {
            // Still report malformed JSON as a parse error
            serde_json::from_str::<Value>(text)?;
            Err(SceneError::UnexpectedLayout)
        }
    }
}

pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<Scene, SceneError> {
    let path = filename.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.to_owned(),
        source,
    })?;
    let scene = parse_scene(&text)?;
    log::info!(
        "Read {} bodies from {}",
        scene.bodies.len(),
        path.display()
    );
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::ForceEvaluation;

    const TWO_BODIES: &str = r#"[
        {
            "initialPosition": [100.0, 200.0],
            "initialVelocity": [0.0, 1.5],
            "mass": 5.0e10,
            "radius": 10.0,
            "colorRgb": [1.0, 0.5, 0.0]
        },
        {
            "initialPosition": [300.0, 200.0],
            "initialVelocity": [0.0, -1.5],
            "mass": 5.0e10,
            "radius": 10.0,
            "colorRgb": [0.0, 0.5, 1.0]
        }
    ]"#;

    #[test]
    fn test_bare_list() {
        let scene = parse_scene(TWO_BODIES).unwrap();
        assert_eq!(scene.settings, None);
        assert_eq!(scene.bodies.len(), 2);

        let first = &scene.bodies[0];
        assert_eq!(first.initial_position, [100.0, 200.0]);
        assert_eq!(first.initial_velocity, [0.0, 1.5]);
        assert_eq!(first.mass, 5.0e10);
        assert_eq!(first.radius, 10.0);
        assert_eq!(first.color, [1.0, 0.5, 0.0]);

        let body = first.to_body().unwrap();
        assert_eq!(body.position(), Point2::new(100.0, 200.0));
        assert_eq!(body.info().color, Point3::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_document_with_settings() {
        let text = format!(
            r#"{{
                "settings": {{ "gravitational_constant": 1.0, "force_evaluation": "sequential" }},
                "bodies": {}
            }}"#,
            TWO_BODIES
        );
        let scene = parse_scene(&text).unwrap();
        let settings = scene.settings.unwrap();
        assert_eq!(settings.gravitational_constant, 1.0);
        assert_eq!(settings.force_evaluation, ForceEvaluation::Sequential);
        assert_eq!(scene.bodies.len(), 2);
    }

    #[test]
    fn test_missing_mass() {
        let text = r#"[{
            "initialPosition": [0.0, 0.0],
            "initialVelocity": [0.0, 0.0],
            "radius": 1.0,
            "colorRgb": [1.0, 1.0, 1.0]
        }]"#;
        let err = parse_scene(text).unwrap_err();
        assert!(err.to_string().contains("mass"), "unexpected message: {}", err);
        match err {
            // Points into the body's object, not at the start of the file
            SceneError::Parse(e) => assert!(e.line() > 1, "reported at line {}", e.line()),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_short_arity() {
        let text = r#"[{
            "initialPosition": [0.0],
            "initialVelocity": [0.0, 0.0],
            "mass": 1.0,
            "radius": 1.0,
            "colorRgb": [1.0, 1.0, 1.0]
        }]"#;
        assert!(matches!(parse_scene(text), Err(SceneError::Parse(_))));

        let text = r#"[{
            "initialPosition": [0.0, 0.0],
            "initialVelocity": [0.0, 0.0],
            "mass": 1.0,
            "radius": 1.0,
            "colorRgb": [1.0, 1.0]
        }]"#;
        assert!(matches!(parse_scene(text), Err(SceneError::Parse(_))));
    }

    #[test]
    fn test_wrong_types() {
        let text = r#"[{
            "initialPosition": [0.0, 0.0],
            "initialVelocity": [0.0, 0.0],
            "mass": "heavy",
            "radius": 1.0,
            "colorRgb": [1.0, 1.0, 1.0]
        }]"#;
        assert!(matches!(parse_scene(text), Err(SceneError::Parse(_))));
    }

    #[test]
    fn test_unexpected_layout() {
        assert!(matches!(
            parse_scene("42"),
            Err(SceneError::UnexpectedLayout)
        ));
        assert!(matches!(parse_scene("{ not json"), Err(SceneError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = read_file("this/scene/does/not/exist.json").unwrap_err();
        assert!(matches!(err, SceneError::Io { .. }));
    }
}
