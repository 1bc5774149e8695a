//! Artifact payloads produced by the geometry services.
//!
//! The engine treats artifacts as opaque JSON; these are the typed shapes
//! the built-in services emit before serialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A 2D polyline artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathArtifact {
    pub points: Vec<[f64; 2]>,
    pub closed: bool,
}

impl PathArtifact {
    /// Serialize into the engine's opaque artifact form.
    pub fn into_value(self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// A triangle-mesh artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshArtifact {
    pub vertices: Vec<[f64; 3]>,
    pub triangles: Vec<[u32; 3]>,
}

impl MeshArtifact {
    pub fn into_value(self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
