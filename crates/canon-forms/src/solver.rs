//! Solvers: from canonical parameters to complete declarations.
//!
//! A solver fully specifies its form — dimensional, symmetry, and curvature
//! classes, every canonical parameter, and an explicit epsilon — so that the
//! resulting declaration passes the canon without further editing.

use canon_kernel::{CurvatureClass, Declaration, DimensionalClass, Form};

/// Default tolerance for solver-built declarations.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Declare a circle from its radius.
pub fn circle(radius: f64) -> Declaration {
    let form = Form::new(
        "c1",
        "Circle",
        DimensionalClass::Planar,
        CurvatureClass::Constant,
        "rotational_infinite",
    )
    .with_param("radius", radius);
    Declaration::new(format!("Circle r={radius}"), vec![form], DEFAULT_EPSILON)
}

/// Declare a sphere from its radius.
pub fn sphere(radius: f64) -> Declaration {
    let form = Form::new(
        "s1",
        "Sphere",
        DimensionalClass::Spatial,
        CurvatureClass::Constant,
        "spherical",
    )
    .with_param("radius", radius);
    Declaration::new(format!("Sphere r={radius}"), vec![form], DEFAULT_EPSILON)
}

/// Declare a regular polygon from its side count and circumradius.
pub fn regular_polygon(sides: u32, circumradius: f64) -> Declaration {
    let form = Form::new(
        "p1",
        "RegularPolygon",
        DimensionalClass::Planar,
        CurvatureClass::Flat,
        "dihedral",
    )
    .with_param("sides", sides as f64)
    .with_param("circumradius", circumradius);
    Declaration::new(
        format!("RegularPolygon n={sides} R={circumradius}"),
        vec![form],
        DEFAULT_EPSILON,
    )
}

/// Declare a square frustum from base edge, height, and truncation ratio.
///
/// The kind is orientation-sensitive; the solver pins the rotation about
/// the vertical axis explicitly.
pub fn truncated_pyramid(base_edge: f64, height: f64, truncation_ratio: f64) -> Declaration {
    let form = Form::new(
        "f1",
        "TruncatedPyramid",
        DimensionalClass::Spatial,
        CurvatureClass::Flat,
        "axial",
    )
    .with_param("base_edge", base_edge)
    .with_param("height", height)
    .with_param("truncation_ratio", truncation_ratio)
    .with_param("orientation", 0.0);
    Declaration::new(
        format!("TruncatedPyramid a={base_edge} h={height} k={truncation_ratio}"),
        vec![form],
        DEFAULT_EPSILON,
    )
}
