//! Classification rules: symmetry and curvature tags.
//!
//! Both classes come from closed vocabularies. Symmetry membership depends on
//! the form's dimensional class; curvature consistency depends on its kind.

use super::{CanonRule, article, rule_id};
use crate::declaration::{CurvatureClass, Declaration, DimensionalClass};
use crate::finding::{Finding, Severity};

/// Admissible symmetry classes for planar forms.
const PLANAR_SYMMETRY: &[&str] = &[
    "asymmetric",
    "bilateral",
    "dihedral",
    "rotational_finite",
    "rotational_infinite",
];

/// Admissible symmetry classes for spatial forms.
const SPATIAL_SYMMETRY: &[&str] = &[
    "asymmetric",
    "axial",
    "bilateral",
    "polyhedral",
    "spherical",
];

/// Expected curvature per known kind. Unknown kinds are not judged.
const KIND_CURVATURE: &[(&str, CurvatureClass)] = &[
    ("Arc", CurvatureClass::Constant),
    ("Circle", CurvatureClass::Constant),
    ("Cube", CurvatureClass::Flat),
    ("Ellipse", CurvatureClass::Variable),
    ("Line", CurvatureClass::Flat),
    ("Plane", CurvatureClass::Flat),
    ("Polygon", CurvatureClass::Flat),
    ("Prism", CurvatureClass::Flat),
    ("Pyramid", CurvatureClass::Flat),
    ("RegularPolygon", CurvatureClass::Flat),
    ("Sphere", CurvatureClass::Constant),
    ("Spiral", CurvatureClass::Variable),
    ("Torus", CurvatureClass::Variable),
    ("TruncatedPyramid", CurvatureClass::Flat),
];

/// `symmetry_class` must belong to the closed set for the form's
/// dimensional class.
pub struct SymmetryRule;

impl CanonRule for SymmetryRule {
    fn id(&self) -> &'static str {
        rule_id::SYMMETRY
    }

    fn article(&self) -> &'static str {
        article::SYMMETRY
    }

    fn check(&self, decl: &Declaration) -> Vec<Finding> {
        let mut findings = Vec::new();

        for form in &decl.forms {
            let admissible = match form.dimensional_class {
                DimensionalClass::Planar => PLANAR_SYMMETRY,
                DimensionalClass::Spatial => SPATIAL_SYMMETRY,
            };
            if !admissible.contains(&form.symmetry_class.as_str()) {
                findings.push(
                    Finding::new(
                        Severity::Warning,
                        rule_id::SYMMETRY,
                        article::SYMMETRY,
                        format!(
                            "symmetry class {:?} is not admissible for a {} form \
                             (expected one of: {})",
                            form.symmetry_class,
                            form.dimensional_class,
                            admissible.join(", ")
                        ),
                    )
                    .on_form(&form.id),
                );
            }
        }

        findings
    }
}

/// `curvature_class` must be consistent with the form's kind.
pub struct CurvatureRule;

impl CanonRule for CurvatureRule {
    fn id(&self) -> &'static str {
        rule_id::CURVATURE
    }

    fn article(&self) -> &'static str {
        article::CURVATURE
    }

    fn check(&self, decl: &Declaration) -> Vec<Finding> {
        let mut findings = Vec::new();

        for form in &decl.forms {
            let expected = KIND_CURVATURE
                .iter()
                .find(|(kind, _)| *kind == form.kind)
                .map(|(_, curvature)| *curvature);
            if let Some(expected) = expected
                && expected != form.curvature_class
            {
                findings.push(
                    Finding::new(
                        Severity::Error,
                        rule_id::CURVATURE,
                        article::CURVATURE,
                        format!(
                            "a {} cannot declare {:?} curvature (expected {expected})",
                            form.kind,
                            form.curvature_class.to_string()
                        ),
                    )
                    .on_form(&form.id),
                );
            }
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::Form;

    #[test]
    fn admissible_symmetry_passes() {
        let decl = Declaration::new(
            "s",
            vec![
                Form::new(
                    "a",
                    "Circle",
                    DimensionalClass::Planar,
                    CurvatureClass::Constant,
                    "rotational_infinite",
                ),
                Form::new(
                    "b",
                    "Sphere",
                    DimensionalClass::Spatial,
                    CurvatureClass::Constant,
                    "spherical",
                ),
            ],
            1e-9,
        );
        assert!(SymmetryRule.check(&decl).is_empty());
    }

    #[test]
    fn symmetry_set_depends_on_dimension() {
        // "spherical" is only admissible in space.
        let decl = Declaration::new(
            "s",
            vec![Form::new(
                "a",
                "Circle",
                DimensionalClass::Planar,
                CurvatureClass::Constant,
                "spherical",
            )],
            1e-9,
        );
        let findings = SymmetryRule.check(&decl);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert!(findings[0].message.contains("2D"));
    }

    #[test]
    fn unknown_symmetry_warns() {
        let decl = Declaration::new(
            "s",
            vec![Form::new(
                "a",
                "Circle",
                DimensionalClass::Planar,
                CurvatureClass::Constant,
                "septilateral",
            )],
            1e-9,
        );
        assert_eq!(SymmetryRule.check(&decl).len(), 1);
    }

    #[test]
    fn sphere_cannot_be_flat() {
        let decl = Declaration::new(
            "c",
            vec![Form::new(
                "s",
                "Sphere",
                DimensionalClass::Spatial,
                CurvatureClass::Flat,
                "spherical",
            )],
            1e-9,
        );
        let findings = CurvatureRule.check(&decl);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
        assert!(findings[0].message.contains("expected constant"));
    }

    #[test]
    fn unknown_kind_is_not_judged() {
        let decl = Declaration::new(
            "c",
            vec![Form::new(
                "x",
                "Gnomon",
                DimensionalClass::Planar,
                CurvatureClass::Flat,
                "asymmetric",
            )],
            1e-9,
        );
        assert!(CurvatureRule.check(&decl).is_empty());
    }
}
