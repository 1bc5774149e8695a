//! Explicitness rules: whatever shapes the geometry must be declared.
//!
//! Orientation, motion, reflection, truncation, and negative space may never
//! be implied by parameter tricks or evaluation order. Each of these rules
//! checks one way an author could smuggle geometry past the declaration.

use super::{CanonRule, article, rule_id};
use crate::declaration::{Declaration, Form};
use crate::finding::{Finding, Severity};

/// Kinds whose geometry depends on a spatial orientation.
const ORIENTATION_SENSITIVE_KINDS: &[&str] = &[
    "Arch",
    "Cone",
    "Crescent",
    "Prism",
    "Pyramid",
    "Spiral",
    "TruncatedCone",
    "TruncatedPyramid",
];

/// Parameter prefixes that count as an explicit orientation declaration.
const ORIENTATION_PARAM_PREFIXES: &[&str] = &["orientation", "rotation", "axis_"];

/// Rate-style parameters that imply motion.
const RATE_PARAMS: &[&str] = &["angular_velocity", "frequency", "rate", "speed", "velocity"];

/// Relation kinds whose first endpoint is carved out as negative space.
const CARVING_RELATIONS: &[&str] = &["carved-from", "subtracted-from"];

fn declares_orientation(form: &Form) -> bool {
    ORIENTATION_PARAM_PREFIXES
        .iter()
        .any(|prefix| form.has_param_prefix(prefix))
        || form.notes.contains("orientation:")
}

/// Orientation-sensitive kinds must declare their orientation.
pub struct OrientationRule;

impl CanonRule for OrientationRule {
    fn id(&self) -> &'static str {
        rule_id::ORIENTATION
    }

    fn article(&self) -> &'static str {
        article::ORIENTATION
    }

    fn check(&self, decl: &Declaration) -> Vec<Finding> {
        decl.forms
            .iter()
            .filter(|form| ORIENTATION_SENSITIVE_KINDS.contains(&form.kind.as_str()))
            .filter(|form| !declares_orientation(form))
            .map(|form| {
                Finding::new(
                    Severity::Error,
                    rule_id::ORIENTATION,
                    article::ORIENTATION,
                    format!(
                        "{} is orientation-sensitive but declares no orientation",
                        form.kind
                    ),
                )
                .on_form(&form.id)
            })
            .collect()
    }
}

/// Motion must be an explicit parameter, never a side effect.
///
/// Two violations: a trace with an unnamed parameter, and a rate-style form
/// parameter on a form no trace drives (implicit motion).
pub struct MotionParameterRule;

impl CanonRule for MotionParameterRule {
    fn id(&self) -> &'static str {
        rule_id::MOTION_PARAMETER
    }

    fn article(&self) -> &'static str {
        article::MOTION_PARAMETER
    }

    fn check(&self, decl: &Declaration) -> Vec<Finding> {
        let mut findings = Vec::new();

        for trace in &decl.traces {
            if trace.parameter.name.is_empty() {
                findings.push(Finding::new(
                    Severity::Error,
                    rule_id::MOTION_PARAMETER,
                    article::MOTION_PARAMETER,
                    format!(
                        "trace {:?} must name its {} parameter",
                        trace.id, trace.parameter.domain
                    ),
                ));
            }
        }

        for form in &decl.forms {
            let rates: Vec<&str> = form
                .params
                .keys()
                .map(String::as_str)
                .filter(|k| RATE_PARAMS.contains(k))
                .collect();
            if !rates.is_empty() && !decl.is_traced(&form.id) {
                findings.push(
                    Finding::new(
                        Severity::Error,
                        rule_id::MOTION_PARAMETER,
                        article::MOTION_PARAMETER,
                        format!(
                            "params [{}] imply motion but no trace drives this form",
                            rates.join(", ")
                        ),
                    )
                    .on_form(&form.id),
                );
            }
        }

        findings
    }
}

/// Mirrored geometry must be its own declared form.
///
/// A negative scale factor or a `mirror` parameter reflects a form in place;
/// the canon requires the reflected copy to be a distinct form joined by an
/// explicit "mirror-of" relation.
pub struct ReflectionRule;

impl CanonRule for ReflectionRule {
    fn id(&self) -> &'static str {
        rule_id::REFLECTION
    }

    fn article(&self) -> &'static str {
        article::REFLECTION
    }

    fn check(&self, decl: &Declaration) -> Vec<Finding> {
        let mut findings = Vec::new();

        for form in &decl.forms {
            for (key, value) in &form.params {
                let negative_scale = key.starts_with("scale") && *value < 0.0;
                let mirror_flag = key.starts_with("mirror") && *value != 0.0;
                if negative_scale || mirror_flag {
                    findings.push(
                        Finding::new(
                            Severity::Warning,
                            rule_id::REFLECTION,
                            article::REFLECTION,
                            format!(
                                "param {key} implies an implicit reflection; declare the \
                                 mirrored copy as its own form with a mirror-of relation"
                            ),
                        )
                        .on_form(&form.id),
                    );
                }
            }
        }

        findings
    }
}

/// Truncated solids must declare their truncation ratio.
pub struct TruncationRule;

impl CanonRule for TruncationRule {
    fn id(&self) -> &'static str {
        rule_id::TRUNCATION
    }

    fn article(&self) -> &'static str {
        article::TRUNCATION
    }

    fn check(&self, decl: &Declaration) -> Vec<Finding> {
        let mut findings = Vec::new();

        for form in &decl.forms {
            if !form.kind.starts_with("Truncated") {
                continue;
            }
            match form.param("truncation_ratio") {
                None => findings.push(
                    Finding::new(
                        Severity::Error,
                        rule_id::TRUNCATION,
                        article::TRUNCATION,
                        format!("{} must declare truncation_ratio in params", form.kind),
                    )
                    .on_form(&form.id),
                ),
                Some(ratio) if !(ratio > 0.0 && ratio < 1.0) => findings.push(
                    Finding::new(
                        Severity::Error,
                        rule_id::TRUNCATION,
                        article::TRUNCATION,
                        format!("truncation_ratio must lie strictly in (0, 1), got {ratio}"),
                    )
                    .on_form(&form.id),
                ),
                Some(_) => {}
            }
        }

        findings
    }
}

/// Negative space must be tagged, not implied.
///
/// The first endpoint of a carving relation is the carved shape; it must be
/// tagged as a void (a `Void*` kind or a nonzero `void` param).
pub struct VoidRule;

impl CanonRule for VoidRule {
    fn id(&self) -> &'static str {
        rule_id::VOID
    }

    fn article(&self) -> &'static str {
        article::VOID
    }

    fn check(&self, decl: &Declaration) -> Vec<Finding> {
        let mut findings = Vec::new();

        for relation in &decl.relations {
            if !CARVING_RELATIONS.contains(&relation.kind.as_str()) {
                continue;
            }
            let Some(carved_id) = relation.form_ids.first() else {
                continue;
            };
            let Some(carved) = decl.form(carved_id) else {
                continue; // dangling ids are the integrity rule's concern
            };
            if !carved.is_void_tagged() {
                findings.push(
                    Finding::new(
                        Severity::Warning,
                        rule_id::VOID,
                        article::VOID,
                        format!(
                            "form is carved out by a {:?} relation but is not tagged as a void",
                            relation.kind
                        ),
                    )
                    .on_form(carved_id),
                );
            }
        }

        findings
    }
}
