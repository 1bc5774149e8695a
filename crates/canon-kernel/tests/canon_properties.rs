//! The engine's contract, exercised through the public API only.

use canon_kernel::{
    CanonEngine, CanonError, CurvatureClass, Declaration, DimensionalClass, Form,
    FormRealization, RealizeContext, RealizeOptions, Realizer, RealizerFault, RealizerIdentity,
    RealizerRegistry, Severity, builtin_rules,
};
use std::collections::BTreeMap;
use std::f64::consts::{PI, TAU};
use std::sync::Arc;

/// A stand-in for a geometry service collaborator.
struct StubDiscRealizer;

impl Realizer for StubDiscRealizer {
    fn identity(&self) -> RealizerIdentity {
        RealizerIdentity::new("stub-disc", "0.0.0")
    }

    fn supported_kinds(&self) -> &[&str] {
        &["Circle"]
    }

    fn realize_form(
        &self,
        form: &Form,
        ctx: &RealizeContext<'_>,
    ) -> Result<FormRealization, RealizerFault> {
        let radius = form
            .param("radius")
            .ok_or_else(|| RealizerFault::MissingParameter {
                param: "radius".into(),
            })?;
        let mut metrics = BTreeMap::new();
        metrics.insert("area".to_string(), PI * radius * radius);
        metrics.insert("circumference".to_string(), TAU * radius);
        Ok(FormRealization {
            form_id: form.id.clone(),
            artifact: serde_json::json!({ "radius": radius }),
            metrics,
            provenance: ctx.provenance(self.identity(), &form.id),
        })
    }
}

fn engine() -> CanonEngine {
    let mut registry = RealizerRegistry::new();
    registry.register(Arc::new(StubDiscRealizer));
    CanonEngine::new(builtin_rules(), registry)
}

fn circle(id: &str, radius: f64) -> Form {
    Form::new(
        id,
        "Circle",
        DimensionalClass::Planar,
        CurvatureClass::Constant,
        "rotational_infinite",
    )
    .with_param("radius", radius)
}

#[test]
fn validate_twice_yields_identical_verdicts() {
    let engine = engine();
    let decl = Declaration::new("Circle r=10", vec![circle("c1", 10.0)], 1e-9);

    let first = engine.validate(&decl);
    let second = engine.validate(&decl);
    assert_eq!(first.signature, second.signature);
    assert_eq!(first.findings, second.findings);
}

#[test]
fn signature_tracks_semantics_not_annotations() {
    let base = Declaration::new("Circle r=10", vec![circle("c1", 10.0)], 1e-9);

    let mut resized = base.clone();
    resized.forms[0].params.insert("radius".into(), 12.0);
    assert_ne!(base.signature(), resized.signature());

    let mut retolerated = base.clone();
    retolerated.epsilon = 1e-6;
    assert_ne!(base.signature(), retolerated.signature());

    let mut annotated = base.clone();
    annotated.title = "a rounder circle".into();
    annotated.metadata.insert("author".into(), "euclid".into());
    assert_eq!(base.signature(), annotated.signature());
}

#[test]
fn skip_validation_without_allow_bypass_raises_and_produces_nothing() {
    let engine = engine();
    let decl = Declaration::new("Circle r=10", vec![circle("c1", 10.0)], 1e-9);
    let err = engine
        .realize(
            &decl,
            RealizeOptions {
                skip_validation: true,
                allow_bypass: false,
            },
        )
        .expect_err("bypass must be refused");
    assert!(matches!(err, CanonError::ValidationBypass));
}

#[test]
fn duplicate_ids_produce_exactly_one_fatal_and_nothing_else() {
    let engine = engine();
    // The zero epsilon would be its own fatal, but integrity short-circuits.
    let decl = Declaration::new("twins", vec![circle("a", 1.0), circle("a", 2.0)], 0.0);
    let verdict = engine.validate(&decl);
    assert!(!verdict.ok);
    assert_eq!(verdict.findings.len(), 1);
    assert_eq!(verdict.findings[0].severity, Severity::Fatal);
    assert!(verdict.findings[0].message.contains("a"));
}

#[test]
fn ok_gates_on_error_severity() {
    let engine = engine();

    // An inadmissible symmetry class warns; the verdict still passes.
    let mut warned_form = circle("c1", 10.0);
    warned_form.symmetry_class = "septilateral".into();
    let warned = Declaration::new("warned", vec![warned_form], 1e-9);
    let verdict = engine.validate(&warned);
    assert!(!verdict.findings.is_empty());
    assert!(verdict.ok);

    // An inconsistent curvature errors; the verdict fails.
    let mut errored_form = circle("c1", 10.0);
    errored_form.curvature_class = CurvatureClass::Flat;
    let errored = Declaration::new("errored", vec![errored_form], 1e-9);
    assert!(!engine.validate(&errored).ok);
}

#[test]
fn unregistered_kind_fails_without_panicking() {
    let engine = engine();
    let form = Form::new(
        "f1",
        "Frobnicator",
        DimensionalClass::Planar,
        CurvatureClass::Flat,
        "asymmetric",
    );
    let decl = Declaration::new("mystery", vec![form], 1e-9);
    assert!(engine.validate(&decl).ok, "unknown kinds validate fine");

    let result = engine
        .realize(&decl, RealizeOptions::default())
        .expect("missing realizer is a finding, not an error");
    assert!(!result.ok());
    assert_eq!(result.findings[0].severity, Severity::Fatal);
    assert!(result.findings[0].message.contains("Frobnicator"));
}

#[test]
fn end_to_end_circle() {
    let engine = engine();
    let decl = Declaration::new("Circle r=10", vec![circle("c1", 10.0)], 1e-9);

    let verdict = engine.validate(&decl);
    assert!(verdict.ok);
    assert!(verdict.findings.is_empty());

    let result = engine
        .realize(&decl, RealizeOptions::default())
        .expect("realizes");
    let metrics = &result.primary().expect("one realization").metrics;
    assert!((metrics["area"] - 314.159265).abs() < 1e-5);
    assert!((metrics["circumference"] - 62.83185).abs() < 1e-4);
}

#[test]
fn zero_epsilon_is_fatal() {
    let engine = engine();
    let decl = Declaration::new("Circle r=10", vec![circle("c1", 10.0)], 0.0);
    let verdict = engine.validate(&decl);
    assert!(!verdict.ok);
    let fatal: Vec<_> = verdict.findings_at_least(Severity::Fatal).collect();
    assert_eq!(fatal.len(), 1);
    assert!(fatal[0].message.contains("epsilon"));
}
