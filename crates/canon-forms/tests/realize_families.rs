//! End-to-end: solver → validate → realize for every built-in family.

use canon_forms::{solver, standard_engine};
use canon_kernel::{RealizeOptions, Severity};

fn metric(result: &canon_kernel::RealizeResult, name: &str) -> f64 {
    *result
        .primary()
        .expect("one realization")
        .metrics
        .get(name)
        .unwrap_or_else(|| panic!("metric {name} missing"))
}

#[test]
fn circle_of_radius_ten() {
    let engine = standard_engine();
    let decl = solver::circle(10.0);

    let verdict = engine.validate(&decl);
    assert!(verdict.ok, "findings: {:?}", verdict.findings);
    assert!(verdict.findings.is_empty());

    let result = engine
        .realize(&decl, RealizeOptions::default())
        .expect("realizes");
    assert!(result.ok());
    assert!((metric(&result, "area") - 314.159265).abs() < 1e-5);
    assert!((metric(&result, "circumference") - 62.83185).abs() < 1e-4);
}

#[test]
fn circle_with_zero_epsilon_is_fatally_rejected() {
    let engine = standard_engine();
    let mut decl = solver::circle(10.0);
    decl.epsilon = 0.0;

    let verdict = engine.validate(&decl);
    assert!(!verdict.ok);
    let fatal: Vec<_> = verdict.findings_at_least(Severity::Fatal).collect();
    assert_eq!(fatal.len(), 1);
    assert_eq!(fatal[0].rule_id, "epsilon");
}

#[test]
fn sphere_metrics() {
    let engine = standard_engine();
    let decl = solver::sphere(2.0);
    assert!(engine.validate(&decl).ok);

    let result = engine
        .realize(&decl, RealizeOptions::default())
        .expect("realizes");
    assert!(result.ok());
    let expected_area = 4.0 * std::f64::consts::PI * 4.0;
    let expected_volume = 4.0 / 3.0 * std::f64::consts::PI * 8.0;
    assert!((metric(&result, "surface_area") - expected_area).abs() < 1e-9);
    assert!((metric(&result, "volume") - expected_volume).abs() < 1e-9);
}

#[test]
fn hexagon_metrics() {
    let engine = standard_engine();
    let decl = solver::regular_polygon(6, 1.0);
    assert!(engine.validate(&decl).ok);

    let result = engine
        .realize(&decl, RealizeOptions::default())
        .expect("realizes");
    // Unit hexagon: area = 3√3/2, perimeter = 6.
    assert!((metric(&result, "area") - 1.5 * 3.0_f64.sqrt()).abs() < 1e-9);
    assert!((metric(&result, "perimeter") - 6.0).abs() < 1e-9);
}

#[test]
fn truncated_pyramid_declares_and_realizes() {
    let engine = standard_engine();
    let decl = solver::truncated_pyramid(2.0, 3.0, 0.5);

    let verdict = engine.validate(&decl);
    assert!(verdict.ok, "findings: {:?}", verdict.findings);

    let result = engine
        .realize(&decl, RealizeOptions::default())
        .expect("realizes");
    // A=4, top=1, h=3 → V = 4 + 1 + 2 = 7
    assert!((metric(&result, "volume") - 7.0).abs() < 1e-9);
}

#[test]
fn undeclared_truncation_is_caught_before_realization() {
    let engine = standard_engine();
    let mut decl = solver::truncated_pyramid(2.0, 3.0, 0.5);
    decl.forms[0].params.remove("truncation_ratio");

    let result = engine
        .realize(&decl, RealizeOptions::default())
        .expect("rejection is not an error");
    assert!(!result.ok());
    assert!(result.realizations.is_empty());
    assert!(result.findings.iter().any(|f| f.rule_id == "truncation"));
}

#[test]
fn every_solver_family_realizes_cleanly() {
    let engine = standard_engine();
    for decl in [
        solver::circle(1.0),
        solver::sphere(1.0),
        solver::regular_polygon(5, 1.0),
        solver::truncated_pyramid(1.0, 1.0, 0.5),
    ] {
        let verdict = engine.validate(&decl);
        assert!(verdict.ok, "{}: {:?}", decl.title, verdict.findings);
        let result = engine
            .realize(&decl, RealizeOptions::default())
            .expect("realizes");
        assert!(result.ok(), "{}: {:?}", decl.title, result.findings);
        let provenance = &result.primary().expect("realized").provenance;
        assert_eq!(provenance.declaration_signature, engine.signature_of(&decl));
    }
}
