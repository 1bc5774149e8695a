//! The canon: the fixed, ordered rule set.
//!
//! Each rule is a pure inspection of one declaration. Rules share no state,
//! never suppress each other's findings, and their order only affects the
//! presentation order of findings — with one exception: a fatal finding from
//! the integrity rule aborts the remaining rules, because a malformed
//! reference graph cannot be meaningfully checked further.
//!
//! Registration is explicit: engines are built from a rule list, never from
//! import-time side effects, so a test can run a single rule in isolation.

mod classes;
mod explicitness;
mod integrity;
mod tolerance;

pub use classes::{CurvatureRule, SymmetryRule};
pub use explicitness::{
    MotionParameterRule, OrientationRule, ReflectionRule, TruncationRule, VoidRule,
};
pub use integrity::IntegrityRule;
pub use tolerance::EpsilonRule;

use crate::declaration::Declaration;
use crate::finding::Finding;

/// A single canon rule.
///
/// `check` is pure: no shared state, no side effects, no ordering
/// dependencies on other rules.
pub trait CanonRule: Send + Sync {
    /// Stable rule id, used in findings and tooling.
    fn id(&self) -> &'static str;

    /// Canon article this rule enforces.
    fn article(&self) -> &'static str;

    /// Inspect a declaration and emit zero or more findings.
    fn check(&self, decl: &Declaration) -> Vec<Finding>;
}

/// The built-in rule set, in canonical order.
///
/// The integrity rule is always first; `CanonEngine::validate` relies on
/// that position for its short-circuit contract.
pub fn builtin_rules() -> Vec<Box<dyn CanonRule>> {
    vec![
        Box::new(IntegrityRule),
        Box::new(OrientationRule),
        Box::new(MotionParameterRule),
        Box::new(ReflectionRule),
        Box::new(EpsilonRule),
        Box::new(TruncationRule),
        Box::new(SymmetryRule),
        Box::new(CurvatureRule),
        Box::new(VoidRule),
    ]
}

/// Stable rule ids.
pub mod rule_id {
    pub const INTEGRITY: &str = "integrity";
    pub const ORIENTATION: &str = "orientation";
    pub const MOTION_PARAMETER: &str = "motion-parameter";
    pub const REFLECTION: &str = "reflection";
    pub const EPSILON: &str = "epsilon";
    pub const TRUNCATION: &str = "truncation";
    pub const SYMMETRY: &str = "symmetry";
    pub const CURVATURE: &str = "curvature";
    pub const VOID: &str = "void";

    /// Engine-emitted ids for realization-path findings.
    pub const NO_REALIZER: &str = "no-realizer";
    pub const REALIZER_FAILURE: &str = "realizer-failure";
}

/// Canon article references.
pub mod article {
    pub const INTEGRITY: &str = "CANON-1";
    pub const ORIENTATION: &str = "CANON-2";
    pub const MOTION_PARAMETER: &str = "CANON-3";
    pub const REFLECTION: &str = "CANON-4";
    pub const EPSILON: &str = "CANON-5";
    pub const TRUNCATION: &str = "CANON-6";
    pub const SYMMETRY: &str = "CANON-7";
    pub const CURVATURE: &str = "CANON-8";
    pub const VOID: &str = "CANON-9";

    /// Article governing realization dispatch itself.
    pub const REALIZATION: &str = "CANON-10";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rules_are_ordered_and_complete() {
        let rules = builtin_rules();
        let ids: Vec<&str> = rules.iter().map(|r| r.id()).collect();
        assert_eq!(
            ids,
            vec![
                rule_id::INTEGRITY,
                rule_id::ORIENTATION,
                rule_id::MOTION_PARAMETER,
                rule_id::REFLECTION,
                rule_id::EPSILON,
                rule_id::TRUNCATION,
                rule_id::SYMMETRY,
                rule_id::CURVATURE,
                rule_id::VOID,
            ]
        );
        assert_eq!(rules[0].article(), article::INTEGRITY);
    }
}
