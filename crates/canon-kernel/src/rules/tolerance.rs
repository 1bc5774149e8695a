//! Tolerance rule: epsilon must be declared and positive.

use super::{CanonRule, article, rule_id};
use crate::declaration::Declaration;
use crate::finding::{Finding, Severity};

/// `epsilon` must be finite and strictly positive.
///
/// Fatal, but unlike the integrity rule it does not abort the remaining
/// rules: the reference graph is still checkable without a tolerance.
pub struct EpsilonRule;

impl CanonRule for EpsilonRule {
    fn id(&self) -> &'static str {
        rule_id::EPSILON
    }

    fn article(&self) -> &'static str {
        article::EPSILON
    }

    fn check(&self, decl: &Declaration) -> Vec<Finding> {
        if decl.epsilon.is_finite() && decl.epsilon > 0.0 {
            return Vec::new();
        }
        vec![Finding::new(
            Severity::Fatal,
            rule_id::EPSILON,
            article::EPSILON,
            format!(
                "epsilon must be declared and positive (got {})",
                decl.epsilon
            ),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{CurvatureClass, DimensionalClass, Form};

    fn with_epsilon(epsilon: f64) -> Declaration {
        Declaration::new(
            "e",
            vec![Form::new(
                "c",
                "Circle",
                DimensionalClass::Planar,
                CurvatureClass::Constant,
                "rotational_infinite",
            )],
            epsilon,
        )
    }

    #[test]
    fn positive_epsilon_passes() {
        assert!(EpsilonRule.check(&with_epsilon(1e-9)).is_empty());
    }

    #[test]
    fn zero_epsilon_is_fatal() {
        let findings = EpsilonRule.check(&with_epsilon(0.0));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Fatal);
        insta::assert_snapshot!(
            findings[0].to_string(),
            @"fatal epsilon (CANON-5): epsilon must be declared and positive (got 0)"
        );
    }

    #[test]
    fn negative_and_non_finite_epsilon_are_fatal() {
        assert_eq!(EpsilonRule.check(&with_epsilon(-1e-9)).len(), 1);
        assert_eq!(EpsilonRule.check(&with_epsilon(f64::NAN)).len(), 1);
        assert_eq!(EpsilonRule.check(&with_epsilon(f64::INFINITY)).len(), 1);
    }
}
