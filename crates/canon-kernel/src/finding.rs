//! Structured diagnostics: findings and verdicts.
//!
//! Rule violations are data, never exceptions. Each rule emits findings; the
//! engine aggregates them into a verdict whose `ok` flag gates realization.

use crate::signature::Signature;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity, ordered.
///
/// `Error` and above block realization; `Fatal` findings from the integrity
/// rule additionally abort the remaining rules.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    /// Whether a finding at this severity fails a verdict.
    pub fn is_blocking(self) -> bool {
        self >= Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
            Self::Fatal => write!(f, "fatal"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            _ => Err(format!("unknown severity: {s}")),
        }
    }
}

/// One diagnostic entry produced by a validation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,

    /// Stable id of the emitting rule.
    pub rule_id: String,

    /// Human-readable description of the violation.
    pub message: String,

    /// The offending form, when the violation is local to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,

    /// Canon article reference (e.g. "CANON-5").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article: Option<String>,
}

impl Finding {
    pub fn new(
        severity: Severity,
        rule_id: impl Into<String>,
        article: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            rule_id: rule_id.into(),
            message: message.into(),
            form_id: None,
            article: Some(article.into()),
        }
    }

    /// Attach the offending form id.
    pub fn on_form(mut self, form_id: impl Into<String>) -> Self {
        self.form_id = Some(form_id.into());
        self
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.severity, self.rule_id)?;
        if let Some(article) = &self.article {
            write!(f, " ({article})")?;
        }
        if let Some(form_id) = &self.form_id {
            write!(f, " [form {form_id}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// The aggregate result of validating one declaration.
///
/// A verdict is a value, not a cache: `validate` builds a fresh one on every
/// call, and two verdicts over the same declaration carry the same signature
/// and the same ordered findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// True iff no finding is at `Error` severity or above.
    pub ok: bool,

    /// Findings in rule order, then emission order within a rule.
    pub findings: Vec<Finding>,

    /// Signature of the judged declaration.
    pub signature: Signature,

    pub validated_at: DateTime<Utc>,
}

impl Verdict {
    /// Assemble a verdict, deriving `ok` from the findings.
    pub fn from_findings(signature: Signature, findings: Vec<Finding>) -> Self {
        let ok = !findings.iter().any(|f| f.severity.is_blocking());
        Self {
            ok,
            findings,
            signature,
            validated_at: Utc::now(),
        }
    }

    /// Findings at or above the given severity.
    pub fn findings_at_least(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity >= severity)
    }

    /// Whether any finding is fatal.
    pub fn has_fatal(&self) -> bool {
        self.findings_at_least(Severity::Fatal).next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig() -> Signature {
        Signature("d1_test".into())
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Fatal > Severity::Error);
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
        assert!(Severity::Error.is_blocking());
        assert!(Severity::Fatal.is_blocking());
        assert!(!Severity::Warning.is_blocking());
    }

    #[test]
    fn verdict_ok_gating() {
        let clean = Verdict::from_findings(sig(), vec![]);
        assert!(clean.ok);

        let warned = Verdict::from_findings(
            sig(),
            vec![Finding::new(
                Severity::Warning,
                "symmetry",
                "CANON-7",
                "unknown symmetry class",
            )],
        );
        assert!(warned.ok, "warnings do not fail a verdict");

        let failed = Verdict::from_findings(
            sig(),
            vec![
                Finding::new(Severity::Info, "curvature", "CANON-8", "note"),
                Finding::new(Severity::Error, "curvature", "CANON-8", "inconsistent"),
            ],
        );
        assert!(!failed.ok);
        assert!(!failed.has_fatal());
    }

    #[test]
    fn finding_renders_with_locators() {
        let finding = Finding::new(
            Severity::Fatal,
            "epsilon",
            "CANON-5",
            "epsilon must be positive",
        )
        .on_form("c1");

        insta::assert_snapshot!(
            finding.to_string(),
            @"fatal epsilon (CANON-5) [form c1]: epsilon must be positive"
        );
    }

    #[test]
    fn severity_serde_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&Severity::Warning).expect("serialize"),
            r#""warning""#
        );
        let back: Severity = serde_json::from_str(r#""fatal""#).expect("deserialize");
        assert_eq!(back, Severity::Fatal);
    }
}
