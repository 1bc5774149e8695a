//! Provenance: tracing every realization back to its declaration.
//!
//! A realization without provenance is just a mesh. The provenance record
//! carries the declaration signature, the realizer's identity, the canon
//! articles in force, the tolerance, and the invariants that were in scope —
//! enough to audit any artifact back to the ruling that admitted it.

use crate::signature::Signature;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a realizer implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealizerIdentity {
    pub name: String,
    pub version: String,
}

impl RealizerIdentity {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for RealizerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// The structured warning attached to a bypassed realization.
///
/// Emitted when validation is deliberately skipped; never constructed on the
/// normal path. Consumers surface it as "bypassed — not canon-validated".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BypassNotice {
    pub reason: String,
    pub issued_at: DateTime<Utc>,
}

impl BypassNotice {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            issued_at: Utc::now(),
        }
    }
}

/// Provenance of one realized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    /// Signature of the declaration the form came from.
    pub declaration_signature: Signature,

    /// Which realizer produced the artifact.
    pub realizer: RealizerIdentity,

    /// Canon articles the declaration was judged against.
    pub articles: Vec<String>,

    /// Tolerance in force during realization.
    pub epsilon: f64,

    /// Invariant constraints whose scope covered the realized form.
    pub invariants_checked: Vec<String>,

    /// Present iff validation was bypassed for this realization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bypass: Option<BypassNotice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn realizer_identity_renders() {
        let id = RealizerIdentity::new("disc", "1.0.0");
        assert_eq!(id.to_string(), "disc@1.0.0");
    }

    #[test]
    fn bypass_notice_is_optional_in_serialized_provenance() {
        let provenance = Provenance {
            declaration_signature: Signature("d1_x".into()),
            realizer: RealizerIdentity::new("disc", "1.0.0"),
            articles: vec!["CANON-1".into()],
            epsilon: 1e-9,
            invariants_checked: vec![],
            bypass: None,
        };
        let json = serde_json::to_value(&provenance).expect("serialize");
        assert!(json.get("bypass").is_none());
    }
}
