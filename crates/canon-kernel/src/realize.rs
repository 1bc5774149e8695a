//! Realizer trait, registry, and realization result types.
//!
//! A realizer is the adapter between the engine and an external
//! geometry-building collaborator: it extracts a form's canonical
//! parameters, calls the collaborator for the raw artifact, derives metrics
//! from the same parameters, and assembles provenance. Realizers perform no
//! geometry computation themselves and never re-validate — a form reaching
//! a realizer has already passed the canon (or carries a bypass notice).

use crate::declaration::{Declaration, Form};
use crate::finding::{Finding, Severity};
use crate::provenance::{BypassNotice, Provenance, RealizerIdentity};
use crate::rules::{article, rule_id};
use crate::signature::Signature;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Context handed to a realizer for one dispatch.
///
/// Carries the owning declaration for provenance only; realizers must not
/// use it to re-run validation.
pub struct RealizeContext<'a> {
    pub declaration: &'a Declaration,
    pub signature: &'a Signature,
    pub epsilon: f64,
    pub articles: &'a [String],
    pub bypass: Option<&'a BypassNotice>,
}

impl RealizeContext<'_> {
    /// Assemble the provenance record for a form realized in this context.
    pub fn provenance(&self, realizer: RealizerIdentity, form_id: &str) -> Provenance {
        Provenance {
            declaration_signature: self.signature.clone(),
            realizer,
            articles: self.articles.to_vec(),
            epsilon: self.epsilon,
            invariants_checked: self.declaration.constraints_on(form_id),
            bypass: self.bypass.cloned(),
        }
    }
}

/// A failure inside a realizer or its wrapped collaborator.
///
/// Faults surface to callers as fatal findings on the realize result, not as
/// thrown errors; "this kind cannot be built" is handled like any other
/// failed ruling.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RealizerFault {
    #[error("missing canonical parameter {param:?}")]
    MissingParameter { param: String },

    #[error("parameter {param:?} is out of range: {detail}")]
    ParameterOutOfRange { param: String, detail: String },

    #[error("collaborator failed: {0}")]
    Collaborator(String),
}

/// One realized form: artifact, metrics, provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormRealization {
    pub form_id: String,

    /// Raw artifact from the wrapped collaborator. Opaque to the engine.
    pub artifact: Value,

    /// Derived numeric properties, keyed by metric name.
    pub metrics: BTreeMap<String, f64>,

    pub provenance: Provenance,
}

/// The outcome of one realize call over a whole declaration.
///
/// Failure is expressed as findings, mirroring validation: a rejected
/// verdict, a missing realizer, and a collaborator fault all land here as
/// blocking findings with no artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealizeResult {
    pub signature: Signature,

    /// One realization per declared form, in declaration order. Empty when
    /// the result is a rejection.
    pub realizations: Vec<FormRealization>,

    /// Findings that blocked (or accompanied) realization.
    pub findings: Vec<Finding>,

    /// Present iff validation was bypassed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bypass: Option<BypassNotice>,
}

impl RealizeResult {
    /// Whether realization produced artifacts without blocking findings.
    pub fn ok(&self) -> bool {
        !self.findings.iter().any(|f| f.severity.is_blocking())
    }

    /// The first realization, for single-form declarations.
    pub fn primary(&self) -> Option<&FormRealization> {
        self.realizations.first()
    }

    /// A rejection carrying a failed verdict's findings.
    pub(crate) fn rejected(signature: Signature, findings: Vec<Finding>) -> Self {
        Self {
            signature,
            realizations: Vec::new(),
            findings,
            bypass: None,
        }
    }

    /// A rejection for a kind no registered realizer supports.
    pub(crate) fn no_realizer(
        signature: Signature,
        form: &Form,
        bypass: Option<BypassNotice>,
    ) -> Self {
        Self {
            signature,
            realizations: Vec::new(),
            findings: vec![
                Finding::new(
                    Severity::Fatal,
                    rule_id::NO_REALIZER,
                    article::REALIZATION,
                    format!("no realizer for kind {:?}", form.kind),
                )
                .on_form(&form.id),
            ],
            bypass,
        }
    }

    /// A rejection for a realizer/collaborator fault.
    pub(crate) fn faulted(
        signature: Signature,
        form: &Form,
        fault: RealizerFault,
        bypass: Option<BypassNotice>,
    ) -> Self {
        Self {
            signature,
            realizations: Vec::new(),
            findings: vec![
                Finding::new(
                    Severity::Fatal,
                    rule_id::REALIZER_FAILURE,
                    article::REALIZATION,
                    fault.to_string(),
                )
                .on_form(&form.id),
            ],
            bypass,
        }
    }
}

/// A component that turns validated forms into concrete artifacts.
pub trait Realizer: Send + Sync {
    /// Identity recorded in provenance.
    fn identity(&self) -> RealizerIdentity;

    /// Form kinds this realizer can build.
    fn supported_kinds(&self) -> &[&str];

    /// Build one form. The context is for provenance, never re-validation.
    fn realize_form(
        &self,
        form: &Form,
        ctx: &RealizeContext<'_>,
    ) -> Result<FormRealization, RealizerFault>;
}

/// Lookup table from form kind to realizer.
///
/// Registration is an explicit call at startup; the registry is injected
/// into the engine so that differently-equipped engines can coexist. The
/// first registrant for a kind wins.
#[derive(Default)]
pub struct RealizerRegistry {
    entries: Vec<Arc<dyn Realizer>>,
}

impl RealizerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a realizer for every kind it supports.
    pub fn register(&mut self, realizer: Arc<dyn Realizer>) {
        self.entries.push(realizer);
    }

    /// Find the realizer for a kind, if any.
    pub fn for_kind(&self, kind: &str) -> Option<Arc<dyn Realizer>> {
        self.entries
            .iter()
            .find(|r| r.supported_kinds().contains(&kind))
            .cloned()
    }

    /// All supported kinds, sorted and deduplicated.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self
            .entries
            .iter()
            .flat_map(|r| r.supported_kinds().iter().copied())
            .collect();
        kinds.sort_unstable();
        kinds.dedup();
        kinds
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
