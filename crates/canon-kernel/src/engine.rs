//! The Canon engine: rule orchestration and realization dispatch.
//!
//! `validate` runs the ordered rule set over a declaration and returns a
//! verdict; `realize` turns a validated declaration into artifacts through
//! the realizer registry. The engine owns the bypass-safety contract: no
//! realization ever proceeds past a failed verdict, and skipping validation
//! requires an explicit two-flag opt-in that leaves a trace in provenance.

use crate::declaration::Declaration;
use crate::error::CanonError;
use crate::finding::{Finding, Verdict};
use crate::provenance::BypassNotice;
use crate::realize::{RealizeContext, RealizeResult, RealizerRegistry};
use crate::rules::CanonRule;
use crate::signature::{Signature, SignaturePolicy};

/// Options for one realize call.
///
/// The defaults are the safe path. `skip_validation` alone is refused;
/// adding `allow_bypass` proceeds but marks the output as bypassed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RealizeOptions {
    pub skip_validation: bool,
    pub allow_bypass: bool,
}

/// Orchestrates rule execution and realizer dispatch.
///
/// Rules and registry are injected at construction; there is no global
/// engine. Two engines with different rule sets or registries coexist
/// without interference, which is also how a single rule is tested in
/// isolation.
pub struct CanonEngine {
    rules: Vec<Box<dyn CanonRule>>,
    registry: RealizerRegistry,
    signature_policy: SignaturePolicy,
}

impl CanonEngine {
    pub fn new(rules: Vec<Box<dyn CanonRule>>, registry: RealizerRegistry) -> Self {
        Self {
            rules,
            registry,
            signature_policy: SignaturePolicy::default(),
        }
    }

    /// Override the signature policy (annotation participation).
    pub fn with_signature_policy(mut self, policy: SignaturePolicy) -> Self {
        self.signature_policy = policy;
        self
    }

    /// The signature of a declaration under this engine's policy.
    pub fn signature_of(&self, decl: &Declaration) -> Signature {
        decl.signature_with(self.signature_policy)
    }

    /// Canon articles enforced by this engine's rule set.
    pub fn articles(&self) -> Vec<String> {
        self.rules.iter().map(|r| r.article().to_string()).collect()
    }

    /// Judge a declaration against the canon.
    ///
    /// Pure: no shared state is touched, and an unchanged declaration always
    /// yields the same signature and the same ordered findings. The first
    /// rule is the integrity rule; any fatal finding from it aborts the
    /// remaining rules and fails the verdict immediately.
    pub fn validate(&self, decl: &Declaration) -> Verdict {
        let signature = self.signature_of(decl);
        let mut findings: Vec<Finding> = Vec::new();

        let mut rules = self.rules.iter();
        if let Some(first) = rules.next() {
            findings.extend(first.check(decl));
            if findings.iter().any(|f| f.severity == crate::finding::Severity::Fatal) {
                return Verdict::from_findings(signature, findings);
            }
        }

        for rule in rules {
            findings.extend(rule.check(decl));
        }

        Verdict::from_findings(signature, findings)
    }

    /// Realize a declaration into artifacts.
    ///
    /// The default path validates first and refuses to proceed past a failed
    /// verdict, returning the verdict's findings on a rejection result.
    /// Runtime conditions of the realization machinery (a missing realizer,
    /// a collaborator fault) are also rejection results; the only thrown
    /// error is the bypass refusal.
    pub fn realize(
        &self,
        decl: &Declaration,
        opts: RealizeOptions,
    ) -> Result<RealizeResult, CanonError> {
        let signature = self.signature_of(decl);

        let bypass = if opts.skip_validation {
            if !opts.allow_bypass {
                return Err(CanonError::ValidationBypass);
            }
            let notice =
                BypassNotice::new("realization requested without canon validation");
            log::warn!(
                "canon bypass: realizing {signature} without validation; output is not canon-validated"
            );
            Some(notice)
        } else {
            let verdict = self.validate(decl);
            if !verdict.ok {
                return Ok(RealizeResult::rejected(signature, verdict.findings));
            }
            None
        };

        let articles = self.articles();
        let ctx = RealizeContext {
            declaration: decl,
            signature: &signature,
            epsilon: decl.epsilon,
            articles: &articles,
            bypass: bypass.as_ref(),
        };

        let mut realizations = Vec::with_capacity(decl.forms.len());
        for form in &decl.forms {
            let Some(realizer) = self.registry.for_kind(&form.kind) else {
                return Ok(RealizeResult::no_realizer(
                    signature.clone(),
                    form,
                    bypass.clone(),
                ));
            };
            match realizer.realize_form(form, &ctx) {
                Ok(realization) => realizations.push(realization),
                Err(fault) => {
                    log::debug!("realizer fault on form {}: {fault}", form.id);
                    return Ok(RealizeResult::faulted(
                        signature.clone(),
                        form,
                        fault,
                        bypass.clone(),
                    ));
                }
            }
        }

        Ok(RealizeResult {
            signature,
            realizations,
            findings: Vec::new(),
            bypass,
        })
    }
}
