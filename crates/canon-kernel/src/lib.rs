//! # Canon Kernel
//!
//! A declarative specification, validation, and realization engine for
//! geometric form: callers describe a construction as an immutable
//! `Declaration`, the engine judges it against an ordered rule set (the
//! canon), and only a declaration that passes may be realized into a
//! concrete artifact.
//!
//! This crate is **form-agnostic**: it does not build geometry. Realizers
//! wrap external geometry collaborators; the kernel only decides
//! admissibility and routes validated forms to them.
//!
//! ## Architecture
//!
//! ```text
//! Declaration            ← Immutable AST: forms, relations, constraints, epsilon
//!     │
//! Signature              ← Content address over the semantic fields
//!     │
//! CanonRule × 9          ← Pure, ordered, independent inspections
//!     │
//! Verdict                ← Findings + ok gate (no finding ≥ Error)
//!     │
//! CanonEngine.realize    ← Bypass guard + registry dispatch
//!     │
//! FormRealization        ← Artifact + metrics + provenance
//! ```

pub mod declaration;
pub mod engine;
pub mod error;
pub mod finding;
pub mod provenance;
pub mod realize;
pub mod rules;
pub mod signature;
pub mod worker;

pub use declaration::{
    ConstraintExpr, CurvatureClass, Declaration, DimensionalClass, Form, InvariantConstraint,
    MotionParameter, ParameterDomain, Relation, Trace,
};
pub use engine::{CanonEngine, RealizeOptions};
pub use error::CanonError;
pub use finding::{Finding, Severity, Verdict};
pub use provenance::{BypassNotice, Provenance, RealizerIdentity};
pub use realize::{
    FormRealization, RealizeContext, RealizeResult, Realizer, RealizerFault, RealizerRegistry,
};
pub use rules::{CanonRule, builtin_rules};
pub use signature::{Signature, SignaturePolicy};
pub use worker::{CancelHandle, CancelToken, RealizeBudget, cancel_pair, realize_on_worker};
