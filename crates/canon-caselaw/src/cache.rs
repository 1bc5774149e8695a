//! Caching validator: consult case law before re-judging.
//!
//! The cache wraps the engine rather than living inside `Declaration`, so
//! the engine stays pure and differently-backed caches can coexist. A miss
//! computes and archives; a race on the same signature recomputes twice with
//! identical results, which is wasteful but never wrong.

use crate::CaseLawError;
use crate::store::VerdictStore;
use canon_kernel::{CanonEngine, Declaration, Verdict};

/// An engine paired with a verdict archive.
pub struct CachedValidator<'a, S: VerdictStore> {
    engine: &'a CanonEngine,
    store: &'a S,
}

impl<'a, S: VerdictStore> CachedValidator<'a, S> {
    pub fn new(engine: &'a CanonEngine, store: &'a S) -> Self {
        Self { engine, store }
    }

    /// Validate through the archive.
    ///
    /// The signature is computed under the engine's policy, so a cache key
    /// always matches what a fresh validation would stamp on its verdict.
    pub fn validate(&self, decl: &Declaration) -> Result<Verdict, CaseLawError> {
        let signature = self.engine.signature_of(decl);
        if let Some(ruling) = self.store.load(&signature)? {
            return Ok(ruling);
        }
        let verdict = self.engine.validate(decl);
        self.store.store(&signature, &verdict)?;
        Ok(verdict)
    }
}
