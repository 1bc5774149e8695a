//! The verdict store interface and the in-memory store.
//!
//! Case law is read-mostly: many lookups per stored ruling. Stores are
//! keyed by declaration signature, so a hit is exactly as trustworthy as a
//! fresh validation — the signature covers every field a rule can see.

use crate::CaseLawError;
use canon_kernel::{Signature, Verdict};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// A content-addressed archive of verdicts.
///
/// Implementations must tolerate racing stores for the same signature:
/// validation is deterministic, so last-write-wins is correct.
pub trait VerdictStore: Send + Sync {
    fn load(&self, signature: &Signature) -> Result<Option<Verdict>, CaseLawError>;

    fn store(&self, signature: &Signature, verdict: &Verdict) -> Result<(), CaseLawError>;
}

/// Lock-guarded in-memory store.
#[derive(Default)]
pub struct MemoryStore {
    rulings: Mutex<BTreeMap<String, Verdict>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rulings.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl VerdictStore for MemoryStore {
    fn load(&self, signature: &Signature) -> Result<Option<Verdict>, CaseLawError> {
        let rulings = self.rulings.lock().map_err(|_| CaseLawError::Poisoned)?;
        Ok(rulings.get(signature.as_str()).cloned())
    }

    fn store(&self, signature: &Signature, verdict: &Verdict) -> Result<(), CaseLawError> {
        let mut rulings = self.rulings.lock().map_err(|_| CaseLawError::Poisoned)?;
        rulings.insert(signature.as_str().to_string(), verdict.clone());
        Ok(())
    }
}
