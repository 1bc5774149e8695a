//! # Canon Case Law
//!
//! A content-addressed archive of verdicts: `signature -> Verdict`.
//! Validation is deterministic, so a ruling archived under a declaration's
//! signature is exactly as authoritative as re-running the rules — the
//! archive exists to avoid recomputation across sessions, never to change
//! outcomes.

pub mod cache;
pub mod jsonl;
pub mod store;

pub use cache::CachedValidator;
pub use jsonl::{CaseRecord, JsonlStore};
pub use store::{MemoryStore, VerdictStore};

/// Errors raised by case-law stores.
#[derive(Debug, thiserror::Error)]
pub enum CaseLawError {
    #[error("line {0}: I/O error: {1}")]
    Io(usize, String),

    #[error("line {0}: parse error: {1}")]
    Parse(usize, String),

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error("corrupted archive: {0}")]
    Corrupt(String),

    #[error("store lock poisoned")]
    Poisoned,
}
