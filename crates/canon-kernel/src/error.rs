//! Error types for Canon engine operations.
//!
//! Domain findings are never errors — every rule violation travels inside a
//! `Verdict` or `RealizeResult`. The variants here are programmer misuse and
//! runtime conditions of the realization machinery itself.

/// Errors thrown by the engine and its worker path.
#[derive(Debug, thiserror::Error)]
pub enum CanonError {
    /// Realization was requested with `skip_validation` but without
    /// `allow_bypass`. The only way to skip validation is to say so twice.
    #[error("canon bypass refused: skip_validation requires allow_bypass")]
    ValidationBypass,

    /// The realization worker exceeded its time budget.
    #[error("realization timed out after {elapsed_ms} ms")]
    RealizationTimeout { elapsed_ms: u64 },

    /// The realization worker was cancelled by its caller.
    #[error("realization cancelled")]
    RealizationCancelled,

    /// The realization worker task failed to complete.
    #[error("realization worker failed: {0}")]
    Worker(String),

    /// A case-law or other storage adapter failed at the engine boundary.
    #[error("storage error: {0}")]
    Storage(String),
}
