//! The mint-and-reconcile pipeline.

pub mod orchestrator;
pub mod outcome;
pub mod record;

use thiserror::Error;

use crate::blockchain::ChainError;
use crate::store::StoreError;

pub use orchestrator::MintOrchestrator;
pub use outcome::{network_label, MintSuccess, ResolutionMethod};
pub use record::{CylinderRecord, MintRequest};

/// Errors produced by a single mint invocation.
#[derive(Debug, Error)]
pub enum MintError {
    /// Required record field missing or malformed. Never reaches the chain.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Connection, submission, or confirmation failure.
    #[error(transparent)]
    Chain(#[from] ChainError),

    /// Neither the event log nor the fallback count yielded a token id.
    #[error("token id resolution failed: {0}")]
    Resolution(String),

    /// Persisting a successful outcome into the record store failed.
    #[error("record store write failed: {0}")]
    Store(#[from] StoreError),
}
