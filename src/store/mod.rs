//! Record store boundary.
//!
//! The orchestrator only ever touches one document per invocation: it reads
//! the cylinder fields it was handed and writes the terminal status back.
//! Write timestamps (`updatedAt`, `mintedAt`, `errorTimestamp`) are assigned
//! by the store layer at write time, in unix seconds.

pub mod memory;
pub mod rest;

use async_trait::async_trait;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::mint::outcome::ResolutionMethod;

pub use memory::MemoryRecordStore;
pub use rest::RestRecordStore;

/// Errors from record store write-backs.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Request(String),

    #[error("store rejected update with status {0}")]
    Rejected(u16),
}

/// Terminal status written back into a cylinder record.
///
/// Serializes to the document's flat status fields: the variant becomes the
/// `status` value and the payload the camelCase provenance fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status")]
pub enum RecordUpdate {
    #[serde(rename = "minted", rename_all = "camelCase")]
    Minted {
        token_id: String,
        transaction_hash: String,
        block_number: u64,
        gas_used: String,
        blockchain_network: String,
        resolution_method: ResolutionMethod,
    },

    #[serde(rename = "error", rename_all = "camelCase")]
    Error { error_message: String },
}

/// Document store holding cylinder records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Apply a terminal status update to one record.
    ///
    /// Called exactly once per invocation on the success path, and at most
    /// once more (best-effort) on the failure path.
    async fn update_record(&self, record_id: &str, update: &RecordUpdate)
        -> Result<(), StoreError>;
}

/// Current unix time in seconds, the store-assigned write timestamp.
pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Render an update into the document's field map, adding the store-assigned
/// timestamps.
pub(crate) fn update_fields(
    update: &RecordUpdate,
    now: u64,
) -> Result<serde_json::Map<String, serde_json::Value>, StoreError> {
    let mut fields = match serde_json::to_value(update) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => return Err(StoreError::Request("update serialization failed".to_string())),
    };

    fields.insert("updatedAt".to_string(), now.into());
    let stamp = match update {
        RecordUpdate::Minted { .. } => "mintedAt",
        RecordUpdate::Error { .. } => "errorTimestamp",
    };
    fields.insert(stamp.to_string(), now.into());

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minted() -> RecordUpdate {
        RecordUpdate::Minted {
            token_id: "42".to_string(),
            transaction_hash: "0xabc".to_string(),
            block_number: 7_654_321,
            gas_used: "184235".to_string(),
            blockchain_network: "polygon-mumbai".to_string(),
            resolution_method: ResolutionMethod::Event,
        }
    }

    #[test]
    fn minted_update_serializes_document_fields() {
        let fields = update_fields(&minted(), 1_700_000_000).unwrap();

        assert_eq!(fields["status"], "minted");
        assert_eq!(fields["tokenId"], "42");
        assert_eq!(fields["transactionHash"], "0xabc");
        assert_eq!(fields["blockNumber"], 7_654_321);
        assert_eq!(fields["gasUsed"], "184235");
        assert_eq!(fields["blockchainNetwork"], "polygon-mumbai");
        assert_eq!(fields["resolutionMethod"], "event");
        assert_eq!(fields["mintedAt"], 1_700_000_000u64);
        assert_eq!(fields["updatedAt"], 1_700_000_000u64);
        assert!(!fields.contains_key("errorTimestamp"));
    }

    #[test]
    fn error_update_serializes_document_fields() {
        let update = RecordUpdate::Error {
            error_message: "RPC error: connection refused".to_string(),
        };
        let fields = update_fields(&update, 1_700_000_001).unwrap();

        assert_eq!(fields["status"], "error");
        assert_eq!(fields["errorMessage"], "RPC error: connection refused");
        assert_eq!(fields["errorTimestamp"], 1_700_000_001u64);
        assert_eq!(fields["updatedAt"], 1_700_000_001u64);
        assert!(!fields.contains_key("tokenId"));
    }
}
