//! Mint outcome types and the best-effort network label.

use serde::Serialize;

/// How the minted token's identifier was recovered.
///
/// The event path is authoritative per-transaction. The fallback path reads
/// the contract's running total and can race with concurrent mints, so
/// consumers should treat fallback-derived ids with extra caution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMethod {
    Event,
    Fallback,
}

/// Successful mint result, persisted verbatim into the record's status
/// fields and returned to the trigger caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintSuccess {
    pub token_id: String,
    pub transaction_hash: String,
    pub block_number: u64,
    pub gas_used: String,
    pub network: String,
    pub resolution: ResolutionMethod,
}

/// Derive a human-readable network label from the RPC URL.
///
/// Substring matching only; a best-effort label, not authoritative chain
/// detection. "mumbai" is checked before "polygon" because Mumbai RPC URLs
/// contain both.
pub fn network_label(rpc_url: &str) -> &'static str {
    if rpc_url.contains("mumbai") {
        "polygon-mumbai"
    } else if rpc_url.contains("polygon") {
        "polygon"
    } else {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_mumbai() {
        assert_eq!(
            network_label("https://rpc-mumbai.maticvigil.com"),
            "polygon-mumbai"
        );
    }

    #[test]
    fn mumbai_takes_precedence_over_polygon() {
        assert_eq!(
            network_label("https://polygon-mumbai.infura.io/v3/abc"),
            "polygon-mumbai"
        );
    }

    #[test]
    fn labels_polygon_mainnet() {
        assert_eq!(network_label("https://polygon-rpc.com"), "polygon");
    }

    #[test]
    fn unknown_networks() {
        assert_eq!(network_label("http://localhost:8545"), "unknown");
    }

    #[test]
    fn resolution_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ResolutionMethod::Fallback).unwrap(),
            "\"fallback\""
        );
    }
}
