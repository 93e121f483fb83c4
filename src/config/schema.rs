//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the TOML config
//! file. The signing private key is never part of this schema; it is read
//! from the environment by the wallet module.

use serde::{Deserialize, Serialize};

/// Root configuration for the mint service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MinterConfig {
    /// HTTP listener settings (trigger + health endpoints).
    pub listener: ListenerConfig,

    /// Blockchain connection and contract settings.
    pub blockchain: BlockchainConfig,

    /// Record store (document store) settings.
    pub store: StoreConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout for trigger invocations in seconds.
    ///
    /// Must be generous enough to cover the confirmation wait; the trigger
    /// handler holds the request open for the whole pipeline.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 180,
        }
    }
}

/// Blockchain integration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlockchainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Deployed CylinderNFT contract address.
    pub contract_address: String,

    /// Chain ID (e.g., 137 for Polygon, 80001 for Mumbai).
    pub chain_id: u64,

    /// Per-request RPC timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Maximum time to wait for a submitted transaction to be mined,
    /// in seconds. Expiry is a distinct confirmation-timeout failure.
    pub confirmation_timeout_secs: u64,

    /// Maximum gas price in gwei (protection against spikes).
    pub max_gas_price_gwei: u64,
}

impl Default for BlockchainConfig {
    fn default() -> Self {
        Self {
            rpc_url: String::new(),
            contract_address: String::new(),
            chain_id: 80001,
            rpc_timeout_secs: 10,
            confirmation_timeout_secs: 120,
            max_gas_price_gwei: 500,
        }
    }
}

/// Record store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL of the document store REST gateway.
    pub base_url: String,

    /// Environment variable holding the store bearer token, if any.
    pub auth_token_env: Option<String>,

    /// Per-request store timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            auth_token_env: None,
            request_timeout_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
