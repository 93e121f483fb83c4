//! Configuration validation.
//!
//! Semantic checks beyond what serde enforces syntactically. Returns all
//! validation errors, not just the first, so an operator can fix a config
//! file in one pass.

use alloy::primitives::Address;

use crate::config::schema::MinterConfig;

/// A single configuration problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &MinterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.blockchain.rpc_url.is_empty() {
        errors.push(ValidationError {
            field: "blockchain.rpc_url",
            message: "RPC endpoint URL is required".to_string(),
        });
    } else if config.blockchain.rpc_url.parse::<url::Url>().is_err() {
        errors.push(ValidationError {
            field: "blockchain.rpc_url",
            message: format!("not a valid URL: {}", config.blockchain.rpc_url),
        });
    }

    if config.blockchain.contract_address.is_empty() {
        errors.push(ValidationError {
            field: "blockchain.contract_address",
            message: "deployed contract address is required".to_string(),
        });
    } else if config.blockchain.contract_address.parse::<Address>().is_err() {
        errors.push(ValidationError {
            field: "blockchain.contract_address",
            message: format!("not a valid address: {}", config.blockchain.contract_address),
        });
    }

    if config.blockchain.chain_id == 0 {
        errors.push(ValidationError {
            field: "blockchain.chain_id",
            message: "chain ID must be non-zero".to_string(),
        });
    }

    if config.blockchain.rpc_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "blockchain.rpc_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.blockchain.confirmation_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "blockchain.confirmation_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.store.base_url.is_empty() {
        errors.push(ValidationError {
            field: "store.base_url",
            message: "record store base URL is required".to_string(),
        });
    } else if config.store.base_url.parse::<url::Url>().is_err() {
        errors.push(ValidationError {
            field: "store.base_url",
            message: format!("not a valid URL: {}", config.store.base_url),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
