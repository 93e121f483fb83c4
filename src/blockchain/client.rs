//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint with a signing wallet
//! - Submit contract calls and read contract state
//! - Query chain state (chain ID, block number, receipts)
//! - Enforce per-request timeouts and the gas price ceiling

use alloy::network::TransactionBuilder;
use alloy::primitives::{Bytes, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{ChainError, ChainResult};
use crate::blockchain::wallet::Wallet;
use crate::config::BlockchainConfig;

/// JSON-RPC client bound to a signing wallet.
///
/// Built once at startup and shared read-only between the orchestrator and
/// the health endpoint.
#[derive(Clone)]
pub struct ChainClient {
    provider: Arc<dyn Provider + Send + Sync>,
    config: BlockchainConfig,
    timeout_duration: Duration,
    signer_address: alloy::primitives::Address,
}

impl ChainClient {
    /// Connect to the configured RPC endpoint.
    ///
    /// Verifies the chain ID against configuration; a mismatch or an
    /// unreachable endpoint at startup is logged as a warning rather than
    /// failing construction, so the service can come up while the RPC is
    /// briefly unavailable.
    pub async fn new(config: &BlockchainConfig, wallet: &Wallet) -> ChainResult<Self> {
        let rpc_url: url::Url = config.rpc_url.parse().map_err(|e| {
            ChainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;

        let provider = ProviderBuilder::new()
            .wallet(wallet.ethereum_wallet())
            .connect_http(rpc_url);

        let client = Self {
            provider: Arc::new(provider),
            config: config.clone(),
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
            signer_address: wallet.address(),
        };

        match client.verify_chain_id().await {
            Ok(()) => {
                tracing::info!(
                    rpc_url = %config.rpc_url,
                    chain_id = config.chain_id,
                    "Chain client initialized"
                );
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Chain client initialized but chain verification failed"
                );
            }
        }

        Ok(client)
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> ChainResult<()> {
        let chain_id = self.chain_id().await?;
        if chain_id != self.config.chain_id {
            return Err(ChainError::ChainMismatch {
                expected: self.config.chain_id,
                actual: chain_id,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn chain_id(&self) -> ChainResult<u64> {
        self.rpc(self.provider.get_chain_id()).await
    }

    /// Get the latest block number.
    pub async fn block_number(&self) -> ChainResult<u64> {
        self.rpc(self.provider.get_block_number()).await
    }

    /// Get the current gas price in wei.
    pub async fn gas_price(&self) -> ChainResult<u128> {
        self.rpc(self.provider.get_gas_price()).await
    }

    /// Get a transaction receipt by hash, `None` while still pending.
    pub async fn receipt(&self, tx_hash: TxHash) -> ChainResult<Option<TransactionReceipt>> {
        self.rpc(self.provider.get_transaction_receipt(tx_hash)).await
    }

    /// Submit a signed contract call, returning the pending transaction hash.
    ///
    /// Rejects submission when the current gas price exceeds the configured
    /// ceiling. Nonce and gas estimation are handled by the provider's
    /// fillers; estimation failure (e.g., a revert) surfaces as an RPC error.
    pub async fn send(&self, tx: TransactionRequest) -> ChainResult<TxHash> {
        let gas_price = self.gas_price().await?;
        let gas_price_gwei = gas_price / 1_000_000_000;
        if gas_price_gwei > self.config.max_gas_price_gwei as u128 {
            return Err(ChainError::GasPriceTooHigh {
                current_gwei: gas_price_gwei as u64,
                max_gwei: self.config.max_gas_price_gwei,
            });
        }

        let tx = tx.with_from(self.signer_address);
        let pending = timeout(self.timeout_duration, self.provider.send_transaction(tx))
            .await
            .map_err(|_| ChainError::Timeout(self.config.rpc_timeout_secs))?
            .map_err(|e| ChainError::Rpc(format!("Transaction submission failed: {}", e)))?;

        Ok(*pending.tx_hash())
    }

    /// Execute a read-only contract call (`eth_call`).
    pub async fn call(&self, tx: TransactionRequest) -> ChainResult<Bytes> {
        self.rpc(self.provider.call(tx)).await
    }

    /// Address of the signing wallet.
    pub fn signer_address(&self) -> alloy::primitives::Address {
        self.signer_address
    }

    /// Blockchain configuration in effect.
    pub fn config(&self) -> &BlockchainConfig {
        &self.config
    }

    async fn rpc<T, E, F>(&self, fut: F) -> ChainResult<T>
    where
        F: std::future::IntoFuture<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(ChainError::Rpc(e.to_string())),
            Err(_) => Err(ChainError::Timeout(self.config.rpc_timeout_secs)),
        }
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn test_config() -> BlockchainConfig {
        BlockchainConfig {
            rpc_url: "http://localhost:8545".to_string(),
            contract_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            chain_id: 31337, // Anvil default
            rpc_timeout_secs: 2,
            confirmation_timeout_secs: 30,
            max_gas_price_gwei: 100,
        }
    }

    #[tokio::test]
    async fn client_creation_survives_unreachable_rpc() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY, 31337).unwrap();
        // Chain verification degrades to a warning when the RPC is down.
        let result = ChainClient::new(&test_config(), &wallet).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn invalid_rpc_url_is_rejected() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY, 31337).unwrap();
        let mut config = test_config();
        config.rpc_url = "not a url".to_string();
        let result = ChainClient::new(&config, &wallet).await;
        assert!(matches!(result, Err(ChainError::Rpc(_))));
    }
}
