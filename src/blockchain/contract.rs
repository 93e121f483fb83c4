//! CylinderNFT contract binding.
//!
//! The contract surface used by this service is exactly three functions and
//! one event. `getCylinderMetadata` is not called by the mint pipeline but
//! is part of the same contract and kept ABI-compatible for operator use.

use alloy::consensus::TxReceipt;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash, U256};
use alloy::rpc::types::{Log, TransactionReceipt, TransactionRequest};
use alloy::sol;
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tokio::time::{interval, timeout};

use crate::blockchain::client::ChainClient;
use crate::blockchain::types::{ChainError, ChainResult};
use crate::mint::record::MintRequest;

sol! {
    /// On-chain cylinder metadata tuple returned by `getCylinderMetadata`.
    #[derive(Debug)]
    struct CylinderMetadata {
        string cylinderId;
        string manufacturer;
        string cylinderType;
        uint256 weight;
        uint256 capacity;
        string batchNumber;
        uint256 mintedAt;
        bool isActive;
    }

    /// Emitted by the contract for every successful mint.
    #[derive(Debug)]
    event CylinderMinted(uint256 indexed tokenId, address indexed to, string cylinderId);

    function mintCylinder(
        address to,
        string cylinderId,
        string manufacturer,
        string cylinderType,
        uint256 weight,
        uint256 capacity,
        string batchNumber,
        string uri
    ) returns (uint256 tokenId);

    function getCylinderMetadata(uint256 tokenId) view returns (CylinderMetadata metadata);

    function totalCylinders() view returns (uint256 count);
}

/// Confirmed mint transaction data the orchestrator needs.
#[derive(Debug, Clone)]
pub struct MintReceipt {
    pub transaction_hash: TxHash,
    pub block_number: u64,
    pub gas_used: u64,
    /// All logs emitted in the transaction, in emission order.
    pub logs: Vec<Log>,
}

impl MintReceipt {
    /// Convert a mined receipt, rejecting reverted transactions.
    fn from_confirmed(receipt: &TransactionReceipt) -> ChainResult<Self> {
        if !receipt.status() {
            return Err(ChainError::Reverted(format!(
                "transaction {} reverted on-chain",
                receipt.transaction_hash
            )));
        }

        Ok(Self {
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number.unwrap_or_default(),
            gas_used: receipt.gas_used,
            logs: receipt.inner.logs().to_vec(),
        })
    }
}

/// Chain operations the mint orchestrator depends on.
///
/// The contract-backed implementation talks to the real chain; tests
/// substitute a recording mock.
#[async_trait]
pub trait CylinderChain: Send + Sync {
    /// Address the service mints to (its own custody wallet).
    fn signer_address(&self) -> Address;

    /// Submit the mint call, returning the pending transaction hash.
    async fn submit_mint(&self, request: &MintRequest) -> ChainResult<TxHash>;

    /// Block until the transaction is mined, bounded by the configured
    /// confirmation timeout.
    async fn await_receipt(&self, tx_hash: TxHash) -> ChainResult<MintReceipt>;

    /// Read the total number of cylinders minted so far.
    async fn total_cylinders(&self) -> ChainResult<U256>;
}

/// How often to poll for a pending transaction's receipt.
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// `CylinderChain` implementation backed by the deployed contract.
#[derive(Debug, Clone)]
pub struct CylinderContract {
    client: ChainClient,
    address: Address,
}

impl CylinderContract {
    pub fn new(client: ChainClient, address: Address) -> Self {
        Self { client, address }
    }

    /// Encode the `mintCylinder` calldata for a validated request.
    ///
    /// The metadata URI is always empty at mint time; it can be set later
    /// through a separate contract call.
    pub fn mint_calldata(request: &MintRequest, to: Address) -> Vec<u8> {
        mintCylinderCall {
            to,
            cylinderId: request.cylinder_id.clone(),
            manufacturer: request.manufacturer.clone(),
            cylinderType: request.cylinder_type.clone(),
            weight: U256::from(request.weight_grams),
            capacity: U256::from(request.capacity_grams),
            batchNumber: request.batch_number.clone(),
            uri: String::new(),
        }
        .abi_encode()
    }

    /// Read a cylinder's on-chain metadata by token id.
    ///
    /// Not used by the mint pipeline; exposed for operator tooling.
    pub async fn metadata(&self, token_id: U256) -> ChainResult<CylinderMetadata> {
        let calldata = getCylinderMetadataCall { tokenId: token_id }.abi_encode();
        let tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(calldata);
        let bytes = self.client.call(tx).await?;
        getCylinderMetadataCall::abi_decode_returns(&bytes)
            .map_err(|e| ChainError::Rpc(format!("getCylinderMetadata decode failed: {}", e)))
    }
}

#[async_trait]
impl CylinderChain for CylinderContract {
    fn signer_address(&self) -> Address {
        self.client.signer_address()
    }

    async fn submit_mint(&self, request: &MintRequest) -> ChainResult<TxHash> {
        let calldata = Self::mint_calldata(request, self.signer_address());
        let tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(calldata);
        self.client.send(tx).await
    }

    async fn await_receipt(&self, tx_hash: TxHash) -> ChainResult<MintReceipt> {
        let bound_secs = self.client.config().confirmation_timeout_secs;
        let client = &self.client;

        let receipt = poll_for_receipt(bound_secs, || client.receipt(tx_hash)).await?;
        MintReceipt::from_confirmed(&receipt)
    }

    async fn total_cylinders(&self) -> ChainResult<U256> {
        let calldata = totalCylindersCall {}.abi_encode();
        let tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(calldata);
        let bytes = self.client.call(tx).await?;
        totalCylindersCall::abi_decode_returns(&bytes)
            .map_err(|e| ChainError::Rpc(format!("totalCylinders decode failed: {}", e)))
    }
}

/// Poll a receipt source until the transaction is mined, bounded by
/// `bound_secs`.
///
/// `None` means still pending and polling continues; fetch errors propagate
/// immediately. Bound expiry is a distinct confirmation-timeout failure.
async fn poll_for_receipt<F, Fut>(bound_secs: u64, mut fetch: F) -> ChainResult<TransactionReceipt>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ChainResult<Option<TransactionReceipt>>>,
{
    let result = timeout(Duration::from_secs(bound_secs), async {
        let mut ticker = interval(RECEIPT_POLL_INTERVAL);

        loop {
            ticker.tick().await;

            match fetch().await? {
                Some(receipt) => return Ok(receipt),
                None => tracing::debug!("Transaction pending"),
            }
        }
    })
    .await;

    match result {
        Ok(receipt) => receipt,
        Err(_) => Err(ChainError::ConfirmationTimeout(bound_secs)),
    }
}
