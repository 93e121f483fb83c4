//! Mint orchestration: one creation event in, one terminal status out.
//!
//! Pipeline per invocation, strictly sequential with no internal retry:
//! validate → submit → await confirmation → resolve token id → persist.
//! Any failure writes a best-effort error status into the record and then
//! surfaces the original error to the caller, so the invoking platform can
//! apply its own retry and alerting policy.

use std::sync::Arc;

use crate::blockchain::contract::{CylinderChain, CylinderMinted, MintReceipt};
use crate::mint::outcome::{network_label, MintSuccess, ResolutionMethod};
use crate::mint::record::CylinderRecord;
use crate::mint::MintError;
use crate::store::{RecordStore, RecordUpdate};

/// Drives the mint-and-reconcile pipeline for cylinder creation events.
///
/// Stateless across invocations; the chain and store handles are built once
/// at startup and shared read-only.
pub struct MintOrchestrator<C, S> {
    chain: Arc<C>,
    store: Arc<S>,
    network: String,
}

impl<C: CylinderChain, S: RecordStore> MintOrchestrator<C, S> {
    pub fn new(chain: Arc<C>, store: Arc<S>, rpc_url: &str) -> Self {
        Self {
            chain,
            store,
            network: network_label(rpc_url).to_string(),
        }
    }

    /// Handle one newly created cylinder record.
    ///
    /// Exactly one mint attempt. On success the record gets `status=minted`
    /// with full provenance; on any failure it gets `status=error` with the
    /// failure message (best-effort; a failed error write is only logged)
    /// and the error is returned.
    pub async fn process_created(
        &self,
        record_id: &str,
        record: &CylinderRecord,
    ) -> Result<MintSuccess, MintError> {
        match self.run(record_id, record).await {
            Ok(success) => {
                metrics::counter!("minter_mints_total").increment(1);
                tracing::info!(
                    record_id,
                    token_id = %success.token_id,
                    tx_hash = %success.transaction_hash,
                    "Cylinder minted"
                );
                Ok(success)
            }
            Err(err) => {
                metrics::counter!("minter_mint_failures_total").increment(1);
                tracing::error!(record_id, error = %err, "Mint failed");

                let update = RecordUpdate::Error {
                    error_message: err.to_string(),
                };
                if let Err(write_err) = self.store.update_record(record_id, &update).await {
                    // Secondary failure: never mask the original error.
                    tracing::warn!(
                        record_id,
                        error = %write_err,
                        "Failed to write error status to record"
                    );
                }

                Err(err)
            }
        }
    }

    async fn run(
        &self,
        record_id: &str,
        record: &CylinderRecord,
    ) -> Result<MintSuccess, MintError> {
        let request = record.validate()?;

        tracing::info!(
            record_id,
            cylinder_id = %request.cylinder_id,
            manufacturer = %request.manufacturer,
            cylinder_type = %request.cylinder_type,
            weight_grams = request.weight_grams,
            capacity_grams = request.capacity_grams,
            batch_number = %request.batch_number,
            to = %self.chain.signer_address(),
            "Submitting mint transaction"
        );

        let tx_hash = self.chain.submit_mint(&request).await?;
        tracing::info!(record_id, tx_hash = %tx_hash, "Transaction sent, awaiting confirmation");

        let receipt = self.chain.await_receipt(tx_hash).await?;
        tracing::info!(
            record_id,
            block_number = receipt.block_number,
            gas_used = receipt.gas_used,
            "Transaction confirmed"
        );

        let (token_id, resolution) = self.resolve_token_id(&receipt).await?;

        let success = MintSuccess {
            token_id,
            transaction_hash: receipt.transaction_hash.to_string(),
            block_number: receipt.block_number,
            gas_used: receipt.gas_used.to_string(),
            network: self.network.clone(),
            resolution,
        };

        let update = RecordUpdate::Minted {
            token_id: success.token_id.clone(),
            transaction_hash: success.transaction_hash.clone(),
            block_number: success.block_number,
            gas_used: success.gas_used.clone(),
            blockchain_network: success.network.clone(),
            resolution_method: success.resolution,
        };
        self.store.update_record(record_id, &update).await?;

        Ok(success)
    }

    /// Recover the minted token id from the receipt.
    ///
    /// Scans the logs in emission order; the first one that decodes as a
    /// `CylinderMinted` event wins, and logs that fail to decode are
    /// expected (other events share the receipt) and skipped. Only when no
    /// log matches does this fall back to the contract's running total,
    /// which can race with concurrent mints and is flagged accordingly.
    async fn resolve_token_id(
        &self,
        receipt: &MintReceipt,
    ) -> Result<(String, ResolutionMethod), MintError> {
        for log in &receipt.logs {
            if let Ok(decoded) = log.log_decode::<CylinderMinted>() {
                let token_id = decoded.inner.tokenId.to_string();
                tracing::debug!(token_id = %token_id, "Token id resolved from event log");
                return Ok((token_id, ResolutionMethod::Event));
            }
        }

        tracing::warn!(
            tx_hash = %receipt.transaction_hash,
            "No CylinderMinted event in receipt, falling back to total count"
        );
        metrics::counter!("minter_fallback_resolutions_total").increment(1);

        let count = self.chain.total_cylinders().await.map_err(|e| {
            MintError::Resolution(format!(
                "no CylinderMinted event and total count read failed: {}",
                e
            ))
        })?;

        Ok((count.to_string(), ResolutionMethod::Fallback))
    }
}

impl<C, S> std::fmt::Debug for MintOrchestrator<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MintOrchestrator")
            .field("network", &self.network)
            .finish()
    }
}
