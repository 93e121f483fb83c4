//! Shared test doubles for the mint pipeline tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use alloy::primitives::{Address, Bytes, Log as PrimitiveLog, LogData, TxHash, B256, U256};
use alloy::rpc::types::Log;
use alloy::sol_types::SolEvent;
use async_trait::async_trait;

use cylinder_minter::blockchain::contract::{CylinderChain, CylinderMinted, MintReceipt};
use cylinder_minter::blockchain::{ChainError, ChainResult};
use cylinder_minter::mint::MintRequest;

/// Recording chain double.
///
/// Every receipt carries the configured logs; call counts let tests assert
/// which resolution path ran and that validation failures never reach the
/// chain.
pub struct MockChain {
    pub signer: Address,
    pub logs: Mutex<Vec<Log>>,
    pub total_count: u64,
    pub fail_submit: AtomicBool,
    pub fail_total: AtomicBool,
    pub mint_calls: AtomicUsize,
    pub total_calls: AtomicUsize,
    pub last_request: Mutex<Option<MintRequest>>,
}

impl MockChain {
    pub fn new(logs: Vec<Log>) -> Self {
        Self {
            signer: Address::repeat_byte(0x42),
            logs: Mutex::new(logs),
            total_count: 7,
            fail_submit: AtomicBool::new(false),
            fail_total: AtomicBool::new(false),
            mint_calls: AtomicUsize::new(0),
            total_calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn mint_calls(&self) -> usize {
        self.mint_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.total_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CylinderChain for MockChain {
    fn signer_address(&self) -> Address {
        self.signer
    }

    async fn submit_mint(&self, request: &MintRequest) -> ChainResult<TxHash> {
        self.mint_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(ChainError::Rpc("insufficient funds for gas".to_string()));
        }
        Ok(TxHash::from(B256::repeat_byte(0x11)))
    }

    async fn await_receipt(&self, tx_hash: TxHash) -> ChainResult<MintReceipt> {
        Ok(MintReceipt {
            transaction_hash: tx_hash,
            block_number: 7_654_321,
            gas_used: 184_235,
            logs: self.logs.lock().unwrap().clone(),
        })
    }

    async fn total_cylinders(&self) -> ChainResult<U256> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_total.load(Ordering::SeqCst) {
            return Err(ChainError::Rpc("eth_call failed".to_string()));
        }
        Ok(U256::from(self.total_count))
    }
}

/// A receipt log carrying a decodable `CylinderMinted` event.
pub fn minted_log(token_id: u64) -> Log {
    let event = CylinderMinted {
        tokenId: U256::from(token_id),
        to: Address::repeat_byte(0x42),
        cylinderId: "CYL-2024-001".to_string(),
    };
    Log {
        inner: PrimitiveLog {
            address: Address::repeat_byte(0x99),
            data: event.encode_log_data(),
        },
        ..Default::default()
    }
}

/// A receipt log from some other event that must not decode.
pub fn unrelated_log() -> Log {
    Log {
        inner: PrimitiveLog {
            address: Address::repeat_byte(0x99),
            data: LogData::new_unchecked(vec![B256::repeat_byte(0xaa)], Bytes::new()),
        },
        ..Default::default()
    }
}
