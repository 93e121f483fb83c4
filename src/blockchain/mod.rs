//! Blockchain connectivity: RPC client, wallet, and contract binding.

pub mod client;
pub mod contract;
pub mod types;
pub mod wallet;

pub use client::ChainClient;
pub use contract::{CylinderChain, CylinderContract, MintReceipt};
pub use types::{ChainError, ChainResult};
pub use wallet::Wallet;
