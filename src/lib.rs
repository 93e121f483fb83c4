//! Cylinder NFT mint service.
//!
//! Reacts to creation of a cylinder record in a document store, mints a
//! corresponding NFT on an EVM chain, and reconciles the on-chain token
//! identifier back into the record.

pub mod blockchain;
pub mod config;
pub mod http;
pub mod mint;
pub mod observability;
pub mod store;

pub use config::MinterConfig;
pub use mint::{MintError, MintOrchestrator, MintSuccess};
