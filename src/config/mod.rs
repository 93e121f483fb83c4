//! Configuration loading, schema, and validation.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{BlockchainConfig, ListenerConfig, MinterConfig, ObservabilityConfig, StoreConfig};
