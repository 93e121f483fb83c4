//! Cylinder NFT mint service binary.
//!
//! Startup order: configuration → logging → metrics → wallet → chain client
//! → record store → orchestrator → HTTP server.

use std::path::PathBuf;
use std::sync::Arc;

use alloy::primitives::Address;
use tokio::net::TcpListener;

use cylinder_minter::blockchain::{ChainClient, CylinderContract, Wallet};
use cylinder_minter::config::load_config;
use cylinder_minter::http::{AppState, MinterServer};
use cylinder_minter::mint::{network_label, MintOrchestrator};
use cylinder_minter::observability;
use cylinder_minter::store::RestRecordStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path: PathBuf = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "minter.toml".to_string())
        .into();
    let config = load_config(&config_path)?;

    observability::logging::init(&config.observability.log_level);

    tracing::info!(
        config = %config_path.display(),
        rpc_url = %config.blockchain.rpc_url,
        contract_address = %config.blockchain.contract_address,
        bind_address = %config.listener.bind_address,
        "cylinder-minter starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(e) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    error = %e,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let wallet = Wallet::from_env(config.blockchain.chain_id)?;
    let client = ChainClient::new(&config.blockchain, &wallet).await?;

    // Config validation already checked the address parses.
    let contract_address: Address = config.blockchain.contract_address.parse()?;
    let contract = Arc::new(CylinderContract::new(client.clone(), contract_address));

    let store = Arc::new(RestRecordStore::new(&config.store)?);

    let orchestrator = Arc::new(MintOrchestrator::new(
        contract,
        store,
        &config.blockchain.rpc_url,
    ));

    let state = AppState {
        orchestrator,
        client,
        contract_address,
        network: network_label(&config.blockchain.rpc_url).to_string(),
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    MinterServer::new(&config, state).run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
