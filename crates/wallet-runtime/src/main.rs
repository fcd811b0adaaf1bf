//! # Wallet-Sync Runtime
//!
//! Keeps the engine's wallet managers in line with the set of currencies
//! the user has enabled.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Install logging
//! 3. Start the runtime (routing, monitor, network discovery)
//! 4. Read operator commands from stdin until Ctrl+C or `quit`
//!
//! ## Console
//!
//! ```text
//! wallets btc,eth   replace the enabled wallets
//! rescan            show the rescan prompt
//! rescan btc        resync the BTC manager from its last trusted block
//! status            log every live manager
//! quit              shut down
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::BufReader;
use tracing::info;

use wallet_runtime::logging::init_logging;
use wallet_runtime::{RuntimeConfig, WalletRuntime};

fn main() -> Result<()> {
    let config = RuntimeConfig::from_env().context("Invalid configuration")?;
    config.validate().context("Invalid configuration")?;
    init_logging(&config)?;

    let grace = config.shutdown_grace;
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    let result = rt.block_on(run(config));

    // stdin is read on a blocking thread that never returns on its own
    rt.shutdown_timeout(grace);
    result
}

async fn run(config: RuntimeConfig) -> Result<()> {
    let runtime = Arc::new(WalletRuntime::new(config));
    runtime.start().await?;

    let _console = runtime.spawn_console(BufReader::new(tokio::io::stdin()));

    info!("Wallet runtime is running. Press Ctrl+C or type `quit` to stop.");
    tokio::select! {
        signal = tokio::signal::ctrl_c() => signal.context("Failed to listen for Ctrl+C")?,
        () = runtime.wait_for_shutdown() => {}
    }

    runtime.shutdown().await;
    Ok(())
}
