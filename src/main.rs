use epoch_pinger::utils::{DEFAULT_CONFIG_FILE, PingerConfigLoader};
use epoch_pinger::{EpochPingerBuilder, PingerConfig, PingerError, RpcChainClient};
use eyre::Result;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Exit status for a rejected spot or format contract address.
const EXIT_INVALID_ADDRESS: i32 = 1;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        // running without a .env file is fine
        eprintln!("Note: no .env file loaded: {}", e);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_line_number(true)
        .init();

    let config = load_config().await?;
    let rpc_url = config.rpc_url().map_err(PingerError::Config)?;
    let client = RpcChainClient::new(rpc_url)
        .with_poll_interval(config.receipt_poll_interval())
        .with_receipt_timeout(config.receipt_timeout());

    let pinger = match EpochPingerBuilder::new().with_config(config).build(client).await {
        Ok(pinger) => pinger,
        Err(PingerError::InvalidAddress { contract, value }) => {
            error!("INVALID {} CONTRACT ADDRESS {}, ABORT", contract.to_uppercase(), value);
            std::process::exit(EXIT_INVALID_ADDRESS);
        }
        Err(e) => return Err(e.into()),
    };

    let Err(err) = pinger.run().await;
    error!(retryable = err.is_retryable(), "Pinger stopped: {}", err);
    Err(err.into())
}

/// Reads `EPOCH_PINGER_CONFIG` (default `pinger.toml`) and applies `PINGER_*`
/// overrides. Without a config file, defaults plus environment are used.
async fn load_config() -> Result<PingerConfig, PingerError> {
    let explicit = std::env::var("EPOCH_PINGER_CONFIG").ok();
    let file_name = explicit.clone().unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

    if explicit.is_none() && !Path::new(&file_name).exists() {
        info!("No {} found, configuring from environment", file_name);
        return Ok(PingerConfig::from_env()?);
    }

    info!("Loading config from {}", file_name);
    let config = PingerConfig::load_section_from_file(file_name).await?;
    Ok(config.with_env_overrides()?)
}
