use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::utils::config_loader::{LoadConfigError, PingerConfigLoader, load_from_file};
use crate::utils::{
    DEFAULT_GAS_LIMIT, DEFAULT_PING_INTERVAL, DEFAULT_RECEIPT_POLL_INTERVAL, DEFAULT_RPC_URL, EXDT_TOKEN, EpochContracts,
};

#[derive(Clone, Deserialize, Debug)]
pub struct PingerConfigRoot {
    pub pinger: PingerConfig,
}

/// One pinged contract: its address as written in config and its ABI artifact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractConfig {
    pub address: String,
    pub abi_path: String,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PingerConfig {
    /// HTTP JSON-RPC endpoint used for every read and write
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Printed at startup only
    #[serde(default = "default_token_address")]
    pub token_address: String,
    /// Usually `${PINGER_PRIVATE_KEY}` so the key stays out of the file
    #[serde(default)]
    pub private_key: String,
    #[serde(default = "default_spot")]
    pub spot: ContractConfig,
    #[serde(default = "default_format")]
    pub format: ContractConfig,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,
    #[serde(default = "default_receipt_poll_interval_ms")]
    pub receipt_poll_interval_ms: u64,
    /// Unset waits for receipts forever
    #[serde(default)]
    pub receipt_timeout_secs: Option<u64>,
}

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_string()
}

fn default_token_address() -> String {
    EXDT_TOKEN.to_checksum(None)
}

fn default_spot() -> ContractConfig {
    ContractConfig {
        address: EpochContracts::DATA_SPOTTING.to_string(),
        abi_path: EpochContracts::DATA_SPOTTING_ABI.to_string(),
    }
}

fn default_format() -> ContractConfig {
    ContractConfig {
        address: EpochContracts::DATA_FORMATTING.to_string(),
        abi_path: EpochContracts::DATA_FORMATTING_ABI.to_string(),
    }
}

fn default_interval_secs() -> u64 {
    DEFAULT_PING_INTERVAL.as_secs()
}

fn default_gas_limit() -> u64 {
    DEFAULT_GAS_LIMIT
}

fn default_receipt_poll_interval_ms() -> u64 {
    DEFAULT_RECEIPT_POLL_INTERVAL.as_millis() as u64
}

impl Default for PingerConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            token_address: default_token_address(),
            private_key: String::new(),
            spot: default_spot(),
            format: default_format(),
            interval_secs: default_interval_secs(),
            gas_limit: default_gas_limit(),
            receipt_poll_interval_ms: default_receipt_poll_interval_ms(),
            receipt_timeout_secs: None,
        }
    }
}

impl fmt::Debug for PingerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PingerConfig")
            .field("rpc_url", &self.rpc_url)
            .field("token_address", &self.token_address)
            .field("private_key", &"<redacted>")
            .field("spot", &self.spot)
            .field("format", &self.format)
            .field("interval_secs", &self.interval_secs)
            .field("gas_limit", &self.gas_limit)
            .field("receipt_poll_interval_ms", &self.receipt_poll_interval_ms)
            .field("receipt_timeout_secs", &self.receipt_timeout_secs)
            .finish()
    }
}

impl PingerConfig {
    /// Applies `PINGER_*` environment overrides on top of `self`
    pub fn with_env_overrides(self) -> Result<Self, LoadConfigError> {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Applies `PINGER_*` overrides resolved through `lookup`
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, LoadConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(rpc_url) = lookup("PINGER_RPC_URL") {
            self.rpc_url = rpc_url;
        }

        if let Some(private_key) = lookup("PINGER_PRIVATE_KEY") {
            self.private_key = private_key;
        }

        if let Some(address) = lookup("PINGER_SPOT_ADDRESS") {
            self.spot.address = address;
        }

        if let Some(abi_path) = lookup("PINGER_SPOT_ABI") {
            self.spot.abi_path = abi_path;
        }

        if let Some(address) = lookup("PINGER_FORMAT_ADDRESS") {
            self.format.address = address;
        }

        if let Some(abi_path) = lookup("PINGER_FORMAT_ABI") {
            self.format.abi_path = abi_path;
        }

        if let Some(interval_str) = lookup("PINGER_INTERVAL_SECS") {
            self.interval_secs = interval_str.parse()
                .map_err(|e| LoadConfigError::ConfigError(format!("Invalid PINGER_INTERVAL_SECS: {}", e)))?;
        }

        if let Some(gas_limit_str) = lookup("PINGER_GAS_LIMIT") {
            self.gas_limit = gas_limit_str.parse()
                .map_err(|e| LoadConfigError::ConfigError(format!("Invalid PINGER_GAS_LIMIT: {}", e)))?;
        }

        if let Some(timeout_str) = lookup("PINGER_RECEIPT_TIMEOUT_SECS") {
            self.receipt_timeout_secs = Some(timeout_str.parse()
                .map_err(|e| LoadConfigError::ConfigError(format!("Invalid PINGER_RECEIPT_TIMEOUT_SECS: {}", e)))?);
        }

        Ok(self)
    }

    /// Defaults plus environment overrides, for running without a config file
    pub fn from_env() -> Result<Self, LoadConfigError> {
        Self::default().with_env_overrides()
    }

    pub fn rpc_url(&self) -> Result<Url, LoadConfigError> {
        Url::parse(&self.rpc_url)
            .map_err(|e| LoadConfigError::ConfigError(format!("Invalid rpc_url {}: {}", self.rpc_url, e)))
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn receipt_poll_interval(&self) -> Duration {
        Duration::from_millis(self.receipt_poll_interval_ms)
    }

    pub fn receipt_timeout(&self) -> Option<Duration> {
        self.receipt_timeout_secs.map(Duration::from_secs)
    }
}

#[async_trait]
impl PingerConfigLoader for PingerConfig {
    type SectionType = PingerConfig;

    async fn load_section_from_file(file_name: String) -> Result<Self::SectionType, LoadConfigError> {
        let root: PingerConfigRoot = load_from_file(file_name).await?;
        Ok(root.pinger)
    }
}
