use alloy_primitives::{Address, address};
use std::time::Duration;

/// EXDT testnet token. Printed at startup, never called.
pub const EXDT_TOKEN: Address = address!("0x013121200dfcb362a55561d84A193c990c42706f");

pub const DEFAULT_RPC_URL: &str = "https://staging-v2.skalenodes.com/v1/rapping-zuben-elakrab";

pub const DEFAULT_CONFIG_FILE: &str = "pinger.toml";

pub const DEFAULT_PING_INTERVAL: Duration = Duration::from_secs(30);

pub const DEFAULT_GAS_LIMIT: u64 = 100_000_000;

pub const DEFAULT_RECEIPT_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[non_exhaustive]
pub struct EpochContracts;

impl EpochContracts {
    pub const DATA_SPOTTING: &'static str = "0xf7b2f1fB641151e8369a0d91E6B634B6527F18BD";
    pub const DATA_FORMATTING: &'static str = "0x2a6b5715bB02934fCe0e1FA41976F59f334B3c6E";

    pub const DATA_SPOTTING_ABI: &'static str = "abi/DataSpotting.json";
    pub const DATA_FORMATTING_ABI: &'static str = "abi/DataFormatting.json";
}
