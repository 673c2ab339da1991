use alloy_primitives::{ChainId, U256};
use std::convert::Infallible;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::chain::{
    Account, ChainClient, ContractBinding, ContractKind, PendingTransaction, Receipt, to_checksum, validate_address,
};
use crate::error::PingerError;
use crate::execution::clock::{Clock, TokioClock};
use crate::execution::config::PingerConfig;

/// Receipts of one epoch tick, in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpochTick {
    pub spot: Receipt,
    pub format: Receipt,
}

/// Advances the epoch of the spot and format contracts on a fixed interval.
///
/// Each ping reads the sender's nonce and the gas price right before signing,
/// so the pinger must be the only sender using its account. Pings never
/// overlap: the format ping starts only after the spot ping is mined.
pub struct EpochPinger<C, K = TokioClock> {
    client: C,
    clock: K,
    account: Account,
    spot: ContractBinding,
    format: ContractBinding,
    chain_id: ChainId,
    gas_limit: u64,
    interval: Duration,
}

impl<C: ChainClient, K: Clock> EpochPinger<C, K> {
    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn binding(&self, kind: ContractKind) -> &ContractBinding {
        match kind {
            ContractKind::Spot => &self.spot,
            ContractKind::Format => &self.format,
        }
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Builds an unsigned `TriggerNextEpoch()` call with a fresh nonce and gas price.
    pub async fn build_transaction(&self, binding: &ContractBinding) -> Result<PendingTransaction, PingerError> {
        let from = self.account.address();
        let nonce = self.client.transaction_count(from).await?;
        let gas_price = self.client.gas_price().await?;

        Ok(PendingTransaction {
            to: binding.address(),
            from,
            nonce,
            value: U256::ZERO,
            gas_limit: self.gas_limit,
            gas_price,
            chain_id: self.chain_id,
            input: binding.trigger_next_epoch(),
        })
    }

    /// Builds, signs and submits one epoch trigger, then waits for it to be mined.
    pub async fn ping(&self, kind: ContractKind) -> Result<Receipt, PingerError> {
        let binding = self.binding(kind);
        let pending = self.build_transaction(binding).await?;
        debug!("{} ping: nonce={} gas_price={} to={}", kind, pending.nonce, pending.gas_price, pending.to);

        let signed = self.account.sign(&pending)?;
        let hash = self.client.send_raw_transaction(&signed.raw).await?;
        if hash != signed.hash {
            warn!("Node reported hash {} for locally signed {}", hash, signed.hash);
        }

        let receipt = self.client.wait_for_receipt(hash).await?;
        info!("{} pinging tx successful with hash: {}", kind, receipt.transaction_hash);
        debug!("{} receipt: block={:?} status={}", kind, receipt.block_number, receipt.status);
        Ok(receipt)
    }

    /// Pings spot then format. A failed spot ping skips the format ping.
    pub async fn tick(&self) -> Result<EpochTick, PingerError> {
        let spot = self.ping(ContractKind::Spot).await?;
        let format = self.ping(ContractKind::Format).await?;
        Ok(EpochTick { spot, format })
    }

    /// Ticks forever, sleeping `interval` after each tick. Returns only on error.
    pub async fn run(&self) -> Result<Infallible, PingerError> {
        info!("Pinging every {:?}", self.interval);
        loop {
            self.tick().await?;
            self.clock.sleep(self.interval).await;
        }
    }
}

/// Performs the startup sequence and produces a ready [`EpochPinger`].
pub struct EpochPingerBuilder<K = TokioClock> {
    config: Option<PingerConfig>,
    clock: K,
}

impl EpochPingerBuilder {
    pub fn new() -> Self {
        Self { config: None, clock: TokioClock }
    }
}

impl Default for EpochPingerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clock> EpochPingerBuilder<K> {
    pub fn with_config(mut self, config: PingerConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_clock<K2: Clock>(self, clock: K2) -> EpochPingerBuilder<K2> {
        EpochPingerBuilder { config: self.config, clock }
    }

    /// Validates both contract addresses before touching the network, then
    /// derives the account, binds the ABIs and reads the chain id.
    pub async fn build<C: ChainClient>(self, client: C) -> Result<EpochPinger<C, K>, PingerError> {
        let config = match self.config {
            Some(config) => config,
            None => PingerConfig::from_env()?,
        };

        let spot_address = validate_address(&ContractKind::Spot.to_string(), &config.spot.address)?;
        let format_address = validate_address(&ContractKind::Format.to_string(), &config.format.address)?;

        let account = Account::from_key(&config.private_key)?;

        info!("EXDT Testnet token Address = {}", config.token_address);
        info!("Pinger address = {}", account.address());
        info!("Spot_contract  = {}", to_checksum(&spot_address));
        info!("Format_contract  = {}", to_checksum(&format_address));

        let spot = ContractBinding::from_file(ContractKind::Spot, spot_address, &config.spot.abi_path).await?;
        let format = ContractBinding::from_file(ContractKind::Format, format_address, &config.format.abi_path).await?;

        let chain_id = client.chain_id().await?;
        info!("Connected to {} (chain id {})", config.rpc_url, chain_id);

        Ok(EpochPinger {
            client,
            clock: self.clock,
            account,
            spot,
            format,
            chain_id,
            gas_limit: config.gas_limit,
            interval: config.interval(),
        })
    }
}
