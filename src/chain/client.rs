use alloy_network::ReceiptResponse;
use alloy_primitives::{Address, Bytes, ChainId, TxHash};
use alloy_provider::{Provider, RootProvider};
use alloy_rpc_client::{ClientBuilder, RpcClient};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, trace};
use url::Url;

use crate::chain::transaction::Receipt;
use crate::error::PingerError;
use crate::utils::DEFAULT_RECEIPT_POLL_INTERVAL;

/// The chain reads and writes the pinger needs, one method per JSON-RPC call.
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn chain_id(&self) -> Result<ChainId, PingerError>;

    /// Confirmed transaction count of `address` at the latest block.
    async fn transaction_count(&self, address: Address) -> Result<u64, PingerError>;

    async fn gas_price(&self) -> Result<u128, PingerError>;

    async fn send_raw_transaction(&self, raw: &Bytes) -> Result<TxHash, PingerError>;

    /// Blocks until `hash` is mined.
    async fn wait_for_receipt(&self, hash: TxHash) -> Result<Receipt, PingerError>;
}

/// [`ChainClient`] over a plain HTTP JSON-RPC provider.
#[derive(Debug, Clone)]
pub struct RpcChainClient {
    provider: RootProvider,
    poll_interval: Duration,
    receipt_timeout: Option<Duration>,
}

impl RpcChainClient {
    pub fn new(rpc_url: Url) -> Self {
        Self::from_rpc_client(ClientBuilder::default().http(rpc_url))
    }

    pub fn from_rpc_client(client: RpcClient) -> Self {
        Self { provider: RootProvider::new(client), poll_interval: DEFAULT_RECEIPT_POLL_INTERVAL, receipt_timeout: None }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// `None` waits for a receipt forever.
    pub fn with_receipt_timeout(mut self, receipt_timeout: Option<Duration>) -> Self {
        self.receipt_timeout = receipt_timeout;
        self
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn chain_id(&self) -> Result<ChainId, PingerError> {
        self.provider.get_chain_id().await.map_err(|e| PingerError::from_rpc("eth_chainId", e))
    }

    async fn transaction_count(&self, address: Address) -> Result<u64, PingerError> {
        self.provider
            .get_transaction_count(address)
            .await
            .map_err(|e| PingerError::from_rpc("eth_getTransactionCount", e))
    }

    async fn gas_price(&self) -> Result<u128, PingerError> {
        self.provider.get_gas_price().await.map_err(|e| PingerError::from_rpc("eth_gasPrice", e))
    }

    async fn send_raw_transaction(&self, raw: &Bytes) -> Result<TxHash, PingerError> {
        let pending = self
            .provider
            .send_raw_transaction(raw)
            .await
            .map_err(|e| PingerError::from_rpc("eth_sendRawTransaction", e))?;
        Ok(*pending.tx_hash())
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<Receipt, PingerError> {
        let started = Instant::now();
        loop {
            let receipt = self
                .provider
                .get_transaction_receipt(hash)
                .await
                .map_err(|e| PingerError::from_rpc("eth_getTransactionReceipt", e))?;

            if let Some(receipt) = receipt {
                debug!("Receipt for {} after {:?}", hash, started.elapsed());
                return Ok(Receipt {
                    transaction_hash: receipt.transaction_hash(),
                    block_number: receipt.block_number(),
                    status: receipt.status(),
                });
            }

            if let Some(timeout) = self.receipt_timeout {
                if started.elapsed() >= timeout {
                    return Err(PingerError::ReceiptTimeout { hash, waited: started.elapsed() });
                }
            }
            trace!("No receipt for {} yet", hash);
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
