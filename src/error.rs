use alloy_primitives::TxHash;
use alloy_transport::{RpcError, TransportErrorKind};
use eyre::Report;
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::LoadConfigError;

#[derive(Debug, thiserror::Error)]
pub enum PingerError {
    // Startup
    #[error("invalid {contract} contract address: {value}")]
    InvalidAddress { contract: String, value: String },
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("ABI file not found: {}", .0.display())]
    AbiFileNotFound(PathBuf),
    #[error("malformed ABI in {}: {reason}", path.display())]
    MalformedAbi { path: PathBuf, reason: String },
    #[error("{contract} ABI has no zero-argument {function}()")]
    MissingEpochFunction { contract: String, function: &'static str },
    #[error(transparent)]
    Config(#[from] LoadConfigError),

    // Chain
    #[error("connection error: {0}")]
    Connection(String),
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),
    #[error("nonce too low: {0}")]
    NonceTooLow(String),
    #[error("transaction reverted: {0}")]
    TransactionReverted(String),
    #[error("{op} failed: {source}")]
    Rpc {
        op: &'static str,
        #[source]
        source: RpcError<TransportErrorKind>,
    },
    #[error("signing failed: {0}")]
    Signing(#[from] alloy_signer::Error),
    #[error("no receipt for {hash} after {waited:?}")]
    ReceiptTimeout { hash: TxHash, waited: Duration },

    #[error(transparent)]
    InternalEyre(Report),
}

impl PingerError {
    /// Maps a JSON-RPC failure of `op` onto the error kinds callers act on.
    pub fn from_rpc(op: &'static str, error: RpcError<TransportErrorKind>) -> Self {
        if let Some(payload) = error.as_error_resp() {
            let message = payload.message.to_lowercase();
            if message.contains("insufficient funds") {
                return Self::InsufficientFunds(payload.message.to_string());
            }
            if message.contains("nonce too low") || message.contains("already known") {
                return Self::NonceTooLow(payload.message.to_string());
            }
            if message.contains("revert") {
                return Self::TransactionReverted(payload.message.to_string());
            }
        }

        match error {
            RpcError::Transport(kind) => Self::Connection(format!("{op}: {kind}")),
            other => Self::Rpc { op, source: other },
        }
    }

    /// Whether repeating the failed operation could succeed. Nothing in this
    /// crate retries; the flag is for supervisors that restart the pinger.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) | Self::NonceTooLow(_) | Self::ReceiptTimeout { .. } => true,
            Self::Rpc { source, .. } => matches!(source, RpcError::Transport(kind) if kind.is_retry_err()),
            _ => false,
        }
    }

    pub fn is_invalid_address(&self) -> bool {
        matches!(self, Self::InvalidAddress { .. })
    }
}

impl From<Report> for PingerError {
    fn from(error: Report) -> Self {
        Self::InternalEyre(error)
    }
}
