// Two-Layer Architecture
pub mod chain;      // Chain Layer: addresses, signing, ABI bindings, JSON-RPC client
pub mod execution;  // Execution Layer: startup sequence and the epoch ping loop

pub mod error;

// Common utilities and types
pub mod utils;

pub use chain::{
    Account, ChainClient, ContractBinding, ContractKind, PendingTransaction, Receipt, RpcChainClient,
    SignedTransaction, to_checksum, validate_address,
};
pub use error::PingerError;
pub use execution::{Clock, EpochPinger, EpochPingerBuilder, EpochTick, PingerConfig, TokioClock};
