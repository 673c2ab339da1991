/// Chain Layer
///
/// Everything that talks to, or prepares data for, the JSON-RPC endpoint:
/// address validation, the signing account, ABI bindings, transaction
/// types and the [`ChainClient`] seam the pinger is tested through.

pub mod account;
pub mod address;
pub mod client;
pub mod contract;
pub mod transaction;

pub use account::Account;
pub use address::{to_checksum, validate_address};
pub use client::{ChainClient, RpcChainClient};
pub use contract::{ContractBinding, ContractKind, EPOCH_FUNCTION, IEpochTrigger, load_abi};
pub use transaction::{PendingTransaction, Receipt, SignedTransaction};
