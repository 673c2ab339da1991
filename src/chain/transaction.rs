use alloy_consensus::TxLegacy;
use alloy_primitives::{Address, Bytes, ChainId, TxHash, TxKind, U256};

/// An unsigned contract call, built fresh for every ping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransaction {
    pub to: Address,
    pub from: Address,
    pub nonce: u64,
    pub value: U256,
    pub gas_limit: u64,
    pub gas_price: u128,
    pub chain_id: ChainId,
    pub input: Bytes,
}

impl PendingTransaction {
    pub fn to_legacy(&self) -> TxLegacy {
        TxLegacy {
            chain_id: Some(self.chain_id),
            nonce: self.nonce,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            to: TxKind::Call(self.to),
            value: self.value,
            input: self.input.clone(),
        }
    }
}

/// Raw EIP-2718 bytes, valid for a single submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub hash: TxHash,
    pub nonce: u64,
    pub raw: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
    /// Reported by the node; the pinger logs it but does not act on it.
    pub status: bool,
}
