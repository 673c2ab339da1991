use alloy_consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy_eips::eip2718::Encodable2718;
use alloy_network::TxSignerSync;
use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;
use std::fmt;
use std::str::FromStr;

use crate::chain::transaction::{PendingTransaction, SignedTransaction};
use crate::error::PingerError;

/// The pinger's signing identity, derived once from a raw private key.
#[derive(Clone)]
pub struct Account {
    signer: PrivateKeySigner,
}

impl Account {
    /// Accepts the key as hex, with or without a `0x` prefix.
    pub fn from_key(private_key: &str) -> Result<Self, PingerError> {
        let signer = PrivateKeySigner::from_str(private_key.trim())
            .map_err(|e| PingerError::InvalidPrivateKey(e.to_string()))?;
        Ok(Self { signer })
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Signs a legacy (EIP-155) transaction and encodes it for `eth_sendRawTransaction`.
    pub fn sign(&self, pending: &PendingTransaction) -> Result<SignedTransaction, PingerError> {
        let mut tx: TxLegacy = pending.to_legacy();
        let signature = self.signer.sign_transaction_sync(&mut tx)?;
        let envelope: TxEnvelope = tx.into_signed(signature).into();

        Ok(SignedTransaction {
            hash: *envelope.tx_hash(),
            nonce: pending.nonce,
            raw: envelope.encoded_2718().into(),
        })
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account").field("address", &self.address()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_eips::eip2718::Decodable2718;
    use alloy_primitives::{Bytes, U256, address, keccak256};

    // Hardhat's first dev account.
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn pending(nonce: u64) -> PendingTransaction {
        PendingTransaction {
            to: address!("0xf7b2f1fB641151e8369a0d91E6B634B6527F18BD"),
            from: address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            nonce,
            value: U256::ZERO,
            gas_limit: 100_000_000,
            gas_price: 1000,
            chain_id: 1_517_929_550,
            input: Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]),
        }
    }

    #[test]
    fn test_address_from_key() {
        let account = Account::from_key(DEV_KEY).unwrap();
        assert_eq!(account.address(), address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"));

        let unprefixed = Account::from_key(&DEV_KEY[2..]).unwrap();
        assert_eq!(unprefixed.address(), account.address());
    }

    #[test]
    fn test_invalid_key() {
        assert!(matches!(Account::from_key("not-a-key"), Err(PingerError::InvalidPrivateKey(_))));
        assert!(matches!(Account::from_key("${PINGER_PRIVATE_KEY}"), Err(PingerError::InvalidPrivateKey(_))));
    }

    #[test]
    fn test_debug_hides_key() {
        let account = Account::from_key(DEV_KEY).unwrap();
        let debug = format!("{account:?}");
        assert!(!debug.contains(&DEV_KEY[2..]));
    }

    #[test]
    fn test_sign_encodes_request() {
        let account = Account::from_key(DEV_KEY).unwrap();
        let signed = account.sign(&pending(7)).unwrap();

        assert_eq!(signed.nonce, 7);
        assert_eq!(signed.hash, keccak256(&signed.raw));

        let envelope = TxEnvelope::decode_2718(&mut signed.raw.as_ref()).unwrap();
        let legacy = envelope.as_legacy().expect("legacy transaction").tx();
        assert_eq!(legacy.nonce, 7);
        assert_eq!(legacy.gas_price, 1000);
        assert_eq!(legacy.gas_limit, 100_000_000);
        assert_eq!(legacy.value, U256::ZERO);
        assert_eq!(legacy.chain_id, Some(1_517_929_550));
        assert_eq!(legacy.input, Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]));
    }
}
