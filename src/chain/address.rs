use alloy_primitives::Address;
use std::str::FromStr;

use crate::error::PingerError;

/// Parses a `0x`-prefixed, 40 hex digit address.
///
/// All-lowercase and all-uppercase strings are accepted as-is. A mixed-case
/// string is treated as EIP-55 encoded and must carry a correct checksum.
pub fn validate_address(contract: &str, value: &str) -> Result<Address, PingerError> {
    let invalid = || PingerError::InvalidAddress { contract: contract.to_string(), value: value.to_string() };

    let digits = value.strip_prefix("0x").ok_or_else(invalid)?;
    if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        Address::parse_checksummed(value, None).map_err(|_| invalid())
    } else {
        Address::from_str(value).map_err(|_| invalid())
    }
}

pub fn to_checksum(address: &Address) -> String {
    address.to_checksum(None)
}
