use alloy_json_abi::JsonAbi;
use alloy_primitives::{Address, Bytes};
use alloy_sol_types::{SolCall, sol};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use strum_macros::{Display, EnumString};
use tracing::debug;

use crate::error::PingerError;

sol! {
    /// Epoch counter shared by the DataSpotting and DataFormatting contracts
    interface IEpochTrigger {
        function TriggerNextEpoch() external;
    }
}

pub const EPOCH_FUNCTION: &str = "TriggerNextEpoch";

/// Which of the two pinged contracts a binding targets. Order of variants is
/// the order they are pinged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ContractKind {
    Spot,
    Format,
}

/// Truffle/Hardhat artifact; only the `abi` field is read.
#[derive(Deserialize)]
struct AbiArtifact {
    abi: JsonAbi,
}

/// Reads a JSON artifact with a top-level `abi` field.
pub async fn load_abi(path: impl AsRef<Path>) -> Result<JsonAbi, PingerError> {
    let path = path.as_ref();
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PingerError::AbiFileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(PingerError::MalformedAbi { path: path.to_path_buf(), reason: e.to_string() });
        }
    };

    let artifact: AbiArtifact = serde_json::from_str(&contents)
        .map_err(|e| PingerError::MalformedAbi { path: path.to_path_buf(), reason: e.to_string() })?;
    debug!("Loaded ABI from {} ({} functions)", path.display(), artifact.abi.functions().count());
    Ok(artifact.abi)
}

/// A checksummed contract address whose ABI was checked to expose the epoch trigger.
#[derive(Clone)]
pub struct ContractBinding {
    kind: ContractKind,
    address: Address,
    calldata: Bytes,
}

impl ContractBinding {
    /// Binds `abi` to `address`, checking the ABI exposes the epoch trigger.
    pub fn new(kind: ContractKind, address: Address, abi: JsonAbi) -> Result<Self, PingerError> {
        let selector = IEpochTrigger::TriggerNextEpochCall::SELECTOR;
        let exposes_trigger = abi
            .function(EPOCH_FUNCTION)
            .is_some_and(|overloads| overloads.iter().any(|f| f.inputs.is_empty() && f.selector() == selector));
        if !exposes_trigger {
            return Err(PingerError::MissingEpochFunction { contract: kind.to_string(), function: EPOCH_FUNCTION });
        }

        Ok(Self { kind, address, calldata: IEpochTrigger::TriggerNextEpochCall {}.abi_encode().into() })
    }

    pub async fn from_file(kind: ContractKind, address: Address, abi_path: impl AsRef<Path>) -> Result<Self, PingerError> {
        let abi = load_abi(abi_path).await?;
        Self::new(kind, address, abi)
    }

    pub fn kind(&self) -> ContractKind {
        self.kind
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Calldata for `TriggerNextEpoch()`.
    pub fn trigger_next_epoch(&self) -> Bytes {
        self.calldata.clone()
    }
}

impl fmt::Debug for ContractBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractBinding")
            .field("kind", &self.kind)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use std::str::FromStr;

    const SPOT_ABI: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/abi/DataSpotting.json");
    const FORMAT_ABI: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/abi/DataFormatting.json");

    const SPOT: Address = address!("0xf7b2f1fB641151e8369a0d91E6B634B6527F18BD");

    #[test]
    fn test_kind_names() {
        assert_eq!(ContractKind::Spot.to_string(), "spot");
        assert_eq!(ContractKind::from_str("format").unwrap(), ContractKind::Format);
    }

    #[test]
    fn test_calldata_is_selector() {
        assert_eq!(IEpochTrigger::TriggerNextEpochCall {}.abi_encode().len(), 4);
    }

    #[tokio::test]
    async fn test_bind_shipped_abis() {
        let spot = ContractBinding::from_file(ContractKind::Spot, SPOT, SPOT_ABI).await.unwrap();
        assert_eq!(spot.address(), SPOT);
        assert_eq!(spot.trigger_next_epoch().as_ref(), IEpochTrigger::TriggerNextEpochCall::SELECTOR.as_slice());

        let format = ContractBinding::from_file(ContractKind::Format, SPOT, FORMAT_ABI).await.unwrap();
        assert_eq!(format.kind(), ContractKind::Format);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = load_abi("abi/DoesNotExist.json").await.unwrap_err();
        assert!(matches!(err, PingerError::AbiFileNotFound(_)));
    }

    #[test]
    fn test_missing_trigger_function() {
        let abi: JsonAbi = serde_json::from_str(
            r#"[{"type":"function","name":"currentEpoch","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"}]"#,
        )
        .unwrap();
        let err = ContractBinding::new(ContractKind::Spot, SPOT, abi).unwrap_err();
        assert!(matches!(err, PingerError::MissingEpochFunction { .. }));
    }

    #[test]
    fn test_trigger_with_arguments_is_rejected() {
        let abi: JsonAbi = serde_json::from_str(
            r#"[{"type":"function","name":"TriggerNextEpoch","inputs":[{"name":"epoch","type":"uint256"}],"outputs":[],"stateMutability":"nonpayable"}]"#,
        )
        .unwrap();
        assert!(ContractBinding::new(ContractKind::Format, SPOT, abi).is_err());
    }

    #[test]
    fn test_artifact_without_abi_field() {
        let result: Result<AbiArtifact, _> = serde_json::from_str(r#"{"contractName":"DataSpotting"}"#);
        assert!(result.is_err());
    }
}
