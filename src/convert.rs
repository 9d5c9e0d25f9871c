//! Address conversion functions
//!
//! Each converter decodes with the source chain's codec and re-encodes the
//! raw payload with the target chain's codec. Decode errors propagate
//! unchanged.

use tracing::trace;

use crate::error::Result;
use crate::registry::{NamedCodec, ECH, ECHV, ETH, ETHERMINT};

/// Convert an address from one chain's format to another's
pub fn convert(from: &NamedCodec, to: &NamedCodec, address: &str) -> Result<String> {
    trace!(from = %from.name(), to = %to.name(), "Converting address");
    let payload = from.decode(address)?;
    to.encode(&payload)
}

/// `0x...` to `echelon1...`
pub fn eth_to_echelon(address: &str) -> Result<String> {
    convert(&ETH, &ECH, address)
}

/// `echelon1...` to `0x...`
pub fn echelon_to_eth(address: &str) -> Result<String> {
    convert(&ECH, &ETH, address)
}

/// `0x...` to `echelonvaloper1...`
pub fn eth_to_echelonv(address: &str) -> Result<String> {
    convert(&ETH, &ECHV, address)
}

/// `echelonvaloper1...` to `0x...`
pub fn echelonv_to_eth(address: &str) -> Result<String> {
    convert(&ECHV, &ETH, address)
}

/// `0x...` to `ethermint1...`
pub fn eth_to_ethermint(address: &str) -> Result<String> {
    convert(&ETH, &ETHERMINT, address)
}

/// `ethermint1...` to `0x...`
pub fn ethermint_to_eth(address: &str) -> Result<String> {
    convert(&ETHERMINT, &ETH, address)
}
