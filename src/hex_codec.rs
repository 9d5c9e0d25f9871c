//! Checksummed Hex Address Codec
//!
//! Encodes raw address payloads as `0x`-prefixed hex where the case of each
//! alphabetic digit carries one bit of a keccak256 checksum.
//!
//! ## Checksum Variants
//!
//! - Default (EIP-55): the hash input is the lowercase hex digits.
//! - Chain-specific (EIP-1191): the hash input is `"{chain_id}0x{lowercase hex}"`.
//!
//! Digit `i` is uppercased when nibble `i` of the hash is `>= 8`.
//!
//! ## Decode Policy
//!
//! ```text
//! checksum matches casing        -> accept
//! mixed case, checksum mismatch  -> InvalidChecksum
//! all lowercase / all uppercase  -> accept (unchecked)
//! ```

use tiny_keccak::{Hasher, Keccak};

use crate::error::{AddressError, Result};

/// Hex marker prefix
pub const HEX_PREFIX: &str = "0x";

/// Length of a hex address payload in bytes
pub const HEX_ADDRESS_LEN: usize = 20;

/// Compute keccak256 hash of data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Strip the `0x` marker if present
pub fn strip_hex_prefix(address: &str) -> &str {
    address.strip_prefix(HEX_PREFIX).unwrap_or(address)
}

/// Encode a payload as a checksummed, `0x`-prefixed hex string
///
/// A `chain_id` of `None` or `Some(0)` selects the default variant.
pub fn to_checksum_address(payload: &[u8], chain_id: Option<u64>) -> String {
    let lower = hex::encode(payload);
    format!("{}{}", HEX_PREFIX, apply_checksum(&lower, chain_id))
}

/// Check that `address` is `0x` + 40 hex digits with exactly the checksum casing
pub fn is_valid_checksum_address(address: &str, chain_id: Option<u64>) -> bool {
    let Some(digits) = address.strip_prefix(HEX_PREFIX) else {
        return false;
    };
    if digits.len() != HEX_ADDRESS_LEN * 2 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return false;
    }
    apply_checksum(&digits.to_ascii_lowercase(), chain_id) == digits
}

fn apply_checksum(lower: &str, chain_id: Option<u64>) -> String {
    let hash = match chain_id.filter(|&id| id != 0) {
        Some(id) => keccak256(format!("{}{}{}", id, HEX_PREFIX, lower).as_bytes()),
        None => keccak256(lower.as_bytes()),
    };

    lower
        .chars()
        .enumerate()
        .map(|(i, c)| {
            // Two nibbles per hash byte, high nibble first
            let nibble = hash
                .get(i / 2)
                .map(|byte| if i % 2 == 0 { byte >> 4 } else { byte & 0x0f })
                .unwrap_or(0);
            if nibble >= 8 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

// ============================================================================
// Codec
// ============================================================================

/// Codec for checksummed hex addresses, optionally bound to a chain id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChecksumHexCodec {
    chain_id: Option<u64>,
}

impl ChecksumHexCodec {
    /// Codec using the default (EIP-55) checksum
    pub const fn new() -> Self {
        Self { chain_id: None }
    }

    /// Codec using the chain-specific (EIP-1191) checksum
    ///
    /// Chain id 0 is treated as absent.
    pub const fn with_chain_id(chain_id: u64) -> Self {
        if chain_id == 0 {
            Self::new()
        } else {
            Self {
                chain_id: Some(chain_id),
            }
        }
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    /// Encode a payload to its checksummed hex form
    ///
    /// Any payload length encodes, but [`ChecksumHexCodec::decode`] only
    /// accepts 20-byte addresses back.
    pub fn encode(&self, payload: &[u8]) -> String {
        to_checksum_address(payload, self.chain_id)
    }

    /// Decode a hex address to its raw 20-byte payload
    ///
    /// The `0x` marker is optional for uniform-case input, which is accepted
    /// without verification. Mixed-case input must carry the marker and the
    /// correct checksum casing.
    pub fn decode(&self, address: &str) -> Result<Vec<u8>> {
        let digits = strip_hex_prefix(address);

        if digits.len() != HEX_ADDRESS_LEN * 2 {
            return Err(AddressError::malformed(format!(
                "expected {} hex chars, got {}",
                HEX_ADDRESS_LEN * 2,
                digits.len()
            )));
        }

        let payload = hex::decode(digits)
            .map_err(|e| AddressError::malformed(format!("invalid hex: {}", e)))?;

        if is_valid_checksum_address(address, self.chain_id) {
            return Ok(payload);
        }

        let mixed_case =
            digits != digits.to_ascii_lowercase() && digits != digits.to_ascii_uppercase();
        if mixed_case {
            return Err(AddressError::InvalidChecksum {
                address: address.to_string(),
            });
        }

        Ok(payload)
    }
}
