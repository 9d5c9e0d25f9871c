//! Bech32 Address Codec
//!
//! Encodes raw address payloads as bech32 strings bound to a fixed
//! human-readable prefix (e.g. `echelon1...`, `echelonvaloper1...`).
//!
//! ## Layout
//!
//! ```text
//! | prefix | "1" | payload regrouped into 5-bit words | 6-char checksum |
//! ```
//!
//! Decoding is strict: the 5-bit to 8-bit regrouping rejects non-zero or
//! excess padding bits, and only the BIP-173 checksum constant is
//! accepted (bech32m strings fail with a checksum error).

use std::borrow::Cow;

use bech32::{FromBase32, ToBase32, Variant};

use crate::error::{AddressError, Result};

/// Maximum length of a bech32 string (BIP-173)
pub const MAX_BECH32_LEN: usize = 90;

/// Maximum length of a human-readable prefix (BIP-173)
pub const MAX_PREFIX_LEN: usize = 83;

/// Length of the bech32 checksum in characters
pub const CHECKSUM_LEN: usize = 6;

fn validate_prefix(prefix: &str) -> Result<String> {
    let invalid = |reason: &str| AddressError::InvalidPrefix {
        prefix: prefix.to_string(),
        reason: reason.to_string(),
    };

    if prefix.is_empty() || prefix.len() > MAX_PREFIX_LEN {
        return Err(invalid("length must be between 1 and 83"));
    }
    if !prefix.bytes().all(|b| (33..=126).contains(&b)) {
        return Err(invalid("characters must be printable ASCII"));
    }

    let has_lower = prefix.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = prefix.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(invalid("mixed case"));
    }

    Ok(prefix.to_ascii_lowercase())
}

/// Codec for bech32 addresses under one human-readable prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bech32Codec {
    prefix: Cow<'static, str>,
}

impl Bech32Codec {
    /// Create a codec, validating and lowercasing the prefix
    pub fn new(prefix: &str) -> Result<Self> {
        Ok(Self {
            prefix: Cow::Owned(validate_prefix(prefix)?),
        })
    }

    /// Create a codec from a built-in prefix
    ///
    /// The prefix must already be a valid lowercase human-readable part;
    /// an invalid one surfaces as an error from [`Bech32Codec::encode`].
    pub const fn from_static(prefix: &'static str) -> Self {
        Self {
            prefix: Cow::Borrowed(prefix),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Length of the string [`Bech32Codec::encode`] produces for `payload_len` bytes
    pub fn encoded_len(&self, payload_len: usize) -> usize {
        // prefix, "1", one word per 5 bits (last one padded), checksum
        self.prefix.len() + 1 + (payload_len * 8).div_ceil(5) + CHECKSUM_LEN
    }

    /// Encode raw bytes to a bech32 address under this codec's prefix
    ///
    /// Fails with `MalformedInput` when the result would exceed
    /// [`MAX_BECH32_LEN`], since [`Bech32Codec::decode`] would reject it.
    pub fn encode(&self, payload: &[u8]) -> Result<String> {
        let len = self.encoded_len(payload.len());
        if len > MAX_BECH32_LEN {
            return Err(AddressError::malformed(format!(
                "encoded address would be {} chars, limit is {}",
                len, MAX_BECH32_LEN
            )));
        }

        bech32::encode(&self.prefix, payload.to_base32(), Variant::Bech32).map_err(|e| {
            AddressError::InvalidPrefix {
                prefix: self.prefix.to_string(),
                reason: e.to_string(),
            }
        })
    }

    /// Decode a bech32 address to raw bytes
    ///
    /// Fails with `UnrecognisedFormat` when the checksum is valid but the
    /// prefix belongs to another chain.
    pub fn decode(&self, address: &str) -> Result<Vec<u8>> {
        if address.len() > MAX_BECH32_LEN {
            return Err(AddressError::malformed(format!(
                "bech32 string exceeds {} chars",
                MAX_BECH32_LEN
            )));
        }

        let (hrp, words, variant) = bech32::decode(address)?;

        if variant != Variant::Bech32 {
            return Err(AddressError::checksum("bech32m checksum not accepted"));
        }

        if hrp != self.prefix {
            return Err(AddressError::UnrecognisedFormat {
                expected: self.prefix.to_string(),
                found: hrp,
            });
        }

        Ok(Vec::<u8>::from_base32(&words)?)
    }
}
