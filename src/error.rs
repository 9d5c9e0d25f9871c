//! Error types for address encoding and conversion
//!
//! Every failure is a deterministic function of the input, so errors are
//! plain values that can be compared in tests.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, AddressError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    // ========================================================================
    // Decode Errors
    // ========================================================================
    /// Mixed-case hex address whose casing does not match the checksum
    #[error("Invalid address checksum: {address}")]
    InvalidChecksum { address: String },

    /// Bech32 checksum did not validate, or charset/case rules were violated
    #[error("Invalid bech32 checksum: {reason}")]
    ChecksumError { reason: String },

    /// Bech32 prefix does not belong to the expected chain
    #[error("Unrecognised address format: expected prefix '{expected}', got '{found}'")]
    UnrecognisedFormat { expected: String, found: String },

    /// Input does not parse as the expected encoding at all
    #[error("Malformed address: {reason}")]
    MalformedInput { reason: String },

    // ========================================================================
    // Registry Errors
    // ========================================================================
    #[error("Invalid bech32 prefix '{prefix}': {reason}")]
    InvalidPrefix { prefix: String, reason: String },

    #[error("Unknown chain: {0}")]
    UnknownChain(String),

    #[error("Chain already registered: {0}")]
    DuplicateChain(String),
}

impl AddressError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        AddressError::MalformedInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn checksum(reason: impl Into<String>) -> Self {
        AddressError::ChecksumError {
            reason: reason.into(),
        }
    }
}

impl From<bech32::Error> for AddressError {
    fn from(err: bech32::Error) -> Self {
        match err {
            bech32::Error::InvalidChecksum
            | bech32::Error::MixedCase
            | bech32::Error::InvalidChar(_) => AddressError::checksum(err.to_string()),
            // MissingSeparator, InvalidLength, InvalidData, InvalidPadding
            _ => AddressError::malformed(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bech32_error_classification() {
        assert!(matches!(
            AddressError::from(bech32::Error::InvalidChecksum),
            AddressError::ChecksumError { .. }
        ));
        assert!(matches!(
            AddressError::from(bech32::Error::MixedCase),
            AddressError::ChecksumError { .. }
        ));
        assert!(matches!(
            AddressError::from(bech32::Error::InvalidChar('b')),
            AddressError::ChecksumError { .. }
        ));
        assert!(matches!(
            AddressError::from(bech32::Error::MissingSeparator),
            AddressError::MalformedInput { .. }
        ));
        assert!(matches!(
            AddressError::from(bech32::Error::InvalidPadding),
            AddressError::MalformedInput { .. }
        ));
    }

    #[test]
    fn test_display() {
        let err = AddressError::UnrecognisedFormat {
            expected: "echelon".into(),
            found: "echelonvaloper".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("expected prefix 'echelon'"));
        assert!(msg.contains("'echelonvaloper'"));
    }
}
