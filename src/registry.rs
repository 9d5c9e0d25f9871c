//! Chain Registry
//!
//! Named codec instances bound to specific prefixes or chain ids.
//!
//! ## Standard Chains
//!
//! | Name        | Format          | Parameter           |
//! |-------------|-----------------|---------------------|
//! | `ETH`       | checksummed hex | default checksum    |
//! | `ECH`       | bech32          | `"echelon"`         |
//! | `ECHV`      | bech32          | `"echelonvaloper"`  |
//! | `ETHERMINT` | bech32          | `"ethermint"`       |
//!
//! Registries are immutable once built. Custom registries can be described
//! with serde-deserializable [`ChainSpec`] records.

use std::borrow::Cow;
use std::collections::BTreeMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bech32_codec::Bech32Codec;
use crate::convert::convert;
use crate::error::{AddressError, Result};
use crate::hex_codec::ChecksumHexCodec;

// ============================================================================
// Codecs
// ============================================================================

/// Either of the supported address encodings
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Codec {
    ChecksumHex(ChecksumHexCodec),
    Bech32(Bech32Codec),
}

impl Codec {
    pub fn encode(&self, payload: &[u8]) -> Result<String> {
        match self {
            Codec::ChecksumHex(codec) => Ok(codec.encode(payload)),
            Codec::Bech32(codec) => codec.encode(payload),
        }
    }

    pub fn decode(&self, address: &str) -> Result<Vec<u8>> {
        match self {
            Codec::ChecksumHex(codec) => codec.decode(address),
            Codec::Bech32(codec) => codec.decode(address),
        }
    }
}

/// A codec identified by chain name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedCodec {
    name: Cow<'static, str>,
    codec: Codec,
}

/// Ethereum-style checksummed hex
pub const ETH: NamedCodec = NamedCodec::checksum_hex("ETH", ChecksumHexCodec::new());

/// Echelon account addresses
pub const ECH: NamedCodec = NamedCodec::bech32("ECH", Bech32Codec::from_static("echelon"));

/// Echelon validator operator addresses
pub const ECHV: NamedCodec =
    NamedCodec::bech32("ECHV", Bech32Codec::from_static("echelonvaloper"));

/// Ethermint account addresses
pub const ETHERMINT: NamedCodec =
    NamedCodec::bech32("ETHERMINT", Bech32Codec::from_static("ethermint"));

impl NamedCodec {
    pub const fn checksum_hex(name: &'static str, codec: ChecksumHexCodec) -> Self {
        Self {
            name: Cow::Borrowed(name),
            codec: Codec::ChecksumHex(codec),
        }
    }

    pub const fn bech32(name: &'static str, codec: Bech32Codec) -> Self {
        Self {
            name: Cow::Borrowed(name),
            codec: Codec::Bech32(codec),
        }
    }

    pub fn new(name: impl Into<String>, codec: Codec) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            codec,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    /// Encode a raw payload to this chain's address format
    pub fn encode(&self, payload: &[u8]) -> Result<String> {
        self.codec.encode(payload)
    }

    /// Decode an address in this chain's format to its raw payload
    pub fn decode(&self, address: &str) -> Result<Vec<u8>> {
        self.codec.decode(address).map_err(|e| {
            debug!(codec = %self.name, error = %e, "Rejected address");
            e
        })
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Address format of a configured chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum CodecSpec {
    ChecksumHex {
        /// Chain id for the chain-specific checksum; absent or 0 uses the default
        #[serde(default)]
        chain_id: Option<u64>,
    },
    Bech32 {
        prefix: String,
    },
}

/// Configuration record for one registry entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSpec {
    pub name: String,
    #[serde(flatten)]
    pub codec: CodecSpec,
}

impl ChainSpec {
    /// Build the codec this record describes
    pub fn build(&self) -> Result<NamedCodec> {
        let codec = match &self.codec {
            CodecSpec::ChecksumHex { chain_id } => Codec::ChecksumHex(
                (*chain_id).map_or_else(ChecksumHexCodec::new, ChecksumHexCodec::with_chain_id),
            ),
            CodecSpec::Bech32 { prefix } => Codec::Bech32(Bech32Codec::new(prefix)?),
        };
        Ok(NamedCodec::new(self.name.clone(), codec))
    }
}

// ============================================================================
// Registry
// ============================================================================

lazy_static! {
    static ref GLOBAL_REGISTRY: ChainRegistry = ChainRegistry::standard();
}

/// Immutable table of named codecs
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    chains: BTreeMap<String, NamedCodec>,
}

impl ChainRegistry {
    /// Registry of the standard chains
    pub fn standard() -> Self {
        let chains = [ETH, ECH, ECHV, ETHERMINT]
            .into_iter()
            .map(|codec| (codec.name().to_string(), codec))
            .collect();
        Self { chains }
    }

    /// Process-wide standard registry, built on first use
    pub fn global() -> &'static ChainRegistry {
        &GLOBAL_REGISTRY
    }

    /// Build a registry from configuration records
    ///
    /// Fails on invalid prefixes and duplicate names.
    pub fn from_specs(specs: &[ChainSpec]) -> Result<Self> {
        let mut chains = BTreeMap::new();
        for spec in specs {
            let codec = spec.build()?;
            if chains.contains_key(&spec.name) {
                return Err(AddressError::DuplicateChain(spec.name.clone()));
            }
            chains.insert(spec.name.clone(), codec);
        }
        Ok(Self { chains })
    }

    pub fn get(&self, name: &str) -> Result<&NamedCodec> {
        self.chains
            .get(name)
            .ok_or_else(|| AddressError::UnknownChain(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.chains.contains_key(name)
    }

    /// Registered chain names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.chains.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedCodec> {
        self.chains.values()
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Convert an address between two registered chains
    pub fn convert(&self, from: &str, to: &str, address: &str) -> Result<String> {
        convert(self.get(from)?, self.get(to)?, address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry() {
        let registry = ChainRegistry::standard();
        assert_eq!(registry.len(), 4);
        assert!(!registry.is_empty());
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["ECH", "ECHV", "ETH", "ETHERMINT"]
        );

        assert_eq!(registry.get("ETH").unwrap(), &ETH);
        match registry.get("ECHV").unwrap().codec() {
            Codec::Bech32(codec) => assert_eq!(codec.prefix(), "echelonvaloper"),
            other => panic!("unexpected codec: {:?}", other),
        }
    }

    #[test]
    fn test_global_registry() {
        let a = ChainRegistry::global();
        let b = ChainRegistry::global();
        assert!(std::ptr::eq(a, b));
        assert!(a.contains("ECH"));
    }

    #[test]
    fn test_unknown_chain() {
        let registry = ChainRegistry::standard();
        assert_eq!(
            registry.get("BTC"),
            Err(AddressError::UnknownChain("BTC".into()))
        );
        assert_eq!(
            registry.convert("ETH", "BTC", "0x1111111111111111111111111111111111111111"),
            Err(AddressError::UnknownChain("BTC".into()))
        );
    }

    #[test]
    fn test_convert_by_name() {
        let registry = ChainRegistry::standard();
        let converted = registry
            .convert("ETH", "ECH", "0x1234567890123456789012345678901234567890")
            .unwrap();
        assert_eq!(converted, "echelon1zg69v7yszg69v7yszg69v7yszg69v7ysq96uwz");

        let back = registry.convert("ECH", "ETH", &converted).unwrap();
        assert_eq!(back, "0x1234567890123456789012345678901234567890");
    }

    #[test]
    fn test_from_specs() {
        let specs = vec![
            ChainSpec {
                name: "RSK".into(),
                codec: CodecSpec::ChecksumHex { chain_id: Some(30) },
            },
            ChainSpec {
                name: "TERRA".into(),
                codec: CodecSpec::Bech32 {
                    prefix: "terra".into(),
                },
            },
        ];
        let registry = ChainRegistry::from_specs(&specs).unwrap();
        assert_eq!(registry.len(), 2);

        let rsk = registry
            .convert("TERRA", "RSK", "terra1x46rqay4d3cssq8gxxvqz8xt6nwlz4td20k38v")
            .unwrap();
        assert_eq!(rsk.len(), 42);
        assert_eq!(
            registry.convert("RSK", "TERRA", &rsk).unwrap(),
            "terra1x46rqay4d3cssq8gxxvqz8xt6nwlz4td20k38v"
        );
    }

    #[test]
    fn test_from_specs_duplicate() {
        let spec = ChainSpec {
            name: "ECH".into(),
            codec: CodecSpec::Bech32 {
                prefix: "echelon".into(),
            },
        };
        assert_eq!(
            ChainRegistry::from_specs(&[spec.clone(), spec]).unwrap_err(),
            AddressError::DuplicateChain("ECH".into())
        );
    }

    #[test]
    fn test_from_specs_invalid_prefix() {
        let spec = ChainSpec {
            name: "BAD".into(),
            codec: CodecSpec::Bech32 {
                prefix: "MiXed".into(),
            },
        };
        assert!(matches!(
            ChainRegistry::from_specs(&[spec]),
            Err(AddressError::InvalidPrefix { .. })
        ));
    }

    #[test]
    fn test_named_codec_decode_error_passthrough() {
        assert!(matches!(
            ECH.decode("echelon1zg69v7yszg69v7yszg69v7yszg69v7ysq96uwy"),
            Err(AddressError::ChecksumError { .. })
        ));
    }
}
