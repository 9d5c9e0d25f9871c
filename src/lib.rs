//! Echelon Address: conversion between checksummed hex and bech32 addresses
//!
//! Echelon accounts exist in two textual forms that share the same raw
//! 20-byte payload:
//!
//! - **Checksummed hex** - `0x`-prefixed, EIP-55 casing (EVM tooling)
//! - **Bech32** - `echelon1...` accounts, `echelonvaloper1...` validators (Cosmos tooling)
//!
//! ## Usage
//!
//! ```
//! use echelon_address::{echelon_to_eth, eth_to_echelon};
//!
//! let ech = eth_to_echelon("0x1234567890123456789012345678901234567890").unwrap();
//! assert_eq!(ech, "echelon1zg69v7yszg69v7yszg69v7yszg69v7ysq96uwz");
//! assert_eq!(
//!     echelon_to_eth(&ech).unwrap(),
//!     "0x1234567890123456789012345678901234567890"
//! );
//! ```
//!
//! Every function is pure; codecs and registries are immutable and can be
//! shared across threads freely.

pub mod bech32_codec;
pub mod convert;
pub mod error;
pub mod hex_codec;
pub mod registry;

// Re-export commonly used items at the crate root
pub use bech32_codec::Bech32Codec;
pub use convert::{
    convert, echelon_to_eth, echelonv_to_eth, eth_to_echelon, eth_to_echelonv, eth_to_ethermint,
    ethermint_to_eth,
};
pub use error::{AddressError, Result};
pub use hex_codec::{is_valid_checksum_address, keccak256, to_checksum_address, ChecksumHexCodec};
pub use registry::{
    ChainRegistry, ChainSpec, Codec, CodecSpec, NamedCodec, ECH, ECHV, ETH, ETHERMINT,
};
