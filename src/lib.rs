// src/lib.rs

//! HD wallet core
//!
//! Deterministic key derivation and chain-specific encoding for a
//! multi-chain wallet:
//!
//! - [`crypto`]: BIP-32 extended keys, derivation paths, hash primitives.
//! - [`encoding`]: canonical byte serializer and Base58Check.
//! - [`network`]: per-network address parameters and their registry.
//! - [`chains`]: Bitcoin-family addresses and WIF, EOS actions, Waves asset ids.
//!
//! Signing, broadcasting and mnemonic handling live with the callers.

pub mod chains;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod network;

pub use crypto::{ChildIndex, DerivationPath, DerivationPaths, ExtendedKey, KeyDeriver};
pub use error::{WalletError, WalletResult};
pub use network::{NetworkParams, NetworkRegistry};
