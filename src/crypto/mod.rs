// src/crypto/mod.rs

//! Core Cryptography Module
//!
//! - **Key Derivation**: BIP-32 extended keys over secp256k1 via [`KeyDeriver`] / [`ExtendedKey`].
//! - **Derivation Paths**: path type and BIP-44/49/84 builders via [`DerivationPath`] / [`DerivationPaths`].
//! - **Hashes**: HMAC-SHA512, SHA-256, HASH160 compositions in [`hash`].

pub mod hash;
pub mod key_deriver;
pub mod paths;

// Re-exports for cleaner API access
pub use key_deriver::{ExtendedKey, ExtendedKeyVersions, Fingerprint, KeyDeriver};
pub use paths::{coin_type, ChildIndex, DerivationPath, DerivationPaths};
