// src/network/params.rs
//
// Per-chain constant bundles for Base58Check address codecs.

use crate::encoding::Base58Alphabet;
use serde::{Deserialize, Serialize};

/// Address style a version prefix stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressKind {
    /// Legacy pay-to-public-key-hash (`1...` on Bitcoin)
    #[serde(rename = "p2pkh")]
    PubKeyHash,
    /// Pay-to-script-hash, used for SegWit-wrapped addresses (`3...` on Bitcoin)
    #[serde(rename = "p2sh")]
    ScriptHash,
}

/// Checksum appended to the versioned payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecksumKind {
    /// First 4 bytes of SHA256(SHA256(payload))
    #[default]
    DoubleSha256,
}

/// One accepted version prefix (1 or more bytes)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressVersion {
    pub kind: AddressKind,
    pub prefix: Vec<u8>,
}

impl AddressVersion {
    pub fn new(kind: AddressKind, prefix: &[u8]) -> Self {
        Self {
            kind,
            prefix: prefix.to_vec(),
        }
    }
}

/// Network parameters for address encoding
///
/// `versions` lists every prefix the network accepts; when several share a
/// kind, the first one is the default for encoding, all of them decode, and
/// `AddressCodec::encode_with_prefix` picks any of them explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkParams {
    pub name: String,
    pub versions: Vec<AddressVersion>,
    #[serde(default)]
    pub checksum: ChecksumKind,
    #[serde(default)]
    pub alphabet: Base58Alphabet,
    /// WIF private-key prefix, `None` if the chain has no WIF format
    #[serde(default)]
    pub wif_prefix: Option<u8>,
}

impl NetworkParams {
    /// Default encoding prefix for `kind`
    pub fn version(&self, kind: AddressKind) -> Option<&[u8]> {
        self.versions
            .iter()
            .find(|v| v.kind == kind)
            .map(|v| v.prefix.as_slice())
    }

    /// Kind of an accepted prefix, `None` if the network does not accept it
    pub fn kind_of(&self, prefix: &[u8]) -> Option<AddressKind> {
        self.versions
            .iter()
            .find(|v| v.prefix == prefix)
            .map(|v| v.kind)
    }

    // =========================================================================
    // PRESETS
    // =========================================================================

    pub fn bitcoin() -> Self {
        Self::base58(
            "bitcoin",
            vec![
                AddressVersion::new(AddressKind::PubKeyHash, &[0x00]),
                AddressVersion::new(AddressKind::ScriptHash, &[0x05]),
            ],
            Some(0x80),
        )
    }

    pub fn bitcoin_testnet() -> Self {
        Self::base58(
            "bitcoin-testnet",
            vec![
                AddressVersion::new(AddressKind::PubKeyHash, &[0x6f]),
                AddressVersion::new(AddressKind::ScriptHash, &[0xc4]),
            ],
            Some(0xef),
        )
    }

    /// Litecoin: `M...` script hashes, legacy `3...` still accepted
    pub fn litecoin() -> Self {
        Self::base58(
            "litecoin",
            vec![
                AddressVersion::new(AddressKind::PubKeyHash, &[0x30]),
                AddressVersion::new(AddressKind::ScriptHash, &[0x32]),
                AddressVersion::new(AddressKind::ScriptHash, &[0x05]),
            ],
            Some(0xb0),
        )
    }

    pub fn dogecoin() -> Self {
        Self::base58(
            "dogecoin",
            vec![
                AddressVersion::new(AddressKind::PubKeyHash, &[0x1e]),
                AddressVersion::new(AddressKind::ScriptHash, &[0x16]),
            ],
            Some(0x9e),
        )
    }

    pub fn ravencoin() -> Self {
        Self::base58(
            "ravencoin",
            vec![
                AddressVersion::new(AddressKind::PubKeyHash, &[0x3c]),
                AddressVersion::new(AddressKind::ScriptHash, &[0x7a]),
            ],
            Some(0x80),
        )
    }

    /// Horizen (ZEN): two-byte prefixes, `zn...` / `zs...`
    pub fn horizen() -> Self {
        Self::base58(
            "horizen",
            vec![
                AddressVersion::new(AddressKind::PubKeyHash, &[0x20, 0x89]),
                AddressVersion::new(AddressKind::ScriptHash, &[0x20, 0x96]),
            ],
            Some(0x80),
        )
    }

    /// XRP ledger account ids: same construction, Ripple alphabet
    pub fn ripple() -> Self {
        Self {
            name: "ripple".to_string(),
            versions: vec![AddressVersion::new(AddressKind::PubKeyHash, &[0x00])],
            checksum: ChecksumKind::DoubleSha256,
            alphabet: Base58Alphabet::Ripple,
            wif_prefix: None,
        }
    }

    fn base58(name: &str, versions: Vec<AddressVersion>, wif_prefix: Option<u8>) -> Self {
        Self {
            name: name.to_string(),
            versions,
            checksum: ChecksumKind::DoubleSha256,
            alphabet: Base58Alphabet::Bitcoin,
            wif_prefix,
        }
    }
}
