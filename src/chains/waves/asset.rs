// src/chains/waves/asset.rs
//
// Waves asset ids. An empty or missing id (or the literal "WAVES") is the
// native asset; anything else is a 32-byte base58 issued-asset id.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::encoding::ByteSerializer;
use crate::error::{AddressError, WalletError, WalletResult};

/// Smallest units per WAVES
pub const TOKEN: u64 = 100_000_000;
/// Units per milli-WAVES
pub const MILLI: u64 = 100_000;

pub const ASSET_ID_LEN: usize = 32;
pub const NATIVE_TICKER: &str = "WAVES";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AssetId {
    #[default]
    Waves,
    Issued([u8; ASSET_ID_LEN]),
}

impl AssetId {
    /// Map an optional textual id onto an [`AssetId`]
    pub fn normalize(id: Option<&str>) -> WalletResult<Self> {
        match id.map(str::trim) {
            None | Some("") => Ok(AssetId::Waves),
            Some(text) if text.eq_ignore_ascii_case(NATIVE_TICKER) => Ok(AssetId::Waves),
            Some(text) => {
                let bytes = bs58::decode(text)
                    .into_vec()
                    .map_err(|e| AddressError::InvalidBase58(e.to_string()))?;
                let id: [u8; ASSET_ID_LEN] = bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| AddressError::InvalidLength(bytes.len()))?;
                Ok(AssetId::Issued(id))
            }
        }
    }

    pub fn is_waves(&self) -> bool {
        matches!(self, AssetId::Waves)
    }

    /// Base58 id, `None` for the native asset
    pub fn to_base58(&self) -> Option<String> {
        match self {
            AssetId::Waves => None,
            AssetId::Issued(id) => Some(bs58::encode(id).into_string()),
        }
    }

    /// Option-encoded: `0` for WAVES, `1 || id` otherwise
    pub fn write_to(&self, out: ByteSerializer) -> ByteSerializer {
        match self {
            AssetId::Waves => out.write_u8(0),
            AssetId::Issued(id) => out.write_u8(1).write(id),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.write_to(ByteSerializer::with_capacity(1 + ASSET_ID_LEN))
            .serialize()
    }
}

impl FromStr for AssetId {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetId::normalize(Some(s))
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_base58() {
            Some(id) => f.write_str(&id),
            None => f.write_str(NATIVE_TICKER),
        }
    }
}

impl Serialize for AssetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_base58().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = Option::<String>::deserialize(deserializer)?;
        AssetId::normalize(id.as_deref()).map_err(serde::de::Error::custom)
    }
}
