// src/crypto/key_deriver/xkey.rs
//
// BIP-32 extended key serialization (xprv / xpub)
//
// 78 bytes: version(4) || depth(1) || parent fingerprint(4)
//           || child number(4) || chain code(32) || key data(33)
// then Base58Check.

use super::ExtendedKey;
use crate::encoding::{base58check_encode, Base58Alphabet, ByteSerializer};
use crate::error::WalletResult;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Version prefixes for serialized extended keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedKeyVersions {
    pub public: u32,
    pub private: u32,
}

impl ExtendedKeyVersions {
    /// xpub / xprv
    pub const MAINNET: Self = Self {
        public: 0x0488_b21e,
        private: 0x0488_ade4,
    };

    /// tpub / tprv
    pub const TESTNET: Self = Self {
        public: 0x0435_87cf,
        private: 0x0435_8394,
    };
}

impl Default for ExtendedKeyVersions {
    fn default() -> Self {
        Self::MAINNET
    }
}

impl ExtendedKey {
    fn serialize_header(&self, version: u32) -> ByteSerializer {
        ByteSerializer::with_capacity(78)
            .write_u32_be(version)
            .write_u8(self.depth())
            .write(self.parent_fingerprint().as_bytes())
            .write_u32_be(self.child_index().map(|c| c.raw()).unwrap_or(0))
            .write(self.chain_code())
    }

    /// Base58Check xprv. Fails `PrivateKeyRequired` on a public-only node.
    pub fn to_xprv(&self, versions: ExtendedKeyVersions) -> WalletResult<String> {
        let key = self.private_key()?;
        let payload = Zeroizing::new(
            self.serialize_header(versions.private)
                .write_u8(0x00)
                .write(&*key)
                .serialize(),
        );
        Ok(base58check_encode(&payload, Base58Alphabet::Bitcoin))
    }

    /// Base58Check xpub
    pub fn to_xpub(&self, versions: ExtendedKeyVersions) -> String {
        let payload = self
            .serialize_header(versions.public)
            .write(self.public_key())
            .serialize();
        base58check_encode(&payload, Base58Alphabet::Bitcoin)
    }
}
