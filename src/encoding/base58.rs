// src/encoding/base58.rs
//
// Base58Check: base58(payload || SHA256(SHA256(payload))[..4])

use crate::crypto::hash::sha256d;
use crate::error::{AddressError, WalletResult};
use serde::{Deserialize, Serialize};

/// Checksum length appended by Base58Check
pub const CHECKSUM_LEN: usize = 4;

/// Base58 alphabet used by a network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Base58Alphabet {
    /// Bitcoin and its forks
    #[default]
    Bitcoin,
    /// Ripple / XRP ledger
    Ripple,
}

impl Base58Alphabet {
    fn as_bs58(self) -> &'static bs58::Alphabet {
        match self {
            Base58Alphabet::Bitcoin => bs58::Alphabet::BITCOIN,
            Base58Alphabet::Ripple => bs58::Alphabet::RIPPLE,
        }
    }
}

/// First 4 bytes of the double SHA-256 of `payload`
pub fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let hash = sha256d(payload);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&hash[..CHECKSUM_LEN]);
    out
}

pub fn base58check_encode(payload: &[u8], alphabet: Base58Alphabet) -> String {
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum(payload));
    bs58::encode(data)
        .with_alphabet(alphabet.as_bs58())
        .into_string()
}

/// Decode and verify, returning the payload with the checksum stripped
pub fn base58check_decode(text: &str, alphabet: Base58Alphabet) -> WalletResult<Vec<u8>> {
    let mut data = bs58::decode(text)
        .with_alphabet(alphabet.as_bs58())
        .into_vec()
        .map_err(|e| AddressError::InvalidBase58(e.to_string()))?;

    if data.len() <= CHECKSUM_LEN {
        return Err(AddressError::InvalidLength(data.len()).into());
    }

    let split = data.len() - CHECKSUM_LEN;
    if checksum(&data[..split]) != data[split..] {
        return Err(AddressError::ChecksumMismatch.into());
    }

    data.truncate(split);
    Ok(data)
}

// =============================================================================
// TESTS
// =============================================================================
