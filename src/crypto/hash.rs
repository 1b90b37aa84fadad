// src/crypto/hash.rs
//
// Hash compositions shared by key derivation and the address codecs.

use crate::error::{CryptoError, WalletResult};
use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};
use zeroize::Zeroizing;

type HmacSha512 = Hmac<Sha512>;

/// HMAC-SHA512, output auto-zeroized on drop (it carries key material)
pub fn hmac_sha512(key: &[u8], data: &[&[u8]]) -> WalletResult<Zeroizing<[u8; 64]>> {
    let mut mac = HmacSha512::new_from_slice(key).map_err(|_| CryptoError::InvalidKeyMaterial)?;
    for part in data {
        mac.update(part);
    }
    let mut out = Zeroizing::new([0u8; 64]);
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA256(SHA256(data))
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// RIPEMD160(SHA256(data)), the Bitcoin "HASH160"
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(sha256(data)).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_empty() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hash160_of_genesis_pubkey() {
        // Uncompressed public key paid by the genesis coinbase
        let pubkey = hex::decode(
            "04678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb6\
             49f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5f",
        )
        .unwrap();
        assert_eq!(
            hex::encode(hash160(&pubkey)),
            "62e907b15cbf27d5425399ebf6f0fb50ebb88f18"
        );
    }

    #[test]
    fn test_hmac_parts_match_concatenation() {
        let split = hmac_sha512(b"key", &[&b"ab"[..], &b"cd"[..]]).unwrap();
        let joined = hmac_sha512(b"key", &[&b"abcd"[..]]).unwrap();
        assert_eq!(&*split, &*joined);
    }
}
