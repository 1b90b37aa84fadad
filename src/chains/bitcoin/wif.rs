// src/chains/bitcoin/wif.rs
//
// Wallet Import Format: base58check(prefix || key(32) || 0x01)
// The trailing 0x01 marks the key as belonging to a compressed public key.

use crate::crypto::ExtendedKey;
use crate::encoding::base58check_encode;
use crate::error::{AddressError, WalletResult};
use crate::network::NetworkParams;
use zeroize::Zeroizing;

const COMPRESSED_MARKER: u8 = 0x01;

/// Export the node's private key as compressed-key WIF for `params`
pub fn encode_wif(key: &ExtendedKey, params: &NetworkParams) -> WalletResult<Zeroizing<String>> {
    let prefix = params.wif_prefix.ok_or_else(|| {
        AddressError::UnsupportedVersion(format!("no WIF prefix on {}", params.name))
    })?;
    let secret = key.private_key()?;

    let mut payload = Zeroizing::new(Vec::with_capacity(34));
    payload.push(prefix);
    payload.extend_from_slice(&*secret);
    payload.push(COMPRESSED_MARKER);

    Ok(Zeroizing::new(base58check_encode(&payload, params.alphabet)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{base58check_decode, Base58Alphabet};
    use crate::error::{CryptoError, WalletError};

    fn key_of_one() -> ExtendedKey {
        let mut one = [0u8; 32];
        one[31] = 1;
        ExtendedKey::from_private_key(&one, [0u8; 32]).unwrap()
    }

    #[test]
    fn test_private_key_one() {
        let wif = encode_wif(&key_of_one(), &NetworkParams::bitcoin()).unwrap();
        assert_eq!(
            wif.as_str(),
            "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn"
        );
    }

    #[test]
    fn test_layout() {
        let wif = encode_wif(&key_of_one(), &NetworkParams::bitcoin_testnet()).unwrap();
        let raw = base58check_decode(&wif, Base58Alphabet::Bitcoin).unwrap();
        assert_eq!(raw.len(), 34);
        assert_eq!(raw[0], 0xef);
        assert_eq!(raw[32], 0x01);
        assert_eq!(raw[33], COMPRESSED_MARKER);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            encode_wif(&key_of_one(), &NetworkParams::ripple()),
            Err(WalletError::Address(AddressError::UnsupportedVersion(_)))
        ));
        assert_eq!(
            encode_wif(&key_of_one().neuter(), &NetworkParams::bitcoin()).unwrap_err(),
            WalletError::Crypto(CryptoError::PrivateKeyRequired)
        );
    }
}
