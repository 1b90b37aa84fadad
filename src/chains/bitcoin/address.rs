// src/chains/bitcoin/address.rs
//
// Base58Check Address Codec
// Public Key (33B) → HASH160 (20B) → version || hash || checksum → base58

use crate::crypto::hash::hash160;
use crate::encoding::base58::{base58check_decode, base58check_encode};
use crate::error::{AddressError, WalletResult};
use crate::network::{AddressKind, ChecksumKind, NetworkParams};

/// Length of a public-key / script hash
pub const HASH_LEN: usize = 20;

/// A decoded address: which style it is and the 20-byte hash it pays to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodedAddress {
    pub kind: AddressKind,
    pub hash: [u8; HASH_LEN],
}

/// Address codec for Bitcoin-family networks
///
/// # Flow
/// encode: `base58(version || hash || SHA256(SHA256(version || hash))[..4])`
/// decode: base58 → verify checksum → match version against the network
pub struct AddressCodec;

impl AddressCodec {
    /// Legacy (pubkey-hash) address for `hash`
    #[inline]
    pub fn encode(hash: &[u8; HASH_LEN], params: &NetworkParams) -> WalletResult<String> {
        Self::encode_as(hash, AddressKind::PubKeyHash, params)
    }

    /// Address of a given style. Fails `UnsupportedVersion` if the network
    /// has no prefix for `kind`.
    pub fn encode_as(
        hash: &[u8; HASH_LEN],
        kind: AddressKind,
        params: &NetworkParams,
    ) -> WalletResult<String> {
        let version = params.version(kind).ok_or_else(|| {
            AddressError::UnsupportedVersion(format!("{:?} on {}", kind, params.name))
        })?;
        Self::encode_with_prefix(hash, version, params)
    }

    /// Address under one specific accepted prefix, e.g. Litecoin's legacy
    /// `0x05` script prefix.
    pub fn encode_with_prefix(
        hash: &[u8; HASH_LEN],
        prefix: &[u8],
        params: &NetworkParams,
    ) -> WalletResult<String> {
        if params.kind_of(prefix).is_none() {
            return Err(AddressError::UnsupportedVersion(hex::encode(prefix)).into());
        }

        let mut payload = Vec::with_capacity(prefix.len() + HASH_LEN);
        payload.extend_from_slice(prefix);
        payload.extend_from_slice(hash);

        Ok(match params.checksum {
            ChecksumKind::DoubleSha256 => base58check_encode(&payload, params.alphabet),
        })
    }

    /// P2PKH address of a SEC1 public key
    pub fn from_public_key(public_key: &[u8], params: &NetworkParams) -> WalletResult<String> {
        Self::encode(&hash160(public_key), params)
    }

    /// P2SH-wrapped P2WPKH address (BIP-49) of a compressed public key.
    ///
    /// redeem script = `OP_0 PUSH20 HASH160(pubkey)`, paid to via
    /// `HASH160(redeem script)` under the network's script prefix.
    pub fn from_public_key_nested_segwit(
        public_key: &[u8],
        params: &NetworkParams,
    ) -> WalletResult<String> {
        let mut redeem_script = [0u8; 2 + HASH_LEN];
        redeem_script[0] = 0x00;
        redeem_script[1] = HASH_LEN as u8;
        redeem_script[2..].copy_from_slice(&hash160(public_key));
        Self::encode_as(&hash160(&redeem_script), AddressKind::ScriptHash, params)
    }

    /// Decode to the 20-byte hash, whatever accepted style it is
    #[inline]
    pub fn decode(text: &str, params: &NetworkParams) -> WalletResult<[u8; HASH_LEN]> {
        Self::decode_typed(text, params).map(|a| a.hash)
    }

    /// Decode and report the address style.
    ///
    /// Errors: `InvalidBase58`, `InvalidLength`, `ChecksumMismatch`,
    /// `UnsupportedVersion` (prefix not accepted by `params`).
    pub fn decode_typed(text: &str, params: &NetworkParams) -> WalletResult<DecodedAddress> {
        let payload = match params.checksum {
            ChecksumKind::DoubleSha256 => base58check_decode(text, params.alphabet)?,
        };

        if payload.len() <= HASH_LEN {
            return Err(AddressError::InvalidLength(payload.len()).into());
        }

        let (version, body) = payload.split_at(payload.len() - HASH_LEN);
        let kind = params.kind_of(version).ok_or_else(|| {
            tracing::debug!(network = %params.name, version = %hex::encode(version), "rejected address version");
            AddressError::UnsupportedVersion(hex::encode(version))
        })?;

        let mut hash = [0u8; HASH_LEN];
        hash.copy_from_slice(body);
        Ok(DecodedAddress { kind, hash })
    }

    /// `true` if `text` decodes under `params`
    #[inline]
    pub fn is_valid(text: &str, params: &NetworkParams) -> bool {
        Self::decode_typed(text, params).is_ok()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WalletError;

    const GENESIS_HASH: &str = "62e907b15cbf27d5425399ebf6f0fb50ebb88f18";
    const GENESIS_ADDRESS: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";

    fn genesis_hash() -> [u8; 20] {
        let mut hash = [0u8; 20];
        hash.copy_from_slice(&hex::decode(GENESIS_HASH).unwrap());
        hash
    }

    #[test]
    fn test_encode_known_address() {
        let address = AddressCodec::encode(&genesis_hash(), &NetworkParams::bitcoin()).unwrap();
        assert_eq!(address, GENESIS_ADDRESS);
    }

    #[test]
    fn test_zero_hash_accounts() {
        let zero = [0u8; 20];
        assert_eq!(
            AddressCodec::encode(&zero, &NetworkParams::bitcoin()).unwrap(),
            "1111111111111111111114oLvT2"
        );
        assert_eq!(
            AddressCodec::encode(&zero, &NetworkParams::ripple()).unwrap(),
            "rrrrrrrrrrrrrrrrrrrrrhoLvTp"
        );
    }

    #[test]
    fn test_round_trip_all_presets() {
        let hashes = [[0u8; 20], [0xff; 20], genesis_hash()];
        for params in [
            NetworkParams::bitcoin(),
            NetworkParams::bitcoin_testnet(),
            NetworkParams::litecoin(),
            NetworkParams::dogecoin(),
            NetworkParams::ravencoin(),
            NetworkParams::horizen(),
            NetworkParams::ripple(),
        ] {
            for hash in &hashes {
                let text = AddressCodec::encode(hash, &params).unwrap();
                assert_eq!(&AddressCodec::decode(&text, &params).unwrap(), hash, "{}", params.name);
            }
        }
    }

    #[test]
    fn test_legacy_and_segwit_styles_differ() {
        let params = NetworkParams::bitcoin();
        let hash = genesis_hash();
        let legacy = AddressCodec::encode_as(&hash, AddressKind::PubKeyHash, &params).unwrap();
        let wrapped = AddressCodec::encode_as(&hash, AddressKind::ScriptHash, &params).unwrap();

        assert_ne!(legacy, wrapped);
        assert!(legacy.starts_with('1'));
        assert!(wrapped.starts_with('3'));

        let a = AddressCodec::decode_typed(&legacy, &params).unwrap();
        let b = AddressCodec::decode_typed(&wrapped, &params).unwrap();
        assert_eq!(a, DecodedAddress { kind: AddressKind::PubKeyHash, hash });
        assert_eq!(b, DecodedAddress { kind: AddressKind::ScriptHash, hash });
    }

    #[test]
    fn test_parse_real_addresses() {
        let btc = "3Mr2oyAu8826xvngbxqC3QhrGHA7oT88Lp";
        let decoded = AddressCodec::decode_typed(btc, &NetworkParams::bitcoin()).unwrap();
        assert_eq!(decoded.kind, AddressKind::ScriptHash);
        assert_eq!(
            AddressCodec::encode_as(&decoded.hash, decoded.kind, &NetworkParams::bitcoin()).unwrap(),
            btc
        );

        let zen = "zngzNC9QGPz8n8pduve8BfN2kDfsgVxwjYP";
        let decoded = AddressCodec::decode_typed(zen, &NetworkParams::horizen()).unwrap();
        assert_eq!(decoded.kind, AddressKind::PubKeyHash);
        assert_eq!(
            AddressCodec::encode(&decoded.hash, &NetworkParams::horizen()).unwrap(),
            zen
        );
    }

    #[test]
    fn test_checksum_bit_flips() {
        let params = NetworkParams::bitcoin();
        let raw = bs58::decode(GENESIS_ADDRESS).into_vec().unwrap();
        let checksum_start = raw.len() - 4;

        for byte in checksum_start..raw.len() {
            for bit in 0..8 {
                let mut corrupted = raw.clone();
                corrupted[byte] ^= 1 << bit;
                let text = bs58::encode(corrupted).into_string();
                assert_eq!(
                    AddressCodec::decode(&text, &params).unwrap_err(),
                    WalletError::Address(AddressError::ChecksumMismatch),
                    "byte {} bit {}",
                    byte,
                    bit
                );
            }
        }
    }

    #[test]
    fn test_wrong_network_rejected() {
        let ltc = NetworkParams::litecoin();
        let err = AddressCodec::decode(GENESIS_ADDRESS, &ltc).unwrap_err();
        assert_eq!(
            err,
            WalletError::Address(AddressError::UnsupportedVersion("00".to_string()))
        );
    }

    #[test]
    fn test_litecoin_accepts_legacy_script_prefix() {
        let ltc = NetworkParams::litecoin();
        let legacy_p2sh =
            AddressCodec::encode_as(&genesis_hash(), AddressKind::ScriptHash, &NetworkParams::bitcoin())
                .unwrap();
        let decoded = AddressCodec::decode_typed(&legacy_p2sh, &ltc).unwrap();
        assert_eq!(decoded.kind, AddressKind::ScriptHash);
        // re-encoding uses the preferred `M...` prefix
        let modern = AddressCodec::encode_as(&decoded.hash, decoded.kind, &ltc).unwrap();
        assert!(modern.starts_with('M'));
    }

    #[test]
    fn test_nested_segwit_from_public_key() {
        // m/49'/0'/0'/0/0 of the "abandon ... about" seed
        let public_key =
            hex::decode("039b3b694b8fc5b5e07fb069c783cac754f5d38c3e08bed1960e31fdb1dda35c24")
                .unwrap();

        let btc = AddressCodec::from_public_key_nested_segwit(&public_key, &NetworkParams::bitcoin())
            .unwrap();
        assert_eq!(btc, "37VucYSaXLCAsxYyAPfbSi9eh4iEcbShgf");
        assert_ne!(
            btc,
            AddressCodec::encode_as(&hash160(&public_key), AddressKind::ScriptHash, &NetworkParams::bitcoin())
                .unwrap()
        );

        let ltc = AddressCodec::from_public_key_nested_segwit(&public_key, &NetworkParams::litecoin())
            .unwrap();
        assert_eq!(ltc, "MDi3vRrYUT3bgTpsGGewGMQ41mJgdGfHpA");

        assert!(matches!(
            AddressCodec::from_public_key_nested_segwit(&public_key, &NetworkParams::ripple()),
            Err(WalletError::Address(AddressError::UnsupportedVersion(_)))
        ));
    }

    #[test]
    fn test_encode_with_secondary_prefix() {
        let ltc = NetworkParams::litecoin();
        let hash = genesis_hash();

        let legacy = AddressCodec::encode_with_prefix(&hash, &[0x05], &ltc).unwrap();
        assert_eq!(
            legacy,
            AddressCodec::encode_as(&hash, AddressKind::ScriptHash, &NetworkParams::bitcoin()).unwrap()
        );
        assert_eq!(
            AddressCodec::decode_typed(&legacy, &ltc).unwrap(),
            DecodedAddress { kind: AddressKind::ScriptHash, hash }
        );

        assert_eq!(
            AddressCodec::encode_with_prefix(&hash, &[0x00], &ltc).unwrap_err(),
            WalletError::Address(AddressError::UnsupportedVersion("00".to_string()))
        );
    }

    #[test]
    fn test_missing_kind_rejected() {
        let err = AddressCodec::encode_as(&[0u8; 20], AddressKind::ScriptHash, &NetworkParams::ripple())
            .unwrap_err();
        assert!(matches!(
            err,
            WalletError::Address(AddressError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_malformed_input() {
        let params = NetworkParams::bitcoin();
        assert!(matches!(
            AddressCodec::decode("1A1zP1eP5QGefi2DMPTfTL5SLmv7Divf0a", &params),
            Err(WalletError::Address(AddressError::InvalidBase58(_)))
        ));
        // valid checksum, payload too short to hold a hash
        let short = crate::encoding::base58check_encode(&[0x00; 10], params.alphabet);
        assert_eq!(
            AddressCodec::decode(&short, &params).unwrap_err(),
            WalletError::Address(AddressError::InvalidLength(10))
        );
        assert!(!AddressCodec::is_valid("", &params));
        assert!(!AddressCodec::is_valid(&format!(" {GENESIS_ADDRESS}"), &params));
        assert!(!AddressCodec::is_valid(&format!("{GENESIS_ADDRESS}\n"), &params));
    }
}
