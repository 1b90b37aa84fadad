// src/crypto/key_deriver/secp256k1.rs
//
// secp256k1 Key Derivation - BIP-32 primitives
//
// Dùng cho: Bitcoin, Litecoin, Dogecoin, Horizen, EOS, ...
// Algorithm: HMAC-SHA512 hierarchical deterministic derivation
// Reference: https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki

use crate::crypto::hash::hmac_sha512;
use crate::crypto::paths::ChildIndex;
use crate::error::{CryptoError, WalletResult};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, NonZeroScalar, ProjectivePoint, PublicKey, Scalar, SecretKey};
use zeroize::Zeroizing;

/// secp256k1 group order `n`, big-endian
pub const CURVE_ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// Compressed SEC1 point length
pub const PUBLIC_KEY_LEN: usize = 33;

/// Output of one HMAC-SHA512 step: the key half and the chain code half
#[cfg_attr(test, derive(Debug))]
pub(crate) struct Derived<K> {
    pub key: K,
    pub chain_code: [u8; 32],
}

/// secp256k1 Key Deriver - BIP-32 Standard
///
/// Stateless; every function is a pure map from parent material to child
/// material. Curve order checks are explicit and never retried with the
/// next index.
pub struct Secp256k1Deriver;

impl Secp256k1Deriver {
    /// BIP-32 master key HMAC key
    pub const MASTER_SECRET: &'static [u8] = b"Bitcoin seed";

    /// I = HMAC-SHA512(Key = "Bitcoin seed", Data = seed)
    /// IL (32 bytes) = master secret, IR (32 bytes) = chain code
    pub(crate) fn master(seed: &[u8]) -> WalletResult<Derived<SecretKey>> {
        // any non-empty length is hashed as-is
        if seed.is_empty() {
            return Err(CryptoError::InvalidSeed("seed is empty".to_string()).into());
        }

        let i = hmac_sha512(Self::MASTER_SECRET, &[seed])?;
        let (il, ir) = split(&i);
        Ok(Derived {
            key: secret_from_be(&il)?,
            chain_code: ir,
        })
    }

    /// CKDpriv
    ///
    /// - hardened: Data = 0x00 || ser256(k_par) || ser32(i)
    /// - normal:   Data = serP(K_par) || ser32(i)
    ///
    /// k_i = (IL + k_par) mod n; fails if IL >= n or k_i == 0
    pub(crate) fn ckd_priv(
        parent: &SecretKey,
        parent_public: &[u8; PUBLIC_KEY_LEN],
        chain_code: &[u8; 32],
        index: ChildIndex,
    ) -> WalletResult<Derived<SecretKey>> {
        let index_be = index.raw().to_be_bytes();
        let i = if index.is_hardened() {
            let mut parent_bytes = Zeroizing::new([0u8; 32]);
            parent_bytes.copy_from_slice(&parent.to_bytes());
            hmac_sha512(chain_code, &[&[0x00u8][..], &parent_bytes[..], &index_be[..]])?
        } else {
            hmac_sha512(chain_code, &[&parent_public[..], &index_be[..]])?
        };
        let (il, ir) = split(&i);

        let tweak = scalar_from_be(&il)?;
        let child = tweak + *parent.to_nonzero_scalar();
        let child = Option::<NonZeroScalar>::from(NonZeroScalar::new(child))
            .ok_or(CryptoError::InvalidKeyMaterial)?;

        Ok(Derived {
            key: SecretKey::from(child),
            chain_code: ir,
        })
    }

    /// CKDpub (non-hardened only): K_i = IL·G + K_par
    pub(crate) fn ckd_pub(
        parent: &PublicKey,
        chain_code: &[u8; 32],
        index: ChildIndex,
    ) -> WalletResult<Derived<PublicKey>> {
        if index.is_hardened() {
            return Err(CryptoError::PrivateKeyRequired.into());
        }

        let parent_bytes = compress(parent);
        let i = hmac_sha512(chain_code, &[&parent_bytes[..], &index.raw().to_be_bytes()[..]])?;
        let (il, ir) = split(&i);

        let tweak = scalar_from_be(&il)?;
        let point = ProjectivePoint::GENERATOR * tweak + parent.to_projective();
        // identity point => invalid child
        let child =
            PublicKey::from_affine(point.to_affine()).map_err(|_| CryptoError::InvalidKeyMaterial)?;

        Ok(Derived {
            key: child,
            chain_code: ir,
        })
    }
}

/// Compressed SEC1 encoding (0x02/0x03 || X)
pub fn compress(public_key: &PublicKey) -> [u8; PUBLIC_KEY_LEN] {
    let encoded = public_key.to_encoded_point(true);
    let mut out = [0u8; PUBLIC_KEY_LEN];
    out.copy_from_slice(encoded.as_bytes());
    out
}

/// Parse a SEC1 public key (compressed or uncompressed)
pub fn parse_public_key(bytes: &[u8]) -> WalletResult<PublicKey> {
    PublicKey::from_sec1_bytes(bytes).map_err(|_| CryptoError::InvalidPublicKey.into())
}

/// Scalar in `[0, n)`, `InvalidKeyMaterial` otherwise
pub(crate) fn scalar_from_be(bytes: &[u8; 32]) -> WalletResult<Scalar> {
    // fixed-width big-endian arrays order the same way as the integers they encode
    if bytes >= &CURVE_ORDER {
        return Err(CryptoError::InvalidKeyMaterial.into());
    }
    Option::<Scalar>::from(Scalar::from_repr(FieldBytes::from(*bytes)))
        .ok_or_else(|| CryptoError::InvalidKeyMaterial.into())
}

/// Private key in `(0, n)`, `InvalidKeyMaterial` otherwise
pub(crate) fn secret_from_be(bytes: &[u8; 32]) -> WalletResult<SecretKey> {
    scalar_from_be(bytes)?;
    SecretKey::from_bytes(&FieldBytes::from(*bytes)).map_err(|_| CryptoError::InvalidKeyMaterial.into())
}

/// Normalize a variable-length big-endian integer to exactly 32 bytes.
///
/// Leading zero bytes (e.g. the sign byte of a 33-byte two's-complement
/// encoding) are dropped before left-padding, so zero bytes that belong to
/// the value itself survive. More than 32 significant bytes is
/// `InvalidKeyMaterial`.
pub fn to_fixed_32(bytes: &[u8]) -> WalletResult<Zeroizing<[u8; 32]>> {
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    let significant = &bytes[first..];
    if significant.len() > 32 {
        return Err(CryptoError::InvalidKeyMaterial.into());
    }
    let mut out = Zeroizing::new([0u8; 32]);
    out[32 - significant.len()..].copy_from_slice(significant);
    Ok(out)
}

fn split(i: &[u8; 64]) -> ([u8; 32], [u8; 32]) {
    let mut il = [0u8; 32];
    let mut ir = [0u8; 32];
    il.copy_from_slice(&i[..32]);
    ir.copy_from_slice(&i[32..]);
    (il, ir)
}

// =============================================================================
// TESTS
// =============================================================================
