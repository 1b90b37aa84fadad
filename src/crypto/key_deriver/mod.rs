// src/crypto/key_deriver/mod.rs
//
// Key Derivation Engine - BIP-32 extended keys
//
// ┌──────────────────────────────────────────────┐
// │  Seed (16..64 bytes, supplied by the caller) │
// │                    │                         │
// │                    ▼                         │
// │   master = HMAC-SHA512("Bitcoin seed", seed) │
// │                    │                         │
// │        ┌───────────┴───────────┐             │
// │        ▼                       ▼             │
// │   CKDpriv (any index)    CKDpub (normal only)│
// │        │                       │             │
// │        └──── ExtendedKey ──────┘             │
// │                    │                         │
// │     public key → HASH160 → address codec     │
// └──────────────────────────────────────────────┘

pub mod secp256k1;
pub mod xkey;

pub use secp256k1::Secp256k1Deriver;
pub use xkey::ExtendedKeyVersions;

use crate::crypto::hash::hash160;
use crate::crypto::paths::{ChildIndex, DerivationPath, MAX_DEPTH};
use crate::error::{CryptoError, WalletResult};
use k256::{PublicKey, SecretKey};
use once_cell::race::OnceBox;
use self::secp256k1::PUBLIC_KEY_LEN;
use std::fmt;
use zeroize::{Zeroize, Zeroizing};

// =============================================================================
// COMMON TYPES
// =============================================================================
/// First 4 bytes of HASH160(public key).
///
/// Opaque: compared and stored byte-for-byte, never as a signed integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Fingerprint([u8; 4]);

impl Fingerprint {
    /// Parent fingerprint of a master key
    pub const ROOT: Fingerprint = Fingerprint([0u8; 4]);

    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

#[derive(Clone)]
enum KeyMaterial {
    Private(SecretKey),
    Public(PublicKey),
}

/// BIP-32 extended key: key + chain code + position in the tree.
///
/// Immutable after construction. The compressed public key is computed on
/// first use and cached; two threads racing on the first access may both
/// compute it, which is harmless because the result is a pure function of
/// the private scalar and the first stored value wins.
pub struct ExtendedKey {
    material: KeyMaterial,
    chain_code: [u8; 32],
    path: DerivationPath,
    parent_fingerprint: Fingerprint,
    public_key: OnceBox<[u8; PUBLIC_KEY_LEN]>,
}

impl ExtendedKey {
    fn new(
        material: KeyMaterial,
        chain_code: [u8; 32],
        path: DerivationPath,
        parent_fingerprint: Fingerprint,
    ) -> Self {
        Self {
            material,
            chain_code,
            path,
            parent_fingerprint,
            public_key: OnceBox::new(),
        }
    }

    /// Master key from a seed (see [`KeyDeriver::from_seed`])
    pub fn from_seed(seed: &[u8]) -> WalletResult<Self> {
        let master = Secp256k1Deriver::master(seed)?;
        Ok(Self::new(
            KeyMaterial::Private(master.key),
            master.chain_code,
            DerivationPath::root(),
            Fingerprint::ROOT,
        ))
    }

    /// Rebuild a root node from stored private key + chain code.
    ///
    /// `private_key` may be any big-endian encoding of the scalar, including
    /// a 33-byte one carrying a leading sign byte.
    pub fn from_private_key(private_key: &[u8], chain_code: [u8; 32]) -> WalletResult<Self> {
        let fixed = secp256k1::to_fixed_32(private_key)?;
        let secret = secp256k1::secret_from_be(&fixed)?;
        Ok(Self::new(
            KeyMaterial::Private(secret),
            chain_code,
            DerivationPath::root(),
            Fingerprint::ROOT,
        ))
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn has_private_key(&self) -> bool {
        matches!(self.material, KeyMaterial::Private(_))
    }

    /// Private scalar, always exactly 32 bytes big-endian
    pub fn private_key(&self) -> WalletResult<Zeroizing<[u8; 32]>> {
        match &self.material {
            KeyMaterial::Private(secret) => {
                let mut out = Zeroizing::new([0u8; 32]);
                out.copy_from_slice(&secret.to_bytes());
                Ok(out)
            }
            KeyMaterial::Public(_) => Err(CryptoError::PrivateKeyRequired.into()),
        }
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    pub fn path(&self) -> &DerivationPath {
        &self.path
    }

    pub fn depth(&self) -> u8 {
        // DerivationPath caps depth at 255
        self.path.depth() as u8
    }

    /// Index this node was derived with, `None` for a root
    pub fn child_index(&self) -> Option<ChildIndex> {
        self.path.last()
    }

    pub fn parent_fingerprint(&self) -> Fingerprint {
        self.parent_fingerprint
    }

    /// Compressed SEC1 public key, computed once and cached
    pub fn public_key(&self) -> &[u8; PUBLIC_KEY_LEN] {
        self.public_key.get_or_init(|| {
            Box::new(match &self.material {
                KeyMaterial::Private(secret) => secp256k1::compress(&secret.public_key()),
                KeyMaterial::Public(public) => secp256k1::compress(public),
            })
        })
    }

    /// HASH160 of the public key
    pub fn identifier(&self) -> [u8; 20] {
        hash160(self.public_key())
    }

    pub fn fingerprint(&self) -> Fingerprint {
        let id = self.identifier();
        Fingerprint([id[0], id[1], id[2], id[3]])
    }

    /// Public-only copy of this node (same chain code and position)
    pub fn neuter(&self) -> Self {
        let public = match &self.material {
            KeyMaterial::Private(secret) => secret.public_key(),
            KeyMaterial::Public(public) => *public,
        };
        let neutered = Self::new(
            KeyMaterial::Public(public),
            self.chain_code,
            self.path.clone(),
            self.parent_fingerprint,
        );
        // hand over the cached encoding if we already have it
        if let Some(cached) = self.public_key.get() {
            let _ = neutered.public_key.set(Box::new(*cached));
        }
        neutered
    }

    // =========================================================================
    // DERIVATION
    // =========================================================================

    /// One derivation step. Hardened steps need the private scalar.
    pub fn derive_child(&self, index: impl Into<ChildIndex>) -> WalletResult<Self> {
        let index = index.into();
        let path = self.path.child(index)?;

        let (material, chain_code) = match &self.material {
            KeyMaterial::Private(secret) => {
                let child = Secp256k1Deriver::ckd_priv(
                    secret,
                    self.public_key(),
                    &self.chain_code,
                    index,
                )?;
                (KeyMaterial::Private(child.key), child.chain_code)
            }
            KeyMaterial::Public(public) => {
                let child = Secp256k1Deriver::ckd_pub(public, &self.chain_code, index)?;
                (KeyMaterial::Public(child.key), child.chain_code)
            }
        };

        let child = Self::new(material, chain_code, path, self.fingerprint());
        tracing::trace!(
            path = %child.path,
            parent = %child.parent_fingerprint,
            "derived child key"
        );
        Ok(child)
    }

    /// Sequential fold of [`derive_child`](Self::derive_child) over `path`
    pub fn derive_path(&self, path: &DerivationPath) -> WalletResult<Self> {
        if self.path.depth() + path.depth() > MAX_DEPTH {
            return Err(CryptoError::PathTooDeep.into());
        }
        let mut node = self.clone();
        for index in path {
            node = node.derive_child(*index)?;
        }
        Ok(node)
    }
}

impl Clone for ExtendedKey {
    fn clone(&self) -> Self {
        let cloned = Self::new(
            self.material.clone(),
            self.chain_code,
            self.path.clone(),
            self.parent_fingerprint,
        );
        if let Some(cached) = self.public_key.get() {
            let _ = cloned.public_key.set(Box::new(*cached));
        }
        cloned
    }
}

impl PartialEq for ExtendedKey {
    fn eq(&self, other: &Self) -> bool {
        let same_material = match (&self.material, &other.material) {
            (KeyMaterial::Private(a), KeyMaterial::Private(b)) => a.to_bytes() == b.to_bytes(),
            (KeyMaterial::Public(a), KeyMaterial::Public(b)) => a == b,
            _ => false,
        };
        same_material
            && self.chain_code == other.chain_code
            && self.path == other.path
            && self.parent_fingerprint == other.parent_fingerprint
    }
}

impl Eq for ExtendedKey {}

// Custom Debug - KHÔNG BAO GIỜ hiển thị private key
impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("path", &self.path.to_string())
            .field("parent_fingerprint", &self.parent_fingerprint)
            .field("public_key", &hex::encode(self.public_key()))
            .field("has_private_key", &self.has_private_key())
            .finish_non_exhaustive()
    }
}

impl Drop for ExtendedKey {
    fn drop(&mut self) {
        // SecretKey zeroizes itself; the chain code is ours to wipe
        self.chain_code.zeroize();
    }
}

// =============================================================================
// UNIFIED DERIVER
// =============================================================================
/// Key Deriver - Entry point cho mọi BIP-32 derivation
pub struct KeyDeriver;

impl KeyDeriver {
    /// Root extended key from a seed.
    ///
    /// I = HMAC-SHA512(Key = "Bitcoin seed", Data = seed); fails
    /// `InvalidKeyMaterial` if IL is zero or not below the curve order.
    /// The seed is only read.
    pub fn from_seed(seed: &[u8]) -> WalletResult<ExtendedKey> {
        let root = ExtendedKey::from_seed(seed)?;
        tracing::debug!(fingerprint = %root.fingerprint(), "created master key");
        Ok(root)
    }

    /// Single child; `index` is the raw child number (bit 31 = hardened)
    #[inline]
    pub fn derive_child(parent: &ExtendedKey, index: impl Into<ChildIndex>) -> WalletResult<ExtendedKey> {
        parent.derive_child(index)
    }

    /// `derive_path(root, A ++ B) == derive_path(derive_path(root, A), B)`
    #[inline]
    pub fn derive_path(root: &ExtendedKey, path: &DerivationPath) -> WalletResult<ExtendedKey> {
        root.derive_path(path)
    }

    /// Seed + textual path in one call (e.g. "m/44'/0'/0'/0/0")
    pub fn derive(seed: &[u8], path: &str) -> WalletResult<ExtendedKey> {
        let path: DerivationPath = path.parse()?;
        let node = Self::from_seed(seed)?.derive_path(&path)?;
        tracing::debug!(path = %node.path(), fingerprint = %node.fingerprint(), "derived key");
        Ok(node)
    }

    /// Batch derive sibling keys of one parent.
    ///
    /// Siblings do not depend on each other, so with the `parallel` feature
    /// they are derived on the rayon pool. Result order follows `indices`.
    pub fn derive_children(parent: &ExtendedKey, indices: &[ChildIndex]) -> WalletResult<Vec<ExtendedKey>> {
        // warm the cache once instead of racing on it from every worker
        parent.public_key();

        #[cfg(feature = "parallel")]
        let children = {
            use rayon::prelude::*;
            indices
                .par_iter()
                .map(|index| parent.derive_child(*index))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let children = indices.iter().map(|index| parent.derive_child(*index)).collect();

        children
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::paths::HARDENED_BIT;
    use crate::error::WalletError;

    // BIP-32 test vector 1
    const TV1_SEED: &str = "000102030405060708090a0b0c0d0e0f";

    fn tv1_master() -> ExtendedKey {
        KeyDeriver::from_seed(&hex::decode(TV1_SEED).unwrap()).unwrap()
    }

    #[test]
    fn test_vector1_master() {
        let seed = hex::decode(TV1_SEED).unwrap();
        let snapshot = seed.clone();
        let master = KeyDeriver::from_seed(&seed).unwrap();

        assert_eq!(seed, snapshot);
        assert_eq!(
            hex::encode(*master.private_key().unwrap()),
            "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35"
        );
        assert_eq!(
            hex::encode(master.chain_code()),
            "873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508"
        );
        assert_eq!(
            hex::encode(master.public_key()),
            "0339a36013301597daef41fbe593a02cc513d0b55527ec2df1050e2e8ff49c85c2"
        );
        assert_eq!(master.depth(), 0);
        assert_eq!(master.parent_fingerprint(), Fingerprint::ROOT);
        assert_eq!(master.fingerprint().to_string(), "3442193e");
    }

    #[test]
    fn test_vector1_first_hardened_child() {
        let child = KeyDeriver::derive_child(&tv1_master(), HARDENED_BIT).unwrap();

        assert_eq!(child.path().to_string(), "m/0'");
        assert_eq!(child.depth(), 1);
        assert_eq!(
            hex::encode(*child.private_key().unwrap()),
            "edb2e14f9ee77d26dd93b4ecede8d16ed408ce149b6cd80b0715a2d911a0afea"
        );
        assert_eq!(
            hex::encode(child.chain_code()),
            "47fdacbd0f1097043b78c63c20c34ef4ed9a111d980047ad16282c7ae6236141"
        );
        assert_eq!(
            hex::encode(child.public_key()),
            "035a784662a4a20a65bf6aab9ae98a6c068a81c52e4b032c0fb5400c706cfccc56"
        );
        assert_eq!(child.parent_fingerprint().to_string(), "3442193e");
        assert_eq!(child.fingerprint().to_string(), "5c1bd648");
    }

    #[test]
    fn test_vector1_normal_grandchild() {
        let node = KeyDeriver::derive(&hex::decode(TV1_SEED).unwrap(), "m/0'/1").unwrap();
        assert_eq!(
            hex::encode(*node.private_key().unwrap()),
            "3c6cb8d0f6a264c91ea8b5030fadaa8e538b020f0a387421a12de9319dc93368"
        );
        assert_eq!(
            hex::encode(node.chain_code()),
            "2a7857631386ba23dacac34180dd1983734e444fdbf774041578e9b6adb37c19"
        );
        assert_eq!(
            hex::encode(node.public_key()),
            "03501e454bf00751f24b1b489aa925215d66af2234e3891c3b21a52bedb3cd711c"
        );
        assert_eq!(node.parent_fingerprint().to_string(), "5c1bd648");
    }

    #[test]
    fn test_empty_path_is_identity() {
        let root = tv1_master();
        assert_eq!(KeyDeriver::derive_path(&root, &DerivationPath::root()).unwrap(), root);
    }

    #[test]
    fn test_path_composition() {
        let root = tv1_master();
        let a: DerivationPath = "m/44'/0'".parse().unwrap();
        let b: DerivationPath = "m/0'/0/7".parse().unwrap();

        let whole = root.derive_path(&a.extend(&b).unwrap()).unwrap();
        let stepwise = root.derive_path(&a).unwrap().derive_path(&b).unwrap();
        assert_eq!(whole, stepwise);
        assert_eq!(whole.path().to_string(), "m/44'/0'/0'/0/7");
    }

    #[test]
    fn test_neutered_rejects_hardened_everywhere() {
        let xpub = tv1_master().neuter();
        assert!(!xpub.has_private_key());
        for index in [0u32, 1, 44, 0x7fff_ffff] {
            assert_eq!(
                xpub.derive_child(index | HARDENED_BIT).unwrap_err(),
                WalletError::Crypto(CryptoError::PrivateKeyRequired)
            );
        }
        assert_eq!(
            xpub.private_key().unwrap_err(),
            WalletError::Crypto(CryptoError::PrivateKeyRequired)
        );
        assert!(matches!(
            xpub.derive_path(&"m/1/2'".parse().unwrap()),
            Err(WalletError::Crypto(CryptoError::PrivateKeyRequired))
        ));
    }

    #[test]
    fn test_public_derivation_agrees() {
        let account = tv1_master().derive_child(HARDENED_BIT).unwrap();
        let xpub = account.neuter();

        let from_xpub = xpub.derive_child(1u32).unwrap();
        let from_xprv = account.derive_child(1u32).unwrap();

        assert_eq!(from_xpub.public_key(), from_xprv.public_key());
        assert_eq!(from_xpub.chain_code(), from_xprv.chain_code());
        assert_eq!(from_xpub.parent_fingerprint(), from_xprv.parent_fingerprint());
        assert_eq!(from_xpub, from_xprv.neuter());
    }

    #[test]
    fn test_depth_limit() {
        let mut node = tv1_master();
        for _ in 0..255 {
            node = node.derive_child(0u32).unwrap();
        }
        assert_eq!(node.depth(), 255);
        assert_eq!(
            node.derive_child(0u32).unwrap_err(),
            WalletError::Crypto(CryptoError::PathTooDeep)
        );
    }

    #[test]
    fn test_from_private_key_normalizes() {
        let master = tv1_master();
        let key = master.private_key().unwrap();

        let mut signed = vec![0x00];
        signed.extend_from_slice(&*key);
        let rebuilt = ExtendedKey::from_private_key(&signed, *master.chain_code()).unwrap();
        assert_eq!(rebuilt, master);

        assert_eq!(
            ExtendedKey::from_private_key(&[0u8; 32], [0u8; 32]).unwrap_err(),
            WalletError::Crypto(CryptoError::InvalidKeyMaterial)
        );
    }

    #[test]
    fn test_public_key_cache_is_stable() {
        let master = tv1_master();
        let first = *master.public_key();
        let cloned = master.clone();
        assert_eq!(*cloned.public_key(), first);
        assert_eq!(*master.public_key(), first);
    }

    #[test]
    fn test_concurrent_public_key_access() {
        let master = tv1_master();
        let results: Vec<[u8; 33]> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| *master.public_key())).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(results.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_batch_matches_single() {
        let account = KeyDeriver::derive(&hex::decode(TV1_SEED).unwrap(), "m/44'/0'/0'/0").unwrap();
        let indices: Vec<ChildIndex> = (0..5).map(|i| ChildIndex::normal(i).unwrap()).collect();
        let batch = KeyDeriver::derive_children(&account, &indices).unwrap();

        assert_eq!(batch.len(), 5);
        for (i, key) in batch.iter().enumerate() {
            let single = account.derive_child(i as u32).unwrap();
            assert_eq!(key, &single, "Batch[{}] != Single[{}]", i, i);
        }
        for i in 0..batch.len() {
            for j in (i + 1)..batch.len() {
                assert_ne!(batch[i].public_key(), batch[j].public_key());
            }
        }
    }

    #[test]
    fn test_debug_hides_private_key() {
        let master = tv1_master();
        let debug = format!("{:?}", master);
        assert!(!debug.contains("e8f32e723decf4051aefac8e2c93c9c5"));
        assert!(debug.contains("0339a36013301597"));
    }
}
