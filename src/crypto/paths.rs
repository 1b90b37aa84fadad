// src/crypto/paths.rs
//
// Derivation Paths Module - BIP-32 path type + BIP-44/49/84 builders
// SLIP-44 coin types for the chains this crate encodes for.

use crate::error::{CryptoError, WalletResult};
use std::fmt;
use std::str::FromStr;

/// High bit marking a hardened index
pub const HARDENED_BIT: u32 = 0x8000_0000;

/// Deepest path a BIP-32 node can carry (depth is serialized as one byte)
pub const MAX_DEPTH: usize = 255;

// =============================================================================
// SLIP-44 COIN TYPES
// =============================================================================
/// SLIP-44 Registered Coin Types
/// Ref: https://github.com/satoshilabs/slips/blob/master/slip-0044.md
pub mod coin_type {
    pub const BITCOIN: u32 = 0;
    pub const TESTNET: u32 = 1;
    pub const LITECOIN: u32 = 2;
    pub const DOGECOIN: u32 = 3;
    pub const HORIZEN: u32 = 121;
    pub const RAVENCOIN: u32 = 175;
    pub const EOS: u32 = 194;
    pub const WAVES: u32 = 5_741_564;
}

/// BIP-43 purpose field
pub mod purpose {
    /// BIP-44: legacy P2PKH
    pub const BIP44: u32 = 44;
    /// BIP-49: P2SH-wrapped SegWit
    pub const BIP49: u32 = 49;
    /// BIP-84: native SegWit
    pub const BIP84: u32 = 84;
}

// =============================================================================
// CHILD INDEX
// =============================================================================
/// One path element: the raw 32-bit child number, hardened bit included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChildIndex(u32);

impl ChildIndex {
    /// Non-hardened index, `index` must be below 2^31
    pub fn normal(index: u32) -> WalletResult<Self> {
        if index & HARDENED_BIT != 0 {
            return Err(CryptoError::InvalidPath(format!("index {} out of range", index)).into());
        }
        Ok(Self(index))
    }

    /// Hardened index, `index` must be below 2^31
    pub fn hardened(index: u32) -> WalletResult<Self> {
        Self::normal(index).map(|c| Self(c.0 | HARDENED_BIT))
    }

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Serialized value (hardened bit included)
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index with the hardened bit cleared
    #[inline]
    pub const fn index(self) -> u32 {
        self.0 & !HARDENED_BIT
    }

    #[inline]
    pub const fn is_hardened(self) -> bool {
        self.0 & HARDENED_BIT != 0
    }
}

impl From<u32> for ChildIndex {
    /// Raw BIP-32 child number, hardened bit included
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_hardened() {
            write!(f, "{}'", self.index())
        } else {
            write!(f, "{}", self.index())
        }
    }
}

impl FromStr for ChildIndex {
    type Err = crate::error::WalletError;

    fn from_str(segment: &str) -> Result<Self, Self::Err> {
        let segment = segment.trim();
        let (digits, hardened) = match segment.strip_suffix(['\'', 'h', 'H']) {
            Some(rest) => (rest, true),
            None => (segment, false),
        };
        // u32::from_str accepts a leading '+', BIP-32 paths do not
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CryptoError::InvalidPath(format!("bad segment '{}'", segment)).into());
        }
        let index: u32 = digits
            .parse()
            .map_err(|e| CryptoError::InvalidPath(format!("bad segment '{}': {}", segment, e)))?;
        if hardened {
            Self::hardened(index)
        } else {
            Self::normal(index)
        }
    }
}

// =============================================================================
// DERIVATION PATH
// =============================================================================
/// Ordered child indices from the root, `m/44'/0'/0'/0/0`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<ChildIndex>);

impl DerivationPath {
    /// The root path `m`
    pub fn root() -> Self {
        Self::default()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[ChildIndex] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = ChildIndex> + '_ {
        self.0.iter().copied()
    }

    /// Last element, `None` at the root
    pub fn last(&self) -> Option<ChildIndex> {
        self.0.last().copied()
    }

    /// New path one level deeper. Fails `PathTooDeep` past 255 levels.
    pub fn child(&self, index: ChildIndex) -> WalletResult<Self> {
        if self.depth() >= MAX_DEPTH {
            return Err(CryptoError::PathTooDeep.into());
        }
        let mut next = self.0.clone();
        next.push(index);
        Ok(Self(next))
    }

    /// Concatenation `self ++ suffix`
    pub fn extend(&self, suffix: &DerivationPath) -> WalletResult<Self> {
        if self.depth() + suffix.depth() > MAX_DEPTH {
            return Err(CryptoError::PathTooDeep.into());
        }
        let mut next = self.0.clone();
        next.extend_from_slice(&suffix.0);
        Ok(Self(next))
    }
}

impl TryFrom<Vec<ChildIndex>> for DerivationPath {
    type Error = crate::error::WalletError;

    fn try_from(indices: Vec<ChildIndex>) -> Result<Self, Self::Error> {
        if indices.len() > MAX_DEPTH {
            return Err(CryptoError::PathTooDeep.into());
        }
        Ok(Self(indices))
    }
}

impl FromStr for DerivationPath {
    type Err = crate::error::WalletError;

    /// Accepts `m`, `m/0'/1`, `M/44h/0H` (`'`, `h` and `H` mark hardened)
    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let path = path.trim();
        let mut segments = path.split('/');

        match segments.next() {
            Some("m") | Some("M") => {}
            _ => {
                return Err(
                    CryptoError::InvalidPath(format!("Path must start with 'm': {}", path)).into(),
                )
            }
        }

        let indices = segments
            .map(ChildIndex::from_str)
            .collect::<WalletResult<Vec<_>>>()?;
        Self::try_from(indices)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for index in &self.0 {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a ChildIndex;
    type IntoIter = std::slice::Iter<'a, ChildIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// =============================================================================
// PATH BUILDERS
// =============================================================================
/// Pre-built Derivation Paths
///
/// # Conventions
/// - BIP-44: `m/44'/coin'/account'/change/index`
/// - BIP-49: `m/49'/coin'/account'/change/index` (P2SH-wrapped SegWit)
/// - BIP-84: `m/84'/coin'/account'/change/index` (native SegWit)
pub struct DerivationPaths;

impl DerivationPaths {
    pub const BTC_LEGACY_0: &'static str = "m/44'/0'/0'/0/0";
    pub const BTC_NESTED_SEGWIT_0: &'static str = "m/49'/0'/0'/0/0";
    pub const EOS_0: &'static str = "m/44'/194'/0'/0/0";

    /// `m/purpose'/coin_type'/account'/change/index`
    ///
    /// # Arguments
    /// * `purpose` - 44, 49 or 84 (see [`purpose`])
    /// * `coin_type` - SLIP-44 coin type (see [`coin_type`])
    /// * `account` - Account index (thường 0)
    /// * `change` - 0 = external (receive), 1 = internal (change)
    /// * `index` - Address index
    pub fn bip43(
        purpose: u32,
        coin_type: u32,
        account: u32,
        change: u32,
        index: u32,
    ) -> WalletResult<DerivationPath> {
        DerivationPath::try_from(vec![
            ChildIndex::hardened(purpose)?,
            ChildIndex::hardened(coin_type)?,
            ChildIndex::hardened(account)?,
            ChildIndex::normal(change)?,
            ChildIndex::normal(index)?,
        ])
    }

    #[inline]
    pub fn bip44(coin_type: u32, account: u32, change: u32, index: u32) -> WalletResult<DerivationPath> {
        Self::bip43(purpose::BIP44, coin_type, account, change, index)
    }

    #[inline]
    pub fn bip49(coin_type: u32, account: u32, change: u32, index: u32) -> WalletResult<DerivationPath> {
        Self::bip43(purpose::BIP49, coin_type, account, change, index)
    }

    #[inline]
    pub fn bip84(coin_type: u32, account: u32, change: u32, index: u32) -> WalletResult<DerivationPath> {
        Self::bip43(purpose::BIP84, coin_type, account, change, index)
    }

    /// Account-level path `m/44'/coin'/account'` (where xpubs are exported)
    pub fn bip44_account(coin_type: u32, account: u32) -> WalletResult<DerivationPath> {
        DerivationPath::try_from(vec![
            ChildIndex::hardened(purpose::BIP44)?,
            ChildIndex::hardened(coin_type)?,
            ChildIndex::hardened(account)?,
        ])
    }
}

// =============================================================================
// TESTS
// =============================================================================
