// src/chains/eos/name.rs
//
// EOS account / action names packed into a u64.
// Alphabet ".12345abcdefghijklmnopqrstuvwxyz", 5 bits per char, MSB first,
// at most 12 chars.

use crate::error::{EncodingError, WalletError, WalletResult};
use std::fmt;
use std::str::FromStr;

const CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

/// A packed EOS name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Name(u64);

/// Pack a name; `None` for disallowed chars, > 12 chars or a trailing '.'
const fn encode(s: &[u8]) -> Option<u64> {
    if s.len() > Name::MAX_LEN {
        return None;
    }
    // trailing dots are not representable: "a." and "a" pack identically
    if !s.is_empty() && s[s.len() - 1] == b'.' {
        return None;
    }

    let mut value = 0u64;
    let mut i = 0;
    while i < s.len() {
        let symbol = match s[i] {
            b'a'..=b'z' => (s[i] - b'a') as u64 + 6,
            b'1'..=b'5' => (s[i] - b'1') as u64 + 1,
            b'.' => 0,
            _ => return None,
        };
        value |= symbol << (64 - 5 * (i + 1));
        i += 1;
    }
    Some(value)
}

impl Name {
    pub const MAX_LEN: usize = 12;

    /// Pack `name`, failing `InvalidName`
    pub fn new(name: &str) -> WalletResult<Self> {
        encode(name.as_bytes())
            .map(Self)
            .ok_or_else(|| EncodingError::InvalidName(name.to_string()).into())
    }

    /// Compile-time name constant; an invalid literal fails the build
    pub const fn constant(name: &str) -> Self {
        match encode(name.as_bytes()) {
            Some(value) => Self(value),
            None => panic!("invalid EOS name constant"),
        }
    }

    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Wire form (little-endian u64)
    pub const fn to_le_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }
}

impl FromStr for Name {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 12 five-bit chars followed by one four-bit char
        let mut out = [b'.'; 13];
        let mut tmp = self.0;
        for i in 0..13 {
            let (mask, shift) = if i == 0 { (0x0f, 4) } else { (0x1f, 5) };
            out[12 - i] = CHARMAP[(tmp & mask) as usize];
            tmp >>= shift;
        }

        let len = out.iter().rposition(|c| *c != b'.').map_or(0, |p| p + 1);
        // CHARMAP is ASCII
        for c in &out[..len] {
            write!(f, "{}", *c as char)?;
        }
        Ok(())
    }
}
