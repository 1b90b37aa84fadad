use thiserror::Error;

pub type WalletResult<T> = std::result::Result<T, WalletError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("Cryptography Error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Address Error: {0}")]
    Address(#[from] AddressError),

    #[error("Encoding Error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Config Error: {0}")]
    Config(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    #[error("Derived key material is zero or not below the curve order")]
    InvalidKeyMaterial,

    #[error("Derivation path deeper than 255 levels")]
    PathTooDeep,

    #[error("Hardened derivation or key export requires a private key")]
    PrivateKeyRequired,

    #[error("Invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("Invalid public key encoding")]
    InvalidPublicKey,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("Address checksum mismatch")]
    ChecksumMismatch,

    #[error("Address version {0} is not accepted by this network")]
    UnsupportedVersion(String),

    #[error("Invalid base58 string: {0}")]
    InvalidBase58(String),

    #[error("Invalid decoded length: {0} bytes")]
    InvalidLength(usize),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Invalid name '{0}': up to 12 chars of a-z, 1-5 and '.'")]
    InvalidName(String),

    #[error("Symbol '{0}' is longer than 7 characters")]
    SymbolTooLong(String),

    #[error("Symbol '{0}' must be upper-case letters A-Z")]
    InvalidSymbol(String),

    #[error("Precision {0} exceeds 18")]
    InvalidPrecision(u8),

    #[error("Negative quantity: {0}")]
    NegativeAmount(String),

    #[error("Quantity {0} does not fit a 64-bit amount")]
    AmountOverflow(String),

    #[error("Quantity {quantity} is not above the minimal unit {unit}")]
    AmountTooSmall { quantity: String, unit: String },

    #[error("Memo is {0} bytes, limit is 256")]
    MemoTooLong(usize),
}
