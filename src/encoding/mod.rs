// src/encoding/mod.rs

//! Byte-level Encoding
//!
//! - **ByteSerializer**: append-only builder for canonical transaction bytes via [`ByteSerializer`].
//! - **Base58Check**: versioned payload + double-SHA256 checksum codec via [`base58check_encode`] / [`base58check_decode`].

pub mod base58;
pub mod serializer;

pub use base58::{base58check_decode, base58check_encode, Base58Alphabet};
pub use serializer::ByteSerializer;
