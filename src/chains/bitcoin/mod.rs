// src/chains/bitcoin/mod.rs

//! Bitcoin-family Chain Support
//!
//! Bitcoin, Litecoin, Dogecoin, Ravencoin, Horizen and any other network
//! described by a [`NetworkParams`](crate::network::NetworkParams).
//!
//! - **Addresses**: Base58Check encode/decode with per-network versions via [`AddressCodec`].
//! - **WIF**: private-key export via [`encode_wif`].

pub mod address;
pub mod wif;

pub use address::{AddressCodec, DecodedAddress};
pub use wif::encode_wif;
