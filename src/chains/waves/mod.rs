// src/chains/waves/mod.rs
pub mod asset;

pub use asset::{AssetId, MILLI, TOKEN};
