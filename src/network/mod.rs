// src/network/mod.rs
//
// Network Module - per-chain address parameters
//
// Cung cấp:
// - NetworkParams: version prefixes, checksum, alphabet, WIF prefix
// - NetworkRegistry: bảng name → params, từ presets hoặc TOML

pub mod params;
pub mod registry;

// Re-export cho convenience
pub use params::{AddressKind, AddressVersion, ChecksumKind, NetworkParams};
pub use registry::NetworkRegistry;
