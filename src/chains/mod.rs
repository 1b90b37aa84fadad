// src/chains/mod.rs
//
// Chain-specific encoders built on top of crypto/encoding/network.

pub mod bitcoin;
pub mod eos;
pub mod waves;
