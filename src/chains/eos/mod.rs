// src/chains/eos/mod.rs

//! EOS Chain Support
//!
//! - **Names**: 12-char account/action names packed into u64 via [`Name`].
//! - **Assets**: scaled amounts with precision + symbol via [`AssetAmount`].
//! - **Actions**: transfer / delegatebw / undelegatebw payloads and the action envelope via [`ActionData`] / [`Action`].

pub mod action;
pub mod asset;
pub mod name;

pub use action::{
    Action, ActionData, ActionPayload, DelegateAction, PermissionLevel, TransferAction,
    UndelegateAction,
};
pub use asset::AssetAmount;
pub use name::Name;
