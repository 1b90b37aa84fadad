// src/chains/eos/action.rs
//
// EOS action payloads (transfer, delegatebw, undelegatebw) and the action
// envelope handed to the signing collaborator.

use super::asset::AssetAmount;
use super::name::Name;
use crate::encoding::ByteSerializer;
use crate::error::{EncodingError, WalletResult};

pub const EOSIO: Name = Name::constant("eosio");
pub const EOSIO_TOKEN: Name = Name::constant("eosio.token");
pub const ACTIVE: Name = Name::constant("active");
pub const TRANSFER: Name = Name::constant("transfer");
pub const DELEGATEBW: Name = Name::constant("delegatebw");
pub const UNDELEGATEBW: Name = Name::constant("undelegatebw");

/// Memo limit enforced by eosio.token
pub const MAX_MEMO_LEN: usize = 256;

/// Shared capability of every action payload
pub trait ActionPayload {
    /// Account whose key must sign
    fn authorizing_actor(&self) -> Name;
    /// Contract the action is sent to
    fn contract(&self) -> Name;
    /// Action name on that contract
    fn action_name(&self) -> Name;
    /// Canonical payload bytes
    fn serialize(&self) -> WalletResult<Vec<u8>>;
}

// =============================================================================
// TRANSFER
// =============================================================================
/// `transfer(from, to, quantity, memo)`, authorized by `from`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferAction {
    contract: Name,
    from: Name,
    to: Name,
    quantity: AssetAmount,
    memo: String,
}

impl TransferAction {
    pub fn new(from: &str, to: &str, quantity: AssetAmount, memo: &str) -> WalletResult<Self> {
        if memo.len() > MAX_MEMO_LEN {
            return Err(EncodingError::MemoTooLong(memo.len()).into());
        }
        Ok(Self {
            contract: EOSIO_TOKEN,
            from: Name::new(from)?,
            to: Name::new(to)?,
            quantity,
            memo: memo.to_string(),
        })
    }

    /// Token contract other than `eosio.token`
    pub fn with_contract(mut self, contract: Name) -> Self {
        self.contract = contract;
        self
    }

    pub fn quantity(&self) -> &AssetAmount {
        &self.quantity
    }
}

impl ActionPayload for TransferAction {
    fn authorizing_actor(&self) -> Name {
        self.from
    }

    fn contract(&self) -> Name {
        self.contract
    }

    fn action_name(&self) -> Name {
        TRANSFER
    }

    /// from(8) || to(8) || amount(8) || symbol(8) || varuint(len) || memo
    fn serialize(&self) -> WalletResult<Vec<u8>> {
        self.quantity.ensure_above_dust()?;

        Ok(ByteSerializer::with_capacity(33 + self.memo.len())
            .write(&self.from.to_le_bytes())
            .write(&self.to.to_le_bytes())
            .write(&self.quantity.serialized_value())
            .write(&self.quantity.serialized_symbol())
            .write_bytes_with_len(self.memo.as_bytes())
            .serialize())
    }
}

// =============================================================================
// STAKING
// =============================================================================
/// `delegatebw(from, receiver, stake_net, stake_cpu, transfer)`, authorized by `from`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegateAction {
    from: Name,
    receiver: Name,
    stake_net: AssetAmount,
    stake_cpu: AssetAmount,
    transfer: bool,
}

impl DelegateAction {
    pub fn new(
        from: &str,
        receiver: &str,
        stake_net: AssetAmount,
        stake_cpu: AssetAmount,
        transfer: bool,
    ) -> WalletResult<Self> {
        Ok(Self {
            from: Name::new(from)?,
            receiver: Name::new(receiver)?,
            stake_net,
            stake_cpu,
            transfer,
        })
    }
}

impl ActionPayload for DelegateAction {
    fn authorizing_actor(&self) -> Name {
        self.from
    }

    fn contract(&self) -> Name {
        EOSIO
    }

    fn action_name(&self) -> Name {
        DELEGATEBW
    }

    fn serialize(&self) -> WalletResult<Vec<u8>> {
        Ok(ByteSerializer::with_capacity(49)
            .write(&self.from.to_le_bytes())
            .write(&self.receiver.to_le_bytes())
            .write(&self.stake_net.serialize())
            .write(&self.stake_cpu.serialize())
            .write_u8(u8::from(self.transfer))
            .serialize())
    }
}

/// `undelegatebw(from, receiver, unstake_net, unstake_cpu)`, authorized by `receiver`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndelegateAction {
    from: Name,
    receiver: Name,
    stake_net: AssetAmount,
    stake_cpu: AssetAmount,
}

impl UndelegateAction {
    pub fn new(
        from: &str,
        receiver: &str,
        stake_net: AssetAmount,
        stake_cpu: AssetAmount,
    ) -> WalletResult<Self> {
        Ok(Self {
            from: Name::new(from)?,
            receiver: Name::new(receiver)?,
            stake_net,
            stake_cpu,
        })
    }
}

impl ActionPayload for UndelegateAction {
    fn authorizing_actor(&self) -> Name {
        self.receiver
    }

    fn contract(&self) -> Name {
        EOSIO
    }

    fn action_name(&self) -> Name {
        UNDELEGATEBW
    }

    /// from(8) || receiver(8) || net(16) || cpu(16)
    fn serialize(&self) -> WalletResult<Vec<u8>> {
        Ok(ByteSerializer::with_capacity(48)
            .write(&self.from.to_le_bytes())
            .write(&self.receiver.to_le_bytes())
            .write(&self.stake_net.serialize())
            .write(&self.stake_cpu.serialize())
            .serialize())
    }
}

// =============================================================================
// CLOSED VARIANT SET
// =============================================================================
/// Every action this crate can encode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionData {
    Transfer(TransferAction),
    Delegate(DelegateAction),
    Undelegate(UndelegateAction),
}

impl ActionData {
    fn payload(&self) -> &dyn ActionPayload {
        match self {
            ActionData::Transfer(a) => a,
            ActionData::Delegate(a) => a,
            ActionData::Undelegate(a) => a,
        }
    }
}

impl ActionPayload for ActionData {
    fn authorizing_actor(&self) -> Name {
        self.payload().authorizing_actor()
    }

    fn contract(&self) -> Name {
        self.payload().contract()
    }

    fn action_name(&self) -> Name {
        self.payload().action_name()
    }

    fn serialize(&self) -> WalletResult<Vec<u8>> {
        self.payload().serialize()
    }
}

impl From<TransferAction> for ActionData {
    fn from(action: TransferAction) -> Self {
        ActionData::Transfer(action)
    }
}

impl From<DelegateAction> for ActionData {
    fn from(action: DelegateAction) -> Self {
        ActionData::Delegate(action)
    }
}

impl From<UndelegateAction> for ActionData {
    fn from(action: UndelegateAction) -> Self {
        ActionData::Undelegate(action)
    }
}

// =============================================================================
// ENVELOPE
// =============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionLevel {
    pub actor: Name,
    pub permission: Name,
}

/// Encoded action ready to be placed in a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub account: Name,
    pub name: Name,
    pub authorization: Vec<PermissionLevel>,
    pub data: Vec<u8>,
}

impl Action {
    /// Encode `data`, authorized by its actor at `active`
    pub fn new(data: &ActionData) -> WalletResult<Self> {
        let action = Self {
            account: data.contract(),
            name: data.action_name(),
            authorization: vec![PermissionLevel {
                actor: data.authorizing_actor(),
                permission: ACTIVE,
            }],
            data: data.serialize()?,
        };
        tracing::debug!(
            account = %action.account,
            action = %action.name,
            actor = %data.authorizing_actor(),
            bytes = action.data.len(),
            "encoded action"
        );
        Ok(action)
    }

    /// account(8) || name(8) || varuint(n) || (actor(8) || permission(8))*n
    /// || varuint(len) || data
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = ByteSerializer::with_capacity(34 + self.data.len())
            .write(&self.account.to_le_bytes())
            .write(&self.name.to_le_bytes())
            .write_varuint(self.authorization.len() as u64);
        for level in &self.authorization {
            out = out
                .write(&level.actor.to_le_bytes())
                .write(&level.permission.to_le_bytes());
        }
        out.write_bytes_with_len(&self.data).serialize()
    }
}

// =============================================================================
// TESTS
// =============================================================================
