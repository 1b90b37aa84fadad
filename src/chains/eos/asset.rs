// src/chains/eos/asset.rs
//
// EOS asset: scaled i64 amount + symbol (precision, up to 7 upper-case chars).
// Wire: amount(8, LE) || precision(1) || symbol chars null-padded to 7.

use crate::error::{EncodingError, WalletError, WalletResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

pub const MAX_SYMBOL_LEN: usize = 7;
pub const MAX_PRECISION: u8 = 18;

/// Quantity of a token at a fixed decimal precision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetAmount {
    quantity: Decimal,
    symbol: String,
    precision: u8,
    amount: i64,
}

impl AssetAmount {
    /// `quantity` is scaled by `10^precision` and truncated into the
    /// on-chain i64 amount, which never exceeds what the caller asked for.
    ///
    /// Errors: `InvalidPrecision`, `SymbolTooLong`, `InvalidSymbol`,
    /// `NegativeAmount`, `AmountOverflow`.
    pub fn new(quantity: Decimal, symbol: &str, precision: u8) -> WalletResult<Self> {
        if precision > MAX_PRECISION {
            return Err(EncodingError::InvalidPrecision(precision).into());
        }
        validate_symbol(symbol)?;
        if quantity.is_sign_negative() && !quantity.is_zero() {
            return Err(EncodingError::NegativeAmount(quantity.to_string()).into());
        }

        let amount = quantity
            .checked_mul(Decimal::from(10u64.pow(u32::from(precision))))
            .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::ToZero))
            .and_then(|scaled| scaled.to_i64())
            .ok_or_else(|| EncodingError::AmountOverflow(quantity.to_string()))?;

        Ok(Self {
            quantity,
            symbol: symbol.to_string(),
            precision,
            amount,
        })
    }

    /// From an already scaled on-chain amount
    pub fn from_units(amount: i64, symbol: &str, precision: u8) -> WalletResult<Self> {
        if precision > MAX_PRECISION {
            return Err(EncodingError::InvalidPrecision(precision).into());
        }
        if amount < 0 {
            return Err(EncodingError::NegativeAmount(amount.to_string()).into());
        }
        validate_symbol(symbol)?;
        Ok(Self {
            quantity: Decimal::new(amount, u32::from(precision)),
            symbol: symbol.to_string(),
            precision,
            amount,
        })
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Scaled on-chain amount
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Smallest representable quantity, `10^-precision`
    pub fn min_unit(&self) -> Decimal {
        Decimal::new(1, u32::from(self.precision))
    }

    /// `AmountTooSmall` unless the scaled amount is above one minimal unit.
    /// Checked on the truncated amount, so sub-unit digits never lift a
    /// quantity over the threshold.
    pub fn ensure_above_dust(&self) -> WalletResult<()> {
        let unit = self.min_unit();
        if self.amount <= 1 {
            return Err(EncodingError::AmountTooSmall {
                quantity: self.quantity.to_string(),
                unit: unit.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// 8-byte little-endian amount
    pub fn serialized_value(&self) -> [u8; 8] {
        self.amount.to_le_bytes()
    }

    /// precision(1) || symbol left-justified, null-padded to 7
    pub fn serialized_symbol(&self) -> [u8; 8] {
        let mut out = [0u8; 8];
        out[0] = self.precision;
        out[1..1 + self.symbol.len()].copy_from_slice(self.symbol.as_bytes());
        out
    }

    /// value || symbol, 16 bytes
    pub fn serialize(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[..8].copy_from_slice(&self.serialized_value());
        out[8..].copy_from_slice(&self.serialized_symbol());
        out
    }
}

fn validate_symbol(symbol: &str) -> WalletResult<()> {
    if symbol.len() > MAX_SYMBOL_LEN {
        return Err(EncodingError::SymbolTooLong(symbol.to_string()).into());
    }
    if symbol.is_empty() || !symbol.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(EncodingError::InvalidSymbol(symbol.to_string()).into());
    }
    Ok(())
}

impl fmt::Display for AssetAmount {
    /// `"1.0000 EOS"`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.precision == 0 {
            return write!(f, "{} {}", self.amount, self.symbol);
        }
        let scale = 10i64.pow(u32::from(self.precision));
        write!(
            f,
            "{}.{:0width$} {}",
            self.amount / scale,
            self.amount % scale,
            self.symbol,
            width = usize::from(self.precision)
        )
    }
}

impl FromStr for AssetAmount {
    type Err = WalletError;

    /// Parses `"<quantity> <SYMBOL>"`; precision is the number of digits
    /// after the decimal point
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EncodingError::InvalidSymbol(s.to_string());
        let (quantity, symbol) = s.trim().split_once(' ').ok_or_else(invalid)?;
        let symbol = symbol.trim();

        let precision = match quantity.split_once('.') {
            Some((_, frac)) => frac.len(),
            None => 0,
        };
        let precision = u8::try_from(precision)
            .map_err(|_| EncodingError::AmountOverflow(quantity.to_string()))?;
        let quantity = Decimal::from_str(quantity)
            .map_err(|_| EncodingError::AmountOverflow(quantity.to_string()))?;

        Self::new(quantity, symbol, precision)
    }
}
