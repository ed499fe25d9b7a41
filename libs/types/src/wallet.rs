//! Per-user asset balances
//!
//! A wallet maps assets to balances split into a free part and a reserved
//! part. Reservations back open orders: funds move free → reserved when an
//! order is placed, reserved → free when it is cancelled or improved, and
//! leave the wallet entirely (consume) when an execution settles.
//!
//! **Key invariants:**
//! - `free ≥ 0` and `reserved ≥ 0` for every asset, always
//! - `free + reserved` equals the net of the wallet's deposit/withdraw
//!   history
//! - every failing operation leaves the wallet untouched

use crate::asset::Asset;
use crate::numeric::Quantity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Wallet operation errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletError {
    #[error("amount must be positive")]
    InvalidAmount,

    #[error("insufficient free balance")]
    InsufficientFunds,

    #[error("insufficient reserved balance")]
    InsufficientReserved,
}

/// Balance of a single asset
///
/// A missing entry in the wallet is semantically equivalent to `{0, 0}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub free: Quantity,
    pub reserved: Quantity,
}

/// Per-user balances keyed by asset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    balances: HashMap<Asset, Balance>,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to the free balance, creating the entry if absent
    pub fn deposit(&mut self, asset: &Asset, amount: Quantity) -> Result<(), WalletError> {
        if !amount.is_positive() {
            return Err(WalletError::InvalidAmount);
        }

        let balance = self.balances.entry(asset.clone()).or_default();
        balance.free += amount;
        Ok(())
    }

    /// Debit `amount` from the free balance
    pub fn withdraw(&mut self, asset: &Asset, amount: Quantity) -> Result<(), WalletError> {
        if !amount.is_positive() {
            return Err(WalletError::InvalidAmount);
        }

        let balance = self
            .balances
            .get_mut(asset)
            .ok_or(WalletError::InsufficientFunds)?;
        if balance.free < amount {
            return Err(WalletError::InsufficientFunds);
        }

        balance.free -= amount;
        Ok(())
    }

    /// Move `amount` from free to reserved
    pub fn reserve(&mut self, asset: &Asset, amount: Quantity) -> Result<(), WalletError> {
        if !amount.is_positive() {
            return Err(WalletError::InvalidAmount);
        }

        let balance = self
            .balances
            .get_mut(asset)
            .ok_or(WalletError::InsufficientFunds)?;
        if balance.free < amount {
            return Err(WalletError::InsufficientFunds);
        }

        balance.free -= amount;
        balance.reserved += amount;
        Ok(())
    }

    /// Move `amount` from reserved back to free
    pub fn release(&mut self, asset: &Asset, amount: Quantity) -> Result<(), WalletError> {
        if !amount.is_positive() {
            return Err(WalletError::InvalidAmount);
        }

        let balance = self
            .balances
            .get_mut(asset)
            .ok_or(WalletError::InsufficientReserved)?;
        if balance.reserved < amount {
            return Err(WalletError::InsufficientReserved);
        }

        balance.reserved -= amount;
        balance.free += amount;
        Ok(())
    }

    /// Debit `amount` from reserved without crediting free
    ///
    /// The asset leaves this wallet; the counterparty's `deposit` is the
    /// paired operation of a settlement.
    pub fn consume_reserved(&mut self, asset: &Asset, amount: Quantity) -> Result<(), WalletError> {
        if !amount.is_positive() {
            return Err(WalletError::InvalidAmount);
        }

        let balance = self
            .balances
            .get_mut(asset)
            .ok_or(WalletError::InsufficientReserved)?;
        if balance.reserved < amount {
            return Err(WalletError::InsufficientReserved);
        }

        balance.reserved -= amount;
        Ok(())
    }

    /// Free balance of an asset; 0 for absent entries
    pub fn free_balance(&self, asset: &Asset) -> Quantity {
        self.balances.get(asset).map_or(Quantity::ZERO, |b| b.free)
    }

    /// Reserved balance of an asset; 0 for absent entries
    pub fn reserved_balance(&self, asset: &Asset) -> Quantity {
        self.balances.get(asset).map_or(Quantity::ZERO, |b| b.reserved)
    }
}
