use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Opaque account identifier. Freshly generated ids are UUIDv4 strings,
/// but the service treats the content as an opaque key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Account is frozen, no further operations are allowed")]
    Frozen,
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Decimal, requested: Decimal },
}

/// A balance holder. The balance is private so it can only move through
/// [`Account::credit`] and [`Account::debit`], which uphold the
/// non-negative invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    owner_name: String,
    balance: Decimal,
    frozen: bool,
}

impl Account {
    /// Create an account with a freshly generated id. Callers validate
    /// `initial_balance >= 0` before construction.
    pub fn new(owner_name: impl Into<String>, initial_balance: Decimal) -> Self {
        Self {
            id: AccountId::generate(),
            owner_name: owner_name.into(),
            balance: initial_balance,
            frozen: false,
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Fails if the account is frozen. Checked by the service before any
    /// customer-initiated movement (deposit, withdraw, either transfer leg).
    pub fn ensure_active(&self) -> Result<(), AccountError> {
        if self.frozen {
            Err(AccountError::Frozen)
        } else {
            Ok(())
        }
    }

    pub fn credit(&mut self, amount: Decimal) {
        self.balance += amount;
    }

    /// Debit the account, refusing to let the balance go negative.
    pub fn debit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if self.balance < amount {
            return Err(AccountError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}
