use thiserror::Error;

use crate::{
    account::{Account, AccountId},
    transaction::Transaction,
};

pub mod in_memory;

/// Unexpected failure from a store collaborator. Always fatal for the
/// current operation; the service never retries.
#[derive(Debug, Error)]
#[error("Storage failure: {0}")]
pub struct StorageError(#[from] pub anyhow::Error);

/// Durable home of accounts. The service trusts every read to reflect the
/// latest write and performs no caching.
pub trait AccountStore {
    fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, StorageError>;

    /// Upsert by id.
    fn save(&mut self, account: &Account) -> Result<(), StorageError>;

    /// Store-level operation only; the service never deletes accounts.
    fn delete(&mut self, id: &AccountId) -> Result<(), StorageError>;

    fn find_all(&self) -> Result<Vec<Account>, StorageError>;
}

/// Append-only transaction log.
pub trait TransactionStore {
    fn save(&mut self, transaction: &Transaction) -> Result<(), StorageError>;

    /// All transactions for the account, in insertion order. Unknown
    /// account ids yield an empty list, not an error.
    fn find_by_account_id(&self, id: &AccountId) -> Result<Vec<Transaction>, StorageError>;
}
