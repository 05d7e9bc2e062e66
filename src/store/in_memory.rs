use std::collections::HashMap;

use crate::{
    account::{Account, AccountId},
    transaction::Transaction,
};

use super::{AccountStore, StorageError, TransactionStore};

#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: HashMap<AccountId, Account>,
}

impl AccountStore for InMemoryAccountStore {
    fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, StorageError> {
        Ok(self.accounts.get(id).cloned())
    }

    fn save(&mut self, account: &Account) -> Result<(), StorageError> {
        self.accounts.insert(account.id().clone(), account.clone());
        Ok(())
    }

    fn delete(&mut self, id: &AccountId) -> Result<(), StorageError> {
        self.accounts.remove(id);
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<Account>, StorageError> {
        Ok(self.accounts.values().cloned().collect())
    }
}

/// Vec-backed log, so insertion order is the iteration order.
#[derive(Default)]
pub struct InMemoryTransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore for InMemoryTransactionStore {
    fn save(&mut self, transaction: &Transaction) -> Result<(), StorageError> {
        self.transactions.push(transaction.clone());
        Ok(())
    }

    fn find_by_account_id(&self, id: &AccountId) -> Result<Vec<Transaction>, StorageError> {
        Ok(self
            .transactions
            .iter()
            .filter(|tx| &tx.account_id == id)
            .cloned()
            .collect())
    }
}
