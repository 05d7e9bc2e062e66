use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::{
    account::{Account, AccountError, AccountId},
    store::{AccountStore, StorageError, TransactionStore},
    transaction::{Transaction, TransactionKind},
};

#[derive(Debug, Error)]
pub enum BankError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Account not found: {0}")]
    NotFound(AccountId),
    #[error("Account {0} is frozen")]
    AccountFrozen(AccountId),
    #[error("Insufficient funds in account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        account: AccountId,
        balance: Decimal,
        requested: Decimal,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl BankError {
    fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Attach the offending account id to an entity-level error.
    fn on_account(id: &AccountId, err: AccountError) -> Self {
        match err {
            AccountError::Frozen => Self::AccountFrozen(id.clone()),
            AccountError::InsufficientFunds { balance, requested } => Self::InsufficientFunds {
                account: id.clone(),
                balance,
                requested,
            },
        }
    }
}

/// Sole authority for balance mutation. All validation happens before any
/// mutation; once balance updates and persistence begin, store failures
/// propagate without rollback. Stores are injected, never constructed here.
///
/// Single-threaded model: every operation takes `&mut self` and runs to
/// completion. Transfer issues two independent account writes, so callers
/// needing real concurrency must provide per-account exclusion at the
/// store layer.
pub struct BankService<A, T> {
    accounts: A,
    transactions: T,
}

impl<A, T> BankService<A, T>
where
    A: AccountStore,
    T: TransactionStore,
{
    pub fn new(accounts: A, transactions: T) -> Self {
        Self {
            accounts,
            transactions,
        }
    }

    pub fn create_account(
        &mut self,
        owner_name: &str,
        initial_balance: Decimal,
    ) -> Result<Account, BankError> {
        if initial_balance < Decimal::ZERO {
            return Err(BankError::invalid(format!(
                "Initial balance cannot be negative, got: {initial_balance}"
            )));
        }

        let account = Account::new(owner_name, initial_balance);
        debug!(id = %account.id(), owner = owner_name, "creating account");
        self.accounts.save(&account)?;
        Ok(account)
    }

    pub fn deposit(&mut self, account_id: &AccountId, amount: Decimal) -> Result<(), BankError> {
        require_id(account_id)?;
        require_positive("Deposit", amount)?;

        let mut account = self.load(account_id)?;
        account
            .ensure_active()
            .map_err(|err| BankError::on_account(account_id, err))?;

        account.credit(amount);
        self.accounts.save(&account)?;
        self.record(account_id, TransactionKind::Deposit, amount)?;
        Ok(())
    }

    pub fn withdraw(&mut self, account_id: &AccountId, amount: Decimal) -> Result<(), BankError> {
        require_id(account_id)?;
        require_positive("Withdrawal", amount)?;

        let mut account = self.load(account_id)?;
        account
            .ensure_active()
            .map_err(|err| BankError::on_account(account_id, err))?;
        account
            .debit(amount)
            .map_err(|err| BankError::on_account(account_id, err))?;

        self.accounts.save(&account)?;
        self.record(account_id, TransactionKind::Withdrawal, amount)?;
        Ok(())
    }

    /// Moves `amount` between two distinct accounts. Frozen accounts may
    /// participate in neither leg. Both legs are validated before either
    /// account is written, and each leg gets its own transfer record.
    pub fn transfer(
        &mut self,
        from_account_id: &AccountId,
        to_account_id: &AccountId,
        amount: Decimal,
    ) -> Result<(), BankError> {
        debug!(from = %from_account_id, to = %to_account_id, %amount, "initiating transfer");

        require_id(from_account_id)?;
        require_id(to_account_id)?;
        require_positive("Transfer", amount)?;
        if from_account_id == to_account_id {
            return Err(BankError::invalid("Cannot transfer to the same account"));
        }

        let mut from_account = self.load(from_account_id)?;
        let mut to_account = self.load(to_account_id)?;

        from_account
            .ensure_active()
            .map_err(|err| BankError::on_account(from_account_id, err))?;
        to_account
            .ensure_active()
            .map_err(|err| BankError::on_account(to_account_id, err))?;
        from_account
            .debit(amount)
            .map_err(|err| BankError::on_account(from_account_id, err))?;
        to_account.credit(amount);

        self.accounts.save(&from_account)?;
        self.accounts.save(&to_account)?;
        self.record(from_account_id, TransactionKind::Transfer, amount)?;
        self.record(to_account_id, TransactionKind::Transfer, amount)?;
        Ok(())
    }

    /// Accrues simple interest of `balance * rate_percent / 100`. Applies
    /// to frozen accounts as well: freezing bars customer-initiated
    /// movement, not bank-side accrual.
    pub fn apply_interest(
        &mut self,
        account_id: &AccountId,
        rate_percent: Decimal,
    ) -> Result<(), BankError> {
        if rate_percent <= Decimal::ZERO {
            return Err(BankError::invalid("Rate must be positive"));
        }

        debug!(account = %account_id, rate = %rate_percent, "applying interest");

        let mut account = self.load(account_id)?;
        let interest = account.balance() * rate_percent / Decimal::ONE_HUNDRED;
        account.credit(interest);
        self.accounts.save(&account)?;
        self.record(account_id, TransactionKind::Interest, interest)?;
        Ok(())
    }

    pub fn balance(&self, account_id: &AccountId) -> Result<Decimal, BankError> {
        Ok(self.load(account_id)?.balance())
    }

    /// Store contents verbatim; ordering is store-defined.
    pub fn all_accounts(&self) -> Result<Vec<Account>, BankError> {
        Ok(self.accounts.find_all()?)
    }

    pub fn freeze_account(&mut self, account_id: &AccountId) -> Result<(), BankError> {
        let mut account = self.load(account_id)?;
        account.freeze();
        self.accounts.save(&account)?;
        Ok(())
    }

    pub fn unfreeze_account(&mut self, account_id: &AccountId) -> Result<(), BankError> {
        let mut account = self.load(account_id)?;
        account.unfreeze();
        self.accounts.save(&account)?;
        Ok(())
    }

    /// Never fails on unknown ids; those simply have no history.
    pub fn transaction_history(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<Transaction>, BankError> {
        Ok(self.transactions.find_by_account_id(account_id)?)
    }

    fn load(&self, account_id: &AccountId) -> Result<Account, BankError> {
        self.accounts
            .find_by_id(account_id)?
            .ok_or_else(|| BankError::NotFound(account_id.clone()))
    }

    fn record(
        &mut self,
        account_id: &AccountId,
        kind: TransactionKind,
        amount: Decimal,
    ) -> Result<(), BankError> {
        let tx = Transaction::new(account_id.clone(), kind, amount);
        self.transactions.save(&tx)?;
        Ok(())
    }
}

fn require_id(account_id: &AccountId) -> Result<(), BankError> {
    if account_id.is_empty() {
        return Err(BankError::invalid("Account ID cannot be empty"));
    }
    Ok(())
}

fn require_positive(operation: &str, amount: Decimal) -> Result<(), BankError> {
    if amount <= Decimal::ZERO {
        return Err(BankError::invalid(format!(
            "{operation} amount must be positive, got: {amount}"
        )));
    }
    Ok(())
}
