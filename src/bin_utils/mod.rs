//! This module could be a separate crate on its own, to bootstrap [`bank_ledger`](crate)
//! within the binary, but for simplicity purposes, I include this module directly.

use std::collections::HashMap;
use std::io::{Read, Write};

use anyhow::Result;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::AccountId,
    service::{BankError, BankService},
    store::in_memory::{InMemoryAccountStore, InMemoryTransactionStore},
};

use csv_parser::{CsvOperationParser, Operation, OperationKind};
use csv_printer::{AccountSummary, print_accounts};

pub mod csv_parser;
pub mod csv_printer;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Unknown account label: {0}")]
    UnknownLabel(String),
    #[error("Label already bound to an account: {0}")]
    DuplicateLabel(String),
    #[error("Missing required field `{field}` for {kind:?}")]
    MissingField {
        kind: OperationKind,
        field: &'static str,
    },
    #[error(transparent)]
    Bank(#[from] BankError),
}

/// Replays an operations CSV against an in-memory bank and prints the
/// final account states, sorted by label so the output is deterministic.
pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, ReplayError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        let mut bank = BankService::new(
            InMemoryAccountStore::default(),
            InMemoryTransactionStore::default(),
        );
        let mut labels: HashMap<String, AccountId> = HashMap::new();

        for (line, op) in parser {
            if let Err(err) = apply_operation(&mut bank, &mut labels, op) {
                (self.error_printer)(line, err);
            }
        }

        let accounts: HashMap<AccountId, _> = bank
            .all_accounts()?
            .into_iter()
            .map(|acc| (acc.id().clone(), acc))
            .collect();

        let mut bindings: Vec<_> = labels.into_iter().collect();
        bindings.sort_by(|(a, _), (b, _)| a.cmp(b));

        print_accounts(
            self.output,
            bindings.into_iter().filter_map(|(label, id)| {
                accounts.get(&id).map(|acc| AccountSummary {
                    account: label,
                    owner: acc.owner_name().to_owned(),
                    balance: acc.balance(),
                    frozen: acc.is_frozen(),
                })
            }),
        )
    }
}

fn apply_operation(
    bank: &mut BankService<InMemoryAccountStore, InMemoryTransactionStore>,
    labels: &mut HashMap<String, AccountId>,
    op: Operation,
) -> Result<(), ReplayError> {
    let kind = op.kind;
    let amount = op.amount;
    let require_amount = move || {
        amount.ok_or(ReplayError::MissingField {
            kind,
            field: "amount",
        })
    };

    match kind {
        OperationKind::Open => {
            if labels.contains_key(&op.account) {
                return Err(ReplayError::DuplicateLabel(op.account));
            }
            let owner = op.owner.as_deref().ok_or(ReplayError::MissingField {
                kind,
                field: "owner",
            })?;
            let initial = op.amount.unwrap_or(Decimal::ZERO);
            let account = bank.create_account(owner, initial)?;
            labels.insert(op.account, account.id().clone());
        }
        OperationKind::Deposit => {
            let id = resolve(labels, &op.account)?;
            bank.deposit(&id, require_amount()?)?;
        }
        OperationKind::Withdraw => {
            let id = resolve(labels, &op.account)?;
            bank.withdraw(&id, require_amount()?)?;
        }
        OperationKind::Transfer => {
            let to_label = op.to.as_deref().ok_or(ReplayError::MissingField {
                kind,
                field: "to",
            })?;
            let from = resolve(labels, &op.account)?;
            let to = resolve(labels, to_label)?;
            bank.transfer(&from, &to, require_amount()?)?;
        }
        OperationKind::Interest => {
            let id = resolve(labels, &op.account)?;
            bank.apply_interest(&id, require_amount()?)?;
        }
        OperationKind::Freeze => {
            let id = resolve(labels, &op.account)?;
            bank.freeze_account(&id)?;
        }
        OperationKind::Unfreeze => {
            let id = resolve(labels, &op.account)?;
            bank.unfreeze_account(&id)?;
        }
    }
    Ok(())
}

fn resolve(labels: &HashMap<String, AccountId>, label: &str) -> Result<AccountId, ReplayError> {
    labels
        .get(label)
        .cloned()
        .ok_or_else(|| ReplayError::UnknownLabel(label.to_owned()))
}
