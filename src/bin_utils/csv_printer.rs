use std::io::Write;

use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

/// Final state of one account, keyed by the label the operations file
/// used for it.
#[derive(Debug, Serialize)]
pub struct AccountSummary {
    pub account: String,
    pub owner: String,
    pub balance: Decimal,
    pub frozen: bool,
}

pub fn print_accounts<W>(
    output: &mut W,
    accounts: impl Iterator<Item = AccountSummary>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for acc in accounts {
        if let Err(err) = writer.serialize(acc) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}
