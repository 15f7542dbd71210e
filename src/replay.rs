use crate::command::Command;
use anyhow::{Context, Result};
use ledger_engine::Ledger;
use std::io;
use tracing::warn;

/// Row counts from one pass over a script
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    pub applied: usize,
    pub rejected: usize,
}

/// Applies every row of a CSV script to `ledger` in file order.
///
/// Unparseable rows and rows the ledger rejects are logged and counted; the
/// pass always reaches the end of the input.
pub fn replay<R: io::Read>(source: R, ledger: &mut Ledger) -> ReplayStats {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);
    let mut stats = ReplayStats::default();

    for (index, row) in reader.deserialize::<Command>().enumerate() {
        let outcome = row
            .context("Malformed row")
            .and_then(|command| command.apply(ledger));

        match outcome {
            Ok(()) => stats.applied += 1,
            Err(e) => {
                warn!(row = index + 1, "Command rejected: {e:#}");
                stats.rejected += 1;
            }
        }
    }

    stats
}

/// Writes the account snapshot as CSV (`id,balance,outgoing`).
pub fn write_accounts<W: io::Write>(ledger: &Ledger, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    for summary in ledger.accounts() {
        writer
            .serialize(&summary)
            .with_context(|| format!("Failed to serialize account {}", summary.id))?;
    }

    writer.flush().context("Failed to flush account output")
}
