use crate::error::{LedgerError, Result};
use crate::transaction::Amount;
use std::collections::{HashSet, VecDeque};
use std::mem;

/// A deferred transfer waiting for the next processing pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledPayment {
    pub id: String,
    pub from: String,
    pub to: String,
    pub amount: Amount,
}

/// Outcome of one processing pass, in queue order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingReport {
    pub succeeded: Vec<String>,
    pub skipped: Vec<(String, LedgerError)>,
}

/// FIFO queue of pending payments.
///
/// Ids stay reserved after a payment leaves the queue, whatever its outcome.
#[derive(Debug, Default)]
pub(crate) struct PaymentQueue {
    pending: VecDeque<ScheduledPayment>,
    used_ids: HashSet<String>,
}

impl PaymentQueue {
    pub(crate) fn ensure_unused(&self, id: &str) -> Result<()> {
        if self.used_ids.contains(id) {
            return Err(LedgerError::DuplicatePayment(id.to_string()));
        }

        Ok(())
    }

    pub(crate) fn enqueue(&mut self, payment: ScheduledPayment) -> Result<()> {
        self.ensure_unused(&payment.id)?;
        self.used_ids.insert(payment.id.clone());
        self.pending.push_back(payment);

        Ok(())
    }

    /// Empties the queue and hands back everything that was pending.
    pub(crate) fn take_pending(&mut self) -> VecDeque<ScheduledPayment> {
        mem::take(&mut self.pending)
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}
