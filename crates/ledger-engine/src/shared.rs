use crate::engine::Ledger;
use crate::error::Result;
use crate::schedule::ProcessingReport;
use crate::transaction::AccountSummary;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to one `Ledger` guarded by a single lock.
///
/// Every call holds the lock for its whole duration, so no caller can observe
/// a half-applied transfer, and a processing pass sees a fixed queue.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl SharedLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_account(&self, id: &str) -> Result<()> {
        self.inner.lock().create_account(id)
    }

    pub fn deposit(&self, id: &str, amount: i64) -> Result<u64> {
        self.inner.lock().deposit(id, amount)
    }

    pub fn withdraw(&self, id: &str, amount: i64) -> Result<u64> {
        self.inner.lock().withdraw(id, amount)
    }

    pub fn get_balance(&self, id: &str) -> Result<u64> {
        self.inner.lock().get_balance(id)
    }

    pub fn transfer(&self, from: &str, to: &str, amount: i64) -> Result<()> {
        self.inner.lock().transfer(from, to, amount)
    }

    pub fn get_transaction_history(&self, id: &str) -> Result<Vec<String>> {
        self.inner.lock().get_transaction_history(id)
    }

    pub fn top_spenders(&self, n: usize) -> Vec<String> {
        self.inner.lock().top_spenders(n)
    }

    pub fn schedule_payment(
        &self,
        from: &str,
        to: &str,
        amount: i64,
        payment_id: &str,
    ) -> Result<()> {
        self.inner
            .lock()
            .schedule_payment(from, to, amount, payment_id)
    }

    pub fn process_scheduled_payments(&self) -> usize {
        self.inner.lock().process_scheduled_payments()
    }

    pub fn run_scheduled_payments(&self) -> ProcessingReport {
        self.inner.lock().run_scheduled_payments()
    }

    pub fn apply_cashback(&self, id: &str, percent: i64) -> Result<u64> {
        self.inner.lock().apply_cashback(id, percent)
    }

    pub fn accounts(&self) -> Vec<AccountSummary> {
        self.inner.lock().accounts()
    }

    /// Runs `f` with exclusive access, for multi-step reads that must agree.
    pub fn with<R>(&self, f: impl FnOnce(&mut Ledger) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
