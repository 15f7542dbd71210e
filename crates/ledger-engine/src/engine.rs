use crate::error::{LedgerError, Result};
use crate::schedule::{PaymentQueue, ProcessingReport, ScheduledPayment};
use crate::transaction::{Account, AccountSummary, Amount, TransactionRecord};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, warn};

/// In-memory ledger: account store plus the scheduled-payment queue
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: HashMap<String, Account>,
    scheduled: PaymentQueue,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_account(&mut self, id: &str) -> Result<()> {
        match self.accounts.entry(id.to_string()) {
            Entry::Occupied(_) => Err(LedgerError::DuplicateAccount(id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(Account::new(id));
                debug!(account = id, "Account created");

                Ok(())
            }
        }
    }

    /// Returns the balance after the deposit.
    pub fn deposit(&mut self, id: &str, amount: i64) -> Result<u64> {
        let account = self.account_mut(id)?;
        let amount = Amount::new(amount)?;
        let balance = account.deposit(amount)?;

        debug!(account = id, %amount, balance, "Deposit applied");

        Ok(balance)
    }

    /// Returns the balance after the withdrawal.
    pub fn withdraw(&mut self, id: &str, amount: i64) -> Result<u64> {
        let account = self.account_mut(id)?;
        let amount = Amount::new(amount)?;
        let balance = account.withdraw(amount)?;

        debug!(account = id, %amount, balance, "Withdrawal applied");

        Ok(balance)
    }

    pub fn get_balance(&self, id: &str) -> Result<u64> {
        self.account(id).map(Account::balance)
    }

    /// Moves `amount` from `from` to `to` as one step.
    ///
    /// Preconditions are checked in order: both accounts exist, they differ,
    /// the amount is positive, the source covers it.
    pub fn transfer(&mut self, from: &str, to: &str, amount: i64) -> Result<()> {
        self.check_endpoints(from, to)?;
        let amount = Amount::new(amount)?;
        self.move_funds(from, to, amount)?;

        debug!(from, to, %amount, "Transfer applied");

        Ok(())
    }

    /// History rendered as display strings, oldest first.
    pub fn get_transaction_history(&self, id: &str) -> Result<Vec<String>> {
        Ok(self
            .records(id)?
            .iter()
            .map(ToString::to_string)
            .collect())
    }

    pub fn records(&self, id: &str) -> Result<&[TransactionRecord]> {
        self.account(id).map(Account::history)
    }

    pub fn outgoing_total(&self, id: &str) -> Result<u128> {
        self.account(id).map(Account::outgoing)
    }

    /// Ids of the `n` accounts with the largest outgoing totals.
    ///
    /// Ties are broken by id ascending.
    pub fn top_spenders(&self, n: usize) -> Vec<String> {
        let mut ranked: Vec<&Account> = self.accounts.values().collect();
        ranked.sort_by(|a, b| {
            b.outgoing()
                .cmp(&a.outgoing())
                .then_with(|| a.id().cmp(b.id()))
        });

        ranked
            .into_iter()
            .take(n)
            .map(|account| account.id().to_string())
            .collect()
    }

    /// Queues a transfer for the next processing pass. Balances are untouched.
    pub fn schedule_payment(
        &mut self,
        from: &str,
        to: &str,
        amount: i64,
        payment_id: &str,
    ) -> Result<()> {
        self.check_endpoints(from, to)?;
        let amount = Amount::new(amount)?;

        self.scheduled.enqueue(ScheduledPayment {
            id: payment_id.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            amount,
        })?;

        debug!(payment = payment_id, from, to, %amount, "Payment scheduled");

        Ok(())
    }

    /// Runs every pending payment and returns how many went through.
    pub fn process_scheduled_payments(&mut self) -> usize {
        self.run_scheduled_payments().succeeded.len()
    }

    /// Drains the queue in FIFO order.
    ///
    /// A payment that fails its transfer checks is skipped and the pass
    /// continues. The queue is empty afterwards either way.
    pub fn run_scheduled_payments(&mut self) -> ProcessingReport {
        let mut report = ProcessingReport::default();

        for payment in self.scheduled.take_pending() {
            let outcome = self
                .check_endpoints(&payment.from, &payment.to)
                .and_then(|()| self.move_funds(&payment.from, &payment.to, payment.amount));

            match outcome {
                Ok(()) => {
                    debug!(payment = %payment.id, "Scheduled payment executed");
                    report.succeeded.push(payment.id);
                }
                Err(e) => {
                    warn!(payment = %payment.id, "Scheduled payment skipped: {e}");
                    report.skipped.push((payment.id, e));
                }
            }
        }

        report
    }

    pub fn pending_payments(&self) -> usize {
        self.scheduled.len()
    }

    /// Credits `floor(outgoing * percent / 100)` and returns the rebate.
    ///
    /// A non-zero rebate is recorded as a `cashback` entry, which never counts
    /// as outgoing.
    pub fn apply_cashback(&mut self, id: &str, percent: i64) -> Result<u64> {
        let account = self.account_mut(id)?;
        let percent = u8::try_from(percent)
            .ok()
            .filter(|p| *p <= 100)
            .ok_or(LedgerError::InvalidPercent(percent))?;

        // floor(outgoing * percent / 100) without forming the full product
        let outgoing = account.outgoing();
        let percent_wide = u128::from(percent);
        let rebate = outgoing / 100 * percent_wide + outgoing % 100 * percent_wide / 100;
        let rebate =
            u64::try_from(rebate).map_err(|_| LedgerError::BalanceOverflow(id.to_string()))?;

        if let Some(amount) = Amount::positive(rebate) {
            account.check_credit(rebate)?;
            account.apply_credit(amount, TransactionRecord::Cashback { amount });
        }

        debug!(account = id, percent, rebate, "Cashback applied");

        Ok(rebate)
    }

    /// Snapshot of every account, sorted by id
    pub fn accounts(&self) -> Vec<AccountSummary> {
        let mut summaries: Vec<AccountSummary> =
            self.accounts.values().map(AccountSummary::from).collect();
        summaries.sort_by(|a, b| a.id.cmp(&b.id));

        summaries
    }

    fn account(&self, id: &str) -> Result<&Account> {
        self.accounts
            .get(id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    fn account_mut(&mut self, id: &str) -> Result<&mut Account> {
        self.accounts
            .get_mut(id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    fn check_endpoints(&self, from: &str, to: &str) -> Result<()> {
        self.account(from)?;
        self.account(to)?;

        if from == to {
            return Err(LedgerError::InvalidTarget(from.to_string()));
        }

        Ok(())
    }

    /// Validates both sides, then debits and credits together.
    ///
    /// `from` and `to` must already have passed `check_endpoints`.
    fn move_funds(&mut self, from: &str, to: &str, amount: Amount) -> Result<()> {
        self.account(from)?.check_debit(amount)?;
        self.account(to)?.check_credit(amount.value())?;

        let [Some(source), Some(destination)] = self.accounts.get_disjoint_mut([from, to]) else {
            return Err(LedgerError::NotFound(from.to_string()));
        };

        source.apply_debit(
            amount,
            TransactionRecord::TransferOut {
                amount,
                to: to.to_string(),
            },
        );
        destination.apply_credit(
            amount,
            TransactionRecord::TransferIn {
                amount,
                from: from.to_string(),
            },
        );

        Ok(())
    }
}
