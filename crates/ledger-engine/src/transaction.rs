use crate::error::{LedgerError, Result};
use serde::Serialize;
use std::fmt;

/// A strictly positive amount of money, validated from caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Amount(u64);

impl Amount {
    pub fn new(value: i64) -> Result<Self> {
        u64::try_from(value)
            .ok()
            .filter(|v| *v > 0)
            .map(Self)
            .ok_or(LedgerError::InvalidAmount(value))
    }

    pub(crate) fn positive(value: u64) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for Amount {
    type Error = LedgerError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for u64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One entry of an account's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransactionRecord {
    Deposit { amount: Amount },
    Withdraw { amount: Amount },
    TransferOut { amount: Amount, to: String },
    TransferIn { amount: Amount, from: String },
    Cashback { amount: Amount },
}

impl TransactionRecord {
    /// The amount this record moved out of the account, if any.
    pub const fn outgoing(&self) -> Option<Amount> {
        match self {
            Self::Withdraw { amount } | Self::TransferOut { amount, .. } => Some(*amount),
            Self::Deposit { .. } | Self::TransferIn { .. } | Self::Cashback { .. } => None,
        }
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit { amount } => write!(f, "deposit: +{amount}"),
            Self::Withdraw { amount } => write!(f, "withdraw: -{amount}"),
            Self::TransferOut { amount, to } => write!(f, "transfer_out: -{amount} to {to}"),
            Self::TransferIn { amount, from } => write!(f, "transfer_in: +{amount} from {from}"),
            Self::Cashback { amount } => write!(f, "cashback: +{amount}"),
        }
    }
}

/// Account state: balance plus append-only history.
///
/// Mutation is split into a fallible `check_*` step and an infallible `apply_*`
/// step so that a transfer can validate both sides before touching either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: String,
    balance: u64,
    outgoing: u128,
    history: Vec<TransactionRecord>,
}

impl Account {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            balance: 0,
            outgoing: 0,
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn balance(&self) -> u64 {
        self.balance
    }

    /// Sum of every withdraw and transfer-out amount in the history.
    ///
    /// Wider than a balance: an account can send away more than `u64::MAX`
    /// over its lifetime.
    pub const fn outgoing(&self) -> u128 {
        self.outgoing
    }

    pub fn history(&self) -> &[TransactionRecord] {
        &self.history
    }

    pub(crate) fn check_credit(&self, amount: u64) -> Result<()> {
        self.balance
            .checked_add(amount)
            .map(|_| ())
            .ok_or_else(|| LedgerError::BalanceOverflow(self.id.clone()))
    }

    pub(crate) fn check_debit(&self, amount: Amount) -> Result<()> {
        if self.balance >= amount.value() {
            return Ok(());
        }

        Err(LedgerError::InsufficientFunds {
            account: self.id.clone(),
            balance: self.balance,
            requested: amount.value(),
        })
    }

    /// Credits the record's amount. Callers must have passed `check_credit`.
    pub(crate) fn apply_credit(&mut self, amount: Amount, record: TransactionRecord) {
        self.balance += amount.value();
        self.history.push(record);
    }

    /// Debits the record's amount. Callers must have passed `check_debit`.
    pub(crate) fn apply_debit(&mut self, amount: Amount, record: TransactionRecord) {
        self.balance -= amount.value();
        self.outgoing += u128::from(amount.value());
        self.history.push(record);
    }

    pub(crate) fn deposit(&mut self, amount: Amount) -> Result<u64> {
        self.check_credit(amount.value())?;
        self.apply_credit(amount, TransactionRecord::Deposit { amount });

        Ok(self.balance)
    }

    pub(crate) fn withdraw(&mut self, amount: Amount) -> Result<u64> {
        self.check_debit(amount)?;
        self.apply_debit(amount, TransactionRecord::Withdraw { amount });

        Ok(self.balance)
    }
}

/// Point-in-time view of an account, suitable for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub id: String,
    pub balance: u64,
    pub outgoing: u128,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            balance: account.balance,
            outgoing: account.outgoing,
        }
    }
}
