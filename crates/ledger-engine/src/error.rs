use thiserror::Error;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Every way a ledger operation can be rejected.
///
/// All variants are detected before any state is touched, so an `Err` always
/// means the ledger is exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Amount must be positive, got {0}")]
    InvalidAmount(i64),

    #[error("Insufficient funds in {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        account: String,
        balance: u64,
        requested: u64,
    },

    #[error("Source and destination are the same account: {0}")]
    InvalidTarget(String),

    #[error("Account already exists: {0}")]
    DuplicateAccount(String),

    #[error("Scheduled payment id already used: {0}")]
    DuplicatePayment(String),

    #[error("Cashback percent must be within 0..=100, got {0}")]
    InvalidPercent(i64),

    #[error("Balance of {0} would overflow")]
    BalanceOverflow(String),
}
