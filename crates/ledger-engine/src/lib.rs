pub mod engine;
pub mod error;
pub mod schedule;
pub mod shared;
pub mod transaction;

pub use engine::Ledger;
pub use error::{LedgerError, Result};
pub use schedule::{ProcessingReport, ScheduledPayment};
pub use shared::SharedLedger;
pub use transaction::{AccountSummary, Amount, TransactionRecord};
