//! Row model, month keys and the per-month ledger container.

pub mod category;
mod fields;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod month;
pub mod row;

pub use category::Category;
pub use fields::parse_amount;
pub use ledger::MonthlyLedger;
pub use month::MonthKey;
pub use row::{EntryType, LedgerEntry, Row, RowId};

pub(crate) use fields::parse_date;
