//! Controller and services that sit between the row model and the front end.

pub mod ledger_manager;
pub mod services;
pub mod utils;

pub use ledger_manager::LedgerManager;
