pub mod row_service;
pub mod summary_service;

pub use row_service::{RowPatch, RowService};
pub use summary_service::{Bucket, ChartSeries, Granularity, SummaryService, Totals};

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, LedgerError>;
