//! Table sink for picklist runs: the [`TableStore`] seam, an in-memory table,
//! CSV-backed sheets and the run entry points.

pub mod apply;
pub mod error;
pub mod report;
pub mod run;
pub mod sheet;
pub mod store;

pub use apply::apply_plan;
pub use error::{RunError, StoreError};
pub use report::RunReport;
pub use run::{RunOptions, RunOutcome, process_picklist, process_sheet, run_on_store};
pub use sheet::{CsvSheetStore, StoreConnection};
pub use store::{MemoryTable, TableStore};
