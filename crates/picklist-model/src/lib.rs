pub mod column;
pub mod error;
pub mod plan;
pub mod quantity;
pub mod row;

pub use column::{Column, cell_ref};
pub use error::{ModelError, Result};
pub use plan::{
    CellUpdate, ExpansionPlan, RowOutcome, RowState, RowWarning, WarningKind,
};
pub use quantity::{QUANTITY_PREFIX, Quantity};
pub use row::OrderRow;
