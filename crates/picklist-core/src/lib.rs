//! Order expansion: classification of picklist rows into in-place updates,
//! bundle expansions and pass-through rows, plus warehouse pick routing.

pub mod engine;
pub mod error;
pub mod matcher;
pub mod route;
pub mod table;

pub use engine::ExpansionEngine;
pub use error::ExpansionError;
pub use matcher::{find_multi_size_label, find_single_size_label};
pub use route::{PickRoute, WarehousePicks, build_pick_route};
pub use table::SourceTable;
