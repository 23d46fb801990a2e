//! Canonical column layout of the picklist table.
//!
//! The table is read and written with a fixed, 1-indexed layout:
//!
//! | Column | Content                         |
//! |--------|---------------------------------|
//! | A      | order identifier / product name |
//! | B      | quantity (`Quantity: <n>`)      |
//! | C      | SKU reference                   |
//! | D      | parent SKU reference            |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    OrderId,
    Quantity,
    Sku,
    ParentSku,
}

impl Column {
    /// All tracked columns in sheet order.
    pub const ALL: [Column; 4] = [
        Column::OrderId,
        Column::Quantity,
        Column::Sku,
        Column::ParentSku,
    ];

    /// 1-based sheet column index.
    pub fn index(self) -> usize {
        match self {
            Column::OrderId => 1,
            Column::Quantity => 2,
            Column::Sku => 3,
            Column::ParentSku => 4,
        }
    }

    pub fn from_index(index: usize) -> Result<Self> {
        Column::ALL
            .into_iter()
            .find(|column| column.index() == index)
            .ok_or(ModelError::UnknownColumn(index))
    }

    /// Spreadsheet letter of the column.
    pub fn letter(self) -> char {
        match self {
            Column::OrderId => 'A',
            Column::Quantity => 'B',
            Column::Sku => 'C',
            Column::ParentSku => 'D',
        }
    }

    /// Header label written by the export preparation step.
    pub fn header(self) -> &'static str {
        match self {
            Column::OrderId => "order_sn",
            Column::Quantity => "Quantity",
            Column::Sku => "SKU Reference No.",
            Column::ParentSku => "Parent SKU Reference No.",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A1-style reference for a cell, e.g. `C12`.
pub fn cell_ref(column: Column, row: usize) -> String {
    format!("{}{row}", column.letter())
}
