//! The table sink seam.

use std::collections::BTreeSet;

use picklist_core::SourceTable;
use picklist_model::{CellUpdate, Column, OrderRow};

use crate::error::StoreError;

/// A picklist sheet the engine reads from and writes back to.
///
/// Rows are 1-based; row 1 is the header. Only the four canonical columns
/// are ever written.
pub trait TableStore {
    /// Cells of `column` from row 1 down to its last non-blank cell.
    fn read_column(&self, column: Column) -> Result<Vec<String>, StoreError>;

    /// Writes every update or none of them.
    fn batch_write_cells(&mut self, updates: &[CellUpdate]) -> Result<(), StoreError>;

    /// Appends after the last populated row, in order.
    fn append_rows(&mut self, rows: &[OrderRow]) -> Result<(), StoreError>;

    /// Blanks columns A to D of each row in place.
    fn clear_rows(&mut self, rows: &BTreeSet<usize>) -> Result<(), StoreError>;

    /// Last row with a non-blank cell in columns A to D; 0 for an empty sheet.
    fn last_populated_row(&self) -> Result<usize, StoreError> {
        Ok(self.read_table()?.len())
    }

    /// Reads the four canonical columns into a table.
    fn read_table(&self) -> Result<SourceTable, StoreError> {
        Ok(SourceTable::from_columns(
            &self.read_column(Column::OrderId)?,
            &self.read_column(Column::Quantity)?,
            &self.read_column(Column::Sku)?,
            &self.read_column(Column::ParentSku)?,
        ))
    }
}

/// Sheet held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTable {
    rows: Vec<Vec<String>>,
}

impl MemoryTable {
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, column: Column) -> &str {
        row.checked_sub(1)
            .and_then(|idx| self.rows.get(idx))
            .and_then(|cells| cells.get(column.index() - 1))
            .map_or("", String::as_str)
    }

    fn set(&mut self, row: usize, column: Column, value: &str) {
        if self.rows.len() < row {
            self.rows.resize_with(row, Vec::new);
        }
        let cells = &mut self.rows[row - 1];
        let idx = column.index() - 1;
        if cells.len() <= idx {
            cells.resize(idx + 1, String::new());
        }
        value.clone_into(&mut cells[idx]);
    }
}

impl TableStore for MemoryTable {
    fn read_column(&self, column: Column) -> Result<Vec<String>, StoreError> {
        let idx = column.index() - 1;
        let mut cells: Vec<String> = self
            .rows
            .iter()
            .map(|row| row.get(idx).cloned().unwrap_or_default())
            .collect();
        while cells.last().is_some_and(|cell| cell.trim().is_empty()) {
            cells.pop();
        }
        Ok(cells)
    }

    fn batch_write_cells(&mut self, updates: &[CellUpdate]) -> Result<(), StoreError> {
        if let Some(bad) = updates.iter().find(|update| update.row == 0) {
            return Err(StoreError::OutOfRange {
                row: bad.row,
                column: bad.column,
            });
        }
        for update in updates {
            self.set(update.row, update.column, &update.value);
        }
        Ok(())
    }

    fn append_rows(&mut self, rows: &[OrderRow]) -> Result<(), StoreError> {
        let last = self.last_populated_row()?;
        for (offset, row) in rows.iter().enumerate() {
            for column in Column::ALL {
                self.set(last + 1 + offset, column, row.cell(column));
            }
        }
        Ok(())
    }

    fn clear_rows(&mut self, rows: &BTreeSet<usize>) -> Result<(), StoreError> {
        if rows.contains(&0) {
            return Err(StoreError::OutOfRange {
                row: 0,
                column: Column::OrderId,
            });
        }
        for &row in rows {
            if row > self.rows.len() {
                continue;
            }
            for column in Column::ALL {
                self.set(row, column, "");
            }
        }
        Ok(())
    }
}
