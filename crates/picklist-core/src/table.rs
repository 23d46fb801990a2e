//! Source table assembled from column reads.

use picklist_model::OrderRow;

/// Rows of the picklist table as read from the store.
///
/// Row `n` of the sheet is `rows[n - 1]`; row 1 is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTable {
    pub rows: Vec<OrderRow>,
}

impl SourceTable {
    /// Zips the four canonical columns, padding shorter ones with blanks.
    ///
    /// Column reads stop at each column's last non-blank cell, so the columns
    /// can differ in length.
    pub fn from_columns(
        order_ids: &[String],
        quantities: &[String],
        skus: &[String],
        parent_skus: &[String],
    ) -> Self {
        let height = order_ids
            .len()
            .max(quantities.len())
            .max(skus.len())
            .max(parent_skus.len());
        let cell = |column: &[String], idx: usize| column.get(idx).cloned().unwrap_or_default();
        let rows = (0..height)
            .map(|idx| OrderRow {
                order_id: cell(order_ids, idx),
                quantity_raw: cell(quantities, idx),
                sku: cell(skus, idx),
                parent_sku: cell(parent_skus, idx),
                variation_name: None,
            })
            .collect();
        Self { rows }
    }

    pub fn from_rows(rows: Vec<OrderRow>) -> Self {
        Self { rows }
    }

    /// Number of sheet rows, header included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when there is nothing below the header.
    pub fn has_no_data(&self) -> bool {
        self.rows.len() <= 1
    }

    /// Data rows with their 1-based sheet index.
    pub fn data_rows(&self) -> impl Iterator<Item = (usize, &OrderRow)> {
        self.rows
            .iter()
            .enumerate()
            .skip(1)
            .map(|(idx, row)| (idx + 1, row))
    }
}
