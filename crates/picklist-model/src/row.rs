use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::quantity::Quantity;

/// One row of the picklist table.
///
/// Row positions are 1-indexed and carried separately (see [`crate::RowOutcome`]);
/// the position decides which physical row gets updated or cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRow {
    pub order_id: String,
    /// Quantity cell as stored, normally `Quantity: <n>`.
    pub quantity_raw: String,
    pub sku: String,
    pub parent_sku: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_name: Option<String>,
}

impl OrderRow {
    pub fn new(
        order_id: impl Into<String>,
        quantity: Quantity,
        sku: impl Into<String>,
        parent_sku: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            quantity_raw: quantity.to_cell(),
            sku: sku.into(),
            parent_sku: parent_sku.into(),
            variation_name: None,
        }
    }

    /// Builds a row from the four canonical cells; missing cells read as blank.
    pub fn from_cells<S: AsRef<str>>(cells: &[S]) -> Self {
        let cell = |idx: usize| {
            cells
                .get(idx)
                .map(|value| value.as_ref().to_string())
                .unwrap_or_default()
        };
        Self {
            order_id: cell(0),
            quantity_raw: cell(1),
            sku: cell(2),
            parent_sku: cell(3),
            variation_name: None,
        }
    }

    pub fn cell(&self, column: Column) -> &str {
        match column {
            Column::OrderId => &self.order_id,
            Column::Quantity => &self.quantity_raw,
            Column::Sku => &self.sku,
            Column::ParentSku => &self.parent_sku,
        }
    }

    /// Cells in `[orderId, quantity, sku, parentSku]` order.
    pub fn to_cells(&self) -> Vec<String> {
        Column::ALL
            .iter()
            .map(|column| self.cell(*column).to_string())
            .collect()
    }

    pub fn is_blank(&self) -> bool {
        Column::ALL
            .iter()
            .all(|column| self.cell(*column).trim().is_empty())
    }
}
