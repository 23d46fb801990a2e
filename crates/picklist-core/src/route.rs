//! Pick route: expanded SKUs grouped per warehouse in shelf order.

use std::fmt;

use picklist_ingest::{ShelfSlot, WarehouseSequence};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehousePicks {
    pub warehouse: String,
    /// SKU cells in shelf order.
    pub skus: Vec<String>,
}

impl WarehousePicks {
    /// Space-joined SKU list, ready to paste into a picking tool.
    pub fn joined(&self) -> String {
        self.skus.join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickRoute {
    pub warehouses: Vec<WarehousePicks>,
    /// Every sequenced SKU across warehouses, by shelf position.
    pub all: Vec<String>,
    /// SKU cells whose base SKU is not in the sequence.
    pub unsequenced: Vec<String>,
}

/// Base SKU of a cell: the text before the first space.
fn base_sku(cell: &str) -> &str {
    cell.split_whitespace().next().unwrap_or_default()
}

/// Groups SKU cells of the processed table by warehouse.
///
/// `sku_cells` are data cells only (no header). Blank cells are ignored.
pub fn build_pick_route(sku_cells: &[String], sequence: &WarehouseSequence) -> PickRoute {
    let mut grouped: Vec<Vec<(usize, &str)>> = vec![Vec::new(); sequence.warehouses.len()];
    let mut unsequenced = Vec::new();
    for cell in sku_cells {
        let cell = cell.trim();
        if cell.is_empty() {
            continue;
        }
        match sequence.slot(base_sku(cell)) {
            Some(ShelfSlot {
                warehouse,
                position,
            }) => grouped[warehouse].push((position, cell)),
            None => {
                debug!(sku = cell, "sku not in warehouse sequence");
                unsequenced.push(cell.to_string());
            }
        }
    }

    let mut all: Vec<(usize, &str)> = Vec::new();
    let mut warehouses = Vec::with_capacity(grouped.len());
    for (name, mut picks) in sequence.warehouses.iter().zip(grouped) {
        picks.sort_by_key(|(position, _)| *position);
        all.extend(picks.iter().copied());
        warehouses.push(WarehousePicks {
            warehouse: name.clone(),
            skus: picks.iter().map(|(_, sku)| (*sku).to_string()).collect(),
        });
    }
    all.sort_by_key(|(position, _)| *position);

    PickRoute {
        warehouses,
        all: all.into_iter().map(|(_, sku)| sku.to_string()).collect(),
        unsequenced,
    }
}

fn labelled(label: &str, skus: &[String]) -> String {
    if skus.is_empty() {
        format!("{label}:")
    } else {
        format!("{label}: {}", skus.join(" "))
    }
}

impl fmt::Display for PickRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines: Vec<String> = self
            .warehouses
            .iter()
            .map(|picks| labelled(&picks.warehouse, &picks.skus))
            .collect();
        lines.push(labelled("all", &self.all));
        if !self.unsequenced.is_empty() {
            lines.push(labelled("unsequenced", &self.unsequenced));
        }
        write!(f, "{}", lines.join("\n"))
    }
}
