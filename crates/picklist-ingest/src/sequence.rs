//! Warehouse shelf sequence.
//!
//! A sequence file lists SKUs per warehouse in the order a picker walks the
//! shelves:
//!
//! ```text
//! warehouse,sku
//! 04-2098-5F,1152 x 1
//! 04-2098-5F,1153
//! 03-2140,941
//! ```

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::info;

use crate::error::IngestError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShelfSlot {
    /// Index into [`WarehouseSequence::warehouses`].
    pub warehouse: usize,
    /// 0-based position within the warehouse.
    pub position: usize,
}

#[derive(Debug, Clone, Default)]
pub struct WarehouseSequence {
    /// Warehouses in first-appearance order.
    pub warehouses: Vec<String>,
    next_position: Vec<usize>,
    slots: HashMap<String, ShelfSlot>,
}

impl WarehouseSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a SKU at the next shelf position of `warehouse`.
    ///
    /// A SKU listed again moves to its latest slot.
    pub fn push(&mut self, warehouse: &str, sku_cell: &str) {
        let sku = base_sequence_sku(sku_cell);
        if sku.is_empty() {
            return;
        }
        let warehouse_idx = match self.warehouses.iter().position(|name| name == warehouse) {
            Some(idx) => idx,
            None => {
                self.warehouses.push(warehouse.to_string());
                self.next_position.push(0);
                self.warehouses.len() - 1
            }
        };
        let position = self.next_position[warehouse_idx];
        self.next_position[warehouse_idx] += 1;
        self.slots.insert(
            sku.to_string(),
            ShelfSlot {
                warehouse: warehouse_idx,
                position,
            },
        );
    }

    pub fn slot(&self, sku: &str) -> Option<ShelfSlot> {
        self.slots.get(sku).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Strips a `<sku> x <n>` pack suffix.
fn base_sequence_sku(cell: &str) -> &str {
    cell.split(" x ").next().unwrap_or_default().trim()
}

pub fn load_warehouse_sequence(path: &Path) -> Result<WarehouseSequence, IngestError> {
    let file = std::fs::File::open(path).map_err(|e| IngestError::io(path, e))?;
    load_warehouse_sequence_from(file, path)
}

pub fn load_warehouse_sequence_from<R: Read>(
    reader: R,
    source: &Path,
) -> Result<WarehouseSequence, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = reader
        .headers()
        .map_err(|e| IngestError::csv(source, &e))?
        .clone();
    let position = |name: &str| {
        headers
            .iter()
            .position(|header| header.trim().trim_matches('\u{feff}').eq_ignore_ascii_case(name))
    };
    let (Some(warehouse_idx), Some(sku_idx)) = (position("warehouse"), position("sku")) else {
        let columns = ["warehouse", "sku"]
            .into_iter()
            .filter(|name| position(*name).is_none())
            .map(str::to_string)
            .collect();
        return Err(IngestError::MissingColumns {
            path: source.to_path_buf(),
            columns,
        });
    };

    let mut sequence = WarehouseSequence::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::csv(source, &e))?;
        let warehouse = record.get(warehouse_idx).unwrap_or_default().trim();
        let sku = record.get(sku_idx).unwrap_or_default();
        if warehouse.is_empty() {
            continue;
        }
        sequence.push(warehouse, sku);
    }
    info!(
        warehouses = sequence.warehouses.len(),
        skus = sequence.len(),
        "warehouse sequence loaded"
    );
    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_count_per_warehouse() {
        let mut sequence = WarehouseSequence::new();
        sequence.push("5F", "1152 x 1");
        sequence.push("4F", "941");
        sequence.push("5F", "1153");
        sequence.push("5F", "  ");
        assert_eq!(sequence.warehouses, vec!["5F", "4F"]);
        assert_eq!(
            sequence.slot("1152"),
            Some(ShelfSlot {
                warehouse: 0,
                position: 0
            })
        );
        assert_eq!(
            sequence.slot("1153"),
            Some(ShelfSlot {
                warehouse: 0,
                position: 1
            })
        );
        assert_eq!(sequence.slot("941").map(|slot| slot.warehouse), Some(1));
        assert_eq!(sequence.len(), 3);
    }

    #[test]
    fn repeated_sku_keeps_last_slot() {
        let mut sequence = WarehouseSequence::new();
        sequence.push("5F", "1152");
        sequence.push("5F", "1153");
        sequence.push("4F", "1152");
        assert_eq!(
            sequence.slot("1152"),
            Some(ShelfSlot {
                warehouse: 1,
                position: 0
            })
        );
    }
}
