//! Marketplace export preparation.
//!
//! Turns an order export (one row per order, every item packed into
//! `product_info`) into the canonical picklist table with one row per item.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use picklist_model::{Column, OrderRow};
use tracing::{debug, info};

use crate::error::IngestError;
use crate::extract::extract_fields;
use crate::normalize::split_entries;

pub const ORDER_ID_HEADER: &str = "order_sn";
pub const PRODUCT_INFO_HEADER: &str = "product_info";

/// Result of preparing an export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparedExport {
    pub rows: Vec<OrderRow>,
    /// Export rows that contributed at least one entry.
    pub orders: usize,
}

impl PreparedExport {
    /// Header row followed by one row per entry, in `A..D` layout.
    pub fn to_table(&self) -> Vec<Vec<String>> {
        let mut table = Vec::with_capacity(self.rows.len() + 1);
        table.push(
            Column::ALL
                .iter()
                .map(|column| column.header().to_string())
                .collect(),
        );
        table.extend(self.rows.iter().map(OrderRow::to_cells));
        table
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

pub fn read_export(path: &Path) -> Result<PreparedExport, IngestError> {
    let file = std::fs::File::open(path).map_err(|e| IngestError::io(path, e))?;
    read_export_from(file, path)
}

/// Reads an export from any reader; `source` is only used in errors.
pub fn read_export_from<R: Read>(reader: R, source: &Path) -> Result<PreparedExport, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::csv(source, &e))?
        .iter()
        .map(normalize_header)
        .collect();

    let position = |name: &str| headers.iter().position(|header| header == name);
    let (order_idx, info_idx) = match (position(ORDER_ID_HEADER), position(PRODUCT_INFO_HEADER)) {
        (Some(order_idx), Some(info_idx)) => (order_idx, info_idx),
        (order_idx, info_idx) => {
            let mut columns = Vec::new();
            if order_idx.is_none() {
                columns.push(ORDER_ID_HEADER.to_string());
            }
            if info_idx.is_none() {
                columns.push(PRODUCT_INFO_HEADER.to_string());
            }
            return Err(IngestError::MissingColumns {
                path: source.to_path_buf(),
                columns,
            });
        }
    };

    let mut prepared = PreparedExport::default();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::csv(source, &e))?;
        let order_id = record.get(order_idx).unwrap_or_default().trim();
        let product_info = record.get(info_idx).unwrap_or_default();
        let entries = split_entries(product_info);
        if entries.is_empty() {
            continue;
        }
        debug!(entries = entries.len(), "split order");
        prepared.orders += 1;
        for entry in entries {
            let fields = extract_fields(&entry);
            prepared.rows.push(OrderRow {
                variation_name: fields.variation_name,
                ..OrderRow::new(order_id, fields.quantity, fields.sku, fields.parent_sku)
            });
        }
    }
    info!(
        orders = prepared.orders,
        rows = prepared.rows.len(),
        "export prepared"
    );
    Ok(prepared)
}
