//! Pipelines behind the `prepare`, `route` and `rules` subcommands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use picklist_catalog::RuleCatalog;
use picklist_core::{PickRoute, build_pick_route};
use picklist_ingest::{load_warehouse_sequence, read_export};
use picklist_model::Column;
use picklist_store::{CsvSheetStore, StoreConnection, TableStore};
use tracing::{debug, info, info_span};

use crate::logging::redact_value;

/// Built-in catalog, or the TOML file at `path`.
pub fn load_catalog(path: Option<&Path>) -> Result<RuleCatalog> {
    let catalog = match path {
        Some(path) => RuleCatalog::load(path)
            .with_context(|| format!("load rule catalog {}", path.display()))?,
        None => RuleCatalog::builtin(),
    };
    let fingerprint = catalog
        .fingerprint()
        .context("fingerprint rule catalog")?;
    info!(
        rules = catalog.len(),
        fingerprint = %fingerprint,
        "rule catalog ready"
    );
    Ok(catalog)
}

/// Where `prepare` writes the canonical table.
#[derive(Debug, Clone)]
pub enum Destination {
    Sheet {
        connection: StoreConnection,
        table: String,
        subsheet: String,
    },
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareSummary {
    pub orders: usize,
    pub rows: usize,
    pub written_to: PathBuf,
}

/// Explodes a marketplace export into one canonical row per item and writes it.
pub fn prepare_export(export: &Path, destination: &Destination) -> Result<PrepareSummary> {
    let span = info_span!("prepare", export = %export.display());
    let _guard = span.enter();
    let prepared =
        read_export(export).with_context(|| format!("read export {}", export.display()))?;
    for row in &prepared.rows {
        debug!(order = redact_value(&row.order_id), sku = %row.sku, "item");
    }
    let store = match destination {
        Destination::Sheet {
            connection,
            table,
            subsheet,
        } => connection
            .write_sheet(table, subsheet, prepared.to_table())
            .with_context(|| format!("write sheet {table}/{subsheet}"))?,
        Destination::File(path) => CsvSheetStore::create(path.clone(), prepared.to_table())
            .with_context(|| format!("write {}", path.display()))?,
    };
    Ok(PrepareSummary {
        orders: prepared.orders,
        rows: prepared.rows.len(),
        written_to: store.path().to_path_buf(),
    })
}

/// Groups the SKU column of a processed sheet by warehouse shelf order.
pub fn route_sheet(
    connection: &StoreConnection,
    table: &str,
    subsheet: &str,
    sequence: &Path,
) -> Result<PickRoute> {
    let span = info_span!("route", table, subsheet);
    let _guard = span.enter();
    let sequence = load_warehouse_sequence(sequence)
        .with_context(|| format!("load warehouse sequence {}", sequence.display()))?;
    let store = connection
        .open(table, subsheet)
        .with_context(|| format!("open sheet {table}/{subsheet}"))?;
    let skus = store.read_column(Column::Sku).context("read SKU column")?;
    let route = build_pick_route(skus.get(1..).unwrap_or_default(), &sequence);
    info!(
        warehouses = route.warehouses.len(),
        sequenced = route.all.len(),
        unsequenced = route.unsequenced.len(),
        "pick route built"
    );
    Ok(route)
}
