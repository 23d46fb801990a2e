use anyhow::{Context, Result};
use picklist_catalog::RuleCatalog;
use picklist_core::{ExpansionEngine, PickRoute};
use picklist_store::{RunOptions, RunOutcome, StoreConnection, process_sheet};

use picklist_cli::pipeline::{
    Destination, PrepareSummary, load_catalog, prepare_export, route_sheet,
};

use crate::cli::{PrepareArgs, ProcessArgs, RouteArgs, RulesArgs};

pub fn run_process(args: &ProcessArgs) -> Result<RunOutcome> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let engine = ExpansionEngine::new(catalog);
    let connection = StoreConnection::new(&args.sheet.store);
    let options = RunOptions {
        dry_run: args.dry_run,
    };
    process_sheet(
        &connection,
        &args.sheet.table,
        &args.sheet.sheet,
        &engine,
        options,
    )
    .with_context(|| format!("process {}/{}", args.sheet.table, args.sheet.sheet))
}

pub fn run_prepare(args: &PrepareArgs) -> Result<PrepareSummary> {
    let destination = match &args.output {
        Some(path) => Destination::File(path.clone()),
        None => Destination::Sheet {
            connection: StoreConnection::new(&args.sheet.store),
            table: args.sheet.table.clone(),
            subsheet: args.sheet.sheet.clone(),
        },
    };
    prepare_export(&args.export, &destination)
}

pub fn run_route(args: &RouteArgs) -> Result<PickRoute> {
    let connection = StoreConnection::new(&args.sheet.store);
    route_sheet(
        &connection,
        &args.sheet.table,
        &args.sheet.sheet,
        &args.sequence,
    )
}

/// Loaded catalog and its fingerprint.
pub fn run_rules(args: &RulesArgs) -> Result<(RuleCatalog, String)> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let fingerprint = catalog
        .fingerprint()
        .context("fingerprint rule catalog")?;
    Ok((catalog, fingerprint))
}
