//! Run entry points: read, expand, apply.

use std::time::Instant;

use picklist_catalog::RuleCatalog;
use picklist_core::ExpansionEngine;
use picklist_model::ExpansionPlan;
use tracing::{error, info, info_span, warn};

use crate::apply::apply_plan;
use crate::error::RunError;
use crate::report::RunReport;
use crate::sheet::StoreConnection;
use crate::store::TableStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Build and report the plan without writing.
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: RunReport,
    pub plan: ExpansionPlan,
}

/// Runs the engine over one store.
///
/// A header-only table ends the run with `success = false`. A sink failure
/// is logged and also reported as `success = false`; only read failures,
/// catalog serialization failures and quantity overflow are errors.
pub fn run_on_store<S: TableStore + ?Sized>(
    store: &mut S,
    engine: &ExpansionEngine,
    options: RunOptions,
) -> Result<RunOutcome, RunError> {
    let started = Instant::now();
    let mut report = RunReport {
        catalog_fingerprint: engine.catalog().fingerprint()?,
        dry_run: options.dry_run,
        ..RunReport::default()
    };

    let table = {
        let span = info_span!("read");
        let _guard = span.enter();
        let table = store.read_table()?;
        info!(rows = table.len(), "table read");
        table
    };
    if table.has_no_data() {
        warn!(rows = table.len(), "table has no data rows");
        report.duration_ms = started.elapsed().as_millis();
        return Ok(RunOutcome {
            report,
            plan: ExpansionPlan::new(),
        });
    }

    let plan = engine.expand_table(&table)?;
    report.record_plan(&plan);

    if options.dry_run {
        info!("dry run, nothing written");
        report.success = true;
    } else {
        match apply_plan(store, &plan) {
            Ok(()) => report.success = true,
            Err(err) => {
                error!(error = %err, "run stopped, earlier steps stay applied");
                report.failure = Some(err.to_string());
            }
        }
    }
    report.duration_ms = started.elapsed().as_millis();
    info!(
        success = report.success,
        duration_ms = report.duration_ms,
        "run finished"
    );
    Ok(RunOutcome { report, plan })
}

/// Opens `<table>/<subsheet>` under the connection and runs the engine on it.
pub fn process_sheet(
    connection: &StoreConnection,
    table: &str,
    subsheet: &str,
    engine: &ExpansionEngine,
    options: RunOptions,
) -> Result<RunOutcome, RunError> {
    let span = info_span!("run", table, subsheet);
    let _guard = span.enter();
    info!(
        catalog = %engine.catalog().fingerprint()?,
        rules = engine.catalog().len(),
        "run started"
    );
    let mut store = connection.open(table, subsheet)?;
    let mut outcome = run_on_store(&mut store, engine, options)?;
    outcome.report.table = table.to_string();
    outcome.report.subsheet = subsheet.to_string();
    Ok(outcome)
}

/// Boolean entry point: `Ok(false)` for an empty table or a failed write,
/// `Err` when the sheet cannot be opened or a quantity overflows.
pub fn process_picklist(
    connection: &StoreConnection,
    table: &str,
    subsheet: &str,
    catalog: RuleCatalog,
) -> Result<bool, RunError> {
    let engine = ExpansionEngine::new(catalog);
    process_sheet(connection, table, subsheet, &engine, RunOptions::default())
        .map(|outcome| outcome.report.success)
}
