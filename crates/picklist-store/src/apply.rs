//! Plan application against a store.

use picklist_model::ExpansionPlan;
use tracing::{error, info, info_span};

use crate::error::StoreError;
use crate::store::TableStore;

/// Applies `plan`: cell updates, then appends, then clears.
///
/// The first failing step stops the rest, so a failed append never clears
/// the rows it was meant to replace. Steps already applied stay applied.
/// A plan that would clear a row inside the append range is rejected before
/// any write.
pub fn apply_plan<S: TableStore + ?Sized>(
    store: &mut S,
    plan: &ExpansionPlan,
) -> Result<(), StoreError> {
    let span = info_span!("apply");
    let _guard = span.enter();

    if !plan.appended_rows.is_empty() {
        let first_appended = store.last_populated_row()? + 1;
        if let Some(&row) = plan.rows_to_clear.range(first_appended..).next() {
            error!(row, first_appended, "cleared row overlaps appended rows");
            return Err(StoreError::Write {
                operation: "append",
                message: format!("row {row} would be appended and then cleared"),
            });
        }
    }

    if !plan.cell_updates.is_empty() {
        store
            .batch_write_cells(&plan.cell_updates)
            .inspect_err(|err| error!(error = %err, "cell update failed"))?;
        info!(cells = plan.cell_updates.len(), "cells updated");
    }
    if !plan.appended_rows.is_empty() {
        store
            .append_rows(&plan.appended_rows)
            .inspect_err(|err| error!(error = %err, "append failed"))?;
        info!(rows = plan.appended_rows.len(), "rows appended");
    }
    if !plan.rows_to_clear.is_empty() {
        store
            .clear_rows(&plan.rows_to_clear)
            .inspect_err(|err| error!(error = %err, "clear failed"))?;
        info!(rows = plan.rows_to_clear.len(), "rows cleared");
    }
    Ok(())
}
