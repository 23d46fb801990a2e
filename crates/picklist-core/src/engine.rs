//! Order expansion engine.
//!
//! Classifies every data row of a [`SourceTable`] against the [`RuleCatalog`]
//! and accumulates one [`ExpansionPlan`] for the whole table.
//!
//! # Classification
//!
//! Each data row ends in exactly one [`RowState`]:
//!
//! 1. **Resolved rows** whose SKU is already a catalog target SKU are left alone,
//!    which keeps a second run from expanding or rescaling its own output.
//! 2. **Multi-size bundles** (`(3 SIZES, 10s)` in the order or SKU cell) are
//!    replaced by one appended row per size and the source row is cleared.
//! 3. **Named bundles** (`RCK-FULLSET`, ...) are replaced the same way.
//! 4. **Single sizes** (`(10" x 7") 10pc`) get SKU and quantity rewritten in place.
//! 5. Anything else passes through untouched.
//!
//! Bundle matches win over single-size matches; a replaced row is never also
//! updated in place.
//!
//! Order identifiers are customer data and never appear in engine logs.
//!
//! Row-level problems (unparseable quantity, a label with no catalog entry)
//! are recorded as plan warnings and never stop the table. Only quantity
//! overflow is fatal.

use picklist_catalog::{RuleCatalog, RuleLine};
use picklist_model::{ExpansionPlan, OrderRow, Quantity, RowState, WarningKind};
use tracing::{debug, info, info_span, trace, warn};

use crate::error::ExpansionError;
use crate::matcher::{find_multi_size_label, find_single_size_label};
use crate::table::SourceTable;

#[derive(Debug, Clone)]
pub struct ExpansionEngine {
    catalog: RuleCatalog,
}

/// Quantity of one row, parsed on first use.
struct RowQuantity<'a> {
    raw: &'a str,
    parsed: Option<Quantity>,
}

impl<'a> RowQuantity<'a> {
    fn new(raw: &'a str) -> Self {
        Self { raw, parsed: None }
    }

    fn get(&mut self, row: usize, plan: &mut ExpansionPlan) -> Quantity {
        if let Some(quantity) = self.parsed {
            return quantity;
        }
        let quantity = Quantity::parse_cell(self.raw).unwrap_or_else(|_| {
            warn!(row, quantity = self.raw, "invalid quantity, using 0");
            plan.warn(
                row,
                WarningKind::QuantityDegraded,
                format!("invalid quantity {:?}, using 0", self.raw),
            );
            Quantity::ZERO
        });
        self.parsed = Some(quantity);
        quantity
    }
}

impl ExpansionEngine {
    pub fn new(catalog: RuleCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Builds the plan for every data row of `table`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpansionError::QuantityOverflow`] when a scaled quantity does
    /// not fit in `u32`. No partial plan is returned in that case.
    pub fn expand_table(&self, table: &SourceTable) -> Result<ExpansionPlan, ExpansionError> {
        let span = info_span!("expand", rows = table.len());
        let _guard = span.enter();
        let mut plan = ExpansionPlan::new();
        for (row_index, row) in table.data_rows() {
            self.classify_row(row_index, row, &mut plan)?;
        }
        info!(
            passthrough = plan.count(RowState::PlainPassthrough),
            single_size = plan.count(RowState::SingleSizeUpdated),
            bundles = plan.count(RowState::BundleExpanded),
            appended = plan.appended_rows.len(),
            cleared = plan.rows_to_clear.len(),
            warnings = plan.warnings.len(),
            "expansion planned"
        );
        Ok(plan)
    }

    /// Classifies one sheet row and records its writes into `plan`.
    pub fn classify_row(
        &self,
        row_index: usize,
        row: &OrderRow,
        plan: &mut ExpansionPlan,
    ) -> Result<RowState, ExpansionError> {
        let order_id = row.order_id.as_str();
        let sku = row.sku.as_str();
        let has_quantity = !row.quantity_raw.trim().is_empty();
        let mut quantity = RowQuantity::new(&row.quantity_raw);
        trace!(
            row = row_index,
            quantity = %row.quantity_raw,
            sku,
            parent_sku = %row.parent_sku,
            "raw cells"
        );

        if self.catalog.is_target_sku(sku.trim()) {
            debug!(row = row_index, sku, "already a pick SKU");
            plan.record_passthrough(row_index);
            return Ok(RowState::PlainPassthrough);
        }

        if !order_id.is_empty()
            && has_quantity
            && let Some(label) = find_multi_size_label(order_id, sku)
        {
            match self.catalog.multi_size(label) {
                Some(lines) => {
                    let ordered = quantity.get(row_index, plan);
                    let rows = expand_lines(row_index, order_id, sku, lines, ordered)?;
                    debug!(
                        row = row_index,
                        rule = label,
                        lines = rows.len(),
                        "multi-size bundle"
                    );
                    plan.record_expansion(row_index, label, rows);
                    return Ok(RowState::BundleExpanded);
                }
                None => unknown_rule(plan, row_index, label),
            }
        }

        if !sku.is_empty()
            && has_quantity
            && let Some(bundle) = self.catalog.named_bundle(order_id, sku)
        {
            let parent = if row.parent_sku.is_empty() {
                sku
            } else {
                row.parent_sku.as_str()
            };
            let ordered = quantity.get(row_index, plan);
            let rows = expand_lines(row_index, order_id, parent, &bundle.lines, ordered)?;
            debug!(
                row = row_index,
                rule = %bundle.key,
                lines = rows.len(),
                "named bundle"
            );
            plan.record_expansion(row_index, &bundle.key, rows);
            return Ok(RowState::BundleExpanded);
        }

        if !order_id.is_empty()
            && has_quantity
            && let Some(label) = find_single_size_label(order_id, sku)
        {
            match self.catalog.single_size(label) {
                Some(line) => {
                    let ordered = quantity.get(row_index, plan);
                    let total = scale(row_index, line, ordered)?;
                    debug!(
                        row = row_index,
                        rule = label,
                        sku = %line.sku,
                        quantity = total.get(),
                        "single size"
                    );
                    plan.record_single_size(row_index, label, &line.sku, total.to_cell());
                    return Ok(RowState::SingleSizeUpdated);
                }
                None => unknown_rule(plan, row_index, label),
            }
        }

        plan.record_passthrough(row_index);
        Ok(RowState::PlainPassthrough)
    }
}

fn unknown_rule(plan: &mut ExpansionPlan, row: usize, label: &str) {
    warn!(row, label, "no catalog entry for label");
    plan.warn(
        row,
        WarningKind::UnknownRuleKey,
        format!("no catalog entry for {label}"),
    );
}

fn scale(row: usize, line: &RuleLine, ordered: Quantity) -> Result<Quantity, ExpansionError> {
    ordered
        .checked_scale(line.multiplier)
        .ok_or_else(|| ExpansionError::QuantityOverflow {
            row,
            sku: line.sku.clone(),
            multiplier: line.multiplier,
            quantity: ordered.get(),
        })
}

/// One `[orderId, quantity, sku, parentSku]` row per rule line, in rule order.
fn expand_lines(
    row: usize,
    order_id: &str,
    parent_sku: &str,
    lines: &[RuleLine],
    ordered: Quantity,
) -> Result<Vec<OrderRow>, ExpansionError> {
    lines
        .iter()
        .map(|line| {
            let total = scale(row, line, ordered)?;
            Ok(OrderRow::new(order_id, total, line.sku.as_str(), parent_sku))
        })
        .collect()
}
