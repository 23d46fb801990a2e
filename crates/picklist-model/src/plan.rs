//! Expansion plan: the writes derived from classifying a whole table once.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::column::{Column, cell_ref};
use crate::row::OrderRow;

/// A single cell write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellUpdate {
    pub row: usize,
    pub column: Column,
    pub value: String,
}

impl CellUpdate {
    pub fn new(row: usize, column: Column, value: impl Into<String>) -> Self {
        Self {
            row,
            column,
            value: value.into(),
        }
    }

    pub fn cell_ref(&self) -> String {
        cell_ref(self.column, self.row)
    }
}

/// Terminal classification of a row.
///
/// Every data row starts unclassified and ends in exactly one of these states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowState {
    /// No rule applied; the row is left untouched.
    PlainPassthrough,
    /// SKU and quantity cells rewritten in place.
    SingleSizeUpdated,
    /// Row replaced by appended rows and blanked.
    BundleExpanded,
}

impl RowState {
    pub fn as_str(self) -> &'static str {
        match self {
            RowState::PlainPassthrough => "passthrough",
            RowState::SingleSizeUpdated => "single-size",
            RowState::BundleExpanded => "bundle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowOutcome {
    pub row: usize,
    pub state: RowState,
    /// Key of the rule that fired, if any.
    pub rule: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Quantity cell could not be parsed and was treated as 0.
    QuantityDegraded,
    /// A pattern matched but the catalog has no entry for the label.
    UnknownRuleKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowWarning {
    pub row: usize,
    pub kind: WarningKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionPlan {
    pub cell_updates: Vec<CellUpdate>,
    pub appended_rows: Vec<OrderRow>,
    pub rows_to_clear: BTreeSet<usize>,
    pub outcomes: Vec<RowOutcome>,
    pub warnings: Vec<RowWarning>,
}

impl ExpansionPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when applying the plan would write nothing.
    pub fn is_noop(&self) -> bool {
        self.cell_updates.is_empty() && self.appended_rows.is_empty() && self.rows_to_clear.is_empty()
    }

    pub fn record_passthrough(&mut self, row: usize) {
        self.outcomes.push(RowOutcome {
            row,
            state: RowState::PlainPassthrough,
            rule: None,
        });
    }

    /// Records the in-place SKU and quantity rewrite of a single-size row.
    pub fn record_single_size(&mut self, row: usize, rule: &str, sku: &str, quantity: String) {
        self.cell_updates.push(CellUpdate::new(row, Column::Sku, sku));
        self.cell_updates
            .push(CellUpdate::new(row, Column::Quantity, quantity));
        self.outcomes.push(RowOutcome {
            row,
            state: RowState::SingleSizeUpdated,
            rule: Some(rule.to_string()),
        });
    }

    /// Records a bundle expansion. The source row is always slated for clearing.
    pub fn record_expansion(&mut self, row: usize, rule: &str, rows: Vec<OrderRow>) {
        self.appended_rows.extend(rows);
        self.rows_to_clear.insert(row);
        self.outcomes.push(RowOutcome {
            row,
            state: RowState::BundleExpanded,
            rule: Some(rule.to_string()),
        });
    }

    pub fn warn(&mut self, row: usize, kind: WarningKind, message: impl Into<String>) {
        self.warnings.push(RowWarning {
            row,
            kind,
            message: message.into(),
        });
    }

    pub fn count(&self, state: RowState) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.state == state)
            .count()
    }

    pub fn outcome(&self, row: usize) -> Option<&RowOutcome> {
        self.outcomes.iter().find(|outcome| outcome.row == row)
    }
}

impl fmt::Display for ExpansionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();
        for update in &self.cell_updates {
            lines.push(format!("update {} = {}", update.cell_ref(), update.value));
        }
        for row in &self.appended_rows {
            lines.push(format!("append [{}]", row.to_cells().join(" | ")));
        }
        for row in &self.rows_to_clear {
            lines.push(format!("clear {row}"));
        }
        write!(f, "{}", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::Quantity;

    #[test]
    fn expansion_always_clears_source_row() {
        let mut plan = ExpansionPlan::new();
        plan.record_expansion(
            4,
            "(3 SIZES, 5s)",
            vec![OrderRow::new("A1", Quantity::new(2), "1152", "SET")],
        );
        plan.record_expansion(4, "(3 SIZES, 5s)", Vec::new());
        assert_eq!(plan.rows_to_clear.len(), 1);
        assert!(plan.rows_to_clear.contains(&4));
        assert_eq!(plan.count(RowState::BundleExpanded), 2);
    }

    #[test]
    fn single_size_records_two_cell_writes() {
        let mut plan = ExpansionPlan::new();
        plan.record_single_size(2, "(10\" x 7\") 10pc", "1152", "Quantity: 6".to_string());
        assert_eq!(
            plan.cell_updates,
            vec![
                CellUpdate::new(2, Column::Sku, "1152"),
                CellUpdate::new(2, Column::Quantity, "Quantity: 6"),
            ]
        );
        assert!(plan.appended_rows.is_empty());
        assert!(plan.rows_to_clear.is_empty());
    }
}
