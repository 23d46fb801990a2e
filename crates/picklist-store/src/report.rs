use picklist_model::{ExpansionPlan, RowState, RowWarning};

/// Summary of one run over a sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub table: String,
    pub subsheet: String,
    pub catalog_fingerprint: String,
    /// Data rows classified (header excluded).
    pub rows_scanned: usize,
    pub passthrough: usize,
    pub single_size: usize,
    pub bundles: usize,
    pub cell_updates: usize,
    pub appended_rows: usize,
    pub cleared_rows: usize,
    pub warnings: Vec<RowWarning>,
    pub dry_run: bool,
    pub success: bool,
    /// Sink failure that ended the run, if any.
    pub failure: Option<String>,
    pub duration_ms: u128,
}

impl RunReport {
    pub(crate) fn record_plan(&mut self, plan: &ExpansionPlan) {
        self.rows_scanned = plan.outcomes.len();
        self.passthrough = plan.count(RowState::PlainPassthrough);
        self.single_size = plan.count(RowState::SingleSizeUpdated);
        self.bundles = plan.count(RowState::BundleExpanded);
        self.cell_updates = plan.cell_updates.len();
        self.appended_rows = plan.appended_rows.len();
        self.cleared_rows = plan.rows_to_clear.len();
        self.warnings.clone_from(&plan.warnings);
    }
}
