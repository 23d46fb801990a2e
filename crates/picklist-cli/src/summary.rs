use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use picklist_catalog::{ExpansionRule, RuleCatalog};
use picklist_cli::pipeline::PrepareSummary;
use picklist_core::PickRoute;
use picklist_model::{RowWarning, WarningKind};
use picklist_store::RunOutcome;

pub fn print_run_report(outcome: &RunOutcome) {
    let report = &outcome.report;
    println!("Sheet: {}/{}", report.table, report.subsheet);
    println!("Catalog: {}", report.catalog_fingerprint);

    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Rows")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (label, count) in [
        ("Scanned", report.rows_scanned),
        ("Passed through", report.passthrough),
        ("Pack size rewritten", report.single_size),
        ("Bundles expanded", report.bundles),
        ("Cells updated", report.cell_updates),
        ("Rows appended", report.appended_rows),
        ("Rows cleared", report.cleared_rows),
    ] {
        table.add_row(vec![Cell::new(label), count_cell(count, Color::Green)]);
    }
    table.add_row(vec![
        Cell::new("Warnings"),
        count_cell(report.warnings.len(), Color::Yellow),
    ]);
    println!("{table}");

    if !report.warnings.is_empty() {
        print_warnings(&report.warnings);
    }
    if report.dry_run && !outcome.plan.is_noop() {
        println!("Planned writes (dry run):");
        println!("{}", outcome.plan);
    }
    let status = match (&report.failure, report.success) {
        (Some(failure), _) => format!("FAILED: {failure}"),
        (None, true) if report.dry_run => "OK (dry run, nothing written)".to_string(),
        (None, true) => "OK".to_string(),
        (None, false) => "NOTHING TO DO: sheet has no data rows".to_string(),
    };
    println!("Status: {status} ({} ms)", report.duration_ms);
}

fn print_warnings(warnings: &[RowWarning]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Kind"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for warning in warnings {
        let kind = match warning.kind {
            WarningKind::QuantityDegraded => "quantity",
            WarningKind::UnknownRuleKey => "unknown rule",
        };
        table.add_row(vec![
            Cell::new(warning.row),
            Cell::new(kind).fg(Color::Yellow),
            Cell::new(&warning.message),
        ]);
    }
    println!("{table}");
}

pub fn print_prepare(summary: &PrepareSummary) {
    println!(
        "Prepared {} rows from {} orders into {}",
        summary.rows,
        summary.orders,
        summary.written_to.display()
    );
}

pub fn print_route(route: &PickRoute) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Warehouse"),
        header_cell("Picks"),
        header_cell("SKUs"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for picks in &route.warehouses {
        table.add_row(vec![
            Cell::new(&picks.warehouse),
            count_cell(picks.skus.len(), Color::Green),
            Cell::new(picks.joined()),
        ]);
    }
    table.add_row(vec![
        Cell::new("ALL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(route.all.len()).add_attribute(Attribute::Bold),
        Cell::new(route.all.join(" ")),
    ]);
    if !route.unsequenced.is_empty() {
        table.add_row(vec![
            Cell::new("unsequenced").fg(Color::Yellow),
            count_cell(route.unsequenced.len(), Color::Yellow),
            Cell::new(route.unsequenced.join(" ")),
        ]);
    }
    println!("{table}");
}

pub fn print_rules(catalog: &RuleCatalog, fingerprint: &str) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Class"),
        header_cell("Key"),
        header_cell("Match"),
        header_cell("Produces"),
    ]);
    apply_table_style(&mut table);
    for rule in catalog.rules() {
        let match_mode = match rule {
            ExpansionRule::NamedBundle(named) => Cell::new(named.match_mode.as_str()),
            ExpansionRule::SingleSize(_) | ExpansionRule::MultiSizeBundle(_) => dim_cell("label"),
        };
        let produces = rule
            .lines()
            .iter()
            .map(|line| format!("{} x{}", line.sku, line.multiplier))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(rule.class().as_str()),
            Cell::new(rule.key()),
            match_mode,
            Cell::new(produces),
        ]);
    }
    println!("{table}");
    println!("{} rules, fingerprint {fingerprint}", catalog.len());
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
