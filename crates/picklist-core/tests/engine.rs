//! Classification and quantity arithmetic of the expansion engine.

use picklist_catalog::{RuleCatalog, RuleClass, RuleLine, SingleSizeRule};
use picklist_core::{ExpansionEngine, ExpansionError, SourceTable};
use picklist_model::{
    CellUpdate, Column, ExpansionPlan, OrderRow, Quantity, RowState, WarningKind,
};

fn row(order_id: &str, quantity: &str, sku: &str, parent_sku: &str) -> OrderRow {
    OrderRow::from_cells(&[order_id, quantity, sku, parent_sku])
}

fn header() -> OrderRow {
    row(
        "order_sn",
        "Quantity",
        "SKU Reference No.",
        "Parent SKU Reference No.",
    )
}

fn table(rows: Vec<OrderRow>) -> SourceTable {
    let mut all = vec![header()];
    all.extend(rows);
    SourceTable::from_rows(all)
}

fn engine() -> ExpansionEngine {
    ExpansionEngine::new(RuleCatalog::builtin())
}

/// Applies a plan the way the sink does: updates, appends, then blank clears.
fn apply(table: &SourceTable, plan: &ExpansionPlan) -> SourceTable {
    let mut rows = table.rows.clone();
    for update in &plan.cell_updates {
        let target = &mut rows[update.row - 1];
        match update.column {
            Column::OrderId => target.order_id.clone_from(&update.value),
            Column::Quantity => target.quantity_raw.clone_from(&update.value),
            Column::Sku => target.sku.clone_from(&update.value),
            Column::ParentSku => target.parent_sku.clone_from(&update.value),
        }
    }
    rows.extend(plan.appended_rows.iter().cloned());
    for index in &plan.rows_to_clear {
        rows[index - 1] = OrderRow::default();
    }
    SourceTable::from_rows(rows)
}

#[test]
fn single_size_scales_quantity_in_place() {
    let table = table(vec![row(
        "240101AAA",
        "Quantity: 3",
        "(10\" x 7\") 10pc",
        "BAG",
    )]);

    let plan = engine().expand_table(&table).expect("plan");

    assert_eq!(
        plan.cell_updates,
        vec![
            CellUpdate::new(2, Column::Sku, "1152"),
            CellUpdate::new(2, Column::Quantity, "Quantity: 6"),
        ]
    );
    assert!(plan.appended_rows.is_empty());
    assert!(plan.rows_to_clear.is_empty());
    assert_eq!(plan.count(RowState::SingleSizeUpdated), 1);
}

#[test]
fn every_single_size_rule_multiplies_order_quantity() {
    let catalog = RuleCatalog::builtin();
    let engine = ExpansionEngine::new(catalog.clone());
    for rule in catalog
        .rules()
        .filter(|rule| rule.class() == RuleClass::SingleSize)
    {
        let line = &rule.lines()[0];
        let mut plan = ExpansionPlan::new();
        let state = engine
            .classify_row(2, &row("ORD", "Quantity: 5", rule.key(), ""), &mut plan)
            .expect("classify");
        assert_eq!(state, RowState::SingleSizeUpdated, "{}", rule.key());
        assert_eq!(plan.cell_updates[0].value, line.sku);
        assert_eq!(
            plan.cell_updates[1].value,
            format!("Quantity: {}", line.multiplier * 5)
        );
    }
}

#[test]
fn multi_size_bundle_appends_one_row_per_size() {
    let table = table(vec![row("240101BBB", "Quantity: 2", "(3 SIZES, 5s)", "BAG")]);

    let plan = engine().expand_table(&table).expect("plan");

    let skus: Vec<&str> = plan.appended_rows.iter().map(|r| r.sku.as_str()).collect();
    assert_eq!(skus, vec!["1152", "1153", "1154"]);
    for appended in &plan.appended_rows {
        assert_eq!(appended.order_id, "240101BBB");
        assert_eq!(appended.quantity_raw, "Quantity: 2");
        assert_eq!(appended.parent_sku, "(3 SIZES, 5s)");
    }
    assert!(plan.rows_to_clear.contains(&2));
    assert!(plan.cell_updates.is_empty());
}

#[test]
fn every_multi_size_bundle_produces_its_line_count() {
    let catalog = RuleCatalog::builtin();
    for label in ["(3 SIZES, 5s)", "(3 SIZES, 10s)", "(3 SIZES, 15s)", "(3 SIZES, 20s)"] {
        let lines: &[RuleLine] = catalog.multi_size(label).expect("builtin label");
        let table = table(vec![row("ORD", "Quantity: 1", label, "")]);
        let plan = ExpansionEngine::new(catalog.clone())
            .expand_table(&table)
            .expect("plan");
        assert_eq!(plan.appended_rows.len(), lines.len(), "{label}");
    }
}

#[test]
fn full_set_expands_to_seven_single_units() {
    let table = table(vec![row("240101CCC", "Quantity: 1", "RCK-FULLSET", "RCK")]);

    let plan = engine().expand_table(&table).expect("plan");

    assert_eq!(plan.appended_rows.len(), 7);
    let skus: Vec<&str> = plan.appended_rows.iter().map(|r| r.sku.as_str()).collect();
    assert_eq!(skus, vec!["74", "924", "925", "926", "927", "940", "1124"]);
    assert!(
        plan.appended_rows
            .iter()
            .all(|r| r.quantity_raw == "Quantity: 1" && r.parent_sku == "RCK")
    );
    assert_eq!(plan.rows_to_clear.len(), 1);
}

#[test]
fn named_bundle_matches_order_text_and_falls_back_to_sku_parent() {
    let table = table(vec![row(
        "Boot Polishing Pack - Army",
        "Quantity: 3",
        "BPP",
        "",
    )]);

    let plan = engine().expand_table(&table).expect("plan");

    assert_eq!(
        plan.appended_rows,
        vec![
            OrderRow::new("Boot Polishing Pack - Army", Quantity::new(3), "941", "BPP"),
            OrderRow::new("Boot Polishing Pack - Army", Quantity::new(3), "6425", "BPP"),
        ]
    );
}

#[test]
fn bundle_match_suppresses_single_size_update() {
    let table = table(vec![row(
        "Zip Bag (10\" x 7\") 5pc",
        "Quantity: 1",
        "(3 SIZES, 10s)",
        "",
    )]);

    let plan = engine().expand_table(&table).expect("plan");

    assert!(plan.cell_updates.is_empty());
    assert_eq!(plan.appended_rows.len(), 3);
    assert_eq!(
        plan.outcome(2).map(|outcome| outcome.state),
        Some(RowState::BundleExpanded)
    );
}

#[test]
fn unmatched_rows_are_left_untouched() {
    let plain = row("240101DDD", "Quantity: 4", "SOCK-BLK", "SOCK");
    let table = table(vec![plain.clone()]);

    let plan = engine().expand_table(&table).expect("plan");

    assert!(plan.is_noop());
    assert_eq!(apply(&table, &plan).rows[1], plain);
    assert_eq!(plan.count(RowState::PlainPassthrough), 1);
}

#[test]
fn rows_missing_required_cells_pass_through() {
    let table = table(vec![
        row("", "Quantity: 1", "(3 SIZES, 5s)", ""),
        row("ORD", "", "RCK-FULLSET", ""),
        row("ORD", "Quantity: 1", "", ""),
    ]);

    let plan = engine().expand_table(&table).expect("plan");

    assert!(plan.is_noop());
    assert_eq!(plan.count(RowState::PlainPassthrough), 3);
}

#[test]
fn header_row_is_never_classified() {
    let table = SourceTable::from_rows(vec![row("RCK-FULLSET", "Quantity: 1", "RCK-FULLSET", "")]);

    let plan = engine().expand_table(&table).expect("plan");

    assert!(plan.outcomes.is_empty());
    assert!(plan.is_noop());
}

#[test]
fn unparseable_quantity_degrades_to_zero() {
    let table = table(vec![
        row("ORD-1", "Quantity: abc", "(10\" x 7\") 10pc", ""),
        row("ORD-2", "Quantity: abc", "(3 SIZES, 5s)", ""),
    ]);

    let plan = engine().expand_table(&table).expect("plan");

    assert_eq!(plan.cell_updates[1].value, "Quantity: 0");
    assert!(
        plan.appended_rows
            .iter()
            .all(|r| r.quantity_raw == "Quantity: 0")
    );
    let degraded: Vec<usize> = plan
        .warnings
        .iter()
        .filter(|w| w.kind == WarningKind::QuantityDegraded)
        .map(|w| w.row)
        .collect();
    assert_eq!(degraded, vec![2, 3]);
}

#[test]
fn unknown_label_is_a_warning_not_an_error() {
    let table = table(vec![
        row("ORD-1", "Quantity: 1", "(7\" x 7\") 5pc", ""),
        row("ORD-2", "Quantity: 1", "(4 SIZES, 5s)", ""),
    ]);

    let plan = engine().expand_table(&table).expect("plan");

    assert!(plan.is_noop());
    assert_eq!(plan.warnings.len(), 2);
    assert!(
        plan.warnings
            .iter()
            .all(|w| w.kind == WarningKind::UnknownRuleKey)
    );
}

#[test]
fn quantity_overflow_aborts_the_plan() {
    let catalog = RuleCatalog::new(
        vec![SingleSizeRule {
            key: "(10\" x 7\") 5pc".to_string(),
            line: RuleLine::new("1152", 4),
        }],
        Vec::new(),
        Vec::new(),
    )
    .expect("catalog");
    let table = table(vec![row(
        "ORD",
        "Quantity: 4294967295",
        "(10\" x 7\") 5pc",
        "",
    )]);

    let err = ExpansionEngine::new(catalog)
        .expand_table(&table)
        .expect_err("overflow");

    assert_eq!(
        err,
        ExpansionError::QuantityOverflow {
            row: 2,
            sku: "1152".to_string(),
            multiplier: 4,
            quantity: u32::MAX,
        }
    );
}

#[test]
fn expanded_output_is_rule_inert() {
    let table = table(vec![
        row("Zip Bag (3 SIZES, 5s)", "Quantity: 2", "BAG", ""),
        row("Zip Bag (10\" x 7\") 10pc", "Quantity: 3", "BAG-S", ""),
        row("ORD-3", "Quantity: 1", "RCK-FULLSET", ""),
        row("ORD-4", "Quantity: 1", "SOCK", ""),
    ]);
    let engine = engine();
    let first = engine.expand_table(&table).expect("first plan");
    let after_first = apply(&table, &first);

    let second = engine.expand_table(&after_first).expect("second plan");

    assert!(second.is_noop(), "second run planned writes:\n{second}");
    assert!(second.warnings.is_empty());
}

#[test]
fn cleared_rows_are_deduplicated() {
    let table = table(vec![
        row("ORD-1", "Quantity: 1", "RCK-FULLSET", ""),
        row("ORD-2", "Quantity: 1", "RCK-FULLSET", ""),
    ]);

    let plan = engine().expand_table(&table).expect("plan");

    assert_eq!(plan.rows_to_clear.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
    assert_eq!(plan.appended_rows.len(), 14);
}

#[test]
fn plan_renders_in_sink_order() {
    let table = table(vec![
        row("ORD-1", "Quantity: 3", "(10\" x 7\") 10pc", ""),
        row("ORD-2", "Quantity: 2", "BAG-3S (3 SIZES, 5s)", ""),
        row("ORD-3", "Quantity: 1", "SOCK", ""),
    ]);

    let plan = engine().expand_table(&table).expect("plan");

    insta::assert_snapshot!(plan.to_string(), @r"
    update C2 = 1152
    update B2 = Quantity: 6
    append [ORD-2 | Quantity: 2 | 1152 | BAG-3S (3 SIZES, 5s)]
    append [ORD-2 | Quantity: 2 | 1153 | BAG-3S (3 SIZES, 5s)]
    append [ORD-2 | Quantity: 2 | 1154 | BAG-3S (3 SIZES, 5s)]
    clear 3
    ");
}
