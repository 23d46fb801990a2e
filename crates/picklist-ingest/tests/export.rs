use std::fs;
use std::path::Path;

use picklist_ingest::{IngestError, read_export, read_export_from};
use picklist_model::Quantity;

const EXPORT: &str = "order_sn,product_info,tracking_number
240101AAA,\"[1] Product Name:Shoe Bag; Variation Name:(10\"\" x 7\"\") 10pc; Quantity: 3; SKU Reference No.: BAG-107; Parent SKU Reference No.: BAG;
[2] Product Name:Kit; Variation Name:Full; Quantity: 1; SKU Reference No.: RCK-FULLSET; Parent SKU Reference No.: RCK;\",SPX1
240101BBB,\"[1] Product Name:Polish; Quantity: 2; SKU Reference No.: ; Parent SKU Reference No.: ;\",SPX2
240101CCC,,SPX3
";

#[test]
fn explodes_orders_into_item_rows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("export.csv");
    fs::write(&path, EXPORT).expect("write export");

    let prepared = read_export(&path).expect("read export");

    assert_eq!(prepared.orders, 2);
    assert_eq!(prepared.rows.len(), 3);
    let first = &prepared.rows[0];
    assert_eq!(first.order_id, "240101AAA");
    assert_eq!(first.quantity_raw, "Quantity: 3");
    assert_eq!(first.sku, "BAG-107");
    assert_eq!(first.parent_sku, "BAG");
    assert_eq!(first.variation_name.as_deref(), Some("(10\" x 7\") 10pc"));
    assert_eq!(prepared.rows[1].sku, "RCK-FULLSET");
    assert_eq!(prepared.rows[2].order_id, "240101BBB");
    assert_eq!(prepared.rows[2].sku, "");
    assert_eq!(prepared.rows[2].quantity_raw, Quantity::new(2).to_cell());
}

#[test]
fn prepared_table_has_canonical_header() {
    let prepared = read_export_from(EXPORT.as_bytes(), Path::new("inline")).expect("read export");
    let table = prepared.to_table();
    assert_eq!(
        table[0],
        vec!["order_sn", "Quantity", "SKU Reference No.", "Parent SKU Reference No."]
    );
    assert_eq!(table.len(), 4);
    assert_eq!(table[1], vec!["240101AAA", "Quantity: 3", "BAG-107", "BAG"]);
}

#[test]
fn missing_columns_are_reported() {
    let err = read_export_from("order_id,notes\n1,x\n".as_bytes(), Path::new("bad.csv"))
        .expect_err("missing columns");
    match err {
        IngestError::MissingColumns { columns, .. } => {
            assert_eq!(columns, vec!["order_sn", "product_info"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let err = read_export(Path::new("/nonexistent/export.csv")).expect_err("no file");
    assert!(matches!(err, IngestError::Io { .. }));
}
