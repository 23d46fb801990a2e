use std::path::Path;

use picklist_core::build_pick_route;
use picklist_ingest::{WarehouseSequence, load_warehouse_sequence_from};

fn sequence() -> WarehouseSequence {
    let csv = "warehouse,sku\n\
               04-2098-5F,1152 x 1\n\
               04-2098-5F,1153\n\
               04-2098-5F,1154\n\
               03-2140,941\n\
               03-2140,6425\n";
    load_warehouse_sequence_from(csv.as_bytes(), Path::new("sequence.csv")).expect("sequence")
}

fn cells(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

#[test]
fn groups_skus_in_shelf_order() {
    let route = build_pick_route(
        &cells(&["6425", "1154", "941", "1152 B", "XYZ", "", " 1153"]),
        &sequence(),
    );

    assert_eq!(route.warehouses[0].skus, cells(&["1152 B", "1153", "1154"]));
    assert_eq!(route.warehouses[1].joined(), "941 6425");
    assert_eq!(route.unsequenced, cells(&["XYZ"]));
    insta::assert_snapshot!(route.to_string(), @r"
    04-2098-5F: 1152 B 1153 1154
    03-2140: 941 6425
    all: 1152 B 941 1153 6425 1154
    unsequenced: XYZ
    ");
}

#[test]
fn empty_warehouses_render_without_trailing_space() {
    let route = build_pick_route(&cells(&["941"]), &sequence());

    let rendered = route.to_string();
    assert!(rendered.lines().all(|line| line == line.trim_end()));
    assert_eq!(rendered, "04-2098-5F:\n03-2140: 941\nall: 941");
}

#[test]
fn repeated_skus_are_kept() {
    let route = build_pick_route(&cells(&["1153", "1153"]), &sequence());

    assert_eq!(route.warehouses[0].skus, cells(&["1153", "1153"]));
    assert_eq!(route.all.len(), 2);
}
