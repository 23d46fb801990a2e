use std::fs;

use picklist_catalog::{CatalogError, NamedMatch, RuleCatalog, RuleClass, RuleLine};

const CATALOG: &str = r#"
[[single_size]]
key = '(8" x 6") 10pc'
sku = "2001"
multiplier = 2

[[multi_size]]
key = "(2 SIZES, 5s)"
lines = [{ sku = "2001", multiplier = 1 }, { sku = "2002", multiplier = 1 }]

[[named_bundle]]
key = "Travel Kit"
match = "contains"
lines = [{ sku = "300", multiplier = 2 }, { sku = "301", multiplier = 1 }]
"#;

#[test]
fn loads_catalog_from_toml() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("catalog.toml");
    fs::write(&path, CATALOG).expect("write catalog");

    let catalog = RuleCatalog::load(&path).expect("load catalog");

    assert_eq!(catalog.len(), 3);
    assert_eq!(
        catalog.single_size("(8\" x 6\") 10pc"),
        Some(&RuleLine::new("2001", 2))
    );
    assert_eq!(catalog.multi_size("(2 SIZES, 5s)").map(<[RuleLine]>::len), Some(2));
    let bundle = catalog
        .named_bundle("Weekend Travel Kit", "")
        .expect("named bundle");
    assert_eq!(bundle.match_mode, NamedMatch::Contains);
    assert_eq!(bundle.lines[0], RuleLine::new("300", 2));
    let classes: Vec<RuleClass> = catalog.rules().map(|rule| rule.class()).collect();
    assert_eq!(
        classes,
        vec![
            RuleClass::SingleSize,
            RuleClass::MultiSizeBundle,
            RuleClass::NamedBundle
        ]
    );
}

#[test]
fn rejects_bundle_without_lines() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("catalog.toml");
    fs::write(
        &path,
        "[[named_bundle]]\nkey = \"Empty\"\nmatch = \"exact_sku\"\nlines = []\n",
    )
    .expect("write catalog");

    let err = RuleCatalog::load(&path).expect_err("empty bundle");
    assert!(matches!(err, CatalogError::EmptyBundle { .. }));
}

#[test]
fn reports_toml_errors_with_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[[single_size]]\nkey = 3\n").expect("write catalog");

    let err = RuleCatalog::load(&path).expect_err("bad toml");
    assert!(matches!(err, CatalogError::Toml { .. }));
    assert!(err.to_string().contains("broken.toml"));
}
