//! Field extraction from a single normalized order entry.
//!
//! Entries are `Label: value;` sequences. Fields that are absent or fail to
//! parse fall back to their defaults instead of failing the entry.

use std::sync::LazyLock;

use picklist_model::Quantity;
use regex::Regex;
use tracing::warn;

static QUANTITY_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Quantity:\s*(\d+)\s*(?:;|$)").expect("quantity pattern"));

// Anchored to a segment start: the parent label ends in the same text.
static SKU_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|;)\s*SKU Reference No\.:\s*([\w&.-]*)\s*(?:;|$)").expect("sku pattern")
});

static PARENT_SKU_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Parent SKU Reference No\.:\s*([\w&.-]*)\s*(?:;|$)").expect("parent sku pattern")
});

static VARIATION_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Variation Name:([^;]+)(?:;|$)").expect("variation pattern"));

/// Product whose SKU only appears in its variation label.
///
/// The export leaves the SKU fields of this listing unusable; the variation
/// name carries the pick SKU instead. Known data-quality workaround.
pub const VARIATION_SKU_PRODUCT: &str = "Army NS BMT Reservist NS 10 Pack Zip lock / Food Grade Zip Lock Plastic Bag / Resealable Zip Bag / Clear Storage Bag";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFields {
    pub quantity: Quantity,
    pub sku: String,
    pub parent_sku: String,
    pub variation_name: Option<String>,
}

impl Default for EntryFields {
    fn default() -> Self {
        Self {
            quantity: Quantity::ONE,
            sku: String::new(),
            parent_sku: String::new(),
            variation_name: None,
        }
    }
}

fn capture<'a>(pattern: &Regex, entry: &'a str) -> Option<&'a str> {
    pattern
        .captures(entry)
        .and_then(|caps| caps.get(1))
        .map(|value| value.as_str())
}

/// Extracts quantity, SKU references and variation name from an entry.
pub fn extract_fields(entry: &str) -> EntryFields {
    let quantity = match capture(&QUANTITY_FIELD, entry) {
        Some(digits) => digits.parse::<u32>().map(Quantity::new).unwrap_or_else(|_| {
            warn!(quantity = digits, "quantity out of range, using 1");
            Quantity::ONE
        }),
        None => Quantity::ONE,
    };
    let variation_name = capture(&VARIATION_FIELD, entry)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    let mut fields = EntryFields {
        quantity,
        sku: capture(&SKU_FIELD, entry).unwrap_or_default().to_string(),
        parent_sku: capture(&PARENT_SKU_FIELD, entry)
            .unwrap_or_default()
            .to_string(),
        variation_name,
    };
    apply_variation_sku_override(entry, &mut fields);
    fields
}

/// Replaces both SKU references with the variation name for
/// [`VARIATION_SKU_PRODUCT`]. Returns whether the override applied.
pub fn apply_variation_sku_override(entry: &str, fields: &mut EntryFields) -> bool {
    if !entry.contains(VARIATION_SKU_PRODUCT) {
        return false;
    }
    let sku = fields.variation_name.clone().unwrap_or_default();
    fields.sku.clone_from(&sku);
    fields.parent_sku = sku;
    true
}
